use cubewalk_geom::{Aabb, IVec3, Vec3};
use proptest::prelude::*;

fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn vec3_approx_eq(a: Vec3, b: Vec3, eps: f32) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps) && approx_eq(a.z, b.z, eps)
}

#[test]
fn vec3_add_sub() {
    let a = Vec3::new(1.0, 2.0, 3.0);
    let b = Vec3::new(-4.0, 5.0, -6.0);
    let c = a + b;
    assert!(vec3_approx_eq(c, Vec3::new(-3.0, 7.0, -3.0), 1e-6));

    let d = c - a;
    assert!(vec3_approx_eq(d, b, 1e-6));
}

#[test]
fn vec3_dot_length_normalized() {
    let v = Vec3::new(3.0, 4.0, 0.0);
    assert!(approx_eq(v.dot(v), 25.0, 1e-6));
    assert!(approx_eq(v.length(), 5.0, 1e-6));

    let n = v.normalized();
    assert!(approx_eq(n.length(), 1.0, 1e-6));

    // Zero vector normalization should be a no-op (not NaN, unchanged)
    let zn = Vec3::ZERO.normalized();
    assert!(vec3_approx_eq(zn, Vec3::ZERO, 1e-6));
}

#[test]
fn vec3_cross_basis() {
    let i = Vec3::new(1.0, 0.0, 0.0);
    let j = Vec3::new(0.0, 1.0, 0.0);
    let k = Vec3::new(0.0, 0.0, 1.0);
    assert!(vec3_approx_eq(i.cross(j), k, 1e-6));
    assert!(vec3_approx_eq(j.cross(k), i, 1e-6));
    assert!(vec3_approx_eq(k.cross(i), j, 1e-6));
}

#[test]
fn floor_rounds_towards_negative_infinity() {
    assert_eq!(Vec3::new(0.5, 1.999, 2.0).floor(), IVec3::new(0, 1, 2));
    assert_eq!(Vec3::new(-0.25, -1.0, -1.5).floor(), IVec3::new(-1, -1, -2));
}

#[test]
fn ivec3_axis_access() {
    let mut v = IVec3::new(4, 5, 6);
    assert_eq!((v.axis(0), v.axis(1), v.axis(2)), (4, 5, 6));
    *v.axis_mut(1) = -7;
    assert_eq!(v, IVec3::new(4, -7, 6));
    assert_eq!((-v).manhattan(), 17);
    assert_eq!(v - IVec3::new(4, -7, 5), IVec3::new(0, 0, 1));
}

#[test]
fn aabb_contains_bounds_inclusive() {
    let aabb = Aabb::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
    assert!(aabb.contains(Vec3::new(2.0, 0.0, 1.0)));
    assert!(!aabb.contains(Vec3::new(2.1, 0.0, 1.0)));
}

proptest! {
    // floor() returns the cell whose unit cube contains the point
    #[test]
    fn floor_cell_contains_point(x in -1.0e4f32..1.0e4, y in -1.0e4f32..1.0e4, z in -1.0e4f32..1.0e4) {
        let p = Vec3::new(x, y, z);
        let c = p.floor();
        let lo = Vec3::from(c);
        prop_assert!(lo.x <= x && x < lo.x + 1.0);
        prop_assert!(lo.y <= y && y < lo.y + 1.0);
        prop_assert!(lo.z <= z && z < lo.z + 1.0);
    }

    // IVec3 addition and subtraction are inverse
    #[test]
    fn ivec3_add_sub_inverse(a in (-1000i32..1000, -1000i32..1000, -1000i32..1000),
                             b in (-1000i32..1000, -1000i32..1000, -1000i32..1000)) {
        let a = IVec3::from(a);
        let b = IVec3::from(b);
        prop_assert_eq!((a + b) - b, a);
    }
}
