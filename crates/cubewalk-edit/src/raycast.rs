use cubewalk_blocks::VoxelType;
use cubewalk_geom::{IVec3, Vec3};
use cubewalk_world::World;

/// Upper bound on cells visited by one cast, for unbounded ranges.
pub const MAX_STEPS: usize = 1 << 16;

/// Result of a cast. `voxel` is Air when nothing was hit within range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub voxel: VoxelType,
    /// Ray parameter at which the ray entered `pos`.
    pub distance: f32,
    /// Last cell visited: the hit cell, or where the cast gave up.
    pub pos: IVec3,
    /// Cell visited just before `pos`.
    pub last_pos: IVec3,
}

impl Hit {
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.voxel.is_solid()
    }

    /// Unit step from the hit cell back to the cell the ray came from.
    #[inline]
    pub fn face_normal(&self) -> IVec3 {
        self.last_pos - self.pos
    }
}

#[inline]
fn step_of(d: f32) -> i32 {
    if d > 0.0 {
        1
    } else if d < 0.0 {
        -1
    } else {
        0
    }
}

#[inline]
fn inv_or_inf(d: f32) -> f32 {
    if d == 0.0 { f32::INFINITY } else { (1.0 / d).abs() }
}

/// Walks the voxel grid from `origin` along `dir` and returns the first solid cell of `world`.
pub fn cast(world: &World, origin: Vec3, dir: Vec3, range: f32) -> Hit {
    cast_with(origin, dir, range, |p| world.voxel_ivec(p))
}

/// Voxel DDA over any grid.
///
/// `dir` need not be normalized; distances are in units of `dir`. Axes with a zero component
/// never cross a boundary. When two or three axes reach their next boundary together the step
/// goes along x, then y, then z. The origin cell itself is never probed.
pub fn cast_with<F>(origin: Vec3, dir: Vec3, range: f32, mut probe: F) -> Hit
where
    F: FnMut(IVec3) -> VoxelType,
{
    let start = origin.floor();
    let miss = |pos, last_pos, distance| Hit {
        voxel: VoxelType::Air,
        distance,
        pos,
        last_pos,
    };
    let finite = dir.x.is_finite() && dir.y.is_finite() && dir.z.is_finite();
    if !finite {
        return miss(start, start, f32::INFINITY);
    }

    let mut step = [0i32; 3];
    let mut t_delta = [f32::INFINITY; 3];
    let mut t_max = [f32::INFINITY; 3];
    for axis in 0..3 {
        let d = dir.axis(axis);
        let inv = inv_or_inf(d);
        // Components too small to ever reach a boundary count as zero.
        if !inv.is_finite() {
            continue;
        }
        let p = origin.axis(axis);
        step[axis] = step_of(d);
        t_delta[axis] = inv;
        t_max[axis] = if step[axis] > 0 {
            (p.floor() + 1.0 - p) / d.abs()
        } else {
            (p - p.floor()) / d.abs()
        };
    }
    if step == [0; 3] {
        return miss(start, start, f32::INFINITY);
    }

    let mut pos = start;
    let mut last_pos = start;
    let mut distance = 0.0f32;
    for _ in 0..MAX_STEPS {
        last_pos = pos;
        let axis = if t_max[0] <= t_max[1] && t_max[0] <= t_max[2] {
            0
        } else if t_max[1] <= t_max[2] {
            1
        } else {
            2
        };
        *pos.axis_mut(axis) += step[axis];
        t_max[axis] += t_delta[axis];
        distance = t_max[axis] - t_delta[axis];
        if distance > range {
            return miss(pos, last_pos, distance);
        }
        let voxel = probe(pos);
        if voxel.is_solid() {
            return Hit {
                voxel,
                distance,
                pos,
                last_pos,
            };
        }
    }
    miss(pos, last_pos, distance)
}
