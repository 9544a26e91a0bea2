//! Lattice hash noise for per-voxel brightness variance.
//!
//! Pure functions of their integer inputs: no seed, no state, identical across runs.

/// Largest `f32` strictly below 1.
const BELOW_ONE: f32 = 0.999_999_94;

/// Hash of a lattice point into `[0, 1)`.
///
/// `fract(sin(dot((sin x, sin y, sin z), (12.9898, 78.233, 37.719))) * 143758.5453)`.
pub fn pseudo_random_float(ix: i32, iy: i32, iz: i32) -> f32 {
    let dot = (ix as f32).sin() * 12.9898 + (iy as f32).sin() * 78.233 + (iz as f32).sin() * 37.719;
    let s = dot.sin() * 143_758.545_3;
    // A tiny negative `s` makes `s - floor(s)` round up to exactly 1.
    (s - s.floor()).clamp(0.0, BELOW_ONE)
}

/// Mean of [`pseudo_random_float`] over the cell and its six face neighbors.
pub fn gradient_noise(ix: i32, iy: i32, iz: i32) -> f32 {
    let sum = pseudo_random_float(ix, iy, iz)
        + pseudo_random_float(ix + 1, iy, iz)
        + pseudo_random_float(ix - 1, iy, iz)
        + pseudo_random_float(ix, iy + 1, iz)
        + pseudo_random_float(ix, iy - 1, iz)
        + pseudo_random_float(ix, iy, iz + 1)
        + pseudo_random_float(ix, iy, iz - 1);
    (sum / 7.0).min(BELOW_ONE)
}
