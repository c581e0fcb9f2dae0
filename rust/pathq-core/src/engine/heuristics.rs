//! Stock distance estimates for planar graphs.
//!
//! Each function is admissible for the movement model named in its doc when
//! edge costs are `step` per unit move.

/// 4-directional grids.
pub fn manhattan(a: (i64, i64), b: (i64, i64), step: f64) -> f64 {
    ((a.0 - b.0).abs() + (a.1 - b.1).abs()) as f64 * step
}

/// 8-directional grids where a diagonal move costs the same as a straight one.
pub fn chebyshev(a: (i64, i64), b: (i64, i64), step: f64) -> f64 {
    (a.0 - b.0).abs().max((a.1 - b.1).abs()) as f64 * step
}

/// 8-directional grids where a diagonal move costs `sqrt(2) * step`.
pub fn octile(a: (i64, i64), b: (i64, i64), step: f64) -> f64 {
    let dx = (a.0 - b.0).abs() as f64;
    let dy = (a.1 - b.1).abs() as f64;
    let dmin = dx.min(dy);
    let dmax = dx.max(dy);
    (dmin * std::f64::consts::SQRT_2 + (dmax - dmin)) * step
}

/// Free movement in the plane.
pub fn euclidean(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}
