//! Coordinate matching between grids.

/// Maximum absolute difference (degrees) for two coordinates to match.
pub const COORD_TOLERANCE: f64 = 1e-6;

/// Index of `value` on a coordinate axis, matched within [`COORD_TOLERANCE`].
pub fn coord_index(axis: &[f64], value: f64) -> Option<usize> {
    axis.iter().position(|&a| (a - value).abs() <= COORD_TOLERANCE)
}
