//! Shared utility functions for angle and clock arithmetic.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Normalize an hour value to [0, 24).
pub fn normalize_24(hours: f64) -> f64 {
    let r = hours % 24.0;
    if r < 0.0 { r + 24.0 } else { r }
}
