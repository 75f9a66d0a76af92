//! Shared angle utilities for chart calculations.

/// Normalize an angle to [0, 360) degrees.
pub fn normalize_360(deg: f64) -> f64 {
    let r = deg % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Shortest circular distance between two longitudes, in [0, 180].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let d = (normalize_360(a) - normalize_360(b)).abs();
    if d > 180.0 { 360.0 - d } else { d }
}

/// Forward midpoint between two successive longitudes.
///
/// When `from > to` the arc crosses 0 deg, so the pair is lifted by a full
/// turn before halving: `(from + to + 360) / 2`, normalized.
pub fn circular_midpoint(from: f64, to: f64) -> f64 {
    if from > to {
        normalize_360((from + to + 360.0) / 2.0)
    } else {
        normalize_360((from + to) / 2.0)
    }
}

/// Whether `lon` lies in the half-open arc `[start, end)`.
///
/// An arc with `start > end` wraps through 0 deg.
pub fn in_half_open_arc(lon: f64, start: f64, end: f64) -> bool {
    if start > end {
        lon >= start || lon < end
    } else {
        start <= lon && lon < end
    }
}

/// Whether `lon` lies in the closed arc `[start, end]`, wrapping when `start > end`.
pub fn in_closed_arc(lon: f64, start: f64, end: f64) -> bool {
    if start <= end {
        start <= lon && lon <= end
    } else {
        lon >= start || lon <= end
    }
}
