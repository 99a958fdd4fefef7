//! Linear interpolation for animated attribute values.

/// Trait for types that can be interpolated between two values.
///
/// When t = 0.0, returns self. When t = 1.0, returns `to`.
pub trait Interpolate: Sized {
    fn interpolate(&self, to: &Self, t: f64) -> Self;
}

#[inline]
fn lerp_f64(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

impl Interpolate for f64 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        lerp_f64(*self, *to, t)
    }
}

impl Interpolate for f32 {
    fn interpolate(&self, to: &Self, t: f64) -> Self {
        lerp_f64(*self as f64, *to as f64, t) as f32
    }
}

/// Fraction of `duration_ms` covered at `position_ms`, clamped to `[0, 1]`.
///
/// Returns `None` for an empty or invalid duration so callers pick the
/// endpoint themselves.
pub fn progress(position_ms: f64, duration_ms: f64) -> Option<f64> {
    if duration_ms > 0.0 && duration_ms.is_finite() {
        Some((position_ms / duration_ms).clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Render a numeric attribute value with its unit suffix (`"12.5px"`).
pub fn format_value(value: f64, unit: &str) -> String {
    format!("{value}{unit}")
}
