//! Small math and formatting helpers shared across the crate.

/// Clamp `value` to `[min, max]`.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Evaluate the linear function through `(x1, y1)` and `(x2, y2)` at `x`.
/// `x` is clamped to `[x1, x2]` before evaluation, so the result never
/// leaves `[y1, y2]`.
pub fn interpolate(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= x1 {
        return y1;
    }
    if x >= x2 {
        return y2;
    }
    y1 + (y2 - y1) * (x - x1) / (x2 - x1)
}

/// Triangle wave bound to `[min, max]` with the given period and phase
/// (both in seconds), evaluated at time `t`. Useful for animations.
pub fn tri_wave(min: f32, max: f32, period: f32, phase: f32, t: f32) -> f32 {
    let t = phase + t;
    let mut x = (t % period) / period;
    if x > 0.5 {
        x = 1.0 - x;
    }
    min + x * 2.0 * (max - min)
}

/// Format a score for display: 5 digits, zero-padded.
pub fn format_score(score: u64) -> String {
    format!("{score:05}")
}
