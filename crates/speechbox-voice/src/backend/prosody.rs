//! Mapping normalized prosody onto engine-specific ranges.
//!
//! Requests carry rate and pitch as multipliers where 1.0 is normal, and
//! volume in `[0, 1]`. Native engines each expose their own `min / normal /
//! max`; the multiplier is mapped piecewise-linearly so that 1.0 always lands
//! on the engine's normal value.

use std::ops::RangeInclusive;

/// Map a multiplier in `ours` (with 1.0 = normal) onto
/// `engine_min ..= engine_max` with `engine_normal` at 1.0.
pub fn scale_around_normal(
    value: f32,
    ours: &RangeInclusive<f32>,
    engine_min: f32,
    engine_normal: f32,
    engine_max: f32,
) -> f32 {
    let value = value.clamp(*ours.start(), *ours.end());
    if value >= 1.0 {
        let span = ours.end() - 1.0;
        if span <= f32::EPSILON {
            return engine_normal;
        }
        engine_normal + (value - 1.0) / span * (engine_max - engine_normal)
    } else {
        let span = 1.0 - ours.start();
        if span <= f32::EPSILON {
            return engine_normal;
        }
        engine_normal - (1.0 - value) / span * (engine_normal - engine_min)
    }
}

/// Map a fraction in `[0, 1]` onto `engine_min ..= engine_max`.
pub fn scale_linear(value: f32, engine_min: f32, engine_max: f32) -> f32 {
    engine_min + value.clamp(0.0, 1.0) * (engine_max - engine_min)
}
