use crate::{Reps, SetValues, Weight, WeightError, WeightUnit};

/// Fraction of the top working weight and reps of each warm-up set.
pub const WARMUP_RAMP: [(f32, u32); 5] = [
    (0.25, 12),
    (0.575, 8),
    (0.725, 5),
    (0.825, 3),
    (0.925, 1),
];

/// Rounds half up to the nearest multiple of `nearest`.
#[must_use]
pub fn round_to_nearest(value: f32, nearest: f32) -> f32 {
    (value / nearest + 0.5).floor() * nearest
}

#[must_use]
pub fn rounding_step(unit: WeightUnit) -> f32 {
    match unit {
        WeightUnit::Pounds => 5.0,
        WeightUnit::Kilograms => 2.5,
    }
}

/// Values of the warm-up sets leading up to `top_weight`, given in `unit`.
pub fn warmup_ramp(top_weight: f32, unit: WeightUnit) -> Result<Vec<SetValues>, WeightError> {
    WARMUP_RAMP
        .iter()
        .map(|(fraction, reps)| {
            Ok(SetValues {
                reps: Reps::new(*reps).unwrap_or_default(),
                weight: Weight::in_unit(
                    round_to_nearest(top_weight * fraction, rounding_step(unit)),
                    unit,
                )?,
                ..SetValues::default()
            })
        })
        .collect()
}
