use crate::WeightUnit;

/// Maximum number of plates of a denomination if the inventory does not specify it.
pub const DEFAULT_PLATE_CAP: u32 = 100;

/// Standard plate denominations and bar weight of a unit system.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateTable {
    pub bar_weight: f32,
    /// Ordered from the largest to the smallest denomination.
    pub plates: Vec<f32>,
}

impl PlateTable {
    #[must_use]
    pub fn for_unit(unit: WeightUnit) -> Self {
        match unit {
            WeightUnit::Pounds => PlateTable {
                bar_weight: 45.0,
                plates: vec![45.0, 35.0, 25.0, 10.0, 5.0, 2.5],
            },
            WeightUnit::Kilograms => PlateTable {
                bar_weight: 20.0,
                plates: vec![25.0, 20.0, 15.0, 10.0, 5.0, 2.5, 1.25],
            },
        }
    }
}

/// Plates for one side of the bar.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateLoad {
    /// Denomination and count, ordered from the largest denomination. Unused denominations are
    /// omitted.
    pub plates: Vec<(f32, u32)>,
    /// Load per side that cannot be represented with the available plates.
    pub leftover: f32,
}

impl PlateLoad {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn per_side(&self) -> f32 {
        self.plates.iter().map(|(plate, count)| plate * *count as f32).sum()
    }
}

/// Decomposes the load beyond the bar into plates per side.
///
/// Denominations are used greedily from the largest to the smallest, each limited by its cap in
/// `caps`. Targets below the bar weight yield no plates and no leftover.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn decompose(target: f32, bar_weight: f32, plates: &[f32], caps: &[(f32, u32)]) -> PlateLoad {
    let mut remaining = (target - bar_weight) / 2.0;
    let mut load = PlateLoad {
        plates: vec![],
        leftover: 0.0,
    };
    for plate in plates.iter().copied().filter(|p| *p > 0.0) {
        if remaining < plate {
            continue;
        }
        let cap = caps
            .iter()
            .find(|(denomination, _)| (denomination - plate).abs() < f32::EPSILON)
            .map_or(DEFAULT_PLATE_CAP, |(_, cap)| *cap);
        let count = ((remaining / plate).floor() as u32).min(cap);
        if count == 0 {
            continue;
        }
        remaining -= plate * count as f32;
        load.plates.push((plate, count));
    }
    if remaining > 0.0 {
        load.leftover = remaining;
    }
    load
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    const POUNDS: [f32; 6] = [45.0, 35.0, 25.0, 10.0, 5.0, 2.5];

    #[test]
    fn test_decompose() {
        assert_eq!(
            decompose(225.0, 45.0, &POUNDS, &[]),
            PlateLoad {
                plates: vec![(45.0, 2)],
                leftover: 0.0
            }
        );
    }

    #[test]
    fn test_decompose_with_cap() {
        assert_eq!(
            decompose(225.0, 45.0, &POUNDS, &[(45.0, 1)]),
            PlateLoad {
                plates: vec![(45.0, 1), (35.0, 1), (10.0, 1)],
                leftover: 0.0
            }
        );
    }

    #[test]
    fn test_decompose_with_shortfall() {
        let caps = [
            (45.0, 1),
            (35.0, 0),
            (25.0, 0),
            (10.0, 0),
            (5.0, 0),
            (2.5, 0),
        ];
        let load = decompose(225.0, 45.0, &POUNDS, &caps);
        assert_eq!(load.plates, vec![(45.0, 1)]);
        assert_approx_eq!(load.leftover, 45.0);
        assert_approx_eq!(load.per_side() + load.leftover, 90.0);
    }

    #[rstest]
    #[case(135.0, vec![(45.0, 1)], 0.0)]
    #[case(46.0, vec![], 0.5)]
    #[case(45.0, vec![], 0.0)]
    #[case(20.0, vec![], 0.0)]
    #[case(316.0, vec![(45.0, 3)], 0.5)]
    fn test_decompose_pounds(
        #[case] target: f32,
        #[case] plates: Vec<(f32, u32)>,
        #[case] leftover: f32,
    ) {
        let load = decompose(target, 45.0, &POUNDS, &[]);
        assert_eq!(load.plates, plates);
        assert_approx_eq!(load.leftover, leftover);
    }

    #[test]
    fn test_decompose_kilograms() {
        let table = PlateTable::for_unit(WeightUnit::Kilograms);
        let load = decompose(102.5, table.bar_weight, &table.plates, &[]);
        assert_eq!(load.plates, vec![(25.0, 1), (15.0, 1), (1.25, 1)]);
        assert_approx_eq!(load.leftover, 0.0);
    }

    #[rstest]
    #[case(WeightUnit::Pounds, 45.0, 6)]
    #[case(WeightUnit::Kilograms, 20.0, 7)]
    fn test_plate_table_for_unit(
        #[case] unit: WeightUnit,
        #[case] bar_weight: f32,
        #[case] denominations: usize,
    ) {
        let table = PlateTable::for_unit(unit);
        assert_approx_eq!(table.bar_weight, bar_weight);
        assert_eq!(table.plates.len(), denominations);
        assert!(table.plates.windows(2).all(|w| w[0] > w[1]));
    }
}
