use crate::{PlateLoad, PlateTable, ReadError, UpdateError, WeightUnit, plates};

#[allow(async_fn_in_trait)]
pub trait SettingsService {
    async fn get_settings(&self) -> Result<Settings, ReadError>;
    async fn set_settings(&self, settings: Settings) -> Result<Settings, UpdateError>;

    /// Plates per side for `target`, given in the preferred unit.
    async fn plates_for(&self, target: f32) -> Result<PlateLoad, ReadError> {
        let settings = self.get_settings().await?;
        let table = PlateTable::for_unit(settings.weight_unit);
        Ok(plates::decompose(
            target,
            settings.bar_weight(),
            &table.plates,
            &settings.plate_inventory,
        ))
    }
}

#[allow(async_fn_in_trait)]
pub trait SettingsRepository {
    async fn read_settings(&self) -> Result<Settings, ReadError>;
    async fn write_settings(&self, settings: Settings) -> Result<Settings, UpdateError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub weight_unit: WeightUnit,
    /// Overrides the standard bar weight of the unit.
    pub bar_weight: Option<f32>,
    /// Available number of plates per denomination. Missing denominations are unlimited.
    pub plate_inventory: Vec<(f32, u32)>,
}

impl Settings {
    #[must_use]
    pub fn bar_weight(&self) -> f32 {
        self.bar_weight
            .unwrap_or_else(|| PlateTable::for_unit(self.weight_unit).bar_weight)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            weight_unit: WeightUnit::Pounds,
            bar_weight: None,
            plate_inventory: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(WeightUnit::Pounds, None, 45.0)]
    #[case(WeightUnit::Kilograms, None, 20.0)]
    #[case(WeightUnit::Kilograms, Some(15.0), 15.0)]
    fn test_settings_bar_weight(
        #[case] weight_unit: WeightUnit,
        #[case] bar_weight: Option<f32>,
        #[case] expected: f32,
    ) {
        let settings = Settings {
            weight_unit,
            bar_weight,
            ..Settings::default()
        };
        assert_approx_eq!(settings.bar_weight(), expected);
    }
}
