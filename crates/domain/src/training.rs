use derive_more::{Display, Into};

pub const KILOGRAMS_PER_POUND: f32 = 0.453_592_4;
pub const POUNDS_PER_KILOGRAM: f32 = 2.204_623;

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepRange {
    min: Reps,
    max: Reps,
}

impl RepRange {
    pub fn new(min: Reps, max: Reps) -> Result<Self, RepRangeError> {
        if min > max {
            return Err(RepRangeError::Inverted);
        }

        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> Reps {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Reps {
        self.max
    }

    #[must_use]
    pub fn contains(&self, reps: Reps) -> bool {
        (self.min..=self.max).contains(&reps)
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepRangeError {
    #[error("Minimum reps must not exceed maximum reps")]
    Inverted,
}

/// Duration of a set in seconds.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time(u32);

impl Time {
    pub fn new(value: u32) -> Result<Self, TimeError> {
        if !(0..10000).contains(&value) {
            return Err(TimeError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Time {
    type Error = TimeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => Time::new(parsed_value),
            Err(_) => Err(TimeError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TimeError {
    #[error("Time must be in the range 0 to 9999 s")]
    OutOfRange,
    #[error("Time must be an integer")]
    ParseError,
}

/// Reps in reserve.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct RIR(u32);

impl RIR {
    pub fn new(value: u32) -> Result<Self, RIRError> {
        if value > 10 {
            return Err(RIRError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for RIR {
    type Error = RIRError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => RIR::new(parsed_value),
            Err(_) => Err(RIRError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RIRError {
    #[error("RIR must be in the range 0 to 10")]
    OutOfRange,
    #[error("RIR must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct PerceivedExertion(u32);

impl PerceivedExertion {
    pub fn new(value: u32) -> Result<Self, PerceivedExertionError> {
        if value > 10 {
            return Err(PerceivedExertionError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for PerceivedExertion {
    type Error = PerceivedExertionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.parse::<u32>() {
            Ok(parsed_value) => PerceivedExertion::new(parsed_value),
            Err(_) => Err(PerceivedExertionError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum PerceivedExertionError {
    #[error("Perceived exertion must be in the range 0 to 10")]
    OutOfRange,
    #[error("Perceived exertion must be an integer")]
    ParseError,
}

#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
pub enum WeightUnit {
    #[default]
    #[strum(serialize = "lb")]
    Pounds,
    #[strum(serialize = "kg")]
    Kilograms,
}

/// Weight kept in both units.
///
/// Writing one unit always recomputes the other, so both values describe the same load.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Weight {
    pounds: f32,
    kilograms: f32,
}

impl Weight {
    pub const ZERO: Weight = Weight {
        pounds: 0.0,
        kilograms: 0.0,
    };

    pub fn from_pounds(pounds: f32) -> Result<Self, WeightError> {
        Self::check(pounds)?;
        Self {
            pounds,
            kilograms: pounds * KILOGRAMS_PER_POUND,
        }
        .checked()
    }

    pub fn from_kilograms(kilograms: f32) -> Result<Self, WeightError> {
        Self::check(kilograms)?;
        Self {
            pounds: kilograms * POUNDS_PER_KILOGRAM,
            kilograms,
        }
        .checked()
    }

    pub fn in_unit(value: f32, unit: WeightUnit) -> Result<Self, WeightError> {
        match unit {
            WeightUnit::Pounds => Self::from_pounds(value),
            WeightUnit::Kilograms => Self::from_kilograms(value),
        }
    }

    /// Combines independently obtained unit values.
    ///
    /// A unit that is zero while the other is positive is derived from the other one. Two
    /// positive values are kept as given.
    pub fn new(pounds: f32, kilograms: f32) -> Result<Self, WeightError> {
        Self::check(pounds)?;
        Self::check(kilograms)?;
        Self::backfilled(pounds, kilograms).checked()
    }

    pub(crate) fn backfilled(pounds: f32, kilograms: f32) -> Self {
        if pounds == 0.0 && kilograms > 0.0 {
            return Self {
                pounds: kilograms * POUNDS_PER_KILOGRAM,
                kilograms,
            };
        }
        if kilograms == 0.0 && pounds > 0.0 {
            return Self {
                pounds,
                kilograms: pounds * KILOGRAMS_PER_POUND,
            };
        }
        Self { pounds, kilograms }
    }

    pub fn parse(value: &str, unit: WeightUnit) -> Result<Self, WeightError> {
        match value.parse::<f32>() {
            Ok(parsed_value) => Self::in_unit(parsed_value, unit),
            Err(_) => Err(WeightError::ParseError),
        }
    }

    #[must_use]
    pub fn pounds(&self) -> f32 {
        self.pounds
    }

    #[must_use]
    pub fn kilograms(&self) -> f32 {
        self.kilograms
    }

    #[must_use]
    pub fn get(&self, unit: WeightUnit) -> f32 {
        match unit {
            WeightUnit::Pounds => self.pounds,
            WeightUnit::Kilograms => self.kilograms,
        }
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.pounds == 0.0 && self.kilograms == 0.0
    }

    /// Both units must be in range, so a value accepted in one unit is always readable back.
    fn checked(self) -> Result<Self, WeightError> {
        Self::check(self.pounds)?;
        Self::check(self.kilograms)?;
        Ok(self)
    }

    fn check(value: f32) -> Result<(), WeightError> {
        if !value.is_finite() || !(0.0..10000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }
        Ok(())
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0 to 9999.9")]
    OutOfRange,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("0", Ok(Reps(0)))]
    #[case("12", Ok(Reps(12)))]
    #[case("1000", Err(RepsError::OutOfRange))]
    #[case("-1", Err(RepsError::ParseError))]
    #[case("1.5", Err(RepsError::ParseError))]
    fn test_reps_try_from(#[case] value: &str, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::try_from(value), expected);
    }

    #[rstest]
    #[case("0", Ok(RIR(0)))]
    #[case("10", Ok(RIR(10)))]
    #[case("11", Err(RIRError::OutOfRange))]
    #[case("a", Err(RIRError::ParseError))]
    fn test_rir_try_from(#[case] value: &str, #[case] expected: Result<RIR, RIRError>) {
        assert_eq!(RIR::try_from(value), expected);
    }

    #[rstest]
    #[case("8", Ok(PerceivedExertion(8)))]
    #[case("11", Err(PerceivedExertionError::OutOfRange))]
    #[case("", Err(PerceivedExertionError::ParseError))]
    fn test_perceived_exertion_try_from(
        #[case] value: &str,
        #[case] expected: Result<PerceivedExertion, PerceivedExertionError>,
    ) {
        assert_eq!(PerceivedExertion::try_from(value), expected);
    }

    #[rstest]
    #[case("90", Ok(Time(90)))]
    #[case("10000", Err(TimeError::OutOfRange))]
    #[case("x", Err(TimeError::ParseError))]
    fn test_time_try_from(#[case] value: &str, #[case] expected: Result<Time, TimeError>) {
        assert_eq!(Time::try_from(value), expected);
    }

    #[test]
    fn test_rep_range() {
        let range = RepRange::new(Reps(8), Reps(12)).unwrap();
        assert!(range.contains(Reps(8)));
        assert!(range.contains(Reps(12)));
        assert!(!range.contains(Reps(13)));
        assert_eq!(
            RepRange::new(Reps(12), Reps(8)),
            Err(RepRangeError::Inverted)
        );
    }

    #[rstest]
    #[case(0.0)]
    #[case(45.0)]
    #[case(135.5)]
    #[case(315.0)]
    fn test_weight_from_pounds(#[case] pounds: f32) {
        let weight = Weight::from_pounds(pounds).unwrap();
        assert_approx_eq!(weight.pounds(), pounds);
        assert_approx_eq!(weight.kilograms(), pounds * 0.453_592_4);
    }

    #[rstest]
    #[case(0.0)]
    #[case(20.0)]
    #[case(102.5)]
    fn test_weight_from_kilograms(#[case] kilograms: f32) {
        let weight = Weight::from_kilograms(kilograms).unwrap();
        assert_approx_eq!(weight.kilograms(), kilograms);
        assert_approx_eq!(weight.pounds(), kilograms * 2.204_623, 1e-3);
    }

    #[test]
    fn test_weight_new_backfills_missing_unit() {
        let weight = Weight::new(0.0, 100.0).unwrap();
        assert_approx_eq!(weight.pounds(), 220.462_3, 1e-3);
        assert_approx_eq!(weight.kilograms(), 100.0);

        let weight = Weight::new(100.0, 0.0).unwrap();
        assert_approx_eq!(weight.pounds(), 100.0);
        assert_approx_eq!(weight.kilograms(), 45.359_24, 1e-3);

        assert_eq!(Weight::new(0.0, 0.0).unwrap(), Weight::ZERO);
    }

    #[test]
    fn test_weight_new_keeps_both_units() {
        let weight = Weight::new(135.0, 60.0).unwrap();
        assert_approx_eq!(weight.pounds(), 135.0);
        assert_approx_eq!(weight.kilograms(), 60.0);
    }

    #[rstest]
    #[case(-1.0)]
    #[case(10000.0)]
    #[case(f32::NAN)]
    #[case(f32::INFINITY)]
    fn test_weight_out_of_range(#[case] value: f32) {
        assert_eq!(Weight::from_pounds(value), Err(WeightError::OutOfRange));
        assert_eq!(Weight::from_kilograms(value), Err(WeightError::OutOfRange));
    }

    #[rstest]
    #[case(5000.0, WeightUnit::Kilograms)]
    #[case(4536.0, WeightUnit::Kilograms)]
    fn test_weight_out_of_range_in_other_unit(#[case] value: f32, #[case] unit: WeightUnit) {
        assert_eq!(Weight::in_unit(value, unit), Err(WeightError::OutOfRange));
        assert_eq!(Weight::new(0.0, value), Err(WeightError::OutOfRange));
    }

    #[test]
    fn test_weight_accepted_in_one_unit_is_accepted_as_pair() {
        let weight = Weight::from_kilograms(4535.0).unwrap();
        assert_eq!(Weight::new(weight.pounds(), weight.kilograms()), Ok(weight));
    }

    #[test]
    fn test_weight_parse() {
        let weight = Weight::parse("60", WeightUnit::Kilograms).unwrap();
        assert_approx_eq!(weight.get(WeightUnit::Kilograms), 60.0);
        assert_eq!(
            Weight::parse("sixty", WeightUnit::Kilograms),
            Err(WeightError::ParseError)
        );
    }

    #[test]
    fn test_weight_unit_display() {
        assert_eq!(WeightUnit::Pounds.to_string(), "lb");
        assert_eq!("kg".parse::<WeightUnit>(), Ok(WeightUnit::Kilograms));
    }
}
