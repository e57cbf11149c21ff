use chrono::NaiveDateTime;
use derive_more::Deref;
use uuid::Uuid;

use crate::{Name, PerceivedExertion, RIR, Reps, Time, Weight, WeightError, WeightUnit};

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSet {
    pub id: SetID,
    /// 1-based number within its slot.
    pub set_number: u32,
    pub exercise: Name,
    pub reps: Reps,
    pub weight: Weight,
    pub rir: RIR,
    pub perceived_exertion: PerceivedExertion,
    pub duration: Time,
    pub completed_at: Option<NaiveDateTime>,
    pub set_type: SetType,
    pub modifier: Option<Modifier>,
}

impl ExerciseSet {
    #[must_use]
    pub fn new(
        exercise: Name,
        set_number: u32,
        values: SetValues,
        set_type: SetType,
        modifier: Option<Modifier>,
    ) -> Self {
        Self {
            id: SetID::new(),
            set_number,
            exercise,
            reps: values.reps,
            weight: values.weight,
            rir: values.rir,
            perceived_exertion: values.perceived_exertion,
            duration: values.duration,
            completed_at: None,
            set_type,
            modifier,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn values(&self) -> SetValues {
        SetValues {
            reps: self.reps,
            weight: self.weight,
            rir: self.rir,
            perceived_exertion: self.perceived_exertion,
            duration: self.duration,
        }
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetID(Uuid);

impl SetID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for SetID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SetID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
pub enum SetType {
    #[default]
    Working,
    WarmUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
pub enum Modifier {
    SingleLimb,
}

/// The performance values that are carried forward into a new set.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SetValues {
    pub reps: Reps,
    pub weight: Weight,
    pub rir: RIR,
    pub perceived_exertion: PerceivedExertion,
    pub duration: Time,
}

/// A single field change of a set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldUpdate {
    Reps(Reps),
    Weight(f32, WeightUnit),
    Rir(RIR),
    PerceivedExertion(PerceivedExertion),
    Duration(Time),
    Complete(Option<NaiveDateTime>),
    Type(SetType),
    Modifier(Option<Modifier>),
}

impl FieldUpdate {
    pub fn apply_to(self, set: ExerciseSet) -> Result<ExerciseSet, WeightError> {
        Ok(match self {
            FieldUpdate::Reps(reps) => ExerciseSet { reps, ..set },
            FieldUpdate::Weight(value, unit) => ExerciseSet {
                weight: Weight::in_unit(value, unit)?,
                ..set
            },
            FieldUpdate::Rir(rir) => ExerciseSet { rir, ..set },
            FieldUpdate::PerceivedExertion(perceived_exertion) => ExerciseSet {
                perceived_exertion,
                ..set
            },
            FieldUpdate::Duration(duration) => ExerciseSet { duration, ..set },
            FieldUpdate::Complete(completed_at) => ExerciseSet {
                completed_at,
                ..set
            },
            FieldUpdate::Type(set_type) => ExerciseSet { set_type, ..set },
            FieldUpdate::Modifier(modifier) => ExerciseSet { modifier, ..set },
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn set() -> ExerciseSet {
        ExerciseSet {
            id: 1.into(),
            set_number: 1,
            exercise: Name::new("Squat").unwrap(),
            reps: Reps::new(5).unwrap(),
            weight: Weight::from_pounds(225.0).unwrap(),
            rir: RIR::new(2).unwrap(),
            perceived_exertion: PerceivedExertion::new(8).unwrap(),
            duration: Time::default(),
            completed_at: None,
            set_type: SetType::Working,
            modifier: None,
        }
    }

    #[rstest]
    #[case(
        FieldUpdate::Reps(Reps::new(8).unwrap()),
        ExerciseSet { reps: Reps::new(8).unwrap(), ..set() }
    )]
    #[case(
        FieldUpdate::Rir(RIR::new(0).unwrap()),
        ExerciseSet { rir: RIR::new(0).unwrap(), ..set() }
    )]
    #[case(
        FieldUpdate::PerceivedExertion(PerceivedExertion::new(10).unwrap()),
        ExerciseSet { perceived_exertion: PerceivedExertion::new(10).unwrap(), ..set() }
    )]
    #[case(
        FieldUpdate::Duration(Time::new(45).unwrap()),
        ExerciseSet { duration: Time::new(45).unwrap(), ..set() }
    )]
    #[case(
        FieldUpdate::Type(SetType::WarmUp),
        ExerciseSet { set_type: SetType::WarmUp, ..set() }
    )]
    #[case(
        FieldUpdate::Modifier(Some(Modifier::SingleLimb)),
        ExerciseSet { modifier: Some(Modifier::SingleLimb), ..set() }
    )]
    fn test_field_update_apply_to(#[case] update: FieldUpdate, #[case] expected: ExerciseSet) {
        assert_eq!(update.apply_to(set()).unwrap(), expected);
    }

    #[test]
    fn test_field_update_complete() {
        let completed_at = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        let completed = FieldUpdate::Complete(Some(completed_at))
            .apply_to(set())
            .unwrap();
        assert!(completed.is_completed());
        assert_eq!(completed.completed_at, Some(completed_at));
        assert!(
            !FieldUpdate::Complete(None)
                .apply_to(completed)
                .unwrap()
                .is_completed()
        );
    }

    #[rstest]
    #[case(WeightUnit::Pounds, 100.0, 100.0, 45.359_24)]
    #[case(WeightUnit::Kilograms, 100.0, 220.462_3, 100.0)]
    fn test_field_update_weight_keeps_units_consistent(
        #[case] unit: WeightUnit,
        #[case] value: f32,
        #[case] pounds: f32,
        #[case] kilograms: f32,
    ) {
        let updated = FieldUpdate::Weight(value, unit).apply_to(set()).unwrap();
        assert_approx_eq!(updated.weight.pounds(), pounds, 1e-3);
        assert_approx_eq!(updated.weight.kilograms(), kilograms, 1e-3);
    }

    #[test]
    fn test_field_update_invalid_weight() {
        assert_eq!(
            FieldUpdate::Weight(-5.0, WeightUnit::Pounds).apply_to(set()),
            Err(WeightError::OutOfRange)
        );
    }

    #[test]
    fn test_set_values() {
        assert_eq!(
            set().values(),
            SetValues {
                reps: Reps::new(5).unwrap(),
                weight: Weight::from_pounds(225.0).unwrap(),
                rir: RIR::new(2).unwrap(),
                perceived_exertion: PerceivedExertion::new(8).unwrap(),
                duration: Time::default(),
            }
        );
    }
}
