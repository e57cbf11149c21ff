use std::collections::BTreeSet;

use derive_more::Deref;
use uuid::Uuid;

use crate::{CreateError, DeleteError, Name, ReadError, UpdateError};

#[allow(async_fn_in_trait)]
pub trait ExerciseGroupService {
    async fn get_exercise_groups(&self) -> Result<Vec<ExerciseGroup>, ReadError>;
    async fn create_exercise_group(
        &self,
        name: Option<Name>,
        exercises: BTreeSet<Name>,
    ) -> Result<ExerciseGroup, CreateError>;
    async fn replace_exercise_group(
        &self,
        exercise_group: ExerciseGroup,
    ) -> Result<ExerciseGroup, UpdateError>;
    async fn delete_exercise_group(
        &self,
        id: ExerciseGroupID,
    ) -> Result<ExerciseGroupID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait ExerciseGroupRepository {
    async fn read_exercise_groups(&self) -> Result<Vec<ExerciseGroup>, ReadError>;
    async fn create_exercise_group(
        &self,
        exercise_group: ExerciseGroup,
    ) -> Result<ExerciseGroup, CreateError>;
    async fn replace_exercise_group(
        &self,
        exercise_group: ExerciseGroup,
    ) -> Result<ExerciseGroup, UpdateError>;
    async fn delete_exercise_group(
        &self,
        id: ExerciseGroupID,
    ) -> Result<ExerciseGroupID, DeleteError>;
}

/// Interchangeable exercises that can fill the same slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseGroup {
    pub id: ExerciseGroupID,
    pub name: Option<Name>,
    pub exercises: BTreeSet<Name>,
}

impl ExerciseGroup {
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.to_string(),
            None => String::from("Select from group"),
        }
    }

    #[must_use]
    pub fn contains(&self, exercise: &Name) -> bool {
        self.exercises.contains(exercise)
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseGroupID(Uuid);

impl ExerciseGroupID {
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

impl From<Uuid> for ExerciseGroupID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseGroupID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_exercise_group_display_name() {
        let mut group = ExerciseGroup {
            id: 1.into(),
            name: None,
            exercises: BTreeSet::new(),
        };
        assert_eq!(group.display_name(), "Select from group");
        group.name = Some(Name::new("Rows").unwrap());
        assert_eq!(group.display_name(), "Rows");
    }

    #[test]
    fn test_exercise_group_contains() {
        let group = ExerciseGroup {
            id: 1.into(),
            name: None,
            exercises: BTreeSet::from([Name::new("Barbell Row").unwrap()]),
        };
        assert!(group.contains(&Name::new("Barbell Row").unwrap()));
        assert!(!group.contains(&Name::new("Cable Row").unwrap()));
    }

    #[test]
    fn test_exercise_group_id_nil() {
        assert!(ExerciseGroupID::nil().is_nil());
        assert_eq!(ExerciseGroupID::nil(), ExerciseGroupID::default());
        assert!(!ExerciseGroupID::new().is_nil());
    }
}
