use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::{CreateError, DeleteError, Name, ReadError, UpdateError, Workout};

#[allow(async_fn_in_trait)]
pub trait ExerciseService {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn create_exercise(&self, exercise: Exercise) -> Result<Exercise, CreateError>;
    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError>;
    async fn delete_exercise(&self, name: Name) -> Result<Name, DeleteError>;
    async fn get_exercise_stats(
        &self,
        name: &Name,
        today: NaiveDate,
    ) -> Result<ExerciseStats, ReadError>;

    async fn get_exercise(&self, name: &Name) -> Result<Exercise, ReadError> {
        self.get_exercises()
            .await?
            .into_iter()
            .find(|e| e.name == *name)
            .ok_or(ReadError::NotFound)
    }
}

#[allow(async_fn_in_trait)]
pub trait ExerciseRepository {
    async fn read_exercises(&self) -> Result<Vec<Exercise>, ReadError>;
    async fn create_exercise(&self, exercise: Exercise) -> Result<Exercise, CreateError>;
    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError>;
    async fn delete_exercise(&self, name: Name) -> Result<Name, DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub name: Name,
    pub muscles: BTreeSet<String>,
    pub equipment: Equipment,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
    pub stats: Option<ExerciseStats>,
}

impl Exercise {
    #[must_use]
    pub fn new(name: Name, equipment: Equipment) -> Self {
        Self {
            name,
            muscles: BTreeSet::new(),
            equipment,
            category: None,
            thumbnail: None,
            stats: None,
        }
    }

    /// Copies the editable metadata of `other` while keeping the identity of `self`.
    #[must_use]
    pub fn with_metadata_of(&self, other: &Exercise) -> Self {
        Self {
            name: self.name.clone(),
            muscles: other.muscles.clone(),
            equipment: other.equipment,
            category: other.category.clone(),
            thumbnail: other.thumbnail.clone(),
            stats: self.stats,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum Equipment {
    Barbell,
    Dumbbell,
    Machine,
    Cable,
    Bodyweight,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseStats {
    pub last_completed: Option<NaiveDateTime>,
    pub total_completions: u32,
    pub completions_this_week: u32,
}

impl ExerciseStats {
    /// Counts the workouts with at least one completed set of the exercise.
    ///
    /// A workout falls into the current week if its last completed set of the exercise lies in
    /// the ISO week of `today`.
    #[must_use]
    pub fn from_workouts(exercise: &Name, workouts: &[Workout], today: NaiveDate) -> Self {
        let mut stats = ExerciseStats::default();
        for workout in workouts {
            let Some(completed) = workout
                .sets()
                .filter(|s| s.exercise == *exercise)
                .filter_map(|s| s.completed_at)
                .max()
            else {
                continue;
            };
            stats.total_completions += 1;
            if completed.date().iso_week() == today.iso_week() {
                stats.completions_this_week += 1;
            }
            if stats.last_completed.is_none_or(|last| completed > last) {
                stats.last_completed = Some(completed);
            }
        }
        stats
    }
}
