use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use spotter_domain as domain;

use crate::database::Database;

/// Store keeping all data in memory.
///
/// Each call works on a copy of the database that replaces the stored one only on success. A store
/// switched offline fails every call with [`domain::StorageError::NoConnection`].
pub struct MemoryStore {
    database: Mutex<Database>,
    online: AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new(database: Database) -> Self {
        Self {
            database: Mutex::new(database),
            online: AtomicBool::new(true),
        }
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Result<Database, domain::StorageError> {
        self.read(|database| Ok(database.clone()))
    }

    fn read<T, E>(&self, f: impl FnOnce(&Database) -> Result<T, E>) -> Result<T, E>
    where
        E: From<domain::StorageError>,
    {
        let database = self.lock()?;
        f(&database)
    }

    fn write<T, E>(&self, f: impl FnOnce(&mut Database) -> Result<T, E>) -> Result<T, E>
    where
        E: From<domain::StorageError>,
    {
        let mut database = self.lock()?;
        let mut copy = database.clone();
        let result = f(&mut copy)?;
        *database = copy;
        Ok(result)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Database>, domain::StorageError> {
        if !self.online.load(Ordering::SeqCst) {
            return Err(domain::StorageError::NoConnection);
        }
        self.database
            .lock()
            .map_err(|_| domain::StorageError::Other("database lock poisoned".into()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Database::default())
    }
}

impl domain::ExerciseRepository for MemoryStore {
    async fn read_exercises(&self) -> Result<Vec<domain::Exercise>, domain::ReadError> {
        self.read(|database| Ok(database.exercises.clone()))
    }

    async fn create_exercise(
        &self,
        exercise: domain::Exercise,
    ) -> Result<domain::Exercise, domain::CreateError> {
        self.write(|database| database.create_exercise(exercise))
    }

    async fn replace_exercise(
        &self,
        exercise: domain::Exercise,
    ) -> Result<domain::Exercise, domain::UpdateError> {
        self.write(|database| database.replace_exercise(exercise))
    }

    async fn delete_exercise(
        &self,
        name: domain::Name,
    ) -> Result<domain::Name, domain::DeleteError> {
        self.write(|database| database.delete_exercise(name))
    }
}

impl domain::ExerciseGroupRepository for MemoryStore {
    async fn read_exercise_groups(&self) -> Result<Vec<domain::ExerciseGroup>, domain::ReadError> {
        self.read(|database| Ok(database.exercise_groups.clone()))
    }

    async fn create_exercise_group(
        &self,
        exercise_group: domain::ExerciseGroup,
    ) -> Result<domain::ExerciseGroup, domain::CreateError> {
        self.write(|database| database.create_exercise_group(exercise_group))
    }

    async fn replace_exercise_group(
        &self,
        exercise_group: domain::ExerciseGroup,
    ) -> Result<domain::ExerciseGroup, domain::UpdateError> {
        self.write(|database| database.replace_exercise_group(exercise_group))
    }

    async fn delete_exercise_group(
        &self,
        id: domain::ExerciseGroupID,
    ) -> Result<domain::ExerciseGroupID, domain::DeleteError> {
        self.write(|database| database.delete_exercise_group(id))
    }
}

impl domain::PlanRepository for MemoryStore {
    async fn read_plans(&self) -> Result<Vec<domain::Plan>, domain::ReadError> {
        self.read(|database| Ok(database.plans.clone()))
    }

    async fn read_plan(&self, id: domain::PlanID) -> Result<domain::Plan, domain::ReadError> {
        self.read(|database| database.read_plan(id))
    }

    async fn create_plan(&self, plan: domain::Plan) -> Result<domain::Plan, domain::CreateError> {
        self.write(|database| database.create_plan(plan))
    }

    async fn replace_plan(&self, plan: domain::Plan) -> Result<domain::Plan, domain::UpdateError> {
        self.write(|database| database.replace_plan(plan))
    }

    async fn delete_plan(
        &self,
        id: domain::PlanID,
    ) -> Result<domain::PlanID, domain::DeleteError> {
        self.write(|database| database.delete_plan(id))
    }
}

impl domain::WorkoutRepository for MemoryStore {
    async fn read_workouts(&self) -> Result<Vec<domain::Workout>, domain::ReadError> {
        self.read(|database| Ok(database.workouts.clone()))
    }

    async fn read_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::Workout, domain::ReadError> {
        self.read(|database| database.read_workout(id))
    }

    async fn create_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::CreateError> {
        self.write(|database| database.create_workout(workout))
    }

    async fn replace_workout(
        &self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::UpdateError> {
        self.write(|database| database.replace_workout(workout))
    }

    async fn delete_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        self.write(|database| database.delete_workout(id))
    }
}

impl domain::SettingsRepository for MemoryStore {
    async fn read_settings(&self) -> Result<domain::Settings, domain::ReadError> {
        self.read(|database| Ok(database.settings.clone()))
    }

    async fn write_settings(
        &self,
        settings: domain::Settings,
    ) -> Result<domain::Settings, domain::UpdateError> {
        self.write(|database| {
            database.settings = settings.clone();
            Ok(settings)
        })
    }
}
