use spotter_domain as domain;

/// Complete contents of a store.
///
/// All operations work on whole aggregates. Stores apply them to a copy and only keep the copy
/// if the operation succeeded.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Database {
    pub exercises: Vec<domain::Exercise>,
    pub exercise_groups: Vec<domain::ExerciseGroup>,
    pub plans: Vec<domain::Plan>,
    pub workouts: Vec<domain::Workout>,
    pub settings: domain::Settings,
}

impl Database {
    pub fn create_exercise(
        &mut self,
        exercise: domain::Exercise,
    ) -> Result<domain::Exercise, domain::CreateError> {
        if self.exercises.iter().any(|e| e.name == exercise.name) {
            return Err(domain::CreateError::Conflict);
        }
        self.exercises.push(exercise.clone());
        Ok(exercise)
    }

    pub fn replace_exercise(
        &mut self,
        exercise: domain::Exercise,
    ) -> Result<domain::Exercise, domain::UpdateError> {
        let current = self
            .exercises
            .iter_mut()
            .find(|e| e.name == exercise.name)
            .ok_or(domain::UpdateError::NotFound)?;
        *current = exercise.clone();
        Ok(exercise)
    }

    pub fn delete_exercise(
        &mut self,
        name: domain::Name,
    ) -> Result<domain::Name, domain::DeleteError> {
        let index = self
            .exercises
            .iter()
            .position(|e| e.name == name)
            .ok_or(domain::DeleteError::NotFound)?;
        self.exercises.remove(index);
        Ok(name)
    }

    pub fn create_exercise_group(
        &mut self,
        exercise_group: domain::ExerciseGroup,
    ) -> Result<domain::ExerciseGroup, domain::CreateError> {
        if self.exercise_groups.iter().any(|g| g.id == exercise_group.id) {
            return Err(domain::CreateError::Conflict);
        }
        self.exercise_groups.push(exercise_group.clone());
        Ok(exercise_group)
    }

    pub fn replace_exercise_group(
        &mut self,
        exercise_group: domain::ExerciseGroup,
    ) -> Result<domain::ExerciseGroup, domain::UpdateError> {
        let current = self
            .exercise_groups
            .iter_mut()
            .find(|g| g.id == exercise_group.id)
            .ok_or(domain::UpdateError::NotFound)?;
        *current = exercise_group.clone();
        Ok(exercise_group)
    }

    pub fn delete_exercise_group(
        &mut self,
        id: domain::ExerciseGroupID,
    ) -> Result<domain::ExerciseGroupID, domain::DeleteError> {
        let index = self
            .exercise_groups
            .iter()
            .position(|g| g.id == id)
            .ok_or(domain::DeleteError::NotFound)?;
        self.exercise_groups.remove(index);
        Ok(id)
    }

    pub fn read_plan(&self, id: domain::PlanID) -> Result<domain::Plan, domain::ReadError> {
        self.plans
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(domain::ReadError::NotFound)
    }

    /// Fails on a duplicate id or creation time.
    pub fn create_plan(&mut self, plan: domain::Plan) -> Result<domain::Plan, domain::CreateError> {
        if self
            .plans
            .iter()
            .any(|p| p.id == plan.id || p.added_at == plan.added_at)
        {
            return Err(domain::CreateError::Conflict);
        }
        self.plans.push(plan.clone());
        Ok(plan)
    }

    pub fn replace_plan(&mut self, plan: domain::Plan) -> Result<domain::Plan, domain::UpdateError> {
        if self
            .plans
            .iter()
            .any(|p| p.id != plan.id && p.added_at == plan.added_at)
        {
            return Err(domain::UpdateError::Conflict);
        }
        let current = self
            .plans
            .iter_mut()
            .find(|p| p.id == plan.id)
            .ok_or(domain::UpdateError::NotFound)?;
        *current = plan.clone();
        Ok(plan)
    }

    /// Deletes the plan. Workouts started from it keep their slots and sets.
    pub fn delete_plan(
        &mut self,
        id: domain::PlanID,
    ) -> Result<domain::PlanID, domain::DeleteError> {
        let index = self
            .plans
            .iter()
            .position(|p| p.id == id)
            .ok_or(domain::DeleteError::NotFound)?;
        self.plans.remove(index);
        for workout in &mut self.workouts {
            if workout.plan_id == Some(id) {
                workout.plan_id = None;
            }
        }
        Ok(id)
    }

    pub fn read_workout(
        &self,
        id: domain::WorkoutID,
    ) -> Result<domain::Workout, domain::ReadError> {
        self.workouts
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or(domain::ReadError::NotFound)
    }

    /// Fails on a duplicate id or creation time.
    pub fn create_workout(
        &mut self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::CreateError> {
        if self
            .workouts
            .iter()
            .any(|w| w.id == workout.id || w.added_at == workout.added_at)
        {
            return Err(domain::CreateError::Conflict);
        }
        self.workouts.push(workout.clone());
        Ok(workout)
    }

    pub fn replace_workout(
        &mut self,
        workout: domain::Workout,
    ) -> Result<domain::Workout, domain::UpdateError> {
        if self
            .workouts
            .iter()
            .any(|w| w.id != workout.id && w.added_at == workout.added_at)
        {
            return Err(domain::UpdateError::Conflict);
        }
        let current = self
            .workouts
            .iter_mut()
            .find(|w| w.id == workout.id)
            .ok_or(domain::UpdateError::NotFound)?;
        *current = workout.clone();
        Ok(workout)
    }

    /// Deletes the workout with all its slots and sets.
    pub fn delete_workout(
        &mut self,
        id: domain::WorkoutID,
    ) -> Result<domain::WorkoutID, domain::DeleteError> {
        let index = self
            .workouts
            .iter()
            .position(|w| w.id == id)
            .ok_or(domain::DeleteError::NotFound)?;
        self.workouts.remove(index);
        Ok(id)
    }
}
