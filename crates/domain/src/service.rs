use std::collections::{BTreeSet, HashSet};

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use log::{debug, error, info};

use crate::{
    Binding, CreateError, DeleteError, Entity, Exercise, ExerciseGroup, ExerciseGroupID,
    ExerciseGroupRepository, ExerciseGroupService, ExerciseRepository, ExerciseService,
    ExerciseSet, ExerciseStats, FieldUpdate, Goal, Name, OperationError, Plan, PlanID,
    PlanRepository, PlanService, PlanSlot, Position, ReadError, SetID, Settings,
    SettingsRepository, SettingsService, UpdateError, WeightUnit, Workout, WorkoutID,
    WorkoutRepository, WorkoutService, WorkoutSlot, WorkoutView, position, workout,
};

/// Orchestrates the domain operations on top of a repository.
///
/// Every mutation reads the owning workout or plan, applies the change to a copy and writes the
/// copy back with a single replace. A failing operation therefore never leaves partial changes.
pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

impl<R: WorkoutRepository> Service<R> {
    async fn mutate_workout<T>(
        &self,
        id: WorkoutID,
        mutate: impl FnOnce(&mut Workout, &[Workout]) -> Result<T, OperationError>,
    ) -> Result<T, OperationError> {
        let workouts = self
            .repository
            .read_workouts()
            .await
            .map_err(|err| OperationError::from_read(err, Entity::Workout))?;
        let mut workout = workouts
            .iter()
            .find(|w| w.id == id)
            .cloned()
            .ok_or(OperationError::NotFound(Entity::Workout))?;
        workout.check()?;
        let result = mutate(&mut workout, &workouts)?;
        workout.check()?;
        self.repository
            .replace_workout(workout)
            .await
            .map_err(|err| OperationError::from_update(err, Entity::Workout))?;
        Ok(result)
    }
}

impl<R: PlanRepository> Service<R> {
    async fn mutate_plan<T>(
        &self,
        id: PlanID,
        mutate: impl FnOnce(&mut Plan) -> Result<T, OperationError>,
    ) -> Result<T, OperationError> {
        let mut plan = self
            .repository
            .read_plan(id)
            .await
            .map_err(|err| OperationError::from_read(err, Entity::Plan))?;
        position::check_positions(&plan.slots)?;
        let result = mutate(&mut plan)?;
        position::check_positions(&plan.slots)?;
        self.repository
            .replace_plan(plan)
            .await
            .map_err(|err| OperationError::from_update(err, Entity::Plan))?;
        Ok(result)
    }
}

impl<R: ExerciseRepository + ExerciseGroupRepository> Service<R> {
    async fn check_binding(&self, binding: &Binding) -> Result<(), OperationError> {
        if let Some(exercise) = binding.exercise() {
            self.read_exercise(exercise).await?;
        }
        if let Some(group) = binding.group() {
            self.read_exercise_group(group).await?;
        }
        Ok(())
    }

    async fn read_exercise(&self, name: &Name) -> Result<Exercise, OperationError> {
        self.repository
            .read_exercises()
            .await
            .map_err(|err| OperationError::from_read(err, Entity::Exercise))?
            .into_iter()
            .find(|e| e.name == *name)
            .ok_or(OperationError::NotFound(Entity::Exercise))
    }

    async fn read_exercise_group(
        &self,
        id: ExerciseGroupID,
    ) -> Result<ExerciseGroup, OperationError> {
        self.repository
            .read_exercise_groups()
            .await
            .map_err(|err| OperationError::from_read(err, Entity::ExerciseGroup))?
            .into_iter()
            .find(|g| g.id == id)
            .ok_or(OperationError::NotFound(Entity::ExerciseGroup))
    }

    async fn view(&self, workout: Workout) -> Result<WorkoutView, OperationError> {
        let exercises = self
            .repository
            .read_exercises()
            .await
            .map_err(|err| OperationError::from_read(err, Entity::Exercise))?;
        let groups = self
            .repository
            .read_exercise_groups()
            .await
            .map_err(|err| OperationError::from_read(err, Entity::ExerciseGroup))?;
        WorkoutView::new(workout, &exercises, &groups)
    }
}

impl<R: WorkoutRepository + PlanRepository> Service<R> {
    async fn bindings(&self) -> Result<Vec<Binding>, ReadError> {
        let workouts = self.repository.read_workouts().await?;
        let plans = self.repository.read_plans().await?;
        Ok(workouts
            .iter()
            .flat_map(|w| w.slots.iter().map(|s| s.binding.clone()))
            .chain(
                plans
                    .iter()
                    .flat_map(|p| p.slots.iter().map(|s| s.binding.clone())),
            )
            .collect())
    }
}

impl<R: ExerciseRepository + WorkoutRepository + PlanRepository> ExerciseService for Service<R> {
    async fn get_exercises(&self) -> Result<Vec<Exercise>, ReadError> {
        log_on_error!(
            self.repository.read_exercises(),
            ReadError,
            "get",
            "exercises"
        )
    }

    async fn create_exercise(&self, exercise: Exercise) -> Result<Exercise, CreateError> {
        log_on_error!(
            self.repository.create_exercise(exercise),
            CreateError,
            "create",
            "exercise"
        )
    }

    async fn replace_exercise(&self, exercise: Exercise) -> Result<Exercise, UpdateError> {
        log_on_error!(
            async {
                let current = self
                    .repository
                    .read_exercises()
                    .await?
                    .into_iter()
                    .find(|e| e.name == exercise.name)
                    .ok_or(UpdateError::NotFound)?;
                self.repository
                    .replace_exercise(current.with_metadata_of(&exercise))
                    .await
            },
            UpdateError,
            "replace",
            "exercise"
        )
    }

    async fn delete_exercise(&self, name: Name) -> Result<Name, DeleteError> {
        log_on_error!(
            async {
                let referenced = self
                    .bindings()
                    .await?
                    .iter()
                    .any(|b| b.exercise() == Some(&name));
                if referenced {
                    return Err(DeleteError::Other(
                        format!("exercise {name} is still referenced").into(),
                    ));
                }
                self.repository.delete_exercise(name).await
            },
            DeleteError,
            "delete",
            "exercise"
        )
    }

    async fn get_exercise_stats(
        &self,
        name: &Name,
        today: NaiveDate,
    ) -> Result<ExerciseStats, ReadError> {
        log_on_error!(
            async {
                self.get_exercise(name).await?;
                let workouts = self.repository.read_workouts().await?;
                Ok::<_, ReadError>(ExerciseStats::from_workouts(name, &workouts, today))
            },
            ReadError,
            "get",
            "exercise stats"
        )
    }
}

impl<R: ExerciseGroupRepository + WorkoutRepository + PlanRepository> ExerciseGroupService
    for Service<R>
{
    async fn get_exercise_groups(&self) -> Result<Vec<ExerciseGroup>, ReadError> {
        log_on_error!(
            self.repository.read_exercise_groups(),
            ReadError,
            "get",
            "exercise groups"
        )
    }

    async fn create_exercise_group(
        &self,
        name: Option<Name>,
        exercises: BTreeSet<Name>,
    ) -> Result<ExerciseGroup, CreateError> {
        log_on_error!(
            self.repository.create_exercise_group(ExerciseGroup {
                id: ExerciseGroupID::new(),
                name,
                exercises,
            }),
            CreateError,
            "create",
            "exercise group"
        )
    }

    async fn replace_exercise_group(
        &self,
        exercise_group: ExerciseGroup,
    ) -> Result<ExerciseGroup, UpdateError> {
        log_on_error!(
            self.repository.replace_exercise_group(exercise_group),
            UpdateError,
            "replace",
            "exercise group"
        )
    }

    async fn delete_exercise_group(
        &self,
        id: ExerciseGroupID,
    ) -> Result<ExerciseGroupID, DeleteError> {
        log_on_error!(
            async {
                let referenced = self
                    .bindings()
                    .await?
                    .iter()
                    .any(|b| b.group() == Some(id));
                if referenced {
                    return Err(DeleteError::Other(
                        format!("exercise group {} is still referenced", *id).into(),
                    ));
                }
                self.repository.delete_exercise_group(id).await
            },
            DeleteError,
            "delete",
            "exercise group"
        )
    }
}

impl<R: PlanRepository + ExerciseRepository + ExerciseGroupRepository> PlanService
    for Service<R>
{
    async fn get_plans(&self) -> Result<Vec<Plan>, ReadError> {
        log_on_error!(self.repository.read_plans(), ReadError, "get", "plans")
    }

    async fn create_plan(
        &self,
        name: Name,
        notes: Option<String>,
        weekdays: HashSet<Weekday>,
        added_at: NaiveDateTime,
    ) -> Result<Plan, CreateError> {
        log_on_error!(
            self.repository
                .create_plan(Plan::new(name, notes, weekdays, added_at)),
            CreateError,
            "create",
            "plan"
        )
    }

    async fn replace_plan(&self, plan: Plan) -> Result<Plan, UpdateError> {
        log_on_error!(
            self.repository.replace_plan(plan),
            UpdateError,
            "replace",
            "plan"
        )
    }

    async fn delete_plan(&self, id: PlanID) -> Result<PlanID, DeleteError> {
        log_on_error!(
            self.repository.delete_plan(id),
            DeleteError,
            "delete",
            "plan"
        )
    }

    async fn add_plan_slot(
        &self,
        id: PlanID,
        exercise: Option<Name>,
        group: Option<ExerciseGroupID>,
        goal: Option<Goal>,
    ) -> Result<PlanSlot, OperationError> {
        log_on_error!(
            async {
                let binding = Binding::new(exercise, group)?;
                self.check_binding(&binding).await?;
                self.mutate_plan(id, |plan| Ok(plan.add_slot(binding, goal).clone()))
                    .await
            },
            OperationError,
            "add",
            "plan slot"
        )
    }

    async fn remove_plan_slot(
        &self,
        id: PlanID,
        position: Position,
    ) -> Result<PlanSlot, OperationError> {
        log_on_error!(
            self.mutate_plan(id, |plan| plan.remove_slot(position)),
            OperationError,
            "remove",
            "plan slot"
        )
    }

    async fn move_plan_slot(
        &self,
        id: PlanID,
        from: Position,
        to: Position,
    ) -> Result<PlanSlot, OperationError> {
        log_on_error!(
            self.mutate_plan(id, |plan| Ok(plan.move_slot(from, to)?.clone())),
            OperationError,
            "move",
            "plan slot"
        )
    }

    async fn rebind_plan_slot(
        &self,
        id: PlanID,
        position: Position,
        exercise: Option<Name>,
        group: Option<ExerciseGroupID>,
    ) -> Result<PlanSlot, OperationError> {
        log_on_error!(
            async {
                let binding = Binding::new(exercise, group)?;
                self.check_binding(&binding).await?;
                self.mutate_plan(id, |plan| Ok(plan.rebind_slot(position, binding)?.clone()))
                    .await
            },
            OperationError,
            "rebind",
            "plan slot"
        )
    }

    async fn set_goal(
        &self,
        id: PlanID,
        position: Position,
        goal: Option<Goal>,
    ) -> Result<PlanSlot, OperationError> {
        log_on_error!(
            self.mutate_plan(id, |plan| Ok(plan.set_goal(position, goal)?.clone())),
            OperationError,
            "set",
            "goal"
        )
    }
}

impl<R> WorkoutService for Service<R>
where
    R: WorkoutRepository + PlanRepository + ExerciseRepository + ExerciseGroupRepository,
{
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(
            self.repository.read_workouts(),
            ReadError,
            "get",
            "workouts"
        )
    }

    async fn get_workout(&self, id: WorkoutID) -> Result<WorkoutView, OperationError> {
        log_on_error!(
            async {
                let workout = self
                    .repository
                    .read_workout(id)
                    .await
                    .map_err(|err| OperationError::from_read(err, Entity::Workout))?;
                self.view(workout).await
            },
            OperationError,
            "get",
            "workout"
        )
    }

    async fn start_workout(
        &self,
        plan_id: Option<PlanID>,
        added_at: NaiveDateTime,
        completed_at: Option<NaiveDateTime>,
    ) -> Result<WorkoutView, OperationError> {
        log_on_error!(
            async {
                let plan = match plan_id {
                    Some(id) => Some(
                        self.repository
                            .read_plan(id)
                            .await
                            .map_err(|err| OperationError::from_read(err, Entity::Plan))?,
                    ),
                    None => None,
                };
                let history = self
                    .repository
                    .read_workouts()
                    .await
                    .map_err(|err| OperationError::from_read(err, Entity::Workout))?;
                let workout =
                    workout::materialize(plan.as_ref(), &history, added_at, completed_at)?;
                let view = self.view(workout).await?;
                let workout = self
                    .repository
                    .create_workout(view.workout.clone())
                    .await
                    .map_err(|err| OperationError::from_create(err, Entity::Workout))?;
                info!("started workout {}", workout.name);
                Ok::<_, OperationError>(WorkoutView { workout, ..view })
            },
            OperationError,
            "start",
            "workout"
        )
    }

    async fn complete_workout(
        &self,
        id: WorkoutID,
        completed_at: NaiveDateTime,
    ) -> Result<Workout, OperationError> {
        log_on_error!(
            self.mutate_workout(id, |workout, _| {
                workout.complete(completed_at);
                Ok(workout.clone())
            }),
            OperationError,
            "complete",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }

    async fn add_exercise(
        &self,
        id: WorkoutID,
        exercise: Option<Name>,
        group: Option<ExerciseGroupID>,
    ) -> Result<WorkoutSlot, OperationError> {
        log_on_error!(
            async {
                let binding = Binding::new(exercise, group)?;
                self.check_binding(&binding).await?;
                self.mutate_workout(id, |workout, _| {
                    Ok(workout.add_exercise(binding).clone())
                })
                .await
            },
            OperationError,
            "add",
            "exercise"
        )
    }

    async fn remove_exercise(
        &self,
        id: WorkoutID,
        position: Position,
    ) -> Result<WorkoutSlot, OperationError> {
        log_on_error!(
            self.mutate_workout(id, |workout, _| workout.remove_exercise(position)),
            OperationError,
            "remove",
            "exercise"
        )
    }

    async fn swap_exercise(
        &self,
        id: WorkoutID,
        position: Position,
        exercise: Name,
    ) -> Result<WorkoutSlot, OperationError> {
        log_on_error!(
            async {
                self.read_exercise(&exercise).await?;
                self.mutate_workout(id, |workout, _| {
                    Ok(workout.swap_exercise(position, exercise)?.clone())
                })
                .await
            },
            OperationError,
            "swap",
            "exercise"
        )
    }

    async fn replace_exercise_with_group(
        &self,
        id: WorkoutID,
        position: Position,
        group: ExerciseGroupID,
    ) -> Result<WorkoutSlot, OperationError> {
        log_on_error!(
            async {
                self.read_exercise_group(group).await?;
                self.mutate_workout(id, |workout, _| {
                    Ok(workout.replace_exercise_with_group(position, group)?.clone())
                })
                .await
            },
            OperationError,
            "replace",
            "exercise with group"
        )
    }

    async fn choose_exercise_from_group(
        &self,
        id: WorkoutID,
        position: Position,
        group: ExerciseGroupID,
        exercise: Name,
        goal: Option<Goal>,
    ) -> Result<WorkoutSlot, OperationError> {
        log_on_error!(
            async {
                let group = self.read_exercise_group(group).await?;
                self.read_exercise(&exercise).await?;
                self.mutate_workout(id, |workout, history| {
                    Ok(workout
                        .choose_exercise_from_group(position, &group, exercise, goal, history)?
                        .clone())
                })
                .await
            },
            OperationError,
            "choose",
            "exercise from group"
        )
    }

    async fn move_exercise(
        &self,
        id: WorkoutID,
        from: Position,
        to: Position,
    ) -> Result<WorkoutSlot, OperationError> {
        log_on_error!(
            self.mutate_workout(id, |workout, _| Ok(workout.move_exercise(from, to)?.clone())),
            OperationError,
            "move",
            "exercise"
        )
    }

    async fn add_set(
        &self,
        id: WorkoutID,
        position: Position,
    ) -> Result<ExerciseSet, OperationError> {
        log_on_error!(
            self.mutate_workout(id, |workout, history| {
                Ok(workout.add_set(position, history)?.clone())
            }),
            OperationError,
            "add",
            "set"
        )
    }

    async fn remove_set(&self, id: WorkoutID, set: SetID) -> Result<ExerciseSet, OperationError> {
        log_on_error!(
            self.mutate_workout(id, |workout, _| workout.remove_set(set)),
            OperationError,
            "remove",
            "set"
        )
    }

    async fn update_set(
        &self,
        id: WorkoutID,
        set: SetID,
        update: FieldUpdate,
    ) -> Result<ExerciseSet, OperationError> {
        log_on_error!(
            self.mutate_workout(id, |workout, _| Ok(workout.update_set(set, update)?.clone())),
            OperationError,
            "update",
            "set"
        )
    }

    async fn add_warmup_ramp(
        &self,
        id: WorkoutID,
        position: Position,
        unit: WeightUnit,
    ) -> Result<WorkoutSlot, OperationError> {
        log_on_error!(
            self.mutate_workout(id, |workout, _| {
                Ok(workout.add_warmup_ramp(position, unit)?.clone())
            }),
            OperationError,
            "add",
            "warm-up ramp"
        )
    }
}

impl<R: SettingsRepository> SettingsService for Service<R> {
    async fn get_settings(&self) -> Result<Settings, ReadError> {
        log_on_error!(
            self.repository.read_settings(),
            ReadError,
            "get",
            "settings"
        )
    }

    async fn set_settings(&self, settings: Settings) -> Result<Settings, UpdateError> {
        log_on_error!(
            self.repository.write_settings(settings),
            UpdateError,
            "set",
            "settings"
        )
    }
}
