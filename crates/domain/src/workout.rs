use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDateTime, Weekday};
use derive_more::Deref;
use log::debug;
use uuid::Uuid;

use crate::{
    Binding, CreateError, DeleteError, Entity, Exercise, ExerciseGroup, ExerciseGroupID,
    ExerciseSet, FieldUpdate, Goal, MIN_GOAL_SETS, Name, OperationError, Plan, PlanID, Position,
    ReadError, SetID, SetType, SetValues, Slot, SlotID, UpdateError, WeightUnit, carry_forward,
    position, warmup,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn get_workout(&self, id: WorkoutID) -> Result<WorkoutView, OperationError>;
    /// Materializes the plan, or an empty workout without a plan, and stores the result.
    async fn start_workout(
        &self,
        plan_id: Option<PlanID>,
        added_at: NaiveDateTime,
        completed_at: Option<NaiveDateTime>,
    ) -> Result<WorkoutView, OperationError>;
    async fn complete_workout(
        &self,
        id: WorkoutID,
        completed_at: NaiveDateTime,
    ) -> Result<Workout, OperationError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;

    async fn add_exercise(
        &self,
        id: WorkoutID,
        exercise: Option<Name>,
        group: Option<ExerciseGroupID>,
    ) -> Result<WorkoutSlot, OperationError>;
    async fn remove_exercise(
        &self,
        id: WorkoutID,
        position: Position,
    ) -> Result<WorkoutSlot, OperationError>;
    async fn swap_exercise(
        &self,
        id: WorkoutID,
        position: Position,
        exercise: Name,
    ) -> Result<WorkoutSlot, OperationError>;
    async fn replace_exercise_with_group(
        &self,
        id: WorkoutID,
        position: Position,
        group: ExerciseGroupID,
    ) -> Result<WorkoutSlot, OperationError>;
    async fn choose_exercise_from_group(
        &self,
        id: WorkoutID,
        position: Position,
        group: ExerciseGroupID,
        exercise: Name,
        goal: Option<Goal>,
    ) -> Result<WorkoutSlot, OperationError>;
    async fn move_exercise(
        &self,
        id: WorkoutID,
        from: Position,
        to: Position,
    ) -> Result<WorkoutSlot, OperationError>;

    async fn add_set(&self, id: WorkoutID, position: Position)
    -> Result<ExerciseSet, OperationError>;
    async fn remove_set(&self, id: WorkoutID, set: SetID) -> Result<ExerciseSet, OperationError>;
    async fn update_set(
        &self,
        id: WorkoutID,
        set: SetID,
        update: FieldUpdate,
    ) -> Result<ExerciseSet, OperationError>;
    async fn add_warmup_ramp(
        &self,
        id: WorkoutID,
        position: Position,
        unit: WeightUnit,
    ) -> Result<WorkoutSlot, OperationError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn read_workout(&self, id: WorkoutID) -> Result<Workout, ReadError>;
    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError>;
    async fn replace_workout(&self, workout: Workout) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    /// Unique creation time, used as a stable external key.
    pub added_at: NaiveDateTime,
    pub plan_id: Option<PlanID>,
    pub name: Name,
    pub notes: Option<String>,
    pub completed_at: Option<NaiveDateTime>,
    pub slots: Vec<WorkoutSlot>,
}

impl Workout {
    pub fn sets(&self) -> impl Iterator<Item = &ExerciseSet> {
        self.slots.iter().flat_map(|s| s.sets.iter())
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn slot(&self, position: Position) -> Result<&WorkoutSlot, OperationError> {
        position::slot_at(&self.slots, position)
    }

    pub fn add_exercise(&mut self, binding: Binding) -> &WorkoutSlot {
        position::insert_slot(&mut self.slots, |position| WorkoutSlot {
            id: SlotID::new(),
            position,
            binding,
            goal: None,
            sets: vec![],
        })
    }

    /// Removes the slot together with its sets.
    pub fn remove_exercise(&mut self, position: Position) -> Result<WorkoutSlot, OperationError> {
        position::remove_slot(&mut self.slots, position)
    }

    /// Binds the slot to another exercise. The sets stay and are reassigned.
    pub fn swap_exercise(
        &mut self,
        position: Position,
        exercise: Name,
    ) -> Result<&WorkoutSlot, OperationError> {
        let slot = position::rebind_slot(
            &mut self.slots,
            position,
            Binding::Exercise(exercise.clone()),
        )?;
        for set in &mut slot.sets {
            set.exercise = exercise.clone();
        }
        Ok(slot)
    }

    /// Binds the slot to a group. The sets are deleted.
    pub fn replace_exercise_with_group(
        &mut self,
        position: Position,
        group: ExerciseGroupID,
    ) -> Result<&WorkoutSlot, OperationError> {
        let slot = position::rebind_slot(&mut self.slots, position, Binding::Group(group))?;
        slot.sets.clear();
        Ok(slot)
    }

    /// Binds the slot to a member of `group` and creates its sets.
    ///
    /// Sets of a previous choice are replaced. Without a goal, the goal snapshot of the slot is
    /// used.
    pub fn choose_exercise_from_group(
        &mut self,
        position: Position,
        group: &ExerciseGroup,
        exercise: Name,
        goal: Option<Goal>,
        history: &[Workout],
    ) -> Result<&WorkoutSlot, OperationError> {
        if !group.contains(&exercise) {
            return Err(OperationError::InvariantViolation(format!(
                "{exercise} is not a member of {}",
                group.display_name()
            )));
        }
        if position::slot_at(&self.slots, position)?.binding.group() != Some(group.id) {
            return Err(OperationError::InvariantViolation(format!(
                "slot {position} is not bound to {}",
                group.display_name()
            )));
        }
        let id = self.id;
        let slot = position::rebind_slot(
            &mut self.slots,
            position,
            Binding::GroupChoice {
                group: group.id,
                exercise: exercise.clone(),
            },
        )?;
        if goal.is_some() {
            slot.goal = goal;
        }
        let num_sets = slot.goal.as_ref().map_or(MIN_GOAL_SETS, Goal::num_sets);
        slot.sets = create_sets(&exercise, slot.goal.as_ref(), num_sets, history, id);
        Ok(slot)
    }

    pub fn move_exercise(
        &mut self,
        from: Position,
        to: Position,
    ) -> Result<&WorkoutSlot, OperationError> {
        position::move_slot(&mut self.slots, from, to)?;
        self.slot(to)
    }

    /// Appends a set to the slot, populated from its goal and the history of the exercise.
    pub fn add_set(
        &mut self,
        position: Position,
        history: &[Workout],
    ) -> Result<&ExerciseSet, OperationError> {
        let id = self.id;
        let slot = position::slot_at_mut(&mut self.slots, position)?;
        let exercise = slot.exercise(position)?.clone();
        let values = carry_forward::resolve(
            slot.goal.as_ref(),
            carry_forward::last_completed_set(history, &exercise, id),
            SetValues::default(),
        );
        let (set_type, modifier) = slot
            .goal
            .as_ref()
            .map_or((SetType::Working, None), |g| (g.set_type, g.modifier));
        let set_number = next_set_number(&slot.sets);
        slot.sets.push(ExerciseSet::new(
            exercise, set_number, values, set_type, modifier,
        ));
        Ok(&slot.sets[slot.sets.len() - 1])
    }

    /// Removes the set and renumbers the remaining sets of its slot.
    ///
    /// The slot is kept even if it ends up without sets.
    pub fn remove_set(&mut self, id: SetID) -> Result<ExerciseSet, OperationError> {
        let (slot, index) = self.find_set_mut(id)?;
        let removed = slot.sets.remove(index);
        renumber_sets(&mut slot.sets);
        Ok(removed)
    }

    pub fn update_set(
        &mut self,
        id: SetID,
        update: FieldUpdate,
    ) -> Result<&ExerciseSet, OperationError> {
        let (slot, index) = self.find_set_mut(id)?;
        let set = &mut slot.sets[index];
        *set = update
            .apply_to(set.clone())
            .map_err(|err| OperationError::Other(Box::new(err)))?;
        Ok(set)
    }

    /// Prepends warm-up sets leading up to the heaviest working set of the slot.
    ///
    /// A slot without working weight is left unchanged.
    pub fn add_warmup_ramp(
        &mut self,
        position: Position,
        unit: WeightUnit,
    ) -> Result<&WorkoutSlot, OperationError> {
        let slot = position::slot_at_mut(&mut self.slots, position)?;
        let exercise = slot.exercise(position)?.clone();
        let top_weight = slot
            .sets
            .iter()
            .filter(|s| s.set_type == SetType::Working)
            .map(|s| s.weight.get(unit))
            .fold(0.0, f32::max);
        if top_weight <= 0.0 {
            debug!("no working weight for warm-up ramp of {exercise}");
            return Ok(slot);
        }
        let ramp = warmup::warmup_ramp(top_weight, unit)
            .map_err(|err| OperationError::Other(Box::new(err)))?;
        let working = std::mem::take(&mut slot.sets);
        slot.sets = ramp
            .into_iter()
            .map(|values| ExerciseSet::new(exercise.clone(), 0, values, SetType::WarmUp, None))
            .chain(working)
            .collect();
        renumber_sets(&mut slot.sets);
        Ok(slot)
    }

    pub fn complete(&mut self, completed_at: NaiveDateTime) {
        self.completed_at = Some(completed_at);
    }

    /// Checks the structural invariants of the workout.
    pub fn check(&self) -> Result<(), OperationError> {
        position::check_positions(&self.slots)?;
        for slot in &self.slots {
            for (index, set) in slot.sets.iter().enumerate() {
                if set.set_number as usize != index + 1 {
                    return Err(OperationError::InvariantViolation(format!(
                        "set {index} of slot {} has number {}",
                        slot.position, set.set_number
                    )));
                }
                if slot.binding.exercise() != Some(&set.exercise) {
                    return Err(OperationError::InvariantViolation(format!(
                        "set of {} in slot {} bound to {:?}",
                        set.exercise, slot.position, slot.binding
                    )));
                }
            }
        }
        Ok(())
    }

    fn find_set_mut(&mut self, id: SetID) -> Result<(&mut WorkoutSlot, usize), OperationError> {
        self.slots
            .iter_mut()
            .find_map(|slot| {
                let index = slot.sets.iter().position(|s| s.id == id)?;
                Some((slot, index))
            })
            .ok_or(OperationError::NotFound(Entity::Set))
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
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

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSlot {
    pub id: SlotID,
    pub position: Position,
    pub binding: Binding,
    /// Snapshot of the plan goal at materialization.
    pub goal: Option<Goal>,
    pub sets: Vec<ExerciseSet>,
}

impl WorkoutSlot {
    fn exercise(&self, position: Position) -> Result<&Name, OperationError> {
        self.binding.exercise().ok_or_else(|| {
            OperationError::InvariantViolation(format!("no exercise chosen at position {position}"))
        })
    }
}

impl Slot for WorkoutSlot {
    fn position(&self) -> Position {
        self.position
    }

    fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    fn binding(&self) -> &Binding {
        &self.binding
    }

    fn set_binding(&mut self, binding: Binding) {
        self.binding = binding;
    }
}

/// A workout together with the exercises and groups its slots refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutView {
    pub workout: Workout,
    pub exercises: BTreeMap<Name, Exercise>,
    pub groups: BTreeMap<ExerciseGroupID, ExerciseGroup>,
}

impl WorkoutView {
    /// Resolves the references of the workout, failing on exercises or groups that do not exist.
    pub fn new(
        workout: Workout,
        exercises: &[Exercise],
        groups: &[ExerciseGroup],
    ) -> Result<Self, OperationError> {
        let mut view = WorkoutView {
            workout,
            exercises: BTreeMap::new(),
            groups: BTreeMap::new(),
        };
        for slot in &view.workout.slots {
            if let Some(name) = slot.binding.exercise() {
                let exercise = exercises
                    .iter()
                    .find(|e| e.name == *name)
                    .ok_or(OperationError::NotFound(Entity::Exercise))?;
                view.exercises.insert(name.clone(), exercise.clone());
            }
            if let Some(id) = slot.binding.group() {
                let group = groups
                    .iter()
                    .find(|g| g.id == id)
                    .ok_or(OperationError::NotFound(Entity::ExerciseGroup))?;
                view.groups.insert(id, group.clone());
            }
        }
        Ok(view)
    }
}

/// Expands a plan into a new workout.
///
/// Slots keep the position and binding of the plan slot. Slots with an exercise and a goal
/// receive the number of sets prescribed by the goal, populated from the goal and `history`.
pub fn materialize(
    plan: Option<&Plan>,
    history: &[Workout],
    added_at: NaiveDateTime,
    completed_at: Option<NaiveDateTime>,
) -> Result<Workout, OperationError> {
    let id = WorkoutID::new();
    let (name, notes) = match plan {
        Some(plan) => {
            position::check_positions(&plan.slots)?;
            (plan.name.clone(), plan.notes.clone())
        }
        None => (
            Name::new(&format!("{} workout", weekday_name(added_at.weekday())))
                .map_err(|err| OperationError::Other(Box::new(err)))?,
            None,
        ),
    };
    let slots = plan
        .map(|p| p.slots.as_slice())
        .unwrap_or_default()
        .iter()
        .map(|plan_slot| {
            let sets = match (plan_slot.binding.exercise(), &plan_slot.goal) {
                (Some(exercise), Some(goal)) => {
                    create_sets(exercise, Some(goal), goal.num_sets(), history, id)
                }
                _ => vec![],
            };
            WorkoutSlot {
                id: SlotID::new(),
                position: plan_slot.position,
                binding: plan_slot.binding.clone(),
                goal: plan_slot.goal.clone(),
                sets,
            }
        })
        .collect::<Vec<_>>();
    debug!("materialized workout {name} with {} slots", slots.len());
    Ok(Workout {
        id,
        added_at,
        plan_id: plan.map(|p| p.id),
        name,
        notes,
        completed_at,
        slots,
    })
}

fn create_sets(
    exercise: &Name,
    goal: Option<&Goal>,
    num_sets: u32,
    history: &[Workout],
    workout_id: WorkoutID,
) -> Vec<ExerciseSet> {
    let values = carry_forward::resolve(
        goal,
        carry_forward::last_completed_set(history, exercise, workout_id),
        SetValues::default(),
    );
    let (set_type, modifier) = goal.map_or((SetType::Working, None), |g| (g.set_type, g.modifier));
    (1..=num_sets)
        .map(|set_number| ExerciseSet::new(exercise.clone(), set_number, values, set_type, modifier))
        .collect()
}

fn next_set_number(sets: &[ExerciseSet]) -> u32 {
    sets.iter().map(|s| s.set_number).max().unwrap_or(0) + 1
}

fn renumber_sets(sets: &mut [ExerciseSet]) {
    for (set_number, set) in (1..).zip(sets.iter_mut()) {
        set.set_number = set_number;
    }
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
