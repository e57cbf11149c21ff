use std::collections::HashSet;

use chrono::{NaiveDateTime, Weekday};
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    Binding, CreateError, DeleteError, ExerciseGroupID, Modifier, Name, OperationError,
    PerceivedExertion, Position, RIR, ReadError, RepRange, Reps, SetType, Slot, SlotID,
    UpdateError, position,
};

/// Number of sets created for a goal that prescribes none.
pub const MIN_GOAL_SETS: u32 = 1;

#[allow(async_fn_in_trait)]
pub trait PlanService {
    async fn get_plans(&self) -> Result<Vec<Plan>, ReadError>;
    async fn create_plan(
        &self,
        name: Name,
        notes: Option<String>,
        weekdays: HashSet<Weekday>,
        added_at: NaiveDateTime,
    ) -> Result<Plan, CreateError>;
    async fn replace_plan(&self, plan: Plan) -> Result<Plan, UpdateError>;
    async fn delete_plan(&self, id: PlanID) -> Result<PlanID, DeleteError>;

    async fn add_plan_slot(
        &self,
        id: PlanID,
        exercise: Option<Name>,
        group: Option<ExerciseGroupID>,
        goal: Option<Goal>,
    ) -> Result<PlanSlot, OperationError>;
    async fn remove_plan_slot(
        &self,
        id: PlanID,
        position: Position,
    ) -> Result<PlanSlot, OperationError>;
    async fn move_plan_slot(
        &self,
        id: PlanID,
        from: Position,
        to: Position,
    ) -> Result<PlanSlot, OperationError>;
    async fn rebind_plan_slot(
        &self,
        id: PlanID,
        position: Position,
        exercise: Option<Name>,
        group: Option<ExerciseGroupID>,
    ) -> Result<PlanSlot, OperationError>;
    async fn set_goal(
        &self,
        id: PlanID,
        position: Position,
        goal: Option<Goal>,
    ) -> Result<PlanSlot, OperationError>;

    async fn get_plans_for_weekday(&self, weekday: Weekday) -> Result<Vec<Plan>, ReadError> {
        Ok(self
            .get_plans()
            .await?
            .into_iter()
            .filter(|p| p.is_scheduled_on(weekday))
            .collect())
    }
}

#[allow(async_fn_in_trait)]
pub trait PlanRepository {
    async fn read_plans(&self) -> Result<Vec<Plan>, ReadError>;
    async fn read_plan(&self, id: PlanID) -> Result<Plan, ReadError>;
    async fn create_plan(&self, plan: Plan) -> Result<Plan, CreateError>;
    async fn replace_plan(&self, plan: Plan) -> Result<Plan, UpdateError>;
    async fn delete_plan(&self, id: PlanID) -> Result<PlanID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub id: PlanID,
    /// Unique creation time, used as a stable external key.
    pub added_at: NaiveDateTime,
    pub name: Name,
    pub notes: Option<String>,
    pub weekdays: HashSet<Weekday>,
    pub slots: Vec<PlanSlot>,
}

impl Plan {
    #[must_use]
    pub fn new(
        name: Name,
        notes: Option<String>,
        weekdays: HashSet<Weekday>,
        added_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: PlanID::new(),
            added_at,
            name,
            notes,
            weekdays,
            slots: vec![],
        }
    }

    #[must_use]
    pub fn is_scheduled_on(&self, weekday: Weekday) -> bool {
        self.weekdays.contains(&weekday)
    }

    pub fn add_slot(&mut self, binding: Binding, goal: Option<Goal>) -> &PlanSlot {
        position::insert_slot(&mut self.slots, |position| PlanSlot {
            id: SlotID::new(),
            position,
            binding,
            goal,
        })
    }

    pub fn remove_slot(&mut self, position: Position) -> Result<PlanSlot, OperationError> {
        position::remove_slot(&mut self.slots, position)
    }

    pub fn move_slot(&mut self, from: Position, to: Position) -> Result<&PlanSlot, OperationError> {
        position::move_slot(&mut self.slots, from, to)?;
        position::slot_at(&self.slots, to)
    }

    pub fn rebind_slot(
        &mut self,
        position: Position,
        binding: Binding,
    ) -> Result<&PlanSlot, OperationError> {
        let slot = position::rebind_slot(&mut self.slots, position, binding)?;
        Ok(slot)
    }

    pub fn set_goal(
        &mut self,
        position: Position,
        goal: Option<Goal>,
    ) -> Result<&PlanSlot, OperationError> {
        let slot = position::slot_at_mut(&mut self.slots, position)?;
        slot.goal = goal;
        Ok(slot)
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlanID(Uuid);

impl PlanID {
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

impl From<Uuid> for PlanID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for PlanID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlanSlot {
    pub id: SlotID,
    pub position: Position,
    pub binding: Binding,
    pub goal: Option<Goal>,
}

impl Slot for PlanSlot {
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

/// Target performance for the sets of a plan slot.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Goal {
    pub sets: u32,
    pub reps: Option<Reps>,
    pub rep_range: Option<RepRange>,
    pub rir: Option<RIR>,
    pub perceived_exertion: Option<PerceivedExertion>,
    pub notes: Option<String>,
    pub set_type: SetType,
    pub modifier: Option<Modifier>,
}

impl Goal {
    /// Number of sets to create when the goal is instantiated.
    #[must_use]
    pub fn num_sets(&self) -> u32 {
        self.sets.max(MIN_GOAL_SETS)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::Entity;

    use super::*;

    fn plan() -> Plan {
        let mut plan = Plan::new(
            Name::new("Push").unwrap(),
            None,
            HashSet::from([Weekday::Mon, Weekday::Thu]),
            NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        );
        for exercise in ["Bench Press", "Overhead Press", "Dips"] {
            plan.add_slot(
                Binding::Exercise(Name::new(exercise).unwrap()),
                Some(Goal {
                    sets: 3,
                    ..Goal::default()
                }),
            );
        }
        plan
    }

    fn exercises(plan: &Plan) -> Vec<String> {
        plan.slots
            .iter()
            .map(|s| s.binding.exercise().map(Name::to_string).unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_plan_add_slot() {
        let mut plan = plan();
        let group = ExerciseGroupID::from(7);
        let slot = plan.add_slot(Binding::Group(group), None);
        assert_eq!(slot.position, Position::new(4));
        assert_eq!(slot.binding.group(), Some(group));
        assert!(slot.goal.is_none());
    }

    #[test]
    fn test_plan_remove_slot() {
        let mut plan = plan();
        let removed = plan.remove_slot(Position::new(1)).unwrap();
        assert_eq!(removed.binding.exercise().unwrap().as_str(), "Bench Press");
        assert_eq!(exercises(&plan), vec!["Overhead Press", "Dips"]);
        assert_eq!(
            plan.slots.iter().map(|s| s.position).collect::<Vec<_>>(),
            vec![Position::new(1), Position::new(2)]
        );
    }

    #[test]
    fn test_plan_move_slot() {
        let mut plan = plan();
        let moved = plan.move_slot(Position::new(3), Position::new(2)).unwrap();
        assert_eq!(moved.binding.exercise().unwrap().as_str(), "Dips");
        assert_eq!(exercises(&plan), vec!["Bench Press", "Dips", "Overhead Press"]);
    }

    #[test]
    fn test_plan_set_goal() {
        let mut plan = plan();
        let goal = Goal {
            sets: 5,
            reps: Some(Reps::new(5).unwrap()),
            ..Goal::default()
        };
        let slot = plan.set_goal(Position::new(2), Some(goal.clone())).unwrap();
        assert_eq!(slot.goal, Some(goal));
        assert!(matches!(
            plan.set_goal(Position::new(9), None),
            Err(OperationError::NotFound(Entity::Slot))
        ));
    }

    #[test]
    fn test_plan_rebind_slot() {
        let mut plan = plan();
        let squat = Name::new("Squat").unwrap();
        let slot = plan
            .rebind_slot(Position::new(2), Binding::Exercise(squat.clone()))
            .unwrap();
        assert_eq!(slot.binding, Binding::Exercise(squat));
        assert_eq!(slot.position, Position::new(2));
    }

    #[rstest]
    #[case(Weekday::Mon, true)]
    #[case(Weekday::Thu, true)]
    #[case(Weekday::Sun, false)]
    fn test_plan_is_scheduled_on(#[case] weekday: Weekday, #[case] expected: bool) {
        assert_eq!(plan().is_scheduled_on(weekday), expected);
    }

    #[rstest]
    #[case(0, 1)]
    #[case(1, 1)]
    #[case(4, 4)]
    fn test_goal_num_sets(#[case] sets: u32, #[case] expected: u32) {
        assert_eq!(
            Goal {
                sets,
                ..Goal::default()
            }
            .num_sets(),
            expected
        );
    }
}
