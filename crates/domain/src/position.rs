use derive_more::{Deref, Display, Into};
use uuid::Uuid;

use crate::{Entity, ExerciseGroupID, Name, OperationError};

/// 1-based ordinal of a slot within its plan or workout.
#[derive(Debug, Display, Clone, Copy, Into, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position(u32);

impl Position {
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    fn from_index(index: usize) -> Self {
        Self(u32::try_from(index + 1).unwrap_or(u32::MAX))
    }

    fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()?.checked_sub(1)
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct SlotID(Uuid);

impl SlotID {
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

impl From<Uuid> for SlotID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SlotID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// What a slot is bound to.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Nothing chosen yet.
    #[default]
    Pending,
    Exercise(Name),
    /// Any member of the group may be performed; the choice is still open.
    Group(ExerciseGroupID),
    /// A member of the group was chosen. The group is kept for choosing again.
    GroupChoice {
        group: ExerciseGroupID,
        exercise: Name,
    },
}

impl Binding {
    pub fn new(
        exercise: Option<Name>,
        group: Option<ExerciseGroupID>,
    ) -> Result<Self, OperationError> {
        match (exercise, group) {
            (None, None) => Ok(Binding::Pending),
            (Some(exercise), None) => Ok(Binding::Exercise(exercise)),
            (None, Some(group)) => Ok(Binding::Group(group)),
            (Some(exercise), Some(group)) => Err(OperationError::InvariantViolation(format!(
                "slot bound to exercise {exercise} and group {} at once",
                *group
            ))),
        }
    }

    #[must_use]
    pub fn exercise(&self) -> Option<&Name> {
        match self {
            Binding::Exercise(exercise) | Binding::GroupChoice { exercise, .. } => Some(exercise),
            Binding::Pending | Binding::Group(_) => None,
        }
    }

    #[must_use]
    pub fn group(&self) -> Option<ExerciseGroupID> {
        match self {
            Binding::Group(group) | Binding::GroupChoice { group, .. } => Some(*group),
            Binding::Pending | Binding::Exercise(_) => None,
        }
    }
}

/// An ordered position in a plan or a workout.
pub trait Slot {
    fn position(&self) -> Position;
    fn set_position(&mut self, position: Position);
    fn binding(&self) -> &Binding;
    fn set_binding(&mut self, binding: Binding);
}

/// Appends a slot after the last one.
pub fn insert_slot<S: Slot>(slots: &mut Vec<S>, create: impl FnOnce(Position) -> S) -> &mut S {
    let index = slots.len();
    slots.push(create(Position::from_index(index)));
    &mut slots[index]
}

/// Removes the slot at `position` and closes the gap.
pub fn remove_slot<S: Slot>(slots: &mut Vec<S>, position: Position) -> Result<S, OperationError> {
    let index = index_of(slots, position)?;
    let removed = slots.remove(index);
    renumber(slots);
    Ok(removed)
}

/// Moves the slot at `from` to `to`.
///
/// Slots between both positions shift by one towards the vacated position. For neighbouring
/// positions this exchanges the two slots and leaves all others untouched.
pub fn move_slot<S: Slot>(
    slots: &mut Vec<S>,
    from: Position,
    to: Position,
) -> Result<(), OperationError> {
    let from_index = index_of(slots, from)?;
    let to_index = to
        .index()
        .filter(|i| *i < slots.len())
        .ok_or(OperationError::InvalidPosition {
            position: to,
            len: slots.len(),
        })?;
    if from_index == to_index {
        return Ok(());
    }
    let slot = slots.remove(from_index);
    slots.insert(to_index, slot);
    renumber(slots);
    Ok(())
}

/// Replaces the binding of the slot at `position` without moving it.
pub fn rebind_slot<S: Slot>(
    slots: &mut [S],
    position: Position,
    binding: Binding,
) -> Result<&mut S, OperationError> {
    let slot = slot_at_mut(slots, position)?;
    slot.set_binding(binding);
    Ok(slot)
}

pub fn slot_at<S: Slot>(slots: &[S], position: Position) -> Result<&S, OperationError> {
    let index = index_of(slots, position)?;
    Ok(&slots[index])
}

pub fn slot_at_mut<S: Slot>(slots: &mut [S], position: Position) -> Result<&mut S, OperationError> {
    let index = index_of(slots, position)?;
    Ok(&mut slots[index])
}

/// Checks that the positions are exactly 1 to N in order.
pub fn check_positions<S: Slot>(slots: &[S]) -> Result<(), OperationError> {
    for (index, slot) in slots.iter().enumerate() {
        if slot.position() != Position::from_index(index) {
            return Err(OperationError::InvariantViolation(format!(
                "slot at index {index} has position {}",
                slot.position()
            )));
        }
    }
    Ok(())
}

fn index_of<S: Slot>(slots: &[S], position: Position) -> Result<usize, OperationError> {
    position
        .index()
        .filter(|i| *i < slots.len())
        .ok_or(OperationError::NotFound(Entity::Slot))
}

fn renumber<S: Slot>(slots: &mut [S]) {
    for (index, slot) in slots.iter_mut().enumerate() {
        slot.set_position(Position::from_index(index));
    }
}
