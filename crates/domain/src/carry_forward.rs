use crate::{ExerciseSet, Goal, Name, SetValues, Weight, Workout, WorkoutID};

/// Determines the values of a new set.
///
/// Each field takes the first positive value of the goal, the last completed set and the
/// defaults. Missing weight units are derived afterwards, so a unit given by the goal or the
/// history is never overridden by a conversion.
#[must_use]
pub fn resolve(
    goal: Option<&Goal>,
    last_completed: Option<&ExerciseSet>,
    defaults: SetValues,
) -> SetValues {
    let history = last_completed.map(ExerciseSet::values);
    SetValues {
        reps: first_positive(
            [goal.and_then(|g| g.reps), history.map(|h| h.reps)],
            defaults.reps,
        ),
        weight: Weight::backfilled(
            first_positive_weight(
                history.map(|h| h.weight.pounds()),
                defaults.weight.pounds(),
            ),
            first_positive_weight(
                history.map(|h| h.weight.kilograms()),
                defaults.weight.kilograms(),
            ),
        ),
        rir: first_positive(
            [goal.and_then(|g| g.rir), history.map(|h| h.rir)],
            defaults.rir,
        ),
        perceived_exertion: first_positive(
            [
                goal.and_then(|g| g.perceived_exertion),
                history.map(|h| h.perceived_exertion),
            ],
            defaults.perceived_exertion,
        ),
        duration: first_positive([None, history.map(|h| h.duration)], defaults.duration),
    }
}

/// Finds the set that new sets of `exercise` continue from.
///
/// This is the completed set with the highest set number in the most recently added workout
/// that contains a completed set of the exercise. The workout `excluded` is ignored.
#[must_use]
pub fn last_completed_set<'a>(
    workouts: &'a [Workout],
    exercise: &Name,
    excluded: WorkoutID,
) -> Option<&'a ExerciseSet> {
    workouts
        .iter()
        .filter(|w| w.id != excluded)
        .filter_map(|w| {
            w.sets()
                .filter(|s| s.exercise == *exercise && s.is_completed())
                .max_by_key(|s| s.set_number)
                .map(|s| (w.added_at, s))
        })
        .max_by_key(|(added_at, _)| *added_at)
        .map(|(_, set)| set)
}

fn first_positive<T: Copy + Into<u32>>(candidates: [Option<T>; 2], default: T) -> T {
    candidates
        .into_iter()
        .flatten()
        .find(|v| (*v).into() > 0)
        .unwrap_or(default)
}

fn first_positive_weight(history: Option<f32>, default: f32) -> f32 {
    history.filter(|v| *v > 0.0).unwrap_or(default)
}
