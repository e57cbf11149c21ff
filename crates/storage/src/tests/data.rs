use std::collections::{BTreeSet, HashSet};

use chrono::{NaiveDate, NaiveDateTime, Weekday};
use spotter_domain as domain;

use crate::database::Database;

pub fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

pub fn name(value: &str) -> domain::Name {
    domain::Name::new(value).unwrap()
}

fn set(id: u128, set_number: u32, exercise: &str, reps: u32, pounds: f32) -> domain::ExerciseSet {
    domain::ExerciseSet {
        id: id.into(),
        set_number,
        exercise: name(exercise),
        reps: domain::Reps::new(reps).unwrap(),
        weight: domain::Weight::from_pounds(pounds).unwrap(),
        rir: domain::RIR::new(2).unwrap(),
        perceived_exertion: domain::PerceivedExertion::new(8).unwrap(),
        duration: domain::Time::default(),
        completed_at: Some(at(6, 3, 19)),
        set_type: domain::SetType::Working,
        modifier: None,
    }
}

fn goal(sets: u32, reps: u32) -> domain::Goal {
    domain::Goal {
        sets,
        reps: Some(domain::Reps::new(reps).unwrap()),
        ..domain::Goal::default()
    }
}

pub static EXERCISES: std::sync::LazyLock<Vec<domain::Exercise>> =
    std::sync::LazyLock::new(|| {
        vec![
            EXERCISE.clone(),
            EXERCISE_2.clone(),
            EXERCISE_3.clone(),
            EXERCISE_4.clone(),
        ]
    });

pub static EXERCISE: std::sync::LazyLock<domain::Exercise> =
    std::sync::LazyLock::new(|| domain::Exercise {
        name: name("Squat"),
        muscles: BTreeSet::from([String::from("Quads"), String::from("Glutes")]),
        equipment: domain::Equipment::Barbell,
        category: Some(String::from("Legs")),
        thumbnail: None,
        stats: None,
    });

pub static EXERCISE_2: std::sync::LazyLock<domain::Exercise> =
    std::sync::LazyLock::new(|| domain::Exercise {
        muscles: BTreeSet::from([String::from("Chest")]),
        ..domain::Exercise::new(name("Bench Press"), domain::Equipment::Barbell)
    });

pub static EXERCISE_3: std::sync::LazyLock<domain::Exercise> =
    std::sync::LazyLock::new(|| {
        domain::Exercise::new(name("Barbell Row"), domain::Equipment::Barbell)
    });

pub static EXERCISE_4: std::sync::LazyLock<domain::Exercise> =
    std::sync::LazyLock::new(|| domain::Exercise::new(name("Cable Row"), domain::Equipment::Cable));

pub static EXERCISE_GROUP: std::sync::LazyLock<domain::ExerciseGroup> =
    std::sync::LazyLock::new(|| domain::ExerciseGroup {
        id: 1.into(),
        name: Some(name("Rows")),
        exercises: BTreeSet::from([name("Barbell Row"), name("Cable Row")]),
    });

pub static PLAN: std::sync::LazyLock<domain::Plan> = std::sync::LazyLock::new(|| domain::Plan {
    id: 1.into(),
    added_at: at(5, 1, 8),
    name: name("Full Body"),
    notes: Some(String::from("Rest 3 minutes")),
    weekdays: HashSet::from([Weekday::Mon, Weekday::Thu]),
    slots: vec![
        domain::PlanSlot {
            id: 1.into(),
            position: domain::Position::new(1),
            binding: domain::Binding::Exercise(name("Squat")),
            goal: Some(goal(3, 5)),
        },
        domain::PlanSlot {
            id: 2.into(),
            position: domain::Position::new(2),
            binding: domain::Binding::Group(EXERCISE_GROUP.id),
            goal: Some(goal(2, 10)),
        },
        domain::PlanSlot {
            id: 3.into(),
            position: domain::Position::new(3),
            binding: domain::Binding::Exercise(name("Bench Press")),
            goal: Some(goal(3, 0)),
        },
    ],
});

pub static WORKOUT: std::sync::LazyLock<domain::Workout> =
    std::sync::LazyLock::new(|| domain::Workout {
        id: 1.into(),
        added_at: at(6, 3, 18),
        plan_id: Some(PLAN.id),
        name: name("Full Body"),
        notes: None,
        completed_at: Some(at(6, 3, 19)),
        slots: vec![
            domain::WorkoutSlot {
                id: 11.into(),
                position: domain::Position::new(1),
                binding: domain::Binding::Exercise(name("Squat")),
                goal: Some(goal(3, 5)),
                sets: vec![
                    set(1, 1, "Squat", 5, 225.0),
                    set(2, 2, "Squat", 5, 225.0),
                    set(3, 3, "Squat", 4, 225.0),
                ],
            },
            domain::WorkoutSlot {
                id: 12.into(),
                position: domain::Position::new(2),
                binding: domain::Binding::GroupChoice {
                    group: EXERCISE_GROUP.id,
                    exercise: name("Barbell Row"),
                },
                goal: Some(goal(2, 10)),
                sets: vec![
                    set(4, 1, "Barbell Row", 10, 135.0),
                    set(5, 2, "Barbell Row", 10, 135.0),
                ],
            },
            domain::WorkoutSlot {
                id: 13.into(),
                position: domain::Position::new(3),
                binding: domain::Binding::Exercise(name("Bench Press")),
                goal: Some(goal(3, 0)),
                sets: vec![set(6, 1, "Bench Press", 8, 185.0)],
            },
        ],
    });

pub static DATABASE: std::sync::LazyLock<Database> = std::sync::LazyLock::new(|| Database {
    exercises: EXERCISES.clone(),
    exercise_groups: vec![EXERCISE_GROUP.clone()],
    plans: vec![PLAN.clone()],
    workouts: vec![WORKOUT.clone()],
    settings: domain::Settings::default(),
});
