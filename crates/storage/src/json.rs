use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;
use chrono::{NaiveDateTime, Weekday};
use spotter_domain as domain;
use uuid::Uuid;

use crate::database::Database;

/// Store keeping all data in a single JSON file.
///
/// A missing file is treated as an empty database with default settings. Writes go to a
/// temporary file that replaces the existing one, so a failed call leaves the file unchanged.
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Database, anyhow::Error> {
        if !self.path.exists() {
            return Ok(Database::default());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let file: File = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", self.path.display()))?;
        Ok(Database::try_from(file)?)
    }

    fn save(&self, database: &Database) -> Result<(), anyhow::Error> {
        let content = serde_json::to_string_pretty(&File::from(database))?;
        let temporary = self.path.with_extension("tmp");
        fs::write(&temporary, content)
            .with_context(|| format!("failed to write {}", temporary.display()))?;
        fs::rename(&temporary, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }

    fn read<T, E>(&self, f: impl FnOnce(&Database) -> Result<T, E>) -> Result<T, E>
    where
        E: From<domain::StorageError>,
    {
        let database = self.load().map_err(storage_error)?;
        f(&database)
    }

    fn write<T, E>(&self, f: impl FnOnce(&mut Database) -> Result<T, E>) -> Result<T, E>
    where
        E: From<domain::StorageError>,
    {
        let mut database = self.load().map_err(storage_error)?;
        let result = f(&mut database)?;
        self.save(&database).map_err(storage_error)?;
        Ok(result)
    }
}

fn storage_error(err: anyhow::Error) -> domain::StorageError {
    domain::StorageError::Other(err.into())
}

impl domain::ExerciseRepository for JsonFile {
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

impl domain::ExerciseGroupRepository for JsonFile {
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

impl domain::PlanRepository for JsonFile {
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

impl domain::WorkoutRepository for JsonFile {
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

impl domain::SettingsRepository for JsonFile {
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

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DecodeError {
    #[error(transparent)]
    InvalidName(#[from] domain::NameError),
    #[error(transparent)]
    InvalidReps(#[from] domain::RepsError),
    #[error(transparent)]
    InvalidRepRange(#[from] domain::RepRangeError),
    #[error(transparent)]
    InvalidRIR(#[from] domain::RIRError),
    #[error(transparent)]
    InvalidPerceivedExertion(#[from] domain::PerceivedExertionError),
    #[error(transparent)]
    InvalidTime(#[from] domain::TimeError),
    #[error(transparent)]
    InvalidWeight(#[from] domain::WeightError),
    #[error("unknown {0}: {1}")]
    UnknownVariant(&'static str, String),
}

fn parse_variant<T: FromStr>(kind: &'static str, value: &str) -> Result<T, DecodeError> {
    T::from_str(value).map_err(|_| DecodeError::UnknownVariant(kind, value.to_string()))
}

fn decode_all<T, U: TryFrom<T>>(values: Vec<T>) -> Result<Vec<U>, U::Error> {
    values.into_iter().map(U::try_from).collect()
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct File {
    pub exercises: Vec<Exercise>,
    pub exercise_groups: Vec<ExerciseGroup>,
    pub plans: Vec<Plan>,
    pub workouts: Vec<Workout>,
    pub settings: Settings,
}

impl From<&Database> for File {
    fn from(value: &Database) -> Self {
        Self {
            exercises: value.exercises.iter().map(Exercise::from).collect(),
            exercise_groups: value
                .exercise_groups
                .iter()
                .map(ExerciseGroup::from)
                .collect(),
            plans: value.plans.iter().map(Plan::from).collect(),
            workouts: value.workouts.iter().map(Workout::from).collect(),
            settings: Settings::from(&value.settings),
        }
    }
}

impl TryFrom<File> for Database {
    type Error = DecodeError;

    fn try_from(value: File) -> Result<Self, Self::Error> {
        Ok(Self {
            exercises: decode_all(value.exercises)?,
            exercise_groups: decode_all(value.exercise_groups)?,
            plans: decode_all(value.plans)?,
            workouts: decode_all(value.workouts)?,
            settings: domain::Settings::try_from(value.settings)?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Exercise {
    pub name: String,
    pub muscles: Vec<String>,
    pub equipment: String,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
}

impl From<&domain::Exercise> for Exercise {
    fn from(value: &domain::Exercise) -> Self {
        Self {
            name: value.name.to_string(),
            muscles: value.muscles.iter().cloned().collect(),
            equipment: value.equipment.to_string(),
            category: value.category.clone(),
            thumbnail: value.thumbnail.clone(),
        }
    }
}

impl TryFrom<Exercise> for domain::Exercise {
    type Error = DecodeError;

    fn try_from(value: Exercise) -> Result<Self, Self::Error> {
        Ok(Self {
            name: domain::Name::new(&value.name)?,
            muscles: value.muscles.into_iter().collect(),
            equipment: parse_variant("equipment", &value.equipment)?,
            category: value.category,
            thumbnail: value.thumbnail,
            stats: None,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExerciseGroup {
    pub id: Uuid,
    pub name: Option<String>,
    pub exercises: Vec<String>,
}

impl From<&domain::ExerciseGroup> for ExerciseGroup {
    fn from(value: &domain::ExerciseGroup) -> Self {
        Self {
            id: *value.id,
            name: value.name.as_ref().map(ToString::to_string),
            exercises: value.exercises.iter().map(ToString::to_string).collect(),
        }
    }
}

impl TryFrom<ExerciseGroup> for domain::ExerciseGroup {
    type Error = DecodeError;

    fn try_from(value: ExerciseGroup) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: value.name.as_deref().map(domain::Name::new).transpose()?,
            exercises: value
                .exercises
                .iter()
                .map(|e| domain::Name::new(e))
                .collect::<Result<_, _>>()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Plan {
    pub id: Uuid,
    pub added_at: NaiveDateTime,
    pub name: String,
    pub notes: Option<String>,
    pub weekdays: Vec<Weekday>,
    pub slots: Vec<Slot>,
}

impl From<&domain::Plan> for Plan {
    fn from(value: &domain::Plan) -> Self {
        let mut weekdays = value.weekdays.iter().copied().collect::<Vec<_>>();
        weekdays.sort_by_key(Weekday::num_days_from_monday);
        Self {
            id: *value.id,
            added_at: value.added_at,
            name: value.name.to_string(),
            notes: value.notes.clone(),
            weekdays,
            slots: value.slots.iter().map(Slot::from).collect(),
        }
    }
}

impl TryFrom<Plan> for domain::Plan {
    type Error = DecodeError;

    fn try_from(value: Plan) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            added_at: value.added_at,
            name: domain::Name::new(&value.name)?,
            notes: value.notes,
            weekdays: value.weekdays.into_iter().collect::<HashSet<_>>(),
            slots: decode_all(value.slots)?,
        })
    }
}

/// Slot columns shared by plans and workouts: an exercise chosen from a group has both references
/// set.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Slot {
    pub id: Uuid,
    pub position: u32,
    pub exercise: Option<String>,
    pub group: Option<Uuid>,
    pub goal: Option<Goal>,
}

impl Slot {
    fn new(
        id: Uuid,
        position: domain::Position,
        binding: &domain::Binding,
        goal: Option<&domain::Goal>,
    ) -> Self {
        Self {
            id,
            position: position.into(),
            exercise: binding.exercise().map(ToString::to_string),
            group: binding.group().map(|g| *g),
            goal: goal.map(Goal::from),
        }
    }

    fn decode(
        self,
    ) -> Result<(Uuid, domain::Position, domain::Binding, Option<domain::Goal>), DecodeError> {
        Ok((
            self.id,
            domain::Position::new(self.position),
            binding(self.exercise.as_deref(), self.group)?,
            self.goal.map(domain::Goal::try_from).transpose()?,
        ))
    }
}

impl From<&domain::PlanSlot> for Slot {
    fn from(value: &domain::PlanSlot) -> Self {
        Self::new(*value.id, value.position, &value.binding, value.goal.as_ref())
    }
}

impl TryFrom<Slot> for domain::PlanSlot {
    type Error = DecodeError;

    fn try_from(value: Slot) -> Result<Self, Self::Error> {
        let (id, position, binding, goal) = value.decode()?;
        Ok(Self {
            id: id.into(),
            position,
            binding,
            goal,
        })
    }
}

fn binding(exercise: Option<&str>, group: Option<Uuid>) -> Result<domain::Binding, DecodeError> {
    let exercise = exercise.map(domain::Name::new).transpose()?;
    Ok(match (exercise, group) {
        (None, None) => domain::Binding::Pending,
        (Some(exercise), None) => domain::Binding::Exercise(exercise),
        (None, Some(group)) => domain::Binding::Group(group.into()),
        (Some(exercise), Some(group)) => domain::Binding::GroupChoice {
            group: group.into(),
            exercise,
        },
    })
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Goal {
    pub sets: u32,
    pub reps: Option<u32>,
    pub rep_range: Option<(u32, u32)>,
    pub rir: Option<u32>,
    pub perceived_exertion: Option<u32>,
    pub notes: Option<String>,
    pub set_type: String,
    pub modifier: Option<String>,
}

impl From<&domain::Goal> for Goal {
    fn from(value: &domain::Goal) -> Self {
        Self {
            sets: value.sets,
            reps: value.reps.map(u32::from),
            rep_range: value
                .rep_range
                .map(|r| (u32::from(r.min()), u32::from(r.max()))),
            rir: value.rir.map(u32::from),
            perceived_exertion: value.perceived_exertion.map(u32::from),
            notes: value.notes.clone(),
            set_type: value.set_type.to_string(),
            modifier: value.modifier.map(|m| m.to_string()),
        }
    }
}

impl TryFrom<Goal> for domain::Goal {
    type Error = DecodeError;

    fn try_from(value: Goal) -> Result<Self, Self::Error> {
        Ok(Self {
            sets: value.sets,
            reps: value.reps.map(domain::Reps::new).transpose()?,
            rep_range: value
                .rep_range
                .map(|(min, max)| -> Result<_, DecodeError> {
                    Ok(domain::RepRange::new(
                        domain::Reps::new(min)?,
                        domain::Reps::new(max)?,
                    )?)
                })
                .transpose()?,
            rir: value.rir.map(domain::RIR::new).transpose()?,
            perceived_exertion: value
                .perceived_exertion
                .map(domain::PerceivedExertion::new)
                .transpose()?,
            notes: value.notes,
            set_type: parse_variant("set type", &value.set_type)?,
            modifier: value
                .modifier
                .map(|m| parse_variant("modifier", &m))
                .transpose()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: Uuid,
    pub added_at: NaiveDateTime,
    pub plan_id: Option<Uuid>,
    pub name: String,
    pub notes: Option<String>,
    pub completed_at: Option<NaiveDateTime>,
    pub slots: Vec<WorkoutSlot>,
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: *value.id,
            added_at: value.added_at,
            plan_id: value.plan_id.map(|id| *id),
            name: value.name.to_string(),
            notes: value.notes.clone(),
            completed_at: value.completed_at,
            slots: value.slots.iter().map(WorkoutSlot::from).collect(),
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = DecodeError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            added_at: value.added_at,
            plan_id: value.plan_id.map(domain::PlanID::from),
            name: domain::Name::new(&value.name)?,
            notes: value.notes,
            completed_at: value.completed_at,
            slots: decode_all(value.slots)?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutSlot {
    #[serde(flatten)]
    pub slot: Slot,
    pub sets: Vec<ExerciseSet>,
}

impl From<&domain::WorkoutSlot> for WorkoutSlot {
    fn from(value: &domain::WorkoutSlot) -> Self {
        Self {
            slot: Slot::new(*value.id, value.position, &value.binding, value.goal.as_ref()),
            sets: value.sets.iter().map(ExerciseSet::from).collect(),
        }
    }
}

impl TryFrom<WorkoutSlot> for domain::WorkoutSlot {
    type Error = DecodeError;

    fn try_from(value: WorkoutSlot) -> Result<Self, Self::Error> {
        let (id, position, binding, goal) = value.slot.decode()?;
        Ok(Self {
            id: id.into(),
            position,
            binding,
            goal,
            sets: decode_all(value.sets)?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseSet {
    pub id: Uuid,
    pub set_number: u32,
    pub exercise: String,
    pub reps: u32,
    pub weight_lb: f32,
    pub weight_kg: f32,
    pub rir: u32,
    pub perceived_exertion: u32,
    pub duration: u32,
    pub completed_at: Option<NaiveDateTime>,
    pub set_type: String,
    pub modifier: Option<String>,
}

impl From<&domain::ExerciseSet> for ExerciseSet {
    fn from(value: &domain::ExerciseSet) -> Self {
        Self {
            id: *value.id,
            set_number: value.set_number,
            exercise: value.exercise.to_string(),
            reps: value.reps.into(),
            weight_lb: value.weight.pounds(),
            weight_kg: value.weight.kilograms(),
            rir: value.rir.into(),
            perceived_exertion: value.perceived_exertion.into(),
            duration: value.duration.into(),
            completed_at: value.completed_at,
            set_type: value.set_type.to_string(),
            modifier: value.modifier.map(|m| m.to_string()),
        }
    }
}

impl TryFrom<ExerciseSet> for domain::ExerciseSet {
    type Error = DecodeError;

    fn try_from(value: ExerciseSet) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            set_number: value.set_number,
            exercise: domain::Name::new(&value.exercise)?,
            reps: domain::Reps::new(value.reps)?,
            weight: domain::Weight::new(value.weight_lb, value.weight_kg)?,
            rir: domain::RIR::new(value.rir)?,
            perceived_exertion: domain::PerceivedExertion::new(value.perceived_exertion)?,
            duration: domain::Time::new(value.duration)?,
            completed_at: value.completed_at,
            set_type: parse_variant("set type", &value.set_type)?,
            modifier: value
                .modifier
                .map(|m| parse_variant("modifier", &m))
                .transpose()?,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub weight_unit: String,
    pub bar_weight: Option<f32>,
    pub plate_inventory: Vec<(f32, u32)>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(&domain::Settings::default())
    }
}

impl From<&domain::Settings> for Settings {
    fn from(value: &domain::Settings) -> Self {
        Self {
            weight_unit: value.weight_unit.to_string(),
            bar_weight: value.bar_weight,
            plate_inventory: value.plate_inventory.clone(),
        }
    }
}

impl TryFrom<Settings> for domain::Settings {
    type Error = DecodeError;

    fn try_from(value: Settings) -> Result<Self, Self::Error> {
        Ok(Self {
            weight_unit: parse_variant("weight unit", &value.weight_unit)?,
            bar_weight: value.bar_weight,
            plate_inventory: value.plate_inventory,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use spotter_domain::{SettingsRepository, WorkoutRepository, WorkoutService};

    use crate::tests::data::{DATABASE, EXERCISE_GROUP, PLAN, WORKOUT};

    use super::*;

    fn temporary_path(name: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("spotter-{name}-{}.json", Uuid::new_v4()));
        let _ = fs::remove_file(&path);
        path
    }

    #[test]
    fn test_database_try_from() {
        assert_eq!(
            Database::try_from(File::from(&*DATABASE)),
            Ok(DATABASE.clone())
        );
    }

    #[test]
    fn test_workout_serde() {
        let obj = Workout::from(&*WORKOUT);
        let serialized = json!(obj);
        let deserialized: Workout = serde_json::from_value(serialized).unwrap();
        assert_eq!(deserialized, obj);
    }

    #[rstest]
    #[case(Some("Squat"), None, domain::Binding::Exercise(domain::Name::new("Squat").unwrap()))]
    #[case(None, Some(EXERCISE_GROUP.id), domain::Binding::Group(EXERCISE_GROUP.id))]
    #[case(
        Some("Squat"),
        Some(EXERCISE_GROUP.id),
        domain::Binding::GroupChoice {
            group: EXERCISE_GROUP.id,
            exercise: domain::Name::new("Squat").unwrap()
        }
    )]
    #[case(None, None, domain::Binding::Pending)]
    fn test_binding_columns(
        #[case] exercise: Option<&str>,
        #[case] group: Option<domain::ExerciseGroupID>,
        #[case] expected: domain::Binding,
    ) {
        let group = group.map(|g| *g);
        assert_eq!(binding(exercise, group), Ok(expected.clone()));
        let slot = Slot::new(Uuid::nil(), domain::Position::new(1), &expected, None);
        assert_eq!(
            (slot.exercise, slot.group),
            (exercise.map(ToString::to_string), group)
        );
    }

    #[test]
    fn test_plan_try_from_invalid_set_type() {
        let mut plan = Plan::from(&*PLAN);
        plan.slots[0].goal.as_mut().unwrap().set_type = String::from("Dropset");
        assert_eq!(
            domain::Plan::try_from(plan),
            Err(DecodeError::UnknownVariant(
                "set type",
                String::from("Dropset")
            ))
        );
    }

    #[test]
    fn test_settings_default_on_missing_keys() {
        let file: File = serde_json::from_value(json!({})).unwrap();
        assert_eq!(
            Database::try_from(file).unwrap().settings,
            domain::Settings::default()
        );
    }

    #[tokio::test]
    async fn test_json_file_missing() {
        let store = JsonFile::new(temporary_path("missing"));
        assert_eq!(
            store.read_settings().await.unwrap(),
            domain::Settings::default()
        );
        assert!(store.read_workouts().await.unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_json_file_round_trip() {
        let store = JsonFile::new(temporary_path("round-trip"));
        store.create_workout(WORKOUT.clone()).await.unwrap();
        let settings = domain::Settings {
            weight_unit: domain::WeightUnit::Kilograms,
            bar_weight: Some(15.0),
            plate_inventory: vec![(25.0, 2)],
        };
        store.write_settings(settings.clone()).await.unwrap();

        let reopened = JsonFile::new(store.path());
        assert_eq!(reopened.read_workout(WORKOUT.id).await.unwrap(), *WORKOUT);
        assert_eq!(reopened.read_settings().await.unwrap(), settings);
        assert!(matches!(
            reopened.create_workout(WORKOUT.clone()).await,
            Err(domain::CreateError::Conflict)
        ));

        fs::remove_file(store.path()).unwrap();
    }

    #[tokio::test]
    async fn test_json_file_heavy_weight_stays_readable() {
        let service = domain::Service::new(JsonFile::new(temporary_path("heavy")));
        service
            .repository()
            .create_workout(WORKOUT.clone())
            .await
            .unwrap();
        let set = WORKOUT.slots[0].sets[0].id;

        assert!(matches!(
            service
                .update_set(
                    WORKOUT.id,
                    set,
                    domain::FieldUpdate::Weight(5000.0, domain::WeightUnit::Kilograms)
                )
                .await,
            Err(domain::OperationError::Other(_))
        ));
        service
            .update_set(
                WORKOUT.id,
                set,
                domain::FieldUpdate::Weight(4000.0, domain::WeightUnit::Kilograms),
            )
            .await
            .unwrap();

        let reopened = JsonFile::new(service.repository().path());
        let workout = reopened.read_workout(WORKOUT.id).await.unwrap();
        let weight = workout.slots[0].sets[0].weight;
        assert_approx_eq!(weight.kilograms(), 4000.0);
        assert_approx_eq!(weight.pounds(), 8818.492, 1e-2);
        assert_eq!(reopened.read_workouts().await.unwrap().len(), 1);

        fs::remove_file(reopened.path()).unwrap();
    }

    #[tokio::test]
    async fn test_json_file_invalid_content() {
        let path = temporary_path("invalid");
        fs::write(&path, "{").unwrap();
        let store = JsonFile::new(&path);
        assert!(matches!(
            store.read_workouts().await,
            Err(domain::ReadError::Storage(domain::StorageError::Other(_)))
        ));
        fs::remove_file(&path).unwrap();
    }
}
