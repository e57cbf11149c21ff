use crate::Position;

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error("conflict")]
    Conflict,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<UpdateError> for CreateError {
    fn from(value: UpdateError) -> Self {
        match value {
            UpdateError::Conflict => CreateError::Conflict,
            UpdateError::NotFound => CreateError::Other("not found".into()),
            UpdateError::Storage(storage) => CreateError::Storage(storage),
            UpdateError::Other(other) => CreateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error("conflict")]
    Conflict,
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<ReadError> for UpdateError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::NotFound => UpdateError::NotFound,
            ReadError::Storage(storage) => UpdateError::Storage(storage),
            ReadError::Other(other) => UpdateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<ReadError> for DeleteError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::NotFound => DeleteError::NotFound,
            ReadError::Storage(storage) => DeleteError::Storage(storage),
            ReadError::Other(other) => DeleteError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

/// Failure of a materialization or mutation.
///
/// None of these leave partially applied state behind: the owning workout or plan is only
/// written after the whole operation succeeded.
#[derive(thiserror::Error, Debug)]
pub enum OperationError {
    #[error("{0} not found")]
    NotFound(Entity),
    #[error("invalid position {position} (expected 1 to {len})")]
    InvalidPosition { position: Position, len: usize },
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Entity {
    Exercise,
    #[strum(serialize = "exercise group")]
    ExerciseGroup,
    Slot,
    Set,
    Workout,
    Plan,
}

impl OperationError {
    pub(crate) fn from_read(err: ReadError, entity: Entity) -> Self {
        match err {
            ReadError::NotFound => OperationError::NotFound(entity),
            ReadError::Storage(storage) => OperationError::Storage(storage),
            ReadError::Other(other) => OperationError::Other(other),
        }
    }

    pub(crate) fn from_create(err: CreateError, entity: Entity) -> Self {
        match err {
            CreateError::Conflict => OperationError::Other(format!("{entity} conflict").into()),
            CreateError::Storage(storage) => OperationError::Storage(storage),
            CreateError::Other(other) => OperationError::Other(other),
        }
    }

    pub(crate) fn from_update(err: UpdateError, entity: Entity) -> Self {
        match err {
            UpdateError::NotFound => OperationError::NotFound(entity),
            UpdateError::Conflict => OperationError::Other(format!("{entity} conflict").into()),
            UpdateError::Storage(storage) => OperationError::Storage(storage),
            UpdateError::Other(other) => OperationError::Other(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_create_error_from_update_error() {
        assert!(matches!(
            CreateError::from(UpdateError::Conflict),
            CreateError::Conflict
        ));
        assert!(matches!(
            CreateError::from(UpdateError::Storage(StorageError::NoConnection)),
            CreateError::Storage(StorageError::NoConnection)
        ));
        assert!(matches!(
            CreateError::from(UpdateError::Other("foo".into())),
            CreateError::Other(error) if error.to_string() == "foo"
        ));
    }

    #[test]
    fn test_update_and_delete_error_from_read_error() {
        assert!(matches!(
            UpdateError::from(ReadError::NotFound),
            UpdateError::NotFound
        ));
        assert!(matches!(
            DeleteError::from(ReadError::Storage(StorageError::NoConnection)),
            DeleteError::Storage(StorageError::NoConnection)
        ));
    }

    #[test]
    fn test_operation_error_from_read_error() {
        assert!(matches!(
            OperationError::from_read(ReadError::NotFound, Entity::Workout),
            OperationError::NotFound(Entity::Workout)
        ));
        assert!(matches!(
            OperationError::from_read(
                ReadError::Storage(StorageError::NoConnection),
                Entity::Plan
            ),
            OperationError::Storage(StorageError::NoConnection)
        ));
    }

    #[test]
    fn test_operation_error_display() {
        assert_eq!(
            OperationError::NotFound(Entity::ExerciseGroup).to_string(),
            "exercise group not found"
        );
        assert_eq!(
            OperationError::InvalidPosition {
                position: Position::new(4),
                len: 3
            }
            .to_string(),
            "invalid position 4 (expected 1 to 3)"
        );
    }
}
