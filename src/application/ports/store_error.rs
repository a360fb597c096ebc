/// Failure reported by the persistent store.
///
/// Constraint violations (uniqueness, rating range, foreign keys) are kept
/// apart from engine or I/O faults so callers can react to them.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("constraint violated: {0}")]
    ConstraintViolation(String),
    #[error("storage failure")]
    Storage(#[source] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
