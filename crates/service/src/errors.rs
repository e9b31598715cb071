use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// No entity at the given identifier for an update or delete.
    #[error("can not find such data")]
    NotFound,
    /// Path identifier disagrees with the body-supplied identifier.
    #[error("the ids are different")]
    IdentityMismatch,
    #[error("database error: {0}")]
    Db(String),
}
