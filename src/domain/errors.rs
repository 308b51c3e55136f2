use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Access denied")]
    Unauthorized,
    #[error("{entity} not found: id {id}")]
    NotFound { entity: &'static str, id: i32 },
    #[error("Cannot delete: related records exist")]
    IntegrityConflict,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Driver and pool detail is logged where the failure is converted and
    /// never carried to the caller.
    #[error("Storage failure")]
    Storage,
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        DomainError::NotFound { entity, id }
    }
}
