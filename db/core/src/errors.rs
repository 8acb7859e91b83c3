pub use sea_orm::DbErr;
use sea_orm::SqlErr;
use thiserror::Error;

/// Errors produced by the marketplace database layer
#[derive(Debug, Error)]
pub enum DbSqlError {
    #[error("failed to construct the database: {0}")]
    Construction(String),

    #[error("{entity} with id {id} not found")]
    EntityNotFound { entity: &'static str, id: i32 },

    #[error(transparent)]
    BackendError(#[from] DbErr),
}

impl DbSqlError {
    /// Returns true when the underlying database rejected the statement because of a
    /// unique or foreign key constraint
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            DbSqlError::BackendError(e) => matches!(
                e.sql_err(),
                Some(SqlErr::UniqueConstraintViolation(_)) | Some(SqlErr::ForeignKeyConstraintViolation(_))
            ),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, DbSqlError>;
