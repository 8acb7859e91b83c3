//! Error types and utilities for the marketplace API
//!
//! This module provides:
//! - Server-level errors (ApiError enum) for infrastructure failures
//! - Configuration errors
//! - GraphQL error codes and message templates for API responses
//! - Builder functions for creating GraphQL errors carrying a `code` extension

use std::path::PathBuf;

use async_graphql::ErrorExtensions;
use marketplace_db::errors::DbSqlError;
use thiserror::Error;
use validator::ValidationErrors;

// ============================================================================
// Server-Level Errors
// ============================================================================

/// API-related errors for server infrastructure
#[derive(Debug, Error)]
pub enum ApiError {
    /// Server binding error
    #[error("Failed to bind server: {0}")]
    BindError(#[from] std::io::Error),

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbSqlError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Io(PathBuf, std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(String),
    #[error("failed to validate config: {0}")]
    Validation(ValidationErrors),
}

// ============================================================================
// GraphQL Error Codes
// ============================================================================

/// Error codes for GraphQL API errors
///
/// Every GraphQL error carries one of these codes in its `code` extension.
pub mod codes {
    /// Context retrieval errors (database handle, config)
    pub const CONTEXT_ERROR: &str = "CONTEXT_ERROR";

    /// Database query execution failures
    pub const QUERY_FAILED: &str = "QUERY_FAILED";

    /// Resource not found errors
    pub const NOT_FOUND: &str = "NOT_FOUND";

    /// Unique or foreign key constraint rejected the change
    pub const CONSTRAINT_VIOLATION: &str = "CONSTRAINT_VIOLATION";

    /// Input validation failures
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";

    /// Invalid pagination parameters
    pub const INVALID_PAGINATION: &str = "INVALID_PAGINATION";

    /// Cursor that was not issued by this API
    pub const INVALID_CURSOR: &str = "INVALID_CURSOR";

    /// Generic internal server errors
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

// ============================================================================
// GraphQL Error Message Templates
// ============================================================================

/// Message templates for common error scenarios
pub mod messages {
    /// Context retrieval error message
    pub fn context_error(context_type: &str, error: impl std::fmt::Display) -> String {
        format!("Failed to get {} from context: {}", context_type, error)
    }

    /// Database query error message
    pub fn query_error(operation: &str, error: impl std::fmt::Display) -> String {
        format!("Database query failed during {}: {}", operation, error)
    }

    /// Resource not found error message
    pub fn not_found(resource_type: &str, identifier: impl std::fmt::Display) -> String {
        format!("{} not found: {}", resource_type, identifier)
    }

    pub fn constraint_violation(operation: &str, error: impl std::fmt::Display) -> String {
        format!("Constraint violation during {}: {}", operation, error)
    }

    pub fn validation_failed(field: &str, reason: &str) -> String {
        format!("Validation failed for '{}': {}", field, reason)
    }

    /// Invalid pagination parameters message
    pub fn invalid_pagination(reason: &str) -> String {
        format!("Invalid pagination parameters: {}", reason)
    }

    pub fn invalid_cursor(cursor: &str) -> String {
        format!("Invalid cursor: {}", cursor)
    }

    /// Internal error message
    pub fn internal_error(context: &str, error: impl std::fmt::Display) -> String {
        format!("Internal error in {}: {}", context, error)
    }
}

// ============================================================================
// GraphQL Error Builder Functions
// ============================================================================

fn coded(code: &'static str, message: String) -> async_graphql::Error {
    async_graphql::Error::new(message).extend_with(|_, e| e.set("code", code))
}

/// Creates an error for context retrieval failures
pub fn context_error(context_type: &str, error: impl std::fmt::Display) -> async_graphql::Error {
    coded(codes::CONTEXT_ERROR, messages::context_error(context_type, error))
}

/// Creates an error for database query failures
pub fn query_failed(operation: &str, error: impl std::fmt::Display) -> async_graphql::Error {
    coded(codes::QUERY_FAILED, messages::query_error(operation, error))
}

/// Creates an error for resource not found errors
pub fn not_found(resource_type: &str, identifier: impl std::fmt::Display) -> async_graphql::Error {
    coded(codes::NOT_FOUND, messages::not_found(resource_type, identifier))
}

pub fn constraint_violation(operation: &str, error: impl std::fmt::Display) -> async_graphql::Error {
    coded(codes::CONSTRAINT_VIOLATION, messages::constraint_violation(operation, error))
}

/// Creates an error for an input field that failed validation
pub fn validation_failed(field: &str, reason: &str) -> async_graphql::Error {
    coded(codes::VALIDATION_FAILED, messages::validation_failed(field, reason))
}

/// Creates an error for invalid pagination parameters
pub fn invalid_pagination(reason: &str) -> async_graphql::Error {
    coded(codes::INVALID_PAGINATION, messages::invalid_pagination(reason))
}

pub fn invalid_cursor(cursor: &str) -> async_graphql::Error {
    coded(codes::INVALID_CURSOR, messages::invalid_cursor(cursor))
}

/// Creates an error for internal server errors
pub fn internal_error(context: &str, error: impl std::fmt::Display) -> async_graphql::Error {
    coded(codes::INTERNAL_ERROR, messages::internal_error(context, error))
}

/// Maps a database error of `operation` onto the GraphQL error codes
pub fn db_error(operation: &str, error: DbSqlError) -> async_graphql::Error {
    match error {
        DbSqlError::EntityNotFound { entity, id } => not_found(entity, id),
        e if e.is_constraint_violation() => constraint_violation(operation, e),
        e => {
            tracing::error!(operation, error = %e, "database operation failed");
            query_failed(operation, e)
        }
    }
}
