//! Domain errors
//!
//! Rule violations carry an already-localized message; the API layer maps
//! each variant to a status code.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("{message}")]
    DuplicateCode { code: String, message: String },

    #[error("{message}")]
    InvalidEmployeeCount { message: String },

    #[error("{message}")]
    NotFound { id: i64, message: String },

    #[error("{message}")]
    CannotUpdateDeleted { id: i64, message: String },

    #[error("{message}")]
    AlreadyDeleted { id: i64, message: String },

    #[error("{message}")]
    NotDeleted { id: i64, message: String },

    /// A unique constraint rejected the write.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::DuplicateCode { .. } => "DuplicateCode",
            DomainError::InvalidEmployeeCount { .. } => "InvalidEmployeeCount",
            DomainError::NotFound { .. } => "NotFound",
            DomainError::CannotUpdateDeleted { .. } => "CannotUpdateDeleted",
            DomainError::AlreadyDeleted { .. } => "AlreadyDeleted",
            DomainError::NotDeleted { .. } => "NotDeleted",
            DomainError::ConstraintViolation(_) => "ConstraintViolation",
            DomainError::DatabaseError(_) => "DatabaseError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_localized_message() {
        let err = DomainError::NotFound {
            id: 42,
            message: "Company not found: ID=42".to_string(),
        };
        assert_eq!(err.to_string(), "Company not found: ID=42");
        assert_eq!(err.kind(), "NotFound");
    }

    #[test]
    fn test_store_errors_keep_detail() {
        let err = DomainError::DatabaseError("connection refused".to_string());
        assert_eq!(err.to_string(), "Database error: connection refused");
        assert_eq!(err.kind(), "DatabaseError");
    }
}
