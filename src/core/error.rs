//! Core Error Types
//!
//! Error taxonomy shared by every link of the service chain.

use thiserror::Error;

/// Core module result type
pub type CoreResult<T> = Result<T, CoreError>;

/// Core error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The namespace has never been written to
    #[error("kind '{kind}' in group '{group}' not found")]
    NamespaceNotFound { group: String, kind: String },

    /// The id is absent from an existing namespace
    #[error("item with id '{id}' not found")]
    ItemNotFound { id: String },

    /// The id is already taken in the namespace
    #[error("item with id '{id}' already exists")]
    ItemExists { id: String },

    /// The item is unusable as given (missing or mismatched id)
    #[error("invalid item: {0}")]
    InvalidItem(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Create a namespace not found error from an encoded namespace key
    pub fn namespace_not_found(key: &str) -> Self {
        let (group, kind) = super::namespace::decode(key);
        Self::NamespaceNotFound { group, kind }
    }

    /// Create an item not found error
    pub fn item_not_found(id: impl Into<String>) -> Self {
        Self::ItemNotFound { id: id.into() }
    }

    /// Create an item exists error
    pub fn item_exists(id: impl Into<String>) -> Self {
        Self::ItemExists { id: id.into() }
    }

    /// Create an invalid item error
    pub fn invalid_item(msg: impl Into<String>) -> Self {
        Self::InvalidItem(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get error code for API responses and logs
    pub fn code(&self) -> &'static str {
        match self {
            Self::NamespaceNotFound { .. } => "NAMESPACE_NOT_FOUND",
            Self::ItemNotFound { .. } => "ITEM_NOT_FOUND",
            Self::ItemExists { .. } => "ITEM_EXISTS",
            Self::InvalidItem(_) => "INVALID_ITEM",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Expected, caller-recoverable conditions (everything but internal faults)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}
