//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Recipient did not reduce to exactly 8 digits.
    #[error("invalid identifier: {0:?} is not an 8-digit local number")]
    InvalidIdentifier(String),

    /// Neither literal text nor a template was supplied. Rejected at the boundary.
    #[error("{0}")]
    MissingContent(String),

    /// Request shape is wrong: recipients supplied but not a non-empty list.
    #[error("{0}")]
    InvalidRequest(String),

    /// The transport refused or failed a send. Carries the collaborator's message.
    #[error("{0}")]
    DispatchFailed(String),

    /// Raw failure reported by the messaging gateway adapter.
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unauthorized")]
    Unauthorized,

    /// Session bootstrap or teardown failed.
    #[error("session error: {0}")]
    Session(String),
}
