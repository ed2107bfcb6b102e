//! Error types for the Customer store.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CustomerError {
    #[error("Customer not found: {0}")]
    NotFound(String),

    #[error("Customer validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CustomerError {
    fn from(msg: String) -> Self {
        CustomerError::ActorCommunicationError(msg)
    }
}
