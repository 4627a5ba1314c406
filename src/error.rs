//! Error types surfaced by [`GelfTransport::log`](crate::GelfTransport::log).

use thiserror::Error;

use crate::client::SendError;

/// Failure raised by a user-supplied transform hook.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("transform hook failed: {message}")]
pub struct TransformError {
    message: String,
}

impl TransformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for TransformError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for TransformError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Errors that may occur while logging through the transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The transform hook rejected the message; nothing was sent.
    #[error(transparent)]
    Transform(#[from] TransformError),
    /// The client reported a failed send.
    #[error(transparent)]
    Send(#[from] SendError),
}
