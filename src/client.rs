//! The send seam towards the GELF network client.
//!
//! Wire encoding, socket management and retries live behind [`GelfClient`].
//! The transport only shapes requests and awaits the client's completion
//! callback.

use std::io;
use std::sync::Arc;

use thiserror::Error;

use crate::normalise::Meta;

/// Completion callback handed to [`GelfClient::send`].
///
/// Clients call it at most once. Dropping it uninvoked is reported to the
/// awaiting caller as [`SendError::CallbackDropped`].
pub type SendCallback = Box<dyn FnOnce(Result<(), SendError>) + Send + 'static>;

/// Failure reported by a GELF client.
#[derive(Debug, Error)]
pub enum SendError {
    /// The client refused or failed to deliver the message.
    #[error("GELF client rejected message: {0}")]
    Rejected(String),
    /// Underlying socket error.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// The client dropped the completion callback without reporting.
    #[error("GELF client dropped the completion callback")]
    CallbackDropped,
}

/// Network client configured once and then used for every send.
///
/// Implementations must tolerate concurrent calls; the transport performs no
/// locking or sequencing of its own.
pub trait GelfClient: Send + Sync {
    /// Deliver one message and report the outcome through `done`.
    fn send(&self, message: String, severity: u8, meta: Option<Meta>, done: SendCallback);
}

impl<C: GelfClient + ?Sized> GelfClient for Arc<C> {
    fn send(&self, message: String, severity: u8, meta: Option<Meta>, done: SendCallback) {
        (**self).send(message, severity, meta, done);
    }
}

impl<C: GelfClient + ?Sized> GelfClient for Box<C> {
    fn send(&self, message: String, severity: u8, meta: Option<Meta>, done: SendCallback) {
        (**self).send(message, severity, meta, done);
    }
}
