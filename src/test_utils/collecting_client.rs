//! A client that records sends in memory for test assertions.
//!
//! Clones share state, so a test can keep one handle while the transport
//! owns another.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::client::{GelfClient, SendCallback, SendError};
use crate::config::ResolvedConfig;
use crate::normalise::Meta;

/// One recorded call to [`GelfClient::send`].
#[derive(Clone, Debug, PartialEq)]
pub struct SentMessage {
    pub message: String,
    pub severity: u8,
    pub meta: Option<Meta>,
}

/// How the client completes each send.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClientBehaviour {
    /// Report success immediately.
    #[default]
    Succeed,
    /// Report a rejection immediately.
    Fail,
    /// Drop the callback without invoking it.
    DropCallback,
    /// Hold the callback until [`CollectingClient::complete_pending`].
    Defer,
}

#[derive(Default)]
struct Shared {
    config: Mutex<Option<ResolvedConfig>>,
    sent: Mutex<Vec<SentMessage>>,
    behaviour: Mutex<ClientBehaviour>,
    pending: Mutex<Vec<SendCallback>>,
}

/// Client that stores every message it is asked to send.
#[derive(Clone, Default)]
pub struct CollectingClient {
    shared: Arc<Shared>,
}

impl CollectingClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behaviour(self, behaviour: ClientBehaviour) -> Self {
        self.set_behaviour(behaviour);
        self
    }

    pub fn set_behaviour(&self, behaviour: ClientBehaviour) {
        *self.shared.behaviour.lock() = behaviour;
    }

    /// Return a client factory that records the configuration it receives
    /// and yields a clone of this client.
    pub fn factory(&self) -> impl FnOnce(&ResolvedConfig) -> CollectingClient + use<> {
        let client = self.clone();
        move |config| {
            *client.shared.config.lock() = Some(config.clone());
            client
        }
    }

    /// Configuration passed to the factory, if it has run.
    pub fn config(&self) -> Option<ResolvedConfig> {
        self.shared.config.lock().clone()
    }

    /// Snapshot of all messages sent so far.
    pub fn sent(&self) -> Vec<SentMessage> {
        self.shared.sent.lock().clone()
    }

    pub fn pending(&self) -> usize {
        self.shared.pending.lock().len()
    }

    /// Complete every deferred send, returning how many were completed.
    pub fn complete_pending(&self, succeed: bool) -> usize {
        let callbacks: Vec<SendCallback> = self.shared.pending.lock().drain(..).collect();
        let count = callbacks.len();
        for done in callbacks {
            done(outcome(succeed));
        }
        count
    }
}

fn outcome(succeed: bool) -> Result<(), SendError> {
    if succeed {
        Ok(())
    } else {
        Err(SendError::Rejected("collecting client configured to fail".into()))
    }
}

impl GelfClient for CollectingClient {
    fn send(&self, message: String, severity: u8, meta: Option<Meta>, done: SendCallback) {
        self.shared.sent.lock().push(SentMessage {
            message,
            severity,
            meta,
        });
        let behaviour = *self.shared.behaviour.lock();
        match behaviour {
            ClientBehaviour::Succeed => done(outcome(true)),
            ClientBehaviour::Fail => done(outcome(false)),
            ClientBehaviour::DropCallback => drop(done),
            ClientBehaviour::Defer => self.shared.pending.lock().push(done),
        }
    }
}

impl fmt::Debug for CollectingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectingClient")
            .field("sent", &self.shared.sent.lock().len())
            .field("pending", &self.pending())
            .finish()
    }
}
