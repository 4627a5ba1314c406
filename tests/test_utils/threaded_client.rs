//! A client that completes sends from a background thread, the way a real
//! network client reports socket outcomes.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use gelf_transport::{GelfClient, Meta, ResolvedConfig, SendCallback, SendError};

/// One message observed by [`ThreadedClient`].
#[derive(Clone, Debug, PartialEq)]
pub struct Delivery {
    pub message: String,
    pub severity: u8,
    pub meta: Option<Meta>,
}

/// Client that records deliveries and acknowledges them after `delay`.
#[derive(Clone, Debug)]
pub struct ThreadedClient {
    pub config: ResolvedConfig,
    deliveries: Arc<Mutex<Vec<Delivery>>>,
    delay: Duration,
    fail: bool,
}

impl ThreadedClient {
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            config: config.clone(),
            deliveries: Arc::default(),
            delay: Duration::from_millis(5),
            fail: false,
        }
    }

    pub fn failing(config: &ResolvedConfig) -> Self {
        Self {
            fail: true,
            ..Self::new(config)
        }
    }

    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().clone()
    }
}

impl GelfClient for ThreadedClient {
    fn send(&self, message: String, severity: u8, meta: Option<Meta>, done: SendCallback) {
        self.deliveries.lock().push(Delivery {
            message,
            severity,
            meta,
        });
        let delay = self.delay;
        let fail = self.fail;
        thread::spawn(move || {
            thread::sleep(delay);
            if fail {
                done(Err(SendError::Rejected("endpoint unreachable".into())));
            } else {
                done(Ok(()));
            }
        });
    }
}
