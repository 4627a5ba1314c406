//! The GELF transport exposed to logging front-ends.
//!
//! [`GelfTransport`] resolves its options once, builds the client from the
//! resulting [`ResolvedConfig`], and then turns each log call into a single
//! client send. Nothing is queued or reordered here: concurrent calls reach
//! the client in whatever order they are made.


use std::fmt;
use std::sync::Arc;

use futures_util::future::{self, BoxFuture, FutureExt};
use log::{debug, trace};
use tokio::sync::oneshot;

use crate::client::{GelfClient, SendCallback, SendError};
use crate::config::{AmbientDefaults, ResolvedConfig, TransportOptions, resolve_with};
use crate::error::{TransformError, TransportError};
use crate::normalise::{LogArg, LogCallNormaliser, NormalizedMessage};

/// Forwards log calls to a GELF client.
pub struct GelfTransport<C> {
    client: Arc<C>,
    config: Arc<ResolvedConfig>,
    normaliser: LogCallNormaliser,
    minimum_severity: Option<u8>,
}

impl<C: GelfClient> GelfTransport<C> {
    /// Construct a transport, resolving `options` against the process
    /// defaults and handing the result to `build_client`.
    pub fn new<F>(options: TransportOptions, build_client: F) -> Self
    where
        F: FnOnce(&ResolvedConfig) -> C,
    {
        Self::with_ambient(options, AmbientDefaults::current(), build_client)
    }

    /// Construct a transport using explicit ambient defaults.
    pub fn with_ambient<F>(
        options: TransportOptions,
        ambient: &AmbientDefaults,
        build_client: F,
    ) -> Self
    where
        F: FnOnce(&ResolvedConfig) -> C,
    {
        let config = resolve_with(&options, ambient);
        debug!(
            "GelfTransport configured: adapter={} host={} port={} family={:?}",
            config.adapter_name,
            config.adapter_options.host,
            config.adapter_options.port,
            config.adapter_options.family,
        );
        let client = build_client(&config);
        let TransportOptions {
            app_name,
            minimum_severity,
            transform,
            ..
        } = options;
        Self {
            client: Arc::new(client),
            config: Arc::new(config),
            normaliser: LogCallNormaliser::new(app_name, transform),
            minimum_severity,
        }
    }

    /// Configuration the client was built with.
    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Threshold front-ends consult before calling [`log`](Self::log).
    ///
    /// The transport itself never filters on it.
    pub fn minimum_severity(&self) -> Option<u8> {
        self.minimum_severity
    }

    /// Normalise a log call and hand it to the client with `done` as the
    /// completion callback.
    ///
    /// Returns `Ok(false)` when the call is empty; `done` is then dropped
    /// without being invoked and the client is not contacted.
    pub fn dispatch(
        &self,
        severity: impl Into<u8>,
        args: Vec<LogArg>,
        done: SendCallback,
    ) -> Result<bool, TransformError> {
        let severity = severity.into();
        let Some(NormalizedMessage { message, meta }) = self.normaliser.normalise(args)? else {
            trace!("GelfTransport skipped an empty log call");
            return Ok(false);
        };
        self.client.send(message, severity, meta, done);
        Ok(true)
    }

    /// Log one call.
    ///
    /// Normalisation, the transform hook, and the client send all happen
    /// before this method returns; the future only waits for the client's
    /// completion callback. Empty calls resolve to `Ok(())` immediately.
    pub fn log(
        &self,
        severity: impl Into<u8>,
        args: Vec<LogArg>,
    ) -> BoxFuture<'static, Result<(), TransportError>> {
        let (tx, rx) = oneshot::channel();
        let done: SendCallback = Box::new(move |result| {
            let _ = tx.send(result);
        });
        match self.dispatch(severity, args, done) {
            Err(err) => future::ready(Err(TransportError::from(err))).boxed(),
            Ok(false) => future::ready(Ok(())).boxed(),
            Ok(true) => async move {
                match rx.await {
                    Ok(result) => result.map_err(TransportError::from),
                    Err(_) => Err(SendError::CallbackDropped.into()),
                }
            }
            .boxed(),
        }
    }
}

impl<C> Clone for GelfTransport<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            config: Arc::clone(&self.config),
            normaliser: self.normaliser.clone(),
            minimum_severity: self.minimum_severity,
        }
    }
}

impl<C> fmt::Debug for GelfTransport<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GelfTransport")
            .field("config", &self.config)
            .field("minimum_severity", &self.minimum_severity)
            .finish()
    }
}
