//! Normalisation of variadic log calls.
//!
//! A log call arrives as an ordered list of [`LogArg`] values. The
//! [`LogCallNormaliser`] turns it into a [`NormalizedMessage`]: a message
//! string plus optional [`Meta`]. Rules, in order:
//!
//! 1. An empty call is skipped.
//! 2. A leading string argument is the message; otherwise a message naming
//!    the application is synthesised.
//! 3. No trailing arguments gives no metadata, one structured argument is the
//!    metadata, one primitive is wrapped as `{"meta": value}`, and several
//!    arguments are kept as an ordered list.
//! 4. The transform hook, when configured, replaces the result.

mod arg;


use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::{Transform, defaults::DEFAULT_MESSAGE_SOURCE};
use crate::error::TransformError;

pub use arg::{LogArg, Meta};

/// Key used to wrap a lone primitive metadata argument.
pub const WRAPPED_META_KEY: &str = "meta";

/// A message ready for the GELF client.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NormalizedMessage {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl NormalizedMessage {
    pub fn new(message: impl Into<String>, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            meta,
        }
    }
}

/// Message used when a log call does not start with a string.
pub fn default_message(app_name: Option<&str>) -> String {
    format!("message from {}", app_name.unwrap_or(DEFAULT_MESSAGE_SOURCE))
}

/// Classify the arguments left after message extraction.
pub fn classify_meta(mut rest: Vec<LogArg>) -> Option<Meta> {
    match rest.len() {
        0 => None,
        1 => rest.pop().map(|arg| match arg {
            LogArg::Structured(value) => Meta::Value(value),
            LogArg::Primitive(value) => {
                let mut wrapped = Map::with_capacity(1);
                wrapped.insert(WRAPPED_META_KEY.to_owned(), value);
                Meta::Value(Value::Object(wrapped))
            }
        }),
        _ => Some(Meta::List(rest.into_iter().map(LogArg::into_value).collect())),
    }
}

/// Turns log-call argument lists into [`NormalizedMessage`] values.
#[derive(Clone, Debug, Default)]
pub struct LogCallNormaliser {
    app_name: Option<String>,
    transform: Option<Transform>,
}

impl LogCallNormaliser {
    pub fn new(app_name: Option<String>, transform: Option<Transform>) -> Self {
        Self {
            app_name,
            transform,
        }
    }

    /// Normalise one log call.
    ///
    /// Returns `Ok(None)` for an empty call. Errors only come from the
    /// transform hook.
    pub fn normalise(
        &self,
        args: Vec<LogArg>,
    ) -> Result<Option<NormalizedMessage>, TransformError> {
        if args.is_empty() {
            return Ok(None);
        }

        let mut args = args.into_iter().peekable();
        let message = match args.next_if(|arg| arg.as_message().is_some()) {
            Some(LogArg::Primitive(Value::String(text))) => text,
            _ => default_message(self.app_name.as_deref()),
        };
        let normalized = NormalizedMessage {
            message,
            meta: classify_meta(args.collect()),
        };

        match &self.transform {
            Some(transform) => transform.apply(normalized).map(Some),
            None => Ok(Some(normalized)),
        }
    }
}
