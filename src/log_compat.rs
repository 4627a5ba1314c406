//! Compatibility bridge for the Rust `log` crate.
//!
//! `GelfLogAdapter` implements `log::Log` on top of a [`GelfTransport`], so
//! applications using the `log` macros can ship records to a GELF endpoint.
//! The adapter plays the front-end role: it consults the transport's minimum
//! severity before dispatching, and it never reports its own delivery
//! problems through `log`.

use std::sync::Arc;

use log::{Log, Metadata, Record, kv};
use serde_json::{Map, Value};

use crate::client::{GelfClient, SendCallback};
use crate::level::GelfLevel;
use crate::normalise::LogArg;
use crate::rate_limited_warner::RateLimitedWarner;
use crate::transport::GelfTransport;

const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Map a `log` level onto the syslog severities GELF uses.
pub fn map_log_level(level: log::Level) -> GelfLevel {
    match level {
        log::Level::Error => GelfLevel::Error,
        log::Level::Warn => GelfLevel::Warning,
        log::Level::Info => GelfLevel::Informational,
        log::Level::Debug | log::Level::Trace => GelfLevel::Debug,
    }
}

impl From<log::Level> for GelfLevel {
    fn from(level: log::Level) -> Self {
        map_log_level(level)
    }
}

fn is_internal_target(target: &str) -> bool {
    target
        .strip_prefix(CRATE_TARGET)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

struct KeyValueCollector<'a>(&'a mut Map<String, Value>);

impl<'kvs> kv::VisitSource<'kvs> for KeyValueCollector<'_> {
    fn visit_pair(&mut self, key: kv::Key<'kvs>, value: kv::Value<'kvs>) -> Result<(), kv::Error> {
        self.0.insert(key.as_str().to_owned(), kv_to_json(&value));
        Ok(())
    }
}

fn kv_to_json(value: &kv::Value<'_>) -> Value {
    if let Some(flag) = value.to_bool() {
        Value::Bool(flag)
    } else if let Some(number) = value.to_i64() {
        Value::from(number)
    } else if let Some(number) = value.to_u64() {
        Value::from(number)
    } else if let Some(number) = value.to_f64() {
        Value::from(number)
    } else if let Some(text) = value.to_borrowed_str() {
        Value::String(text.to_owned())
    } else {
        Value::String(value.to_string())
    }
}

/// Build the argument list for a `log` record: the formatted message
/// followed by one structured map of source location and key-values.
fn record_args(record: &Record<'_>) -> Vec<LogArg> {
    let message = match record.args().as_str() {
        Some(text) => text.to_owned(),
        None => record.args().to_string(),
    };

    let mut fields = Map::new();
    fields.insert("target".into(), Value::String(record.target().to_owned()));
    if let Some(module_path) = record.module_path() {
        fields.insert("module_path".into(), Value::String(module_path.to_owned()));
    }
    if let Some(file) = record.file() {
        fields.insert("file".into(), Value::String(file.to_owned()));
    }
    if let Some(line) = record.line() {
        fields.insert("line".into(), Value::from(line));
    }
    let _ = record
        .key_values()
        .visit(&mut KeyValueCollector(&mut fields));

    vec![LogArg::from(message), LogArg::from(fields)]
}

/// Adapter implementing the Rust `log::Log` trait over a GELF transport.
#[derive(Debug)]
pub struct GelfLogAdapter<C> {
    transport: GelfTransport<C>,
    warner: Arc<RateLimitedWarner>,
}

impl<C: GelfClient> GelfLogAdapter<C> {
    pub fn new(transport: GelfTransport<C>) -> Self {
        Self::with_warner(transport, RateLimitedWarner::default())
    }

    /// Construct an adapter reporting delivery failures through `warner`.
    pub fn with_warner(transport: GelfTransport<C>, warner: RateLimitedWarner) -> Self {
        Self {
            transport,
            warner: Arc::new(warner),
        }
    }

    pub fn transport(&self) -> &GelfTransport<C> {
        &self.transport
    }

    /// Records dropped since the last warning.
    pub fn dropped(&self) -> u64 {
        self.warner.dropped()
    }

    /// Whether `level` is at least as severe as the transport's threshold.
    pub fn passes_threshold(&self, level: GelfLevel) -> bool {
        self.transport
            .minimum_severity()
            .is_none_or(|minimum| level.severity() <= minimum)
    }
}

impl<C: GelfClient> Log for GelfLogAdapter<C> {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        !is_internal_target(metadata.target())
            && self.passes_threshold(map_log_level(metadata.level()))
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let warner = Arc::clone(&self.warner);
        let done: SendCallback = Box::new(move |result| {
            if let Err(err) = result {
                warner.record_drop();
                warner.warn_if_due(|count| {
                    eprintln!("gelf_transport: {count} log records not delivered; last error: {err}");
                });
            }
        });

        let level = map_log_level(record.level());
        if let Err(err) = self.transport.dispatch(level, record_args(record), done) {
            self.warner.record_drop();
            self.warner.warn_if_due(|count| {
                eprintln!("gelf_transport: transform hook failed: {err}; dropped {count} records");
            });
        }
    }

    fn flush(&self) {
        self.warner.flush(|count| {
            eprintln!("gelf_transport: {count} log records not delivered");
        });
    }
}

/// Install a GELF transport as the global `log` logger.
///
/// Fails when another global logger is already registered.
pub fn install<C>(
    transport: GelfTransport<C>,
    max_level: log::LevelFilter,
) -> Result<(), log::SetLoggerError>
where
    C: GelfClient + 'static,
{
    log::set_boxed_logger(Box::new(GelfLogAdapter::new(transport)))?;
    log::set_max_level(max_level);
    Ok(())
}
