//! GELF logging transport.
//!
//! Derives a complete client configuration from sparse
//! [`TransportOptions`], normalises variadic log calls into a message plus
//! metadata, and hands each one to a [`GelfClient`] that owns the wire
//! protocol.

pub mod client;
pub mod config;
pub mod error;
pub mod level;
#[cfg(feature = "log-compat")]
pub mod log_compat;
mod macros;
pub mod normalise;
pub mod rate_limited_warner;
pub mod transport;

#[cfg(any(test, feature = "test-util"))]
pub mod test_utils;

pub use client::{GelfClient, SendCallback, SendError};
pub use config::{
    AdapterOptions, AmbientDefaults, IpVersion, Protocol, ResolvedConfig, StaticFields,
    Transform, TransportOptions, resolve, resolve_with,
};
pub use error::{TransformError, TransportError};
pub use level::{GelfLevel, ParseLevelError};
#[cfg(feature = "log-compat")]
pub use log_compat::{GelfLogAdapter, install as install_log_bridge};
pub use normalise::{LogArg, LogCallNormaliser, Meta, NormalizedMessage};
pub use transport::GelfTransport;
