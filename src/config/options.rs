//! Sparse, caller-supplied transport options.
//!
//! Every field is optional; [`resolve`](super::resolve) fills the gaps with
//! defaults and derives the protocol-dependent settings.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::TransformError;
use crate::normalise::NormalizedMessage;

/// Network adapter used to reach the GELF endpoint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    #[default]
    #[serde(rename = "udp")]
    Udp,
    #[serde(rename = "tcp")]
    Tcp,
    #[serde(rename = "tcp-tls")]
    TcpTls,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Udp => "udp",
            Self::Tcp => "tcp",
            Self::TcpTls => "tcp-tls",
        }
    }

    /// Whether the adapter runs over a TCP connection.
    pub fn is_tcp(self) -> bool {
        matches!(self, Self::Tcp | Self::TcpTls)
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown GELF protocol: {0}")]
pub struct InvalidProtocol(String);

impl FromStr for Protocol {
    type Err = InvalidProtocol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "udp" => Ok(Self::Udp),
            "tcp" => Ok(Self::Tcp),
            "tcp-tls" => Ok(Self::TcpTls),
            _ => Err(InvalidProtocol(s.to_owned())),
        }
    }
}

/// IP version requested by the caller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum IpVersion {
    #[default]
    V4,
    V6,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("ip_version must be 4 or 6, got {0}")]
pub struct InvalidIpVersion(u8);

impl TryFrom<u8> for IpVersion {
    type Error = InvalidIpVersion;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::V4),
            6 => Ok(Self::V6),
            other => Err(InvalidIpVersion(other)),
        }
    }
}

impl From<IpVersion> for u8 {
    fn from(version: IpVersion) -> Self {
        match version {
            IpVersion::V4 => 4,
            IpVersion::V6 => 6,
        }
    }
}

type TransformFn =
    dyn Fn(NormalizedMessage) -> Result<NormalizedMessage, TransformError> + Send + Sync;

/// Hook that may rewrite a message and its metadata just before sending.
#[derive(Clone)]
pub struct Transform(Arc<TransformFn>);

impl Transform {
    pub fn new<F>(hook: F) -> Self
    where
        F: Fn(NormalizedMessage) -> Result<NormalizedMessage, TransformError>
            + Send
            + Sync
            + 'static,
    {
        Self(Arc::new(hook))
    }

    /// Invoke the hook on a normalised message.
    pub fn apply(&self, message: NormalizedMessage) -> Result<NormalizedMessage, TransformError> {
        (self.0)(message)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}

macro_rules! option_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

macro_rules! string_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: impl Into<String>) -> Self {
            self.$field = Some(value.into());
            self
        }
    };
}

/// Options accepted by [`GelfTransport`](crate::GelfTransport).
///
/// Absent fields fall back to the defaults documented in
/// [`defaults`](super::defaults). Deserialising from a configuration file
/// uses snake_case keys; the transform hook can only be set in code.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransportOptions {
    /// GELF or Graylog host (default: `localhost`).
    pub host: Option<String>,
    /// TCP or UDP port (default: 12201).
    pub port: Option<u16>,
    /// Adapter to use (default: UDP).
    pub protocol: Option<Protocol>,
    /// Set to 6 when the GELF host is only reachable over IPv6.
    pub ip_version: Option<IpVersion>,
    /// Connection timeout for the TCP adapters (default: 4000 ms).
    pub tcp_timeout_ms: Option<u64>,
    /// PEM certificate of the CA that issued the server certificate (TLS only).
    pub ca_cert_pem: Option<String>,
    /// Hostname reported in every message (default: the local hostname).
    pub source: Option<String>,
    pub app_name: Option<String>,
    pub app_version: Option<String>,
    /// Deployment environment (default: the `APP_ENV` variable).
    pub env: Option<String>,
    /// Threshold exposed to front-ends for caller-side filtering.
    pub minimum_severity: Option<u8>,
    #[serde(skip)]
    pub transform: Option<Transform>,
}

impl TransportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    string_setter!(with_host, host);
    option_setter!(with_port, port, u16);
    option_setter!(with_protocol, protocol, Protocol);
    option_setter!(with_ip_version, ip_version, IpVersion);
    option_setter!(
        #[doc = "Set the TCP connection timeout in milliseconds."]
        with_tcp_timeout_ms,
        tcp_timeout_ms,
        u64
    );
    string_setter!(with_ca_cert_pem, ca_cert_pem);
    string_setter!(with_source, source);
    string_setter!(with_app_name, app_name);
    string_setter!(with_app_version, app_version);
    string_setter!(with_env, env);
    option_setter!(with_minimum_severity, minimum_severity, u8);

    /// Install a transform hook run on every message before it is sent.
    pub fn with_transform<F>(mut self, hook: F) -> Self
    where
        F: Fn(NormalizedMessage) -> Result<NormalizedMessage, TransformError>
            + Send
            + Sync
            + 'static,
    {
        self.transform = Some(Transform::new(hook));
        self
    }
}
