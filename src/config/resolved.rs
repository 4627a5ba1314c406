//! Derivation of the fully-resolved client configuration.

use std::net::Ipv6Addr;
use std::time::Duration;

use serde::Serialize;

use super::defaults::{
    AmbientDefaults, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PROTOCOL, DEFAULT_TCP_TIMEOUT_MS,
};
use super::options::{IpVersion, Protocol, TransportOptions};

/// Socket protocol string the UDP adapter needs when running over IPv6.
pub const UDP6: &str = "udp6";

/// Fields attached to every outgoing message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    /// Reported source hostname.
    pub host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
}

/// Network settings handed to the client's adapter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AdapterOptions {
    pub host: String,
    pub port: u16,
    /// `Some(IpVersion::V6)` when the endpoint must be reached over IPv6.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<IpVersion>,
    /// [`UDP6`] for the UDP adapter over IPv6.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<&'static str>,
    #[serde(rename = "timeout", skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<Vec<String>>,
}

impl AdapterOptions {
    /// Connection timeout for the TCP adapters.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// Configuration handed to the GELF client once at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub fields: StaticFields,
    pub adapter_name: Protocol,
    pub adapter_options: AdapterOptions,
}

/// Resolve `options` against the process-wide ambient defaults.
pub fn resolve(options: &TransportOptions) -> ResolvedConfig {
    resolve_with(options, AmbientDefaults::current())
}

/// Resolve `options` against explicit ambient defaults.
///
/// Pure and total: every field has a default or a derivation, and anomalies
/// such as a certificate supplied for a plain TCP adapter are dropped rather
/// than rejected. A zero timeout or an empty certificate counts as unset.
pub fn resolve_with(options: &TransportOptions, ambient: &AmbientDefaults) -> ResolvedConfig {
    let host = options
        .host
        .clone()
        .unwrap_or_else(|| DEFAULT_HOST.to_owned());
    let adapter_name = options.protocol.unwrap_or(DEFAULT_PROTOCOL);
    let use_ipv6 = options.ip_version == Some(IpVersion::V6) || is_ipv6_literal(&host);

    let timeout_ms = adapter_name
        .is_tcp()
        .then(|| options.tcp_timeout_ms.unwrap_or(DEFAULT_TCP_TIMEOUT_MS))
        .filter(|ms| *ms != 0);

    let ca = match (adapter_name, options.ca_cert_pem.as_deref()) {
        (Protocol::TcpTls, Some(pem)) if !pem.is_empty() => Some(vec![pem.to_owned()]),
        _ => None,
    };

    let fields = StaticFields {
        app_name: options.app_name.clone(),
        environment: options.env.clone().or_else(|| ambient.env.clone()),
        host: options
            .source
            .clone()
            .unwrap_or_else(|| ambient.source.clone()),
        app_version: options.app_version.clone(),
    };

    let adapter_options = AdapterOptions {
        port: options.port.unwrap_or(DEFAULT_PORT),
        family: use_ipv6.then_some(IpVersion::V6),
        protocol: (use_ipv6 && adapter_name == Protocol::Udp).then_some(UDP6),
        timeout_ms,
        ca,
        host,
    };

    ResolvedConfig {
        fields,
        adapter_name,
        adapter_options,
    }
}

/// Syntax-only check for an IPv6 address literal, allowing a `%zone` suffix.
pub fn is_ipv6_literal(host: &str) -> bool {
    let address = match host.split_once('%') {
        Some((address, zone)) if !zone.is_empty() => address,
        Some(_) => return false,
        None => host,
    };
    address.parse::<Ipv6Addr>().is_ok()
}
