//! Transport configuration: sparse options in, resolved client settings out.
//!
//! [`TransportOptions`] mirrors what an embedding application supplies.
//! [`resolve`] merges it over the defaults exactly once per transport and
//! yields an immutable [`ResolvedConfig`] for the GELF client.

pub mod defaults;
mod options;
mod resolved;


pub use defaults::AmbientDefaults;
pub use options::{
    InvalidIpVersion, InvalidProtocol, IpVersion, Protocol, Transform, TransportOptions,
};
pub use resolved::{
    AdapterOptions, ResolvedConfig, StaticFields, UDP6, is_ipv6_literal, resolve, resolve_with,
};
