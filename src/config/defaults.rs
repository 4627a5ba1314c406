//! Default option values and the ambient process context they draw on.

use std::env;

use once_cell::sync::Lazy;

use super::options::Protocol;

/// Default GELF endpoint host.
pub const DEFAULT_HOST: &str = "localhost";
/// Default GELF endpoint port.
pub const DEFAULT_PORT: u16 = 12201;
/// Default adapter.
pub const DEFAULT_PROTOCOL: Protocol = Protocol::Udp;
/// Default TCP connection timeout in milliseconds.
pub const DEFAULT_TCP_TIMEOUT_MS: u64 = 4000;
/// Environment variable naming the deployment environment.
pub const ENVIRONMENT_VAR: &str = "APP_ENV";
/// Name used in synthesised messages when no application name is configured.
pub const DEFAULT_MESSAGE_SOURCE: &str = "GELF client";

const FALLBACK_SOURCE: &str = "localhost";

static CURRENT: Lazy<AmbientDefaults> = Lazy::new(AmbientDefaults::capture);

/// Process-derived defaults: the reported hostname and environment name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmbientDefaults {
    pub source: String,
    pub env: Option<String>,
}

impl AmbientDefaults {
    /// Construct explicit ambient defaults, mainly for tests and embedding.
    pub fn new(source: impl Into<String>, env: Option<String>) -> Self {
        Self {
            source: source.into(),
            env,
        }
    }

    /// Defaults captured once for the lifetime of the process.
    pub fn current() -> &'static AmbientDefaults {
        &CURRENT
    }

    /// Read the hostname and environment name from the running process.
    pub fn capture() -> Self {
        Self {
            source: local_hostname(),
            env: non_empty_var(ENVIRONMENT_VAR),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}

#[cfg(unix)]
fn local_hostname() -> String {
    match nix::unistd::gethostname() {
        Ok(name) => match name.into_string() {
            Ok(name) if !name.is_empty() => name,
            _ => {
                log::warn!("local hostname is empty or not UTF-8; using {FALLBACK_SOURCE}");
                FALLBACK_SOURCE.to_owned()
            }
        },
        Err(err) => {
            log::warn!("failed to read local hostname: {err}; using {FALLBACK_SOURCE}");
            FALLBACK_SOURCE.to_owned()
        }
    }
}

#[cfg(not(unix))]
fn local_hostname() -> String {
    non_empty_var("COMPUTERNAME")
        .or_else(|| non_empty_var("HOSTNAME"))
        .unwrap_or_else(|| FALLBACK_SOURCE.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serial_test::serial;

    #[rstest]
    fn captured_hostname_is_never_empty() {
        assert!(!AmbientDefaults::capture().source.is_empty());
    }

    #[rstest]
    #[serial]
    fn environment_comes_from_app_env() {
        // SAFETY: serialised with the other environment-mutating tests.
        unsafe { env::set_var(ENVIRONMENT_VAR, "staging") };
        assert_eq!(AmbientDefaults::capture().env.as_deref(), Some("staging"));
        unsafe { env::remove_var(ENVIRONMENT_VAR) };
    }

    #[rstest]
    #[serial]
    fn empty_environment_counts_as_unset() {
        // SAFETY: serialised with the other environment-mutating tests.
        unsafe { env::set_var(ENVIRONMENT_VAR, "") };
        assert_eq!(AmbientDefaults::capture().env, None);
        unsafe { env::remove_var(ENVIRONMENT_VAR) };
    }

    #[rstest]
    fn current_is_cached() {
        assert!(std::ptr::eq(AmbientDefaults::current(), AmbientDefaults::current()));
    }
}
