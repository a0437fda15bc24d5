//! Runtime configuration, read from the process environment once at startup
//! and passed down explicitly.

use std::net::SocketAddr;

use thiserror::Error;

use sitegate_auth::{WebhookConfig, WebhookSecret};
use sitegate_core::{DomainError, Role, TrustedDomain};

/// Shared secret used to verify `x-webhook-signature`. Presence enables checks.
pub const SECRET_VAR: &str = "WEBHOOK_SECRET";
pub const TRUSTED_DOMAIN_VAR: &str = "SITEGATE_TRUSTED_DOMAIN";
pub const ROLE_VAR: &str = "SITEGATE_ROLE";
pub const BIND_VAR: &str = "SITEGATE_BIND";

pub const DEFAULT_TRUSTED_DOMAIN: &str = "@ghost.org";
pub const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} is invalid: {source}")]
    Invalid {
        var: &'static str,
        #[source]
        source: DomainError,
    },

    #[error("{var} is not a socket address: '{value}'")]
    InvalidBind {
        var: &'static str,
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    pub webhook: WebhookConfig,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from any variable source.
    ///
    /// A secret that is set but empty still counts as configured.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let trusted_domain = lookup(TRUSTED_DOMAIN_VAR)
            .unwrap_or_else(|| DEFAULT_TRUSTED_DOMAIN.to_string());
        let trusted_domain = TrustedDomain::new(&trusted_domain).map_err(|source| {
            ConfigError::Invalid {
                var: TRUSTED_DOMAIN_VAR,
                source,
            }
        })?;

        let mut webhook = WebhookConfig::new(trusted_domain);

        if let Some(role) = lookup(ROLE_VAR) {
            let role = Role::parse(role).map_err(|source| ConfigError::Invalid {
                var: ROLE_VAR,
                source,
            })?;
            webhook = webhook.with_gating_role(role);
        }

        if let Some(secret) = lookup(SECRET_VAR) {
            webhook = webhook.with_secret(WebhookSecret::from(secret));
        }

        let bind = lookup(BIND_VAR).unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind.parse::<SocketAddr>().map_err(|source| ConfigError::InvalidBind {
            var: BIND_VAR,
            value: bind.clone(),
            source,
        })?;

        Ok(Self { bind, webhook })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_any_variables() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.bind, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert!(!config.webhook.verifies_signatures());
        assert_eq!(config.webhook.gating_role(), &Role::GHOST);
        assert_eq!(config.webhook.trusted_domain().as_str(), "@ghost.org");
    }

    #[test]
    fn secret_presence_enables_verification() {
        let config = ApiConfig::from_lookup(lookup(&[(SECRET_VAR, "s3cr3t")])).unwrap();
        assert!(config.webhook.verifies_signatures());

        let empty = ApiConfig::from_lookup(lookup(&[(SECRET_VAR, "")])).unwrap();
        assert!(empty.webhook.verifies_signatures());
    }

    #[test]
    fn reads_role_domain_and_bind() {
        let config = ApiConfig::from_lookup(lookup(&[
            (ROLE_VAR, "staff"),
            (TRUSTED_DOMAIN_VAR, "org.example"),
            (BIND_VAR, "127.0.0.1:9000"),
        ]))
        .unwrap();

        assert_eq!(config.webhook.gating_role(), &Role::new("staff"));
        assert_eq!(config.webhook.trusted_domain().as_str(), "@org.example");
        assert_eq!(config.bind.port(), 9000);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[(ROLE_VAR, "")])),
            Err(ConfigError::Invalid { var: ROLE_VAR, .. })
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[(TRUSTED_DOMAIN_VAR, "a@b@c")])),
            Err(ConfigError::Invalid {
                var: TRUSTED_DOMAIN_VAR,
                ..
            })
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[(BIND_VAR, "localhost")])),
            Err(ConfigError::InvalidBind { .. })
        ));
    }
}
