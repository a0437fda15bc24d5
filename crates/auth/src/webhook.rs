//! Request-level contract for identity-provider webhooks.
//!
//! Pipeline: signature gate → body parse → role decision. The signature gate
//! runs only when a secret is configured; with a secret, nothing in the body
//! is looked at until the signature has been accepted.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, warn};

use sitegate_core::{Role, TrustedDomain};

use crate::{IdentityPayload, RoleDecision, RoleDecisionEngine, WebhookSecret, signature};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WebhookError {
    #[error("webhook signature missing or invalid")]
    InvalidSignature,

    #[error("malformed identity payload: {0}")]
    MalformedPayload(String),

    #[error("user is not authorized for the gating role")]
    Unauthorized,
}

/// One inbound webhook delivery, exactly as received.
#[derive(Debug, Clone, Copy)]
pub struct WebhookEvent<'a> {
    /// Value of the signature header, if the request carried one.
    pub signature: Option<&'a str>,
    pub body: &'a [u8],
}

impl<'a> WebhookEvent<'a> {
    pub fn new(signature: Option<&'a str>, body: &'a [u8]) -> Self {
        Self { signature, body }
    }
}

/// Metadata the identity provider should persist after a grant.
///
/// Serializes to `{ "app_metadata": {..., "roles": [...]}, "user_metadata": ... }`;
/// `user_metadata` is omitted when the user had none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataUpdate {
    pub app_metadata: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_metadata: Option<Value>,
}

impl MetadataUpdate {
    fn granting(payload: &IdentityPayload, roles: &[Role]) -> Self {
        let mut app_metadata = payload.app_metadata().clone();
        app_metadata.insert(
            "roles".to_string(),
            Value::Array(
                roles
                    .iter()
                    .map(|r| Value::String(r.as_str().to_string()))
                    .collect(),
            ),
        );

        Self {
            app_metadata,
            user_metadata: payload.user_metadata().cloned(),
        }
    }

    pub fn roles(&self) -> Vec<&str> {
        self.app_metadata
            .get("roles")
            .and_then(Value::as_array)
            .map(|roles| roles.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Successful webhook outcomes.
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookOutcome {
    /// The user already holds the role; respond with an empty success.
    Allowed,

    /// The role was granted; respond with the metadata to persist.
    Granted(MetadataUpdate),
}

/// Explicit configuration for [`WebhookHandler`].
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    secret: Option<WebhookSecret>,
    gating_role: Role,
    trusted_domain: TrustedDomain,
}

impl WebhookConfig {
    /// Configuration without a shared secret, gating on the default role.
    ///
    /// Without a secret every delivery is trusted as-is. Deployments that can
    /// receive requests from anywhere must call [`WebhookConfig::with_secret`].
    pub fn new(trusted_domain: TrustedDomain) -> Self {
        Self {
            secret: None,
            gating_role: Role::default(),
            trusted_domain,
        }
    }

    pub fn with_secret(self, secret: WebhookSecret) -> Self {
        Self {
            secret: Some(secret),
            ..self
        }
    }

    pub fn with_gating_role(self, gating_role: Role) -> Self {
        Self {
            gating_role,
            ..self
        }
    }

    pub fn secret(&self) -> Option<&WebhookSecret> {
        self.secret.as_ref()
    }

    pub fn gating_role(&self) -> &Role {
        &self.gating_role
    }

    pub fn trusted_domain(&self) -> &TrustedDomain {
        &self.trusted_domain
    }

    pub fn verifies_signatures(&self) -> bool {
        self.secret.is_some()
    }
}

/// Stateless webhook handler; share it behind an `Arc`.
#[derive(Debug, Clone)]
pub struct WebhookHandler {
    secret: Option<WebhookSecret>,
    engine: RoleDecisionEngine,
}

impl WebhookHandler {
    pub fn new(config: WebhookConfig) -> Self {
        Self {
            secret: config.secret,
            engine: RoleDecisionEngine::new(config.gating_role, config.trusted_domain),
        }
    }

    pub fn handle(&self, event: &WebhookEvent<'_>) -> Result<WebhookOutcome, WebhookError> {
        self.check_signature(event.signature)?;

        let payload = IdentityPayload::from_json(event.body).map_err(|e| {
            debug!(error = %e, "identity payload rejected");
            WebhookError::MalformedPayload(e.to_string())
        })?;

        match self.engine.decide(&payload) {
            RoleDecision::Allow => {
                debug!(role = %self.engine.gating_role(), "user already holds role");
                Ok(WebhookOutcome::Allowed)
            }
            RoleDecision::Grant(roles) => {
                let update = MetadataUpdate::granting(&payload, &roles);
                info!(
                    role = %self.engine.gating_role(),
                    roles = ?update.roles(),
                    "assigning role to trusted-domain user"
                );
                Ok(WebhookOutcome::Granted(update))
            }
            RoleDecision::Deny => {
                info!(
                    domain = %self.engine.trusted_domain(),
                    "user is not part of trusted domain"
                );
                Err(WebhookError::Unauthorized)
            }
        }
    }

    fn check_signature(&self, signature: Option<&str>) -> Result<(), WebhookError> {
        let Some(secret) = &self.secret else {
            return Ok(());
        };

        let Some(token) = signature else {
            warn!("webhook signature missing");
            return Err(WebhookError::InvalidSignature);
        };

        if !signature::verify(token, secret) {
            warn!(len = token.len(), "webhook signature invalid");
            return Err(WebhookError::InvalidSignature);
        }

        Ok(())
    }
}
