//! Identity payload carried in the body of an identity-provider webhook.
//!
//! Wire shape:
//!
//! ```json
//! { "user": { "email": "...", "user_metadata": {...}, "app_metadata": { "roles": [...] } } }
//! ```
//!
//! Only `user.email` is required. `app_metadata` fields other than `roles`
//! are kept verbatim so a role grant can hand them back unchanged.

use serde::Deserialize;
use serde_json::{Map, Value};

use sitegate_core::Role;

// Maps rather than structs: derived struct impls also accept sequences, and
// the body and `user` must both be JSON objects.
#[derive(Debug, Deserialize)]
struct WebhookBody {
    user: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    email: String,
    #[serde(default)]
    user_metadata: Option<Value>,
    #[serde(default)]
    app_metadata: Option<AppMetadataRecord>,
}

#[derive(Debug, Deserialize)]
struct AppMetadataRecord {
    #[serde(default)]
    roles: Option<Vec<Role>>,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

/// A user's identity as reported by a verified webhook.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityPayload {
    email: String,
    roles: Vec<Role>,
    app_metadata: Map<String, Value>,
    user_metadata: Option<Value>,
}

impl IdentityPayload {
    pub fn new(email: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            email: email.into(),
            roles,
            app_metadata: Map::new(),
            user_metadata: None,
        }
    }

    /// Extra `app_metadata` fields. A `roles` key here is ignored in favor of
    /// the typed role list.
    pub fn with_app_metadata(self, mut app_metadata: Map<String, Value>) -> Self {
        app_metadata.remove("roles");
        Self {
            app_metadata,
            ..self
        }
    }

    pub fn with_user_metadata(self, user_metadata: Value) -> Self {
        Self {
            user_metadata: Some(user_metadata),
            ..self
        }
    }

    /// Parse a webhook body. Must only be called on a body whose signature
    /// has already been checked (or when verification is disabled).
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        let body: Map<String, Value> = serde_json::from_slice(body)?;
        let WebhookBody { user } = serde_json::from_value(Value::Object(body))?;
        let user: UserRecord = serde_json::from_value(Value::Object(user))?;

        let (roles, app_metadata) = match user.app_metadata {
            Some(AppMetadataRecord { roles, rest }) => (roles.unwrap_or_default(), rest),
            None => (Vec::new(), Map::new()),
        };

        Ok(Self {
            email: user.email,
            roles,
            app_metadata,
            user_metadata: user.user_metadata,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn has_role(&self, role: &Role) -> bool {
        self.roles.contains(role)
    }

    /// `app_metadata` without its `roles` entry.
    pub fn app_metadata(&self) -> &Map<String, Value> {
        &self.app_metadata
    }

    pub fn user_metadata(&self) -> Option<&Value> {
        self.user_metadata.as_ref()
    }
}
