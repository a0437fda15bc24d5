//! Redirect rules as declared in the host's site configuration.
//!
//! Field names follow the host's `[[redirects]]` schema exactly: `from`, `to`,
//! `conditions`, `status`, `force`. Fields this crate does not model (`query`,
//! `headers`, `signed`, ...) are carried through untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Role;

/// Condition attribute that restricts a rule to users holding a role.
pub const ROLE_CONDITION: &str = "Role";

/// Attribute conditions attached to a rule, e.g. `Role`, `Country`, `Language`.
///
/// Every attribute maps to the set of values that satisfy it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RedirectConditions(BTreeMap<String, Vec<String>>);

impl RedirectConditions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Conditions requiring exactly `role`.
    pub fn role(role: &Role) -> Self {
        Self::new().with_role(role)
    }

    /// Returns a copy whose `Role` condition is exactly `role`; other
    /// attributes are kept.
    pub fn with_role(&self, role: &Role) -> Self {
        self.with(ROLE_CONDITION, [role.as_str()])
    }

    /// Returns a copy with `attribute` set to `values`.
    pub fn with<I, S>(&self, attribute: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next = self.0.clone();
        next.insert(attribute.into(), values.into_iter().map(Into::into).collect());
        Self(next)
    }

    pub fn get(&self, attribute: &str) -> Option<&[String]> {
        self.0.get(attribute).map(Vec::as_slice)
    }

    pub fn roles(&self) -> Option<&[String]> {
        self.get(ROLE_CONDITION)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One `[[redirects]]` entry.
///
/// Values are immutable: the `with_*` methods and [`RedirectRule::gated`]
/// build new rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectRule {
    from: String,
    to: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    conditions: Option<RedirectConditions>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<u16>,

    #[serde(default, skip_serializing_if = "is_false")]
    force: bool,

    /// Host-specific fields passed through verbatim.
    #[serde(flatten)]
    extra: BTreeMap<String, Value>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl RedirectRule {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            conditions: None,
            status: None,
            force: false,
            extra: BTreeMap::new(),
        }
    }

    pub fn with_status(self, status: u16) -> Self {
        Self {
            status: Some(status),
            ..self
        }
    }

    pub fn with_force(self, force: bool) -> Self {
        Self { force, ..self }
    }

    pub fn with_conditions(self, conditions: RedirectConditions) -> Self {
        Self {
            conditions: Some(conditions),
            ..self
        }
    }

    pub fn with_extra(self, key: impl Into<String>, value: Value) -> Self {
        let mut extra = self.extra;
        extra.insert(key.into(), value);
        Self { extra, ..self }
    }

    /// Copy of this rule that only applies to users holding `role`.
    ///
    /// An existing `Role` condition is replaced, never widened; all other
    /// fields are copied as-is.
    pub fn gated(&self, role: &Role) -> Self {
        let conditions = match &self.conditions {
            Some(existing) => existing.with_role(role),
            None => RedirectConditions::role(role),
        };

        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            conditions: Some(conditions),
            status: self.status,
            force: self.force,
            extra: self.extra.clone(),
        }
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn conditions(&self) -> Option<&RedirectConditions> {
        self.conditions.as_ref()
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn force(&self) -> bool {
        self.force
    }

    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    /// True when the rule only applies to users holding `role`.
    pub fn is_gated_on(&self, role: &Role) -> bool {
        self.conditions
            .as_ref()
            .and_then(RedirectConditions::roles)
            .is_some_and(|roles| roles.iter().any(|r| r == role.as_str()))
    }
}
