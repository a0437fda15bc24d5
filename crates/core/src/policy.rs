//! Gated redirect policy synthesis.
//!
//! The host router evaluates redirect rules top to bottom and the first match
//! wins, so output order is part of the contract:
//!
//! 1. every site rule, in its original order, gated on the role;
//! 2. `/*` → `/:splat` for role holders (404 unless a file exists there);
//! 3. `/` → login page with 401 for everyone else;
//! 4. `/*` → login page with 401 for everyone else.
//!
//! The login page is answered with 401 rather than a redirect status so that
//! browser-side identity widgets can react to the status code.
//!
//! Synthesis is not idempotent. Running it over its own output gates the three
//! bootstrap rules and appends three more, so the build step must feed it the
//! site's original, ungated rules exactly once.

use crate::{RedirectConditions, RedirectRule, Role};

/// Path of the login page served to users without the gating role.
pub const LOGIN_PATH: &str = "/_sso-login";

/// Builds the role-gated redirect policy for a site.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectRuleGenerator {
    role: Role,
}

impl RedirectRuleGenerator {
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    /// Gate `existing` and append the bootstrap rules.
    ///
    /// Always returns `existing.len() + 3` rules.
    pub fn generate(&self, existing: &[RedirectRule]) -> Vec<RedirectRule> {
        tracing::debug!(
            rules = existing.len(),
            role = %self.role,
            "generating gated redirect policy"
        );

        let mut rules = Vec::with_capacity(existing.len() + 3);
        rules.extend(existing.iter().map(|rule| rule.gated(&self.role)));
        rules.extend(self.bootstrap_rules());
        rules
    }

    /// The three trailing rules, in evaluation order.
    pub fn bootstrap_rules(&self) -> [RedirectRule; 3] {
        [
            // No `force`: an existing file at the path overrides the 404.
            RedirectRule::new("/*", "/:splat")
                .with_conditions(RedirectConditions::role(&self.role))
                .with_status(404),
            RedirectRule::new("/", LOGIN_PATH)
                .with_status(401)
                .with_force(true),
            RedirectRule::new("/*", LOGIN_PATH)
                .with_status(401)
                .with_force(true),
        ]
    }
}

/// [`RedirectRuleGenerator::generate`] with the default `ghost` role.
pub fn generate(existing: &[RedirectRule]) -> Vec<RedirectRule> {
    RedirectRuleGenerator::default().generate(existing)
}
