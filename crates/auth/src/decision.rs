use sitegate_core::{Role, TrustedDomain};

use crate::IdentityPayload;

/// Outcome of a role decision for one verified identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleDecision {
    /// The user already holds the gating role; nothing changes.
    Allow,

    /// The user belongs to the trusted domain and should be given the role.
    /// Carries the complete updated role list.
    Grant(Vec<Role>),

    /// Neither holds the role nor belongs to the trusted domain.
    Deny,
}

/// Decides whether a verified identity gets the gating role.
///
/// - No IO
/// - No panics
/// - Same payload, same decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDecisionEngine {
    gating_role: Role,
    trusted_domain: TrustedDomain,
}

impl RoleDecisionEngine {
    pub fn new(gating_role: Role, trusted_domain: TrustedDomain) -> Self {
        Self {
            gating_role,
            trusted_domain,
        }
    }

    pub fn gating_role(&self) -> &Role {
        &self.gating_role
    }

    pub fn trusted_domain(&self) -> &TrustedDomain {
        &self.trusted_domain
    }

    pub fn decide(&self, payload: &IdentityPayload) -> RoleDecision {
        if payload.has_role(&self.gating_role) {
            return RoleDecision::Allow;
        }

        if self.trusted_domain.matches(payload.email()) {
            let mut roles = payload.roles().to_vec();
            roles.push(self.gating_role.clone());
            return RoleDecision::Grant(roles);
        }

        RoleDecision::Deny
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    fn engine() -> RoleDecisionEngine {
        RoleDecisionEngine::new(Role::GHOST, TrustedDomain::new("ghost.org").unwrap())
    }

    #[test]
    fn trusted_user_without_role_is_granted() {
        let payload = IdentityPayload::new("x@ghost.org", vec![]);
        assert_eq!(engine().decide(&payload), RoleDecision::Grant(vec![Role::GHOST]));
    }

    #[test]
    fn user_with_role_is_allowed() {
        let payload = IdentityPayload::new("x@ghost.org", vec![Role::GHOST]);
        assert_eq!(engine().decide(&payload), RoleDecision::Allow);
    }

    #[test]
    fn role_wins_over_domain() {
        // An outside user that was given the role by hand keeps access.
        let payload = IdentityPayload::new("x@other.com", vec![Role::new("admin"), Role::GHOST]);
        assert_eq!(engine().decide(&payload), RoleDecision::Allow);
    }

    #[test]
    fn outside_user_is_denied() {
        let payload = IdentityPayload::new("x@other.com", vec![]);
        assert_eq!(engine().decide(&payload), RoleDecision::Deny);

        let lookalike = IdentityPayload::new("x@notghost.org", vec![]);
        assert_eq!(engine().decide(&lookalike), RoleDecision::Deny);

        let wrong_case = IdentityPayload::new("x@GHOST.ORG", vec![]);
        assert_eq!(engine().decide(&wrong_case), RoleDecision::Deny);
    }

    #[test]
    fn grant_appends_exactly_the_gating_role() {
        let existing = vec![Role::new("editor"), Role::new("admin")];
        let mut app_metadata = Map::new();
        app_metadata.insert("provider".into(), json!("github"));
        let payload = IdentityPayload::new("x@ghost.org", existing.clone())
            .with_app_metadata(app_metadata.clone())
            .with_user_metadata(json!({ "full_name": "X" }));

        let RoleDecision::Grant(roles) = engine().decide(&payload) else {
            panic!("expected grant");
        };

        assert_eq!(roles.len(), existing.len() + 1);
        assert_eq!(&roles[..existing.len()], &existing[..]);
        assert_eq!(roles.last(), Some(&Role::GHOST));

        // Deciding never touches the payload.
        assert_eq!(payload.roles(), &existing[..]);
        assert_eq!(payload.app_metadata(), &app_metadata);
    }

    #[test]
    fn decide_is_deterministic() {
        let payload = IdentityPayload::new("x@ghost.org", vec![Role::new("editor")]);
        let engine = engine();
        assert_eq!(engine.decide(&payload), engine.decide(&payload));
    }

    #[test]
    fn configured_role_and_domain_are_respected() {
        let engine =
            RoleDecisionEngine::new(Role::new("staff"), TrustedDomain::new("@org.example").unwrap());

        assert_eq!(
            engine.decide(&IdentityPayload::new("a@org.example", vec![Role::GHOST])),
            RoleDecision::Grant(vec![Role::GHOST, Role::new("staff")])
        );
        assert_eq!(
            engine.decide(&IdentityPayload::new("a@notorg.example", vec![])),
            RoleDecision::Deny
        );
    }
}
