use std::borrow::Cow;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Role identifier, as stored in identity-provider `app_metadata.roles` and
/// matched by redirect `Role` conditions.
///
/// Roles are opaque strings at this layer. Deserialization is lenient (the
/// identity provider owns the role list); use [`Role::parse`] for values that
/// come from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    /// Role that unlocks gated content unless another one is configured.
    pub const GHOST: Role = Role(Cow::Borrowed("ghost"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Validate a role name taken from configuration.
    pub fn parse(name: impl Into<Cow<'static, str>>) -> DomainResult<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(DomainError::invalid_role("role name is empty"));
        }
        if name.chars().any(char::is_whitespace) {
            return Err(DomainError::invalid_role(format!(
                "role name '{name}' contains whitespace"
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::GHOST
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s.to_string())
    }
}

/// Email suffix identifying members of the organization, always stored with a
/// leading `@`.
///
/// Keeping the `@` means `a@notorg.example` never matches `org.example`.
/// Matching is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrustedDomain(String);

impl TrustedDomain {
    /// Accepts `org.example` or `@org.example`.
    pub fn new(domain: impl AsRef<str>) -> DomainResult<Self> {
        let raw = domain.as_ref().trim();
        let bare = raw.strip_prefix('@').unwrap_or(raw);

        if bare.is_empty() {
            return Err(DomainError::invalid_trusted_domain("domain is empty"));
        }
        if bare.contains('@') || bare.chars().any(char::is_whitespace) {
            return Err(DomainError::invalid_trusted_domain(format!(
                "'{raw}' is not a bare email domain"
            )));
        }

        Ok(Self(format!("@{bare}")))
    }

    /// The suffix including its leading `@`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, email: &str) -> bool {
        email.ends_with(&self.0)
    }
}

impl core::fmt::Display for TrustedDomain {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TrustedDomain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_role_is_ghost() {
        assert_eq!(Role::default().as_str(), "ghost");
        assert_eq!(Role::default(), Role::new("ghost"));
    }

    #[test]
    fn role_parse_rejects_blank_and_whitespace() {
        assert!(matches!(Role::parse(""), Err(DomainError::InvalidRole(_))));
        assert!(matches!(
            "staff members".parse::<Role>(),
            Err(DomainError::InvalidRole(_))
        ));
        assert_eq!("editor".parse::<Role>().unwrap(), Role::new("editor"));
    }

    #[test]
    fn role_serializes_as_plain_string() {
        let json = serde_json::to_string(&vec![Role::GHOST, Role::new("admin")]).unwrap();
        assert_eq!(json, r#"["ghost","admin"]"#);
    }

    #[test]
    fn trusted_domain_is_normalized_with_at_sign() {
        assert_eq!(TrustedDomain::new("org.example").unwrap().as_str(), "@org.example");
        assert_eq!(TrustedDomain::new(" @org.example ").unwrap().as_str(), "@org.example");
    }

    #[test]
    fn trusted_domain_matches_exact_suffix_only() {
        let domain = TrustedDomain::new("@org.example").unwrap();
        assert!(domain.matches("a@org.example"));
        assert!(!domain.matches("a@notorg.example"));
        assert!(!domain.matches("a@org.example.com"));
        assert!(!domain.matches("a@ORG.EXAMPLE"));

        // A bare domain must not widen the match to look-alike domains.
        let bare = TrustedDomain::new("org.example").unwrap();
        assert!(!bare.matches("a@notorg.example"));
    }

    #[test]
    fn trusted_domain_rejects_garbage() {
        assert!(TrustedDomain::new("").is_err());
        assert!(TrustedDomain::new("@").is_err());
        assert!(TrustedDomain::new("a@org.example").is_err());
        assert!(TrustedDomain::new("org example").is_err());
    }
}
