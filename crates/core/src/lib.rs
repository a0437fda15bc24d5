//! `sitegate-core` — pure building blocks for gating a static site behind SSO.
//!
//! This crate holds no IO: value types shared by the build step and the
//! webhook service, plus the redirect policy synthesis itself.

pub mod error;
pub mod policy;
pub mod redirect;
pub mod role;

pub use error::{DomainError, DomainResult};
pub use policy::{LOGIN_PATH, RedirectRuleGenerator, generate};
pub use redirect::{ROLE_CONDITION, RedirectConditions, RedirectRule};
pub use role::{Role, TrustedDomain};
