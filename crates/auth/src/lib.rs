//! `sitegate-auth` — webhook authentication and role decisions.
//!
//! This crate is intentionally decoupled from HTTP: callers hand in the raw
//! signature header and body and map the outcome onto their transport.

pub mod decision;
pub mod identity;
pub mod signature;
pub mod webhook;

pub use decision::{RoleDecision, RoleDecisionEngine};
pub use identity::IdentityPayload;
pub use signature::{CompactToken, WebhookSecret, sign, verify};
pub use webhook::{
    MetadataUpdate, WebhookConfig, WebhookError, WebhookEvent, WebhookHandler, WebhookOutcome,
};
