//! `sitegate-build` — build-time step that rewrites a site's configuration
//! with the role-gated redirect policy.
//!
//! Runs once per build, after the site has been generated and before it is
//! published: read the site config, gate its redirects, and write the result
//! into the publish directory where the host picks it up.

pub mod site_config;

pub use site_config::{BuildError, CONFIG_FILE_NAME, SiteConfig, gate_site};
