use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use sitegate_core::{RedirectRuleGenerator, Role};
use sitegate_observability::LogFormat;

/// Rewrite a site's redirect rules so every page requires the SSO role.
///
/// Reads the site configuration, gates each redirect on the role, appends the
/// login fallbacks, and writes the result into the publish directory.
#[derive(Parser, Debug)]
#[command(name = "sitegate-build", version, about, long_about = None)]
struct Cli {
    /// Site configuration to read
    #[arg(short, long, default_value = sitegate_build::CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Directory the site is published from [default: `build.publish` from the config]
    #[arg(long, env = "PUBLISH_DIR")]
    publish_dir: Option<PathBuf>,

    /// Role that unlocks gated content
    #[arg(long, env = "SITEGATE_ROLE", default_value = "ghost")]
    role: String,
}

fn main() -> anyhow::Result<()> {
    sitegate_observability::init_with_format(LogFormat::Text);

    let cli = Cli::parse();
    let role = Role::parse(cli.role).context("invalid --role")?;
    let generator = RedirectRuleGenerator::new(role);

    let written = sitegate_build::gate_site(&cli.config, cli.publish_dir.as_deref(), &generator)
        .with_context(|| format!("failed to gate {}", cli.config.display()))?;

    tracing::info!(path = %written.display(), "gated site config written");
    Ok(())
}
