//! Site configuration file (`netlify.toml`) read/rewrite.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use sitegate_core::{RedirectRule, RedirectRuleGenerator};

/// File name the host reads from the publish directory.
pub const CONFIG_FILE_NAME: &str = "netlify.toml";

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize site config")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no publish directory given and `build.publish` is not set in {}", .path.display())]
    MissingPublishDir { path: PathBuf },
}

/// A site configuration document.
///
/// Only `redirects` is interpreted; every other table (`build`, `headers`,
/// `context`, ...) is kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(flatten)]
    settings: toml::Table,

    #[serde(default)]
    redirects: Vec<RedirectRule>,
}

impl SiteConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    pub fn load(path: &Path) -> Result<Self, BuildError> {
        let source = fs::read_to_string(path).map_err(|source| BuildError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source).map_err(|source| BuildError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn redirects(&self) -> &[RedirectRule] {
        &self.redirects
    }

    pub fn settings(&self) -> &toml::Table {
        &self.settings
    }

    /// `build.publish`, resolved against the directory holding `config_path`.
    pub fn publish_dir(&self, config_path: &Path) -> Option<PathBuf> {
        let publish = self
            .settings
            .get("build")?
            .as_table()?
            .get("publish")?
            .as_str()?;

        let base = config_path.parent().unwrap_or_else(|| Path::new(""));
        Some(base.join(publish))
    }

    /// Copy of this config whose redirects are the gated policy.
    ///
    /// Must be applied to the site's own config, never to a config this step
    /// already wrote.
    pub fn gated(&self, generator: &RedirectRuleGenerator) -> Self {
        Self {
            settings: self.settings.clone(),
            redirects: generator.generate(&self.redirects),
        }
    }

    /// Render as TOML.
    ///
    /// Pass-through redirect fields are held as JSON values, which carry TOML
    /// datetimes as marker tables. Going through [`toml::Table`] turns those
    /// back into datetimes before rendering.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        let table: toml::Table = toml::Table::try_from(self)?
            .try_into()
            .map_err(<toml::ser::Error as serde::ser::Error>::custom)?;
        toml::to_string(&table)
    }

    /// Write into `publish_dir/netlify.toml`, creating the directory if needed.
    pub fn write_to(&self, publish_dir: &Path) -> Result<PathBuf, BuildError> {
        let out = publish_dir.join(CONFIG_FILE_NAME);
        let contents = self.to_toml_string()?;

        fs::create_dir_all(publish_dir)
            .and_then(|()| fs::write(&out, contents))
            .map_err(|source| BuildError::Write {
                path: out.clone(),
                source,
            })?;

        Ok(out)
    }
}

/// Read the site config at `config_path`, gate its redirects and write the
/// result into the publish directory.
///
/// `publish_dir` overrides `build.publish` from the config. Returns the path
/// written.
pub fn gate_site(
    config_path: &Path,
    publish_dir: Option<&Path>,
    generator: &RedirectRuleGenerator,
) -> Result<PathBuf, BuildError> {
    let site = SiteConfig::load(config_path)?;

    let publish_dir = match publish_dir {
        Some(dir) => dir.to_path_buf(),
        None => site
            .publish_dir(config_path)
            .ok_or_else(|| BuildError::MissingPublishDir {
                path: config_path.to_path_buf(),
            })?,
    };

    let gated = site.gated(generator);
    info!(
        rules = site.redirects().len(),
        gated_rules = gated.redirects().len(),
        role = %generator.role(),
        publish_dir = %publish_dir.display(),
        "writing gated site config to publish dir"
    );

    gated.write_to(&publish_dir)
}
