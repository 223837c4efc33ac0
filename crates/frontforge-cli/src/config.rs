//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only sees the settings structs
//! derived from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `FRONTFORGE_<SECTION>__<KEY>`, e.g.
//!    `FRONTFORGE_TEMPLATES__ROOT`
//! 3. Config file (`--config`, or `config.toml` in the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use frontforge_core::{application::GenerationSettings, domain::ProxySettings};

use crate::cli::OutputFormat;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
    /// Frontend generation settings.
    pub frontend: FrontendConfig,
    /// Proxy config generation settings.
    pub proxy: ProxyConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Used when `--output-format` is left at `auto`.
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Template root. Unset means `<executable dir>/templates`.
    pub root: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    pub default_port: u16,
    /// Project directory holding the fronts.
    pub fronts_root: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        let settings = GenerationSettings::default();
        Self {
            default_port: settings.default_port,
            fronts_root: settings.fronts_root,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    /// Where the proxy container serves built fronts from.
    pub static_root: String,
    /// Project directory receiving `default.conf`.
    pub output_dir: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            static_root: ProxySettings::default().static_root,
            output_dir: "nginx".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration, layering file and environment over defaults.
    ///
    /// An explicit `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::from(Self::config_path().as_path()).required(false),
        };

        let config = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix("FRONTFORGE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?
            .try_deserialize::<Self>()
            .context("Failed to deserialize configuration")?;

        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.frontforge.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "frontforge", "frontforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".frontforge.toml"))
    }

    /// `--templates` > `templates.root` > `<executable dir>/templates`.
    pub fn template_root(&self, flag: Option<&Path>) -> anyhow::Result<PathBuf> {
        if let Some(dir) = flag.or(self.templates.root.as_deref()) {
            return Ok(dir.to_path_buf());
        }
        let exe = std::env::current_exe().context("Failed to locate the frontforge executable")?;
        let dir = exe
            .parent()
            .context("The frontforge executable has no parent directory")?;
        Ok(dir.join("templates"))
    }

    pub fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            fronts_root: self.frontend.fronts_root.clone(),
            default_port: self.frontend.default_port,
        }
    }

    pub fn proxy_settings(&self) -> ProxySettings {
        ProxySettings {
            fronts_root: self.frontend.fronts_root.clone(),
            static_root: self.proxy.static_root.clone(),
        }
    }
}
