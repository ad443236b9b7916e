use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use config::{Environment, File, FileFormat};
use log::LevelFilter;
use serde::Deserialize;

use crate::session::ViewerIdentity;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const ENV_PREFIX: &str = "REELVIEW";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Source(#[from] config::ConfigError),

    #[error("Invalid base URL {url}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Unknown log level: {0}")]
    InvalidLogLevel(String),

    #[error("Request timeout must be at least one second")]
    InvalidTimeout,
}

/// Terminal viewer for a single video post.
#[derive(Debug, Clone, Parser)]
#[command(name = "reelview", version)]
pub struct Cli {
    /// Identifier of the post to open
    pub post_id: String,

    /// JSON settings file
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    /// API base URL, overrides the settings file and environment
    #[arg(long)]
    pub base_url: Option<String>,

    /// Act as this viewer id (enables liking)
    #[arg(long)]
    pub viewer: Option<String>,

    /// Don't start an external video player
    #[arg(long)]
    pub no_video: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub base_url: String,
    #[serde(default)]
    pub viewer_id: Option<String>,
    #[serde(default)]
    pub viewer_name: Option<String>,
    pub player: String,
    pub log_file: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub no_video: bool,
}

impl Settings {
    /// Layers defaults, the optional JSON file, `REELVIEW_*` variables and
    /// finally the command line.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let settings: Settings = config::Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("player", "mpv")?
            .set_default("log_file", "reelview.log")?
            .set_default("log_level", "info")?
            .set_default("request_timeout_secs", 10_i64)?
            .add_source(
                File::from(cli.config.clone())
                    .format(FileFormat::Json)
                    .required(false),
            )
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .set_override_option("base_url", cli.base_url.clone())?
            .set_override_option("viewer_id", cli.viewer.clone())?
            .set_override_option("no_video", cli.no_video.then_some(true))?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        self.level_filter()?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn viewer(&self) -> Option<ViewerIdentity> {
        let id = self.viewer_id.as_deref()?.trim();
        if id.is_empty() {
            return None;
        }
        Some(ViewerIdentity {
            id: id.to_string(),
            user_name: self.viewer_name.clone(),
        })
    }
}
