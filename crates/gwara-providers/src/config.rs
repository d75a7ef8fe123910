//! Configuration and provider factory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use gwara_core::model::{DEFAULT_AMOUNT, DEFAULT_LEVEL};
use gwara_core::traits::QuestionProvider;

use crate::http::{HttpQuestionProvider, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Environment variable that overrides the question service URL.
pub const BASE_URL_ENV: &str = "GWARA_BASE_URL";

/// Where to fetch questions from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Question service endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Top-level gwara configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GwaraConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Question count preselected on the start form.
    #[serde(default = "default_amount")]
    pub default_amount: u32,
    /// Difficulty preselected on the start form.
    #[serde(default = "default_level")]
    pub default_level: u32,
}

fn default_amount() -> u32 {
    DEFAULT_AMOUNT
}
fn default_level() -> u32 {
    DEFAULT_LEVEL
}

impl Default for GwaraConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            default_amount: default_amount(),
            default_level: default_level(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not expanded again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `gwara.toml` in the current directory
/// 2. `~/.config/gwara/config.toml`
///
/// `GWARA_BASE_URL` overrides the configured service URL.
pub fn load_config() -> Result<GwaraConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GwaraConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => {
            let local = PathBuf::from("gwara.toml");
            if local.exists() {
                Some(local)
            } else {
                dirs_path()
                    .map(|dir| dir.join("config.toml"))
                    .filter(|global| global.exists())
            }
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GwaraConfig::default(),
    };

    if let Ok(url) = std::env::var(BASE_URL_ENV) {
        if !url.is_empty() {
            config.provider.base_url = url;
        }
    }

    config.provider.base_url = resolve_env_vars(&config.provider.base_url);

    Ok(config)
}

/// Parse a TOML config document.
pub fn parse_config(content: &str) -> Result<GwaraConfig> {
    Ok(toml::from_str::<GwaraConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gwara"))
}

/// Create a provider instance from its configuration.
pub fn create_provider(config: &ProviderConfig) -> Result<Box<dyn QuestionProvider>> {
    let provider = HttpQuestionProvider::new(&config.base_url, config.timeout_secs)
        .with_context(|| format!("failed to set up provider for {}", config.base_url))?;
    Ok(Box::new(provider))
}
