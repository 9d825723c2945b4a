//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/spacecost/spacecost.toml`
//! 3. Local config: file given with `--config`
//! 4. Environment variables: `SPACECOST_*` prefix
//!
//! Command-line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{currency_symbol, Horizon};

/// Display settings for a calculator session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Display horizon in months (12, 36 or 60)
    pub horizon_months: u32,
    /// Currency code; only changes the symbol shown
    pub currency: String,
    /// Annual growth of monthly OpEx in percent
    pub growth_rate: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            horizon_months: 12,
            currency: "USD".into(),
            growth_rate: 0.0,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub horizon_months: Option<u32>,
    pub currency: Option<String>,
    pub growth_rate: Option<f64>,
}

/// Get the XDG config directory for spacecost.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "spacecost").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("spacecost.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|s| PathBuf::from(s.into_owned()))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Validated display horizon.
    pub fn horizon(&self) -> Result<Horizon, ApplicationError> {
        Horizon::from_months(self.horizon_months).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }

    /// Reject settings no session can be built from.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.horizon()?;
        if !self.growth_rate.is_finite() {
            return Err(ApplicationError::Config {
                message: format!(
                    "growth_rate must be a finite number, got {}",
                    self.growth_rate
                ),
            });
        }
        Ok(())
    }

    pub fn currency_symbol(&self) -> String {
        currency_symbol(&self.currency)
    }

    /// Overlay wins for every field it specifies.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            horizon_months: overlay.horizon_months.unwrap_or(self.horizon_months),
            currency: overlay
                .currency
                .clone()
                .unwrap_or_else(|| self.currency.clone()),
            growth_rate: overlay.growth_rate.unwrap_or(self.growth_rate),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file given on the command line (must exist)
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(path) = local {
            let path = expand_path(path);
            let raw = load_raw_settings(&path)?;
            current = current.merge_with(&raw);
        }

        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply SPACECOST_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(Environment::with_prefix("SPACECOST").try_parsing(true))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get::<u32>("horizon_months") {
            settings.horizon_months = val;
        }
        if let Ok(val) = config.get_string("currency") {
            settings.currency = val;
        }
        if let Ok(val) = config.get_float("growth_rate") {
            settings.growth_rate = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# spacecost configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/spacecost/spacecost.toml
#   Local:  file passed with --config
#   Env:    SPACECOST_* environment variables

# Display horizon in months: 12, 36 or 60
# horizon_months = 12

# Currency code (cosmetic; USD, EUR, GBP, PKR get a symbol)
# currency = "USD"

# Annual growth of monthly OpEx in percent
# growth_rate = 0.0
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
