use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ledger::Period;

const DEFAULT_BRAND: &str = "G&V";
const DEFAULT_YEAR: i32 = 2025;
const DEFAULT_MONTH: u32 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Shown in front of the ranking image title
    pub brand: String,
    pub default_year: i32,
    pub default_month: u32,
    /// Start the session from the built-in seed records
    pub seed: bool,
    pub export_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            brand: DEFAULT_BRAND.to_string(),
            default_year: DEFAULT_YEAR,
            default_month: DEFAULT_MONTH,
            seed: true,
            export_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("Error in config file {}", path.display()))?;
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.default_period()
            .context("Invalid default_year/default_month")?;
        Ok(())
    }

    pub fn default_period(&self) -> Result<Period> {
        Ok(Period::new(self.default_year, self.default_month)?)
    }
}
