//! Run-wide settings: output location, logging, grid and page geometry.
//!
//! Read from an optional TOML file, then overridden by environment variables.
//! Command-line flags are applied on top of this by the binary.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, WorksheetError};
use crate::worksheet_engine::{batch::BatchOptions, layout::GridLayout, sheet::PageSetup};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "minute_math.toml";

pub const ENV_OUTPUT_DIR: &str = "MINUTE_MATH_OUTPUT_DIR";
pub const ENV_LOG: &str = "MINUTE_MATH_LOG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub output_dir: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_level: String,
    pub default_problem_count: usize,
    pub layout: GridLayout,
    pub page: PageSetup,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            output_dir: PathBuf::from("."),
            log_level: "info".to_string(),
            default_problem_count: 50,
            layout: GridLayout::default(),
            page: PageSetup::default(),
        }
    }
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(text)
            .map_err(|e| WorksheetError::invalid(format!("bad settings file: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load `path`, or [`DEFAULT_CONFIG_FILE`] if it exists, or the defaults;
    /// then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => {
                let text = fs::read_to_string(path).map_err(|e| match e.kind() {
                    std::io::ErrorKind::NotFound => WorksheetError::FileNotFound { path: path.to_path_buf() },
                    _ => e.into(),
                })?;
                Self::from_toml_str(&text)?
            }
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_toml_str(&fs::read_to_string(DEFAULT_CONFIG_FILE)?)?
            }
            None => Settings::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Apply overrides from `lookup` (normally the process environment).
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_OUTPUT_DIR).filter(|v| !v.trim().is_empty()) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(level) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            self.log_level = level;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_problem_count == 0 {
            return Err(WorksheetError::invalid("default_problem_count must be at least 1"));
        }
        self.layout.validate_for(&self.page)
    }

    pub fn batch_options(&self, rng_seed: Option<u64>) -> BatchOptions {
        BatchOptions {
            layout: self.layout.clone(),
            page: self.page.clone(),
            rng_seed,
        }
    }
}
