use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::DEFAULT_MARKER;

pub const CONFIG_FILE_NAME: &str = ".trcatrc.json";

pub const DEFAULT_OUTPUT: &str = "catalog.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_markers")]
    pub markers: Vec<String>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_report_variants")]
    pub report_variants: bool,
}

fn default_markers() -> Vec<String> {
    vec![DEFAULT_MARKER.to_string()]
}

fn default_extensions() -> Vec<String> {
    ["py", "gd", "tscn", "tres", "cs", "txt"]
        .map(String::from)
        .to_vec()
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

fn default_report_variants() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            markers: default_markers(),
            extensions: default_extensions(),
            ignores: Vec::new(),
            output: default_output(),
            report_variants: default_report_variants(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if a marker is not an identifier or an ignore glob is
    /// invalid.
    pub fn validate(&self) -> Result<()> {
        for marker in &self.markers {
            if !is_identifier(marker) {
                bail!("Invalid marker in 'markers': \"{}\"", marker);
            }
        }

        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        Ok(())
    }

    /// Apply CLI overrides. Empty marker lists keep the configured markers.
    pub fn with_markers(mut self, markers: &[String]) -> Self {
        if !markers.is_empty() {
            self.markers = markers.to_vec();
        }
        self
    }
}

/// True for ASCII identifiers such as `tr`, `_` or `N_`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {
            chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        }
        _ => false,
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
