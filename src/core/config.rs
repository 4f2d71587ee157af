//! Configuration management for semsplit.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{Result, SemsplitError};
use crate::core::splitter::{DEFAULT_MAX_CHUNK_SIZE, DEFAULT_OVERLAP};
use crate::core::types::{InputMode, Metadata};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub splitter: SplitterConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Splitter configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SplitterConfig {
    /// Maximum characters per chunk (not bytes!)
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: usize,

    /// Characters shared by adjacent hard-split windows
    #[serde(default = "default_overlap")]
    pub overlap: usize,
}

/// Input discovery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputConfig {
    /// How files are interpreted
    #[serde(default)]
    pub mode: InputMode,

    /// File patterns to include when walking directories (glob syntax)
    #[serde(default = "default_include_patterns")]
    pub include_patterns: Vec<String>,

    /// File patterns to exclude (glob syntax)
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,

    /// Maximum file size in MB (skip larger files)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Metadata merged into every output document
    #[serde(default)]
    pub base_metadata: Metadata,
}

/// Limits configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Maximum layout elements accepted from one parse result
    #[serde(default = "default_max_layout_elements")]
    pub max_layout_elements: usize,

    /// Maximum files split concurrently
    #[serde(default = "default_max_concurrent_files")]
    pub max_concurrent_files: usize,
}

// Default value functions
fn default_max_chunk_size() -> usize {
    DEFAULT_MAX_CHUNK_SIZE
}

fn default_overlap() -> usize {
    DEFAULT_OVERLAP
}

fn default_max_file_size() -> usize {
    10
}

fn default_max_layout_elements() -> usize {
    10_000
}

fn default_max_concurrent_files() -> usize {
    4
}

fn default_include_patterns() -> Vec<String> {
    vec![
        "*.json".to_string(),
        "*.md".to_string(),
        "*.markdown".to_string(),
        "*.txt".to_string(),
    ]
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        "**/node_modules/**".to_string(),
        "**/target/**".to_string(),
        "**/.git/**".to_string(),
        "**/build/**".to_string(),
        "**/dist/**".to_string(),
    ]
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: default_max_chunk_size(),
            overlap: default_overlap(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mode: InputMode::default(),
            include_patterns: default_include_patterns(),
            exclude_patterns: default_exclude_patterns(),
            max_file_size_mb: default_max_file_size(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_layout_elements: default_max_layout_elements(),
            max_concurrent_files: default_max_concurrent_files(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| SemsplitError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// This method uses XDG Base Directory specification for file locations.
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. SEMSPLIT_CONFIG env var
    /// 2. XDG config file (~/.config/semsplit/config.toml)
    /// 3. ./semsplit.toml
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("SEMSPLIT_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("semsplit.toml").exists() {
                Self::from_file("semsplit.toml")?
            } else {
                Self::default()
            }
        };

        // Override with environment variables
        config.merge_env();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Splitter configuration
        if let Ok(max_size) = env::var("SEMSPLIT_MAX_CHUNK_SIZE") {
            if let Ok(size) = max_size.parse() {
                self.splitter.max_chunk_size = size;
            }
        }
        if let Ok(overlap) = env::var("SEMSPLIT_OVERLAP") {
            if let Ok(o) = overlap.parse() {
                self.splitter.overlap = o;
            }
        }

        // Input configuration
        if let Ok(mode) = env::var("SEMSPLIT_INPUT_MODE") {
            if let Ok(m) = mode.parse() {
                self.input.mode = m;
            }
        }
        if let Ok(max_size) = env::var("SEMSPLIT_MAX_FILE_SIZE_MB") {
            if let Ok(size) = max_size.parse() {
                self.input.max_file_size_mb = size;
            }
        }

        // Limits configuration
        if let Ok(max_layouts) = env::var("SEMSPLIT_MAX_LAYOUT_ELEMENTS") {
            if let Ok(max) = max_layouts.parse() {
                self.limits.max_layout_elements = max;
            }
        }
        if let Ok(max_concurrent) = env::var("SEMSPLIT_MAX_CONCURRENT_FILES") {
            if let Ok(max) = max_concurrent.parse() {
                self.limits.max_concurrent_files = max;
            }
        }
    }

    /// Validate configuration values
    ///
    /// An overlap at or above the chunk size is allowed; splitting
    /// degrades to one-character steps rather than failing.
    pub fn validate(&self) -> Result<()> {
        if self.splitter.max_chunk_size == 0 {
            return Err(SemsplitError::ConfigError(
                "Max chunk size must be non-zero".to_string(),
            ));
        }

        if self.splitter.overlap >= self.splitter.max_chunk_size {
            tracing::warn!(
                "Overlap ({}) is not less than max chunk size ({}); hard splits will be heavily duplicated",
                self.splitter.overlap,
                self.splitter.max_chunk_size
            );
        }

        if self.input.max_file_size_mb == 0 {
            return Err(SemsplitError::ConfigError(
                "Max file size must be non-zero".to_string(),
            ));
        }

        if self.limits.max_layout_elements == 0 {
            return Err(SemsplitError::ConfigError(
                "Max layout elements must be non-zero".to_string(),
            ));
        }

        if self.limits.max_concurrent_files == 0 {
            return Err(SemsplitError::ConfigError(
                "Max concurrent files must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Max chunk size: {} chars", self.splitter.max_chunk_size);
        tracing::info!("  Overlap: {} chars", self.splitter.overlap);
        tracing::info!("  Input mode: {}", self.input.mode);
        tracing::info!(
            "  Include patterns: {} patterns",
            self.input.include_patterns.len()
        );
        tracing::info!(
            "  Exclude patterns: {} patterns",
            self.input.exclude_patterns.len()
        );
        tracing::info!("  Max file size: {} MB", self.input.max_file_size_mb);
        tracing::info!(
            "  Base metadata: {} keys",
            self.output.base_metadata.len()
        );
        tracing::info!(
            "  Max layout elements: {}",
            self.limits.max_layout_elements
        );
        tracing::info!(
            "  Max concurrent files: {}",
            self.limits.max_concurrent_files
        );
    }
}
