//! Config command - show current configuration

use crate::cli::output::colors;
use crate::cli::OutputFormat;
use crate::core::config::Config;
use crate::core::services::Services;
use crate::core::types::Metadata;
use crate::core::xdg::XdgDirs;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Also show where the configuration file is looked up
    #[arg(long, short = 'a')]
    pub all: bool,
}

/// Configuration response
#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
    pub splitter: SplitterSection,
    pub input: InputSection,
    pub base_metadata: Metadata,
    pub limits: LimitsSection,
}

#[derive(Debug, Serialize)]
pub struct SplitterSection {
    pub max_chunk_size: usize,
    pub overlap: usize,
    pub degraded: bool,
}

#[derive(Debug, Serialize)]
pub struct InputSection {
    pub mode: String,
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,
    pub max_file_size_mb: usize,
}

#[derive(Debug, Serialize)]
pub struct LimitsSection {
    pub max_layout_elements: usize,
    pub max_concurrent_files: usize,
}

impl ConfigResponse {
    fn new(config: &Config, config_file: Option<String>) -> Self {
        Self {
            config_file,
            splitter: SplitterSection {
                max_chunk_size: config.splitter.max_chunk_size,
                overlap: config.splitter.overlap,
                degraded: config.splitter.overlap >= config.splitter.max_chunk_size,
            },
            input: InputSection {
                mode: config.input.mode.to_string(),
                include_patterns: config.input.include_patterns.clone(),
                exclude_patterns: config.input.exclude_patterns.clone(),
                max_file_size_mb: config.input.max_file_size_mb,
            },
            base_metadata: config.output.base_metadata.clone(),
            limits: LimitsSection {
                max_layout_elements: config.limits.max_layout_elements,
                max_concurrent_files: config.limits.max_concurrent_files,
            },
        }
    }
}

/// Execute the config command
pub async fn execute(
    args: ConfigArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config_file = args
        .all
        .then(|| XdgDirs::new().config_file().to_string_lossy().into_owned());
    let response = ConfigResponse::new(&services.config, config_file);

    match format {
        OutputFormat::Human => print_human(&response),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

fn print_human(response: &ConfigResponse) {
    println!("{}", colors::label("Configuration:"));
    if let Some(path) = &response.config_file {
        println!("  config_file: {}", colors::file_path(path));
    }
    println!("  splitter:");
    println!(
        "    max_chunk_size: {}",
        colors::number(&response.splitter.max_chunk_size.to_string())
    );
    println!(
        "    overlap: {}",
        colors::number(&response.splitter.overlap.to_string())
    );
    if response.splitter.degraded {
        println!(
            "    {}",
            colors::warning("overlap >= max_chunk_size, hard splitting is degraded")
        );
    }
    println!("  input:");
    println!("    mode: {}", response.input.mode);
    println!("    include_patterns: {:?}", response.input.include_patterns);
    println!("    exclude_patterns: {:?}", response.input.exclude_patterns);
    println!("    max_file_size_mb: {}", response.input.max_file_size_mb);
    println!("  output:");
    if response.base_metadata.is_empty() {
        println!("    base_metadata: {}", colors::dim("(none)"));
    } else {
        println!("    base_metadata:");
        for (key, value) in &response.base_metadata {
            println!("      {key}: {value}");
        }
    }
    println!("  limits:");
    println!(
        "    max_layout_elements: {}",
        response.limits.max_layout_elements
    );
    println!(
        "    max_concurrent_files: {}",
        response.limits.max_concurrent_files
    );
}
