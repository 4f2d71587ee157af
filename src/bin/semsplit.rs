//! semsplit CLI - split parsed documents into retrieval chunks
//!
//! # Examples
//!
//! ```bash
//! # Split a layout parse result
//! semsplit split report.json
//!
//! # Split a directory of markdown with smaller chunks, writing JSON lines
//! semsplit split docs/ --max-chunk-size 500 --overlap 50 -o chunks.jsonl
//!
//! # Show configuration
//! semsplit show-config
//! ```

use clap::Parser;
use semsplit::cli::{output::print_error, run, Cli};
use tracing_subscriber::EnvFilter;

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "semsplit=warn".into());
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr) // stdout carries command output
        .with_env_filter(filter);

    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    if let Err(e) = run(cli).await {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
