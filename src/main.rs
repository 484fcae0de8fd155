//! Fixture API server for devdash
//!
//! Serves `/api/weather` and `/api/mock/developers` until Ctrl+C or SIGTERM.
//!
//! ## Usage
//! ```bash
//! devdash                           # defaults, 127.0.0.1:3000
//! devdash --config devdash.toml
//! devdash --print-schema            # JSON Schema for the config file
//! ```
//!
//! ## Environment Variables
//!
//! - `DEVDASH_HOST`, `DEVDASH_PORT`, `DEVDASH_BASE_URL` — config overrides
//! - `LOG_FORMAT=json` — structured JSON output (overrides the config file)
//! - `RUST_LOG=info` — log level filter

use std::path::PathBuf;

use devdash::config::{self, loader};
use devdash::{init_tracing_with, metrics, web_api};
use tracing::info;

struct CliArgs {
    config: Option<PathBuf>,
    print_schema: bool,
}

fn parse_args() -> Result<CliArgs, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config: None,
        print_schema: false,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                let path = args.get(i).ok_or("--config requires a path")?;
                cli.config = Some(PathBuf::from(path));
            }
            "--print-schema" => cli.print_schema = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    Ok(cli)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args()?;

    if cli.print_schema {
        println!("{}", config::export_schema()?);
        return Ok(());
    }

    let config = loader::load(cli.config.as_deref())?;

    let format = std::env::var("LOG_FORMAT")
        .unwrap_or_else(|_| config.observability.log_format.as_str().to_string());
    let _ = init_tracing_with(&format);

    if config.observability.metrics_enabled {
        metrics::init_metrics()?;
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        delay_ms = config.server.response_delay_ms,
        "Starting devdash fixture API"
    );

    web_api::start_server(&config.server).await?;
    Ok(())
}
