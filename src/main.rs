//! MCP Server Entry Point
//!
//! Loads configuration, initializes logging and hands over to [`serve`].

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

use hello_mcp_server::{Config, serve};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    init_logging(&config.logging.level, config.logging.with_timestamps);

    serve(config).await?;

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs always go to stderr: stdout carries protocol traffic on STDIO.
fn init_logging(level: &str, with_timestamps: bool) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
