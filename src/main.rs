//! Finweb main entry point

use anyhow::Context;
use clap::Parser;
use finweb_api::start_server;
use finweb_config::Config;
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "finweb")]
#[command(author = "Finweb Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A lightweight personal finance tracker with a reactive web interface", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn init_logging(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder.parse_filters(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    // the logger needs the configured level, so a missing file is reported after init
    let config_found = args.config.exists();
    let mut config = Config::load_or_default(&args.config)
        .map_err(|e| anyhow::anyhow!("{}", e.to_details()))
        .with_context(|| format!("Failed to load configuration from {}", args.config.display()))?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("{}", e.to_details()))
        .context("Invalid configuration")?;

    init_logging(&config.logging.level);
    if config_found {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }
    log::debug!(
        "Sessions: cookie={}, idle timeout={} min, max={}",
        config.session.cookie_name,
        config.session.idle_timeout_minutes,
        config.session.max_sessions
    );

    let rt = Runtime::new()?;
    rt.block_on(start_server(config))
}
