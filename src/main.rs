use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mri", about = "Meter Reading Import — normalise meter readings")]
struct Cli {
    /// Write debug logs to /tmp/mri-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Config file to use instead of ~/.config/mri/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: mri::commands::Command,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_env("RUST_LOG").unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if cli.debug { "debug" } else { "info" })
    });
    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/mri-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(filter)
            .init();
        tracing::info!("mri debug log started, tail -f /tmp/mri-debug.log");
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .init();
    }

    let config = match &cli.config {
        Some(path) => mri::config::Config::from_path(path)?,
        None => mri::config::Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to built-in config");
            mri::config::Config::defaults()
        }),
    };

    mri::commands::run(cli.command, &config)
}
