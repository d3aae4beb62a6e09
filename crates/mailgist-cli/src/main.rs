//! Mailgist CLI - Command-line interface for the email summarization pipeline.

use clap::Parser;
use mailgist_cli::commands;
use mailgist_cli::{Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Load or create config
    let config = Config::load().unwrap_or_else(|_| {
        let cfg = Config::default();
        cfg.save().ok();
        cfg
    });

    let formatter = Formatter::new(!cli.no_color);

    match cli.command {
        Command::Process(args) => {
            commands::execute_process(args, &config, &formatter).await?;
        }
        Command::Export(args) => {
            commands::execute_export(args, &config, &formatter).await?;
        }
        Command::SetupDb(args) => {
            commands::execute_setup_db(args, &config, &formatter).await?;
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so generated output stays clean on stdout.
/// `RUST_LOG` overrides the level picked by `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
