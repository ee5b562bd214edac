use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "stacksync-env")]
#[command(about = "Inspect the Stacksync client environment bootstrap")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the environment and print every resolved value
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Initialize the environment and print the device name
    DeviceName {
        /// Append the current minute (yyyyMMddHHmm)
        #[arg(short, long)]
        timestamp: bool,
    },

    /// Print raw host probes and STACKSYNC_* variables without initializing
    Host {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    // Logs go to stderr so that stdout stays machine-readable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    debug!("Starting stacksync-env v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Show { json } => commands::show::execute(json),
        Commands::DeviceName { timestamp } => commands::device_name::execute(timestamp),
        Commands::Host { json } => commands::host::execute(json),
    }
}
