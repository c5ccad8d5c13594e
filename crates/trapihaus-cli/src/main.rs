//! TrapiHaus CLI
//!
//! Thin wrapper around trapihaus-core for poking at the persisted session
//! without launching the app.
//!
//! ## Usage
//!
//! ```bash
//! # Show whether the stored session is signed in
//! trapihaus status
//!
//! # Sign in with the demo account
//! trapihaus sign-in admin admin
//!
//! # Sign out
//! trapihaus sign-out
//!
//! # What a route would do right now
//! trapihaus guard /listing/7
//!
//! # Recent session events from every binary
//! trapihaus logs --limit 50
//! ```
//!
//! Every run appends to `<data_dir>/logs/<date>_cli.jsonl`. `-v` also echoes
//! events to stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use trapihaus_core::logging::{read_entries, LoggingBuilder};
use trapihaus_core::{
    Persistence, RouteAccess, RouteKind, SessionConfig, SessionGate, SessionPhase, SignInOutcome,
};

/// TrapiHaus - session tool
#[derive(Parser)]
#[command(name = "trapihaus")]
#[command(version = "0.1.0")]
#[command(about = "Inspect and change the TrapiHaus sign-in session")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Data directory (default: platform data dir, or $TRAPIHAUS_DATA_DIR)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the stored session
    Status,

    /// Sign in with an identifier and secret
    SignIn {
        /// Identifier (surrounding whitespace is ignored)
        identifier: String,
        /// Secret
        secret: String,
    },

    /// Sign out and remove the stored flag
    SignOut,

    /// Show what a route would do for the stored session
    Guard {
        /// Route path, e.g. /login or /listing/7
        path: String,
    },

    /// Show recent log entries
    Logs {
        /// Number of entries to show, newest last
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,
    },
}

fn setup_logging(config: &SessionConfig, verbosity: u8) {
    let filter = match verbosity {
        0 | 1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let mut builder = LoggingBuilder::new(config.logs_dir(), "cli").with_filter(filter);
    if verbosity == 0 {
        builder = builder.no_console();
    }

    if let Err(err) = builder.init() {
        // No JSONL file; fall back to stderr only
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .try_init();
        tracing::warn!(error = %err, "File logging unavailable");
    }
}

fn show_logs(config: &SessionConfig, limit: usize) -> Result<()> {
    let entries = read_entries(config.logs_dir()).with_context(|| {
        format!("failed to read logs from {}", config.logs_dir().display())
    })?;

    let skip = entries.len().saturating_sub(limit);
    for entry in &entries[skip..] {
        print!(
            "{} {:>5} [{}] {}: {}",
            entry.ts, entry.level, entry.instance, entry.target, entry.msg
        );
        match &entry.fields {
            Some(fields) => println!(" {}", fields),
            None => println!(),
        }
    }

    Ok(())
}

fn describe(phase: SessionPhase) -> &'static str {
    match phase {
        SessionPhase::Loading => "loading",
        SessionPhase::SignedOut => "signed out",
        SessionPhase::SignedIn => "signed in",
    }
}

fn warn_unsaved(persisted: &Persistence) {
    if let Persistence::Failed(err) = persisted {
        eprintln!("Warning: session not saved, it will not survive a restart ({})", err);
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match cli.data_dir {
        Some(dir) => SessionConfig::new(dir),
        None => SessionConfig::from_env(),
    };
    setup_logging(&config, cli.verbose);

    if let Commands::Logs { limit } = cli.command {
        show_logs(&config, limit)?;
        return Ok(ExitCode::SUCCESS);
    }

    tracing::debug!(store = %config.db_path().display(), "Opening session store");
    let gate = SessionGate::open(&config).with_context(|| {
        format!("failed to open session store at {}", config.db_path().display())
    })?;
    let state = gate.initialize().await;

    match cli.command {
        Commands::Status => {
            println!("TrapiHaus session");
            println!("  Ready: {}", state.ready);
            println!("  Signed in: {}", state.signed_in);
            println!("  State: {}", describe(state.phase()));
            println!("  Store: {}", config.db_path().display());
        }

        Commands::SignIn { identifier, secret } => match gate.sign_in(&identifier, &secret).await {
            SignInOutcome::Accepted(persisted) => {
                println!("Signed in as {}", identifier.trim());
                warn_unsaved(&persisted);
            }
            SignInOutcome::Rejected => {
                eprintln!("Invalid credentials. Use admin / admin.");
                return Ok(ExitCode::FAILURE);
            }
        },

        Commands::SignOut => {
            let persisted = gate.sign_out().await;
            println!("Signed out");
            warn_unsaved(&persisted);
        }

        Commands::Guard { path } => {
            let kind = RouteKind::from_path(&path);
            match kind.access(state) {
                RouteAccess::Pending => println!("pending"),
                RouteAccess::Render => println!("render"),
                RouteAccess::Redirect(to) => println!("redirect -> {}", to.path()),
            }
        }

        Commands::Logs { .. } => unreachable!("handled before the store is opened"),
    }

    Ok(ExitCode::SUCCESS)
}
