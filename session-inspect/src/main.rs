//! session-inspect - CLI tool for inspecting session state snapshots
//!
//! Loads a JSON snapshot of the client state and prints what the
//! read-model derives from it, useful for debugging login and entity
//! display issues without a running UI.

mod report;
mod snapshot;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use session_view::{Clock, FixedClock, SessionConfig, SessionStatus, SessionView, SystemClock};
use tabled::Table;

#[derive(Parser)]
#[command(name = "session-inspect")]
#[command(about = "Inspect a client state snapshot", long_about = None)]
struct Cli {
    /// State snapshot file (JSON), or `-` for stdin
    #[arg(short, long, env = "SESSION_INSPECT_STATE", default_value = "-")]
    state: PathBuf,

    /// Evaluate expiry at this Unix time instead of the wall clock
    #[arg(long, env = "SESSION_INSPECT_NOW")]
    now: Option<i64>,

    /// Seconds of leeway past `exp`
    #[arg(long, env = "SESSION_VIEW_LEEWAY_SECS")]
    leeway: Option<u64>,

    /// Output format
    #[arg(short, long, default_value = "pretty")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Pretty,
    Json,
    Table,
}

#[derive(Subcommand)]
enum Commands {
    /// List entity names in order
    Names,
    /// Look up the color of an entity
    Color {
        /// Entity name (exact, case-sensitive)
        name: String,
    },
    /// Check whether the session token is still valid (exit 1 if not)
    Valid,
    /// Print the raw session token
    Token,
    /// Everything at once
    Summary,
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let clock: Box<dyn Clock> = match cli.now {
        Some(now) => Box::new(FixedClock(now)),
        None => Box::new(SystemClock),
    };
    let config = match cli.leeway {
        Some(leeway) => SessionConfig::with_leeway(leeway),
        None => SessionConfig::from_env(),
    };
    let view = SessionView::with_clock(clock).with_config(config);
    let state = snapshot::load_state(&cli.state)?;

    match cli.command {
        Commands::Names => {
            let names = view.entity_names(&state);
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&names)?),
                OutputFormat::Table => {
                    if names.is_empty() {
                        println!("No entities found");
                    } else {
                        println!("{}", Table::new(report::entity_rows(&state)));
                    }
                }
                OutputFormat::Pretty => {
                    if names.is_empty() {
                        println!("No entities found");
                    } else {
                        println!("{} {} entities:", "Found".bold(), names.len());
                        for name in names {
                            println!("  {}", name);
                        }
                    }
                }
            }
        }

        Commands::Color { name } => {
            let color = view.color_of(&state, &name);
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&color)?),
                OutputFormat::Pretty | OutputFormat::Table => match color {
                    Some(color) => println!("{} {}", name.bold(), color),
                    None => {
                        println!("{} No entity named {:?}", "✗".red(), name);
                        return Ok(ExitCode::FAILURE);
                    }
                },
            }
        }

        Commands::Valid => {
            let status = view.session_status(&state);
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
                OutputFormat::Pretty | OutputFormat::Table => print_status(&status),
            }
            if !status.is_valid() {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Token => {
            let token = view.current_token(&state);
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string(token)?),
                OutputFormat::Pretty | OutputFormat::Table => println!("{}", token),
            }
        }

        Commands::Summary => {
            let summary = report::summarize(&view, &state);
            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
                OutputFormat::Table => {
                    if summary.entities.is_empty() {
                        println!("No entities found");
                    } else {
                        println!("{}", Table::new(summary.entities.clone()));
                    }
                    print_status(&summary.session);
                }
                OutputFormat::Pretty => {
                    println!("{} {}", "Entities:".bold(), summary.entities.len());
                    for row in &summary.entities {
                        println!("  {} {}", row.name, row.color.cyan());
                    }
                    println!();
                    print_status(&summary.session);
                    if let Some(secs) = summary.expires_in {
                        println!("  Expires in: {}s", secs);
                    }
                    if let Some(email) = summary.claims.as_ref().and_then(|c| c.email.as_ref()) {
                        println!("  Email: {}", email);
                    }
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_status(status: &SessionStatus) {
    match status {
        SessionStatus::Valid { exp } => {
            println!("{} Session valid (exp {})", "✓".green(), exp);
        }
        SessionStatus::Expired { exp } => {
            println!("{} Session expired (exp {})", "✗".red(), exp);
        }
        SessionStatus::Malformed => {
            println!("{} Token present but unreadable", "✗".red());
        }
        SessionStatus::Absent => {
            println!("{} No session token", "●".yellow());
        }
    }
}
