//! modboard - Legacy web pattern modernization dashboard

mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use modboard_core::recommendations::top_recommendation;
use modboard_core::{
    derive_recommendations, Command, CoreError, DashboardConfig, Dispatcher, Reply,
};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::{format_reply, OutputStyle};

#[derive(Parser)]
#[command(
    name = "modboard",
    version,
    about = "Legacy web pattern modernization dashboard",
    long_about = "Scans JavaScript, TypeScript, CSS and HTML sources for legacy patterns,\n\
                  tracks fixes over a session and derives progress, recommendations and a\n\
                  five-phase modernization timeline.\n\
                  \n\
                  Examples:\n\
                    modboard                         # Interactive session (default)\n\
                    modboard analyze src/            # Scan and print dashboard\n\
                    modboard report src/ -o report.md\n\
                    modboard export src/ -o snapshot.json\n\
                    modboard features grid           # Search the feature catalog\n\
                    modboard alternatives var        # Modern replacements for a pattern\n\
                  \n\
                  Environment Variables:\n\
                    MODBOARD_CONFIG                  # Config file path\n\
                    MODBOARD_FORMAT                  # Force output format: json|table\n\
                    MODBOARD_NO_COLOR                # Disable ANSI colors\n\
                    RUST_LOG                         # Log filter (default: warn)"
)]
struct Cli {
    #[command(subcommand)]
    mode: Option<Mode>,

    /// Path to config file (default: <config dir>/modboard/config.toml)
    #[arg(long, env = "MODBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Force output format (json|table)
    #[arg(long, env = "MODBOARD_FORMAT", value_parser = ["json", "table"])]
    format: Option<String>,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, env = "MODBOARD_NO_COLOR")]
    no_color: bool,
}

#[derive(Subcommand)]
enum Mode {
    /// Interactive session reading commands from stdin (default)
    Session,
    /// Scan files or directories and print the dashboard
    Analyze {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Scan, then write a Markdown report
    Report {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        #[arg(long, short = 'o')]
        output: PathBuf,
    },
    /// Scan, then write a JSON snapshot
    Export {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        #[arg(long, short = 'o')]
        output: PathBuf,
    },
    /// List or search catalog features
    Features {
        query: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show modern alternatives for a legacy pattern
    Alternatives { pattern: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .init();

    let config = DashboardConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    let dispatcher = Dispatcher::with_defaults(config);

    let style = OutputStyle {
        json: cli.format.as_deref() == Some("json"),
        no_color: cli.no_color,
    };

    match cli.mode.unwrap_or(Mode::Session) {
        Mode::Session => run_session(&dispatcher, style).await?,
        Mode::Analyze { paths, json } => {
            run_analyze(&dispatcher, paths, with_json(style, json))?;
        }
        Mode::Report { paths, output } => {
            analyze_all(&dispatcher, paths)?;
            let reply = dispatcher.dispatch(Command::Report { path: output })?;
            println!("{}", format_reply(&reply, style));
        }
        Mode::Export { paths, output } => {
            analyze_all(&dispatcher, paths)?;
            let reply = dispatcher.dispatch(Command::Export { path: output })?;
            println!("{}", format_reply(&reply, style));
        }
        Mode::Features { query, json } => {
            let features = match query {
                Some(query) => dispatcher.catalog().search(&query),
                None => dispatcher.catalog().features().collect(),
            };
            let reply = Reply::Features(features.into_iter().cloned().collect());
            println!("{}", format_reply(&reply, with_json(style, json)));
        }
        Mode::Alternatives { pattern } => {
            let reply = dispatcher.dispatch(Command::Alternatives { pattern })?;
            println!("{}", format_reply(&reply, style));
        }
    }

    Ok(())
}

fn with_json(style: OutputStyle, json: bool) -> OutputStyle {
    OutputStyle {
        json: style.json || json,
        ..style
    }
}

fn analyze_all(dispatcher: &Dispatcher, paths: Vec<PathBuf>) -> Result<Vec<Reply>> {
    paths
        .into_iter()
        .map(|path| {
            dispatcher
                .dispatch(Command::Analyze { path: path.clone() })
                .with_context(|| format!("Failed to analyze {}", path.display()))
        })
        .collect()
}

fn run_analyze(dispatcher: &Dispatcher, paths: Vec<PathBuf>, style: OutputStyle) -> Result<()> {
    let mut files = Vec::new();
    for reply in analyze_all(dispatcher, paths)? {
        if let Reply::Analyzed(batch) = reply {
            files.extend(batch);
        }
    }

    if style.json {
        let tracker = dispatcher.tracker().read();
        println!("{}", tracker.export_snapshot()?);
        return Ok(());
    }

    println!("{}\n", format_reply(&Reply::Analyzed(files), style));
    for command in [
        Command::Metrics,
        Command::TopFeatures { limit: None },
        Command::Recommendations,
        Command::Timeline,
    ] {
        println!("{}\n", format_reply(&dispatcher.dispatch(command)?, style));
    }

    let metrics = dispatcher.tracker().read().metrics();
    let recommendations = derive_recommendations(&metrics, dispatcher.catalog());
    if let Some(next) = top_recommendation(&recommendations) {
        println!("Next step: {} ({})", next.title, next.action);
    }
    Ok(())
}

/// Read commands line by line until EOF or `quit`
async fn run_session(dispatcher: &Dispatcher, style: OutputStyle) -> Result<()> {
    let mut events = dispatcher.events().subscribe();
    let event_log = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            debug!(?event, "Metrics event");
        }
    });

    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if !style.json {
        stdout
            .write_all(b"modboard session. Type 'help' for commands, 'quit' to exit.\n")
            .await?;
    }

    loop {
        if !style.json {
            stdout.write_all(b"modboard> ").await?;
            stdout.flush().await?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let trimmed = line.trim();
        if matches!(trimmed, "quit" | "exit") {
            break;
        }

        let output = match Command::parse(trimmed) {
            Ok(None) => continue,
            Ok(Some(command)) => match dispatcher.dispatch(command) {
                Ok(reply) => format_reply(&reply, style),
                Err(err) => describe_error(&err),
            },
            Err(err) => describe_error(&err.into()),
        };

        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
    }

    event_log.abort();
    Ok(())
}

fn describe_error(err: &anyhow::Error) -> String {
    let mut message = format!("Error: {:#}", err);
    if let Some(hint) = err.downcast_ref::<CoreError>().and_then(CoreError::suggestion) {
        message.push_str(&format!("\n  Hint: {}", hint));
    }
    message
}
