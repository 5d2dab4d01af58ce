use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use keycalc::caret::Caret;
use keycalc::config::Config;
use keycalc::history::{HistoryEntry, HistorySink};
use keycalc::service::SessionHandle;
use keycalc::session::{Session, Snapshot, parse_keys};

/// Keypad calculator for the terminal.
///
/// Keys: digits and `.`, operators `+ - × ÷ % √` (or `* x / r`), `~` toggles
/// the sign, `<` deletes, `=` commits the result, `c` resets.
#[derive(Parser)]
#[command(name = "keycalc", version, about)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Do not read or write the history file
    #[arg(long, global = true)]
    no_history: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<CliCommand>,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Apply a key sequence to a fresh session and print the outcome
    Keys {
        sequence: String,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
    /// List recorded calculations
    History {
        /// Remove all recorded calculations
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config =
        Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.no_history {
        config.history.enabled = false;
    }

    match cli.command {
        Some(CliCommand::Keys { sequence, json }) => run_keys(&config, &sequence, json),
        Some(CliCommand::History { clear }) => run_history(&config, clear),
        None => run_interactive(&config).await,
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_session(config: &Config) -> Result<Session> {
    let session = Session::from_config(config);
    match config.history.open().context("Failed to open history")? {
        Some(history) => Ok(session.with_history(history)),
        None => Ok(session),
    }
}

fn run_keys(config: &Config, sequence: &str, json: bool) -> Result<()> {
    let commands = parse_keys(sequence)?;
    let mut session = build_session(config)?;
    let snapshot = session.apply_all(commands);

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", render(&snapshot, None));
    }
    Ok(())
}

fn run_history(config: &Config, clear: bool) -> Result<()> {
    let Some(mut history) = config.history.open().context("Failed to open history")? else {
        println!("History is disabled");
        return Ok(());
    };

    if clear {
        history.clear()?;
        println!("History cleared");
    } else {
        print_history(&history.entries()?);
    }
    Ok(())
}

fn print_history(entries: &[HistoryEntry]) {
    if entries.is_empty() {
        println!("Empty");
        return;
    }
    for entry in entries {
        println!("{entry}\n");
    }
}

async fn run_interactive(config: &Config) -> Result<()> {
    let handle = SessionHandle::spawn(build_session(config)?)
        .context("Failed to start session worker")?;

    let (caret, blink) = if config.caret.enabled {
        let (caret, blink) = Caret::spawn(config.caret.period());
        (caret, Some(blink))
    } else {
        (Caret::steady(), None)
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut snapshot = handle.apply_async(Vec::new()).await?;

    loop {
        let prompt = format!("{}\n> ", render(&snapshot, Some(&caret)));
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim() {
            "quit" | "exit" => break,
            "history" => print_history(&handle.history_async().await?),
            keys => match parse_keys(keys) {
                Ok(commands) => snapshot = handle.apply_async(commands).await?,
                Err(err) => eprintln!("{err}"),
            },
        }
    }

    if let Some(blink) = blink {
        blink.abort();
    }
    Ok(())
}

/// Expression, optional caret, and the result prefixed with `=`.
fn render(snapshot: &Snapshot, caret: Option<&Caret>) -> String {
    let mut line = snapshot.expression.clone();
    if let Some(caret) = caret {
        line.push(caret.glyph());
    }
    if !snapshot.display.is_empty() {
        line.push_str(&format!("  = {}", snapshot.display));
    }
    line
}
