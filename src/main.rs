use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use stackcalc::calculator::{CalcResult, Evaluator, UnknownChars, copy_to_clipboard};
use stackcalc::config::{Config, DisplayConfig};
use stackcalc::keypad::{InputBuffer, Key};

/// A keypad calculator for `+ - * /` and parentheses.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Read configuration from this file instead of the default location.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Reject characters that are not part of an expression instead of
    /// skipping them.
    #[arg(long, global = true)]
    strict: bool,

    /// Increase log verbosity. `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a single expression.
    Eval {
        expression: String,

        /// Copy the raw result to the clipboard.
        #[arg(long)]
        copy: bool,
    },
    /// Replay a sequence of key presses, e.g. `12+3=*2=`.
    Keys { sequence: String },
    /// Read key sequences from stdin, one computation per line.
    Repl,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = Config::load(args.config.as_deref())?;
    let mut evaluator = config.evaluator();
    if args.strict {
        evaluator.unknown_chars = UnknownChars::Reject;
    }

    match args.command {
        Command::Eval { expression, copy } => eval(&expression, copy, &evaluator, &config.display),
        Command::Keys { sequence } => keys(&sequence, &evaluator, &config.display),
        Command::Repl => repl(&evaluator, &config.display),
    }
}

fn eval(
    expression: &str,
    copy: bool,
    evaluator: &Evaluator,
    display: &DisplayConfig,
) -> Result<ExitCode> {
    let result = CalcResult::from_evaluation(expression, evaluator.evaluate(expression), display);
    if !result.is_success() {
        eprintln!("{}", result.display());
        return Ok(ExitCode::FAILURE);
    }

    println!("{}", result.display());
    if copy
        && let Some(plain) = result.plain()
        && let Err(e) = copy_to_clipboard(plain)
    {
        tracing::warn!("{e}");
    }
    Ok(ExitCode::SUCCESS)
}

fn keys(sequence: &str, evaluator: &Evaluator, display: &DisplayConfig) -> Result<ExitCode> {
    let keys = Key::parse_sequence(sequence).context("invalid key sequence")?;
    let mut buffer = InputBuffer::new();

    for screen in buffer.replay(&keys, evaluator, display) {
        println!("{screen}");
    }
    Ok(ExitCode::SUCCESS)
}

fn repl(evaluator: &Evaluator, display: &DisplayConfig) -> Result<ExitCode> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut buffer = InputBuffer::new();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        let keys = match Key::parse_sequence(&line) {
            Ok(keys) => keys,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        if keys.is_empty() {
            continue;
        }

        let screen = buffer.run_line(&keys, evaluator, display);
        writeln!(stdout, "{screen}").context("failed to write to stdout")?;
    }
    Ok(ExitCode::SUCCESS)
}
