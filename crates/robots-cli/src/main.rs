//! `robots-cli` – command line front end for the robot workspace.
//!
//! 1. For commands that build robots, loads `~/.robots/config.toml` (or
//!    `$ROBOTS_CONFIG`) and extends the built-in factory catalog with the
//!    models and presets it declares.
//! 2. Runs one command: `models`, `check`, `validate`, `schema`, `init` or
//!    `help`.
//!
//! Exit status is `0` on success and `1` on any error.

mod commands;
mod config;

use std::io::Read;
use std::process::ExitCode;

use colored::Colorize;
use tracing::debug;

fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// RUST_LOG controls the filter (default "info"); ROBOTS_LOG_FORMAT=json
/// switches to newline-delimited JSON.  Logs go to stderr so command output
/// on stdout stays pipeable.
fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if std::env::var("ROBOTS_LOG_FORMAT").as_deref() == Ok("json") {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

fn run(args: &[String]) -> Result<String, String> {
    let rest: Vec<&str> = args.iter().skip(1).map(String::as_str).collect();
    match args.first().map(String::as_str) {
        None | Some("help") | Some("--help") | Some("-h") => Ok(commands::help()),
        Some("schema") => commands::schema(),
        Some("init") => init(),
        Some("models") => Ok(commands::models(&load_config()?.factory())),
        Some("check") => {
            let cfg = load_config()?;
            let model = rest.first().copied().unwrap_or(cfg.default_model.as_str());
            commands::check(&cfg.factory(), model)
        }
        Some("validate") => {
            let cfg = load_config()?;
            let (model, source) = match rest.as_slice() {
                [source] => (cfg.default_model.as_str(), *source),
                [model, source] => (*model, *source),
                _ => return Err("usage: robots validate [model] <file|->".to_string()),
            };
            let raw = read_batch(source)?;
            commands::validate(&cfg.factory(), model, &raw)
        }
        Some(other) => Err(format!(
            "unknown command '{}'. Run `robots help` for available commands",
            other
        )),
    }
}

/// Only the commands that build robots read the config file.
fn load_config() -> Result<config::Config, String> {
    let cfg = config::load_or_default()?;
    debug!(path = %config::config_path().display(), default_model = %cfg.default_model, "config loaded");
    Ok(cfg)
}

/// Read a batch document from a file path, or from stdin when `source` is `-`.
fn read_batch(source: &str) -> Result<String, String> {
    if source == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .map_err(|e| format!("Failed to read batch from stdin: {}", e))?;
        return Ok(raw);
    }
    std::fs::read_to_string(source).map_err(|e| format!("Failed to read batch at {}: {}", source, e))
}

fn init() -> Result<String, String> {
    let path = config::config_path();
    if path.exists() {
        return Ok(format!("  Config already exists at {}\n", path.display().to_string().bold()));
    }
    config::save_to(&config::Config::default(), &path)?;
    Ok(format!(
        "  {} Config saved to {}\n",
        "✓".green().bold(),
        path.display().to_string().bold()
    ))
}
