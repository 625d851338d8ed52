//! spam-rs: Naive Bayes email spam classifier
//!
//! # Usage
//!
//! ```bash
//! # Train from a labeled file and save the model
//! spam-rs train --file emails.txt --output model.txt
//!
//! # Classify one message with a saved model
//! spam-rs --model model.txt classify "win free money now"
//!
//! # Classify lines from stdin until "quit"
//! spam-rs --model model.txt interactive
//!
//! # Run the built-in accuracy suite on the built-in corpus
//! spam-rs evaluate --defaults
//!
//! # Print the effective configuration
//! spam-rs --config spam.toml config
//! ```

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use spam_rs::config::{Config, LoggingConfig};
use spam_rs::spam::{ClassificationResult, SpamManager};
use spam_rs::SpamError;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "spam-rs")]
#[command(version, about = "Naive Bayes email spam classifier", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Model file restored before running the command
    #[arg(short, long, global = true)]
    model: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the model and optionally save it
    Train {
        /// Labeled training file ('1' spam / '0' ham per line)
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// Also train with the built-in example corpus
        #[arg(long)]
        defaults: bool,
        /// Where to save the trained model (defaults to --model)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Classify one message
    Classify {
        /// Message text
        #[arg(required = true)]
        text: Vec<String>,
        /// Train with the built-in corpus first
        #[arg(long)]
        defaults: bool,
    },
    /// Classify messages read from stdin, one per line, until "quit"
    Interactive {
        /// Train with the built-in corpus first
        #[arg(long)]
        defaults: bool,
    },
    /// Run the built-in accuracy suite
    Evaluate {
        /// Train with the built-in corpus first
        #[arg(long)]
        defaults: bool,
    },
    /// Show model statistics
    Stats,
    /// Print the effective configuration as TOML
    Config,
}

fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        "pretty" => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .init(),
        _ => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init(),
    }
}

fn print_result(
    out: &mut impl Write,
    result: &ClassificationResult,
    json: bool,
) -> anyhow::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(result)?)?;
    } else {
        writeln!(out, "Spam probability: {:.2}%", result.probability * 100.0)?;
        writeln!(out, "Classification: {}", result.verdict)?;
    }
    Ok(())
}

async fn require_training(manager: &SpamManager) -> anyhow::Result<()> {
    match manager.ensure_trained().await {
        Err(SpamError::NoTrainingData) => {
            bail!("No training data available! Train first (use --model or --defaults).")
        }
        other => Ok(other?),
    }
}

/// Strip the line terminator and decode
fn decode_line(buf: &[u8]) -> Result<&str, std::str::Utf8Error> {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    std::str::from_utf8(line)
}

async fn interactive<R>(
    manager: &SpamManager,
    mut input: R,
    out: &mut impl Write,
    json: bool,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    eprintln!("Enter email to classify (or 'quit' to exit):");

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let line = match decode_line(&buf) {
            Ok(line) => line.trim_end(),
            Err(e) => {
                warn!("Skipping line that is not valid UTF-8: {}", e);
                continue;
            }
        };
        if line == "quit" {
            break;
        }
        if line.is_empty() {
            continue;
        }

        match manager.classify(line).await {
            Ok(result) => print_result(out, &result, json)?,
            Err(e @ SpamError::InputTooLong { .. }) => warn!("{}", e),
            Err(e) => return Err(e.into()),
        }
        out.flush()?;
    }

    Ok(())
}

async fn save_if_requested(manager: &SpamManager, target: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = target {
        manager
            .save(path)
            .await
            .with_context(|| format!("Could not save model to {}", path.display()))?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    init_logging(&config.logging);

    let manager = SpamManager::new(&config);
    let model_path = cli
        .model
        .clone()
        .or_else(|| config.storage.model_path.as_ref().map(PathBuf::from));

    let needs_model = !matches!(cli.command, Commands::Config);
    if let Some(path) = model_path.as_ref().filter(|_| needs_model) {
        if path.exists() {
            manager.restore(path).await?;
        } else if !matches!(cli.command, Commands::Train { .. }) {
            bail!("Model file {} does not exist", path.display());
        } else {
            info!("Model file {} not found, starting from an empty model", path.display());
        }
    }

    match cli.command {
        Commands::Train {
            file,
            defaults,
            output,
        } => {
            let file = file.or_else(|| config.storage.training_path.as_ref().map(PathBuf::from));
            if file.is_none() && !defaults {
                bail!("Nothing to train from: pass --file or --defaults");
            }

            if defaults {
                manager.train_defaults().await;
            }
            if let Some(file) = &file {
                let report = manager.load_training_file(file).await?;
                if cli.json {
                    println!("{}", serde_json::to_string(&report)?);
                }
            }

            save_if_requested(&manager, output.as_deref().or(model_path.as_deref())).await?;

            if !cli.json {
                let stats = manager.stats().await;
                println!(
                    "Spam emails: {}, Ham emails: {}",
                    stats.total_spam_emails, stats.total_ham_emails
                );
                println!("Vocabulary size: {} words", stats.vocabulary_size);
            }
        }
        Commands::Classify { text, defaults } => {
            if defaults {
                manager.train_defaults().await;
            }
            require_training(&manager).await?;

            let result = manager.classify(&text.join(" ")).await?;
            print_result(&mut std::io::stdout(), &result, cli.json)?;
        }
        Commands::Interactive { defaults } => {
            if defaults {
                manager.train_defaults().await;
            }
            require_training(&manager).await?;
            let stdin = BufReader::new(tokio::io::stdin());
            interactive(&manager, stdin, &mut std::io::stdout(), cli.json).await?;
        }
        Commands::Evaluate { defaults } => {
            if defaults {
                manager.train_defaults().await;
            }
            require_training(&manager).await?;

            let report = manager.evaluate().await;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for (i, outcome) in report.outcomes.iter().enumerate() {
                    println!("\nTest {}: {}", i + 1, outcome.description);
                    println!("Email: {}", outcome.text);
                    println!(
                        "Expected: {}, Predicted: {}, Probability: {:.2}%",
                        outcome.expected,
                        outcome.predicted,
                        outcome.probability * 100.0
                    );
                    println!("{}", if outcome.is_correct() { "CORRECT" } else { "WRONG" });
                }
                println!(
                    "\nAccuracy: {}/{} ({:.2}%)",
                    report.correct,
                    report.total,
                    report.accuracy() * 100.0
                );
            }
        }
        Commands::Stats => {
            let stats = manager.stats().await;
            if cli.json {
                println!("{}", serde_json::to_string(&stats)?);
            } else {
                println!("Spam emails:     {}", stats.total_spam_emails);
                println!("Ham emails:      {}", stats.total_ham_emails);
                println!("Spam words:      {}", stats.total_spam_words);
                println!("Ham words:       {}", stats.total_ham_words);
                println!("Vocabulary size: {}", stats.vocabulary_size);
            }
        }
        Commands::Config => print!("{}", config.to_toml()?),
    }

    Ok(())
}
