//! wordrill main entry point
//!
//! Subcommands:
//! 1. categories - list the categories of the word list with counts
//! 2. show - print the word cards of one category, optionally speaking them
//! 3. drill - quiz the learner on one category
//! 4. say - speak a piece of text through the configured backends

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::{debug, error, info};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tokio::io::BufReader;
use wordrill::quiz::{Drill, QuizSession};
use wordrill::speech::create_dispatcher;
use wordrill::state::config::Config;
use wordrill::state::Settings;
use wordrill::words::{read_showcase, render_showcase, Category, CategoryKind, WordBank};

#[derive(Parser, Debug)]
#[command(name = "wordrill", version, about = "Vocabulary drill with text-to-speech")]
struct Cli {
    /// Config file (default: ~/.wordrill.cfg)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Word list JSON file (overrides the config)
    #[arg(long, short = 'w', global = true)]
    words: Option<PathBuf>,

    /// Write debug logs to wordrill.log
    #[arg(long, short = 'd', global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List categories and how many words each holds
    Categories {
        /// Only this kind: scene, level or book
        #[arg(long, short = 'k')]
        kind: Option<CategoryKind>,
    },
    /// Show the word cards of a category
    Show {
        #[arg(long, short = 'k')]
        kind: CategoryKind,
        /// Category value; omit for words without one
        #[arg(long, short = 'c')]
        category: Option<String>,
        /// Speak each word after its card
        #[arg(long)]
        speak: bool,
    },
    /// Drill a category
    Drill {
        #[arg(long, short = 'k')]
        kind: CategoryKind,
        /// Category value; omit for words without one
        #[arg(long, short = 'c')]
        category: Option<String>,
        /// Speak each word as it is shown
        #[arg(long)]
        speak: bool,
        /// Ring the bell on correct and wrong answers
        #[arg(long)]
        sound: bool,
    },
    /// Speak text through the configured speech backends
    Say {
        text: Vec<String>,
    },
}

/// Exit status of `say` when no backend could speak
const EXIT_SPEECH_UNAVAILABLE: i32 = 2;

fn init_logging(debug_mode: bool) {
    if debug_mode {
        // Debug mode: write to wordrill.log file
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("wordrill.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open wordrill.log for debug logging: {}", e);
                eprintln!("Continuing without file logging...");
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }
        info!(
            "wordrill version {} starting (debug mode, logging to wordrill.log)",
            wordrill::VERSION
        );
    } else {
        // Normal mode: only errors, unless RUST_LOG says otherwise
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Error)
            .parse_default_env()
            .init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run(cli).await {
        Ok(code) => process::exit(code),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<i32> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    debug!("Configuration loaded from {:?}", config.path());

    let load_words = || -> anyhow::Result<WordBank> {
        let path = cli.words.clone().unwrap_or_else(|| config.words_path());
        let bank = WordBank::load(&path)?;
        if bank.is_empty() {
            bail!("Word list {} holds no words", path.display());
        }
        Ok(bank)
    };

    match cli.command {
        Command::Categories { kind } => {
            let bank = load_words()?;
            let kinds = match kind {
                Some(kind) => vec![kind],
                None => CategoryKind::ALL.to_vec(),
            };
            let mut out = io::stdout().lock();
            for kind in kinds {
                writeln!(out, "{}", kind.title())?;
                for (category, count) in bank.categories(kind) {
                    writeln!(out, "  {} ({})", category, count)?;
                }
            }
            Ok(0)
        }
        Command::Show {
            kind,
            category,
            speak,
        } => {
            let bank = load_words()?;
            let category = Category::parse(kind, category.as_deref());
            let entries = bank.filter(&category);
            if entries.is_empty() {
                bail!("No words in category '{}'", category);
            }
            if speak {
                let mut speech = create_dispatcher(&config)?;
                let spoken =
                    read_showcase(category.label(), &entries, &mut speech, &mut io::stdout())
                        .await?;
                debug!("Spoke {} of {} words", spoken, entries.len());
            } else {
                print!("{}", render_showcase(category.label(), &entries));
            }
            Ok(0)
        }
        Command::Drill {
            kind,
            category,
            speak,
            sound,
        } => {
            let bank = load_words()?;
            let category = Category::parse(kind, category.as_deref());
            let items = bank.quiz_items(&category);
            if items.is_empty() {
                bail!("No words in category '{}'", category);
            }

            let settings = Settings::from_config(&config, speak, sound);
            let speech = create_dispatcher(&config)
                .map_err(|e| info!("Speech disabled: {}", e))
                .ok();
            let session = QuizSession::new(items, config.advance_delay());

            let mut drill = Drill::new(
                session,
                category.label(),
                speech,
                settings,
                BufReader::new(tokio::io::stdin()),
                io::stdout(),
            );
            drill.run().await?;
            Ok(0)
        }
        Command::Say { text } => {
            let text = text.join(" ");
            if text.trim().is_empty() {
                bail!("Nothing to say");
            }
            let mut speech = create_dispatcher(&config)?;
            if speech.speak(&text).await {
                speech.wait().await;
                Ok(0)
            } else {
                eprintln!("Speech unavailable");
                Ok(EXIT_SPEECH_UNAVAILABLE)
            }
        }
    }
}
