// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Result};
use chordsmith::config::{ProgressionFile, Settings};
use chordsmith::suggest::{build_prompt, parse_suggestions};
use chordsmith::{ChatCompletionsClient, Error, ProgressionStore, SuggestionPipeline};
use tracing::{info, warn, Level};

fn print_usage() {
    println!("chordsmith - Chord progression assistant");
    println!();
    println!("Usage: chordsmith [--config <FILE>] [--verbose] <COMMAND>");
    println!();
    println!("Commands:");
    println!("  --show <SESSION>                 Print the progression in a session file");
    println!("  --key <SESSION> <KEY>            Set the key of a session");
    println!("  --set <SESSION> <N> <CHORD>      Put CHORD in slot N (N may be one past the end)");
    println!("  --insert <SESSION> <N>           Insert an empty slot before slot N");
    println!("  --clear <SESSION> <N>            Empty slot N");
    println!("  --remove <SESSION> <N>           Delete slot N");
    println!("  --prompt <SESSION> <N>           Print the prompt for slot N without sending it");
    println!("  --suggest <SESSION> <N>          Ask the model for chords for slot N");
    println!("  --validate <FILE>                Validate a saved model response");
    println!("  --help                           Show this help message");
    println!();
    println!("Slots are numbered from 0. Settings come from --config, then $CHORDSMITH_CONFIG.");
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_position(arg: &str) -> Result<usize> {
    arg.parse()
        .map_err(|_| anyhow!("Invalid position: {} (positions are whole numbers from 0)", arg))
}

/// Load a session, or start an empty one in the default key if the file is absent
fn open_session(settings: &Settings, path: &Path) -> Result<ProgressionStore> {
    if path.exists() {
        ProgressionFile::load(path)?.to_store()
    } else {
        info!("Starting new session at {:?}", path);
        Ok(ProgressionStore::with_key(settings.default_key.clone()))
    }
}

fn save_session(store: &ProgressionStore, path: &Path) -> Result<()> {
    ProgressionFile::from(store.snapshot()).save(path)?;
    println!("{}", store.snapshot());
    Ok(())
}

fn set_chord(settings: &Settings, path: &Path, position: usize, chord: &str) -> Result<()> {
    let mut store = open_session(settings, path)?;
    store.put_chord(position, chord)?;
    save_session(&store, path)
}

fn print_prompt(path: &Path, position: usize) -> Result<()> {
    let snapshot = ProgressionFile::load(path)?.to_store()?.snapshot();
    snapshot.check_position(position)?;
    println!("{}", build_prompt(&snapshot, position));
    Ok(())
}

fn validate_file(path: &Path) -> Result<()> {
    let text = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read response file {:?}: {}", path, e))?;
    let suggestions = parse_suggestions(&text)?;
    print_suggestions(&suggestions);
    Ok(())
}

fn print_suggestions(suggestions: &[String]) {
    for (i, chord) in suggestions.iter().enumerate() {
        println!("{:>3}. {}", i + 1, chord);
    }
}

/// Request suggestions with a timeout per attempt and up to
/// `max_attempts` attempts. Bad positions are never retried.
async fn suggest(settings: &Settings, path: &Path, position: usize) -> Result<()> {
    let snapshot = ProgressionFile::load(path)?.to_store()?.snapshot();
    println!("{}", snapshot);

    let client = ChatCompletionsClient::from_config(&settings.llm)?;
    let pipeline = SuggestionPipeline::new(client);
    let attempts = settings.llm.max_attempts.max(1);
    let timeout = Duration::from_secs(settings.llm.timeout_secs);

    let mut last_error = anyhow!("No attempts made");
    for attempt in 1..=attempts {
        match tokio::time::timeout(timeout, pipeline.suggest_chords(&snapshot, position)).await {
            Ok(Ok(suggestions)) => {
                println!();
                println!("Suggestions for slot {}:", position);
                print_suggestions(&suggestions);
                return Ok(());
            }
            Ok(Err(e @ Error::InvalidPosition { .. })) => return Err(e.into()),
            Ok(Err(e)) => {
                warn!(attempt, attempts, "Suggestion attempt failed: {}", e);
                last_error = e.into();
            }
            Err(_) => {
                warn!(attempt, attempts, "Suggestion attempt timed out after {:?}", timeout);
                last_error = anyhow!("Suggestion request timed out after {:?}", timeout);
            }
        }
    }

    Err(last_error)
}

fn require<'a>(args: &'a [String], count: usize, usage: &str) -> &'a [String] {
    if args.len() < count + 1 {
        eprintln!("Error: {} requires {}", args[0], usage);
        eprintln!("Run with --help for usage information");
        std::process::exit(1);
    }
    &args[1..=count]
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let verbose = args.iter().any(|a| a == "--verbose" || a == "-v");
    args.retain(|a| a != "--verbose" && a != "-v");

    let mut config_path: Option<PathBuf> = None;
    if let Some(i) = args.iter().position(|a| a == "--config") {
        if i + 1 >= args.len() {
            eprintln!("Error: --config requires a file path");
            std::process::exit(1);
        }
        config_path = Some(PathBuf::from(args.remove(i + 1)));
        args.remove(i);
    }

    init_logging(verbose);

    if args.is_empty() {
        println!("chordsmith - Chord progression assistant");
        println!("Run with --help for usage information");
        return Ok(());
    }

    let settings = Settings::resolve(config_path.as_deref())?;

    match args[0].as_str() {
        "--show" => {
            let a = require(&args, 1, "a session file");
            let store = ProgressionFile::load(&a[0])?.to_store()?;
            println!("{}", store.snapshot());
        }
        "--key" => {
            let a = require(&args, 2, "a session file and a key");
            let path = Path::new(&a[0]);
            let mut store = open_session(&settings, path)?;
            store.set_key(a[1].clone());
            save_session(&store, path)?;
        }
        "--set" => {
            let a = require(&args, 3, "a session file, a position and a chord");
            set_chord(&settings, Path::new(&a[0]), parse_position(&a[1])?, &a[2])?;
        }
        "--insert" => {
            let a = require(&args, 2, "a session file and a position");
            let path = Path::new(&a[0]);
            let mut store = ProgressionFile::load(path)?.to_store()?;
            store.add_slot(Some(parse_position(&a[1])?))?;
            save_session(&store, path)?;
        }
        "--clear" => {
            let a = require(&args, 2, "a session file and a position");
            let path = Path::new(&a[0]);
            let mut store = ProgressionFile::load(path)?.to_store()?;
            store.remove_chord(parse_position(&a[1])?)?;
            save_session(&store, path)?;
        }
        "--remove" => {
            let a = require(&args, 2, "a session file and a position");
            let path = Path::new(&a[0]);
            let mut store = ProgressionFile::load(path)?.to_store()?;
            store.remove_slot(parse_position(&a[1])?)?;
            save_session(&store, path)?;
        }
        "--prompt" => {
            let a = require(&args, 2, "a session file and a position");
            print_prompt(Path::new(&a[0]), parse_position(&a[1])?)?;
        }
        "--suggest" => {
            let a = require(&args, 2, "a session file and a position");
            suggest(&settings, Path::new(&a[0]), parse_position(&a[1])?).await?;
        }
        "--validate" => {
            let a = require(&args, 1, "a response file");
            validate_file(Path::new(&a[0]))?;
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", args[0]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
