use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use markov_core::{EngineConfig, Pos, Trainer, Trie, Word, filter_input, generate, smooth_output, tokenize_document};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Deserialize;

#[derive(Parser)]
#[command(name = "markov", about = "Trie-backed markov text engine CLI")]
struct Cli {
    /// Path to the snapshot file
    #[arg(long, global = true, default_value = "markov.snapshot")]
    store: PathBuf,

    /// TOML file overriding engine defaults (window_size, weight_count, weight_rating, subject_pos_priority)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the store on one or more text files
    Train {
        /// File path(s) to train on
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Generate text by filling a POS skeleton
    Generate {
        /// Comma- or space-separated POS tags, e.g. "NOUN,VERB,NOUN,EOS"
        skeleton: String,

        /// Subject word(s) to seed the generation with
        #[arg(required = true)]
        subjects: Vec<String>,

        /// RNG seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Look up a word and print its POS and neighbor table
    Select {
        word: String,
    },

    /// Print vocabulary size and total training mass
    Stats,

    /// Export the store to a JSON file
    Export {
        path: PathBuf,
    },

    /// Import a store from a JSON file
    Import {
        path: PathBuf,
    },

    /// Adjust a neighbor's rating
    Rate {
        word: String,
        neighbor: String,
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// Mirrors `EngineConfig`'s fields as plain strings so POS tags can be
/// written the way a human would type them in a TOML file.
#[derive(Debug, Deserialize)]
struct TomlConfig {
    window_size: Option<u32>,
    weight_count: Option<f64>,
    weight_rating: Option<f64>,
    subject_pos_priority: Option<Vec<String>>,
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let mut config = EngineConfig::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let text =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let toml_config: TomlConfig =
        toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))?;

    if let Some(window_size) = toml_config.window_size {
        config.window_size = window_size;
    }
    if let Some(weight_count) = toml_config.weight_count {
        config.weight_count = weight_count;
    }
    if let Some(weight_rating) = toml_config.weight_rating {
        config.weight_rating = weight_rating;
    }
    if let Some(priority) = toml_config.subject_pos_priority {
        config.subject_pos_priority = priority.iter().map(|tag| Pos::from_tag(tag)).collect();
    }

    Ok(config)
}

fn open_trie(path: &Path) -> Result<Trie> {
    if path.exists() {
        markov_store::load(path).with_context(|| format!("failed to load store {}", path.display()))
    } else {
        Ok(Trie::new())
    }
}

fn parse_skeleton(skeleton: &str) -> Vec<Pos> {
    skeleton
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(Pos::from_tag)
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Train { files } => cmd_train(&cli, files),
        Commands::Generate { skeleton, subjects, seed } => cmd_generate(&cli, skeleton, subjects, *seed),
        Commands::Select { word } => cmd_select(&cli, word),
        Commands::Stats => cmd_stats(&cli),
        Commands::Export { path } => cmd_export(&cli, path),
        Commands::Import { path } => cmd_import(&cli, path),
        Commands::Rate { word, neighbor, delta } => cmd_rate(&cli, word, neighbor, *delta),
    }
}

fn cmd_train(cli: &Cli, files: &[PathBuf]) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let mut trie = open_trie(&cli.store)?;

    for path in files {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let filtered = filter_input(Some(&raw)).unwrap_or(raw);
        let document = tokenize_document(&filtered);
        let sentence_count = document.len();

        Trainer::new(&mut trie, config.window_size).learn(&document);
        println!("trained on {} → {} sentences", path.display(), sentence_count);
    }

    markov_store::save(&trie, &cli.store)
        .with_context(|| format!("failed to save store {}", cli.store.display()))?;
    println!("saved {}", cli.store.display());
    Ok(())
}

fn cmd_generate(cli: &Cli, skeleton: &str, subjects: &[String], seed: Option<u64>) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let trie = open_trie(&cli.store)?;

    let skeleton = parse_skeleton(skeleton);
    let subject_words: Vec<Word> = subjects
        .iter()
        .filter_map(|text| {
            let found = trie.select(text);
            if found.is_none() {
                eprintln!("warning: subject '{text}' not found in store, skipping");
            }
            found
        })
        .collect();

    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let sentences = generate(&trie, &skeleton, &subject_words, &config, &mut rng)
        .context("generation failed")?;

    for sentence in sentences {
        let joined = sentence
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let smoothed = smooth_output(Some(&joined)).unwrap_or(joined);
        println!("{smoothed}");
    }
    Ok(())
}

fn cmd_select(cli: &Cli, word: &str) -> Result<()> {
    let trie = open_trie(&cli.store)?;
    let Some(found) = trie.select(word) else {
        println!("'{word}' not found");
        return Ok(());
    };

    println!("{} ({:?})", found.text, found.pos);
    println!("{:<20} {:>8} {:>8}  dist", "neighbor", "count", "rating");
    for neighbor in found.neighbors.values() {
        println!(
            "{:<20} {:>8} {:>8}  {:?}",
            neighbor.text, neighbor.count, neighbor.rating, neighbor.dist
        );
    }
    Ok(())
}

fn cmd_stats(cli: &Cli) -> Result<()> {
    let trie = open_trie(&cli.store)?;
    let words = trie.words();
    let total_mass: u64 = words
        .iter()
        .flat_map(|w| w.neighbors.values())
        .map(|n| n.count)
        .sum();

    println!("store:      {}", cli.store.display());
    println!("vocabulary: {}", words.len());
    println!("mass:       {total_mass}");
    Ok(())
}

fn cmd_export(cli: &Cli, path: &Path) -> Result<()> {
    let trie = open_trie(&cli.store)?;
    let value = trie.to_json();
    let file = std::fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, &value).context("failed to serialize trie")?;
    println!("exported to {}", path.display());
    Ok(())
}

fn cmd_import(cli: &Cli, path: &Path) -> Result<()> {
    let file = std::fs::File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let value: serde_json::Value =
        serde_json::from_reader(file).with_context(|| format!("failed to parse {}", path.display()))?;
    let trie = Trie::from_json(&value).context("imported JSON does not match the trie schema")?;

    markov_store::save(&trie, &cli.store)
        .with_context(|| format!("failed to save store {}", cli.store.display()))?;
    println!(
        "imported from {}. vocabulary={}",
        path.display(),
        trie.words().len()
    );
    Ok(())
}

fn cmd_rate(cli: &Cli, word: &str, neighbor: &str, delta: i64) -> Result<()> {
    let mut trie = open_trie(&cli.store)?;
    let mut found = trie
        .select(word)
        .with_context(|| format!("'{word}' not found in store"))?;

    if !found.adjust_rating(neighbor, delta) {
        anyhow::bail!("'{word}' has no neighbor '{neighbor}'");
    }

    let new_rating = found.get_neighbor(neighbor).expect("just adjusted").rating;
    trie.update(found);

    markov_store::save(&trie, &cli.store)
        .with_context(|| format!("failed to save store {}", cli.store.display()))?;
    println!("{word} -> {neighbor}: rating = {new_rating}");
    Ok(())
}
