// src/main.rs
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{error, info};

use clinical_tokenizer::{build_tokenizer_with, SentenceSplitter, TokenizerConfig, TokenizerError};

#[derive(Parser)]
#[command(name = "clinical-tokenizer")]
#[command(version)]
#[command(about = "Sentence and word tokenizer for clinical notes", long_about = None)]
struct Cli {
    /// Text file to tokenize
    input: PathBuf,

    /// JSON tokenizer config; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Include token text alongside offsets
    #[arg(short, long)]
    keep_token_strings: bool,

    /// Use the rule-file sentence segmenter instead of Punkt
    #[arg(long)]
    rule_file_sentences: bool,

    /// Rule file for the rule-file segmenter
    #[arg(long, requires = "rule_file_sentences")]
    rules: Option<PathBuf>,

    /// Apply the clinical preprocessing split patterns
    #[arg(long)]
    custom_preprocessing: bool,

    /// Print tokens as JSON instead of a summary
    #[arg(long)]
    json: bool,

    /// Worker threads for chunk tokenization (0 = all cores)
    #[arg(short = 't', long, default_value = "0")]
    threads: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn load_config(cli: &Cli) -> Result<TokenizerConfig, TokenizerError> {
    let mut config = match &cli.config {
        Some(path) => TokenizerConfig::from_json_file(path)?,
        None => TokenizerConfig::default(),
    };
    if cli.keep_token_strings || cli.json {
        config.keep_token_strings = true;
    }
    if cli.rule_file_sentences {
        config.sentence_splitter = match &cli.rules {
            Some(path) => SentenceSplitter::RuleFile { path: path.clone() },
            None => SentenceSplitter::rule_file_default(),
        };
    }
    if cli.custom_preprocessing {
        config.disable_custom_preprocessing = false;
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<(), TokenizerError> {
    if cli.threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
        {
            error!("Could not configure thread pool: {}", e);
        }
    }

    let config = load_config(&cli)?;

    let build_start = Instant::now();
    let tokenizer = build_tokenizer_with(&config)?;
    info!("Tokenizer built. (Took {:?})", build_start.elapsed());

    let content = fs::read_to_string(&cli.input)?;
    if content.trim().is_empty() {
        println!("File contains only whitespace. No tokens to process.");
        return Ok(());
    }

    let start_time = Instant::now();
    let sentences = tokenizer.tokenize(&content);
    let duration = start_time.elapsed();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&sentences)?);
        return Ok(());
    }

    let total_tokens: usize = sentences.iter().map(Vec::len).sum();
    println!("Time taken to tokenize: {:?}", duration);
    println!("Sentences: {}", sentences.len());
    println!("Total tokens produced: {}", total_tokens);

    println!("\nSample of first 20 tokens (or all if fewer):");
    let chars: Vec<char> = content.chars().collect();
    let sample: Vec<String> = sentences
        .iter()
        .flatten()
        .take(20)
        .map(|t| match &t.text {
            Some(text) => text.clone(),
            None => chars[t.start..t.end].iter().collect(),
        })
        .collect();
    println!("{}", sample.join(" | "));
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
