//! PromptGate CLI binary.
//!
//! Rule-based prompt-injection detection for pasted and submitted text.
//!
//! # Commands
//!
//! - `scan` - Analyze text for manipulation attempts
//! - `patterns` - List the detection rule catalog
//! - `serve` - Start the HTTP analysis server

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use promptgate::{
    config::Config,
    engine::{normalize, AnalyzeOptions, Analyzer, ThresholdMode, ThresholdPolicy},
    server::{create_router, AppState, ServerConfig},
    VERSION,
};

#[derive(Parser)]
#[command(name = "promptgate")]
#[command(version = VERSION)]
#[command(about = "PromptGate - prompt injection detection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze text for manipulation attempts
    Scan {
        /// Text to scan (or - for stdin)
        input: Option<String>,

        /// Input file path
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Strict sensitivity (lower flagging threshold)
        #[arg(short, long)]
        strict: bool,

        /// Warn threshold mode (yellow, red, off)
        #[arg(short, long)]
        mode: Option<String>,

        /// Config file supplying default settings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Show normalization diagnostics
        #[arg(short, long)]
        verbose: bool,
    },

    /// List the detection rule catalog
    Patterns {
        /// Only show rules in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the HTTP analysis server
    Serve {
        /// Listen port
        #[arg(short, long, default_value = "8300")]
        port: u16,

        /// Listen host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Bind to all interfaces
        #[arg(long)]
        bind_all: bool,

        /// Default sensitivity for requests that omit strict_mode
        #[arg(long)]
        strict_default: bool,

        /// Config file (defaults to the user config dir when present)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Accept unauthenticated requests even when keys are configured
        #[arg(long)]
        no_auth: bool,

        /// Verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            input,
            file,
            strict,
            mode,
            config,
            json,
            verbose,
        } => cmd_scan(input, file, strict, mode, config, json, verbose),
        Commands::Patterns { category, json } => cmd_patterns(category, json),
        Commands::Serve {
            port,
            host,
            bind_all,
            strict_default,
            config,
            no_auth,
            verbose,
        } => {
            cmd_serve(port, host, bind_all, strict_default, config, no_auth, verbose)?;
            Ok(ExitCode::SUCCESS)
        },
    }
}

/// Read input from argument, file, or stdin
fn read_input(input: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    if let Some(path) = file {
        return Ok(std::fs::read_to_string(path)?);
    }

    match input.as_deref() {
        Some("-") | None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        },
        Some(text) => Ok(text.to_string()),
    }
}

/// Load config from an explicit path, or the default location when present
fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    if let Some(path) = path {
        return Ok(Config::from_file(path)?);
    }

    if let Some(default) = Config::default_path() {
        if default.exists() {
            return Ok(Config::from_file(default)?);
        }
    }

    Ok(Config::from_env())
}

fn cmd_scan(
    input: Option<String>,
    file: Option<PathBuf>,
    strict: bool,
    mode: Option<String>,
    config: Option<PathBuf>,
    json: bool,
    verbose: bool,
) -> anyhow::Result<ExitCode> {
    let text = read_input(input, file)?;
    let settings = load_config(config)?.defaults;

    let mode = match mode {
        Some(raw) => raw
            .parse::<ThresholdMode>()
            .map_err(|e| anyhow::anyhow!(e))?,
        None => settings.warn_threshold_mode,
    };
    let strict = strict || settings.strict_mode;

    let options = AnalyzeOptions {
        policy: ThresholdPolicy::new(mode, strict),
    };
    let analyzer = Analyzer::new();
    let result = analyzer.analyze(&text, &options);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let verdict = if result.flagged { "FLAGGED" } else { "clean" };
        println!(
            "Score: {}/100 (raw {})   Risk: {}   {} (threshold {})",
            result.score, result.meta.raw_score, result.risk, verdict, result.threshold
        );

        if result.matches.is_empty() {
            println!("No rules matched.");
        } else {
            println!("Matches ({}):", result.matches.len());
            for m in &result.matches {
                println!("  [{}] {} (+{})", m.category, m.id, m.weight);
                println!("      {:?}", m.snippet);
                println!("      {}", m.explanation);
            }
        }

        println!(
            "Benign context: {}   OCR-like: {}   Dampened: {}",
            yes_no(result.meta.benign_context),
            yes_no(result.meta.ocr_detected),
            yes_no(result.meta.dampened),
        );

        if verbose {
            let normalized = normalize(&text);
            println!("--- normalized ({} chars) ---", normalized.chars().count());
            println!("{normalized}");
        }
    }

    if result.flagged {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn cmd_patterns(category: Option<String>, json: bool) -> anyhow::Result<ExitCode> {
    let catalog = promptgate::Catalog::builtin();

    let rules: Vec<_> = catalog
        .iter()
        .filter(|entry| match category.as_deref() {
            Some(filter) => entry.rule.category.as_str() == filter,
            None => true,
        })
        .collect();

    if json {
        let out: Vec<_> = rules
            .iter()
            .map(|entry| {
                serde_json::json!({
                    "id": entry.rule.id,
                    "category": entry.rule.category,
                    "weight": entry.rule.weight,
                    "explanation": entry.rule.explanation,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{} rules ({} total in catalog)", rules.len(), catalog.len());
        for entry in rules {
            println!(
                "  {:<32} [{}] weight {}",
                entry.rule.id, entry.rule.category, entry.rule.weight
            );
            println!("      {}", entry.rule.explanation);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn cmd_serve(
    port: u16,
    host: String,
    bind_all: bool,
    strict_default: bool,
    config_path: Option<PathBuf>,
    no_auth: bool,
    verbose: bool,
) -> anyhow::Result<()> {
    // Initialize logging
    let log_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    // Build config: file section first, CLI flags on top
    let file_config = load_config(config_path)?;
    let mut config = ServerConfig::from_section(&file_config.server);

    if bind_all {
        config = config.bind_all();
    } else {
        let addr: std::net::SocketAddr = format!("{host}:{port}").parse()?;
        config = config.with_addr(addr);
    }

    if strict_default {
        config = config.with_strict_default(true);
    }
    if no_auth {
        config = config.without_keys();
    }

    // Create state and router
    let state = Arc::new(AppState::new(config.clone()));
    let app = create_router(state.clone());

    // Start server
    tracing::info!("Starting PromptGate server on {}", config.addr);
    tracing::info!(
        "Catalog: {} rules ({} skipped)",
        state.analyzer.catalog().len(),
        state.analyzer.catalog().skipped()
    );
    tracing::info!(
        "Auth: {}",
        if config.require_key { "api key required" } else { "open" }
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(config.addr).await?;
        axum::serve(listener, app).await?;
        Ok::<_, anyhow::Error>(())
    })
}
