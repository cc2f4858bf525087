//! Workout Stats CLI
//!
//! Session statistics from raw workout sensor readings.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use workout_stats::{
    config::Config,
    core::{
        parse_packages, process_packages, Dispatcher, OutputFormat, Summary, ValidationPolicy,
        DISPATCH_TABLE,
    },
    VERSION,
};

#[derive(Parser)]
#[command(name = "workout-stats")]
#[command(version = VERSION)]
#[command(about = "Workout session statistics from raw sensor readings", long_about = None)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize one workout from an activity code and its readings
    Summary {
        /// Activity code (RUN, WLK or SWM)
        code: String,

        /// Positional readings, in the order listed by `codes`
        #[arg(allow_negative_numbers = true, num_args = 0..)]
        params: Vec<f64>,

        /// Output format (text, json or jsonl)
        #[arg(long)]
        format: Option<String>,

        /// Skip domain checks on readings
        #[arg(long)]
        permissive: bool,
    },

    /// Summarize every sensor package in a JSON or JSON Lines file
    Batch {
        /// Package file, or `-` for stdin
        input: PathBuf,

        /// Output format (text, json or jsonl)
        #[arg(long)]
        format: Option<String>,

        /// Skip domain checks on readings
        #[arg(long)]
        permissive: bool,
    },

    /// List activity codes and their parameter order
    Codes,

    /// Show or update configuration
    Config {
        /// Set the default validation policy (strict or permissive)
        #[arg(long)]
        validation: Option<String>,

        /// Set the default output format (text, json or jsonl)
        #[arg(long)]
        format: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Summary {
            code,
            params,
            format,
            permissive,
        } => cmd_summary(&code, &params, format.as_deref(), permissive),
        Commands::Batch {
            input,
            format,
            permissive,
        } => cmd_batch(&input, format.as_deref(), permissive),
        Commands::Codes => {
            cmd_codes();
            Ok(())
        }
        Commands::Config { validation, format } => {
            cmd_config(validation.as_deref(), format.as_deref())
        }
    }
}

/// Send logs to stderr so stdout carries only summaries.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve the dispatcher and output format from config plus CLI overrides.
fn settings(format: Option<&str>, permissive: bool) -> Result<(Dispatcher, OutputFormat)> {
    let config = Config::load().context("Could not load configuration")?;

    let policy = if permissive {
        ValidationPolicy::Permissive
    } else {
        config.validation
    };
    let output_format = match format {
        Some(f) => f.parse::<OutputFormat>().map_err(anyhow::Error::msg)?,
        None => config.output_format,
    };

    tracing::debug!(
        policy = policy.as_str(),
        format = output_format.as_str(),
        "effective settings"
    );
    Ok((Dispatcher::new(policy), output_format))
}

fn print_summaries(format: OutputFormat, summaries: &[Summary]) -> Result<()> {
    let rendered = format
        .render(summaries)
        .context("Could not serialize summaries")?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}

fn cmd_summary(code: &str, params: &[f64], format: Option<&str>, permissive: bool) -> Result<()> {
    let (dispatcher, output_format) = settings(format, permissive)?;

    let summary = dispatcher
        .resolve(code, params)
        .with_context(|| format!("Could not resolve workout '{code}'"))?
        .summarize();

    print_summaries(output_format, &[summary])
}

fn cmd_batch(input: &Path, format: Option<&str>, permissive: bool) -> Result<()> {
    let (dispatcher, output_format) = settings(format, permissive)?;

    let content = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Could not read packages from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Could not read packages from {input:?}"))?
    };

    let packages = parse_packages(&content)?;
    let summaries = process_packages(&dispatcher, &packages)?;

    print_summaries(output_format, &summaries)
}

fn cmd_codes() {
    println!("Activity codes");
    println!("==============");
    println!();
    for rule in &DISPATCH_TABLE {
        println!(
            "  {}  {:<14} {}",
            rule.code,
            rule.display_name,
            rule.parameters.join(", ")
        );
    }
}

fn cmd_config(validation: Option<&str>, format: Option<&str>) -> Result<()> {
    let mut config = Config::load().context("Could not load configuration")?;

    if validation.is_some() || format.is_some() {
        if let Some(v) = validation {
            config.validation = v.parse().map_err(anyhow::Error::msg)?;
        }
        if let Some(f) = format {
            config.output_format = f.parse().map_err(anyhow::Error::msg)?;
        }
        config.save().context("Could not save configuration")?;
        println!("Configuration saved.");
        println!();
    }

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).context("Could not serialize configuration")?
    );
    Ok(())
}
