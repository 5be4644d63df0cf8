//! rebrand CLI - ordered codebase-wide renames
//!
//! Rewrites identifiers and URL path fragments across a set of source roots
//! using an ordered rule set. The built-in `partner` preset renames:
//! - vendor -> partner (vendorId, VendorProfile, vendors, ...)
//! - client -> user (clientEmail, clients, ...)
//! - URL paths: /vendor-, /vendors, '/clients', "/clients"

mod config;
mod logging;
mod output;
mod process;
mod walk;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::process::ExitCode;

use config::Config;
use output::{OutputFormat, Reporter};
use rebrand_core::OsFileSystem;
use rebrand_rules::yaml::load_rules_from_file;
use rebrand_rules::{list_presets, preset, RuleSet, DEFAULT_PRESET};
use walk::{FileFilter, TreeWalker};

#[derive(Parser)]
#[command(name = "rebrand")]
#[command(version)]
#[command(about = "Apply an ordered set of rename rules across source directories")]
struct Cli {
    /// Directories to scan (overrides config roots)
    paths: Vec<PathBuf>,

    /// File name suffix to process (can be specified multiple times). Overrides config.
    #[arg(long = "ext", short = 'e', value_name = "SUFFIX")]
    extensions: Vec<String>,

    /// YAML rule file (overrides preset)
    #[arg(long, value_name = "PATH")]
    rules: Option<PathBuf>,

    /// Built-in rule preset
    #[arg(long, value_name = "NAME", conflicts_with = "rules")]
    preset: Option<String>,

    /// Show verbose output
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Output format: text, json
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,

    /// Shorthand for --format json
    #[arg(long, conflicts_with = "format")]
    json: bool,

    /// Process files in parallel
    #[arg(long)]
    parallel: bool,

    /// Write a timestamped run log to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Exit with status 1 if any file could not be processed
    #[arg(long)]
    fail_on_error: bool,

    /// Path to config file (default: auto-detect .rebrand.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long, conflicts_with = "config")]
    no_config: bool,

    /// List the rules of the active rule set, in order, and exit
    #[arg(long)]
    list_rules: bool,

    /// List built-in presets and exit
    #[arg(long)]
    list_presets: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red(), e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Handle --list-presets
    if cli.list_presets {
        println!("{}", "Available presets:".bold());
        for (name, description) in list_presets() {
            println!("  {} - {}", name.green(), description);
        }
        return Ok(ExitCode::SUCCESS);
    }

    // Load config file
    let (config, config_path) = if cli.no_config {
        (Config::default(), None)
    } else if let Some(config_path) = &cli.config {
        (Config::load_path(config_path)?, Some(config_path.clone()))
    } else {
        match Config::load()? {
            Some((cfg, path)) => (cfg, Some(path)),
            None => (Config::default(), None),
        }
    };

    // Start the run log before anything else is reported
    if let Some(log_path) = cli.log_file.as_ref().or(config.output.log_file.as_ref()) {
        logging::init_logger(log_path)
            .with_context(|| format!("Failed to create log file {}", log_path.display()))?;
    }
    logging::log_config_load(config_path.as_deref());

    // Determine output format
    let output_format = if cli.json {
        OutputFormat::Json
    } else {
        let format = cli
            .format
            .as_deref()
            .or(config.output.format.as_deref())
            .unwrap_or("text");
        OutputFormat::from_str(format).ok_or_else(|| {
            anyhow::anyhow!("Invalid output format '{}'. Valid options: text, json", format)
        })?
    };
    let text = output_format == OutputFormat::Text;

    let rules = load_rule_set(&cli, &config)?;
    logging::log_rules(&rules);

    // Handle --list-rules
    if cli.list_rules {
        println!(
            "{} {} ({} rules, applied in order)",
            "Rule set:".bold(),
            rules.name().green(),
            rules.len()
        );
        if !rules.description().is_empty() {
            println!("  {}", rules.description().dimmed());
        }
        for (index, rule) in rules.rules().iter().enumerate() {
            println!("  {:>2}. {}", index + 1, rule);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let roots = config.effective_roots(&cli.paths);
    let extensions = config.effective_extensions(&cli.extensions);
    if extensions.is_empty() {
        eprintln!("{}: No file extensions configured", "Error".red());
        return Ok(ExitCode::from(1));
    }
    let filter = FileFilter::new(extensions, &config.paths.exclude)?;

    if cli.verbose && text {
        if let Some(path) = &config_path {
            println!("{}: {}", "Using config".bold(), path.display());
        }
        println!("{}: {} ({} rules)", "Rules".bold(), rules.name(), rules.len());
        println!("{}: {}", "Extensions".bold(), filter.extensions().join(", "));
        println!();
    }

    logging::log_walk_start(&roots, filter.extensions());
    let outcomes = TreeWalker::new(&OsFileSystem, &rules, &filter)
        .parallel(cli.parallel)
        .walk(&roots);

    // Report results sequentially, in traversal order
    let mut reporter = Reporter::new(output_format, cli.verbose, &rules);
    for outcome in &outcomes {
        logging::log_outcome(outcome);
        reporter.record(outcome);
    }
    logging::log_run_complete(reporter.summary());

    // Per-file errors only affect the exit status when asked to
    let exit_code = if cli.fail_on_error && reporter.summary().has_errors() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    };

    reporter.finish();

    Ok(exit_code)
}

/// Pick the rule set: --rules, then --preset, then config file, then config preset
fn load_rule_set(cli: &Cli, config: &Config) -> Result<RuleSet> {
    if let Some(path) = &cli.rules {
        return load_rules_from_file(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()));
    }
    if let Some(name) = &cli.preset {
        return Ok(preset(name)?);
    }
    if let Some(path) = &config.rules.file {
        return load_rules_from_file(path)
            .with_context(|| format!("Failed to load rules from {}", path.display()));
    }

    let name = config.rules.preset.as_deref().unwrap_or(DEFAULT_PRESET);
    Ok(preset(name)?)
}
