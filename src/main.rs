//! archscale: architecture pattern scaling analysis
//!
//! Ranks software-architecture patterns for a URL from eight performance
//! metrics and reports the expected improvement over a baseline.

#![allow(clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use archscale::{
    cli::{self, AnalyzeOptions},
    config::{
        discover_config_file, generate_example_config, generate_full_example_config,
        generate_json_schema, load_or_default, AppConfig, CliOverrides, ConfigPreset, Validatable,
    },
    pipeline::exit_codes,
    reports::ReportFormat,
    source::SourceKind,
};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "archscale")]
#[command(version)]
#[command(about = "Architecture pattern scaling analysis", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  No usable result (every candidate rejected, or empty session)
    3  Error occurred

EXAMPLES:
    # Recommend a pattern for an API backend
    archscale analyze https://api.example.com --test-type api

    # Reproducible run over two patterns, as Markdown
    archscale analyze https://shop.example.com --seed 42 --patterns microservices,serverless -o markdown

    # Rank candidates from your own measurements
    archscale score candidates.json --test-type database -o table

    # Improvement between two snapshots
    archscale compare before.json after.json --pattern microservices")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Output flags shared by rendering commands
#[derive(clap::Args)]
struct OutputArgs {
    /// Output format (defaults to the configured format)
    #[arg(short, long, value_enum)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `analyze` subcommand
#[derive(Parser)]
struct AnalyzeArgs {
    /// URL of the application to analyse
    url: String,

    /// Test type: general, api, database
    #[arg(short, long)]
    test_type: Option<String>,

    /// Comma-separated pattern ids to evaluate (default: all)
    #[arg(short, long, value_delimiter = ',')]
    patterns: Vec<String>,

    /// Metric source
    #[arg(long, value_enum)]
    source: Option<SourceKind>,

    /// Seed for the synthetic source
    #[arg(long)]
    seed: Option<u64>,

    /// Fail instead of falling back to baseline metrics when the remote source errors
    #[arg(long)]
    no_fallback: bool,

    /// Include pattern benefits and limitations
    #[arg(long)]
    details: bool,

    /// Do not save the report to the session store
    #[arg(long)]
    no_save: bool,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a URL and recommend an architecture pattern
    Analyze(AnalyzeArgs),

    /// List architecture patterns
    Patterns {
        /// Show one pattern in detail
        #[arg(long)]
        id: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List the performance metrics
    Metrics {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Rank candidates read from a JSON file
    Score {
        /// JSON array of {"pattern", "metrics"} entries
        file: PathBuf,

        /// Test type: general, api, database
        #[arg(short, long)]
        test_type: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Improvement percentages between two metric snapshots
    Compare {
        /// Snapshot before scaling
        before: PathBuf,

        /// Snapshot after scaling
        after: PathBuf,

        /// Pattern the after snapshot was measured with
        #[arg(long)]
        pattern: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Re-render the report held in the session
    Show {
        /// Show the latest analysis instead of the viewed one
        #[arg(long)]
        latest: bool,

        /// Clear the session instead of showing it
        #[arg(long, conflicts_with = "latest")]
        clear: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .archscale.yaml in the current directory
    Init {
        /// Start from a preset: default, reproducible, remote, ci-cd
        #[arg(long)]
        preset: Option<String>,
    },
}

impl OutputArgs {
    fn overrides(&self, no_color: bool) -> CliOverrides {
        CliOverrides {
            format: self.output,
            output_file: self.output_file.clone(),
            no_color,
            ..CliOverrides::default()
        }
    }
}

/// Load the effective configuration: file values, then CLI overrides.
fn load_config(cli: &Cli, overrides: &CliOverrides) -> Result<AppConfig> {
    let (config, loaded_from) = AppConfig::from_file_with_cli(cli.config.as_deref(), overrides);
    if let Some(path) = &loaded_from {
        tracing::debug!("Loaded config from {}", path.display());
    }

    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration:\n  {}", details.join("\n  "));
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Analyze(args) => {
            let overrides = CliOverrides {
                source_kind: args.source,
                seed: args.seed,
                no_fallback: args.no_fallback,
                ..args.output.overrides(cli.no_color)
            };
            let config = load_config(&cli, &overrides)?;

            cli::run_analyze(
                &config,
                AnalyzeOptions {
                    url: args.url.clone(),
                    test_type: args.test_type.clone(),
                    patterns: args.patterns.clone(),
                    details: args.details,
                    no_save: args.no_save,
                    quiet: cli.quiet,
                },
            )
        }

        Commands::Patterns { id, json } => {
            let format = if *json { ReportFormat::Json } else { ReportFormat::Summary };
            cli::run_patterns(id.as_deref(), format)
        }

        Commands::Metrics { json } => {
            let format = if *json { ReportFormat::Json } else { ReportFormat::Summary };
            cli::run_metrics(format)
        }

        Commands::Score {
            file,
            test_type,
            output,
        } => {
            let config = load_config(&cli, &output.overrides(cli.no_color))?;
            cli::run_score(&config, file, test_type.as_deref(), cli.quiet)
        }

        Commands::Compare {
            before,
            after,
            pattern,
            output,
        } => {
            let config = load_config(&cli, &output.overrides(cli.no_color))?;
            cli::run_compare(&config, before, after, pattern.as_deref(), cli.quiet)
        }

        Commands::Show {
            latest,
            clear,
            output,
        } => {
            let config = load_config(&cli, &output.overrides(cli.no_color))?;
            cli::run_show(&config, *latest, *clear, cli.quiet)
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "archscale", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            let schema = generate_json_schema().context("failed to generate config schema")?;
            match output {
                Some(path) => {
                    std::fs::write(path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => run_config(&cli, action),
    }
}

fn run_config(cli: &Cli, action: &ConfigAction) -> Result<i32> {
    match action {
        ConfigAction::Show => {
            let (config, loaded_from) = load_or_default(cli.config.as_deref());
            if let Some(path) = &loaded_from {
                eprintln!("# Loaded from: {}", path.display());
            } else {
                eprintln!("# No config file found; showing defaults");
            }
            let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
            print!("{yaml}");
        }
        ConfigAction::Path => {
            let search_paths: [Option<String>; 3] = [
                std::env::current_dir()
                    .ok()
                    .map(|p| p.display().to_string()),
                dirs::config_dir().map(|p| p.join("archscale").display().to_string()),
                dirs::home_dir().map(|p| p.display().to_string()),
            ];
            eprintln!("Config file search paths (in order):");
            for path in search_paths.into_iter().flatten() {
                eprintln!("  {path}");
            }
            eprintln!();
            eprintln!("Recognized file names:");
            for name in &[".archscale.yaml", ".archscale.yml", "archscale.yaml"] {
                eprintln!("  {name}");
            }
            eprintln!();
            match discover_config_file(cli.config.as_deref()) {
                Some(path) => eprintln!("Active config file: {}", path.display()),
                None => eprintln!("No config file found."),
            }
        }
        ConfigAction::Init { preset } => {
            let target = std::env::current_dir()
                .context("cannot determine current directory")?
                .join(".archscale.yaml");
            if target.exists() {
                anyhow::bail!(
                    "{} already exists. Remove it first to re-initialize.",
                    target.display()
                );
            }
            let content = match preset {
                Some(name) => {
                    let preset = ConfigPreset::from_name(name).with_context(|| {
                        let names: Vec<&str> =
                            ConfigPreset::all().iter().map(ConfigPreset::name).collect();
                        format!("unknown preset '{name}'. Valid options: {}", names.join(", "))
                    })?;
                    generate_example_config(&AppConfig::from_preset(preset))
                }
                None => generate_full_example_config(),
            };
            std::fs::write(&target, content)
                .with_context(|| format!("failed to write {}", target.display()))?;
            eprintln!("Created {}", target.display());
        }
    }
    Ok(exit_codes::SUCCESS)
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            exit_codes::ERROR
        }
    };
    if code != exit_codes::SUCCESS {
        std::process::exit(code);
    }
}
