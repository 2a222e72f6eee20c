pub mod commands;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pifloor_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat};

use crate::commands::catalog::CatalogArgs;
use crate::commands::recommend::RecommendArgs;
use crate::commands::CommandResult;

#[derive(Debug, Parser)]
#[command(
    name = "pifloor",
    about = "PiFloor floor picker CLI",
    long_about = "Answer the floor picker quiz, rank catalog products, and browse the catalog.",
    after_help = "Examples:\n  pifloor questions\n  pifloor quiz --catalog products.json\n  pifloor recommend --answers answers.json --catalog products.json --json"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to a pifloor.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Override logging.level")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Print the floor picker questionnaire")]
    Questions {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Rank catalog products against a finished answer set")]
    Recommend {
        #[arg(long, help = "JSON file mapping question id to answer")]
        answers: PathBuf,
        #[arg(long, help = "Product catalog JSON (defaults to catalog.path)")]
        catalog: Option<PathBuf>,
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Take the floor picker quiz interactively")]
    Quiz {
        #[arg(long, help = "Product catalog JSON (defaults to catalog.path)")]
        catalog: Option<PathBuf>,
    },
    #[command(about = "List catalog products with search, filters and pagination")]
    Catalog {
        #[arg(long, help = "Product catalog JSON (defaults to catalog.path)")]
        catalog: Option<PathBuf>,
        #[arg(long, help = "Case-insensitive match on name or category")]
        search: Option<String>,
        #[arg(long, help = "Only products of this category (e.g. laminado, vinilico)")]
        category: Option<String>,
        #[arg(long, value_delimiter = ',', help = "Only these product ids")]
        favorites: Vec<u64>,
        #[arg(long)]
        page: Option<usize>,
        #[arg(long)]
        per_page: Option<usize>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let overrides =
        ConfigOverrides { log_level: cli.log_level.clone(), ..ConfigOverrides::default() };
    let config = match AppConfig::load(LoadOptions {
        config_path: cli.config.clone(),
        require_file: cli.config.is_some(),
        overrides: overrides.clone(),
    }) {
        Ok(config) => config,
        Err(error) => {
            let result = CommandResult::failure("startup", "config_validation", error.to_string(), 2);
            println!("{}", result.output);
            return ExitCode::from(result.exit_code);
        }
    };
    init_logging(&config);

    let result = match cli.command {
        Command::Questions { json } => commands::questions::run(json),
        Command::Recommend { answers, catalog, json } => {
            commands::recommend::run(&config, &RecommendArgs { answers, catalog, json })
        }
        Command::Quiz { catalog } => {
            let stdin = io::stdin();
            commands::quiz::run(&config, catalog.as_deref(), stdin.lock(), io::stdout())
        }
        Command::Catalog { catalog, search, category, favorites, page, per_page } => {
            commands::catalog::run(
                &config,
                &CatalogArgs { catalog, search, category, favorites, page, per_page },
            )
        }
        Command::Config => CommandResult::text(commands::config::run(
            &config,
            cli.config.as_deref(),
            &overrides,
        )),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder =
        tracing_subscriber::fmt().with_target(false).with_max_level(log_level).with_writer(io::stderr);

    // stdout carries command output, so logs go to stderr
    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
