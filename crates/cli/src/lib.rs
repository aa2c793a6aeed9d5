pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use stylist_core::config::{AppConfig, LoadOptions, LogFormat};

#[derive(Debug, Parser)]
#[command(
    name = "stylist",
    about = "Stylist outfit recommendation CLI",
    long_about = "Rank outfit suggestions from a wardrobe file, optionally conditioned on occasion, season, style, color, or current weather.",
    after_help = "Examples:\n  stylist recommend --items wardrobe.json --occasion work\n  stylist weather-recommend --items wardrobe.json --location Oslo\n  stylist config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Recommend outfits for explicit occasion, season, style, and color criteria")]
    Recommend(RecommendArgs),
    #[command(about = "Recommend outfits for the current weather at a location")]
    WeatherRecommend(WeatherRecommendArgs),
    #[command(about = "Show the weather condition reported by the configured provider")]
    Weather {
        #[arg(long, help = "Location to query (defaults to weather.default_location)")]
        location: Option<String>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

#[derive(Debug, Clone, Args)]
pub struct RecommendArgs {
    #[arg(long, help = "Path to a JSON wardrobe file")]
    pub items: PathBuf,
    #[arg(long, help = "Occasion to dress for, e.g. casual, work, formal")]
    pub occasion: Option<String>,
    #[arg(long, help = "Season to dress for: winter, spring, summer, fall")]
    pub season: Option<String>,
    #[arg(long = "style", value_delimiter = ',', help = "Preferred styles (comma separated)")]
    pub styles: Vec<String>,
    #[arg(long = "color", value_delimiter = ',', help = "Preferred colors (comma separated)")]
    pub colors: Vec<String>,
    #[arg(long, help = "Seed for reproducible accessory picks")]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Args)]
pub struct WeatherRecommendArgs {
    #[arg(long, help = "Path to a JSON wardrobe file")]
    pub items: PathBuf,
    #[arg(long, help = "Location to query (defaults to weather.default_location)")]
    pub location: Option<String>,
    #[arg(long, help = "Seed for reproducible accessory picks")]
    pub seed: Option<u64>,
}

fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    // stdout carries the JSON payload, so logs go to stderr.
    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Recommend(args) => commands::recommend::run(&args),
        Command::WeatherRecommend(args) => commands::recommend::run_weather(&args),
        Command::Weather { location } => commands::weather::run(location.as_deref()),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
