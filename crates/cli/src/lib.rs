pub mod commands;

use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use storefront_core::config::{AppConfig, LoadOptions, LogFormat};
use storefront_db::DEFAULT_PROFILE;

use commands::{parse_cart_entry, CartEntry};

#[derive(Debug, Parser)]
#[command(
    name = "storefront",
    about = "Storefront operator CLI",
    long_about = "Operate the storefront catalog, recommendations, and voice ordering against the local database.",
    after_help = "Examples:\n  storefront seed\n  storefront recommend --cart bread-white:2\n  storefront voice \"add 2 breads and a cake\""
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load the deterministic demo bakery catalog")]
    Seed,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Rank product recommendations for a cart and browsing profile")]
    Recommend {
        #[arg(
            long,
            default_value = DEFAULT_PROFILE,
            help = "Browsing profile whose history is used"
        )]
        profile: String,
        #[arg(
            long = "cart",
            value_name = "ID[:QTY]",
            value_parser = parse_cart_entry,
            help = "Cart line, repeatable"
        )]
        cart: Vec<CartEntry>,
    },
    #[command(about = "Record a product view in the recently-viewed history")]
    View {
        product_id: String,
        #[arg(
            long,
            default_value = DEFAULT_PROFILE,
            help = "Browsing profile to record the view for"
        )]
        profile: String,
    },
    #[command(about = "Interpret a voice command transcript and apply it to a cart")]
    Voice {
        #[arg(default_value = "", help = "Transcript as heard by the speech recognizer")]
        transcript: String,
        #[arg(
            long,
            value_name = "CODE",
            help = "Simulate a recognizer error code such as `not-allowed` or `no-speech`"
        )]
        speech_error: Option<String>,
        #[arg(
            long = "cart",
            value_name = "ID[:QTY]",
            value_parser = parse_cart_entry,
            help = "Existing cart line, repeatable"
        )]
        cart: Vec<CartEntry>,
    },
}

/// Installs the stderr subscriber so stdout carries only the JSON result line.
fn init_logging(config: &AppConfig) {
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    let installed = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    if installed.is_err() {
        tracing::debug!(event_name = "cli.logging.already_installed", "subscriber already set");
    }
}

pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // An invalid config is reported by the command itself.
    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Config => commands::config::run(),
        Command::Recommend { profile, cart } => commands::recommend::run(&profile, &cart),
        Command::View { product_id, profile } => commands::view::run(&product_id, &profile),
        Command::Voice { transcript, speech_error, cart } => {
            commands::voice::run(&transcript, speech_error.as_deref(), &cart)
        }
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", result.output).context("writing command result to stdout")?;
    Ok(ExitCode::from(result.exit_code))
}
