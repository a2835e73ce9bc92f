pub mod commands;
pub mod pdf;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use quotecraft_core::config::{AppConfig, ConfigOverrides, LoadOptions};

use commands::client::ClientArgs;
use commands::export::ExportTarget;

#[derive(Debug, Parser)]
#[command(
    name = "quotecraft",
    about = "Catering quote builder CLI",
    long_about = "Build an itemized catering quote: record client details, pick menu items, \
                  adjust quantities and notes, and export or share the result.",
    after_help = "Examples:\n  quotecraft menu\n  quotecraft add 20 --note \"well done\"\n  quotecraft show\n  quotecraft export email"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to the quotecraft.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, global = true, help = "Override the quote archive path")]
    storage: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List the menu catalog grouped by category")]
    Menu,
    #[command(about = "Update client details on the active quote")]
    Client(ClientArgs),
    #[command(about = "Add a menu item to the active quote")]
    Add {
        #[arg(help = "Menu item id, as shown by `quotecraft menu`")]
        menu_id: u32,
        #[arg(long, help = "Free-text note for the line")]
        note: Option<String>,
    },
    #[command(about = "Set the quantity of a quote line (0 removes it)")]
    Quantity {
        #[arg(help = "Line uid or unique prefix, as shown by `quotecraft show`")]
        uid: String,
        quantity: i64,
    },
    #[command(about = "Remove a quote line")]
    Remove {
        #[arg(help = "Line uid or unique prefix")]
        uid: String,
    },
    #[command(about = "Set or clear the note on a quote line")]
    Note {
        #[arg(help = "Line uid or unique prefix")]
        uid: String,
        #[arg(default_value = "", help = "Note text; omit to clear")]
        text: String,
    },
    #[command(about = "Show the active quote with totals")]
    Show,
    #[command(about = "Export or share the active quote")]
    Export {
        #[command(subcommand)]
        target: ExportTarget,
    },
    #[command(about = "Suggest popular packages for the current selections")]
    Suggest,
    #[command(about = "Inspect effective configuration values with secrets redacted")]
    Config,
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    let options = LoadOptions {
        config_path: cli.config.clone(),
        require_file: cli.config.is_some(),
        overrides: ConfigOverrides { storage_path: cli.storage.clone(), ..Default::default() },
    };
    let config = match AppConfig::load(options) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("configuration error: {error}");
            return ExitCode::from(2);
        }
    };
    init_logging(&config);

    match dispatch(cli.command, &config).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
    }
}

async fn dispatch(command: Command, config: &AppConfig) -> anyhow::Result<String> {
    match command {
        Command::Menu => commands::menu::run(config),
        Command::Client(args) => commands::client::run(config, args).await,
        Command::Add { menu_id, note } => commands::add::run(config, menu_id, note).await,
        Command::Quantity { uid, quantity } => {
            commands::quantity::run(config, &uid, quantity).await
        }
        Command::Remove { uid } => commands::remove::run(config, &uid).await,
        Command::Note { uid, text } => commands::note::run(config, &uid, &text).await,
        Command::Show => commands::show::run(config).await,
        Command::Export { target } => commands::export::run(config, target).await,
        Command::Suggest => commands::suggest::run(config).await,
        Command::Config => Ok(commands::config::run(config)),
    }
}

fn init_logging(config: &AppConfig) {
    use quotecraft_core::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}
