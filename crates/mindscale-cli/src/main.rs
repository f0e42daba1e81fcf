use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use eyre::Result;
use mindscale_instruments::registry::Registry;
use mindscale_instruments::scoring::Locale;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

#[derive(Debug, Parser)]
#[command(name = "mindscale", version, about = "Score mental-health screening instruments")]
struct Cli {
    /// Config file (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured display language.
    #[arg(long, global = true, value_enum)]
    locale: Option<LocaleArg>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LocaleArg {
    En,
    Zh,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::En => Locale::En,
            LocaleArg::Zh => Locale::Zh,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List builtin instruments.
    List,
    /// Print an instrument's questions, options and bands.
    Show {
        /// Instrument or short-form id (e.g. gad7, gad2).
        scale: String,
    },
    /// Score a response file against one instrument.
    Score {
        /// Instrument or short-form id.
        scale: String,
        /// JSON object mapping question ids to option values.
        #[arg(long)]
        responses: PathBuf,
        /// Start from the short form and escalate only if it trips.
        #[arg(long)]
        short: bool,
        #[arg(long)]
        user: Option<String>,
    },
    /// Score a daily check-in response file.
    Daily {
        #[arg(long)]
        responses: PathBuf,
        #[arg(long)]
        user: Option<String>,
    },
    /// Manage the config file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    /// Print the effective config.
    Show,
    /// Write a default config if none exists.
    Init,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let logs = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.json_logs {
        logs.json().init();
    } else {
        logs.init();
    }

    let config_path = config::config_path(cli.config.as_deref())?;
    let mut settings = config::load_config(&config_path)?;
    if let Some(locale) = cli.locale {
        settings.locale = locale.into();
    }

    if let Command::Config { action } = &cli.command {
        return match action {
            ConfigAction::Show => commands::show_config(&config_path, &settings),
            ConfigAction::Init => commands::init_config(&config_path),
        };
    }

    let registry = Registry::builtin()?;

    match cli.command {
        Command::List => commands::list(&registry, settings.locale),
        Command::Show { scale } => commands::show(&registry, &scale, settings.locale),
        Command::Score {
            scale,
            responses,
            short,
            user,
        } => commands::score(&registry, &settings, &scale, &responses, short, user.as_deref()),
        Command::Daily { responses, user } => {
            commands::daily(&registry, &responses, user.as_deref())
        }
        Command::Config { .. } => Ok(()),
    }
}
