use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Password;
use skyfetch_core::{
    Config, FileStore, RecentSearches, WeatherClient, provider_from_config,
};
use std::process::ExitCode;
use tracing::debug;

use crate::terminal::{Input, TerminalUi, format_recent};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "skyfetch",
    version,
    about = "Current weather and 5-day forecast for any city"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Prompt for cities until you quit (default).
    Interactive,

    /// Look up a single city.
    Show {
        /// City name; several words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        city: Vec<String>,
    },

    /// List recent searches, most recent first.
    History,

    /// Store the OpenWeather API key.
    Configure,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Interactive => interactive().await,
            Command::Show { city } => show(&city.join(" ")).await,
            Command::History => history(),
            Command::Configure => configure(),
        }
    }
}

type TerminalClient = WeatherClient<FileStore, TerminalUi>;

fn build_client() -> anyhow::Result<TerminalClient> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    let store = FileStore::open_default()?;

    Ok(WeatherClient::new(provider, store, TerminalUi::new())
        .with_icon_url_template(config.icon_url_template))
}

async fn interactive() -> anyhow::Result<ExitCode> {
    let mut client = build_client()?;
    client.bootstrap().await;

    loop {
        let recent = client.recent().as_slice().to_vec();

        match client.ui_mut().prompt(&recent)? {
            Input::Quit => break,
            Input::Event(event) => {
                if let Err(err) = client.handle_event(event).await {
                    debug!("event not completed: {err}");
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

async fn show(city: &str) -> anyhow::Result<ExitCode> {
    let mut client = build_client()?;
    client.load_history();

    match client.handle_search(city).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            debug!("lookup for '{city}' failed: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn history() -> anyhow::Result<ExitCode> {
    let store = FileStore::open_default()?;
    let recent = RecentSearches::load(&store)?;

    if recent.is_empty() {
        println!("No recent searches.");
    } else {
        println!("{}", format_recent(recent.as_slice()));
    }

    Ok(ExitCode::SUCCESS)
}

fn configure() -> anyhow::Result<ExitCode> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("No API key entered")?;

    config.set_api_key(api_key.trim().to_string());
    let path = config.save()?;

    println!("Saved configuration to {}", path.display());
    Ok(ExitCode::SUCCESS)
}
