use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use weatherview_core::{
    App, Config, Theme, ThemeToggle, provider_from_config,
    theme::{EnvColorScheme, open_default_store},
};

use crate::render::{self, Style};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherview", version, about = "Look up the current weather for a city")]
pub struct Cli {
    /// Disable colours (also honoured via NO_COLOR).
    #[arg(long, global = true)]
    pub plain: bool,

    /// Defaults to `interactive`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search cities one after another until you quit.
    Interactive,

    /// Show current weather for a single city.
    Show {
        /// City name, e.g. "London" or "Paris,FR".
        city: String,
    },

    /// Show or change the dark/light theme.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Store the API key (and optionally a custom endpoint).
    Configure,
}

#[derive(Debug, Subcommand)]
pub enum ThemeAction {
    /// Print the current theme.
    Show,
    /// Switch between dark and light.
    Toggle,
    Set {
        /// "dark" or "light".
        theme: Theme,
    },
}

const HELP: &str = ":theme toggles dark mode, :quit exits";

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let style = Style::detect(self.plain);

        match self.command.unwrap_or(Command::Interactive) {
            Command::Interactive => interactive(style).await,
            Command::Show { city } => show(&city, style).await,
            Command::Theme { action } => theme(action.unwrap_or(ThemeAction::Show)),
            Command::Configure => configure(),
        }
    }
}

fn theme_toggle() -> ThemeToggle {
    ThemeToggle::init(open_default_store(), &EnvColorScheme::new())
}

fn build_app() -> anyhow::Result<App> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    Ok(App::new(provider, theme_toggle()))
}

async fn show(city: &str, style: Style) -> anyhow::Result<()> {
    let mut app = build_app()?;

    if app.search(city).await.is_none() {
        anyhow::bail!("City name must not be empty");
    }

    if let Some(message) = &app.state().error {
        anyhow::bail!("{message}");
    }

    print!("{}", render::page(&app.view(Utc::now()), style));
    Ok(())
}

async fn interactive(style: Style) -> anyhow::Result<()> {
    let mut app = build_app()?;
    print!("{}", render::page(&app.view(Utc::now()), style));

    loop {
        let line = match Text::new("City:")
            .with_placeholder("Enter city name...")
            .with_help_message(HELP)
            .prompt()
        {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city name"),
        };

        match line.trim() {
            ":quit" | ":q" => break,
            ":theme" => {
                app.toggle_theme();
            }
            _ => {
                app.input_mut().set_text(line.as_str());

                // blank input: nothing to search, just redraw
                if let Some(ticket) = app.begin_search() {
                    print!("{}", render::page(&app.view(Utc::now()), style));
                    let outcome = app.fetch(&ticket).await;
                    app.complete_search(ticket, outcome);
                }
            }
        }

        print!("{}", render::page(&app.view(Utc::now()), style));
    }

    Ok(())
}

fn theme(action: ThemeAction) -> anyhow::Result<()> {
    let mut toggle = theme_toggle();

    match action {
        ThemeAction::Show => {}
        ThemeAction::Toggle => {
            toggle.toggle();
        }
        ThemeAction::Set { theme } => toggle.set(theme),
    }

    println!("{}", toggle.theme());
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    if api_key.trim().is_empty() {
        anyhow::bail!("API key must not be empty");
    }
    config.set_api_key(api_key.trim().to_string());

    let base_url = Text::new("Endpoint:")
        .with_default(config.base_url.as_deref().unwrap_or_default())
        .with_help_message("Leave empty for the public OpenWeather API")
        .prompt()
        .context("Failed to read endpoint")?;
    config.set_base_url(base_url);

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
