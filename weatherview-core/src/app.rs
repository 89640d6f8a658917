//! Root composer: wires the search field, fetch controller, provider and theme
//! toggle together, and produces a fresh page view on demand.

use chrono::{DateTime, Utc};

use crate::{
    background::Background,
    controller::{FetchController, Settled, Ticket, UiState},
    display::WeatherCard,
    error::FetchError,
    model::WeatherResponse,
    provider::WeatherProvider,
    search::SearchInput,
    theme::{Theme, ThemeToggle},
};

pub const TITLE: &str = "Weather App";

/// Snapshot of everything the page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub title: &'static str,
    pub background: Background,
    pub dark_mode: bool,
    pub root_classes: Vec<String>,
    pub loading: bool,
    pub search_disabled: bool,
    pub error: Option<String>,
    pub card: Option<WeatherCard>,
}

#[derive(Debug)]
pub struct App {
    provider: Box<dyn WeatherProvider>,
    controller: FetchController,
    input: SearchInput,
    theme: ThemeToggle,
}

impl App {
    pub fn new(provider: Box<dyn WeatherProvider>, theme: ThemeToggle) -> Self {
        Self { provider, controller: FetchController::new(), input: SearchInput::new(), theme }
    }

    pub fn input(&self) -> &SearchInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut SearchInput {
        &mut self.input
    }

    pub fn state(&self) -> &UiState {
        self.controller.state()
    }

    pub fn theme(&self) -> Theme {
        self.theme.theme()
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme.toggle()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme.set(theme);
    }

    /// Recomputed from the current result every time it is asked for.
    pub fn background(&self) -> Background {
        Background::for_result(self.state().result.as_ref())
    }

    /// Start a search for whatever is in the search field.
    ///
    /// Returns `None` without touching any state when there is nothing to
    /// submit, including while the field is disabled by an outstanding search.
    /// The caller fetches and hands the outcome to [`App::complete_search`].
    pub fn begin_search(&mut self) -> Option<Ticket> {
        let city = self.input.submit()?;
        let ticket = self.controller.begin(&city)?;
        self.input.set_disabled(true);
        Some(ticket)
    }

    pub fn complete_search(
        &mut self,
        ticket: Ticket,
        outcome: Result<WeatherResponse, FetchError>,
    ) -> Settled {
        let settled = self.controller.settle(ticket, outcome);
        self.input.set_disabled(self.controller.is_loading());
        settled
    }

    /// Perform the lookup for an issued search without touching page state.
    pub async fn fetch(&self, ticket: &Ticket) -> Result<WeatherResponse, FetchError> {
        self.provider.current_weather(ticket.city()).await
    }

    /// Submit the search field and wait for the lookup to finish.
    pub async fn submit_search(&mut self) -> Option<Settled> {
        let ticket = self.begin_search()?;
        let outcome = self.fetch(&ticket).await;
        Some(self.complete_search(ticket, outcome))
    }

    /// Put `city` in the search field and submit it.
    pub async fn search(&mut self, city: &str) -> Option<Settled> {
        self.input.set_text(city);
        self.submit_search().await
    }

    pub fn view(&self, now: DateTime<Utc>) -> PageView {
        let state = self.state();

        PageView {
            title: TITLE,
            background: self.background(),
            dark_mode: self.theme.is_dark(),
            root_classes: self.theme.marker().classes().map(str::to_string).collect(),
            loading: state.loading,
            search_disabled: self.input.is_disabled(),
            error: state.error.clone(),
            card: state.result.as_ref().map(|r| WeatherCard::new(r, now)),
        }
    }
}
