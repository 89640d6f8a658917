//! Request lifecycle for city lookups: idle → loading → success | error.
//!
//! Every search is tagged with a monotonically increasing sequence number when
//! it is issued. Only the outcome of the most recently issued search is
//! applied; anything older that resolves later is dropped, so the page always
//! reflects the latest search rather than the latest response to arrive.

use tracing::{debug, info, warn};

use crate::{error::FetchError, model::WeatherResponse, provider::WeatherProvider};

/// Transient page state owned by the controller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub result: Option<WeatherResponse>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Handle for one issued search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    seq: u64,
    city: String,
}

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// What happened to an outcome handed back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Applied,
    /// A newer search was issued after this one.
    Discarded,
}

#[derive(Debug, Default)]
pub struct FetchController {
    state: UiState,
    latest: u64,
}

impl FetchController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    /// Issue a search for `city`. Returns `None`, leaving the state untouched,
    /// when the trimmed name is empty.
    pub fn begin(&mut self, city: &str) -> Option<Ticket> {
        let city = city.trim();
        if city.is_empty() {
            return None;
        }

        self.latest += 1;
        self.state.loading = true;
        self.state.error = None;

        debug!(seq = self.latest, city, "search issued");

        Some(Ticket { seq: self.latest, city: city.to_string() })
    }

    /// Hand back the outcome of a previously issued search.
    pub fn settle(
        &mut self,
        ticket: Ticket,
        outcome: Result<WeatherResponse, FetchError>,
    ) -> Settled {
        if ticket.seq != self.latest {
            warn!(
                seq = ticket.seq,
                latest = self.latest,
                city = %ticket.city,
                "discarding outcome of superseded search"
            );
            return Settled::Discarded;
        }

        match outcome {
            Ok(response) => {
                info!(city = %ticket.city, location = %response.name, "weather received");
                self.state.result = Some(response);
                self.state.error = None;
            }
            Err(err) => {
                warn!(city = %ticket.city, error = %err, "weather lookup failed");
                self.state.result = None;
                self.state.error = Some(err.user_message().to_string());
            }
        }

        self.state.loading = false;
        Settled::Applied
    }

    /// Issue, fetch and settle in one step.
    pub async fn search(
        &mut self,
        provider: &dyn WeatherProvider,
        city: &str,
    ) -> Option<Settled> {
        let ticket = self.begin(city)?;
        let outcome = provider.current_weather(ticket.city()).await;
        Some(self.settle(ticket, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, MainMetrics, Sys, Wind};
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    fn response(name: &str, code: u32) -> WeatherResponse {
        WeatherResponse {
            name: name.to_string(),
            sys: Sys { country: "GB".into(), sunrise: 1000, sunset: 2000 },
            weather: vec![Condition {
                id: code,
                main: String::new(),
                description: "clear sky".into(),
                icon: "01d".into(),
            }],
            main: MainMetrics { temp: 15.4, feels_like: 14.1, humidity: 60, pressure: 1012.0 },
            wind: Wind { speed: 3.2 },
            visibility: Some(10_000),
            timezone: None,
            dt: None,
        }
    }

    fn not_found() -> FetchError {
        FetchError::Status { status: StatusCode::NOT_FOUND, body: String::new() }
    }

    #[derive(Debug, Default)]
    struct RecordingProvider {
        calls: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl WeatherProvider for RecordingProvider {
        async fn current_weather(&self, city: &str) -> Result<WeatherResponse, FetchError> {
            self.calls.lock().unwrap().push(city.to_string());
            if self.fail { Err(not_found()) } else { Ok(response(city, 800)) }
        }
    }

    #[test]
    fn starts_idle() {
        let ctl = FetchController::new();
        assert_eq!(ctl.state(), &UiState::default());
    }

    #[test]
    fn blank_city_is_a_no_op() {
        let mut ctl = FetchController::new();
        assert!(ctl.begin("").is_none());
        assert!(ctl.begin("   ").is_none());
        assert!(!ctl.is_loading());
        assert_eq!(ctl.state(), &UiState::default());
    }

    #[test]
    fn success_transitions_loading_and_sets_result() {
        let mut ctl = FetchController::new();
        assert!(!ctl.is_loading());

        let ticket = ctl.begin(" London ").expect("ticket");
        assert_eq!(ticket.city(), "London");
        assert!(ctl.is_loading());

        assert_eq!(ctl.settle(ticket, Ok(response("London", 800))), Settled::Applied);
        assert!(!ctl.is_loading());
        assert_eq!(ctl.state().result.as_ref().map(|r| r.name.as_str()), Some("London"));
        assert!(ctl.state().error.is_none());
    }

    #[test]
    fn failure_transitions_loading_and_sets_error() {
        let mut ctl = FetchController::new();
        let ticket = ctl.begin("Atlantis").expect("ticket");
        assert!(ctl.is_loading());

        ctl.settle(ticket, Err(not_found()));
        assert!(!ctl.is_loading());
        assert_eq!(ctl.state().error.as_deref(), Some(crate::error::CITY_NOT_FOUND));
        assert!(ctl.state().result.is_none());
    }

    #[test]
    fn failure_replaces_previous_result_and_success_clears_error() {
        let mut ctl = FetchController::new();
        let t = ctl.begin("London").unwrap();
        ctl.settle(t, Ok(response("London", 800)));

        let t = ctl.begin("Atlantis").unwrap();
        // a new search clears the previous error but keeps the card until it settles
        assert!(ctl.state().result.is_some());
        ctl.settle(t, Err(FetchError::NoConditions));
        assert!(ctl.state().result.is_none());
        assert!(ctl.state().error.is_some());

        let t = ctl.begin("Paris").unwrap();
        assert!(ctl.state().error.is_none());
        ctl.settle(t, Ok(response("Paris", 500)));
        assert!(ctl.state().error.is_none());
        assert_eq!(ctl.state().result.as_ref().unwrap().name, "Paris");
    }

    #[test]
    fn superseded_search_is_discarded_regardless_of_arrival_order() {
        let mut ctl = FetchController::new();
        let first = ctl.begin("London").unwrap();
        let second = ctl.begin("Paris").unwrap();
        assert!(second.seq() > first.seq());

        // the newer search resolves first, the older one straggles in afterwards
        assert_eq!(ctl.settle(second, Ok(response("Paris", 500))), Settled::Applied);
        assert_eq!(ctl.settle(first, Ok(response("London", 800))), Settled::Discarded);

        assert_eq!(ctl.state().result.as_ref().unwrap().name, "Paris");
        assert!(!ctl.is_loading());
    }

    #[test]
    fn stale_outcome_does_not_clear_loading_of_newer_search() {
        let mut ctl = FetchController::new();
        let first = ctl.begin("London").unwrap();
        let second = ctl.begin("Paris").unwrap();

        assert_eq!(ctl.settle(first, Err(not_found())), Settled::Discarded);
        assert!(ctl.is_loading());
        assert!(ctl.state().error.is_none());

        ctl.settle(second, Ok(response("Paris", 500)));
        assert!(!ctl.is_loading());
    }

    #[tokio::test]
    async fn search_calls_provider_once_with_trimmed_city() {
        let provider = RecordingProvider::default();
        let mut ctl = FetchController::new();

        let settled = ctl.search(&provider, "  Oslo ").await;
        assert_eq!(settled, Some(Settled::Applied));
        assert_eq!(*provider.calls.lock().unwrap(), vec!["Oslo".to_string()]);
    }

    #[tokio::test]
    async fn blank_search_never_reaches_provider() {
        let provider = RecordingProvider { fail: true, ..Default::default() };
        let mut ctl = FetchController::new();

        assert_eq!(ctl.search(&provider, " ").await, None);
        assert!(provider.calls.lock().unwrap().is_empty());
        assert!(ctl.state().error.is_none());
    }
}
