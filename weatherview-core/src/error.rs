use reqwest::StatusCode;
use thiserror::Error;

/// The only message a user ever sees for a failed lookup.
pub const CITY_NOT_FOUND: &str = "City not found. Please try again.";

/// Errors raised while fetching or decoding current weather.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response.
    #[error("failed to send weather request: {0}")]
    Transport(#[source] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("weather request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The response body could not be read.
    #[error("failed to read weather response body: {0}")]
    Body(#[source] reqwest::Error),

    /// The body was not a valid weather payload.
    #[error("failed to parse weather JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("weather response contained no condition records")]
    NoConditions,
}

impl FetchError {
    /// All failures collapse into one user-facing message; the variant is only
    /// used for logging.
    pub fn user_message(&self) -> &'static str {
        CITY_NOT_FOUND
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "No API key configured.\n\
         Hint: run `weatherview configure` or set the WEATHERVIEW_API_KEY environment variable."
    )]
    MissingApiKey,

    #[error("Unknown theme '{0}'. Expected \"dark\" or \"light\".")]
    InvalidTheme(String),
}
