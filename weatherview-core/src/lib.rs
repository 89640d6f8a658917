//! Core library for `weatherview`, a city weather lookup.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider abstraction and its OpenWeather implementation
//! - The search/fetch lifecycle and page composition
//! - Presentation helpers: weather card, background gradient, theme
//!
//! It is used by `weatherview-cli`, but holds no terminal code of its own.

pub mod app;
pub mod background;
pub mod config;
pub mod controller;
pub mod display;
pub mod error;
pub mod model;
pub mod provider;
pub mod search;
pub mod theme;

pub use app::{App, PageView};
pub use background::{Background, Gradient, Rgb};
pub use config::{Config, Endpoint};
pub use controller::{FetchController, Settled, Ticket, UiState};
pub use display::WeatherCard;
pub use error::{ConfigError, FetchError};
pub use model::WeatherResponse;
pub use provider::{WeatherProvider, provider_from_config, provider_from_endpoint};
pub use search::SearchInput;
pub use theme::{Theme, ThemeStore, ThemeToggle};
