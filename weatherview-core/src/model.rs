use serde::{Deserialize, Serialize};

/// Current conditions for one city, as returned by the weather endpoint.
///
/// Field names follow the upstream JSON so the payload deserializes directly;
/// unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub name: String,
    pub sys: Sys,
    pub weather: Vec<Condition>,
    pub main: MainMetrics,
    pub wind: Wind,
    /// Visibility distance in metres.
    #[serde(default)]
    pub visibility: Option<u32>,
    /// Shift in seconds from UTC for the location.
    #[serde(default)]
    pub timezone: Option<i32>,
    /// Observation time, epoch seconds.
    #[serde(default)]
    pub dt: Option<i64>,
}

impl WeatherResponse {
    /// The first condition record; providers list the dominant one first.
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    pub fn condition_code(&self) -> Option<u32> {
        self.primary_condition().map(|c| c.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sys {
    #[serde(default)]
    pub country: String,
    pub sunrise: i64,
    pub sunset: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: u32,
    /// Short group name, e.g. "Clear" or "Rain".
    #[serde(default)]
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainMetrics {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    /// Sea-level pressure in hPa.
    pub pressure: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Metres per second with metric units.
    pub speed: f64,
}
