//! Presentation of a weather response as ready-to-print strings.

use chrono::{DateTime, FixedOffset, Offset, Utc};

use crate::model::WeatherResponse;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Everything the weather card shows, already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherCard {
    pub location: String,
    pub date_line: String,
    pub temperature: String,
    pub feels_like: String,
    pub description: String,
    pub icon_url: Option<String>,
    pub humidity: String,
    pub wind: String,
    pub pressure: String,
    pub visibility: String,
    pub sunrise: String,
    pub sunset: String,
}

impl WeatherCard {
    /// Build the card; `now` supplies the date line, shown in the location's
    /// own timezone.
    pub fn new(data: &WeatherResponse, now: DateTime<Utc>) -> Self {
        let offset = location_offset(data.timezone);
        let condition = data.primary_condition();

        Self {
            location: format_location(&data.name, &data.sys.country),
            date_line: now.with_timezone(&offset).format("%A, %B %-d, %Y").to_string(),
            temperature: format_celsius(data.main.temp),
            feels_like: format_celsius(data.main.feels_like),
            description: condition
                .map(|c| c.description.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            icon_url: condition.map(|c| icon_url(&c.icon)),
            humidity: format!("{}%", data.main.humidity),
            wind: format!("{} m/s", data.wind.speed),
            pressure: format!("{} hPa", data.main.pressure),
            visibility: data.visibility.map_or_else(|| "n/a".to_string(), format_visibility),
            sunrise: format_clock(data.sys.sunrise, offset),
            sunset: format_clock(data.sys.sunset, offset),
        }
    }

    /// Description with every word capitalized, for headings.
    pub fn description_title(&self) -> String {
        self.description
            .split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }
}

pub fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}@2x.png")
}

fn format_location(name: &str, country: &str) -> String {
    if country.is_empty() { name.to_string() } else { format!("{name}, {country}") }
}

/// Whole degrees, halves rounded up (so -2.5 shows as -2).
fn format_celsius(value: f64) -> String {
    let rounded = (value + 0.5).floor() as i64;
    format!("{rounded}°C")
}

fn format_visibility(metres: u32) -> String {
    format!("{:.1} km", f64::from(metres) / 1000.0)
}

fn location_offset(shift_secs: Option<i32>) -> FixedOffset {
    shift_secs.and_then(FixedOffset::east_opt).unwrap_or_else(|| Utc.fix())
}

/// 12-hour wall-clock time, e.g. "06:42 AM".
fn format_clock(epoch_secs: i64, offset: FixedOffset) -> String {
    DateTime::from_timestamp(epoch_secs, 0)
        .map(|t| t.with_timezone(&offset).format("%I:%M %p").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Condition, MainMetrics, Sys, Wind};
    use chrono::TimeZone;

    fn london() -> WeatherResponse {
        WeatherResponse {
            name: "London".into(),
            sys: Sys { country: "GB".into(), sunrise: 1000, sunset: 2000 },
            weather: vec![Condition {
                id: 800,
                main: "Clear".into(),
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

    fn monday() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn london_card() {
        let card = WeatherCard::new(&london(), monday());

        assert_eq!(card.location, "London, GB");
        assert_eq!(card.date_line, "Monday, October 19, 2026");
        assert_eq!(card.temperature, "15°C");
        assert_eq!(card.feels_like, "14°C");
        assert_eq!(card.description, "clear sky");
        assert_eq!(card.description_title(), "Clear Sky");
        assert_eq!(card.icon_url.as_deref(), Some("https://openweathermap.org/img/wn/01d@2x.png"));
        assert_eq!(card.humidity, "60%");
        assert_eq!(card.wind, "3.2 m/s");
        assert_eq!(card.pressure, "1012 hPa");
        assert_eq!(card.visibility, "10.0 km");
        assert_eq!(card.sunrise, "12:16 AM");
        assert_eq!(card.sunset, "12:33 AM");
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(format_celsius(14.5), "15°C");
        assert_eq!(format_celsius(14.49), "14°C");
        assert_eq!(format_celsius(-2.5), "-2°C");
        assert_eq!(format_celsius(-2.6), "-3°C");
        assert_eq!(format_celsius(-0.3), "0°C");
    }

    #[test]
    fn timezone_shifts_clock_and_date() {
        let mut data = london();
        // UTC+10
        data.timezone = Some(36_000);
        data.sys.sunrise = 1_760_817_600; // 2025-10-18T20:00:00Z

        let card = WeatherCard::new(&data, Utc.with_ymd_and_hms(2026, 10, 19, 20, 0, 0).unwrap());
        assert_eq!(card.sunrise, "06:00 AM");
        assert_eq!(card.date_line, "Tuesday, October 20, 2026");
    }

    #[test]
    fn missing_optional_fields() {
        let mut data = london();
        data.visibility = None;
        data.sys.country.clear();
        data.weather.clear();

        let card = WeatherCard::new(&data, monday());
        assert_eq!(card.visibility, "n/a");
        assert_eq!(card.location, "London");
        assert_eq!(card.description, "Unknown");
        assert!(card.icon_url.is_none());
    }

    #[test]
    fn fractional_visibility() {
        assert_eq!(format_visibility(2500), "2.5 km");
        assert_eq!(format_visibility(0), "0.0 km");
    }
}
