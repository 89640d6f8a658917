//! Page background selection from a weather condition code.

use std::fmt;

use crate::model::WeatherResponse;

/// An sRGB colour stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Two-stop gradient drawn top-left to bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub from: Rgb,
    pub to: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Background {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    /// Fog, haze, dust, smoke and friends.
    Atmosphere,
    Clear,
    Clouds,
    Default,
}

impl Background {
    /// Map a condition code onto its category using half-open ranges.
    pub fn from_code(code: u32) -> Self {
        match code {
            200..300 => Background::Thunderstorm,
            300..400 => Background::Drizzle,
            500..600 => Background::Rain,
            600..700 => Background::Snow,
            700..800 => Background::Atmosphere,
            800 => Background::Clear,
            801..900 => Background::Clouds,
            _ => Background::Default,
        }
    }

    pub fn for_result(result: Option<&WeatherResponse>) -> Self {
        result
            .and_then(WeatherResponse::condition_code)
            .map_or(Background::Default, Background::from_code)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Background::Thunderstorm => "thunderstorm",
            Background::Drizzle => "drizzle",
            Background::Rain => "rain",
            Background::Snow => "snow",
            Background::Atmosphere => "atmosphere",
            Background::Clear => "clear",
            Background::Clouds => "clouds",
            Background::Default => "default",
        }
    }

    pub const fn all() -> &'static [Background] {
        &[
            Background::Thunderstorm,
            Background::Drizzle,
            Background::Rain,
            Background::Snow,
            Background::Atmosphere,
            Background::Clear,
            Background::Clouds,
            Background::Default,
        ]
    }

    pub fn gradient(&self) -> Gradient {
        const GRAY_400: Rgb = Rgb(0x9c, 0xa3, 0xaf);
        const GRAY_500: Rgb = Rgb(0x6b, 0x72, 0x80);
        const GRAY_600: Rgb = Rgb(0x4b, 0x55, 0x63);
        const GRAY_700: Rgb = Rgb(0x37, 0x41, 0x51);
        const GRAY_800: Rgb = Rgb(0x1f, 0x29, 0x37);
        const BLUE_300: Rgb = Rgb(0x93, 0xc5, 0xfd);
        const BLUE_400: Rgb = Rgb(0x60, 0xa5, 0xfa);
        const BLUE_500: Rgb = Rgb(0x3b, 0x82, 0xf6);
        const BLUE_600: Rgb = Rgb(0x25, 0x63, 0xeb);
        const YELLOW_400: Rgb = Rgb(0xfa, 0xcc, 0x15);
        const PURPLE_500: Rgb = Rgb(0xa8, 0x55, 0xf7);
        const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);

        let (from, to) = match self {
            Background::Thunderstorm => (GRAY_600, GRAY_800),
            Background::Drizzle => (BLUE_500, GRAY_600),
            Background::Rain => (BLUE_600, GRAY_700),
            Background::Snow => (BLUE_300, WHITE),
            Background::Atmosphere => (GRAY_500, GRAY_700),
            Background::Clear => (BLUE_400, YELLOW_400),
            Background::Clouds => (GRAY_400, BLUE_500),
            Background::Default => (BLUE_400, PURPLE_500),
        };

        Gradient { from, to }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Gradient {
    /// Colour at `t` in `[0, 1]` along the gradient; `t` is clamped.
    pub fn at(&self, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| -> u8 {
            let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            v.round() as u8
        };

        Rgb(
            lerp(self.from.0, self.to.0),
            lerp(self.from.1, self.to.1),
            lerp(self.from.2, self.to.2),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thunderstorm_band_and_its_boundaries() {
        for code in 200..300 {
            assert_eq!(Background::from_code(code), Background::Thunderstorm, "code {code}");
        }
        assert_eq!(Background::from_code(199), Background::Default);
        assert_eq!(Background::from_code(200), Background::Thunderstorm);
        assert_eq!(Background::from_code(299), Background::Thunderstorm);
        assert_eq!(Background::from_code(300), Background::Drizzle);
    }

    #[test]
    fn clear_clouds_and_out_of_range() {
        assert_eq!(Background::from_code(800), Background::Clear);
        assert_eq!(Background::from_code(801), Background::Clouds);
        assert_eq!(Background::from_code(899), Background::Clouds);
        assert_eq!(Background::from_code(900), Background::Default);
        assert_eq!(Background::from_code(u32::MAX), Background::Default);
    }

    #[test]
    fn gap_between_drizzle_and_rain_is_default() {
        assert_eq!(Background::from_code(399), Background::Drizzle);
        assert_eq!(Background::from_code(400), Background::Default);
        assert_eq!(Background::from_code(499), Background::Default);
        assert_eq!(Background::from_code(500), Background::Rain);
        assert_eq!(Background::from_code(600), Background::Snow);
        assert_eq!(Background::from_code(701), Background::Atmosphere);
    }

    #[test]
    fn no_result_is_default() {
        assert_eq!(Background::for_result(None), Background::Default);
    }

    #[test]
    fn names_are_distinct() {
        let mut names: Vec<_> = Background::all().iter().map(Background::as_str).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Background::all().len());
    }

    #[test]
    fn gradient_endpoints_and_clamping() {
        let g = Background::Snow.gradient();
        assert_eq!(g.at(0.0), g.from);
        assert_eq!(g.at(1.0), g.to);
        assert_eq!(g.at(-3.0), g.from);
        assert_eq!(g.at(7.5), g.to);
    }
}
