//! Draws a [`PageView`] on the terminal.

use std::fmt::Write;

use weatherview_core::{PageView, Rgb, WeatherCard, theme::DARK_CLASS};

const WIDTH: usize = 60;

/// Whether ANSI colour escapes may be emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: bool,
}

impl Style {
    /// Colour unless `--plain` was given or `NO_COLOR` is set.
    pub fn detect(plain: bool) -> Self {
        Self { color: !plain && std::env::var_os("NO_COLOR").is_none() }
    }
}

struct Palette {
    text: Rgb,
    muted: Rgb,
    error: Rgb,
}

impl Palette {
    fn for_mode(dark: bool) -> Self {
        if dark {
            Palette {
                text: Rgb(0xf9, 0xfa, 0xfb),
                muted: Rgb(0x9c, 0xa3, 0xaf),
                error: Rgb(0xf8, 0x71, 0x71),
            }
        } else {
            Palette {
                text: Rgb(0x1f, 0x29, 0x37),
                muted: Rgb(0x4b, 0x55, 0x63),
                error: Rgb(0xdc, 0x26, 0x26),
            }
        }
    }
}

/// Styling follows the root marker, the same classes a stylesheet would key on.
fn is_dark(view: &PageView) -> bool {
    view.root_classes.iter().any(|class| class == DARK_CLASS)
}

fn paint(style: Style, fg: Rgb, text: &str) -> String {
    if !style.color {
        return text.to_string();
    }
    format!("\x1b[38;2;{};{};{}m{text}\x1b[0m", fg.0, fg.1, fg.2)
}

/// The whole page: header, status line and, when present, the card.
pub fn page(view: &PageView, style: Style) -> String {
    let palette = Palette::for_mode(is_dark(view));
    let mut out = String::new();

    out.push_str(&header(view, style));
    out.push('\n');

    if view.loading {
        let _ = writeln!(out, "  {}", paint(style, palette.muted, "Searching..."));
    }

    if let Some(error) = &view.error {
        let _ = writeln!(out, "  {}", paint(style, palette.error, error));
    }

    if let Some(card) = &view.card {
        out.push('\n');
        out.push_str(&weather_card(card, &palette, style));
    }

    out
}

/// Title bar filled with the background gradient.
fn header(view: &PageView, style: Style) -> String {
    let icon = if is_dark(view) { "☾" } else { "☀" };
    let label = format!(" {} {icon} ", view.title);

    if !style.color {
        return format!("=={label}== [{}]\n", view.background);
    }

    let gradient = view.background.gradient();
    let pad = WIDTH.saturating_sub(label.chars().count()) / 2;
    let mut chars: Vec<char> = " ".repeat(pad).chars().chain(label.chars()).collect();
    chars.resize(WIDTH.max(chars.len()), ' ');

    let mut out = String::new();
    let last = (chars.len() - 1) as f64;
    for (i, ch) in chars.iter().enumerate() {
        let Rgb(r, g, b) = gradient.at(i as f64 / last);
        let _ = write!(out, "\x1b[48;2;{r};{g};{b}m\x1b[1;97m{ch}");
    }
    out.push_str("\x1b[0m\n");
    out
}

fn weather_card(card: &WeatherCard, palette: &Palette, style: Style) -> String {
    let mut out = String::new();
    let text = |s: &str| paint(style, palette.text, s);
    let muted = |s: &str| paint(style, palette.muted, s);

    let _ = writeln!(out, "  {}", text(&card.location));
    let _ = writeln!(out, "  {}", muted(&card.date_line));
    out.push('\n');

    let _ = writeln!(out, "  {}  {}", text(&card.temperature), text(&card.description_title()));
    let _ = writeln!(out, "  {}", muted(&format!("Feels like {}", card.feels_like)));
    if let Some(icon) = &card.icon_url {
        let _ = writeln!(out, "  {}", muted(icon));
    }
    out.push('\n');

    for (label, value) in [
        ("Humidity", &card.humidity),
        ("Wind Speed", &card.wind),
        ("Pressure", &card.pressure),
        ("Visibility", &card.visibility),
    ] {
        let _ = writeln!(out, "  {}  {}", muted(&format!("{label:<12}")), text(value));
    }
    out.push('\n');

    let _ = writeln!(
        out,
        "  {} {}    {} {}",
        muted("Sunrise"),
        text(&card.sunrise),
        muted("Sunset"),
        text(&card.sunset),
    );

    out
}
