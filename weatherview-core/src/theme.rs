//! Dark/light theme preference.
//!
//! The preference is read once at startup and written on every change. Storage
//! sits behind [`ThemeStore`] so the rest of the app never cares whether it is
//! backed by a file or only lives in memory. The active theme is mirrored onto a
//! [`RootMarker`], the class list the renderer reads to pick its palette.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeSet,
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
    sync::{Arc, Mutex},
};
use tracing::{debug, info, warn};

use crate::{config::Config, error::ConfigError};

/// Class added to the root marker while the dark theme is active.
pub const DARK_CLASS: &str = "dark";

pub const COLOR_SCHEME_ENV: &str = "WEATHERVIEW_COLOR_SCHEME";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ConfigError::InvalidTheme(s.to_string())),
        }
    }
}

/// Persistence for the theme preference.
pub trait ThemeStore: Send + fmt::Debug {
    /// The stored preference, `None` when nothing usable has been written yet.
    fn load(&self) -> Result<Option<Theme>>;

    fn save(&mut self, theme: Theme) -> Result<()>;
}

/// Store for environments without persistent storage.
///
/// Clones share the same slot, so a test can keep a handle and inspect what the
/// toggle wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryThemeStore {
    slot: Arc<Mutex<Option<Theme>>>,
}

impl MemoryThemeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(theme: Theme) -> Self {
        Self { slot: Arc::new(Mutex::new(Some(theme))) }
    }

    pub fn get(&self) -> Option<Theme> {
        *self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ThemeStore for MemoryThemeStore {
    fn load(&self) -> Result<Option<Theme>> {
        Ok(self.get())
    }

    fn save(&mut self, theme: Theme) -> Result<()> {
        *self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(theme);
        Ok(())
    }
}

/// On-disk shape of the preferences file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Preferences {
    theme: Option<String>,
}

/// Theme preference kept in a small TOML file.
#[derive(Debug, Clone)]
pub struct FileThemeStore {
    path: PathBuf,
}

impl FileThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ThemeStore for FileThemeStore {
    fn load(&self) -> Result<Option<Theme>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path).with_context(|| {
            format!("Failed to read preferences file: {}", self.path.display())
        })?;

        let prefs: Preferences = toml::from_str(&contents).with_context(|| {
            format!("Failed to parse preferences file: {}", self.path.display())
        })?;

        match prefs.theme.as_deref().map(Theme::from_str) {
            Some(Ok(theme)) => Ok(Some(theme)),
            Some(Err(err)) => {
                warn!(path = %self.path.display(), %err, "ignoring stored theme");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn save(&mut self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create preferences directory: {}", parent.display())
            })?;
        }

        let prefs = Preferences { theme: Some(theme.as_str().to_string()) };
        let toml = toml::to_string_pretty(&prefs).context("Failed to serialize preferences")?;

        fs::write(&self.path, toml).with_context(|| {
            format!("Failed to write preferences file: {}", self.path.display())
        })?;

        Ok(())
    }
}

/// The preferences file next to the config file, or memory when the platform has
/// no config directory.
pub fn open_default_store() -> Box<dyn ThemeStore> {
    match Config::config_dir() {
        Ok(dir) => Box::new(FileThemeStore::new(dir.join("preferences.toml"))),
        Err(err) => {
            warn!(%err, "no config directory, theme preference will not persist");
            Box::new(MemoryThemeStore::new())
        }
    }
}

/// The operating system's colour-scheme preference, when it can be determined.
pub trait ColorSchemeHint {
    fn prefers_dark(&self) -> Option<bool>;
}

impl ColorSchemeHint for Option<bool> {
    fn prefers_dark(&self) -> Option<bool> {
        *self
    }
}

/// Reads the terminal's colour scheme from the environment.
///
/// `WEATHERVIEW_COLOR_SCHEME=dark|light` wins; otherwise the background index in
/// `COLORFGBG` (set by rxvt, Konsole and others) is used.
pub struct EnvColorScheme<F = fn(&str) -> Option<String>> {
    lookup: F,
}

impl fmt::Debug for EnvColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EnvColorScheme")
    }
}

impl EnvColorScheme {
    pub fn new() -> Self {
        Self { lookup: |name| std::env::var(name).ok() }
    }
}

impl Default for EnvColorScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Fn(&str) -> Option<String>> EnvColorScheme<F> {
    pub fn with_lookup(lookup: F) -> Self {
        Self { lookup }
    }
}

impl<F: Fn(&str) -> Option<String>> ColorSchemeHint for EnvColorScheme<F> {
    fn prefers_dark(&self) -> Option<bool> {
        if let Some(explicit) = (self.lookup)(COLOR_SCHEME_ENV) {
            if let Ok(theme) = explicit.parse::<Theme>() {
                return Some(theme.is_dark());
            }
        }

        // "fg;bg" or "fg;default;bg"
        let colorfgbg = (self.lookup)("COLORFGBG")?;
        let bg: u8 = colorfgbg.rsplit(';').next()?.trim().parse().ok()?;
        Some(matches!(bg, 0..=6 | 8))
    }
}

/// Style classes on the page root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootMarker {
    classes: BTreeSet<String>,
}

impl RootMarker {
    pub fn add(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn contains(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }
}

/// The theme switch and its two side effects: the root marker and the store.
#[derive(Debug)]
pub struct ThemeToggle {
    theme: Theme,
    store: Box<dyn ThemeStore>,
    marker: RootMarker,
}

impl ThemeToggle {
    /// Resolve the initial theme (stored value, then OS hint, then light) and
    /// apply it.
    pub fn init(store: Box<dyn ThemeStore>, hint: &dyn ColorSchemeHint) -> Self {
        let stored = store.load().unwrap_or_else(|err| {
            warn!(error = %err, "could not read theme preference");
            None
        });

        let theme = match stored {
            Some(theme) => theme,
            None if hint.prefers_dark() == Some(true) => Theme::Dark,
            None => Theme::Light,
        };

        debug!(%theme, from_store = stored.is_some(), "initial theme");

        let mut toggle = Self { theme, store, marker: RootMarker::default() };
        toggle.apply();
        toggle
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    pub fn marker(&self) -> &RootMarker {
        &self.marker
    }

    pub fn toggle(&mut self) -> Theme {
        self.set(self.theme.toggled());
        self.theme
    }

    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
        info!(%theme, "theme changed");
        self.apply();
    }

    fn apply(&mut self) {
        if self.theme.is_dark() {
            self.marker.add(DARK_CLASS);
        } else {
            self.marker.remove(DARK_CLASS);
        }

        // A failed write only costs persistence; the in-memory theme stays.
        if let Err(err) = self.store.save(self.theme) {
            warn!(error = %err, "could not persist theme preference");
        }
    }
}
