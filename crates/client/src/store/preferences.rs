//! Small persisted UI preferences: theme, accent color, cached address.

use std::sync::Arc;

use super::{StorageBackend, keys};

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Follow the terminal / OS setting.
    #[default]
    System,
    Light,
    Dark,
}

impl Theme {
    /// The persisted code for this theme.
    #[must_use]
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a persisted code; unknown codes fall back to `System`.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "light" => Self::Light,
            "dark" => Self::Dark,
            _ => Self::System,
        }
    }
}

/// Repository for the handful of persisted UI preferences.
///
/// Same swallow-and-log failure policy as the order store: a broken backend
/// reads as "no preference set".
pub struct PreferenceStore {
    storage: Arc<dyn StorageBackend>,
}

impl PreferenceStore {
    /// Create a store over the given backend.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    /// The persisted theme, defaulting to [`Theme::System`].
    #[must_use]
    pub fn theme(&self) -> Theme {
        self.get(keys::THEME)
            .map_or(Theme::System, |code| Theme::from_code(&code))
    }

    /// Persist the theme choice.
    pub fn set_theme(&self, theme: Theme) -> bool {
        self.set(keys::THEME, theme.as_code())
    }

    /// The persisted accent color (a hex string), if any.
    #[must_use]
    pub fn accent_color(&self) -> Option<String> {
        self.get(keys::ACCENT_COLOR)
    }

    /// Persist the accent color.
    pub fn set_accent_color(&self, color: &str) -> bool {
        self.set(keys::ACCENT_COLOR, color)
    }

    /// The last pickup address entered, if any; used to pre-fill forms.
    #[must_use]
    pub fn cached_address(&self) -> Option<String> {
        self.get(keys::CACHED_ADDRESS)
    }

    /// Persist the pickup address for form pre-fill.
    pub fn set_cached_address(&self, address: &str) -> bool {
        self.set(keys::CACHED_ADDRESS, address)
    }

    fn get(&self, key: &str) -> Option<String> {
        match self.storage.load(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to read preference");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> bool {
        match self.storage.save(key, value) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "failed to persist preference");
                false
            }
        }
    }
}
