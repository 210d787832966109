#![forbid(unsafe_code)]

//! Keyboard navigation configuration.
//!
//! # Timing Defaults
//!
//! | Setting | Default | Range | Description |
//! |---------|---------|-------|-------------|
//! | `throttle_window` | 60ms | 0-500ms | At most one handled key per window |
//!
//! # Environment Variables
//!
//! | Variable | Type | Default | Description |
//! |----------|------|---------|-------------|
//! | `EXPLORER_NAV_THROTTLE_MS` | u64 | 60 | Throttle window for tree keys |
//! | `EXPLORER_DISABLE_NAV_THROTTLE` | bool | false | Handle every key event |
//! | `EXPLORER_DISABLE_KEYBOARD_NAV` | bool | false | Start with navigation off |

use web_time::Duration;

use crate::throttle::Throttle;

/// Default throttle window for directional keys.
pub const DEFAULT_NAV_THROTTLE_MS: u64 = 60;

/// Minimum allowed throttle window.
pub const MIN_NAV_THROTTLE_MS: u64 = 0;

/// Maximum allowed throttle window.
pub const MAX_NAV_THROTTLE_MS: u64 = 500;

/// Configuration for tree keyboard navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationConfig {
    /// Window in which at most one key event is handled.
    /// Default: 60ms.
    pub throttle_window: Duration,

    /// Whether keyboard navigation starts enabled.
    /// Default: true.
    pub keyboard_enabled: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            throttle_window: Duration::from_millis(DEFAULT_NAV_THROTTLE_MS),
            keyboard_enabled: true,
        }
    }
}

impl NavigationConfig {
    /// Set a custom throttle window.
    #[must_use]
    pub fn with_throttle_window(mut self, window: Duration) -> Self {
        self.throttle_window = window;
        self
    }

    /// Handle every key event, however close together.
    #[must_use]
    pub fn without_throttle(mut self) -> Self {
        self.throttle_window = Duration::ZERO;
        self
    }

    /// Set whether keyboard navigation starts enabled.
    #[must_use]
    pub fn with_keyboard_enabled(mut self, enabled: bool) -> Self {
        self.keyboard_enabled = enabled;
        self
    }

    /// Load config from environment variables.
    ///
    /// Values are clamped to valid ranges.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load config through an arbitrary variable lookup.
    ///
    /// [`from_env`](Self::from_env) uses the process environment.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("EXPLORER_NAV_THROTTLE_MS")
            && let Ok(ms) = val.trim().parse::<u64>()
        {
            config.throttle_window = Duration::from_millis(ms);
        }

        if let Some(val) = lookup("EXPLORER_DISABLE_NAV_THROTTLE")
            && is_truthy(&val)
        {
            config.throttle_window = Duration::ZERO;
        }

        if let Some(val) = lookup("EXPLORER_DISABLE_KEYBOARD_NAV") {
            config.keyboard_enabled = !is_truthy(&val);
        }

        config.validated()
    }

    /// Clamp values to safe ranges.
    ///
    /// ```
    /// use explorer_core::config::NavigationConfig;
    /// use std::time::Duration;
    ///
    /// let config = NavigationConfig::default()
    ///     .with_throttle_window(Duration::from_secs(5))
    ///     .validated();
    /// assert_eq!(config.throttle_window.as_millis(), 500);
    /// ```
    #[must_use]
    pub fn validated(mut self) -> Self {
        let window_ms = self.throttle_window.as_millis() as u64;
        let clamped = window_ms.clamp(MIN_NAV_THROTTLE_MS, MAX_NAV_THROTTLE_MS);
        self.throttle_window = Duration::from_millis(clamped);
        self
    }

    /// Check if values are within valid ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let window_ms = self.throttle_window.as_millis() as u64;
        (MIN_NAV_THROTTLE_MS..=MAX_NAV_THROTTLE_MS).contains(&window_ms)
    }

    /// Build the throttle described by this config.
    #[must_use]
    pub fn throttle(&self) -> Throttle {
        Throttle::new(self.throttle_window)
    }
}

fn is_truthy(val: &str) -> bool {
    let val = val.trim();
    val == "1" || val.eq_ignore_ascii_case("true") || val.eq_ignore_ascii_case("yes")
}
