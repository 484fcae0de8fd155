//! # Module: Theme Context
//!
//! ## Responsibility
//! Own the light/dark preference for one UI tree. A [`ThemeContext`] is created
//! once at startup, hands out cloneable [`ThemeHandle`]s to whatever renders,
//! and is torn down when the UI exits.
//!
//! ## Guarantees
//! - System appearance is detected once, at creation.
//! - After [`ThemeContext::teardown`] (or drop) every handle operation
//!   returns [`DashError::ThemeTornDown`].
//!
//! ## NOT Responsible For
//! - Colour palettes (see `tui::palette`)
//! - Persisting the preference

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::DashError;

/// User-selected theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Follow the terminal.
    System,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        };
        f.write_str(s)
    }
}

/// A concrete, resolved appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    /// Dark text on a light background.
    Light,
    /// Light text on a dark background.
    Dark,
}

impl Appearance {
    /// The other appearance.
    pub fn flipped(self) -> Self {
        match self {
            Appearance::Light => Appearance::Dark,
            Appearance::Dark => Appearance::Light,
        }
    }
}

impl From<Appearance> for Theme {
    fn from(a: Appearance) -> Self {
        match a {
            Appearance::Light => Theme::Light,
            Appearance::Dark => Theme::Dark,
        }
    }
}

/// Guess the terminal appearance from a `COLORFGBG` value (`"fg;bg"` or
/// `"fg;default;bg"`).
///
/// Background colours 7 and 9–15 are light. Anything unparseable is dark.
pub fn appearance_from_colorfgbg(value: Option<&str>) -> Appearance {
    let bg = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match bg {
        Some(7) | Some(9..=15) => Appearance::Light,
        _ => Appearance::Dark,
    }
}

/// Detect the system appearance from the environment.
pub fn detect_system_appearance() -> Appearance {
    appearance_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

#[derive(Debug)]
struct ThemeState {
    theme: Theme,
    system: Appearance,
}

impl ThemeState {
    fn appearance(&self) -> Appearance {
        match self.theme {
            Theme::Light => Appearance::Light,
            Theme::Dark => Appearance::Dark,
            Theme::System => self.system,
        }
    }
}

type Shared = Arc<RwLock<Option<ThemeState>>>;

/// Owner of the theme state. Dropping it tears the state down.
#[derive(Debug)]
pub struct ThemeContext {
    shared: Shared,
}

impl ThemeContext {
    /// Create a context, detecting the system appearance from the terminal.
    ///
    /// With `enable_system` the initial theme is the detected appearance;
    /// otherwise it is `default`.
    pub fn create(default: Theme, enable_system: bool) -> Self {
        Self::create_with_system(default, enable_system, detect_system_appearance())
    }

    /// Like [`ThemeContext::create`] with an explicit system appearance.
    pub fn create_with_system(default: Theme, enable_system: bool, system: Appearance) -> Self {
        let theme = if enable_system {
            Theme::from(system)
        } else {
            default
        };
        info!(%theme, ?system, "theme context created");
        Self {
            shared: Arc::new(RwLock::new(Some(ThemeState { theme, system }))),
        }
    }

    /// A handle for reading and changing the theme.
    pub fn handle(&self) -> ThemeHandle {
        ThemeHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// End the context. Outstanding handles start returning errors.
    pub fn teardown(self) {
        drop(self);
    }
}

impl Drop for ThemeContext {
    fn drop(&mut self) {
        if self.shared.write().take().is_some() {
            info!("theme context torn down");
        }
    }
}

/// Cloneable accessor for a [`ThemeContext`].
#[derive(Debug, Clone)]
pub struct ThemeHandle {
    shared: Shared,
}

impl ThemeHandle {
    /// The current preference.
    ///
    /// # Errors
    ///
    /// [`DashError::ThemeTornDown`] after teardown.
    pub fn theme(&self) -> Result<Theme, DashError> {
        self.shared
            .read()
            .as_ref()
            .map(|s| s.theme)
            .ok_or(DashError::ThemeTornDown)
    }

    /// The resolved appearance.
    ///
    /// # Errors
    ///
    /// [`DashError::ThemeTornDown`] after teardown.
    pub fn appearance(&self) -> Result<Appearance, DashError> {
        self.shared
            .read()
            .as_ref()
            .map(ThemeState::appearance)
            .ok_or(DashError::ThemeTornDown)
    }

    /// Replace the preference.
    ///
    /// # Errors
    ///
    /// [`DashError::ThemeTornDown`] after teardown.
    pub fn set_theme(&self, theme: Theme) -> Result<(), DashError> {
        let mut guard = self.shared.write();
        let state = guard.as_mut().ok_or(DashError::ThemeTornDown)?;
        debug!(from = %state.theme, to = %theme, "theme changed");
        state.theme = theme;
        Ok(())
    }

    /// Flip between dark and light based on what is currently shown, and
    /// return the new preference.
    ///
    /// # Errors
    ///
    /// [`DashError::ThemeTornDown`] after teardown.
    pub fn toggle(&self) -> Result<Theme, DashError> {
        let mut guard = self.shared.write();
        let state = guard.as_mut().ok_or(DashError::ThemeTornDown)?;
        let next = Theme::from(state.appearance().flipped());
        debug!(from = %state.theme, to = %next, "theme toggled");
        state.theme = next;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_used_without_system() {
        let ctx = ThemeContext::create_with_system(Theme::Light, false, Appearance::Dark);
        let h = ctx.handle();
        assert_eq!(h.theme().expect("alive"), Theme::Light);
        assert_eq!(h.appearance().expect("alive"), Appearance::Light);
    }

    #[test]
    fn test_system_detection_applied_at_create() {
        let ctx = ThemeContext::create_with_system(Theme::System, true, Appearance::Light);
        assert_eq!(ctx.handle().theme().expect("alive"), Theme::Light);
    }

    #[test]
    fn test_toggle_sticks() {
        let ctx = ThemeContext::create_with_system(Theme::System, true, Appearance::Dark);
        let h = ctx.handle();
        assert_eq!(h.toggle().expect("alive"), Theme::Light);
        assert_eq!(h.theme().expect("alive"), Theme::Light);
        assert_eq!(h.toggle().expect("alive"), Theme::Dark);
    }

    #[test]
    fn test_toggle_from_system_flips_resolved_appearance() {
        let ctx = ThemeContext::create_with_system(Theme::System, false, Appearance::Dark);
        let h = ctx.handle();
        assert_eq!(h.appearance().expect("alive"), Appearance::Dark);
        assert_eq!(h.toggle().expect("alive"), Theme::Light);
    }

    #[test]
    fn test_handles_share_state() {
        let ctx = ThemeContext::create_with_system(Theme::Dark, false, Appearance::Dark);
        let a = ctx.handle();
        let b = a.clone();
        a.set_theme(Theme::Light).expect("alive");
        assert_eq!(b.theme().expect("alive"), Theme::Light);
    }

    #[test]
    fn test_teardown_invalidates_handles() {
        let ctx = ThemeContext::create_with_system(Theme::Dark, false, Appearance::Dark);
        let h = ctx.handle();
        ctx.teardown();
        assert!(matches!(h.theme(), Err(DashError::ThemeTornDown)));
        assert!(matches!(h.toggle(), Err(DashError::ThemeTornDown)));
        assert!(matches!(
            h.set_theme(Theme::Light),
            Err(DashError::ThemeTornDown)
        ));
    }

    #[test]
    fn test_colorfgbg_parsing() {
        assert_eq!(appearance_from_colorfgbg(Some("15;0")), Appearance::Dark);
        assert_eq!(appearance_from_colorfgbg(Some("0;15")), Appearance::Light);
        assert_eq!(appearance_from_colorfgbg(Some("0;default;7")), Appearance::Light);
        assert_eq!(appearance_from_colorfgbg(Some("garbage")), Appearance::Dark);
        assert_eq!(appearance_from_colorfgbg(None), Appearance::Dark);
    }

    #[test]
    fn test_theme_deserializes_lowercase() {
        let t: Theme = serde_json::from_str("\"system\"").expect("valid");
        assert_eq!(t, Theme::System);
    }
}
