use serde::{Deserialize, Serialize};
use tracing::debug;

use super::LocalConfigProvider;
use crate::app::{AppEvent, EventSink};

/// Theme selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    System,
    Light,
    Dark,
}

impl Default for ThemePreference {
    fn default() -> Self {
        Self::System
    }
}

/// Theme actually in use once `System` is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveTheme {
    Light,
    Dark,
}

/// Resolves the stored preference against the terminal background
#[derive(Clone)]
pub struct ThemeProvider {
    local_config: LocalConfigProvider,
    system_theme: EffectiveTheme,
    events: EventSink,
}

impl ThemeProvider {
    pub fn new(local_config: &LocalConfigProvider, events: EventSink) -> Self {
        let system_theme = detect_system_theme(std::env::var("COLORFGBG").ok().as_deref());
        debug!("System theme resolved to {:?}", system_theme);
        Self::with_system_theme(local_config, system_theme, events)
    }

    pub fn with_system_theme(
        local_config: &LocalConfigProvider,
        system_theme: EffectiveTheme,
        events: EventSink,
    ) -> Self {
        Self {
            local_config: local_config.clone(),
            system_theme,
            events,
        }
    }

    pub fn theme(&self) -> ThemePreference {
        self.local_config.theme()
    }

    pub fn set_theme(&self, theme: ThemePreference) {
        self.local_config.set_theme(theme);
        self.events.emit(AppEvent::ThemeChanged {
            dark: self.effective_theme() == EffectiveTheme::Dark,
        });
    }

    pub fn effective_theme(&self) -> EffectiveTheme {
        match self.theme() {
            ThemePreference::System => self.system_theme,
            ThemePreference::Light => EffectiveTheme::Light,
            ThemePreference::Dark => EffectiveTheme::Dark,
        }
    }
}

/// `COLORFGBG` is "fg;bg"; backgrounds 0-6 and 8 are dark
fn detect_system_theme(colorfgbg: Option<&str>) -> EffectiveTheme {
    let background = colorfgbg
        .and_then(|value| value.rsplit(';').next())
        .and_then(|bg| bg.parse::<u8>().ok());

    match background {
        Some(bg) if bg == 7 || bg >= 9 => EffectiveTheme::Light,
        _ => EffectiveTheme::Dark,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_system_theme() {
        assert_eq!(detect_system_theme(Some("15;0")), EffectiveTheme::Dark);
        assert_eq!(detect_system_theme(Some("0;15")), EffectiveTheme::Light);
        assert_eq!(detect_system_theme(None), EffectiveTheme::Dark);
    }

    #[test]
    fn test_explicit_preference_overrides_system() {
        let local = LocalConfigProvider::in_memory(EventSink::detached());
        let theme = ThemeProvider::with_system_theme(&local, EffectiveTheme::Dark, EventSink::detached());

        assert_eq!(theme.effective_theme(), EffectiveTheme::Dark);
        theme.set_theme(ThemePreference::Light);
        assert_eq!(theme.effective_theme(), EffectiveTheme::Light);
        assert_eq!(local.theme(), ThemePreference::Light);
    }
}
