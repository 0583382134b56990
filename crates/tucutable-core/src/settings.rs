//! Global UI settings persisted under the `"settings"` key.

use crate::error::Result;
use crate::storage::Storage;
use serde::Deserialize;
use serde::Serialize;
use std::rc::Rc;
use tracing::warn;

pub const SETTINGS_KEY: &str = "settings";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub theme_mode: ThemeMode,
}

/// Reads and writes [`Settings`] through a [`Storage`] backend.
pub struct SettingsStore {
    storage: Rc<dyn Storage>,
    settings: Settings,
}

impl SettingsStore {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        let settings = match storage.get_item(SETTINGS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!(%err, "discarding unreadable settings");
                Settings::default()
            }),
            Ok(None) => Settings::default(),
            Err(err) => {
                warn!(%err, "failed to read settings");
                Settings::default()
            }
        };
        Self { storage, settings }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.settings.theme_mode
    }

    pub fn set_theme_mode(&mut self, mode: ThemeMode) {
        self.settings.theme_mode = mode;
        if let Err(err) = self.persist() {
            warn!(%err, "failed to persist settings");
        }
    }

    pub fn toggle_theme_mode(&mut self) -> ThemeMode {
        let next = self.settings.theme_mode.toggled();
        self.set_theme_mode(next);
        next
    }

    fn persist(&self) -> Result<()> {
        let json = serde_json::to_string(&self.settings)?;
        self.storage.set_item(SETTINGS_KEY, &json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn theme_mode_round_trips_through_storage() {
        let storage: Rc<dyn Storage> = Rc::new(MemoryStorage::new());
        let mut s = SettingsStore::new(storage.clone());
        assert_eq!(s.theme_mode(), ThemeMode::Light);
        assert_eq!(s.toggle_theme_mode(), ThemeMode::Dark);

        assert_eq!(
            storage.get_item(SETTINGS_KEY).unwrap().as_deref(),
            Some(r#"{"themeMode":"dark"}"#)
        );
        assert_eq!(SettingsStore::new(storage).theme_mode(), ThemeMode::Dark);
    }
}
