use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::utils::constants::{HIGH_CONTRAST_KEY, THEME_KEY};
use crate::utils::storage::{load_from_storage, save_to_storage, KeyValueStore, StorageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Theme> {
        match value.trim().trim_matches('"') {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Tema y alto contraste persistidos
pub struct PreferencesService {
    store: Rc<dyn KeyValueStore>,
}

impl PreferencesService {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Tema guardado; acepta JSON (`"dark"`) y el formato plano antiguo (`dark`)
    pub fn load_theme(&self) -> Option<Theme> {
        match self.store.get_item(THEME_KEY) {
            Ok(Some(raw)) => Theme::parse(&raw),
            Ok(None) => None,
            Err(e) => {
                log::warn!("⚠️ [TEMA] No se pudo leer el tema guardado: {}", e);
                None
            }
        }
    }

    pub fn save_theme(&self, theme: Theme) -> Result<(), StorageError> {
        save_to_storage(self.store.as_ref(), THEME_KEY, &theme)
    }

    pub fn load_high_contrast(&self) -> bool {
        match load_from_storage::<bool>(self.store.as_ref(), HIGH_CONTRAST_KEY) {
            Ok(value) => value.unwrap_or(false),
            Err(e) => {
                log::warn!("⚠️ [TEMA] Preferencia de contraste ilegible: {}", e);
                false
            }
        }
    }

    pub fn save_high_contrast(&self, enabled: bool) -> Result<(), StorageError> {
        save_to_storage(self.store.as_ref(), HIGH_CONTRAST_KEY, &enabled)
    }
}

/// Tema efectivo al arrancar: el guardado o, si no hay, el del sistema.
/// El booleano indica si hay que persistir el tema resuelto.
pub fn resolve_theme(saved: Option<Theme>, system_prefers_dark: bool) -> (Theme, bool) {
    match saved {
        Some(theme) => (theme, false),
        None if system_prefers_dark => (Theme::Dark, true),
        None => (Theme::Light, true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStore;

    #[test]
    fn test_theme_round_trip_and_legacy_plain_value() {
        let store = Rc::new(MemoryStore::new());
        let prefs = PreferencesService::new(store.clone());
        assert_eq!(prefs.load_theme(), None);

        prefs.save_theme(Theme::Dark).unwrap();
        assert_eq!(store.get_item(THEME_KEY).unwrap().as_deref(), Some("\"dark\""));
        assert_eq!(prefs.load_theme(), Some(Theme::Dark));

        store.set_item(THEME_KEY, "light").unwrap();
        assert_eq!(prefs.load_theme(), Some(Theme::Light));
    }

    #[test]
    fn test_high_contrast_flag() {
        let store = Rc::new(MemoryStore::new());
        let prefs = PreferencesService::new(store.clone());
        assert!(!prefs.load_high_contrast());
        prefs.save_high_contrast(true).unwrap();
        assert!(prefs.load_high_contrast());
        store.set_item(HIGH_CONTRAST_KEY, "garbage").unwrap();
        assert!(!prefs.load_high_contrast());
    }

    #[test]
    fn test_resolve_theme() {
        assert_eq!(resolve_theme(Some(Theme::Light), true), (Theme::Light, false));
        assert_eq!(resolve_theme(None, true), (Theme::Dark, true));
        assert_eq!(resolve_theme(None, false), (Theme::Light, true));
    }
}
