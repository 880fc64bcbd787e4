// ============================================================================
// THEME - Tema claro/oscuro y alto contraste
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Event, KeyboardEvent};

use crate::a11y::Announcer;
use crate::dom::{
    body, document, on_click, on_keydown, query_selector, remove_attribute, set_attribute,
    toggle_class, window, EventListener,
};
use crate::services::preferences_service::resolve_theme;
use crate::services::{PreferencesService, Theme};
use crate::utils::i18n::t;

const THEME_TOGGLE_SELECTOR: &str = "[data-theme-toggle]";
const CONTRAST_TOGGLE_SELECTOR: &str = "[data-contrast-toggle]";
const HIGH_CONTRAST_CLASS: &str = "high-contrast";
const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

#[derive(Clone)]
pub struct ThemeController {
    prefs: Rc<PreferencesService>,
    announcer: Announcer,
}

impl ThemeController {
    pub fn new(prefs: Rc<PreferencesService>, announcer: &Announcer) -> Self {
        Self {
            prefs,
            announcer: announcer.clone(),
        }
    }

    /// Aplicar preferencias guardadas y enganchar botones, atajos y media query
    pub fn init(&self) -> Result<(), JsValue> {
        self.apply_saved();

        if let Some(button) = query_selector(THEME_TOGGLE_SELECTOR)? {
            let controller = self.clone();
            on_click(&button, move |_| controller.toggle_theme())?;
        }
        if let Some(button) = query_selector(CONTRAST_TOGGLE_SELECTOR)? {
            let controller = self.clone();
            on_click(&button, move |_| controller.toggle_high_contrast())?;
        }

        let doc = document().ok_or_else(|| JsValue::from_str("No document"))?;
        let controller = self.clone();
        on_keydown(&doc, move |event: KeyboardEvent| {
            if !(event.alt_key() && event.shift_key()) {
                return;
            }
            match event.key().to_uppercase().as_str() {
                "T" => {
                    event.prevent_default();
                    controller.toggle_theme();
                }
                "C" => {
                    event.prevent_default();
                    controller.toggle_high_contrast();
                }
                _ => {}
            }
        })?;

        let media = window().and_then(|w| w.match_media(DARK_SCHEME_QUERY).ok().flatten());
        if let Some(media) = media {
            let controller = self.clone();
            EventListener::new(&media, "change", move |_: Event| {
                // Solo sigue al sistema si el usuario nunca eligió tema
                if controller.prefs.load_theme().is_none() {
                    controller.apply_saved();
                }
            })?
            .forget();
        }

        log::info!("🎨 [TEMA] Controles de tema inicializados");
        Ok(())
    }

    fn apply_saved(&self) {
        let (theme, persist) = resolve_theme(self.prefs.load_theme(), system_prefers_dark());
        if persist {
            if let Err(e) = self.prefs.save_theme(theme) {
                log::warn!("⚠️ [TEMA] No se pudo guardar el tema: {}", e);
            }
        }
        let high_contrast = self.prefs.load_high_contrast();
        apply_theme(theme);
        apply_high_contrast(high_contrast);
        update_buttons(theme, high_contrast);
    }

    pub fn toggle_theme(&self) {
        let theme = current_theme().toggled();
        apply_theme(theme);
        if let Err(e) = self.prefs.save_theme(theme) {
            log::error!("❌ [TEMA] Error guardando tema: {}", e);
        }
        update_buttons(theme, high_contrast_enabled());
        self.announcer.announce(&match theme {
            Theme::Dark => t("tema_escuro"),
            Theme::Light => t("tema_claro"),
        });
    }

    pub fn toggle_high_contrast(&self) {
        let enabled = !high_contrast_enabled();
        apply_high_contrast(enabled);
        if let Err(e) = self.prefs.save_high_contrast(enabled) {
            log::error!("❌ [TEMA] Error guardando alto contraste: {}", e);
        }
        update_buttons(current_theme(), enabled);
        self.announcer.announce(&if enabled {
            t("contraste_ativado")
        } else {
            t("contraste_desativado")
        });
    }
}

fn system_prefers_dark() -> bool {
    window()
        .and_then(|w| w.match_media(DARK_SCHEME_QUERY).ok().flatten())
        .map(|media| media.matches())
        .unwrap_or(false)
}

fn current_theme() -> Theme {
    let dark = document()
        .and_then(|doc| doc.document_element())
        .map(|root| root.get_attribute("data-theme").as_deref() == Some("dark"))
        .unwrap_or(false);
    if dark {
        Theme::Dark
    } else {
        Theme::Light
    }
}

fn high_contrast_enabled() -> bool {
    body()
        .map(|b| b.class_list().contains(HIGH_CONTRAST_CLASS))
        .unwrap_or(false)
}

fn apply_theme(theme: Theme) {
    let Some(root) = document().and_then(|doc| doc.document_element()) else {
        return;
    };
    let _ = match theme {
        Theme::Dark => set_attribute(&root, "data-theme", "dark"),
        Theme::Light => remove_attribute(&root, "data-theme"),
    };
}

fn apply_high_contrast(enabled: bool) {
    if let Some(body) = body() {
        let _ = toggle_class(&body, HIGH_CONTRAST_CLASS, enabled);
    }
}

fn update_buttons(theme: Theme, high_contrast: bool) {
    if let Ok(Some(button)) = query_selector(THEME_TOGGLE_SELECTOR) {
        let dark = theme == Theme::Dark;
        let _ = set_attribute(&button, "aria-pressed", if dark { "true" } else { "false" });
        let label = if dark {
            "Alternar para tema claro"
        } else {
            "Alternar para tema escuro"
        };
        let _ = set_attribute(&button, "aria-label", label);
    }
    if let Ok(Some(button)) = query_selector(CONTRAST_TOGGLE_SELECTOR) {
        let pressed = if high_contrast { "true" } else { "false" };
        let _ = set_attribute(&button, "aria-pressed", pressed);
        let label = if high_contrast {
            "Desativar alto contraste"
        } else {
            "Ativar alto contraste"
        };
        let _ = set_attribute(&button, "aria-label", label);
    }
}
