// ============================================================================
// FOCUS - Colocación de foco tras render/navegación
// ============================================================================
// Precedencia: skip link (solo si cambió la página) → encabezado de la
// página → contenedor main. El tabindex temporal se retira al cabo de
// TEMP_TABINDEX_MS para no ensuciar el orden de tabulación.
// ============================================================================

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::a11y::Announcer;
use crate::config::CONFIG;
use crate::dom::{focus_element, get_attribute, on_click, query_selector, remove_attribute, set_attribute};
use crate::utils::constants::{HEADING_SELECTOR, SKIP_LINK_SELECTOR};
use crate::utils::i18n::t;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    SkipLink,
    Heading,
    Main,
}

/// Primer candidato presente según la precedencia
pub fn pick_focus_target(
    page_changed: bool,
    has_skip_link: bool,
    has_heading: bool,
    has_main: bool,
) -> Option<FocusTarget> {
    if page_changed && has_skip_link {
        Some(FocusTarget::SkipLink)
    } else if has_heading {
        Some(FocusTarget::Heading)
    } else if has_main {
        Some(FocusTarget::Main)
    } else {
        None
    }
}

/// Contenedor principal: `#main-content` o el primer `main`
pub fn main_content() -> Option<Element> {
    crate::dom::get_element_by_id("main-content")
        .or_else(|| query_selector("main").ok().flatten())
}

/// Enfocar con un tabindex temporal que se restaura después
pub fn focus_temporarily(element: &Element) -> Result<(), JsValue> {
    let original = get_attribute(element, "tabindex");
    if original.is_none() {
        set_attribute(element, "tabindex", "-1")?;
    }
    focus_element(element);

    let element = element.clone();
    Timeout::new(CONFIG.timing.temp_tabindex_ms, move || {
        // Solo se retira el tabindex que pusimos nosotros
        if original.is_none() {
            let _ = remove_attribute(&element, "tabindex");
        }
    })
    .forget();
    Ok(())
}

/// Colocar el foco tras renderizar `root`
pub fn place_focus_after_render(root: &Element, page_changed: bool) {
    let skip_link = query_selector(SKIP_LINK_SELECTOR).ok().flatten();
    let heading = root.query_selector(HEADING_SELECTOR).ok().flatten();
    let main = main_content();

    let target = pick_focus_target(
        page_changed,
        skip_link.is_some(),
        heading.is_some(),
        main.is_some(),
    );
    let element = match target {
        Some(FocusTarget::SkipLink) => skip_link,
        Some(FocusTarget::Heading) => heading,
        Some(FocusTarget::Main) => main,
        None => None,
    };

    if let Some(element) = element {
        Timeout::new(CONFIG.timing.focus_delay_ms, move || {
            if let Err(e) = focus_temporarily(&element) {
                log::warn!("⚠️ [FOCUS] No se pudo enfocar tras el render: {:?}", e);
            }
        })
        .forget();
    }
}

/// Skip link: lleva el foco al contenido principal
pub fn init_skip_link(announcer: &Announcer) -> Result<(), JsValue> {
    let Some(skip_link) = query_selector(SKIP_LINK_SELECTOR)? else {
        log::warn!("⚠️ [FOCUS] Skip link no encontrado");
        return Ok(());
    };

    let announcer = announcer.clone();
    on_click(&skip_link, move |event| {
        event.prevent_default();
        if let Some(main) = main_content() {
            if focus_temporarily(&main).is_ok() {
                announcer.announce(&t("navegado_conteudo"));
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_link_only_when_page_changed() {
        assert_eq!(pick_focus_target(true, true, true, true), Some(FocusTarget::SkipLink));
        assert_eq!(pick_focus_target(false, true, true, true), Some(FocusTarget::Heading));
    }

    #[test]
    fn test_falls_back_to_main_then_nothing() {
        assert_eq!(pick_focus_target(true, false, false, true), Some(FocusTarget::Main));
        assert_eq!(pick_focus_target(false, true, false, true), Some(FocusTarget::Main));
        assert_eq!(pick_focus_target(true, false, false, false), None);
    }
}
