// ============================================================================
// ROUTER VIEWMODEL - Navegación por fragmento (#) + efectos en el DOM
// ============================================================================
// La máquina de estados (state::router_state) decide; aquí se renderiza,
// se marca el enlace activo, se anuncia y se notifica a los subscribers.
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, KeyboardEvent, MouseEvent};

use crate::a11y::focus::main_content;
use crate::a11y::focus_temporarily;
use crate::config::CONFIG;
use crate::dom::{
    add_class, document, event_target_element, focus_element, get_attribute, get_element_by_id,
    is_activation_key, location_hash, on_click, on_event, on_keydown, query_selector,
    query_selector_all, remove_attribute, remove_class, set_attribute, set_document_title,
    set_location_hash, window,
};
use crate::models::route::{classify_href, current_fragment, is_current_link, LinkTarget, Route};
use crate::state::{AppState, NavigationOutcome};
use crate::utils::constants::{
    ACTIVE_LINK_CLASS, INTERNAL_LINK_SELECTOR, MOUNT_ROOT_ID, NAV_LINK_SELECTOR, SKIP_LINK_SELECTOR,
};
use crate::utils::i18n::{t, t_with};
use crate::views::TemplateRegistry;

/// Atajo Alt+<dígito>
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    Page(Route),
    SkipLink,
}

/// Alt+1..4 → páginas en orden del menú, Alt+0 → skip link
pub fn shortcut_for(key: &str, alt: bool, ctrl: bool, meta: bool) -> Option<Shortcut> {
    if !alt || ctrl || meta {
        return None;
    }
    match key {
        "0" => Some(Shortcut::SkipLink),
        "1" => Some(Shortcut::Page(Route::Inicio)),
        "2" => Some(Shortcut::Page(Route::Projetos)),
        "3" => Some(Shortcut::Page(Route::Cadastro)),
        "4" => Some(Shortcut::Page(Route::Sobre)),
        _ => None,
    }
}

/// Texto para aria-label de un enlace de navegación
pub fn nav_link_label(text: &str, current: bool) -> String {
    if current {
        t_with("pagina_atual", &[text])
    } else {
        t_with("navegar_para", &[text])
    }
}

pub struct RouterViewModel {
    state: AppState,
    registry: Rc<TemplateRegistry>,
}

impl RouterViewModel {
    pub fn new(state: &AppState, registry: Rc<TemplateRegistry>) -> Rc<Self> {
        Rc::new(Self {
            state: state.clone(),
            registry,
        })
    }

    /// Registrar listeners globales y renderizar la ruta inicial
    pub fn init(self: &Rc<Self>) -> Result<(), JsValue> {
        let win = window().ok_or_else(|| JsValue::from_str("No window"))?;
        let doc = document().ok_or_else(|| JsValue::from_str("No document"))?;

        let vm = self.clone();
        on_event(&win, "hashchange", move |_: Event| {
            let hash = location_hash();
            if vm.state.router.borrow_mut().consume_reset(&hash) {
                log::debug!("🔍 [ROUTER] hashchange de recuperación ignorado");
                return;
            }
            vm.route(&hash);
        })?;

        // Delegación de clicks en enlaces internos
        let vm = self.clone();
        on_click(&doc, move |event: MouseEvent| {
            if event.button() != 0
                || event.ctrl_key()
                || event.meta_key()
                || event.shift_key()
                || event.alt_key()
                || event.default_prevented()
            {
                return;
            }
            let Some(link) = event_target_element(&event)
                .and_then(|el| el.closest(INTERNAL_LINK_SELECTOR).ok().flatten())
            else {
                return;
            };
            let href = get_attribute(&link, "href").unwrap_or_default();
            match classify_href(&href) {
                LinkTarget::Ignore => event.prevent_default(),
                LinkTarget::External => {}
                LinkTarget::Internal(fragment) => {
                    event.prevent_default();
                    vm.go_to(&fragment);
                }
            }
        })?;

        let vm = self.clone();
        on_keydown(&doc, move |event: KeyboardEvent| {
            if let Some(shortcut) =
                shortcut_for(&event.key(), event.alt_key(), event.ctrl_key(), event.meta_key())
            {
                event.prevent_default();
                match shortcut {
                    Shortcut::Page(route) => vm.go_to(&route.fragment()),
                    Shortcut::SkipLink => {
                        if let Ok(Some(skip)) = query_selector(SKIP_LINK_SELECTOR) {
                            focus_element(&skip);
                        }
                    }
                }
                return;
            }

            // Enter/Espacio sobre un enlace interno equivale a un click
            if !is_activation_key(&event) {
                return;
            }
            let Some(link) = event_target_element(&event)
                .filter(|el| el.matches(INTERNAL_LINK_SELECTOR).unwrap_or(false))
            else {
                return;
            };
            event.prevent_default();
            if let Some(link) = link.dyn_ref::<HtmlElement>() {
                link.click();
            }
        })?;

        log::info!("🧭 [ROUTER] Router inicializado");
        self.route(&location_hash());
        Ok(())
    }

    /// Navegar a un fragmento. Si ya es el actual no habrá hashchange,
    /// así que se renderiza directamente.
    pub fn go_to(&self, fragment: &str) {
        if location_hash() == fragment {
            self.route(fragment);
        } else if let Err(e) = set_location_hash(fragment) {
            log::error!("❌ [ROUTER] No se pudo cambiar el fragmento: {:?}", e);
            self.route(fragment);
        }
    }

    /// Renderizar la página del fragmento, con recuperación a inicio
    pub fn route(&self, fragment: &str) {
        // El borrow se suelta antes de renderizar: los on_mount pueden
        // volver a consultar el router.
        let pending = self.state.router.borrow_mut().begin(fragment);
        let Some(pending) = pending else {
            return;
        };
        log::info!("🧭 [ROUTER] Navegando a '{}'", pending.page);

        let outcome = match self
            .registry
            .render(&pending.page, &self.state, pending.page_changed)
        {
            Ok(()) => self.state.router.borrow_mut().render_succeeded(&pending.page),
            Err(error) => {
                let fallback = self.state.router.borrow_mut().render_failed(&pending.page, &error);
                let ok = match self
                    .registry
                    .render(&fallback.page, &self.state, fallback.page_changed)
                {
                    Ok(()) => true,
                    Err(e) => {
                        log::error!("❌ [ROUTER] Recuperación fallida: {}", e);
                        false
                    }
                };
                self.state.router.borrow_mut().recovery_finished(ok, fragment)
            }
        };

        self.after_navigation(&outcome);
    }

    fn after_navigation(&self, outcome: &NavigationOutcome) {
        if let Some(reset) = &outcome.reset_fragment {
            if let Err(e) = set_location_hash(reset) {
                log::error!("❌ [ROUTER] No se pudo restaurar el fragmento: {:?}", e);
            }
        }

        if outcome.fallback_failed {
            render_inline_error();
        }

        let route = Route::from_key(&outcome.page).unwrap_or(Route::HOME);
        set_document_title(&CONFIG.page_title(&route.title()));
        if let Some(main) = main_content() {
            let _ = set_attribute(&main, "aria-label", &route.title());
        }

        mark_active_links(&current_fragment(&route.fragment()));

        if outcome.recovered {
            self.state.announcer.announce_assertive(&t("erro_rota"));
        } else {
            self.state.announcer.announce(&route.announcement());
        }

        self.state.close_menu();
        self.state.close_modal();

        if outcome.page_changed {
            self.state.notify_navigation(&outcome.page);
        }
    }
}

/// Último recurso cuando ni inicio puede renderizarse
fn render_inline_error() {
    if let Some(root) = get_element_by_id(MOUNT_ROOT_ID) {
        root.set_inner_html(&format!(
            r#"<div role="alert" class="error">{}</div>"#,
            t("erro_pagina")
        ));
        let _ = focus_temporarily(&root);
    }
}

/// Clase, aria-current y aria-label de los enlaces del menú
fn mark_active_links(current: &str) {
    let links = match query_selector_all(NAV_LINK_SELECTOR) {
        Ok(links) => links,
        Err(e) => {
            log::warn!("⚠️ [ROUTER] No se pudieron consultar los enlaces: {:?}", e);
            return;
        }
    };

    for link in links {
        let href = get_attribute(&link, "href").unwrap_or_default();
        let text = link_text(&link);
        let active = is_current_link(&href, current);
        if active {
            let _ = add_class(&link, ACTIVE_LINK_CLASS);
            let _ = set_attribute(&link, "aria-current", "page");
        } else {
            let _ = remove_class(&link, ACTIVE_LINK_CLASS);
            let _ = remove_attribute(&link, "aria-current");
        }
        let _ = set_attribute(&link, "aria-label", &nav_link_label(&text, active));
    }
}

fn link_text(link: &Element) -> String {
    link.text_content().unwrap_or_default().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alt_digit_shortcuts() {
        assert_eq!(shortcut_for("1", true, false, false), Some(Shortcut::Page(Route::Inicio)));
        assert_eq!(shortcut_for("4", true, false, false), Some(Shortcut::Page(Route::Sobre)));
        assert_eq!(shortcut_for("0", true, false, false), Some(Shortcut::SkipLink));
        assert_eq!(shortcut_for("5", true, false, false), None);
        assert_eq!(shortcut_for("1", false, false, false), None);
        assert_eq!(shortcut_for("1", true, true, false), None);
    }

    #[test]
    fn test_nav_link_labels() {
        assert_eq!(nav_link_label("Projetos", true), "Projetos - Página atual");
        assert_eq!(nav_link_label("Sobre", false), "Navegar para Sobre");
    }
}
