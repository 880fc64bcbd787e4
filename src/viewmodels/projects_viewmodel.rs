// ============================================================================
// PROJECTS VIEWMODEL - Búsqueda, categorías, favoritos y modales
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlInputElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, MouseEvent,
};

use crate::config::CONFIG;
use crate::dom::{
    active_element, add_class, event_target_element, is_activation_key, query_selector_all_in,
    remove_class, set_attribute, set_text_content,
};
use crate::models::project::{all_tags, catalog, filter_projects, Project};
use crate::state::AppState;
use crate::utils::i18n::{t, t_with};
use crate::views::modal::{open_detail_modal, open_support_modal};
use crate::views::pages::projetos::{card_markup, tag_buttons_markup};

const REVEAL_THRESHOLD: f64 = 0.1;
const POP_ADD_MS: u32 = 600;
const POP_REMOVE_MS: u32 = 350;

type RevealCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Observer de revelado junto a su callback; al soltarlo se desconecta
struct RevealObserver {
    observer: IntersectionObserver,
    _callback: RevealCallback,
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub struct ProjectsViewModel {
    state: AppState,
    projects: Vec<Project>,
    gallery: Element,
    tags: Element,
    search: Option<HtmlInputElement>,
    active_tag: RefCell<String>,
    filter: RefCell<String>,
    /// Reiniciado en cada pulsación (drop = clearTimeout)
    debounce: RefCell<Option<Timeout>>,
    /// Observer del último render de tarjetas
    reveal: RefCell<Option<RevealObserver>>,
}

impl ProjectsViewModel {
    pub fn mount(root: &Element, state: &AppState) -> Result<(), JsValue> {
        let gallery = root.query_selector("#projects-gallery")?;
        let tags = root.query_selector("#projects-tags")?;
        let (Some(gallery), Some(tags)) = (gallery, tags) else {
            log::warn!("⚠️ [PROJETOS] Galería o categorías no encontradas");
            return Ok(());
        };
        let search = root
            .query_selector("#projects-search")?
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok());

        let vm = Rc::new(Self {
            state: state.clone(),
            projects: catalog(),
            gallery,
            tags,
            search,
            active_tag: RefCell::new(String::new()),
            filter: RefCell::new(String::new()),
            debounce: RefCell::new(None),
            reveal: RefCell::new(None),
        });

        vm.render_tags();
        vm.render_projects();
        vm.wire_events()?;
        Ok(())
    }

    fn render_tags(&self) {
        let tags = all_tags(&self.projects);
        self.tags
            .set_inner_html(&tag_buttons_markup(&tags, &self.active_tag.borrow()));
    }

    fn render_projects(&self) {
        let favorites = self.state.favorites.list().unwrap_or_else(|e| {
            log::warn!("⚠️ [PROJETOS] Favoritos ilegibles: {}", e);
            Vec::new()
        });
        let filter = self.filter.borrow();
        let active_tag = self.active_tag.borrow();
        let visible = filter_projects(&self.projects, &filter, &active_tag);

        let markup: String = visible
            .iter()
            .enumerate()
            .map(|(i, project)| card_markup(project, i, favorites.contains(&project.title)))
            .collect();
        self.gallery.set_inner_html(&markup);

        if !filter.trim().is_empty() || !active_tag.is_empty() {
            let count = visible.len().to_string();
            self.state
                .announcer
                .announce(&t_with("projetos_encontrados", &[&count]));
        }

        if let Err(e) = self.observe_reveal() {
            log::debug!("🔍 [PROJETOS] IntersectionObserver no disponible: {:?}", e);
            self.reveal_all();
        }
    }

    /// Mostrar tarjetas al entrar en el viewport
    fn observe_reveal(&self) -> Result<(), JsValue> {
        // Las tarjetas anteriores ya no existen
        self.reveal.borrow_mut().take();

        let cards = query_selector_all_in(&self.gallery, ".reveal")?;
        if cards.is_empty() {
            return Ok(());
        }

        let callback: RevealCallback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        let target = entry.target();
                        let _ = add_class(&target, "show");
                        observer.unobserve(&target);
                    }
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;

        for card in cards {
            observer.observe(&card);
        }
        *self.reveal.borrow_mut() = Some(RevealObserver {
            observer,
            _callback: callback,
        });
        Ok(())
    }

    fn reveal_all(&self) {
        for card in query_selector_all_in(&self.gallery, ".reveal").unwrap_or_default() {
            let _ = add_class(&card, "show");
        }
    }

    fn wire_events(self: &Rc<Self>) -> Result<(), JsValue> {
        let listeners = &self.state.page_listeners;
        let vm = self.clone();
        listeners.on_click(&self.gallery, move |event: MouseEvent| vm.handle_gallery_click(&event))?;

        let vm = self.clone();
        listeners.on_keydown(&self.gallery, move |event: KeyboardEvent| {
            if !is_activation_key(&event) {
                return;
            }
            // Solo la tarjeta en sí; los botones internos conservan su activación
            let Some(card) = active_element().filter(|el| el.class_list().contains("project-card")) else {
                return;
            };
            event.prevent_default();
            vm.open_details(&card);
        })?;

        if let Some(search) = &self.search {
            let vm = self.clone();
            let input = search.clone();
            listeners.on_event(search, "input", move |_: Event| {
                let value = input.value();
                let debounced = vm.clone();
                let timeout = Timeout::new(CONFIG.timing.search_debounce_ms, move || {
                    *debounced.filter.borrow_mut() = value;
                    debounced.render_projects();
                });
                // Reemplazar cancela el temporizador anterior
                *vm.debounce.borrow_mut() = Some(timeout);
            })?;
        }

        let vm = self.clone();
        listeners.on_click(&self.tags, move |event: MouseEvent| {
            let Some(button) = event_target_element(&event)
                .and_then(|target| target.closest(".tag-btn").ok().flatten())
            else {
                return;
            };
            let tag = button.get_attribute("data-tag").unwrap_or_default();
            vm.toggle_tag(&tag);
        })?;

        Ok(())
    }

    fn toggle_tag(&self, tag: &str) {
        {
            let mut active = self.active_tag.borrow_mut();
            *active = if *active == tag { String::new() } else { tag.to_string() };
        }
        let active = self.active_tag.borrow().clone();
        for button in query_selector_all_in(&self.tags, ".tag-btn").unwrap_or_default() {
            let pressed = button.get_attribute("data-tag").as_deref() == Some(active.as_str());
            let _ = if pressed {
                add_class(&button, "active")
            } else {
                remove_class(&button, "active")
            };
            let _ = set_attribute(&button, "aria-pressed", if pressed { "true" } else { "false" });
        }
        if let Some(search) = &self.search {
            *self.filter.borrow_mut() = search.value();
        }
        self.render_projects();
    }

    fn handle_gallery_click(&self, event: &MouseEvent) {
        let Some(button) = event_target_element(event)
            .and_then(|target| target.closest("button").ok().flatten())
        else {
            return;
        };
        let card = button.closest(".project-card").ok().flatten();
        let project = button
            .get_attribute("data-project")
            .or_else(|| card.as_ref().and_then(|c| c.get_attribute("data-title")));
        let Some(project) = project else {
            return;
        };

        match button.get_attribute("data-action").as_deref() {
            Some("favorite") => self.toggle_favorite(&button, &project),
            Some("details") => {
                if let Some(card) = card {
                    self.open_details(&card);
                }
            }
            Some("support") => {
                if let Err(e) = open_support_modal(&self.state, &project) {
                    log::error!("❌ [PROJETOS] Error abriendo modal de apoio: {:?}", e);
                    self.state.announcer.announce_assertive(&t("erro_inesperado"));
                }
            }
            _ => {}
        }
    }

    fn open_details(&self, card: &Element) {
        let title = card.get_attribute("data-title").unwrap_or_default();
        let desc = card.get_attribute("data-desc").unwrap_or_default();
        let img = card.get_attribute("data-img").unwrap_or_default();
        if title.is_empty() {
            return;
        }
        if let Err(e) = open_detail_modal(&self.state, &title, &desc, &img) {
            log::error!("❌ [PROJETOS] Error abriendo detalle: {:?}", e);
            self.state.announcer.announce_assertive(&t("erro_inesperado"));
        }
    }

    fn toggle_favorite(&self, button: &Element, project: &str) {
        let is_favorite = match self.state.favorites.toggle(project) {
            Ok(state) => state,
            Err(e) => {
                log::error!("❌ [FAVORITOS] Error guardando favoritos: {}", e);
                self.state.announcer.announce_assertive(&t("erro_inesperado"));
                return;
            }
        };

        let (label, heart, message, pop_ms) = if is_favorite {
            (t("remover_favorito"), "❤", t("favorito_adicionado"), POP_ADD_MS)
        } else {
            (t("favoritar"), "♡", t("favorito_removido"), POP_REMOVE_MS)
        };
        let _ = set_attribute(button, "aria-label", &label);
        let _ = set_attribute(button, "aria-pressed", if is_favorite { "true" } else { "false" });
        if let Ok(Some(icon)) = button.query_selector(".heart-icon") {
            set_text_content(&icon, heart);
        }

        let _ = add_class(button, "popped");
        let popped = button.clone();
        Timeout::new(pop_ms, move || {
            let _ = remove_class(&popped, "popped");
        })
        .forget();

        self.state.announcer.announce(&message);
    }
}
