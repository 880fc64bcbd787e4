// ============================================================================
// APP - Arranque de la SPA: estado, páginas, accesibilidad y router
// ============================================================================

use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::a11y::{init_skip_link, ThemeController};
use crate::dom::get_element_by_id;
use crate::state::AppState;
use crate::utils::constants::MOUNT_ROOT_ID;
use crate::utils::storage::{BrowserStorage, KeyValueStore, MemoryStore};
use crate::viewmodels::{MenuViewModel, RouterViewModel};
use crate::views::{register_pages, TemplateRegistry};

/// Aplicación principal
pub struct App {
    state: AppState,
    theme: ThemeController,
    router: Rc<RouterViewModel>,
    menu: Option<Rc<MenuViewModel>>,
}

impl App {
    /// Crear nueva aplicación
    pub fn new() -> Result<Self, JsValue> {
        if get_element_by_id(MOUNT_ROOT_ID).is_none() {
            return Err(JsValue::from_str(&format!("No #{} element found", MOUNT_ROOT_ID)));
        }

        let store: Rc<dyn KeyValueStore> = match BrowserStorage::open() {
            Some(storage) => Rc::new(storage),
            None => {
                log::warn!("⚠️ [APP] localStorage no disponible, usando almacén en memoria");
                Rc::new(MemoryStore::new())
            }
        };

        let state = AppState::new(store);

        let mut registry = TemplateRegistry::new();
        register_pages(&mut registry);
        log::info!("📚 [APP] {} páginas registradas", registry.len());

        let theme = ThemeController::new(state.preferences.clone(), &state.announcer);
        let router = RouterViewModel::new(&state, Rc::new(registry));

        Ok(Self {
            state,
            theme,
            router,
            menu: None,
        })
    }

    /// Conectar listeners globales y renderizar la ruta inicial
    pub fn start(&mut self) -> Result<(), JsValue> {
        self.theme.init()?;
        init_skip_link(&self.state.announcer)?;
        self.menu = MenuViewModel::init(&self.state)?;

        // El router va el último: su render inicial ya encuentra el menú
        self.router.init()?;

        log::info!("✅ [APP] Aplicación inicializada");
        Ok(())
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn has_menu(&self) -> bool {
        self.menu.is_some()
    }
}
