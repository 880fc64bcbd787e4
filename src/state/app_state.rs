// ============================================================================
// APP STATE - Estado de sesión compartido por router, menú y páginas
// ============================================================================
// Un único objeto explícito (sin estado global de módulo) que se clona
// barato y se pasa a cada handler. Todos los campos mutables van en
// Rc<RefCell<_>>.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::a11y::{Announcer, FocusTrap};
use crate::dom::ListenerScope;
use crate::services::{
    FavoritesService, NewsletterService, PreferencesService, RegistrationService, SupportService,
};
use crate::state::router_state::RouterMachine;
use crate::utils::storage::KeyValueStore;
use crate::utils::validator::Validator;

type NavigationCallback = Rc<dyn Fn(&str)>;

#[derive(Clone)]
pub struct AppState {
    pub announcer: Announcer,
    pub validator: Validator,

    // Persistencia
    pub registrations: Rc<RegistrationService>,
    pub favorites: Rc<FavoritesService>,
    pub supports: Rc<SupportService>,
    pub newsletter: Rc<NewsletterService>,
    pub preferences: Rc<PreferencesService>,

    // Navegación
    pub router: Rc<RefCell<RouterMachine>>,

    // Trampas abiertas (como mucho un modal y un menú)
    pub modal: Rc<RefCell<Option<FocusTrap>>>,
    pub menu: Rc<RefCell<Option<FocusTrap>>>,

    // Listeners de la página renderizada; se sueltan en el siguiente render
    pub page_listeners: ListenerScope,

    // Notificación de navegación completada (página nueva)
    pub navigation_subscribers: Rc<RefCell<Vec<NavigationCallback>>>,
}

impl AppState {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self {
            announcer: Announcer::new(),
            validator: Validator::from_config(),
            registrations: Rc::new(RegistrationService::new(store.clone())),
            favorites: Rc::new(FavoritesService::new(store.clone())),
            supports: Rc::new(SupportService::new(store.clone())),
            newsletter: Rc::new(NewsletterService::new(store.clone())),
            preferences: Rc::new(PreferencesService::new(store)),
            router: Rc::new(RefCell::new(RouterMachine::new())),
            modal: Rc::new(RefCell::new(None)),
            menu: Rc::new(RefCell::new(None)),
            page_listeners: ListenerScope::new(),
            navigation_subscribers: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Suscribirse a navegaciones completadas
    pub fn subscribe_to_navigation<F>(&self, callback: F)
    where
        F: Fn(&str) + 'static,
    {
        self.navigation_subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a los subscribers (clonados para permitir re-suscripción)
    pub fn notify_navigation(&self, page: &str) {
        let subscribers: Vec<NavigationCallback> = self.navigation_subscribers.borrow().clone();
        for callback in subscribers {
            callback(page);
        }
    }

    /// Abrir un modal cerrando antes el que hubiera
    pub fn open_modal(&self, trap: FocusTrap) -> Result<(), wasm_bindgen::JsValue> {
        self.close_modal();
        trap.open()?;
        *self.modal.borrow_mut() = Some(trap);
        Ok(())
    }

    pub fn close_modal(&self) {
        let trap = self.modal.borrow_mut().take();
        if let Some(trap) = trap {
            trap.close();
        }
    }

    /// Cerrar el menú móvil si está abierto
    pub fn close_menu(&self) {
        let trap = self.menu.borrow().clone();
        if let Some(trap) = trap {
            if trap.is_open() {
                trap.close();
            }
        }
    }
}
