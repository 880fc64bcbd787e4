// ============================================================================
// FOCUS TRAP - Controlador OPEN/CLOSED para modales y menú móvil
// ============================================================================
// Al abrir: calcula los enfocables visibles, guarda el foco previo, oculta
// los landmarks de fondo (aria-hidden) y engancha keydown en document.
// Al cerrar: deshace todo lo anterior y restaura el foco si el elemento
// previo sigue en el documento.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, KeyboardEvent};

use crate::a11y::Announcer;
use crate::config::CONFIG;
use crate::dom::{
    active_element, contains, document, drop_later, event_target_element, focus_element, is_connected,
    is_disabled, is_visible, query_selector_all, query_selector_all_in, remove_attribute,
    set_attribute, EventListener,
};
use crate::state::trap_state::{TrapAction, TrapKey, TrapMachine};
use crate::utils::constants::{FOCUSABLE_SELECTOR, LANDMARK_SELECTOR};
use crate::utils::i18n::t;

/// Selector de los controles que cierran un modal
const MODAL_CLOSE_SELECTOR: &str = ".close, [data-close-modal]";

pub enum TrapVariant {
    /// Modal: se cierra con Escape, botón de cierre o click en el overlay;
    /// al cerrar se elimina el overlay del DOM
    Modal { overlay: Element },
    /// Menú: flechas/Home/End, se cierra con Escape o click fuera
    Menu { trigger: Element },
}

struct TrapInner {
    container: Element,
    variant: TrapVariant,
    machine: RefCell<TrapMachine<Element>>,
    announcer: Announcer,
    /// (landmark, aria-hidden previo)
    hidden_landmarks: RefCell<Vec<(Element, Option<String>)>>,
    listeners: RefCell<Vec<EventListener>>,
    /// Listeners del contenido atrapado (botones del modal), soltados al cerrar
    owned: RefCell<Vec<EventListener>>,
    on_close: RefCell<Option<Box<dyn FnMut()>>>,
}

#[derive(Clone)]
pub struct FocusTrap {
    inner: Rc<TrapInner>,
}

impl FocusTrap {
    pub fn modal(overlay: &Element, container: &Element, announcer: &Announcer) -> Self {
        Self::with_variant(
            container,
            TrapVariant::Modal {
                overlay: overlay.clone(),
            },
            TrapMachine::modal(),
            announcer,
        )
    }

    pub fn menu(container: &Element, trigger: &Element, announcer: &Announcer) -> Self {
        Self::with_variant(
            container,
            TrapVariant::Menu {
                trigger: trigger.clone(),
            },
            TrapMachine::menu(),
            announcer,
        )
    }

    fn with_variant(
        container: &Element,
        variant: TrapVariant,
        machine: TrapMachine<Element>,
        announcer: &Announcer,
    ) -> Self {
        Self {
            inner: Rc::new(TrapInner {
                container: container.clone(),
                variant,
                machine: RefCell::new(machine),
                announcer: announcer.clone(),
                hidden_landmarks: RefCell::new(Vec::new()),
                listeners: RefCell::new(Vec::new()),
                owned: RefCell::new(Vec::new()),
                on_close: RefCell::new(None),
            }),
        }
    }

    /// Callback ejecutado en cada cierre (después de restaurar el foco)
    pub fn set_on_close<F>(&self, callback: F)
    where
        F: FnMut() + 'static,
    {
        *self.inner.on_close.borrow_mut() = Some(Box::new(callback));
    }

    /// Mantener un listener vivo hasta el próximo cierre
    pub fn keep_until_close(&self, listener: EventListener) {
        self.inner.owned.borrow_mut().push(listener);
    }

    pub fn is_open(&self) -> bool {
        self.inner.machine.borrow().is_open()
    }

    pub fn container(&self) -> &Element {
        &self.inner.container
    }

    /// CLOSED → OPEN
    pub fn open(&self) -> Result<(), JsValue> {
        if self.is_open() {
            return Ok(());
        }
        let focusables = focusable_descendants(&self.inner.container)?;
        let previously_focused = active_element();
        log::debug!("🔒 [TRAP] Abriendo trampa con {} enfocables", focusables.len());

        let initial = self
            .inner
            .machine
            .borrow_mut()
            .open(focusables, previously_focused);

        self.hide_background()?;
        self.attach_listeners()?;

        let target = match initial {
            Some(element) => element,
            None => {
                // Sin enfocables: el propio contenedor recibe el foco
                if self.inner.container.get_attribute("tabindex").is_none() {
                    set_attribute(&self.inner.container, "tabindex", "-1")?;
                }
                self.inner.container.clone()
            }
        };
        Timeout::new(CONFIG.timing.focus_delay_ms, move || {
            focus_element(&target);
        })
        .forget();
        Ok(())
    }

    /// OPEN → CLOSED. Seguro de llamar desde los propios listeners.
    pub fn close(&self) {
        if !self.is_open() {
            return;
        }
        let previously_focused = self
            .inner
            .machine
            .borrow_mut()
            .close_restoring(|previous| is_connected(previous) && is_visible(previous) && !is_disabled(previous));

        self.restore_background();
        let mut listeners = std::mem::take(&mut *self.inner.listeners.borrow_mut());
        listeners.append(&mut self.inner.owned.borrow_mut());
        drop_later(listeners);

        let close_message = match &self.inner.variant {
            TrapVariant::Modal { overlay } => {
                overlay.remove();
                t("modal_fechado")
            }
            TrapVariant::Menu { .. } => t("menu_fechado"),
        };

        if let Some(previous) = previously_focused {
            focus_element(&previous);
        }

        let callback = self.inner.on_close.borrow_mut().take();
        if let Some(mut callback) = callback {
            callback();
            let mut slot = self.inner.on_close.borrow_mut();
            if slot.is_none() {
                *slot = Some(callback);
            }
        }

        self.inner.announcer.announce(&close_message);
        log::debug!("🔓 [TRAP] Trampa cerrada");
    }

    fn hide_background(&self) -> Result<(), JsValue> {
        let mut hidden = self.inner.hidden_landmarks.borrow_mut();
        for landmark in query_selector_all(LANDMARK_SELECTOR)? {
            if contains(&landmark, &self.inner.container)
                || contains(&self.inner.container, &landmark)
            {
                continue;
            }
            let previous = landmark.get_attribute("aria-hidden");
            set_attribute(&landmark, "aria-hidden", "true")?;
            hidden.push((landmark, previous));
        }
        Ok(())
    }

    fn restore_background(&self) {
        for (landmark, previous) in self.inner.hidden_landmarks.borrow_mut().drain(..) {
            let _ = match previous {
                Some(value) => set_attribute(&landmark, "aria-hidden", &value),
                None => remove_attribute(&landmark, "aria-hidden"),
            };
        }
    }

    fn attach_listeners(&self) -> Result<(), JsValue> {
        let doc = document().ok_or_else(|| JsValue::from_str("No document"))?;
        let mut listeners = Vec::new();

        let trap = self.clone();
        listeners.push(EventListener::typed(&doc, "keydown", move |event: KeyboardEvent| {
            trap.handle_keydown(&event);
        })?);

        match &self.inner.variant {
            TrapVariant::Menu { .. } => {
                let trap = self.clone();
                listeners.push(EventListener::new(&doc, "click", move |event: Event| {
                    trap.handle_outside_click(&event);
                })?);
            }
            TrapVariant::Modal { overlay } => {
                let trap = self.clone();
                let overlay_el = overlay.clone();
                listeners.push(EventListener::new(overlay, "click", move |event: Event| {
                    let Some(target) = event_target_element(&event) else {
                        return;
                    };
                    let on_close_control = target.closest(MODAL_CLOSE_SELECTOR).ok().flatten().is_some();
                    if target == overlay_el || on_close_control {
                        event.prevent_default();
                        trap.close();
                    }
                })?);
            }
        }

        *self.inner.listeners.borrow_mut() = listeners;
        Ok(())
    }

    fn handle_keydown(&self, event: &KeyboardEvent) {
        let key = TrapKey::from_key(&event.key(), event.shift_key());
        let active = active_element();
        let action = self.inner.machine.borrow().handle_key(key, active.as_ref());

        match action {
            TrapAction::Close => {
                event.prevent_default();
                self.close();
            }
            TrapAction::FocusIndex(index) => {
                event.prevent_default();
                let target = self.inner.machine.borrow().focusables().get(index).cloned();
                if let Some(target) = target {
                    focus_element(&target);
                }
            }
            TrapAction::Hold => event.prevent_default(),
            TrapAction::PassThrough => {}
        }
    }

    fn handle_outside_click(&self, event: &Event) {
        if !self.is_open() {
            return;
        }
        let TrapVariant::Menu { trigger } = &self.inner.variant else {
            return;
        };
        let Some(target) = event_target_element(event) else {
            return;
        };
        let inside = contains(&self.inner.container, &target) || contains(trigger, &target);
        if !inside {
            self.close();
        }
    }
}

/// Descendientes enfocables, visibles y habilitados, en orden del documento
pub fn focusable_descendants(container: &Element) -> Result<Vec<Element>, JsValue> {
    Ok(query_selector_all_in(container, FOCUSABLE_SELECTOR)?
        .into_iter()
        .filter(|element| is_visible(element) && !is_disabled(element))
        .collect())
}
