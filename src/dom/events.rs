// ============================================================================
// EVENT HANDLING - Sistema de eventos
// ============================================================================
// GESTIÓN DE MEMORY LEAKS:
// - Listeners globales que viven toda la página (router, menú, tema):
//   `on_*` + closure.forget(). Se registran una sola vez en el arranque.
// - Listeners de una página renderizada: `ListenerScope`. El siguiente
//   render vacía el scope y suelta los closures (y los Rc que capturan);
//   forget() aquí filtraría memoria en cada navegación.
// - Listeners temporales (trampas de foco abiertas): `EventListener`, que
//   se desregistra al hacer drop. Nunca soltar un EventListener dentro de
//   su propio callback: usar `drop_later`.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, KeyboardEvent, MouseEvent};

/// Listener registrado mientras viva el valor
pub struct EventListener {
    target: EventTarget,
    event_type: String,
    closure: Option<Closure<dyn FnMut(Event)>>,
}

impl EventListener {
    /// Crear event listener genérico
    pub fn new<F>(target: &EventTarget, event_type: &str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event_type: event_type.to_string(),
            closure: Some(closure),
        })
    }

    /// Listener con el evento ya convertido a su tipo concreto
    pub fn typed<E, F>(target: &EventTarget, event_type: &str, mut handler: F) -> Result<Self, JsValue>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        Self::new(target, event_type, move |event: Event| {
            if let Ok(event) = event.dyn_into::<E>() {
                handler(event);
            }
        })
    }

    /// Mantener el listener durante toda la vida de la página
    pub fn forget(mut self) {
        if let Some(closure) = self.closure.take() {
            closure.forget();
        }
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Some(closure) = self.closure.take() {
            let _ = self
                .target
                .remove_event_listener_with_callback(&self.event_type, closure.as_ref().unchecked_ref());
        }
    }
}

/// Soltar listeners en el siguiente tick (seguro desde su propio callback)
pub fn drop_later(listeners: Vec<EventListener>) {
    if listeners.is_empty() {
        return;
    }
    gloo_timers::callback::Timeout::new(0, move || drop(listeners)).forget();
}

/// Listeners ligados a la vida de un render: `clear` los suelta todos
#[derive(Clone, Default)]
pub struct ListenerScope {
    listeners: Rc<RefCell<Vec<EventListener>>>,
}

impl ListenerScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keep(&self, listener: EventListener) {
        self.listeners.borrow_mut().push(listener);
    }

    pub fn on_event<F>(&self, target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        self.keep(EventListener::new(target, event_type, handler)?);
        Ok(())
    }

    pub fn on_click<F>(&self, target: &EventTarget, handler: F) -> Result<(), JsValue>
    where
        F: FnMut(MouseEvent) + 'static,
    {
        self.keep(EventListener::typed(target, "click", handler)?);
        Ok(())
    }

    pub fn on_keydown<F>(&self, target: &EventTarget, handler: F) -> Result<(), JsValue>
    where
        F: FnMut(KeyboardEvent) + 'static,
    {
        self.keep(EventListener::typed(target, "keydown", handler)?);
        Ok(())
    }

    /// Soltar todos los listeners (en el siguiente tick)
    pub fn clear(&self) {
        let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        if !listeners.is_empty() {
            log::debug!("🧹 [EVENTS] Liberando {} listeners de la página anterior", listeners.len());
        }
        drop_later(listeners);
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().is_empty()
    }
}

/// Helper para crear click handler simple
pub fn on_click<F>(target: &EventTarget, handler: F) -> Result<(), JsValue>
where
    F: FnMut(MouseEvent) + 'static,
{
    EventListener::typed(target, "click", handler)?.forget();
    Ok(())
}

/// Helper para crear keydown handler simple
pub fn on_keydown<F>(target: &EventTarget, handler: F) -> Result<(), JsValue>
where
    F: FnMut(KeyboardEvent) + 'static,
{
    EventListener::typed(target, "keydown", handler)?.forget();
    Ok(())
}

/// Listener genérico permanente (hashchange, resize, change...)
pub fn on_event<F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    EventListener::new(target, event_type, handler)?.forget();
    Ok(())
}

/// Enter o barra espaciadora (activación por teclado)
pub fn is_activation_key(event: &KeyboardEvent) -> bool {
    matches!(event.key().as_str(), "Enter" | " " | "Spacebar")
}

/// Destino del evento como Element
pub fn event_target_element(event: &Event) -> Option<web_sys::Element> {
    event.target()?.dyn_into::<web_sys::Element>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_copies_share_one_listener_list() {
        let scope = ListenerScope::new();
        let page = scope.clone();
        assert!(Rc::ptr_eq(&scope.listeners, &page.listeners));
        assert!(page.is_empty());

        // Vaciar un scope sin listeners no programa nada
        scope.clear();
        assert_eq!(page.len(), 0);
    }
}
