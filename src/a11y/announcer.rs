// ============================================================================
// ANNOUNCER - Región viva única para lectores de pantalla
// ============================================================================
// Todos los componentes anuncian a través de esta instancia compartida:
// una cola acotada y un solo temporizador activo a la vez.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use gloo_timers::callback::Timeout;

use crate::config::CONFIG;
use crate::dom::{body, get_element_by_id, set_attribute, set_text_content, ElementBuilder};
use crate::utils::constants::LIVE_REGION_ID;

pub const QUEUE_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Politeness {
    Polite,
    Assertive,
}

impl Politeness {
    fn aria_live(&self) -> &'static str {
        match self {
            Politeness::Polite => "polite",
            Politeness::Assertive => "assertive",
        }
    }

    fn role(&self) -> &'static str {
        match self {
            Politeness::Polite => "status",
            Politeness::Assertive => "alert",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub text: String,
    pub politeness: Politeness,
}

/// FIFO acotada: al llenarse se descarta el mensaje más antiguo.
/// Los mensajes assertive se adelantan a los polite pendientes.
#[derive(Debug)]
pub struct AnnouncementQueue {
    items: VecDeque<Announcement>,
    capacity: usize,
}

impl AnnouncementQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Encolar; devuelve el mensaje descartado si lo hubo
    pub fn push(&mut self, announcement: Announcement) -> Option<Announcement> {
        // Mismo mensaje repetido al final de la cola: no duplicar
        if self.items.back() == Some(&announcement) {
            return None;
        }
        let dropped = if self.items.len() >= self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        let position = match announcement.politeness {
            Politeness::Assertive => self
                .items
                .iter()
                .position(|queued| queued.politeness == Politeness::Polite)
                .unwrap_or(self.items.len()),
            Politeness::Polite => self.items.len(),
        };
        self.items.insert(position, announcement);
        dropped
    }

    pub fn pop(&mut self) -> Option<Announcement> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Retardo tras mostrar un mensaje: limpiar si no queda nada, avanzar si hay cola
    pub fn hold_after_show(&self, clear_ms: u32, step_ms: u32) -> (TimerPhase, u32) {
        if self.is_empty() {
            (TimerPhase::Clearing, clear_ms)
        } else {
            (TimerPhase::Stepping, step_ms)
        }
    }
}

/// Para qué está armado el único temporizador
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    /// Último mensaje visible; se borrará al vencer
    Clearing,
    /// Hay cola; al vencer se muestra el siguiente
    Stepping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushDecision {
    /// Región libre: mostrar ya
    ShowNow,
    /// Se estaba esperando para borrar: acortar la espera a `step_ms`
    Rearm(u32),
    /// El temporizador ya va a pasar al siguiente
    Wait,
}

impl TimerPhase {
    pub fn on_push(self, step_ms: u32) -> PushDecision {
        match self {
            TimerPhase::Idle => PushDecision::ShowNow,
            TimerPhase::Clearing => PushDecision::Rearm(step_ms),
            TimerPhase::Stepping => PushDecision::Wait,
        }
    }
}

struct AnnouncerInner {
    queue: RefCell<AnnouncementQueue>,
    phase: Cell<TimerPhase>,
    /// Drop = clearTimeout
    timer: RefCell<Option<Timeout>>,
    clear_ms: u32,
    step_ms: u32,
}

/// Handle clonable; todas las copias comparten cola y temporizador
#[derive(Clone)]
pub struct Announcer {
    inner: Rc<AnnouncerInner>,
}

impl Default for Announcer {
    fn default() -> Self {
        Self::new()
    }
}

impl Announcer {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(AnnouncerInner {
                queue: RefCell::new(AnnouncementQueue::new(QUEUE_CAPACITY)),
                phase: Cell::new(TimerPhase::Idle),
                timer: RefCell::new(None),
                clear_ms: CONFIG.timing.announce_clear_ms,
                step_ms: CONFIG.timing.announce_step_ms,
            }),
        }
    }

    pub fn announce(&self, text: &str) {
        self.push(text, Politeness::Polite);
    }

    /// Errores y fallos: interrumpen la lectura en curso
    pub fn announce_assertive(&self, text: &str) {
        self.push(text, Politeness::Assertive);
    }

    fn push(&self, text: &str, politeness: Politeness) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        log::debug!("📢 [ANNOUNCER] {}", text);
        let dropped = self.inner.queue.borrow_mut().push(Announcement {
            text: text.to_string(),
            politeness,
        });
        if let Some(dropped) = dropped {
            log::debug!("📢 [ANNOUNCER] Cola llena, descartado: {}", dropped.text);
        }

        match self.inner.phase.get().on_push(self.inner.step_ms) {
            PushDecision::ShowNow => self.show_next(),
            PushDecision::Rearm(delay) => self.arm(TimerPhase::Stepping, delay),
            PushDecision::Wait => {}
        }
    }

    /// Reemplaza el temporizador armado (el anterior se cancela al soltarlo)
    fn arm(&self, phase: TimerPhase, delay: u32) {
        self.inner.phase.set(phase);
        let announcer = self.clone();
        let timeout = Timeout::new(delay, move || announcer.on_timer());
        *self.inner.timer.borrow_mut() = Some(timeout);
    }

    fn on_timer(&self) {
        // Ya disparado: no soltarlo dentro de su propio callback
        let fired = self.inner.timer.borrow_mut().take();
        if let Some(fired) = fired {
            fired.forget();
        }
        self.show_next();
    }

    /// Muestra el siguiente mensaje, o limpia la región si no queda ninguno
    fn show_next(&self) {
        let Some(region) = ensure_live_region() else {
            log::warn!("⚠️ [ANNOUNCER] No se pudo crear la región viva");
            self.inner.phase.set(TimerPhase::Idle);
            return;
        };

        let next = self.inner.queue.borrow_mut().pop();
        match next {
            Some(announcement) => {
                let _ = set_attribute(&region, "aria-live", announcement.politeness.aria_live());
                let _ = set_attribute(&region, "role", announcement.politeness.role());
                set_text_content(&region, &announcement.text);

                let (phase, delay) = self
                    .inner
                    .queue
                    .borrow()
                    .hold_after_show(self.inner.clear_ms, self.inner.step_ms);
                self.arm(phase, delay);
            }
            None => {
                set_text_content(&region, "");
                self.inner.phase.set(TimerPhase::Idle);
            }
        }
    }
}

/// `#a11y-live-region`, creada la primera vez que se necesita
fn ensure_live_region() -> Option<web_sys::Element> {
    if let Some(region) = get_element_by_id(LIVE_REGION_ID) {
        return Some(region);
    }
    let region = ElementBuilder::new("div")
        .ok()?
        .id(LIVE_REGION_ID)
        .class("sr-only")
        .attr("aria-live", "polite")
        .ok()?
        .attr("aria-atomic", "true")
        .ok()?
        .attr("role", "status")
        .ok()?
        .build();
    body()?.append_child(&region).ok()?;
    Some(region)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polite(text: &str) -> Announcement {
        Announcement {
            text: text.to_string(),
            politeness: Politeness::Polite,
        }
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = AnnouncementQueue::new(4);
        queue.push(polite("a"));
        queue.push(polite("b"));
        assert_eq!(queue.pop().map(|a| a.text), Some("a".to_string()));
        assert_eq!(queue.pop().map(|a| a.text), Some("b".to_string()));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_full_queue_drops_oldest() {
        let mut queue = AnnouncementQueue::new(2);
        assert!(queue.push(polite("a")).is_none());
        assert!(queue.push(polite("b")).is_none());
        assert_eq!(queue.push(polite("c")).map(|a| a.text), Some("a".to_string()));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().map(|a| a.text), Some("b".to_string()));
    }

    #[test]
    fn test_consecutive_duplicates_collapse() {
        let mut queue = AnnouncementQueue::new(4);
        queue.push(polite("Menu de navegação fechado"));
        queue.push(polite("Menu de navegação fechado"));
        assert_eq!(queue.len(), 1);
        queue.push(Announcement {
            text: "Menu de navegação fechado".to_string(),
            politeness: Politeness::Assertive,
        });
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_assertive_goes_ahead_of_pending_polite() {
        let mut queue = AnnouncementQueue::new(4);
        queue.push(polite("Navegado para página de projetos"));
        queue.push(polite("Adicionado aos favoritos"));
        queue.push(Announcement {
            text: "Erro inesperado ocorreu".to_string(),
            politeness: Politeness::Assertive,
        });
        assert_eq!(queue.pop().map(|a| a.text), Some("Erro inesperado ocorreu".to_string()));
        assert_eq!(queue.pop().map(|a| a.text), Some("Navegado para página de projetos".to_string()));
    }

    #[test]
    fn test_message_pushed_during_clear_wait_shortens_timer() {
        let (clear, step) = (3000, 500);
        let mut queue = AnnouncementQueue::new(4);

        // "A" llega con la región libre: se muestra y queda esperando para borrar
        assert_eq!(TimerPhase::Idle.on_push(step), PushDecision::ShowNow);
        queue.push(polite("A"));
        queue.pop();
        let (phase, delay) = queue.hold_after_show(clear, step);
        assert_eq!((phase, delay), (TimerPhase::Clearing, clear));

        // "B" llega a los 100 ms: el temporizador se re-arma a step, no espera 3 s
        queue.push(polite("B"));
        assert_eq!(phase.on_push(step), PushDecision::Rearm(step));

        // Con más cola pendiente el temporizador ya avanza solo
        queue.push(polite("C"));
        assert_eq!(TimerPhase::Stepping.on_push(step), PushDecision::Wait);

        queue.pop();
        assert_eq!(queue.hold_after_show(clear, step), (TimerPhase::Stepping, step));
        queue.pop();
        assert_eq!(queue.hold_after_show(clear, step), (TimerPhase::Clearing, clear));
    }
}
