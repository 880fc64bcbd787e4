// ============================================================================
// TRAP STATE - Máquina OPEN/CLOSED de las trampas de foco
// ============================================================================
// Genérica sobre el tipo de elemento para poder probarla sin DOM.
// ============================================================================

/// Teclas relevantes para una trampa abierta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapKey {
    Escape,
    Tab,
    ShiftTab,
    Next,
    Prev,
    Home,
    End,
    Other,
}

impl TrapKey {
    pub fn from_key(key: &str, shift: bool) -> TrapKey {
        match key {
            "Escape" | "Esc" => TrapKey::Escape,
            "Tab" if shift => TrapKey::ShiftTab,
            "Tab" => TrapKey::Tab,
            "ArrowDown" | "ArrowRight" => TrapKey::Next,
            "ArrowUp" | "ArrowLeft" => TrapKey::Prev,
            "Home" => TrapKey::Home,
            "End" => TrapKey::End,
            _ => TrapKey::Other,
        }
    }
}

/// Qué debe hacer el controlador con la tecla
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapAction {
    Close,
    /// preventDefault + foco al índice
    FocusIndex(usize),
    /// preventDefault sin mover el foco (trampa sin elementos enfocables)
    Hold,
    PassThrough,
}

#[derive(Debug)]
enum TrapState<T> {
    Closed,
    Open {
        focusables: Vec<T>,
        previously_focused: Option<T>,
    },
}

#[derive(Debug)]
pub struct TrapMachine<T> {
    state: TrapState<T>,
    arrow_navigation: bool,
}

impl<T: Clone + PartialEq> TrapMachine<T> {
    /// Trampa de modal: solo Tab/Shift+Tab/Escape
    pub fn modal() -> Self {
        Self {
            state: TrapState::Closed,
            arrow_navigation: false,
        }
    }

    /// Trampa de menú: además flechas, Home y End
    pub fn menu() -> Self {
        Self {
            state: TrapState::Closed,
            arrow_navigation: true,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, TrapState::Open { .. })
    }

    pub fn focusables(&self) -> &[T] {
        match &self.state {
            TrapState::Open { focusables, .. } => focusables,
            TrapState::Closed => &[],
        }
    }

    /// CLOSED → OPEN. Devuelve el primer enfocable (None = enfocar el contenedor).
    pub fn open(&mut self, focusables: Vec<T>, previously_focused: Option<T>) -> Option<T> {
        if self.is_open() {
            log::debug!("🔍 [TRAP] Reabriendo una trampa ya abierta");
        }
        let initial = focusables.first().cloned();
        self.state = TrapState::Open {
            focusables,
            previously_focused,
        };
        initial
    }

    /// OPEN → CLOSED. Devuelve el elemento a restaurar.
    pub fn close(&mut self) -> Option<T> {
        match std::mem::replace(&mut self.state, TrapState::Closed) {
            TrapState::Open {
                previously_focused, ..
            } => previously_focused,
            TrapState::Closed => None,
        }
    }

    /// Cerrar; el foco previo solo se devuelve si aún puede recibir foco
    pub fn close_restoring<F>(&mut self, can_focus: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.close().filter(|previous| can_focus(previous))
    }

    pub fn handle_key(&self, key: TrapKey, active: Option<&T>) -> TrapAction {
        let focusables = match &self.state {
            TrapState::Open { focusables, .. } => focusables,
            TrapState::Closed => return TrapAction::PassThrough,
        };
        let len = focusables.len();
        let position = active.and_then(|a| focusables.iter().position(|f| f == a));

        match key {
            TrapKey::Escape => TrapAction::Close,
            TrapKey::Tab | TrapKey::ShiftTab if len == 0 => TrapAction::Hold,
            TrapKey::Tab => TrapAction::FocusIndex(match position {
                Some(i) => (i + 1) % len,
                None => 0,
            }),
            TrapKey::ShiftTab => TrapAction::FocusIndex(match position {
                Some(0) | None => len - 1,
                Some(i) => i - 1,
            }),
            _ if !self.arrow_navigation || len == 0 => TrapAction::PassThrough,
            TrapKey::Next => TrapAction::FocusIndex(match position {
                Some(i) => (i + 1) % len,
                None => 0,
            }),
            TrapKey::Prev => TrapAction::FocusIndex(match position {
                Some(0) | None => len - 1,
                Some(i) => i - 1,
            }),
            TrapKey::Home => TrapAction::FocusIndex(0),
            TrapKey::End => TrapAction::FocusIndex(len - 1),
            TrapKey::Other => TrapAction::PassThrough,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Simula el foco moviéndose según las acciones devueltas
    fn press(trap: &TrapMachine<&'static str>, key: TrapKey, focus: &mut &'static str) -> TrapAction {
        let action = trap.handle_key(key, Some(focus));
        if let TrapAction::FocusIndex(i) = action {
            *focus = trap.focusables()[i];
        }
        action
    }

    #[test]
    fn test_tab_n_times_returns_to_first() {
        let items = vec!["close", "title-link", "support", "cancel"];
        let mut trap = TrapMachine::modal();
        let mut focus = trap.open(items.clone(), Some("card")).unwrap();
        assert_eq!(focus, "close");

        for _ in 0..items.len() {
            press(&trap, TrapKey::Tab, &mut focus);
        }
        assert_eq!(focus, "close");
    }

    #[test]
    fn test_shift_tab_from_first_goes_to_last() {
        let mut trap = TrapMachine::modal();
        let mut focus = trap.open(vec!["a", "b", "c"], None).unwrap();
        press(&trap, TrapKey::ShiftTab, &mut focus);
        assert_eq!(focus, "c");
        press(&trap, TrapKey::Tab, &mut focus);
        assert_eq!(focus, "a");
    }

    #[test]
    fn test_close_restores_previous_focus() {
        let mut trap = TrapMachine::modal();
        trap.open(vec!["a"], Some("opener"));
        assert_eq!(trap.handle_key(TrapKey::Escape, Some(&"a")), TrapAction::Close);
        assert_eq!(trap.close(), Some("opener"));
        assert!(!trap.is_open());
        assert_eq!(trap.close(), None);
        assert_eq!(trap.handle_key(TrapKey::Tab, None), TrapAction::PassThrough);
    }

    #[test]
    fn test_focus_not_restored_to_unfocusable_opener() {
        // (nombre, sigue enfocable)
        let mut trap = TrapMachine::modal();
        trap.open(vec![("close", true)], Some(("card", false)));
        assert_eq!(trap.close_restoring(|(_, focusable)| *focusable), None);
        assert!(!trap.is_open());

        trap.open(vec![("close", true)], Some(("card", true)));
        assert_eq!(trap.close_restoring(|(_, focusable)| *focusable), Some(("card", true)));
    }

    #[test]
    fn test_empty_trap_holds_focus_on_container() {
        let mut trap: TrapMachine<&str> = TrapMachine::modal();
        assert_eq!(trap.open(Vec::new(), None), None);
        assert_eq!(trap.handle_key(TrapKey::Tab, None), TrapAction::Hold);
        assert_eq!(trap.handle_key(TrapKey::Escape, None), TrapAction::Close);
    }

    #[test]
    fn test_menu_arrows_wrap_and_jump() {
        let mut trap = TrapMachine::menu();
        let mut focus = trap.open(vec!["inicio", "projetos", "cadastro", "sobre"], None).unwrap();
        press(&trap, TrapKey::Prev, &mut focus);
        assert_eq!(focus, "sobre");
        press(&trap, TrapKey::Next, &mut focus);
        assert_eq!(focus, "inicio");
        press(&trap, TrapKey::End, &mut focus);
        assert_eq!(focus, "sobre");
        press(&trap, TrapKey::Home, &mut focus);
        assert_eq!(focus, "inicio");
    }

    #[test]
    fn test_modal_ignores_arrows() {
        let mut trap = TrapMachine::modal();
        trap.open(vec!["a", "b"], None);
        assert_eq!(trap.handle_key(TrapKey::Next, Some(&"a")), TrapAction::PassThrough);
        assert_eq!(TrapKey::from_key("ArrowLeft", false), TrapKey::Prev);
        assert_eq!(TrapKey::from_key("Tab", true), TrapKey::ShiftTab);
    }
}
