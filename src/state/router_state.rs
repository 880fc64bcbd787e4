// ============================================================================
// ROUTER STATE - Máquina de estados de navegación
// ============================================================================
// IDLE → RENDERING → IDLE            (render correcto)
// IDLE → RENDERING → ERROR → IDLE    (render fallido, recuperación a inicio)
// Las transiciones no tocan el DOM; quien renderiza es el router viewmodel.
// ============================================================================

use crate::models::route::{page_key_from_fragment, Route};
use crate::views::registry::RenderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterPhase {
    Idle,
    Rendering,
    Error,
}

/// Render a realizar tras `begin` o `render_failed`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRender {
    pub page: String,
    pub page_changed: bool,
}

/// Resultado final de una navegación
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationOutcome {
    pub page: String,
    pub page_changed: bool,
    /// Se llegó aquí por la ruta de recuperación
    pub recovered: bool,
    /// Fragmento a escribir en la barra de direcciones, si cambia
    pub reset_fragment: Option<String>,
    /// Ni siquiera la página de inicio pudo renderizarse
    pub fallback_failed: bool,
}

#[derive(Debug)]
pub struct RouterMachine {
    phase: RouterPhase,
    current: Option<String>,
    previous: Option<String>,
    /// Fragmento escrito por la recuperación; su hashchange no re-renderiza
    pending_reset: Option<String>,
}

impl Default for RouterMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl RouterMachine {
    pub fn new() -> Self {
        Self {
            phase: RouterPhase::Idle,
            current: None,
            previous: None,
            pending_reset: None,
        }
    }

    pub fn phase(&self) -> RouterPhase {
        self.phase
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// IDLE → RENDERING. None si ya hay un render en curso (reentrada).
    pub fn begin(&mut self, fragment: &str) -> Option<PendingRender> {
        if self.phase != RouterPhase::Idle {
            log::warn!("⚠️ [ROUTER] Navegación a '{}' ignorada: render en curso", fragment);
            return None;
        }
        let page = page_key_from_fragment(fragment);
        self.phase = RouterPhase::Rendering;
        Some(PendingRender {
            page_changed: self.current.as_deref() != Some(page.as_str()),
            page,
        })
    }

    /// RENDERING → IDLE
    pub fn render_succeeded(&mut self, page: &str) -> NavigationOutcome {
        let page_changed = self.commit(page);
        self.phase = RouterPhase::Idle;
        NavigationOutcome {
            page: page.to_string(),
            page_changed,
            recovered: false,
            reset_fragment: None,
            fallback_failed: false,
        }
    }

    /// RENDERING → ERROR: devuelve el render de recuperación (inicio)
    pub fn render_failed(&mut self, page: &str, error: &RenderError) -> PendingRender {
        log::error!("❌ [ROUTER] Error al renderizar '{}': {}", page, error);
        self.phase = RouterPhase::Error;
        let home = Route::HOME.key().to_string();
        PendingRender {
            page_changed: self.current.as_deref() != Some(home.as_str()),
            page: home,
        }
    }

    /// ERROR → IDLE. `fragment_was` es el fragmento que había en la barra.
    pub fn recovery_finished(&mut self, succeeded: bool, fragment_was: &str) -> NavigationOutcome {
        let home = Route::HOME.key();
        let page_changed = if succeeded { self.commit(home) } else { false };
        if !succeeded {
            log::error!("❌ [ROUTER] La página de inicio tampoco pudo renderizarse");
        }

        let target = Route::HOME.fragment();
        let reset_fragment = if fragment_was == target {
            None
        } else {
            self.pending_reset = Some(target.clone());
            Some(target)
        };

        self.phase = RouterPhase::Idle;
        NavigationOutcome {
            page: home.to_string(),
            page_changed,
            recovered: true,
            reset_fragment,
            fallback_failed: !succeeded,
        }
    }

    /// true si este hashchange lo provocó la recuperación (se consume)
    pub fn consume_reset(&mut self, fragment: &str) -> bool {
        match self.pending_reset.take() {
            Some(expected) if expected == fragment => true,
            Some(other) => {
                log::debug!("🔍 [ROUTER] Reset pendiente '{}' descartado por '{}'", other, fragment);
                false
            }
            None => false,
        }
    }

    /// Navegación completa con un render síncrono
    pub fn navigate<F>(&mut self, fragment: &str, mut render: F) -> Option<NavigationOutcome>
    where
        F: FnMut(&str, bool) -> Result<(), RenderError>,
    {
        let pending = self.begin(fragment)?;
        match render(&pending.page, pending.page_changed) {
            Ok(()) => Some(self.render_succeeded(&pending.page)),
            Err(error) => {
                let fallback = self.render_failed(&pending.page, &error);
                let ok = render(&fallback.page, fallback.page_changed).is_ok();
                Some(self.recovery_finished(ok, fragment))
            }
        }
    }

    fn commit(&mut self, page: &str) -> bool {
        let changed = self.current.as_deref() != Some(page);
        if changed {
            self.previous = self.current.replace(page.to_string());
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn known(page: &str) -> Result<(), RenderError> {
        match Route::from_key(page) {
            Some(_) => Ok(()),
            None => Err(RenderError::NotFound(page.to_string())),
        }
    }

    #[test]
    fn test_supported_fragments_render_their_page() {
        let mut router = RouterMachine::new();
        for route in Route::ALL {
            let outcome = router.navigate(&route.fragment(), |p, _| known(p)).unwrap();
            assert_eq!(outcome.page, route.key());
            assert!(!outcome.recovered);
            assert_eq!(router.phase(), RouterPhase::Idle);
        }
        let outcome = router.navigate("", |p, _| known(p)).unwrap();
        assert_eq!(outcome.page, "inicio");
    }

    #[test]
    fn test_unknown_fragment_recovers_to_home() {
        let mut router = RouterMachine::new();
        router.navigate("#sobre", |p, _| known(p)).unwrap();

        let mut rendered = Vec::new();
        let outcome = router
            .navigate("#nonexistent", |p, _| {
                rendered.push(p.to_string());
                known(p)
            })
            .unwrap();

        assert_eq!(rendered, vec!["nonexistent", "inicio"]);
        assert_eq!(outcome.page, "inicio");
        assert!(outcome.recovered);
        assert!(!outcome.fallback_failed);
        assert_eq!(outcome.reset_fragment.as_deref(), Some("#inicio"));
        assert_eq!(router.current(), Some("inicio"));
        assert_eq!(router.previous(), Some("sobre"));
        assert_eq!(router.phase(), RouterPhase::Idle);

        // El hashchange provocado por el reset se consume una sola vez
        assert!(router.consume_reset("#inicio"));
        assert!(!router.consume_reset("#inicio"));
    }

    #[test]
    fn test_failed_home_render_never_propagates() {
        let mut router = RouterMachine::new();
        let outcome = router
            .navigate("#inicio", |_, _| Err(RenderError::MountRootMissing))
            .unwrap();
        assert!(outcome.recovered);
        assert!(outcome.fallback_failed);
        assert_eq!(outcome.reset_fragment, None);
        assert_eq!(router.phase(), RouterPhase::Idle);
    }

    #[test]
    fn test_page_changed_flag() {
        let mut router = RouterMachine::new();
        let mut flags = Vec::new();
        for fragment in ["#inicio", "#inicio", "#cadastro"] {
            router
                .navigate(fragment, |p, changed| {
                    flags.push(changed);
                    known(p)
                })
                .unwrap();
        }
        assert_eq!(flags, vec![true, false, true]);
    }

    #[test]
    fn test_reentrant_navigation_is_rejected() {
        let mut router = RouterMachine::new();
        assert!(router.begin("#projetos").is_some());
        assert_eq!(router.phase(), RouterPhase::Rendering);
        assert!(router.begin("#sobre").is_none());
        router.render_succeeded("projetos");
        assert!(router.begin("#sobre").is_some());
    }
}
