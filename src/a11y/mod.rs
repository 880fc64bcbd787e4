// ============================================================================
// A11Y MODULE - Anuncios, foco, trampas de foco y tema
// ============================================================================

pub mod announcer;
pub mod focus;
pub mod focus_trap;
pub mod theme;

pub use announcer::{Announcer, Politeness};
pub use focus::{focus_temporarily, init_skip_link, place_focus_after_render};
pub use focus_trap::{FocusTrap, TrapVariant};
pub use theme::ThemeController;
