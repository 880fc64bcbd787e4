// ============================================================================
// STATE MODULE - Estado de sesión con Rc<RefCell> + máquinas de estados
// ============================================================================

pub mod app_state;
pub mod router_state;
pub mod trap_state;

pub use app_state::*;
pub use router_state::{NavigationOutcome, PendingRender, RouterMachine, RouterPhase};
pub use trap_state::{TrapAction, TrapKey, TrapMachine};
