// ============================================================================
// VIEWS - Registro de templates, páginas y modales
// ============================================================================

pub mod modal;
pub mod pages;
pub mod registry;

pub use pages::register_pages;
pub use registry::{MountFn, RenderError, TemplateRegistry};
