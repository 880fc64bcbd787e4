// ============================================================================
// VIEWMODELS - Controladores de páginas y navegación
// ============================================================================

pub mod form_viewmodel;
pub mod menu_viewmodel;
pub mod projects_viewmodel;
pub mod router_viewmodel;

pub use form_viewmodel::FormController;
pub use menu_viewmodel::MenuViewModel;
pub use projects_viewmodel::ProjectsViewModel;
pub use router_viewmodel::RouterViewModel;
