// ============================================================================
// CONSTANTES - Claves de almacenamiento, IDs y selectores del DOM
// ============================================================================

/// Claves persistidas en localStorage (cada una guarda JSON)
pub const THEME_KEY: &str = "nexus_theme";
pub const HIGH_CONTRAST_KEY: &str = "nexus_high_contrast";
pub const REGISTRATIONS_KEY: &str = "nexus_registros";
pub const FAVORITES_KEY: &str = "nexus_favs";
pub const SUPPORTS_KEY: &str = "nexus_supports";
pub const NEWSLETTER_KEY: &str = "nexus_news";

/// Contrato DOM consumido
pub const MOUNT_ROOT_ID: &str = "spa-root";
pub const LIVE_REGION_ID: &str = "a11y-live-region";
pub const FORM_ID: &str = "form-cadastro";
pub const FORM_MESSAGE_ID: &str = "form-mensagem";
pub const REGISTRATIONS_LIST_ID: &str = "registros-list";
pub const NAVIGATION_ID: &str = "main-navigation";

pub const SKIP_LINK_SELECTOR: &str = ".skip-link";
pub const HEADING_SELECTOR: &str = "h1, h2, [role=\"heading\"]";
pub const INTERNAL_LINK_SELECTOR: &str = "a[data-link]";
pub const NAV_LINK_SELECTOR: &str = "nav a[data-link]";
pub const LANDMARK_SELECTOR: &str = "header, main, footer, nav";
pub const FORM_FIELD_SELECTOR: &str = "input, select, textarea";

/// Elementos interactivos candidatos a recibir foco dentro de un trap
pub const FOCUSABLE_SELECTOR: &str = "a[href], area[href], input:not([disabled]):not([type=\"hidden\"]), select:not([disabled]), textarea:not([disabled]), button:not([disabled]), [tabindex]:not([tabindex=\"-1\"]), [contenteditable=\"true\"]";

/// Clase visual del enlace activo
pub const ACTIVE_LINK_CLASS: &str = "menu-ativo";
