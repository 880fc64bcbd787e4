// ============================================================================
// TEMPLATE REGISTRY - Páginas registradas: markup estático + on_mount
// ============================================================================
// Cada render vacía #spa-root y lo reemplaza entero (sin diff). Los
// listeners de los nodos eliminados se pierden: on_mount los vuelve a
// enganchar en cada render.
// ============================================================================

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::a11y::place_focus_after_render;
use crate::dom::{create_element, get_element_by_id, query_selector_all_in, set_attribute};
use crate::state::AppState;
use crate::utils::constants::{HEADING_SELECTOR, MOUNT_ROOT_ID};
use crate::utils::i18n::t;

/// Callback de inicialización de la página recién insertada
pub type MountFn = Rc<dyn Fn(&Element, &AppState) -> Result<(), JsValue>>;

#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    NotFound(String),
    MountRootMissing,
    Mount(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NotFound(key) => write!(f, "Template '{}' not found", key),
            RenderError::MountRootMissing => write!(f, "Mount root #{} not found", MOUNT_ROOT_ID),
            RenderError::Mount(msg) => write!(f, "Mount callback failed: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

pub struct TemplateEntry {
    pub key: String,
    pub markup: String,
    pub on_mount: Option<MountFn>,
}

#[derive(Default)]
pub struct TemplateRegistry {
    entries: HashMap<String, TemplateEntry>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrar página; una clave repetida reemplaza la anterior.
    /// Devuelve true si había una entrada previa.
    pub fn register(&mut self, key: &str, markup: &str, on_mount: Option<MountFn>) -> bool {
        let previous = self.entries.insert(
            key.to_string(),
            TemplateEntry {
                key: key.to_string(),
                markup: markup.to_string(),
                on_mount,
            },
        );
        if previous.is_some() {
            log::debug!("🔍 [REGISTRY] Template '{}' sobrescrito", key);
        }
        previous.is_some()
    }

    pub fn lookup(&self, key: &str) -> Option<&TemplateEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Vaciar la raíz, insertar el markup, normalizar, montar y enfocar
    pub fn render(&self, key: &str, state: &AppState, page_changed: bool) -> Result<(), RenderError> {
        let root = get_element_by_id(MOUNT_ROOT_ID).ok_or(RenderError::MountRootMissing)?;
        state.page_listeners.clear();
        root.set_inner_html("");

        let entry = self
            .lookup(key)
            .ok_or_else(|| RenderError::NotFound(key.to_string()))?;

        root.set_inner_html(&entry.markup);
        enhance_semantics(&root).map_err(|e| RenderError::Mount(format!("{:?}", e)))?;

        if let Some(on_mount) = &entry.on_mount {
            on_mount(&root, state).map_err(|e| RenderError::Mount(format!("{:?}", e)))?;
        }

        place_focus_after_render(&root, page_changed);
        log::info!("📄 [REGISTRY] Página '{}' renderizada", key);
        Ok(())
    }
}

/// Garantizar un encabezado y texto alternativo en todas las imágenes
pub fn enhance_semantics(root: &Element) -> Result<(), JsValue> {
    if root.query_selector(HEADING_SELECTOR)?.is_none() {
        let heading = create_element("h1")?;
        heading.set_class_name("sr-only");
        heading.set_text_content(Some(&t("conteudo_principal")));
        root.prepend_with_node_1(&heading)?;
    }
    for img in query_selector_all_in(root, "img:not([alt])")? {
        set_attribute(&img, "alt", &t("imagem_decorativa"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = TemplateRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.register("sobre", "<h2>Sobre</h2>", None));
        let entry = registry.lookup("sobre").unwrap();
        assert_eq!(entry.key, "sobre");
        assert_eq!(entry.markup, "<h2>Sobre</h2>");
        assert!(entry.on_mount.is_none());
        assert!(registry.lookup("nonexistent").is_none());
    }

    #[test]
    fn test_reregistering_overwrites() {
        let mut registry = TemplateRegistry::new();
        registry.register("inicio", "<h1>v1</h1>", None);
        let mount: MountFn = Rc::new(|_, _| Ok(()));
        assert!(registry.register("inicio", "<h1>v2</h1>", Some(mount)));
        assert_eq!(registry.len(), 1);
        let entry = registry.lookup("inicio").unwrap();
        assert_eq!(entry.markup, "<h1>v2</h1>");
        assert!(entry.on_mount.is_some());
    }

    #[test]
    fn test_render_error_messages() {
        assert_eq!(
            RenderError::NotFound("x".into()).to_string(),
            "Template 'x' not found"
        );
        assert_eq!(
            RenderError::MountRootMissing.to_string(),
            "Mount root #spa-root not found"
        );
    }
}
