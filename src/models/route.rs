// ============================================================================
// ROUTE - Identificador de página derivado del fragmento (#)
// ============================================================================

use crate::utils::i18n::t;

/// Páginas registradas de la SPA
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Inicio,
    Projetos,
    Cadastro,
    Sobre,
}

impl Route {
    /// Página por defecto (fragmento vacío o desconocido)
    pub const HOME: Route = Route::Inicio;

    pub const ALL: [Route; 4] = [Route::Inicio, Route::Projetos, Route::Cadastro, Route::Sobre];

    pub fn key(&self) -> &'static str {
        match self {
            Route::Inicio => "inicio",
            Route::Projetos => "projetos",
            Route::Cadastro => "cadastro",
            Route::Sobre => "sobre",
        }
    }

    pub fn from_key(key: &str) -> Option<Route> {
        Route::ALL.iter().copied().find(|route| route.key() == key)
    }

    /// `#inicio`, `#projetos`, ...
    pub fn fragment(&self) -> String {
        format!("#{}", self.key())
    }

    /// Título legible de la página
    pub fn title(&self) -> String {
        t(&format!("titulo_{}", self.key()))
    }

    /// Mensaje para lectores de pantalla al llegar a la página
    pub fn announcement(&self) -> String {
        t(&format!("anuncio_{}", self.key()))
    }
}

/// Clave de página a partir del fragmento: sin `#`, `inicio` si está vacío
pub fn page_key_from_fragment(fragment: &str) -> String {
    let key = fragment.trim().trim_start_matches('#');
    if key.is_empty() {
        Route::HOME.key().to_string()
    } else {
        key.to_string()
    }
}

/// Fragmento actual normalizado para comparar enlaces (`#inicio` si vacío)
pub fn current_fragment(location_hash: &str) -> String {
    format!("#{}", page_key_from_fragment(location_hash))
}

/// Normalizar un href a forma de fragmento (siempre con `#`)
pub fn normalize_fragment(href: &str) -> String {
    let href = href.trim();
    if href.starts_with('#') {
        href.to_string()
    } else {
        format!("#{}", href)
    }
}

/// Clasificación de un href de enlace interno (`a[data-link]`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// href vacío: se cancela el click sin navegar
    Ignore,
    /// URL absoluta o ruta desde la raíz: el navegador sigue su curso
    External,
    /// Navegación SPA hacia el fragmento normalizado
    Internal(String),
}

pub fn classify_href(href: &str) -> LinkTarget {
    let href = href.trim();
    if href.is_empty() {
        return LinkTarget::Ignore;
    }
    if has_url_scheme(href) || href.starts_with('/') {
        return LinkTarget::External;
    }
    LinkTarget::Internal(normalize_fragment(href))
}

/// `^[a-zA-Z]+://`
fn has_url_scheme(href: &str) -> bool {
    match href.find("://") {
        Some(0) | None => false,
        Some(pos) => href[..pos].chars().all(|c| c.is_ascii_alphabetic()),
    }
}

/// Un enlace es el actual si su href normalizado coincide con el fragmento
pub fn is_current_link(href: &str, current_fragment: &str) -> bool {
    normalize_fragment(href) == current_fragment
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_resolution_defaults_to_home() {
        assert_eq!(page_key_from_fragment(""), "inicio");
        assert_eq!(page_key_from_fragment("#"), "inicio");
        assert_eq!(page_key_from_fragment("#projetos"), "projetos");
        assert_eq!(page_key_from_fragment("sobre"), "sobre");
    }

    #[test]
    fn test_every_supported_fragment_maps_to_one_page() {
        for route in Route::ALL {
            let key = page_key_from_fragment(&route.fragment());
            assert_eq!(Route::from_key(&key), Some(route));
        }
        assert_eq!(Route::from_key("nonexistent"), None);
    }

    #[test]
    fn test_classify_href() {
        assert_eq!(classify_href("   "), LinkTarget::Ignore);
        assert_eq!(classify_href("https://exemplo.org"), LinkTarget::External);
        assert_eq!(classify_href("/docs/index.html"), LinkTarget::External);
        assert_eq!(classify_href("#cadastro"), LinkTarget::Internal("#cadastro".into()));
        assert_eq!(classify_href("projetos"), LinkTarget::Internal("#projetos".into()));
        assert_eq!(classify_href("a1://x"), LinkTarget::Internal("#a1://x".into()));
    }

    #[test]
    fn test_exactly_one_nav_link_is_current() {
        let nav = ["#inicio", "projetos", "#cadastro", "#sobre"];
        for route in Route::ALL {
            let current = current_fragment(&route.fragment());
            let marked: Vec<_> = nav.iter().filter(|href| is_current_link(href, &current)).collect();
            assert_eq!(marked.len(), 1);
            assert_eq!(normalize_fragment(marked[0]), route.fragment());
        }
        assert!(is_current_link("#inicio", &current_fragment("")));
    }

    #[test]
    fn test_titles_and_announcements() {
        assert_eq!(Route::Projetos.title(), "Nossos Projetos");
        assert_eq!(Route::Cadastro.announcement(), "Navegado para formulário de cadastro");
    }
}
