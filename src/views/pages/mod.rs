// ============================================================================
// PAGES - Registro de las cuatro páginas de la SPA
// ============================================================================

pub mod cadastro;
pub mod inicio;
pub mod projetos;
pub mod sobre;

use std::rc::Rc;

use crate::models::Route;
use crate::views::registry::{MountFn, TemplateRegistry};

/// Registrar todas las páginas (una vez, al arrancar)
pub fn register_pages(registry: &mut TemplateRegistry) {
    let inicio: MountFn = Rc::new(inicio::on_mount);
    let projetos: MountFn = Rc::new(projetos::on_mount);
    let cadastro: MountFn = Rc::new(cadastro::on_mount);

    registry.register(Route::Inicio.key(), inicio::MARKUP, Some(inicio));
    registry.register(Route::Projetos.key(), projetos::MARKUP, Some(projetos));
    registry.register(Route::Cadastro.key(), cadastro::MARKUP, Some(cadastro));
    registry.register(Route::Sobre.key(), sobre::MARKUP, None);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_has_a_template() {
        let mut registry = TemplateRegistry::new();
        register_pages(&mut registry);
        assert_eq!(registry.len(), Route::ALL.len());
        for route in Route::ALL {
            assert!(registry.contains(route.key()), "{}", route.key());
        }
    }

    #[test]
    fn test_templates_carry_a_heading() {
        for markup in [inicio::MARKUP, projetos::MARKUP, cadastro::MARKUP, sobre::MARKUP] {
            assert!(markup.contains("<h1") || markup.contains("<h2"));
        }
    }
}
