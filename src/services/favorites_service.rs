use std::rc::Rc;

use crate::utils::constants::FAVORITES_KEY;
use crate::utils::storage::{load_list, update_list, KeyValueStore, StorageError};

/// Títulos de proyectos marcados como favoritos
pub struct FavoritesService {
    store: Rc<dyn KeyValueStore>,
}

impl FavoritesService {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<String>, StorageError> {
        load_list(self.store.as_ref(), FAVORITES_KEY)
    }

    pub fn is_favorite(&self, title: &str) -> Result<bool, StorageError> {
        Ok(self.list()?.iter().any(|t| t == title))
    }

    /// Alternar favorito; devuelve el nuevo estado (true = favorito)
    pub fn toggle(&self, title: &str) -> Result<bool, StorageError> {
        update_list(self.store.as_ref(), FAVORITES_KEY, |favs: &mut Vec<String>| {
            if let Some(pos) = favs.iter().position(|t| t == title) {
                favs.remove(pos);
                false
            } else {
                favs.push(title.to_string());
                true
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStore;

    #[test]
    fn test_double_toggle_restores_membership() {
        let service = FavoritesService::new(Rc::new(MemoryStore::new()));
        service.toggle("Saúde Comunitária").unwrap();
        service.toggle("Cuidando do Verde").unwrap();
        let before = service.list().unwrap();

        assert!(service.toggle("Educação para Todos").unwrap());
        assert!(!service.toggle("Educação para Todos").unwrap());

        let mut after = service.list().unwrap();
        let mut expected = before.clone();
        after.sort();
        expected.sort();
        assert_eq!(after, expected);

        // Quitar y volver a añadir uno existente
        assert!(!service.toggle("Saúde Comunitária").unwrap());
        assert!(service.toggle("Saúde Comunitária").unwrap());
        let mut after = service.list().unwrap();
        after.sort();
        assert_eq!(after, expected);
    }

    #[test]
    fn test_is_favorite() {
        let service = FavoritesService::new(Rc::new(MemoryStore::new()));
        assert!(!service.is_favorite("Conexão e Trabalho").unwrap());
        service.toggle("Conexão e Trabalho").unwrap();
        assert!(service.is_favorite("Conexão e Trabalho").unwrap());
    }
}
