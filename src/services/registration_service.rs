use std::rc::Rc;

use crate::models::RegistrationRecord;
use crate::utils::constants::REGISTRATIONS_KEY;
use crate::utils::storage::{load_list, save_to_storage, update_list, KeyValueStore, StorageError};

/// Lista append-only de registros de voluntarios
pub struct RegistrationService {
    store: Rc<dyn KeyValueStore>,
}

impl RegistrationService {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<RegistrationRecord>, StorageError> {
        load_list(self.store.as_ref(), REGISTRATIONS_KEY)
    }

    /// Añadir al final; devuelve el nuevo total
    pub fn append(&self, record: RegistrationRecord) -> Result<usize, StorageError> {
        let total = update_list(self.store.as_ref(), REGISTRATIONS_KEY, |list: &mut Vec<RegistrationRecord>| {
            list.push(record);
            list.len()
        })?;
        log::info!("💾 [REGISTROS] Registro guardado ({} en total)", total);
        Ok(total)
    }

    /// Eliminar por índice; false si el índice no existe
    pub fn remove(&self, index: usize) -> Result<bool, StorageError> {
        let mut list = self.list()?;
        if index >= list.len() {
            log::warn!("⚠️ [REGISTROS] Índice {} fuera de rango ({})", index, list.len());
            return Ok(false);
        }
        list.remove(index);
        save_to_storage(self.store.as_ref(), REGISTRATIONS_KEY, &list)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStore;

    fn record(nome: &str) -> RegistrationRecord {
        RegistrationRecord {
            nome: nome.to_string(),
            ..RegistrationRecord::default()
        }
    }

    #[test]
    fn test_append_keeps_order_and_duplicates() {
        let service = RegistrationService::new(Rc::new(MemoryStore::new()));
        service.append(record("Ana")).unwrap();
        service.append(record("Ana")).unwrap();
        assert_eq!(service.append(record("Bia")).unwrap(), 3);

        let names: Vec<_> = service.list().unwrap().into_iter().map(|r| r.nome).collect();
        assert_eq!(names, vec!["Ana", "Ana", "Bia"]);
    }

    #[test]
    fn test_remove_by_index() {
        let service = RegistrationService::new(Rc::new(MemoryStore::new()));
        service.append(record("Ana")).unwrap();
        service.append(record("Bia")).unwrap();

        assert!(!service.remove(5).unwrap());
        assert!(service.remove(0).unwrap());
        let names: Vec<_> = service.list().unwrap().into_iter().map(|r| r.nome).collect();
        assert_eq!(names, vec!["Bia"]);
    }
}
