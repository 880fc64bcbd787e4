use std::rc::Rc;

use crate::models::SupportRecord;
use crate::utils::constants::SUPPORTS_KEY;
use crate::utils::storage::{load_list, update_list, KeyValueStore, StorageError};

/// Registros de interés de apoyo (proyecto + instante)
pub struct SupportService {
    store: Rc<dyn KeyValueStore>,
}

impl SupportService {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<SupportRecord>, StorageError> {
        load_list(self.store.as_ref(), SUPPORTS_KEY)
    }

    pub fn record(&self, project: &str) -> Result<SupportRecord, StorageError> {
        let record = SupportRecord::now(project);
        let saved = record.clone();
        update_list(self.store.as_ref(), SUPPORTS_KEY, move |list: &mut Vec<SupportRecord>| {
            list.push(saved);
        })?;
        log::info!("🤝 [APOIO] Interesse registrado para '{}'", project);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStore;

    #[test]
    fn test_supports_accumulate_with_timestamps() {
        let service = SupportService::new(Rc::new(MemoryStore::new()));
        service.record("Cuidando do Verde").unwrap();
        service.record("Cuidando do Verde").unwrap();

        let list = service.list().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.iter().all(|r| r.project == "Cuidando do Verde"));
        assert!(list[0].at.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&list[0].at).is_ok());
    }
}
