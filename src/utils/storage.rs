// ============================================================================
// STORAGE - Almacén clave-valor del navegador (localStorage) + helpers JSON
// ============================================================================
// Cada clave guarda un documento JSON completo que se lee, modifica y
// reescribe entero (sin atomicidad entre pestañas: gana la última escritura).
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use serde::{de::DeserializeOwned, Serialize};
use web_sys::{window, Storage};

/// Errores de la capa de persistencia
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    Unavailable,
    Read(String),
    Write(String),
    Serialize(String),
    Corrupt { key: String, detail: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "localStorage is not available"),
            StorageError::Read(msg) => write!(f, "Storage read error: {}", msg),
            StorageError::Write(msg) => write!(f, "Storage write error: {}", msg),
            StorageError::Serialize(msg) => write!(f, "Serialization error: {}", msg),
            StorageError::Corrupt { key, detail } => {
                write!(f, "Corrupt JSON under '{}': {}", key, detail)
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// Almacén clave-valor de strings
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

/// localStorage del navegador
pub struct BrowserStorage {
    storage: Storage,
}

impl BrowserStorage {
    /// None si el navegador bloquea localStorage (modo privado, iframes...)
    pub fn open() -> Option<Self> {
        get_local_storage().map(|storage| Self { storage })
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Read(format!("{:?}", e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // QuotaExceededError llega aquí
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

/// Almacén en memoria: respaldo cuando no hay localStorage, y para tests
#[derive(Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

pub fn save_to_storage<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value).map_err(|e| StorageError::Serialize(e.to_string()))?;
    store.set_item(key, &json)
}

pub fn load_from_storage<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get_item(key)? {
        Some(json) => serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                key: key.to_string(),
                detail: e.to_string(),
            }),
        None => Ok(None),
    }
}

/// Lista persistida; clave ausente = lista vacía
pub fn load_list<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<T>, StorageError> {
    Ok(load_from_storage(store, key)?.unwrap_or_default())
}

/// Leer-modificar-escribir de una lista completa
pub fn update_list<T, R, F>(store: &dyn KeyValueStore, key: &str, update: F) -> Result<R, StorageError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce(&mut Vec<T>) -> R,
{
    let mut list: Vec<T> = load_list(store, key)?;
    let result = update(&mut list);
    save_to_storage(store, key, &list)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_loads_as_empty_list() {
        let store = MemoryStore::new();
        let list: Vec<String> = load_list(&store, "nexus_favs").unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn test_update_list_persists_whole_document() {
        let store = MemoryStore::new();
        let len = update_list(&store, "nexus_news", |list: &mut Vec<String>| {
            list.push("a@b.com".to_string());
            list.len()
        })
        .unwrap();
        assert_eq!(len, 1);
        assert_eq!(
            store.get_item("nexus_news").unwrap().as_deref(),
            Some(r#"["a@b.com"]"#)
        );
    }

    #[test]
    fn test_corrupt_json_is_reported_not_discarded() {
        let store = MemoryStore::new();
        store.set_item("nexus_registros", "{not json").unwrap();
        let result: Result<Vec<String>, _> = load_list(&store, "nexus_registros");
        assert!(matches!(result, Err(StorageError::Corrupt { .. })));
        // El documento original sigue intacto
        assert_eq!(
            store.get_item("nexus_registros").unwrap().as_deref(),
            Some("{not json")
        );
    }
}
