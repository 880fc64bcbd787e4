use std::rc::Rc;

use crate::utils::constants::NEWSLETTER_KEY;
use crate::utils::storage::{load_list, update_list, KeyValueStore, StorageError};
use crate::utils::validator::is_valid_email;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed,
    AlreadySubscribed,
    InvalidEmail,
}

/// Emails suscritos a la newsletter (sin duplicados)
pub struct NewsletterService {
    store: Rc<dyn KeyValueStore>,
}

impl NewsletterService {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Result<Vec<String>, StorageError> {
        load_list(self.store.as_ref(), NEWSLETTER_KEY)
    }

    pub fn subscribe(&self, email: &str) -> Result<SubscribeOutcome, StorageError> {
        let email = email.trim();
        if email.is_empty() || !is_valid_email(email) {
            return Ok(SubscribeOutcome::InvalidEmail);
        }
        update_list(self.store.as_ref(), NEWSLETTER_KEY, |list: &mut Vec<String>| {
            if list.iter().any(|e| e == email) {
                SubscribeOutcome::AlreadySubscribed
            } else {
                list.push(email.to_string());
                SubscribeOutcome::Subscribed
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStore;

    #[test]
    fn test_subscribe_validates_and_deduplicates() {
        let service = NewsletterService::new(Rc::new(MemoryStore::new()));
        assert_eq!(service.subscribe("a@b").unwrap(), SubscribeOutcome::InvalidEmail);
        assert_eq!(service.subscribe(" a@b.com ").unwrap(), SubscribeOutcome::Subscribed);
        assert_eq!(service.subscribe("a@b.com").unwrap(), SubscribeOutcome::AlreadySubscribed);
        assert_eq!(service.list().unwrap(), vec!["a@b.com"]);
    }
}
