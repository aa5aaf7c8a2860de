//! In-memory prospect store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreResult;
use crate::traits::store::{InsertOutcome, ProspectStore};
use crate::types::ScoredProspect;

/// RwLock-backed map store; the default backend.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<Uuid, ScoredProspect>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn find_match(&self, prospect: &ScoredProspect) -> Option<Uuid> {
        let email = prospect
            .contact
            .email
            .as_deref()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty());
        let triple = (
            prospect.contact.first_name.trim().to_lowercase(),
            prospect.contact.last_name.trim().to_lowercase(),
            prospect.contact.company.trim().to_lowercase(),
        );

        self.inner
            .read()
            .unwrap()
            .values()
            .find(|existing| {
                let existing_email = existing
                    .contact
                    .email
                    .as_deref()
                    .map(|e| e.trim().to_lowercase());
                if let (Some(a), Some(b)) = (&email, &existing_email) {
                    if a == b {
                        return true;
                    }
                }
                (
                    existing.contact.first_name.trim().to_lowercase(),
                    existing.contact.last_name.trim().to_lowercase(),
                    existing.contact.company.trim().to_lowercase(),
                ) == triple
            })
            .map(|existing| existing.contact.id)
    }
}

#[async_trait]
impl ProspectStore for MemoryStore {
    async fn insert_if_new(&self, prospect: &ScoredProspect) -> StoreResult<InsertOutcome> {
        if let Some(existing_id) = self.find_match(prospect) {
            return Ok(InsertOutcome::AlreadyExists(existing_id));
        }

        self.inner
            .write()
            .unwrap()
            .insert(prospect.contact.id, prospect.clone());
        Ok(InsertOutcome::Inserted)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Option<ScoredProspect>> {
        Ok(self.inner.read().unwrap().get(&id).cloned())
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.inner.read().unwrap().len())
    }
}
