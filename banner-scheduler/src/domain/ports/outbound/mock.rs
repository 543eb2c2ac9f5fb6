//! In-memory store for exercising the scheduler without a backend.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use super::ScheduleStore;
use crate::domain::{
    models::{ItemId, ScheduleUpdate, StoredItem},
    StoreError,
};

#[derive(Clone, Default)]
pub struct MockScheduleStore {
    documents: Arc<Mutex<Vec<StoredItem>>>,
    updates: Arc<Mutex<Vec<(ItemId, ScheduleUpdate)>>>,
    failure: Arc<Mutex<Option<StoreError>>>,
}

impl MockScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(self, docs: Vec<StoredItem>) -> Self {
        *self.documents.lock().unwrap() = docs;
        self
    }

    /// Make every following update fail with `error`.
    pub fn failing_with(self, error: StoreError) -> Self {
        *self.failure.lock().unwrap() = Some(error);
        self
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    /// Updates received so far, in call order.
    pub fn updates(&self) -> Vec<(ItemId, ScheduleUpdate)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }
}

#[async_trait]
impl ScheduleStore for MockScheduleStore {
    async fn fetch_items(&self) -> Result<Vec<StoredItem>, StoreError> {
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn update_schedule(
        &self,
        id: &ItemId,
        update: &ScheduleUpdate,
    ) -> Result<(), StoreError> {
        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }

        let mut documents = self.documents.lock().unwrap();
        if let Some(doc) = documents.iter_mut().find(|doc| &doc.id == id) {
            doc.schedule_start_minutes = Some(update.schedule_start_minutes as f64);
            doc.schedule_end_minutes = Some(update.schedule_end_minutes as f64);
            doc.schedule_start_hour = Some(update.schedule_start_hour as f64);
            doc.schedule_end_hour = Some(update.schedule_end_hour as f64);
        }
        drop(documents);

        self.updates
            .lock()
            .unwrap()
            .push((id.clone(), update.clone()));
        Ok(())
    }
}
