use async_trait::async_trait;

use crate::domain::{
    models::{ItemId, ScheduleUpdate, StoredItem},
    StoreError,
};

/// Outbound port to the document store holding banner documents.
///
/// This is the only way the scheduler reads or writes banners. The store
/// decides nothing about overlaps; every check happens before
/// `update_schedule` is called.
#[async_trait]
pub trait ScheduleStore: Send + Sync + 'static {
    /// Fetch every banner document, scheduled or not.
    async fn fetch_items(&self) -> Result<Vec<StoredItem>, StoreError>;

    /// Write schedule fields onto an existing banner document.
    async fn update_schedule(&self, id: &ItemId, update: &ScheduleUpdate)
        -> Result<(), StoreError>;
}
