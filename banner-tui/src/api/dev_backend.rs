use async_trait::async_trait;
use banner_scheduler::{ItemId, ScheduleStore, ScheduleUpdate, StoreError, StoredItem};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory document store for `banner-tui dev`.
#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<Vec<StoredItem>>>,
    latency: Duration,
}

impl DevBackend {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(seed_dev_banners())),
            latency: Duration::ZERO,
        }
    }

    /// Delay applied to every call, so pending saves are visible.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for DevBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScheduleStore for DevBackend {
    async fn fetch_items(&self) -> Result<Vec<StoredItem>, StoreError> {
        self.simulate_latency().await;
        Ok(self.store.lock().expect("dev store lock poisoned").clone())
    }

    async fn update_schedule(
        &self,
        id: &ItemId,
        update: &ScheduleUpdate,
    ) -> Result<(), StoreError> {
        self.simulate_latency().await;
        let mut store = self.store.lock().expect("dev store lock poisoned");
        let doc = store
            .iter_mut()
            .find(|doc| &doc.id == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        doc.schedule_start_minutes = Some(update.schedule_start_minutes as f64);
        doc.schedule_end_minutes = Some(update.schedule_end_minutes as f64);
        doc.schedule_start_hour = Some(update.schedule_start_hour as f64);
        doc.schedule_end_hour = Some(update.schedule_end_hour as f64);
        tracing::debug!(id = %id, "dev backend stored schedule");
        Ok(())
    }
}

fn banner(id: &str, title: &str, start: Option<f64>, end: Option<f64>) -> StoredItem {
    StoredItem {
        id: ItemId::new(id),
        title: title.to_string(),
        is_active: true,
        scheduled: true,
        schedule_start_minutes: start,
        schedule_end_minutes: end,
        schedule_start_hour: None,
        schedule_end_hour: None,
    }
}

fn seed_dev_banners() -> Vec<StoredItem> {
    vec![
        banner("breakfast", "Breakfast Deal", Some(420.0), Some(600.0)),
        banner("lunch", "Lunch Special", Some(690.0), Some(840.0)),
        // Older record with hour-only bounds.
        StoredItem {
            schedule_start_hour: Some(15.0),
            schedule_end_hour: Some(17.0),
            ..banner("coffee", "Afternoon Coffee", None, None)
        },
        banner("happy-hour", "Happy Hour", Some(1020.0), Some(1080.0)),
        banner("late-night", "Late Night Bites", Some(1320.0), Some(1440.0)),
        StoredItem {
            is_active: false,
            scheduled: false,
            ..banner("draft", "Weekend Brunch (draft)", Some(600.0), Some(720.0))
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use banner_scheduler::{ScheduleAnchor, ScheduleWindow, Timeline};
    use banner_scheduler::domain::persistence::build_update;

    fn backend() -> DevBackend {
        DevBackend::new().with_latency(Duration::ZERO)
    }

    #[tokio::test]
    async fn seed_normalizes_to_scheduled_banners() {
        let docs = backend().fetch_items().await.unwrap();
        let timeline = Timeline::from_stored(&docs);

        assert_eq!(timeline.items().len(), 5);
        let coffee = timeline.item(&ItemId::new("coffee")).unwrap();
        assert_eq!(coffee.window, ScheduleWindow::new(900, 1020));
        assert!(timeline.item(&ItemId::new("draft")).is_none());
    }

    #[tokio::test]
    async fn updates_are_visible_on_next_fetch() {
        let backend = backend();
        let update = build_update(ScheduleWindow::new(1050, 1110), ScheduleAnchor::today_local());

        backend
            .update_schedule(&ItemId::new("happy-hour"), &update)
            .await
            .unwrap();

        let docs = backend.fetch_items().await.unwrap();
        let timeline = Timeline::from_stored(&docs);
        assert_eq!(
            timeline.item(&ItemId::new("happy-hour")).unwrap().window,
            ScheduleWindow::new(1050, 1110)
        );
    }

    #[tokio::test]
    async fn unknown_banner_is_not_found() {
        let update = build_update(ScheduleWindow::new(0, 60), ScheduleAnchor::today_local());
        let result = backend().update_schedule(&ItemId::new("nope"), &update).await;
        assert_eq!(result, Err(StoreError::NotFound(ItemId::new("nope"))));
    }
}
