//! Shapes a confirmed window into the banner document update and hands it
//! to the store.

use time::Duration;
use tracing::instrument;

use super::models::{ItemId, ScheduleAnchor, ScheduleUpdate, ScheduleWindow};
use super::ports::outbound::ScheduleStore;
use super::StoreError;

/// Build the update document for `window` on the `anchor` day.
///
/// Hour fields round outwards so an hour-granularity reader never shows the
/// banner for less time than scheduled. The end timestamp moves to the next
/// day whenever it would not come after the start.
pub fn build_update(window: ScheduleWindow, anchor: ScheduleAnchor) -> ScheduleUpdate {
    let start_time = anchor.at(window.start);
    let mut end_time = anchor.at(window.end);
    if end_time <= start_time {
        end_time += Duration::days(1);
    }

    ScheduleUpdate {
        schedule_start_minutes: window.start,
        schedule_end_minutes: window.end,
        schedule_start_hour: window.start / 60,
        schedule_end_hour: window.end.div_ceil(60),
        start_time,
        end_time,
    }
}

/// Write a prepared update. One attempt; the caller reports failures.
#[instrument(name = "persist_schedule", skip(store, update), fields(id = %id))]
pub async fn persist<S>(
    store: &S,
    id: &ItemId,
    update: &ScheduleUpdate,
) -> Result<(), StoreError>
where
    S: ScheduleStore + ?Sized,
{
    match store.update_schedule(id, update).await {
        Ok(()) => {
            tracing::debug!(
                start = update.schedule_start_minutes,
                end = update.schedule_end_minutes,
                "schedule saved"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Failed to save banner schedule: {}", e);
            Err(e)
        }
    }
}
