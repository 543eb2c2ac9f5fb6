use banner_scheduler::ScheduleStore;

use crate::app::App;

/// First load before the terminal is taken over. Failures are reported
/// and the timeline starts empty; `r` retries from inside the UI.
pub async fn initialize_app_state(app: &mut App, store: &dyn ScheduleStore) {
    app.is_loading = true;

    match store.fetch_items().await {
        Ok(docs) => {
            app.load_items(&docs);
            tracing::info!(count = app.timeline.items().len(), "banners loaded");
        }
        Err(e) => {
            tracing::error!("Could not load banners: {}", e);
            eprintln!("Warning: Could not load banners: {}", e);
            app.set_error(format!("Could not load banners: {}", e));
        }
    }

    app.is_loading = false;
}
