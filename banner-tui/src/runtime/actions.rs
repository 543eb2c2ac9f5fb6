use banner_scheduler::domain::convert::to_display_range;
use banner_scheduler::domain::persistence::persist;
use banner_scheduler::{PendingCommit, ScheduleStore, StoreError, StoredItem};
use std::sync::Arc;

use crate::app::App;

use super::action_queue::{Action, ActionTx};

pub(super) fn run_action(
    action: Action,
    app: &mut App,
    store: &Arc<dyn ScheduleStore>,
    action_tx: &ActionTx,
) {
    match action {
        Action::Persist(commit) => {
            spawn_save(commit, app, store, action_tx);
        }
        Action::SaveFinished { commit, result } => {
            handle_save_finished(commit, result, app);
        }
        Action::Refresh => {
            spawn_refresh(app, store, action_tx);
        }
        Action::ItemsLoaded(result) => {
            handle_items_loaded(result, app);
        }
    }
}

/// Saves run on their own task so the timeline keeps drawing; the result
/// comes back through the action queue.
fn spawn_save(
    commit: PendingCommit,
    app: &mut App,
    store: &Arc<dyn ScheduleStore>,
    action_tx: &ActionTx,
) {
    app.set_status(format!(
        "Saving {} ({})…",
        commit.title,
        to_display_range(commit.window.start, commit.window.end)
    ));

    let store = Arc::clone(store);
    let tx = action_tx.clone();
    tokio::spawn(async move {
        let result = persist(store.as_ref(), &commit.item_id, &commit.update).await;
        let _ = tx.send(Action::SaveFinished { commit, result });
    });
}

fn handle_save_finished(commit: PendingCommit, result: Result<(), StoreError>, app: &mut App) {
    if let Err(e) = app.timeline.finish_commit(&commit, result) {
        tracing::error!(id = %commit.item_id, "save failed: {}", e);
    }
    app.drain_notices();
}

fn spawn_refresh(app: &mut App, store: &Arc<dyn ScheduleStore>, action_tx: &ActionTx) {
    app.is_loading = true;
    let store = Arc::clone(store);
    let tx = action_tx.clone();
    tokio::spawn(async move {
        let result = store.fetch_items().await;
        let _ = tx.send(Action::ItemsLoaded(result));
    });
}

fn handle_items_loaded(result: Result<Vec<StoredItem>, StoreError>, app: &mut App) {
    app.is_loading = false;
    match result {
        Ok(docs) => {
            app.load_items(&docs);
            app.set_status(format!("Loaded {} banners", app.timeline.items().len()));
        }
        Err(e) => {
            tracing::error!("Failed to load banners: {}", e);
            app.set_error(format!("Error loading banners: {}", e));
        }
    }
}
