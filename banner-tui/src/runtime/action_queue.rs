use banner_scheduler::{PendingCommit, StoreError, StoredItem};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone)]
pub(super) enum Action {
    /// Write a locally applied change to the store.
    Persist(PendingCommit),
    SaveFinished {
        commit: PendingCommit,
        result: Result<(), StoreError>,
    },
    Refresh,
    ItemsLoaded(Result<Vec<StoredItem>, StoreError>),
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}
