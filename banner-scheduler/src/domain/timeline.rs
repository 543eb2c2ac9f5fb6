//! The container behind the timeline view.
//!
//! Holds the committed banners, at most one drag session and the set of
//! banners whose saves are still in flight. Every change, whether it comes
//! from a drag, the edit form or the extend action, goes through
//! [`Timeline::begin_commit`] and [`Timeline::finish_commit`].

use std::collections::{HashMap, VecDeque};

use super::conflict::{find_conflict, Conflict};
use super::convert::to_display_time;
use super::drag::{DragMode, DragSession};
use super::form::ScheduleForm;
use super::models::{
    normalize_items, ItemId, ScheduleAnchor, ScheduleUpdate, ScheduleWindow, ScheduledItem,
    StoredItem,
};
use super::notice::Notice;
use super::persistence::build_update;
use super::{ScheduleError, StoreError, MAX_NEXT_DAY_END, MINUTES_PER_DAY, MIN_DURATION_MINUTES};

const SAVE_FAILED_MESSAGE: &str = "Failed to update banner schedule. Please try again.";

/// A change applied locally and waiting for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommit {
    pub item_id: ItemId,
    pub title: String,
    /// Last committed window, restored if the save fails.
    pub previous: ScheduleWindow,
    pub window: ScheduleWindow,
    pub update: ScheduleUpdate,
}

#[derive(Debug, Default)]
pub struct Timeline {
    items: Vec<ScheduledItem>,
    drag: Option<DragSession>,
    /// Banners with a save in flight, keyed to their last committed window.
    pending: HashMap<ItemId, ScheduleWindow>,
    notices: VecDeque<Notice>,
}

impl Timeline {
    pub fn new(items: Vec<ScheduledItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn from_stored(docs: &[StoredItem]) -> Self {
        Self::new(normalize_items(docs))
    }

    pub fn items(&self) -> &[ScheduledItem] {
        &self.items
    }

    pub fn item(&self, id: &ItemId) -> Option<&ScheduledItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_pending(&self, id: &ItemId) -> bool {
        self.pending.contains_key(id)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Overlap feedback for the drag in progress, if any.
    pub fn live_conflict(&self) -> Option<&Conflict> {
        self.drag.as_ref().and_then(|session| session.conflict.as_ref())
    }

    /// Where `item` should be drawn: the live candidate while it is being
    /// dragged, its committed window otherwise.
    pub fn display_window(&self, item: &ScheduledItem) -> ScheduleWindow {
        match &self.drag {
            Some(session) if session.item_id == item.id => session.candidate,
            _ => item.window,
        }
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    /// Drain notifications raised since the last call, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    /// Replace the banners with a fresh read from the store.
    ///
    /// Banners with a save in flight keep their local window so a refresh
    /// cannot undo an optimistic change before the store confirms it.
    pub fn replace_items(&mut self, docs: &[StoredItem]) {
        let mut fresh = normalize_items(docs);
        for item in fresh.iter_mut() {
            if self.pending.contains_key(&item.id) {
                if let Some(local) = self.item(&item.id) {
                    item.window = local.window;
                }
            }
        }
        self.items = fresh;

        let drag_target_gone = self
            .drag
            .as_ref()
            .is_some_and(|session| self.item(&session.item_id).is_none());
        if drag_target_gone {
            tracing::debug!("dragged banner disappeared on refresh, dropping drag");
            self.drag = None;
        }
    }

    fn lookup(&self, id: &ItemId) -> Result<&ScheduledItem, ScheduleError> {
        self.item(id)
            .ok_or_else(|| ScheduleError::UnknownItem(id.clone()))
    }

    fn ensure_not_pending(&self, item: &ScheduledItem) -> Result<(), ScheduleError> {
        if self.is_pending(&item.id) {
            return Err(ScheduleError::SavePending {
                title: item.title.clone(),
            });
        }
        Ok(())
    }

    /// First banner in the way of `window`.
    ///
    /// A banner still saving holds both its new window and the one it
    /// falls back to if the save fails.
    fn blocking_conflict(&self, id: &ItemId, window: ScheduleWindow) -> Option<Conflict> {
        let reserved: Vec<ScheduledItem> = self
            .items
            .iter()
            .filter_map(|item| {
                let previous = self.pending.get(&item.id)?;
                Some(ScheduledItem {
                    window: *previous,
                    ..item.clone()
                })
            })
            .collect();

        find_conflict(id, window, self.items.iter().chain(reserved.iter()))
    }

    fn set_window(&mut self, id: &ItemId, window: ScheduleWindow) {
        if let Some(item) = self.items.iter_mut().find(|item| &item.id == id) {
            item.window = window;
        }
    }

    /// Pointer-down on a banner block.
    pub fn begin_drag(
        &mut self,
        id: &ItemId,
        mode: DragMode,
        pointer_minutes: Option<i32>,
    ) -> Result<(), ScheduleError> {
        if self.drag.is_some() {
            return Err(ScheduleError::DragInProgress);
        }
        let item = self.lookup(id)?;
        self.ensure_not_pending(item)?;

        tracing::debug!(id = %id, ?mode, "drag started");
        self.drag = Some(DragSession::begin(item, mode, pointer_minutes));
        Ok(())
    }

    /// Pointer-move while dragging. Returns the new candidate, or `None`
    /// when no drag is in progress.
    ///
    /// The candidate is applied even when it overlaps another banner; the
    /// overlap is only reported through [`Timeline::live_conflict`].
    pub fn drag_to(&mut self, pointer_minutes: i32) -> Option<ScheduleWindow> {
        let session = self.drag.as_mut()?;
        let candidate = session.update(pointer_minutes);
        let item_id = session.item_id.clone();

        let conflict = self.blocking_conflict(&item_id, candidate);
        if let Some(session) = self.drag.as_mut() {
            session.conflict = conflict;
        }
        Some(candidate)
    }

    /// Abandon the drag in progress without saving.
    pub fn cancel_drag(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Pointer-up. Clears the drag session no matter the outcome.
    ///
    /// Returns the commit to persist, `None` when the banner did not move,
    /// or the reason the change was refused. A refused change leaves the
    /// committed window untouched.
    pub fn end_drag(
        &mut self,
        anchor: ScheduleAnchor,
    ) -> Result<Option<PendingCommit>, ScheduleError> {
        let session = self.drag.take().ok_or(ScheduleError::NotDragging)?;
        if !session.is_changed() {
            tracing::debug!(id = %session.item_id, "drag released without change");
            return Ok(None);
        }

        match self.begin_commit(&session.item_id, session.candidate, anchor) {
            Ok(commit) => Ok(Some(commit)),
            Err(e) => {
                if let ScheduleError::Conflict { .. } = &e {
                    self.push_notice(Notice::error("Schedule Conflict", e.to_string()));
                }
                Err(e)
            }
        }
    }

    /// Submit the manual edit form.
    ///
    /// On failure the message is left on the form and nothing is
    /// persisted.
    pub fn submit_form(
        &mut self,
        form: &mut ScheduleForm,
        anchor: ScheduleAnchor,
    ) -> Result<PendingCommit, ScheduleError> {
        let result = match form.validate(&self.items) {
            Ok(window) => self.begin_commit(&form.item_id, window, anchor),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            form.validation_error = Some(e.to_string());
        }
        result
    }

    /// Quick action: run the banner `minutes_past_midnight` into the next
    /// day, keeping its start.
    pub fn extend_past_midnight(
        &mut self,
        id: &ItemId,
        minutes_past_midnight: u32,
        anchor: ScheduleAnchor,
    ) -> Result<PendingCommit, ScheduleError> {
        let item = self.lookup(id)?;
        let extra = minutes_past_midnight
            .clamp(MIN_DURATION_MINUTES, MAX_NEXT_DAY_END - MINUTES_PER_DAY);
        let window = ScheduleWindow::new(item.start(), MINUTES_PER_DAY + extra);

        let result = self.begin_commit(id, window, anchor);
        if let Err(e @ ScheduleError::Conflict { .. }) = &result {
            self.push_notice(Notice::error("Schedule Conflict", e.to_string()));
        }
        result
    }

    /// Gate a change and apply it locally.
    ///
    /// Refuses unknown banners, banners still saving and windows that
    /// overlap another banner, including the fallback window of a banner
    /// whose save has not settled. On success the banner shows `window` and is
    /// marked pending until [`Timeline::finish_commit`].
    pub fn begin_commit(
        &mut self,
        id: &ItemId,
        window: ScheduleWindow,
        anchor: ScheduleAnchor,
    ) -> Result<PendingCommit, ScheduleError> {
        let item = self.lookup(id)?;
        self.ensure_not_pending(item)?;

        if let Some(conflict) = self.blocking_conflict(id, window) {
            tracing::debug!(id = %id, blocking = %conflict.item_id, "commit refused");
            return Err(ScheduleError::Conflict {
                title: conflict.title,
            });
        }

        let commit = PendingCommit {
            item_id: id.clone(),
            title: item.title.clone(),
            previous: item.window,
            window,
            update: build_update(window, anchor),
        };

        self.pending.insert(id.clone(), commit.previous);
        self.set_window(id, window);
        Ok(commit)
    }

    /// Settle a commit with the store's answer.
    ///
    /// A failed save always puts the banner back on its last committed
    /// window.
    pub fn finish_commit(
        &mut self,
        commit: &PendingCommit,
        result: Result<(), StoreError>,
    ) -> Result<(), ScheduleError> {
        self.pending.remove(&commit.item_id);

        match result {
            Ok(()) => {
                self.push_notice(Notice::info(
                    "Banner schedule updated",
                    format!(
                        "{} will now show from {} to {}",
                        commit.title,
                        to_display_time(commit.window.start),
                        to_display_time(commit.window.end)
                    ),
                ));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(id = %commit.item_id, "reverting banner after failed save");
                self.set_window(&commit.item_id, commit.previous);
                self.push_notice(Notice::error("Error", SAVE_FAILED_MESSAGE));
                Err(e.into())
            }
        }
    }
}
