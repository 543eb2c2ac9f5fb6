//! Scheduling core for promotional banners placed on a 24-hour timeline.
//!
//! Banners occupy half-open `[start, end)` minute intervals on a single day
//! and may not overlap. The crate owns everything between the stored
//! documents and the rendered track:
//!
//! - **`domain::convert`**: minute ↔ display string ↔ pixel conversions
//! - **`domain::conflict`**: overlap detection against the other banners
//! - **`domain::drag`**: pointer-driven resize/move sessions with snapping
//! - **`domain::form`**: manual start/end entry and its validation
//! - **`domain::persistence`**: update documents and the write through the store
//! - **`domain::timeline`**: the container holding committed items, the single
//!   drag session and in-flight saves
//!
//! The document store is reached only through [`ScheduleStore`].

pub mod domain;

pub use domain::models::{
    ItemId, ScheduleAnchor, ScheduleUpdate, ScheduleWindow, ScheduledItem, StoredBound,
    StoredItem,
};
pub use domain::ports::outbound::ScheduleStore;
pub use domain::{
    Conflict, ConflictKind, DragMode, DragSession, FormField, Notice, NoticeLevel,
    PendingCommit, ScheduleError, ScheduleForm, StoreError, Timeline,
};
