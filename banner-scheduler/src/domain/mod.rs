pub mod conflict;
pub mod convert;
pub mod drag;
mod error;
pub mod form;
pub mod models;
mod notice;
pub mod persistence;
pub mod ports;
pub mod timeline;

pub use conflict::{Conflict, ConflictKind};
pub use drag::{DragMode, DragSession};
pub use error::*;
pub use form::{FormField, ScheduleForm};
pub use notice::*;
pub use timeline::{PendingCommit, Timeline};

/// Minutes in one scheduling day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Grid every interval edge snaps to.
pub const SNAP_MINUTES: u32 = 15;

/// Shortest interval a banner may occupy.
pub const MIN_DURATION_MINUTES: u32 = SNAP_MINUTES;

/// Furthest an end may reach when a banner runs past midnight.
pub const MAX_NEXT_DAY_END: u32 = 2 * MINUTES_PER_DAY;
