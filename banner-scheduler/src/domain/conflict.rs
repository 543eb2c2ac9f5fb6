//! Overlap detection between a candidate window and the scheduled banners.

use super::models::{ItemId, ScheduleWindow, ScheduledItem};
use super::MINUTES_PER_DAY;

/// How a candidate collides with another banner.
///
/// Only overlaps are reported; windows that merely touch are fine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    Overlap,
}

/// The first banner blocking a candidate window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub item_id: ItemId,
    pub title: String,
    pub window: ScheduleWindow,
    pub kind: ConflictKind,
}

/// Half-open overlap test, aware of windows that run past midnight.
///
/// A window ending at 01:00 the next day also occupies `[00:00, 01:00)`
/// of the timeline, so it is compared a second time shifted back one day.
pub fn windows_overlap(a: ScheduleWindow, b: ScheduleWindow) -> bool {
    let day = MINUTES_PER_DAY as i64;
    let a = (a.start as i64, a.end as i64);
    let b = (b.start as i64, b.end as i64);
    let overlaps = |x: (i64, i64), y: (i64, i64)| x.0 < y.1 && x.1 > y.0;

    overlaps(a, b) || overlaps((a.0 - day, a.1 - day), b) || overlaps(a, (b.0 - day, b.1 - day))
}

/// Find the first banner, in supplied order, that overlaps `window`.
///
/// The candidate itself (matched by id) is never reported.
pub fn find_conflict<'a, I>(
    candidate_id: &ItemId,
    window: ScheduleWindow,
    items: I,
) -> Option<Conflict>
where
    I: IntoIterator<Item = &'a ScheduledItem>,
{
    items
        .into_iter()
        .filter(|item| &item.id != candidate_id)
        .find(|item| windows_overlap(window, item.window))
        .map(|item| Conflict {
            item_id: item.id.clone(),
            title: item.title.clone(),
            window: item.window,
            kind: ConflictKind::Overlap,
        })
}
