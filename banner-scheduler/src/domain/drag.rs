//! Pointer-driven resize and move of a single banner.
//!
//! A session exists from pointer-down to pointer-up. It remembers the
//! committed window it started from (the baseline) and produces a candidate
//! window for every pointer position, snapped to the grid and clamped to the
//! day. Overlap checks and persistence are the container's concern.

use super::conflict::Conflict;
use super::models::{ItemId, ScheduleWindow, ScheduledItem};
use super::{MINUTES_PER_DAY, MIN_DURATION_MINUTES};

/// Which part of a block the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Left edge: moves the start, end fixed.
    Start,
    /// Right edge: moves the end, start fixed.
    End,
    /// Body: shifts the whole window, duration fixed.
    Move,
}

impl DragMode {
    /// Hit-test a pointer `offset` inside a block `block_width` wide.
    ///
    /// The outer `edge_width` on each side are the resize handles. A block
    /// too narrow to fit both handles and a body is all body.
    pub fn from_hotzone(offset: f64, block_width: f64, edge_width: f64) -> DragMode {
        if block_width <= edge_width * 2.0 {
            return DragMode::Move;
        }
        if offset < edge_width {
            DragMode::Start
        } else if offset >= block_width - edge_width {
            DragMode::End
        } else {
            DragMode::Move
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub item_id: ItemId,
    pub title: String,
    pub mode: DragMode,
    pub baseline: ScheduleWindow,
    pub candidate: ScheduleWindow,
    /// Live overlap feedback for the current candidate.
    pub conflict: Option<Conflict>,
    /// Distance from the window start to where the body was grabbed.
    grab_offset: i64,
}

impl DragSession {
    /// Start a session on `item`'s committed window.
    ///
    /// `pointer_minutes` is where the pointer went down; in move mode the
    /// window keeps that distance to the pointer while dragging.
    pub fn begin(item: &ScheduledItem, mode: DragMode, pointer_minutes: Option<i32>) -> Self {
        let baseline = item.window;
        let grab_offset = match (mode, pointer_minutes) {
            (DragMode::Move, Some(pointer)) => {
                (pointer as i64 - baseline.start as i64).clamp(0, baseline.duration() as i64)
            }
            _ => 0,
        };

        Self {
            item_id: item.id.clone(),
            title: item.title.clone(),
            mode,
            baseline,
            candidate: baseline,
            conflict: None,
            grab_offset,
        }
    }

    /// Recompute the candidate for a pointer at `pointer_minutes`.
    pub fn update(&mut self, pointer_minutes: i32) -> ScheduleWindow {
        let baseline = self.baseline;
        let bound = baseline.end_bound() as i64;
        let pointer = (pointer_minutes as i64).clamp(0, bound);
        let last_start = (MINUTES_PER_DAY - MIN_DURATION_MINUTES) as i64;
        let min = MIN_DURATION_MINUTES as i64;

        self.candidate = match self.mode {
            DragMode::Start => {
                let start = pointer.min(baseline.end as i64 - min).min(last_start);
                ScheduleWindow::new(start as u32, baseline.end)
            }
            DragMode::End => {
                let end = pointer.max(baseline.start as i64 + min).min(bound);
                ScheduleWindow::new(baseline.start, end as u32)
            }
            DragMode::Move => {
                let duration = baseline.duration() as i64;
                let start = (pointer - self.grab_offset)
                    .clamp(0, bound - duration)
                    .min(last_start);
                ScheduleWindow::new(start as u32, (start + duration) as u32)
            }
        };
        self.candidate
    }

    /// Whether the candidate differs from where the gesture started.
    pub fn is_changed(&self) -> bool {
        self.candidate != self.baseline
    }
}
