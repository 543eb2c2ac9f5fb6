use serde::{Deserialize, Serialize};

use super::ItemId;
use crate::domain::{MAX_NEXT_DAY_END, MINUTES_PER_DAY, MIN_DURATION_MINUTES, SNAP_MINUTES};

/// A half-open `[start, end)` interval in minutes since midnight.
///
/// `end` stays within one day unless the banner has been extended past
/// midnight, in which case it may reach into the following day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleWindow {
    pub start: u32,
    pub end: u32,
}

impl ScheduleWindow {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the window runs into the next calendar day.
    #[inline]
    pub fn is_next_day(&self) -> bool {
        self.end > MINUTES_PER_DAY
    }

    /// Latest end a gesture on this window may produce.
    pub fn end_bound(&self) -> u32 {
        if self.is_next_day() {
            MAX_NEXT_DAY_END
        } else {
            MINUTES_PER_DAY
        }
    }
}

/// A banner as the scheduler sees it after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledItem {
    pub id: ItemId,
    pub title: String,
    pub is_active: bool,
    pub window: ScheduleWindow,
}

impl ScheduledItem {
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>, start: u32, end: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            is_active: true,
            window: ScheduleWindow::new(start, end),
        }
    }

    #[inline]
    pub fn start(&self) -> u32 {
        self.window.start
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.window.end
    }

    #[inline]
    pub fn duration(&self) -> u32 {
        self.window.duration()
    }

    /// Normalize a stored document into a scheduled item.
    ///
    /// Returns `None` for documents that are not scheduled, or whose bounds
    /// do not describe a usable interval once snapped to the grid.
    pub fn from_stored(stored: &StoredItem) -> Option<Self> {
        if !stored.scheduled {
            return None;
        }

        let start = stored.start_bound().resolve(0);
        let end = stored.end_bound().resolve(MINUTES_PER_DAY);

        let start = snap_to_grid(start).max(0);
        let end = snap_to_grid(end).min(MAX_NEXT_DAY_END as i64);

        if start >= MINUTES_PER_DAY as i64 || end - start < MIN_DURATION_MINUTES as i64 {
            tracing::warn!(
                id = %stored.id,
                start,
                end,
                "skipping banner with unusable schedule"
            );
            return None;
        }

        Some(Self {
            id: stored.id.clone(),
            title: stored.title.clone(),
            is_active: stored.is_active,
            window: ScheduleWindow::new(start as u32, end as u32),
        })
    }
}

/// Normalize every scheduled document, keeping the supplied order.
pub fn normalize_items(stored: &[StoredItem]) -> Vec<ScheduledItem> {
    stored.iter().filter_map(ScheduledItem::from_stored).collect()
}

/// Round a minute value to the nearest grid line.
pub fn snap_to_grid(minutes: f64) -> i64 {
    let step = SNAP_MINUTES as f64;
    ((minutes / step).round() * step) as i64
}

/// A banner document exactly as the store returns it.
///
/// Older records carry only hour-granularity bounds; newer ones carry
/// minutes. Either may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredItem {
    pub id: ItemId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub scheduled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_start_minutes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_end_minutes: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_start_hour: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_end_hour: Option<f64>,
}

impl StoredItem {
    pub fn start_bound(&self) -> StoredBound {
        StoredBound::from_fields(self.schedule_start_minutes, self.schedule_start_hour)
    }

    pub fn end_bound(&self) -> StoredBound {
        StoredBound::from_fields(self.schedule_end_minutes, self.schedule_end_hour)
    }
}

/// One edge of a stored schedule, tagged by the representation it came in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StoredBound {
    Minutes(f64),
    Hour(f64),
    Missing,
}

impl StoredBound {
    /// Minutes take precedence over the legacy hour field.
    pub fn from_fields(minutes: Option<f64>, hour: Option<f64>) -> Self {
        match (minutes, hour) {
            (Some(m), _) => StoredBound::Minutes(m),
            (None, Some(h)) => StoredBound::Hour(h),
            (None, None) => StoredBound::Missing,
        }
    }

    pub fn resolve(self, default: u32) -> f64 {
        match self {
            StoredBound::Minutes(m) => m,
            StoredBound::Hour(h) => h * 60.0,
            StoredBound::Missing => default as f64,
        }
    }
}
