use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime, Time, UtcOffset};

use super::ScheduleWindow;

/// The calendar day minute offsets are resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleAnchor {
    pub date: Date,
    pub offset: UtcOffset,
}

impl ScheduleAnchor {
    pub fn new(date: Date, offset: UtcOffset) -> Self {
        Self { date, offset }
    }

    /// Today in the local offset, falling back to UTC when the offset
    /// cannot be determined.
    pub fn today_local() -> Self {
        let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        let now = OffsetDateTime::now_utc().to_offset(offset);
        Self::new(now.date(), offset)
    }

    /// Midnight of the anchor day plus `minutes`.
    pub fn at(&self, minutes: u32) -> OffsetDateTime {
        OffsetDateTime::new_in_offset(self.date, Time::MIDNIGHT, self.offset)
            + Duration::minutes(minutes as i64)
    }
}

/// Fields written back to the banner document after a schedule change.
///
/// The hour fields are kept for older readers that predate minute
/// granularity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleUpdate {
    pub schedule_start_minutes: u32,
    pub schedule_end_minutes: u32,
    pub schedule_start_hour: u32,
    pub schedule_end_hour: u32,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
}

impl ScheduleUpdate {
    pub fn window(&self) -> ScheduleWindow {
        ScheduleWindow::new(self.schedule_start_minutes, self.schedule_end_minutes)
    }
}
