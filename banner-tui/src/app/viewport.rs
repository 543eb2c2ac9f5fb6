use banner_scheduler::domain::convert::{minutes_to_pixels, pixel_to_minutes};
use banner_scheduler::domain::MINUTES_PER_DAY;
use banner_scheduler::ScheduleWindow;

const HOURS_PER_DAY: u32 = 24;

/// Which slice of the day the track shows.
///
/// The whole day is `24 * cells_per_hour` cells wide; a cell is the
/// terminal's stand-in for a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub first_hour: u32,
    pub cells_per_hour: u16,
    pub visible_hours: u32,
}

impl Viewport {
    pub fn new(cells_per_hour: u16) -> Self {
        Self {
            first_hour: 0,
            cells_per_hour: cells_per_hour.max(1),
            visible_hours: HOURS_PER_DAY,
        }
    }

    pub fn total_cells(&self) -> u32 {
        HOURS_PER_DAY * self.cells_per_hour as u32
    }

    pub fn first_cell(&self) -> u32 {
        self.first_hour * self.cells_per_hour as u32
    }

    pub fn last_hour(&self) -> u32 {
        (self.first_hour + self.visible_hours).min(HOURS_PER_DAY)
    }

    /// Fit the viewport to a track `width` cells wide.
    pub fn set_width(&mut self, width: u16) {
        self.visible_hours = (width as u32 / self.cells_per_hour as u32).clamp(1, HOURS_PER_DAY);
        self.first_hour = self.first_hour.min(self.max_first_hour());
    }

    fn max_first_hour(&self) -> u32 {
        HOURS_PER_DAY - self.visible_hours
    }

    pub fn scroll(&mut self, hours: i32) {
        let first = (self.first_hour as i32 + hours).clamp(0, self.max_first_hour() as i32);
        self.first_hour = first as u32;
    }

    /// Scroll so `minutes` sits roughly in the middle of the track.
    pub fn center_on(&mut self, minutes: u32) {
        let hour = (minutes / 60).min(HOURS_PER_DAY - 1);
        let first = hour.saturating_sub(self.visible_hours / 2);
        self.first_hour = first.min(self.max_first_hour());
    }

    /// Absolute cell under track-relative `column`. May fall outside the
    /// day when the pointer leaves the track.
    pub fn absolute_cell(&self, column: i32) -> i32 {
        self.first_cell() as i32 + column
    }

    /// Snapped minute offset of the left edge of absolute cell `cell`.
    pub fn cell_to_minutes(&self, cell: i32) -> i32 {
        pixel_to_minutes(cell as f64, self.total_cells() as f64)
    }

    pub fn minutes_to_cell(&self, minutes: u32) -> f64 {
        minutes_to_pixels(minutes, self.total_cells() as f64)
    }

    /// Absolute cells `[start, end)` a window covers on the day, clipped at
    /// midnight.
    pub fn block_cells(&self, window: ScheduleWindow) -> (u32, u32) {
        let start = self.minutes_to_cell(window.start).floor() as u32;
        let end = self
            .minutes_to_cell(window.end.min(MINUTES_PER_DAY))
            .ceil() as u32;
        (start, end.max(start + 1))
    }

    /// Cells at the start of the day covered by the part of a window that
    /// runs past midnight.
    pub fn tail_cells(&self, window: ScheduleWindow) -> Option<(u32, u32)> {
        if !window.is_next_day() {
            return None;
        }
        let end = self.minutes_to_cell(window.end - MINUTES_PER_DAY).ceil() as u32;
        Some((0, end.max(1)))
    }
}

/// Screen geometry of the last rendered track, used for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackLayout {
    pub x: u16,
    pub width: u16,
    pub lanes_y: u16,
    pub lane_rows: u16,
}

impl TrackLayout {
    /// Track-relative column for a screen column.
    pub fn column(&self, screen_x: u16) -> i32 {
        screen_x as i32 - self.x as i32
    }

    pub fn contains_column(&self, screen_x: u16) -> bool {
        screen_x >= self.x && screen_x < self.x.saturating_add(self.width)
    }

    /// Visible lane index for a screen row.
    pub fn lane(&self, screen_y: u16) -> Option<usize> {
        if screen_y < self.lanes_y || screen_y >= self.lanes_y.saturating_add(self.lane_rows) {
            return None;
        }
        Some((screen_y - self.lanes_y) as usize)
    }
}
