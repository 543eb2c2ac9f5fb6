use banner_scheduler::{
    DragMode, ItemId, Notice, ScheduleAnchor, ScheduleError, ScheduleForm, ScheduledItem,
    StoredItem, Timeline,
};
use time::{OffsetDateTime, UtcOffset};

use crate::config::BannerConfig;

mod viewport;

pub use viewport::{TrackLayout, Viewport};

/// Width of the resize handle at each end of a block, in cells.
const HANDLE_CELLS: f64 = 1.0;

pub struct App {
    pub running: bool,
    pub is_loading: bool,
    pub timeline: Timeline,
    pub viewport: Viewport,
    /// Center on the current time once the track width is known.
    pub center_on_render: bool,
    /// Geometry of the last rendered track.
    pub track: TrackLayout,
    pub focused: Option<ItemId>,
    pub lane_offset: usize,
    pub form: Option<ScheduleForm>,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub status_is_error: bool,
    pub now_minutes: u32,
    pub extend_minutes: u32,
}

impl App {
    pub fn new(config: &BannerConfig) -> Self {
        Self {
            running: true,
            is_loading: false,
            timeline: Timeline::default(),
            viewport: Viewport::new(config.cells_per_hour),
            center_on_render: true,
            track: TrackLayout::default(),
            focused: None,
            lane_offset: 0,
            form: None,
            show_help: false,
            status_message: None,
            status_is_error: false,
            now_minutes: local_now_minutes(),
            extend_minutes: config.extend_minutes,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_is_error = false;
    }

    pub fn set_error(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_is_error = true;
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.status_is_error = false;
    }

    /// Show a refused gesture on the status line.
    pub fn report_error(&mut self, error: &ScheduleError) {
        tracing::debug!("gesture refused: {}", error);
        self.set_error(error.to_string());
    }

    /// Move notices raised by the timeline onto the status line. The most
    /// recent one wins.
    pub fn drain_notices(&mut self) {
        for notice in self.timeline.take_notices() {
            self.show_notice(notice);
        }
    }

    fn show_notice(&mut self, notice: Notice) {
        if notice.is_error() {
            tracing::warn!("{}", notice);
            self.set_error(notice.to_string());
        } else {
            tracing::info!("{}", notice);
            self.set_status(notice.to_string());
        }
    }

    /// The day minute offsets are saved against.
    pub fn anchor(&self) -> ScheduleAnchor {
        ScheduleAnchor::today_local()
    }

    pub fn refresh_clock(&mut self) {
        self.now_minutes = local_now_minutes();
    }

    /// Take a fresh read of the store, keeping focus where it was.
    pub fn load_items(&mut self, docs: &[StoredItem]) {
        self.timeline.replace_items(docs);
        let focus_gone = self
            .focused
            .as_ref()
            .is_none_or(|id| self.timeline.item(id).is_none());
        if focus_gone {
            self.focused = self.timeline.items().first().map(|item| item.id.clone());
        }
        if let Some(form) = &self.form {
            if self.timeline.item(&form.item_id).is_none() {
                self.form = None;
            }
        }
        self.lane_offset = self
            .lane_offset
            .min(self.timeline.items().len().saturating_sub(1));
    }

    pub fn focused_index(&self) -> Option<usize> {
        let id = self.focused.as_ref()?;
        self.timeline.items().iter().position(|item| &item.id == id)
    }

    pub fn focused_item(&self) -> Option<&ScheduledItem> {
        self.focused.as_ref().and_then(|id| self.timeline.item(id))
    }

    fn focus_index(&mut self, index: usize) {
        self.focused = self.timeline.items().get(index).map(|item| item.id.clone());
    }

    pub fn focus_next(&mut self) {
        let len = self.timeline.items().len();
        if len == 0 {
            return;
        }
        let next = match self.focused_index() {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.focus_index(next);
    }

    pub fn focus_previous(&mut self) {
        let prev = self.focused_index().map(|i| i.saturating_sub(1)).unwrap_or(0);
        self.focus_index(prev);
    }

    /// Scroll lanes so the focused banner is on screen.
    pub fn ensure_focus_visible(&mut self, lane_rows: usize) {
        let Some(index) = self.focused_index() else {
            return;
        };
        if lane_rows == 0 {
            return;
        }
        if index < self.lane_offset {
            self.lane_offset = index;
        } else if index >= self.lane_offset + lane_rows {
            self.lane_offset = index + 1 - lane_rows;
        }
    }

    /// Banner drawn on visible lane `lane`.
    pub fn item_on_lane(&self, lane: usize) -> Option<&ScheduledItem> {
        self.timeline.items().get(self.lane_offset + lane)
    }

    pub fn open_form(&mut self) {
        let Some(item) = self.focused_item() else {
            self.set_error("No banner selected".to_string());
            return;
        };
        if self.timeline.is_pending(&item.id) {
            let error = ScheduleError::SavePending {
                title: item.title.clone(),
            };
            self.report_error(&error);
            return;
        }
        let form = ScheduleForm::for_item(item);
        self.form = Some(form);
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn jump_to_now(&mut self) {
        self.viewport.center_on(self.now_minutes);
    }

    /// Fit the viewport to the rendered track width.
    pub fn fit_track(&mut self, width: u16) {
        self.viewport.set_width(width);
        if self.center_on_render {
            self.center_on_render = false;
            self.jump_to_now();
        }
    }

    /// Minute offset for a pointer at `screen_x`.
    ///
    /// A cell stands for a span of time; the end handle reads the cell's
    /// right edge so releasing on a cell includes it.
    pub fn pointer_minutes(&self, screen_x: u16, mode: DragMode) -> i32 {
        let mut cell = self.viewport.absolute_cell(self.track.column(screen_x));
        if mode == DragMode::End {
            cell += 1;
        }
        self.viewport.cell_to_minutes(cell)
    }

    /// Hit-test a pointer on `item`'s block. `None` when the pointer is
    /// outside the block. Blocks of two cells or fewer are all body.
    pub fn block_hit(&self, item: &ScheduledItem, screen_x: u16) -> Option<DragMode> {
        if !self.track.contains_column(screen_x) {
            return None;
        }
        let cell = self.viewport.absolute_cell(self.track.column(screen_x));
        let (start, end) = self.viewport.block_cells(self.timeline.display_window(item));
        if cell < start as i32 || cell >= end as i32 {
            return None;
        }
        let offset = (cell - start as i32) as f64;
        Some(DragMode::from_hotzone(
            offset,
            (end - start) as f64,
            HANDLE_CELLS,
        ))
    }
}

fn local_now_minutes() -> u32 {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let now = OffsetDateTime::now_utc().to_offset(offset);
    now.hour() as u32 * 60 + now.minute() as u32
}
