use super::utils::fit;
use super::*;
use crate::app::{TrackLayout, Viewport};
use banner_scheduler::domain::convert::hour_label;
use banner_scheduler::{ScheduleWindow, ScheduledItem};

const LABEL_WIDTH: u16 = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    HourTick,
    Now,
    StartHandle,
    Body,
    EndHandle,
    /// Part of a window that ran past midnight, drawn at the start of the day.
    Tail,
}

pub fn render_timeline(frame: &mut Frame, app: &mut App, body: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(Span::styled(
            format!(" Timeline ({} banners) ", app.timeline.items().len()),
            Style::default().fg(Color::White),
        ))
        .padding(Padding::horizontal(1));
    let inner = block.inner(body);
    frame.render_widget(block, body);

    if inner.height < 2 || inner.width < 8 {
        return;
    }

    let label_width = LABEL_WIDTH.min(inner.width / 3);
    let track_x = inner.x + label_width;
    let track_width = inner.width - label_width;
    let lane_rows = inner.height - 1;

    app.fit_track(track_width);
    app.track = TrackLayout {
        x: track_x,
        width: track_width,
        lanes_y: inner.y + 1,
        lane_rows,
    };
    app.ensure_focus_visible(lane_rows as usize);

    let header_area = Rect::new(track_x, inner.y, track_width, 1);
    frame.render_widget(
        Paragraph::new(header_line(&app.viewport, app.now_minutes, track_width)),
        header_area,
    );

    if app.timeline.items().is_empty() {
        let lanes_area = Rect::new(inner.x, inner.y + 1, inner.width, lane_rows);
        let message = if app.is_loading {
            "Loading banners…"
        } else {
            "No scheduled banners"
        };
        frame.render_widget(
            Paragraph::new(message)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            lanes_area,
        );
        return;
    }

    let now_cell = app.viewport.minutes_to_cell(app.now_minutes).floor() as u32;
    for lane in 0..lane_rows {
        let Some(item) = app.item_on_lane(lane as usize) else {
            break;
        };
        let y = inner.y + 1 + lane;

        frame.render_widget(
            Paragraph::new(label_line(app, item, label_width as usize)),
            Rect::new(inner.x, y, label_width, 1),
        );

        let window = app.timeline.display_window(item);
        let cells = lane_cells(&app.viewport, window, now_cell, track_width);
        frame.render_widget(
            Paragraph::new(lane_line(&cells, block_style(app, item), window)),
            Rect::new(track_x, y, track_width, 1),
        );
    }
}

/// Hour labels along the top of the track, widened to every few hours
/// when a single hour is too narrow for its label.
fn header_line(viewport: &Viewport, now_minutes: u32, width: u16) -> Line<'static> {
    let cph = viewport.cells_per_hour as u32;
    let step = label_step(cph);
    let now_hour = now_minutes / 60;
    let mut spans = Vec::new();
    let mut used = 0u32;
    let mut hour = viewport.first_hour;

    while hour < viewport.last_hour() && used < width as u32 {
        let room = (width as u32 - used) as usize;
        if hour % step == 0 {
            let span_cells = ((step * cph) as usize).min(room);
            let style = if (hour..hour + step).contains(&now_hour) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(
                fit(&format!("│{}", hour_label(hour)), span_cells),
                style,
            ));
            used += span_cells as u32;
            hour += step;
        } else {
            let span_cells = (cph as usize).min(room);
            spans.push(Span::raw(" ".repeat(span_cells)));
            used += span_cells as u32;
            hour += 1;
        }
    }

    Line::from(spans)
}

/// Hours between header labels. A label such as `│12 AM` needs six cells.
fn label_step(cells_per_hour: u32) -> u32 {
    let step = 6u32.div_ceil(cells_per_hour.max(1));
    // Keep labels on hours that divide the day evenly.
    match step {
        0 | 1 => 1,
        2 => 2,
        3 => 3,
        4 => 4,
        _ => 6,
    }
}

fn lane_cells(viewport: &Viewport, window: ScheduleWindow, now_cell: u32, width: u16) -> Vec<Cell> {
    let (start, end) = viewport.block_cells(window);
    let tail = viewport.tail_cells(window);
    let cph = viewport.cells_per_hour as u32;
    let total = viewport.total_cells();

    (0..width as u32)
        .map(|column| {
            let cell = viewport.first_cell() + column;
            if cell >= total {
                Cell::Empty
            } else if cell == start {
                Cell::StartHandle
            } else if cell + 1 == end {
                Cell::EndHandle
            } else if (start..end).contains(&cell) {
                Cell::Body
            } else if tail.is_some_and(|(s, e)| (s..e).contains(&cell)) {
                Cell::Tail
            } else if cell == now_cell {
                Cell::Now
            } else if cell % cph == 0 {
                Cell::HourTick
            } else {
                Cell::Empty
            }
        })
        .collect()
}

fn block_style(app: &App, item: &ScheduledItem) -> Style {
    let dragging = app
        .timeline
        .drag()
        .is_some_and(|session| session.item_id == item.id);
    let focused = app.focused.as_ref() == Some(&item.id);

    let bg = if dragging && app.timeline.live_conflict().is_some() {
        Color::Red
    } else if dragging {
        Color::Magenta
    } else if app.timeline.is_pending(&item.id) {
        Color::DarkGray
    } else if focused {
        Color::Yellow
    } else if !item.is_active {
        Color::Blue
    } else {
        Color::Cyan
    };

    let style = Style::default().fg(Color::Black).bg(bg);
    if focused {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// One lane of the track. Consecutive cells with the same look share a
/// span; the time range is written into the block when it fits.
fn lane_line(cells: &[Cell], block: Style, window: ScheduleWindow) -> Line<'static> {
    let mut chars: Vec<(char, Style)> = cells
        .iter()
        .map(|cell| match cell {
            Cell::Empty => (' ', Style::default()),
            Cell::HourTick => ('·', Style::default().fg(Color::DarkGray)),
            Cell::Now => ('│', Style::default().fg(Color::Red)),
            Cell::StartHandle => ('▐', block),
            Cell::Body => (' ', block),
            Cell::EndHandle => ('▌', block),
            Cell::Tail => ('»', Style::default().fg(block.bg.unwrap_or(Color::Cyan))),
        })
        .collect();

    let body: Vec<usize> = cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| **cell == Cell::Body)
        .map(|(i, _)| i)
        .collect();
    let text = to_display_range(window.start, window.end);
    if let Some(&first) = body.first() {
        if body.len() >= text.chars().count() {
            for (offset, c) in text.chars().enumerate() {
                chars[first + offset].0 = c;
            }
        }
    }

    let mut spans = Vec::new();
    let mut run = String::new();
    let mut run_style: Option<Style> = None;
    for (c, style) in chars {
        if run_style.is_some_and(|s| s != style) {
            spans.push(Span::styled(std::mem::take(&mut run), run_style.unwrap_or_default()));
        }
        run.push(c);
        run_style = Some(style);
    }
    if let Some(style) = run_style {
        spans.push(Span::styled(run, style));
    }
    Line::from(spans)
}

fn label_line(app: &App, item: &ScheduledItem, width: usize) -> Line<'static> {
    let focused = app.focused.as_ref() == Some(&item.id);
    let marker = if focused { "▸ " } else { "  " };
    let suffix = if app.timeline.is_pending(&item.id) {
        " …"
    } else {
        ""
    };

    let style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if !item.is_active {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };

    let label = format!("{}{}{}", marker, item.title, suffix);
    Line::from(Span::styled(fit(&label, width.saturating_sub(1)), style))
}
