use crate::app::App;
use banner_scheduler::{DragMode, ScheduleError};
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_timeline_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Esc => {
            if app.timeline.cancel_drag() {
                app.set_status("Drag cancelled".to_string());
            } else {
                app.clear_status();
            }
        }
        // Only scrolling is allowed while a drag is in progress.
        KeyCode::Char('[') | KeyCode::Left | KeyCode::Char('h') => app.viewport.scroll(-1),
        KeyCode::Char(']') | KeyCode::Right | KeyCode::Char('l') => app.viewport.scroll(1),
        _ if app.timeline.is_dragging() => {}
        KeyCode::Char('.') => app.jump_to_now(),
        KeyCode::Up | KeyCode::Char('k') => app.focus_previous(),
        KeyCode::Down | KeyCode::Char('j') => app.focus_next(),
        KeyCode::Enter | KeyCode::Char('e') => app.open_form(),
        KeyCode::Char('x') => extend_focused(app, action_tx),
        KeyCode::Char('r') => {
            app.set_status("Refreshing banners…".to_string());
            enqueue_action(action_tx, Action::Refresh);
        }
        KeyCode::Char('?') => app.toggle_help(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}

fn extend_focused(app: &mut App, action_tx: &ActionTx) {
    let Some(id) = app.focused.clone() else {
        app.set_error("No banner selected".to_string());
        return;
    };
    let anchor = app.anchor();
    match app
        .timeline
        .extend_past_midnight(&id, app.extend_minutes, anchor)
    {
        Ok(commit) => enqueue_action(action_tx, Action::Persist(commit)),
        Err(e) => app.report_error(&e),
    }
    app.drain_notices();
}

pub(super) fn handle_timeline_mouse(mouse: MouseEvent, app: &mut App, action_tx: &ActionTx) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            pointer_down(app, mouse.column, mouse.row, mouse.modifiers)
        }
        MouseEventKind::Drag(MouseButton::Left) => pointer_move(app, mouse.column),
        MouseEventKind::Up(MouseButton::Left) => pointer_up(app, action_tx),
        MouseEventKind::ScrollLeft => app.viewport.scroll(-1),
        MouseEventKind::ScrollRight => app.viewport.scroll(1),
        MouseEventKind::ScrollUp if !app.timeline.is_dragging() => app.focus_previous(),
        MouseEventKind::ScrollDown if !app.timeline.is_dragging() => app.focus_next(),
        _ => {}
    }
}

/// Alt grabs the start edge and Ctrl the end edge wherever the block is
/// clicked, so blocks too narrow for handles can still be resized.
fn forced_edge(modifiers: KeyModifiers) -> Option<DragMode> {
    if modifiers.contains(KeyModifiers::ALT) {
        Some(DragMode::Start)
    } else if modifiers.contains(KeyModifiers::CONTROL) {
        Some(DragMode::End)
    } else {
        None
    }
}

fn pointer_down(app: &mut App, column: u16, row: u16, modifiers: KeyModifiers) {
    let Some(lane) = app.track.lane(row) else {
        return;
    };
    let Some(item) = app.item_on_lane(lane).cloned() else {
        return;
    };
    app.focused = Some(item.id.clone());

    let Some(hit) = app.block_hit(&item, column) else {
        return;
    };
    let mode = forced_edge(modifiers).unwrap_or(hit);
    let pointer = app.pointer_minutes(column, mode);
    if let Err(e) = app.timeline.begin_drag(&item.id, mode, Some(pointer)) {
        app.report_error(&e);
    }
}

fn pointer_move(app: &mut App, column: u16) {
    let Some(mode) = app.timeline.drag().map(|session| session.mode) else {
        return;
    };
    let pointer = app.pointer_minutes(column, mode);
    app.timeline.drag_to(pointer);
}

fn pointer_up(app: &mut App, action_tx: &ActionTx) {
    if !app.timeline.is_dragging() {
        return;
    }
    let anchor = app.anchor();
    match app.timeline.end_drag(anchor) {
        Ok(Some(commit)) => enqueue_action(action_tx, Action::Persist(commit)),
        Ok(None) => app.clear_status(),
        Err(ScheduleError::Conflict { .. }) => {}
        Err(e) => app.report_error(&e),
    }
    app.drain_notices();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::test_support::{app_with, column_of};
    use crate::app::Viewport;
    use banner_scheduler::{ItemId, ScheduleWindow, ScheduledItem};

    use super::super::super::action_queue::channel;

    const FIRST_LANE_ROW: u16 = 4;

    fn mouse(kind: MouseEventKind, cell: u16, lane: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column: column_of(cell),
            row: FIRST_LANE_ROW + lane,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn down(cell: u16, lane: u16) -> MouseEvent {
        mouse(MouseEventKind::Down(MouseButton::Left), cell, lane)
    }

    fn drag(cell: u16, lane: u16) -> MouseEvent {
        mouse(MouseEventKind::Drag(MouseButton::Left), cell, lane)
    }

    fn up(cell: u16, lane: u16) -> MouseEvent {
        mouse(MouseEventKind::Up(MouseButton::Left), cell, lane)
    }

    fn ctrl_down(cell: u16, lane: u16) -> MouseEvent {
        MouseEvent {
            modifiers: KeyModifiers::CONTROL,
            ..down(cell, lane)
        }
    }

    fn alt_down(cell: u16, lane: u16) -> MouseEvent {
        MouseEvent {
            modifiers: KeyModifiers::ALT,
            ..down(cell, lane)
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn two_banners() -> App {
        app_with(vec![
            ScheduledItem::new("1", "Breakfast", 0, 60),
            ScheduledItem::new("2", "Lunch", 120, 180),
        ])
    }

    #[test]
    fn dragging_start_into_neighbour_is_refused_without_save() {
        let mut app = two_banners();
        let (tx, mut rx) = channel();

        // Lunch covers cells 8..12; grab its left edge and pull to 00:30.
        handle_timeline_mouse(down(8, 1), &mut app, &tx);
        handle_timeline_mouse(drag(2, 1), &mut app, &tx);

        let lunch = app.timeline.items()[1].clone();
        assert_eq!(
            app.timeline.display_window(&lunch),
            ScheduleWindow::new(30, 180)
        );
        assert_eq!(app.timeline.live_conflict().unwrap().title, "Breakfast");

        handle_timeline_mouse(up(2, 1), &mut app, &tx);

        assert!(rx.try_recv().is_err());
        assert!(!app.timeline.is_dragging());
        assert_eq!(
            app.timeline.items()[1].window,
            ScheduleWindow::new(120, 180)
        );
        assert!(app.status_is_error);
        assert!(app
            .status_message
            .as_deref()
            .is_some_and(|m| m.contains("Breakfast")));
    }

    #[test]
    fn dragging_end_queues_save() {
        let mut app = two_banners();
        let (tx, mut rx) = channel();

        handle_timeline_mouse(down(11, 1), &mut app, &tx);
        handle_timeline_mouse(drag(15, 1), &mut app, &tx);
        handle_timeline_mouse(up(15, 1), &mut app, &tx);

        match rx.try_recv().ok() {
            Some(Action::Persist(commit)) => {
                assert_eq!(commit.item_id, ItemId::new("2"));
                assert_eq!(commit.window, ScheduleWindow::new(120, 240));
            }
            other => panic!("expected persist action, got {other:?}"),
        }
    }

    #[test]
    fn moving_body_keeps_duration_and_grab_point() {
        let mut app = two_banners();
        let (tx, mut rx) = channel();

        handle_timeline_mouse(down(9, 1), &mut app, &tx);
        handle_timeline_mouse(drag(41, 1), &mut app, &tx);

        let session = app.timeline.drag().unwrap();
        assert_eq!(session.mode, DragMode::Move);
        assert_eq!(session.candidate, ScheduleWindow::new(600, 660));

        handle_timeline_mouse(up(41, 1), &mut app, &tx);
        assert!(matches!(rx.try_recv(), Ok(Action::Persist(_))));
    }

    #[test]
    fn narrow_block_moves_on_plain_click() {
        let mut app = app_with(vec![ScheduledItem::new("1", "Flash Sale", 600, 630)]);
        let (tx, _rx) = channel();

        // 10:00-10:30 is two cells, 40 and 41.
        handle_timeline_mouse(down(41, 0), &mut app, &tx);
        handle_timeline_mouse(drag(49, 0), &mut app, &tx);

        let session = app.timeline.drag().unwrap();
        assert_eq!(session.mode, DragMode::Move);
        assert_eq!(session.candidate, ScheduleWindow::new(720, 750));
    }

    #[test]
    fn modifiers_grab_edges_of_narrow_block() {
        let mut app = app_with(vec![ScheduledItem::new("1", "Flash Sale", 600, 630)]);
        let (tx, mut rx) = channel();

        handle_timeline_mouse(ctrl_down(40, 0), &mut app, &tx);
        assert_eq!(app.timeline.drag().unwrap().mode, DragMode::End);
        handle_timeline_mouse(drag(43, 0), &mut app, &tx);
        handle_timeline_mouse(up(43, 0), &mut app, &tx);

        match rx.try_recv().ok() {
            Some(Action::Persist(commit)) => {
                assert_eq!(commit.window, ScheduleWindow::new(600, 660));
            }
            other => panic!("expected persist action, got {other:?}"),
        }

        let mut app = app_with(vec![ScheduledItem::new("1", "Flash Sale", 600, 630)]);
        handle_timeline_mouse(alt_down(41, 0), &mut app, &tx);
        assert_eq!(app.timeline.drag().unwrap().mode, DragMode::Start);
    }

    #[test]
    fn single_cell_block_at_hour_zoom_can_move() {
        let mut app = app_with(vec![ScheduledItem::new("1", "Promo", 600, 660)]);
        app.viewport = Viewport::new(1);
        app.fit_track(24);
        let (tx, _rx) = channel();

        handle_timeline_mouse(down(10, 0), &mut app, &tx);
        handle_timeline_mouse(drag(12, 0), &mut app, &tx);

        let session = app.timeline.drag().unwrap();
        assert_eq!(session.mode, DragMode::Move);
        assert_eq!(session.candidate, ScheduleWindow::new(720, 780));
    }

    #[test]
    fn click_without_movement_only_focuses() {
        let mut app = two_banners();
        let (tx, mut rx) = channel();

        handle_timeline_mouse(down(10, 1), &mut app, &tx);
        handle_timeline_mouse(up(10, 1), &mut app, &tx);

        assert_eq!(app.focused, Some(ItemId::new("2")));
        assert!(rx.try_recv().is_err());
        assert!(!app.timeline.has_pending());
    }

    #[test]
    fn click_on_empty_track_focuses_lane() {
        let mut app = two_banners();
        let (tx, _rx) = channel();

        handle_timeline_mouse(down(50, 1), &mut app, &tx);

        assert_eq!(app.focused, Some(ItemId::new("2")));
        assert!(!app.timeline.is_dragging());
    }

    #[test]
    fn escape_cancels_drag() {
        let mut app = two_banners();
        let (tx, mut rx) = channel();

        handle_timeline_mouse(down(9, 1), &mut app, &tx);
        handle_timeline_mouse(drag(60, 1), &mut app, &tx);
        handle_timeline_key(key(KeyCode::Esc), &mut app, &tx);
        handle_timeline_mouse(up(60, 1), &mut app, &tx);

        assert!(rx.try_recv().is_err());
        assert_eq!(
            app.timeline.items()[1].window,
            ScheduleWindow::new(120, 180)
        );
    }

    #[test]
    fn pending_banner_cannot_be_grabbed() {
        let mut app = two_banners();
        let (tx, _rx) = channel();
        let anchor = app.anchor();
        app.timeline
            .begin_commit(&ItemId::new("2"), ScheduleWindow::new(120, 240), anchor)
            .unwrap();

        handle_timeline_mouse(down(10, 1), &mut app, &tx);

        assert!(!app.timeline.is_dragging());
        assert_eq!(
            app.status_message.as_deref(),
            Some("\"Lunch\" is still saving")
        );
    }

    #[test]
    fn extend_key_runs_focused_banner_past_midnight() {
        let mut app = app_with(vec![ScheduledItem::new("late", "Late Night", 1320, 1440)]);
        let (tx, mut rx) = channel();

        handle_timeline_key(key(KeyCode::Char('x')), &mut app, &tx);

        match rx.try_recv().ok() {
            Some(Action::Persist(commit)) => {
                assert_eq!(commit.window, ScheduleWindow::new(1320, 1500));
            }
            other => panic!("expected persist action, got {other:?}"),
        }
    }

    #[test]
    fn refresh_key_queues_reload() {
        let mut app = two_banners();
        let (tx, mut rx) = channel();

        handle_timeline_key(key(KeyCode::Char('r')), &mut app, &tx);

        assert!(matches!(rx.try_recv(), Ok(Action::Refresh)));
    }
}
