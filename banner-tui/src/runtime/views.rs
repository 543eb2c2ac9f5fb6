use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use super::action_queue::{Action, ActionTx};

mod form;
mod timeline;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_view_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    if app.form.is_some() {
        form::handle_form_key(key, app, action_tx);
    } else if app.show_help {
        handle_help_key(key, app);
    } else {
        timeline::handle_timeline_key(key, app, action_tx);
    }
}

pub(super) fn handle_view_mouse(mouse: MouseEvent, app: &mut App, action_tx: &ActionTx) {
    // Overlays swallow the pointer.
    if app.form.is_some() || app.show_help {
        return;
    }
    timeline::handle_timeline_mouse(mouse, app, action_tx);
}

fn handle_help_key(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter => app.toggle_help(),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}
