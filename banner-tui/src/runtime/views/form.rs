use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let Some(form) = app.form.as_mut() else {
        return;
    };

    match key.code {
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            form.next_field();
        }
        KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.clear_field();
        }
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.reset();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.input_char(c);
        }
        KeyCode::Backspace => {
            form.backspace();
        }
        KeyCode::Enter => {
            submit_form(app, action_tx);
        }
        KeyCode::Esc => {
            app.close_form();
            app.set_status("Edit cancelled".to_string());
        }
        _ => {}
    }
}

/// Validate and apply the form. On failure the dialog stays open with the
/// message; nothing reaches the store.
fn submit_form(app: &mut App, action_tx: &ActionTx) {
    let Some(mut form) = app.form.take() else {
        return;
    };
    let anchor = app.anchor();

    match app.timeline.submit_form(&mut form, anchor) {
        Ok(commit) => {
            enqueue_action(action_tx, Action::Persist(commit));
        }
        Err(e) => {
            tracing::debug!(id = %form.item_id, "form rejected: {}", e);
            app.form = Some(form);
        }
    }
}
