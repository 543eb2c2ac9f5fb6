use crate::app::App;
use crate::ui;
use anyhow::Result;
use banner_scheduler::ScheduleStore;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::action_queue::channel;
use super::actions::run_action;
use super::views::{handle_view_key, handle_view_mouse};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
// The current-time indicator moves once a minute.
const CLOCK_INTERVAL: Duration = Duration::from_secs(60);

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: Arc<dyn ScheduleStore>,
) -> Result<()> {
    let mut last_clock_tick = Instant::now();

    let (action_tx, mut action_rx) = channel();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_view_key(key, app, &action_tx);
                }
                Event::Mouse(mouse) => {
                    handle_view_mouse(mouse, app, &action_tx);
                }
                _ => {}
            }
        }

        if last_clock_tick.elapsed() >= CLOCK_INTERVAL {
            app.refresh_clock();
            last_clock_tick = Instant::now();
        }

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, &store, &action_tx);
        }

        if !app.running {
            break;
        }
    }

    if app.timeline.has_pending() {
        tracing::warn!("exiting with saves still in flight");
    }

    Ok(())
}
