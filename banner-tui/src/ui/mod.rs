use crate::app::App;
use banner_scheduler::domain::convert::{to_display_range, to_display_time};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
    Frame,
};

mod form_dialog;
mod help;
mod timeline_view;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &mut App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Min(0),    // Timeline
            Constraint::Length(1), // Conflict banner / status
            Constraint::Length(1), // Controls
        ])
        .split(frame.area());

    render_title(frame, root[0], app);
    timeline_view::render_timeline(frame, app, root[1]);
    render_status_line(frame, root[2], app);
    render_controls(frame, root[3]);

    if app.form.is_some() {
        form_dialog::render_form_dialog(frame, app);
    }
    if app.show_help {
        help::render_help(frame);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            " Banner Schedule ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("· now ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            to_display_time(app.now_minutes),
            Style::default().fg(Color::Yellow),
        ),
    ];

    if app.is_loading {
        spans.push(Span::styled(
            "  Loading…",
            Style::default().fg(Color::DarkGray),
        ));
    }
    if app.timeline.has_pending() {
        spans.push(Span::styled(
            "  Saving…",
            Style::default().fg(Color::Magenta),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    // A live conflict outranks everything else on this line.
    if let Some(conflict) = app.timeline.live_conflict() {
        let text = format!(
            " ⚠ Overlaps \"{}\" ({}). Releasing here keeps the old time.",
            conflict.title,
            to_display_range(conflict.window.start, conflict.window.end)
        );
        let line = Paragraph::new(text).style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(line, area);
        return;
    }

    if let Some(session) = app.timeline.drag() {
        let text = format!(
            " {}: {}",
            session.title,
            to_display_range(session.candidate.start, session.candidate.end)
        );
        frame.render_widget(
            Paragraph::new(text).style(Style::default().fg(Color::Magenta)),
            area,
        );
        return;
    }

    if let Some(message) = &app.status_message {
        let color = if app.status_is_error {
            Color::Red
        } else {
            Color::Green
        };
        frame.render_widget(
            Paragraph::new(format!(" {}", message)).style(Style::default().fg(color)),
            area,
        );
    }
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let line = Line::from(vec![
        key(" ↑↓"),
        Span::raw(": Select  "),
        key("Enter"),
        Span::raw(": Edit  "),
        key("x"),
        Span::raw(": Extend  "),
        key("[ ]"),
        Span::raw(": Scroll  "),
        key("."),
        Span::raw(": Now  "),
        key("r"),
        Span::raw(": Refresh  "),
        key("?"),
        Span::raw(": Help  "),
        key("q"),
        Span::raw(": Quit"),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

/// Bordered popup frame shared by the dialogs.
fn popup_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(color),
        ))
        .padding(Padding::horizontal(2))
}

fn render_popup(frame: &mut Frame, area: Rect, lines: Vec<Line<'_>>, title: &str, color: Color) {
    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(lines)
        .block(popup_block(title, color))
        .alignment(Alignment::Left);
    frame.render_widget(paragraph, area);
}
