use super::utils::centered_rect;
use super::*;

const LEGEND: &[(&str, &str)] = &[
    ("▐ left edge", "drag to change the start time"),
    ("▌ right edge", "drag to change the end time"),
    ("block body", "drag to move, keeping the duration"),
    ("Alt / Ctrl", "hold while grabbing to drag the start / end"),
];

const KEYS: &[(&str, &str)] = &[
    ("↑↓ / j k", "select banner"),
    ("Enter / e", "edit times"),
    ("x", "extend past midnight"),
    ("[ ] / ← →", "scroll one hour"),
    (".", "jump to now"),
    ("r", "reload from the store"),
    ("Esc", "cancel the current drag"),
    ("q", "quit"),
];

pub fn render_help(frame: &mut Frame) {
    let area = centered_rect(62, 20, frame.area());

    let row = |key: &'static str, text: &'static str| {
        Line::from(vec![
            Span::styled(format!("{:<14}", key), Style::default().fg(Color::Yellow)),
            Span::raw(text),
        ])
    };

    let mut lines = vec![Line::from("")];
    lines.extend(LEGEND.iter().map(|&(k, t)| row(k, t)));
    lines.push(Line::from(Span::styled(
        "Times snap to 15 minutes. Overlapping drops are refused.",
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(""));
    lines.extend(KEYS.iter().map(|&(k, t)| row(k, t)));

    render_popup(frame, area, lines, "Help", Color::Cyan);
}
