use super::utils::{centered_rect, time_input_display};
use super::*;
use banner_scheduler::FormField;

pub fn render_form_dialog(frame: &mut Frame, app: &App) {
    let Some(form) = &app.form else {
        return;
    };

    let area = centered_rect(58, 14, frame.area());

    let field_style = |field: FormField| {
        if form.focused_field == field {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        }
    };
    let label_style = |field: FormField| {
        if form.focused_field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            form.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Start: ", label_style(FormField::Start)),
            Span::styled(
                time_input_display(&form.start_input),
                field_style(FormField::Start),
            ),
        ]),
        Line::from(vec![
            Span::styled("End:   ", label_style(FormField::End)),
            Span::styled(
                time_input_display(&form.end_input),
                field_style(FormField::End),
            ),
        ]),
        Line::from(Span::styled(
            "End accepts 24:00, or + to run into the next day",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    if let Some(err) = &form.validation_error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(": Switch  "),
        Span::styled("Ctrl+X", Style::default().fg(Color::Yellow)),
        Span::raw(": Clear  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(": Save  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(": Cancel"),
    ]));

    render_popup(frame, area, lines, "Edit Schedule", Color::Yellow);
}
