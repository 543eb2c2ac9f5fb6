//! Manual start/end entry for a banner's schedule.
//!
//! The form holds raw text and only validates on submit. Checks run in a
//! fixed order and the first failure is reported: parse, order, duration,
//! then overlap with the other banners.

use super::conflict::find_conflict;
use super::convert::{parse_time_of_day, to_input_time};
use super::error::{ScheduleError, TimeField};
use super::models::{snap_to_grid, ItemId, ScheduleWindow, ScheduledItem};
use super::{MAX_NEXT_DAY_END, MINUTES_PER_DAY, MIN_DURATION_MINUTES};

/// Marks an end time that falls on the following day.
const NEXT_DAY_SUFFIX: &str = "+1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleForm {
    pub item_id: ItemId,
    pub title: String,
    pub start_input: String,
    pub end_input: String,
    pub focused_field: FormField,
    pub validation_error: Option<String>,
    original_start: String,
    original_end: String,
}

impl ScheduleForm {
    /// Pre-fill the form with `item`'s committed window.
    pub fn for_item(item: &ScheduledItem) -> Self {
        let start = to_input_time(item.start());
        let end = format_end(item.end());
        Self {
            item_id: item.id.clone(),
            title: item.title.clone(),
            start_input: start.clone(),
            end_input: end.clone(),
            focused_field: FormField::Start,
            validation_error: None,
            original_start: start,
            original_end: end,
        }
    }

    pub fn with_inputs(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_input = start.into();
        self.end_input = end.into();
        self
    }

    pub fn next_field(&mut self) {
        self.focused_field = match self.focused_field {
            FormField::Start => FormField::End,
            FormField::End => FormField::Start,
        };
        self.validation_error = None;
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focused_field {
            FormField::Start => &mut self.start_input,
            FormField::End => &mut self.end_input,
        }
    }

    /// Type a character into the focused field.
    ///
    /// Digits fill an `HH:MM` slot, inserting the colon automatically; a
    /// leading 3–9 is read as a single-digit hour. `+` on the end field
    /// toggles the next-day marker.
    pub fn input_char(&mut self, c: char) {
        if c == '+' {
            if self.focused_field == FormField::End {
                self.toggle_next_day();
            }
            return;
        }
        if !c.is_ascii_digit() {
            return;
        }

        let input = self.focused_input();
        if input.len() >= 5 {
            input.clear();
        }
        if input.is_empty() && ('3'..='9').contains(&c) {
            input.push('0');
            input.push(c);
            input.push(':');
        } else {
            input.push(c);
            if input.len() == 2 {
                input.push(':');
            }
        }
        self.validation_error = None;
    }

    pub fn backspace(&mut self) {
        let input = self.focused_input();
        if input.ends_with(NEXT_DAY_SUFFIX) {
            input.truncate(input.len() - NEXT_DAY_SUFFIX.len());
            return;
        }
        if input.ends_with(':') {
            input.pop();
        }
        input.pop();
        self.validation_error = None;
    }

    pub fn clear_field(&mut self) {
        self.focused_input().clear();
        self.validation_error = None;
    }

    /// Put both fields back to the committed window.
    pub fn reset(&mut self) {
        self.start_input = self.original_start.clone();
        self.end_input = self.original_end.clone();
        self.validation_error = None;
    }

    pub fn toggle_next_day(&mut self) {
        if let Some(stripped) = self.end_input.strip_suffix(NEXT_DAY_SUFFIX) {
            self.end_input = stripped.to_string();
        } else if !self.end_input.is_empty() {
            self.end_input.push_str(NEXT_DAY_SUFFIX);
        }
        self.validation_error = None;
    }

    /// Validate the inputs against the other banners.
    ///
    /// Returns the window to commit, snapped to the grid.
    pub fn validate<'a, I>(&self, items: I) -> Result<ScheduleWindow, ScheduleError>
    where
        I: IntoIterator<Item = &'a ScheduledItem>,
    {
        let start = parse_start(&self.start_input)?;
        let end = parse_end(&self.end_input)?;

        if end <= start {
            return Err(ScheduleError::EndNotAfterStart);
        }
        if end - start < MIN_DURATION_MINUTES {
            return Err(ScheduleError::TooShort {
                minimum: MIN_DURATION_MINUTES,
            });
        }

        let start = (snap_to_grid(start as f64) as u32).min(MINUTES_PER_DAY - MIN_DURATION_MINUTES);
        let end = (snap_to_grid(end as f64) as u32).min(MAX_NEXT_DAY_END);
        let window = ScheduleWindow::new(start, end.max(start + MIN_DURATION_MINUTES));

        if let Some(conflict) = find_conflict(&self.item_id, window, items) {
            return Err(ScheduleError::Conflict {
                title: conflict.title,
            });
        }

        Ok(window)
    }
}

fn format_end(end: u32) -> String {
    if end > MINUTES_PER_DAY {
        format!("{}{}", to_input_time(end - MINUTES_PER_DAY), NEXT_DAY_SUFFIX)
    } else {
        to_input_time(end)
    }
}

fn parse_start(input: &str) -> Result<u32, ScheduleError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ScheduleError::MissingTime(TimeField::Start));
    }
    match parse_time_of_day(trimmed) {
        Some(minutes) if minutes < MINUTES_PER_DAY => Ok(minutes),
        _ => Err(ScheduleError::InvalidTime {
            field: TimeField::Start,
            input: trimmed.to_string(),
        }),
    }
}

fn parse_end(input: &str) -> Result<u32, ScheduleError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ScheduleError::MissingTime(TimeField::End));
    }
    let invalid = || ScheduleError::InvalidTime {
        field: TimeField::End,
        input: trimmed.to_string(),
    };

    match trimmed.strip_suffix(NEXT_DAY_SUFFIX) {
        Some(clock) => match parse_time_of_day(clock) {
            Some(minutes) if minutes < MINUTES_PER_DAY => Ok(minutes + MINUTES_PER_DAY),
            _ => Err(invalid()),
        },
        None => parse_time_of_day(trimmed).ok_or_else(invalid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn happy_hour() -> ScheduledItem {
        ScheduledItem::new("a", "Happy Hour", 1020, 1080)
    }

    #[test]
    fn prefilled_from_committed_window() {
        let form = ScheduleForm::for_item(&happy_hour());
        assert_eq!(form.start_input, "17:00");
        assert_eq!(form.end_input, "18:00");

        let late = ScheduledItem::new("b", "Late", 1380, 1500);
        assert_eq!(ScheduleForm::for_item(&late).end_input, "01:00+1");
    }

    #[test]
    fn valid_submission_yields_window() {
        let items = vec![happy_hour()];
        let form = ScheduleForm::for_item(&items[0]).with_inputs("17:30", "18:30");
        assert_eq!(form.validate(&items), Ok(ScheduleWindow::new(1050, 1110)));
    }

    #[test]
    fn twelve_hour_input_is_accepted() {
        let items = vec![happy_hour()];
        let form = ScheduleForm::for_item(&items[0]).with_inputs("5:30 PM", "6:30 pm");
        assert_eq!(form.validate(&items), Ok(ScheduleWindow::new(1050, 1110)));
    }

    #[test]
    fn empty_field_is_required() {
        let items = vec![happy_hour()];
        let form = ScheduleForm::for_item(&items[0]).with_inputs("", "18:00");
        assert_eq!(
            form.validate(&items),
            Err(ScheduleError::MissingTime(TimeField::Start))
        );

        let form = ScheduleForm::for_item(&items[0]).with_inputs("17:00", "  ");
        assert_eq!(
            form.validate(&items),
            Err(ScheduleError::MissingTime(TimeField::End))
        );
    }

    #[test]
    fn malformed_time_is_rejected() {
        let items = vec![happy_hour()];
        let form = ScheduleForm::for_item(&items[0]).with_inputs("25:00", "18:00");
        assert!(matches!(
            form.validate(&items),
            Err(ScheduleError::InvalidTime {
                field: TimeField::Start,
                ..
            })
        ));

        let form = ScheduleForm::for_item(&items[0]).with_inputs("24:00", "24:00+1");
        assert!(matches!(
            form.validate(&items),
            Err(ScheduleError::InvalidTime {
                field: TimeField::Start,
                ..
            })
        ));
    }

    #[test]
    fn range_order_is_checked_before_duration() {
        let items = vec![happy_hour()];
        let form = ScheduleForm::for_item(&items[0]).with_inputs("18:00", "17:55");
        assert_eq!(form.validate(&items), Err(ScheduleError::EndNotAfterStart));

        let form = ScheduleForm::for_item(&items[0]).with_inputs("18:00", "18:00");
        assert_eq!(form.validate(&items), Err(ScheduleError::EndNotAfterStart));
    }

    #[test]
    fn short_window_fails_duration_check() {
        let items = vec![happy_hour()];
        let form = ScheduleForm::for_item(&items[0]).with_inputs("09:00", "09:10");
        assert_eq!(
            form.validate(&items),
            Err(ScheduleError::TooShort { minimum: 15 })
        );
    }

    #[test]
    fn duration_is_checked_before_conflicts() {
        let items = vec![happy_hour(), ScheduledItem::new("b", "Brunch", 600, 720)];
        let form = ScheduleForm::for_item(&items[0]).with_inputs("10:00", "10:05");
        assert_eq!(
            form.validate(&items),
            Err(ScheduleError::TooShort { minimum: 15 })
        );
    }

    #[test]
    fn conflict_names_blocking_banner() {
        let items = vec![happy_hour(), ScheduledItem::new("b", "Brunch", 600, 720)];
        let form = ScheduleForm::for_item(&items[0]).with_inputs("11:00", "12:30");
        assert_eq!(
            form.validate(&items),
            Err(ScheduleError::Conflict {
                title: "Brunch".to_string()
            })
        );
    }

    #[test]
    fn off_grid_times_snap_after_validation() {
        let items = vec![happy_hour()];
        let form = ScheduleForm::for_item(&items[0]).with_inputs("09:07", "09:22");
        assert_eq!(form.validate(&items), Ok(ScheduleWindow::new(540, 555)));
    }

    #[test]
    fn next_day_end() {
        let items = vec![happy_hour()];
        let form = ScheduleForm::for_item(&items[0]).with_inputs("23:00", "01:00+1");
        assert_eq!(form.validate(&items), Ok(ScheduleWindow::new(1380, 1500)));

        let form = ScheduleForm::for_item(&items[0]).with_inputs("22:00", "24:00");
        assert_eq!(form.validate(&items), Ok(ScheduleWindow::new(1320, 1440)));
    }

    #[test]
    fn digit_entry_inserts_colon() {
        let mut form = ScheduleForm::for_item(&happy_hour());
        form.clear_field();
        for c in "1730".chars() {
            form.input_char(c);
        }
        assert_eq!(form.start_input, "17:30");

        form.clear_field();
        form.input_char('9');
        form.input_char('1');
        form.input_char('5');
        assert_eq!(form.start_input, "09:15");

        // A full field starts over on the next digit.
        form.input_char('1');
        assert_eq!(form.start_input, "1");
    }

    #[test]
    fn backspace_removes_colon_with_digit() {
        let mut form = ScheduleForm::for_item(&happy_hour());
        form.start_input = "17:".to_string();
        form.backspace();
        assert_eq!(form.start_input, "1");
    }

    #[test]
    fn plus_toggles_next_day_on_end_field_only() {
        let mut form = ScheduleForm::for_item(&happy_hour());
        form.input_char('+');
        assert_eq!(form.start_input, "17:00");

        form.next_field();
        form.input_char('+');
        assert_eq!(form.end_input, "18:00+1");
        form.backspace();
        assert_eq!(form.end_input, "18:00");
        form.input_char('+');
        form.input_char('+');
        assert_eq!(form.end_input, "18:00");
    }

    #[test]
    fn reset_restores_committed_values() {
        let mut form = ScheduleForm::for_item(&happy_hour()).with_inputs("01:00", "");
        form.reset();
        assert_eq!(form.start_input, "17:00");
        assert_eq!(form.end_input, "18:00");
    }
}
