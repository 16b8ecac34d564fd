//! Clamping rules for a date edited one numeric field at a time.

use chrono::{Datelike, NaiveDate};

use crate::calendar::{clamped_date, days_in_month};
use crate::types::PickerField;
use crate::years::YearWindow;

/// A (year, month, day) value that stays a valid date inside its year window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFields {
    date: NaiveDate,
    years: YearWindow,
}

impl DateFields {
    pub fn new(date: NaiveDate, years: YearWindow) -> Self {
        let mut fields = DateFields { date, years };
        fields.set_year(date.year() as i64);
        fields
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn years(&self) -> &YearWindow {
        &self.years
    }

    /// Replace the whole value, clamping its year into the window.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
        self.set_year(date.year() as i64);
    }

    /// Set the year, clamped into the window; the day drops to Feb 28 if needed.
    pub fn set_year(&mut self, year: i64) {
        let clamped = year.clamp(self.years.min() as i64, self.years.max() as i64) as i32;
        if clamped as i64 != year {
            log::debug!("year {} clamped to {}", year, clamped);
        }
        self.rebuild(clamped, self.date.month(), self.date.day());
    }

    /// Set the month, clamped to 1-12; the day drops to the month's last day if needed.
    pub fn set_month(&mut self, month: i64) {
        let clamped = month.clamp(1, 12) as u32;
        if clamped as i64 != month {
            log::debug!("month {} clamped to {}", month, clamped);
        }
        self.rebuild(self.date.year(), clamped, self.date.day());
    }

    /// Set the day, clamped to the current month's length.
    pub fn set_day(&mut self, day: i64) {
        let last = days_in_month(self.date.year(), self.date.month());
        let clamped = day.clamp(1, last as i64) as u32;
        if clamped as i64 != day {
            log::debug!("day {} clamped to {}", day, clamped);
        }
        self.rebuild(self.date.year(), self.date.month(), clamped);
    }

    /// Apply raw text typed into `field`.
    ///
    /// Empty or non-numeric text is ignored. Returns whether the date changed.
    pub fn apply_text(&mut self, field: PickerField, text: &str) -> bool {
        let Some(value) = parse_leading_int(text) else {
            return false;
        };
        let before = self.date;
        match field {
            PickerField::Year => self.set_year(value),
            PickerField::Month => self.set_month(value),
            PickerField::Day => self.set_day(value),
            PickerField::Button => {}
        }
        self.date != before
    }

    /// Display text for `field`: two-digit month and day, plain year.
    pub fn text(&self, field: PickerField) -> String {
        match field {
            PickerField::Year => self.date.year().to_string(),
            PickerField::Month => zero_pad(self.date.month(), 2),
            PickerField::Day => zero_pad(self.date.day(), 2),
            PickerField::Button => String::new(),
        }
    }

    fn rebuild(&mut self, year: i32, month: u32, day: u32) {
        if let Some(date) = clamped_date(year, month, day) {
            self.date = date;
        }
    }
}

/// Parse the integer at the start of `text`, ignoring surrounding whitespace
/// and any trailing garbage (`"12abc"` is 12).
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Saturate absurdly long inputs; they clamp to a bound anyway
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Left-pad `number` with zeros to `width` digits.
pub fn zero_pad(number: u32, width: usize) -> String {
    format!("{:0width$}", number, width = width)
}
