//! Calendar and date picker controllers.
//!
//! Both keep their current date as explicit state and report every committed
//! date to the caller; neither touches any global.

use std::time::{Duration, Instant};

use chrono::{Datelike, NaiveDate};

use crate::calendar::{clamped_date, shift_months, with_month_clamped};
use crate::debounce::Debouncer;
use crate::fields::DateFields;
use crate::navigation::{move_field_focus, move_focus};
use crate::types::{
    CalContext, DEBOUNCE_DELAY_MS, GridPos, MonthGrid, NavKey, PICKER_YEAR_RANGE, PickerField,
    WeekStart,
};
use crate::years::YearWindow;

/// Month calendar with month/year navigation and day selection.
///
/// `on_change` is called with the new date after every committed change.
pub struct Calendar<F: FnMut(NaiveDate)> {
    date: NaiveDate,
    years: YearWindow,
    week_start: WeekStart,
    on_change: F,
}

impl<F: FnMut(NaiveDate)> Calendar<F> {
    /// Calendar showing `date`, limited to the context's year window.
    pub fn new(ctx: &CalContext, date: NaiveDate, on_change: F) -> Self {
        Calendar::with_years(date, YearWindow::from(ctx), ctx.week_start, on_change)
    }

    pub fn with_years(
        date: NaiveDate,
        years: YearWindow,
        week_start: WeekStart,
        on_change: F,
    ) -> Self {
        Calendar {
            date,
            years,
            week_start,
            on_change,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn years(&self) -> &YearWindow {
        &self.years
    }

    /// Grid for the displayed month with the current date selected.
    pub fn grid(&self) -> MonthGrid {
        MonthGrid::new(self.date, self.date, self.week_start)
    }

    /// Position that should hold keyboard focus: the selected cell.
    pub fn focus(&self) -> Option<GridPos> {
        self.grid().selected_pos()
    }

    pub fn prev_month(&mut self) {
        self.step_month(-1);
    }

    pub fn next_month(&mut self) {
        self.step_month(1);
    }

    /// Jump to `month` (clamped to 1-12) of the current year.
    pub fn set_month(&mut self, month: u32) {
        self.commit(with_month_clamped(self.date, month));
    }

    pub fn prev_year(&mut self) {
        self.commit_year(self.years.prev_year(self.date.year()));
    }

    pub fn next_year(&mut self) {
        self.commit_year(self.years.next_year(self.date.year()));
    }

    /// Jump to `year`, clamped into the year window.
    pub fn set_year(&mut self, year: i32) {
        self.commit_year(self.years.clamp(year));
    }

    /// Select `date` as if its cell was clicked.
    ///
    /// Dates outside the year window are ignored. Returns whether the date was taken.
    pub fn activate(&mut self, date: NaiveDate) -> bool {
        if !self.years.contains(date.year()) {
            log::debug!("ignoring {}: outside {}..={}", date, self.years.min(), self.years.max());
            return false;
        }
        self.commit(date);
        true
    }

    /// Handle a key pressed while the cell at `pos` has focus.
    ///
    /// Returns the position that should receive focus next, or `None` to keep it.
    pub fn handle_key(&mut self, pos: GridPos, key: NavKey) -> Option<GridPos> {
        let grid = self.grid();
        if key.is_activation() {
            let cell = grid.cell(pos)?;
            if self.activate(cell.date) {
                return self.focus();
            }
            return None;
        }
        move_focus(&grid, pos, key)
    }

    fn step_month(&mut self, delta: i32) {
        let target = shift_months(self.date, delta);
        if !self.years.contains(target.year()) {
            log::debug!("month step to {} leaves the year window", target);
            return;
        }
        self.commit(target);
    }

    fn commit_year(&mut self, year: i32) {
        match clamped_date(year, self.date.month(), self.date.day()) {
            Some(date) => self.commit(date),
            None => log::debug!("year {} has no representable {}", year, self.date),
        }
    }

    fn commit(&mut self, date: NaiveDate) {
        log::debug!("calendar date {} -> {}", self.date, date);
        self.date = date;
        (self.on_change)(date);
    }
}

/// Three numeric inputs (month, day, year) plus a calendar popup.
///
/// Typed text is debounced per field and committed through the clamping rules
/// of `DateFields` once the user pauses.
#[derive(Debug, Clone)]
pub struct DatePicker {
    fields: DateFields,
    calendar_years: YearWindow,
    week_start: WeekStart,
    calendar_open: bool,
    month_input: Debouncer<String>,
    day_input: Debouncer<String>,
    year_input: Debouncer<String>,
}

impl DatePicker {
    /// Picker for `date` using the default picker range and delay.
    pub fn new(ctx: &CalContext, date: NaiveDate) -> Self {
        DatePicker::with_options(
            ctx,
            date,
            PICKER_YEAR_RANGE,
            Duration::from_millis(DEBOUNCE_DELAY_MS),
        )
    }

    pub fn with_options(ctx: &CalContext, date: NaiveDate, year_range: u32, delay: Duration) -> Self {
        // Typed years may land on either side of today; past/future limits only
        // narrow the popup calendar.
        let bounds = YearWindow::new(ctx.today.year(), year_range, true, true);
        DatePicker {
            fields: DateFields::new(date, bounds),
            calendar_years: YearWindow::from_context(ctx, year_range),
            week_start: ctx.week_start,
            calendar_open: false,
            month_input: Debouncer::new(delay),
            day_input: Debouncer::new(delay),
            year_input: Debouncer::new(delay),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.fields.date()
    }

    /// Bounds for typed years.
    pub fn years(&self) -> &YearWindow {
        self.fields.years()
    }

    /// Years the popup calendar offers.
    pub fn calendar_years(&self) -> &YearWindow {
        &self.calendar_years
    }

    /// Current display text of `field`.
    pub fn field_text(&self, field: PickerField) -> String {
        self.fields.text(field)
    }

    /// Record text typed into `field`; it is committed by a later `poll`.
    pub fn input(&mut self, field: PickerField, text: &str, now: Instant) {
        if let Some(debouncer) = self.debouncer(field) {
            debouncer.push(text.to_string(), now);
        }
    }

    /// Commit every field whose debounce delay has elapsed.
    ///
    /// Returns whether the date changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut due = Vec::new();
        for field in [PickerField::Month, PickerField::Day, PickerField::Year] {
            if let Some(debouncer) = self.debouncer(field)
                && let Some(deadline) = debouncer.deadline()
                && let Some(text) = debouncer.poll(now)
            {
                due.push((deadline, field, text));
            }
        }
        self.apply(due)
    }

    /// Commit all pending edits immediately.
    pub fn flush(&mut self) -> bool {
        let mut due = Vec::new();
        for field in [PickerField::Month, PickerField::Day, PickerField::Year] {
            if let Some(debouncer) = self.debouncer(field)
                && let Some(deadline) = debouncer.deadline()
                && let Some(text) = debouncer.flush()
            {
                due.push((deadline, field, text));
            }
        }
        self.apply(due)
    }

    pub fn has_pending_input(&self) -> bool {
        self.month_input.is_pending() || self.day_input.is_pending() || self.year_input.is_pending()
    }

    pub fn is_calendar_open(&self) -> bool {
        self.calendar_open
    }

    pub fn toggle_calendar(&mut self) {
        self.calendar_open = !self.calendar_open;
    }

    /// Close the popup, as a click outside the picker does.
    pub fn close_calendar(&mut self) {
        self.calendar_open = false;
    }

    /// The popup calendar for the current date, if it is open.
    ///
    /// It is limited to `calendar_years`; feed its selections back through
    /// `calendar_selected`.
    pub fn calendar<F: FnMut(NaiveDate)>(&self, on_change: F) -> Option<Calendar<F>> {
        self.calendar_open.then(|| {
            Calendar::with_years(self.date(), self.calendar_years, self.week_start, on_change)
        })
    }

    /// Take a date chosen in the calendar popup; pending typed edits are dropped.
    ///
    /// Dates outside `calendar_years` are ignored. Returns whether the date was taken.
    pub fn calendar_selected(&mut self, date: NaiveDate) -> bool {
        if !self.calendar_years.contains(date.year()) {
            log::debug!("ignoring calendar date {} outside the popup years", date);
            return false;
        }
        self.month_input.cancel();
        self.day_input.cancel();
        self.year_input.cancel();
        self.fields.set_date(date);
        log::debug!("picker date set from calendar: {}", self.fields.date());
        true
    }

    /// Where focus moves when `key` is pressed on `field`.
    pub fn handle_key(&self, field: PickerField, key: NavKey) -> Option<PickerField> {
        move_field_focus(field, key)
    }

    fn debouncer(&mut self, field: PickerField) -> Option<&mut Debouncer<String>> {
        match field {
            PickerField::Month => Some(&mut self.month_input),
            PickerField::Day => Some(&mut self.day_input),
            PickerField::Year => Some(&mut self.year_input),
            PickerField::Button => None,
        }
    }

    fn apply(&mut self, mut due: Vec<(Instant, PickerField, String)>) -> bool {
        due.sort_by_key(|(deadline, _, _)| *deadline);
        let mut changed = false;
        for (_, field, text) in due {
            changed |= self.fields.apply_text(field, &text);
            log::debug!("{:?} input {:?} committed as {}", field, text, self.fields.date());
        }
        changed
    }
}
