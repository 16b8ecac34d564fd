//! Month grid construction and the chrono date helpers it relies on.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::types::{CALENDAR_WEEKS, CalendarCell, DAYS_PER_WEEK, GridPos, MonthGrid, WeekStart};

/// First day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the week containing `date`.
pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let offset = match week_start {
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
        WeekStart::Monday => date.weekday().num_days_from_monday(),
    };
    date.checked_sub_days(Days::new(offset as u64)).unwrap_or(date)
}

/// Number of days in the given month, or 0 if the month is not representable.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    match first.checked_add_months(Months::new(1)) {
        Some(next) => next.signed_duration_since(first).num_days() as u32,
        // December of the last representable year
        None => 31,
    }
}

/// Whether two dates fall in the same month of the same year.
pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Move `date` by `delta` months, keeping the day unless the target month is shorter.
pub fn shift_months(date: NaiveDate, delta: i32) -> NaiveDate {
    let months = Months::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_months(months)
    } else {
        date.checked_sub_months(months)
    };
    shifted.unwrap_or(date)
}

/// Build a date from parts, pulling the day down to the month's last day if needed.
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let month = month.clamp(1, 12);
    let last = days_in_month(year, month);
    if last == 0 {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day.clamp(1, last))
}

/// Replace the year of `date`, clamping Feb 29 to Feb 28 where needed.
pub fn with_year_clamped(date: NaiveDate, year: i32) -> NaiveDate {
    clamped_date(year, date.month(), date.day()).unwrap_or(date)
}

/// Replace the month of `date` (clamped to 1-12), clamping the day to the new month's length.
pub fn with_month_clamped(date: NaiveDate, month: u32) -> NaiveDate {
    clamped_date(date.year(), month, date.day()).unwrap_or(date)
}

impl MonthGrid {
    /// Build the six-week grid for the month of `reference`, flagging cells
    /// relative to `selected`.
    pub fn new(reference: NaiveDate, selected: NaiveDate, week_start: WeekStart) -> Self {
        let grid_start = start_of_week(start_of_month(reference), week_start);

        let mut rows = Vec::with_capacity(CALENDAR_WEEKS);
        for week in 0..CALENDAR_WEEKS {
            let mut row: Vec<CalendarCell> = (0..DAYS_PER_WEEK)
                .map(|weekday| {
                    let offset = (week * DAYS_PER_WEEK + weekday) as u64;
                    match grid_start.checked_add_days(Days::new(offset)) {
                        Some(date) => CalendarCell {
                            date,
                            is_current_month: is_same_month(date, reference),
                            is_before_selected: date < selected,
                            is_after_selected: date > selected,
                        },
                        // Past the end of chrono's range: never in-month, never selected
                        None => CalendarCell {
                            date: NaiveDate::MAX,
                            is_current_month: false,
                            is_before_selected: false,
                            is_after_selected: true,
                        },
                    }
                })
                .collect();

            // Weeks entirely outside the month are rendered blank
            if row.iter().all(|cell| !cell.is_current_month) {
                row.clear();
            }
            rows.push(row);
        }

        log::trace!(
            "built grid for {}-{:02} starting {}",
            reference.year(),
            reference.month(),
            grid_start
        );

        MonthGrid {
            year: reference.year(),
            month: reference.month(),
            week_start,
            rows,
        }
    }

    pub fn rows(&self) -> &[Vec<CalendarCell>] {
        &self.rows
    }

    pub fn row(&self, row: usize) -> &[CalendarCell] {
        self.rows.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn cell(&self, pos: GridPos) -> Option<&CalendarCell> {
        self.rows.get(pos.row)?.get(pos.col)
    }

    /// All cells of the non-empty rows, row-major.
    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.rows.iter().flatten()
    }

    /// Days of the reference month in grid order.
    pub fn current_month_days(&self) -> Vec<u32> {
        self.cells()
            .filter(|cell| cell.is_current_month)
            .map(|cell| cell.date.day())
            .collect()
    }

    /// Grid position of `date`, if it is shown.
    pub fn position_of(&self, date: NaiveDate) -> Option<GridPos> {
        self.rows.iter().enumerate().find_map(|(row, cells)| {
            cells
                .iter()
                .position(|cell| cell.date == date)
                .map(|col| GridPos::new(row, col))
        })
    }

    /// Grid position of the selected cell, if it is shown.
    pub fn selected_pos(&self) -> Option<GridPos> {
        self.rows.iter().enumerate().find_map(|(row, cells)| {
            cells
                .iter()
                .position(CalendarCell::is_selected)
                .map(|col| GridPos::new(row, col))
        })
    }
}
