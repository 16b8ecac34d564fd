//! Bounded window of selectable years around today.

use chrono::{Datelike, NaiveDate};

use crate::types::CalContext;

/// Ascending, de-duplicated range of years a calendar may navigate to.
///
/// Bounds never leave the years chrono can represent, and `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearWindow {
    min: i32,
    max: i32,
}

impl YearWindow {
    /// Build the window of `radius` years around `center`.
    ///
    /// With neither flag set the window falls back to past years only.
    pub fn new(center: i32, radius: u32, include_past: bool, include_future: bool) -> Self {
        let include_past = include_past || !include_future;
        let supported = NaiveDate::MIN.year() as i64..=NaiveDate::MAX.year() as i64;
        let center = (center as i64).clamp(*supported.start(), *supported.end());
        let radius = radius as i64;

        let first = if include_past { center - radius } else { center };
        let last = if include_future { center + radius } else { center };

        YearWindow {
            min: first.clamp(*supported.start(), *supported.end()) as i32,
            max: last.clamp(*supported.start(), *supported.end()) as i32,
        }
    }

    /// Window centred on `ctx.today`, honouring its past/future restrictions.
    pub fn from_context(ctx: &CalContext, radius: u32) -> Self {
        YearWindow::new(
            ctx.today.year(),
            radius,
            !ctx.disable_past,
            !ctx.disable_future,
        )
    }

    /// Every year of the window, ascending.
    pub fn years(&self) -> Vec<i32> {
        (self.min..=self.max).collect()
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.min()..=self.max()).contains(&year)
    }

    pub fn clamp(&self, year: i32) -> i32 {
        year.clamp(self.min(), self.max())
    }

    /// Year before `year`, or the window's first year when that falls outside.
    pub fn prev_year(&self, year: i32) -> i32 {
        let prev = year.saturating_sub(1);
        if self.contains(prev) { prev } else { self.min() }
    }

    /// Year after `year`, or the window's last year when that falls outside.
    pub fn next_year(&self, year: i32) -> i32 {
        let next = year.saturating_add(1);
        if self.contains(next) { next } else { self.max() }
    }
}

impl From<&CalContext> for YearWindow {
    fn from(ctx: &CalContext) -> Self {
        YearWindow::from_context(ctx, ctx.year_range)
    }
}
