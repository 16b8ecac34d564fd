//! Type definitions and constants shared by the grid builder, controllers and formatter.

use chrono::{NaiveDate, Weekday};

/// First day of the displayed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekStart {
    /// Sunday first (US layout).
    #[default]
    Sunday,
    /// Monday first (ISO 8601 layout).
    Monday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }
}

/// One day of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// Cell falls in the displayed (reference) month.
    pub is_current_month: bool,
    /// Cell is strictly earlier than the selected date.
    pub is_before_selected: bool,
    /// Cell is strictly later than the selected date.
    pub is_after_selected: bool,
}

impl CalendarCell {
    pub fn is_selected(&self) -> bool {
        !self.is_before_selected && !self.is_after_selected
    }
}

/// Six weeks of calendar cells for one reference month.
///
/// Every row holds either seven cells or none: rows that contain no day of
/// the reference month are emitted empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub week_start: WeekStart,
    pub rows: Vec<Vec<CalendarCell>>,
}

/// Row/column coordinates of a cell inside a `MonthGrid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub const fn new(row: usize, col: usize) -> Self {
        GridPos { row, col }
    }
}

/// Keys the calendar grid and the picker fields react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowRight,
    ArrowLeft,
    ArrowUp,
    ArrowDown,
    Space,
    Enter,
}

/// Focusable parts of the date picker, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerField {
    Month,
    Day,
    Year,
    /// The button that toggles the calendar popup.
    Button,
}

/// Calendar configuration shared by the controllers and the terminal renderer.
#[derive(Clone, Debug)]
pub struct CalContext {
    /// First day of the week.
    pub week_start: WeekStart,
    /// Today's date; the year window is centred on its year.
    pub today: NaiveDate,
    /// Number of years on each side of today that may be navigated to.
    pub year_range: u32,
    /// Exclude years before today's.
    pub disable_past: bool,
    /// Exclude years after today's.
    pub disable_future: bool,
    /// Whether to use ANSI colour codes in output.
    pub color: bool,
    /// Whether to show the year in the month header.
    pub show_year_in_header: bool,
}

impl Default for CalContext {
    fn default() -> Self {
        CalContext {
            week_start: WeekStart::default(),
            today: chrono::Local::now().date_naive(),
            year_range: CALENDAR_YEAR_RANGE,
            disable_past: false,
            disable_future: false,
            color: false,
            show_year_in_header: true,
        }
    }
}

// Grid dimensions
pub const CALENDAR_WEEKS: usize = 6;
pub const DAYS_PER_WEEK: usize = 7;

// Year radius used by the standalone calendar and by the date picker
pub const CALENDAR_YEAR_RANGE: u32 = 20;
pub const PICKER_YEAR_RANGE: u32 = 2;

pub const DEBOUNCE_DELAY_MS: u64 = 500;

// Color is enabled by default for better user experience
pub const COLOR_ENABLED_BY_DEFAULT: bool = true;

// ANSI color codes
pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_REVERSE: &str = "\x1b[7m";
pub const COLOR_DIM: &str = "\x1b[90m";
pub const COLOR_TEAL: &str = "\x1b[96m";
pub const COLOR_SAND_YELLOW: &str = "\x1b[93m";
