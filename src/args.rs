//! Command-line argument parsing using clap.
//!
//! Arguments follow the `cal` convention: `[[day] month] year`

use chrono::{Datelike, NaiveDate};
use clap::{Parser, ValueHint};
use std::io::IsTerminal;

use crate::calendar::clamped_date;
use crate::types::{CALENDAR_YEAR_RANGE, COLOR_ENABLED_BY_DEFAULT, CalContext, WeekStart};

#[derive(Parser, Debug)]
#[command(name = "datepick")]
#[command(about = "Displays a month grid with the selected day highlighted", long_about = None)]
#[command(version)]
#[command(after_help = HELP_MESSAGE)]
pub struct Args {
    /// Week starts on Sunday (default).
    #[arg(short = 's', long, help_heading = "Calendar options")]
    pub sunday: bool,

    /// Week starts on Monday.
    #[arg(short = 'm', long, help_heading = "Calendar options")]
    pub monday: bool,

    /// Number of years before and after the current one that may be selected.
    #[arg(
        short = 'r',
        long,
        default_value_t = CALENDAR_YEAR_RANGE,
        help_heading = "Calendar options",
        value_name = "years"
    )]
    pub range: u32,

    /// Do not allow years before the current one.
    #[arg(long, help_heading = "Calendar options")]
    pub no_past: bool,

    /// Do not allow years after the current one.
    #[arg(long, help_heading = "Calendar options")]
    pub no_future: bool,

    /// List the selectable years instead of the month grid.
    #[arg(short = 'y', long, help_heading = "Display options")]
    pub years: bool,

    /// Day (1-31) - optional, used with month and year.
    #[arg(index = 1, default_value = None, value_name = "day", value_hint = ValueHint::Other)]
    pub day_arg: Option<String>,

    /// Month (1-12 or name) - optional, used with year.
    #[arg(index = 2, default_value = None, value_name = "month", value_hint = ValueHint::Other)]
    pub month_arg: Option<String>,

    /// Year (1-9999).
    #[arg(index = 3, default_value = None, value_name = "year", value_hint = ValueHint::Other)]
    pub year_arg: Option<String>,

    /// Disable colorized output.
    #[arg(long, help_heading = "Output options")]
    pub color: bool,
}

/// Help message displayed with --help.
const HELP_MESSAGE: &str = "Display the calendar grid a date picker would show.

Without any arguments, display the current month with today selected.

Examples:
  datepick               Current month, today selected
  datepick 2 2024        February 2024
  datepick 31 3 2024     March 2024 with the 31st selected
  datepick -m 2024       Current month of 2024, weeks starting Monday
  datepick -y -r 2       Years selectable two years either side of today
  datepick --color       Disable colorized output";

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }
}

impl CalContext {
    pub fn new(args: &Args) -> Result<Self, String> {
        if args.sunday && args.monday {
            return Err("Options -s and -m are mutually exclusive".to_string());
        }

        let color = !args.color && COLOR_ENABLED_BY_DEFAULT && std::io::stdout().is_terminal();

        Ok(CalContext {
            week_start: if args.monday {
                WeekStart::Monday
            } else {
                WeekStart::Sunday
            },
            today: get_today_date(),
            year_range: args.range,
            disable_past: args.no_past,
            disable_future: args.no_future,
            color,
            show_year_in_header: true,
        })
    }
}

/// Get today's date, respecting DATEPICK_TEST_TIME environment variable for testing.
pub fn get_today_date() -> NaiveDate {
    if let Ok(test_time) = std::env::var("DATEPICK_TEST_TIME")
        && let Ok(date) = NaiveDate::parse_from_str(&test_time, "%Y-%m-%d")
    {
        return date;
    }
    chrono::Local::now().date_naive()
}

/// Parse month from string (numeric 1-12 or English name).
pub fn parse_month(s: &str) -> Option<u32> {
    if let Ok(n) = s.parse::<u32>()
        && (1..=12).contains(&n)
    {
        return Some(n);
    }

    const NAMES: [&str; 12] = [
        "january",
        "february",
        "march",
        "april",
        "may",
        "june",
        "july",
        "august",
        "september",
        "october",
        "november",
        "december",
    ];
    let s_lower = s.to_lowercase();
    if s_lower.len() < 3 {
        return None;
    }
    NAMES
        .iter()
        .position(|name| *name == s_lower || (s_lower.len() == 3 && name.starts_with(&s_lower)))
        .map(|idx| idx as u32 + 1)
}

fn parse_year(s: &str) -> Result<i32, String> {
    let year = s
        .parse::<i32>()
        .map_err(|_| format!("Invalid year: {}", s))?;
    if !(1..=9999).contains(&year) {
        return Err(format!("Invalid year: {} (must be 1-9999)", year));
    }
    Ok(year)
}

fn parse_month_arg(s: &str) -> Result<u32, String> {
    parse_month(s).ok_or_else(|| format!("Invalid month: {}", s))
}

/// Calculate the selected date from positional arguments.
///
/// Argument patterns:
/// - no args: today
/// - 1 arg: year (4 digits) or month (1-2 digits or name)
/// - 2 args: month year
/// - 3 args: day month year
///
/// Missing parts are taken from `today`; a day past the end of the month is
/// pulled back to its last day.
pub fn get_display_date(args: &Args, today: NaiveDate) -> Result<NaiveDate, String> {
    let (year, month, day) = match (&args.day_arg, &args.month_arg, &args.year_arg) {
        (None, None, None) => (today.year(), today.month(), today.day()),
        (Some(val), None, None) => {
            if let Ok(num) = val.parse::<i32>()
                && (1000..=9999).contains(&num)
            {
                (num, today.month(), today.day())
            } else if let Some(month) = parse_month(val) {
                (today.year(), month, today.day())
            } else {
                return Err(format!("Invalid argument: {}", val));
            }
        }
        (Some(month), Some(year), None) => (parse_year(year)?, parse_month_arg(month)?, today.day()),
        (Some(day), Some(month), Some(year)) => {
            let day = day
                .parse::<u32>()
                .map_err(|_| format!("Invalid day: {}", day))?;
            if !(1..=31).contains(&day) {
                return Err(format!("Invalid day: {} (must be 1-31)", day));
            }
            (parse_year(year)?, parse_month_arg(month)?, day)
        }
        _ => return Err("Invalid argument combination".to_string()),
    };

    clamped_date(year, month, day).ok_or_else(|| format!("Invalid date: {}-{}-{}", year, month, day))
}
