//! Terminal rendering of month grids and year windows, with localized names.

use chrono::{Datelike, Locale, NaiveDate, Weekday};
use unicode_width::UnicodeWidthStr;

use crate::types::{
    COLOR_DIM, COLOR_RESET, COLOR_REVERSE, COLOR_SAND_YELLOW, COLOR_TEAL, CalContext,
    CalendarCell, DAYS_PER_WEEK, MonthGrid, WeekStart,
};
use crate::years::YearWindow;

/// Width of a rendered month: seven two-column days plus six separators.
pub const GRID_WIDTH: usize = 20;

/// A month entry for a month selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthName {
    pub month: u32,
    pub long_name: String,
    pub short_name: String,
}

/// Get system locale from environment (LC_ALL > LC_TIME > LANG > en_US).
pub fn get_system_locale() -> Locale {
    std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LC_TIME"))
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_else(|_| "en_US.UTF-8".to_string())
        .split('.')
        .next()
        .unwrap_or("en_US")
        .split('@')
        .next()
        .unwrap_or("en_US")
        .parse()
        .unwrap_or(Locale::en_US)
}

fn first_of(month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, month.clamp(1, 12), 1).unwrap_or(NaiveDate::MIN)
}

/// Month name in nominative case for `locale`.
///
/// chrono's `%B` yields the genitive form for Slavic locales ("января"),
/// which reads wrong as a standalone header.
pub fn get_month_name(month: u32, locale: Locale) -> String {
    const RU: [&str; 12] = [
        "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь", "Июль", "Август", "Сентябрь",
        "Октябрь", "Ноябрь", "Декабрь",
    ];
    const UK: [&str; 12] = [
        "Січень", "Лютий", "Березень", "Квітень", "Травень", "Червень", "Липень", "Серпень",
        "Вересень", "Жовтень", "Листопад", "Грудень",
    ];
    let idx = (month.clamp(1, 12) - 1) as usize;
    match locale {
        Locale::ru_RU => RU[idx].to_string(),
        Locale::uk_UA => UK[idx].to_string(),
        _ => first_of(month).format_localized("%B", locale).to_string(),
    }
}

/// The twelve months with long and short localized names, January first.
pub fn month_names(locale: Locale) -> Vec<MonthName> {
    (1..=12)
        .map(|month| MonthName {
            month,
            long_name: get_month_name(month, locale),
            short_name: first_of(month).format_localized("%b", locale).to_string(),
        })
        .collect()
}

/// Get weekday order based on week start day.
pub fn get_weekday_order(week_start: WeekStart) -> [Weekday; 7] {
    let first = week_start.weekday();
    let mut order = [first; DAYS_PER_WEEK];
    for i in 1..DAYS_PER_WEEK {
        order[i] = order[i - 1].succ();
    }
    order
}

/// Long and short localized weekday names in display order.
pub fn weekday_names(week_start: WeekStart, locale: Locale) -> Vec<(String, String)> {
    get_weekday_order(week_start)
        .iter()
        .map(|&weekday| {
            let date = weekday_sample(weekday);
            (
                date.format_localized("%A", locale).to_string(),
                date.format_localized("%a", locale).to_string(),
            )
        })
        .collect()
}

/// Get 2-character weekday abbreviation for `locale`.
pub fn get_weekday_short_name(weekday: Weekday, locale: Locale) -> String {
    let day_name = weekday_sample(weekday)
        .format_localized("%a", locale)
        .to_string();
    day_name.chars().take(2).collect()
}

// 2000-01-03 was a Monday
fn weekday_sample(weekday: Weekday) -> NaiveDate {
    let monday = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap_or(NaiveDate::MIN);
    monday + chrono::Duration::days(weekday.num_days_from_monday() as i64)
}

/// Format month header with optional year and color.
pub fn format_month_header(
    year: i32,
    month: u32,
    width: usize,
    show_year: bool,
    color: bool,
) -> String {
    let month_name = get_month_name(month, get_system_locale());
    let header = if show_year {
        format!("{} {}", month_name, year)
    } else {
        month_name
    };
    let centered = center_text(&header, width);
    if color {
        format!("{}{}{}", COLOR_TEAL, centered, COLOR_RESET)
    } else {
        centered
    }
}

/// Center text within a specified width, accounting for Unicode character widths.
fn center_text(text: &str, width: usize) -> String {
    let text_width = text.width();
    if text_width >= width {
        return text.to_string();
    }
    let total_padding = width - text_width;
    let left_padding = total_padding.div_ceil(2);
    let right_padding = total_padding - left_padding;
    format!(
        "{}{}{}",
        " ".repeat(left_padding),
        text,
        " ".repeat(right_padding)
    )
}

/// Format weekday header row.
pub fn format_weekday_headers(ctx: &CalContext) -> String {
    let locale = get_system_locale();
    let names: Vec<String> = get_weekday_order(ctx.week_start)
        .iter()
        .map(|&weekday| format!("{:>2}", get_weekday_short_name(weekday, locale)))
        .collect();
    let row = names.join(" ");

    if ctx.color {
        format!("{}{}{}", COLOR_SAND_YELLOW, row, COLOR_RESET)
    } else {
        row
    }
}

/// Format one day cell.
///
/// Color priority: selected > outside the month > regular
fn format_cell(ctx: &CalContext, cell: &CalendarCell) -> String {
    let day_str = format!("{:>2}", cell.date.day());
    if !ctx.color {
        return day_str;
    }
    if cell.is_selected() {
        format!("{}{}{}", COLOR_REVERSE, day_str, COLOR_RESET)
    } else if !cell.is_current_month {
        format!("{}{}{}", COLOR_DIM, day_str, COLOR_RESET)
    } else {
        day_str
    }
}

/// Format a month grid as lines: header, weekday names, then six week rows.
///
/// Empty rows are rendered as blank lines of full width so consecutive
/// months line up.
pub fn format_month_grid(ctx: &CalContext, grid: &MonthGrid) -> Vec<String> {
    let mut lines = Vec::with_capacity(grid.rows().len() + 2);

    lines.push(format_month_header(
        grid.year,
        grid.month,
        GRID_WIDTH,
        ctx.show_year_in_header,
        ctx.color,
    ));
    lines.push(format_weekday_headers(ctx));

    for row in grid.rows() {
        if row.is_empty() {
            lines.push(" ".repeat(GRID_WIDTH));
            continue;
        }
        let cells: Vec<String> = row.iter().map(|cell| format_cell(ctx, cell)).collect();
        lines.push(cells.join(" "));
    }

    lines
}

/// Format the year window as a single space-separated line.
pub fn format_year_window(ctx: &CalContext, years: &YearWindow) -> String {
    years
        .years()
        .iter()
        .map(|&year| {
            if ctx.color && year == ctx.today.year() {
                format!("{}{}{}", COLOR_REVERSE, year, COLOR_RESET)
            } else {
                year.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn print_month(ctx: &CalContext, reference: NaiveDate, selected: NaiveDate) {
    let grid = MonthGrid::new(reference, selected, ctx.week_start);
    for line in format_month_grid(ctx, &grid) {
        println!("{}", line);
    }
}

pub fn print_years(ctx: &CalContext) {
    println!("{}", format_year_window(ctx, &YearWindow::from(ctx)));
}
