//! Integration tests for the calendar and date picker controllers and grid rendering.

use std::cell::RefCell;
use std::time::{Duration, Instant};

use chrono::{Datelike, Locale, NaiveDate};
use unicode_width::UnicodeWidthStr;

use datepick::formatter::{
    GRID_WIDTH, format_month_grid, format_month_header, format_weekday_headers,
    format_year_window, get_weekday_order, month_names, weekday_names,
};
use datepick::picker::{Calendar, DatePicker};
use datepick::types::{CalContext, GridPos, MonthGrid, NavKey, PickerField, WeekStart};
use datepick::years::YearWindow;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn test_context() -> CalContext {
    CalContext {
        week_start: WeekStart::Sunday,
        today: date(2024, 6, 15),
        year_range: 2,
        disable_past: false,
        disable_future: false,
        color: false,
        show_year_in_header: true,
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

mod calendar_tests {
    use super::*;

    #[test]
    fn test_next_month_clamps_day_and_notifies() {
        let changes = RefCell::new(Vec::new());
        let ctx = test_context();
        let mut cal = Calendar::new(&ctx, date(2024, 1, 31), |d| changes.borrow_mut().push(d));

        cal.next_month();

        assert_eq!(cal.date(), date(2024, 2, 29));
        drop(cal);
        assert_eq!(changes.into_inner(), vec![date(2024, 2, 29)]);
    }

    #[test]
    fn test_month_steps_cross_year_boundary() {
        let ctx = test_context();
        let mut cal = Calendar::new(&ctx, date(2024, 12, 10), |_| {});
        cal.next_month();
        assert_eq!(cal.date(), date(2025, 1, 10));
        cal.prev_month();
        cal.prev_month();
        assert_eq!(cal.date(), date(2024, 11, 10));
    }

    #[test]
    fn test_month_step_out_of_window_is_ignored() {
        let mut calls = 0;
        let ctx = test_context();
        let mut cal = Calendar::new(&ctx, date(2022, 1, 15), |_| calls += 1);

        cal.prev_month();

        assert_eq!(cal.date(), date(2022, 1, 15));
        drop(cal);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_set_month_clamps() {
        let ctx = test_context();
        let mut cal = Calendar::new(&ctx, date(2024, 3, 31), |_| {});
        cal.set_month(4);
        assert_eq!(cal.date(), date(2024, 4, 30));
        cal.set_month(40);
        assert_eq!(cal.date(), date(2024, 12, 30));
    }

    #[test]
    fn test_year_steps_saturate_at_window_edges() {
        let ctx = test_context();
        let mut cal = Calendar::new(&ctx, date(2025, 5, 5), |_| {});
        cal.next_year();
        assert_eq!(cal.date(), date(2026, 5, 5));
        cal.next_year();
        assert_eq!(cal.date(), date(2026, 5, 5));

        cal.set_year(1900);
        assert_eq!(cal.date(), date(2022, 5, 5));
        cal.prev_year();
        assert_eq!(cal.date(), date(2022, 5, 5));
    }

    #[test]
    fn test_year_step_from_leap_day() {
        let ctx = test_context();
        let mut cal = Calendar::new(&ctx, date(2024, 2, 29), |_| {});
        cal.next_year();
        assert_eq!(cal.date(), date(2025, 2, 28));
    }

    #[test]
    fn test_activate_outside_window_is_noop() {
        let mut calls = 0;
        let ctx = test_context();
        let mut cal = Calendar::new(&ctx, date(2024, 6, 1), |_| calls += 1);

        assert!(!cal.activate(date(2030, 1, 1)));
        assert_eq!(cal.date(), date(2024, 6, 1));
        assert!(cal.activate(date(2024, 6, 20)));
        assert_eq!(cal.date(), date(2024, 6, 20));
        drop(cal);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_activate_respects_disabled_future() {
        let ctx = CalContext {
            disable_future: true,
            ..test_context()
        };
        let mut cal = Calendar::new(&ctx, date(2024, 6, 1), |_| {});
        assert!(!cal.activate(date(2025, 1, 1)));
        assert!(cal.activate(date(2023, 1, 1)));
    }

    #[test]
    fn test_enter_selects_focused_cell() {
        let selected = RefCell::new(None);
        let ctx = test_context();
        let mut cal = Calendar::new(&ctx, date(2024, 2, 14), |d| {
            *selected.borrow_mut() = Some(d)
        });

        assert_eq!(cal.focus(), Some(GridPos::new(2, 3)));
        let focus = cal.handle_key(GridPos::new(3, 0), NavKey::Enter);

        assert_eq!(cal.date(), date(2024, 2, 18));
        assert_eq!(focus, Some(GridPos::new(3, 0)));
        drop(cal);
        assert_eq!(selected.into_inner(), Some(date(2024, 2, 18)));
    }

    #[test]
    fn test_space_on_spillover_cell_switches_month() {
        let ctx = test_context();
        let mut cal = Calendar::new(&ctx, date(2024, 2, 14), |_| {});

        let focus = cal.handle_key(GridPos::new(0, 0), NavKey::Space);

        assert_eq!(cal.date(), date(2024, 1, 28));
        assert_eq!(cal.grid().month, 1);
        assert_eq!(focus, Some(GridPos::new(4, 0)));
    }

    #[test]
    fn test_arrow_keys_do_not_commit() {
        let mut calls = 0;
        let ctx = test_context();
        let mut cal = Calendar::new(&ctx, date(2024, 2, 14), |_| calls += 1);

        let focus = cal.handle_key(GridPos::new(2, 3), NavKey::ArrowDown);

        assert_eq!(focus, Some(GridPos::new(3, 3)));
        assert_eq!(cal.date(), date(2024, 2, 14));
        drop(cal);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_year_jump_to_representable_edge() {
        let changes = RefCell::new(Vec::new());
        let years = YearWindow::new(2024, u32::MAX, true, true);
        let mut cal = Calendar::with_years(date(2024, 2, 29), years, WeekStart::Sunday, |d| {
            changes.borrow_mut().push(d)
        });

        cal.set_year(i32::MAX);
        let last = cal.date();
        assert_eq!(last.year(), NaiveDate::MAX.year());
        assert_eq!(last.month(), 2);

        cal.set_year(i32::MIN);
        let first = cal.date();
        assert_eq!(first.year(), NaiveDate::MIN.year());

        drop(cal);
        assert_eq!(changes.into_inner(), vec![last, first]);
    }
}

mod date_picker_tests {
    use super::*;

    #[test]
    fn test_rapid_edits_commit_once_with_last_value() {
        let ctx = test_context();
        let mut picker = DatePicker::new(&ctx, date(2024, 6, 15));
        let t0 = Instant::now();

        picker.input(PickerField::Year, "2", t0);
        picker.input(PickerField::Year, "20", t0 + ms(100));
        picker.input(PickerField::Year, "2025", t0 + ms(200));

        assert!(!picker.poll(t0 + ms(300)));
        assert!(!picker.poll(t0 + ms(600)));
        assert_eq!(picker.date(), date(2024, 6, 15));

        assert!(picker.poll(t0 + ms(700)));
        assert_eq!(picker.date(), date(2025, 6, 15));
        assert!(!picker.has_pending_input());
        assert!(!picker.poll(t0 + ms(5000)));
    }

    #[test]
    fn test_month_edit_shortens_day() {
        let ctx = test_context();
        let mut picker = DatePicker::new(&ctx, date(2024, 3, 31));
        let t0 = Instant::now();

        picker.input(PickerField::Month, "4", t0);
        assert!(picker.poll(t0 + ms(500)));

        assert_eq!(picker.date(), date(2024, 4, 30));
        assert_eq!(picker.field_text(PickerField::Month), "04");
        assert_eq!(picker.field_text(PickerField::Day), "30");
    }

    #[test]
    fn test_year_clamps_to_picker_range() {
        let ctx = test_context();
        let mut picker = DatePicker::new(&ctx, date(2024, 2, 29));
        let t0 = Instant::now();

        picker.input(PickerField::Year, "3000", t0);
        assert!(picker.flush());

        assert_eq!(picker.date(), date(2026, 2, 28));
        assert_eq!(picker.field_text(PickerField::Year), "2026");
    }

    #[test]
    fn test_fields_commit_in_deadline_order() {
        let ctx = test_context();
        let mut picker = DatePicker::new(&ctx, date(2024, 2, 10));
        let t0 = Instant::now();

        // The day edit lands first and is clamped to February's length
        picker.input(PickerField::Day, "31", t0);
        picker.input(PickerField::Month, "3", t0 + ms(50));
        assert!(picker.poll(t0 + ms(1000)));

        assert_eq!(picker.date(), date(2024, 3, 29));
    }

    #[test]
    fn test_invalid_text_is_ignored() {
        let ctx = test_context();
        let mut picker = DatePicker::new(&ctx, date(2024, 5, 5));
        let t0 = Instant::now();

        picker.input(PickerField::Day, "", t0);
        picker.input(PickerField::Month, "xx", t0);
        assert!(!picker.poll(t0 + ms(500)));
        assert_eq!(picker.date(), date(2024, 5, 5));
    }

    #[test]
    fn test_custom_delay() {
        let ctx = test_context();
        let mut picker = DatePicker::with_options(&ctx, date(2024, 5, 5), 2, ms(250));
        let t0 = Instant::now();

        picker.input(PickerField::Day, "9", t0);
        assert!(picker.poll(t0 + ms(250)));
        assert_eq!(picker.date(), date(2024, 5, 9));
    }

    #[test]
    fn test_calendar_popup_round_trip() {
        let ctx = test_context();
        let mut picker = DatePicker::new(&ctx, date(2024, 6, 15));
        assert!(picker.calendar(|_| {}).is_none());

        picker.toggle_calendar();
        assert!(picker.is_calendar_open());

        let picked = RefCell::new(None);
        {
            let mut cal = picker
                .calendar(|d| *picked.borrow_mut() = Some(d))
                .unwrap();
            assert_eq!(cal.years().years(), &[2022, 2023, 2024, 2025, 2026]);
            cal.next_month();
        }

        let t0 = Instant::now();
        picker.input(PickerField::Day, "3", t0);
        picker.calendar_selected(picked.into_inner().unwrap());

        assert_eq!(picker.date(), date(2024, 7, 15));
        assert!(!picker.has_pending_input());
        assert!(!picker.poll(t0 + ms(1000)));

        picker.close_calendar();
        assert!(!picker.is_calendar_open());
    }

    #[test]
    fn test_popup_respects_disable_future() {
        let ctx = CalContext {
            disable_future: true,
            ..test_context()
        };
        let mut picker = DatePicker::new(&ctx, date(2024, 6, 15));
        picker.toggle_calendar();

        let picked = RefCell::new(None);
        {
            let mut cal = picker
                .calendar(|d| *picked.borrow_mut() = Some(d))
                .unwrap();
            assert_eq!(cal.years().years(), &[2022, 2023, 2024]);
            cal.next_year();
            cal.next_year();
            assert_eq!(cal.date(), date(2024, 6, 15));
        }
        assert!(picker.calendar_selected(picked.into_inner().unwrap()));
        assert!(picker.date() <= date(2024, 12, 31));

        // Typed years still reach both sides of today
        assert_eq!(picker.years().max(), 2026);
        assert!(!picker.calendar_selected(date(2025, 1, 1)));
        assert_eq!(picker.date(), date(2024, 6, 15));
    }

    #[test]
    fn test_popup_respects_disable_past() {
        let ctx = CalContext {
            disable_past: true,
            ..test_context()
        };
        let mut picker = DatePicker::new(&ctx, date(2024, 6, 15));
        picker.toggle_calendar();

        let mut cal = picker.calendar(|_| {}).unwrap();
        assert_eq!(cal.years().years(), &[2024, 2025, 2026]);
        cal.prev_year();
        assert_eq!(cal.date(), date(2024, 6, 15));
        assert!(!cal.activate(date(2023, 12, 31)));
        assert_eq!(picker.calendar_years().min(), 2024);
    }

    #[test]
    fn test_field_focus_keys() {
        let ctx = test_context();
        let picker = DatePicker::new(&ctx, date(2024, 6, 15));
        assert_eq!(
            picker.handle_key(PickerField::Day, NavKey::ArrowRight),
            Some(PickerField::Year)
        );
        assert_eq!(
            picker.handle_key(PickerField::Day, NavKey::ArrowLeft),
            Some(PickerField::Month)
        );
        assert_eq!(picker.handle_key(PickerField::Month, NavKey::ArrowLeft), None);
    }
}

mod formatting_tests {
    use super::*;

    #[test]
    fn test_grid_has_header_weekdays_and_six_rows() {
        let ctx = test_context();
        let grid = MonthGrid::new(date(2024, 2, 14), date(2024, 2, 14), WeekStart::Sunday);
        let lines = format_month_grid(&ctx, &grid);

        assert_eq!(lines.len(), 8);
        assert_eq!(lines[2], "28 29 30 31  1  2  3");
        assert_eq!(lines[6], "25 26 27 28 29  1  2");
        assert_eq!(lines[7], " ".repeat(GRID_WIDTH));
    }

    #[test]
    fn test_rows_have_consistent_width() {
        let ctx = test_context();
        let grid = MonthGrid::new(date(2015, 2, 1), date(2015, 2, 1), WeekStart::Monday);
        for line in format_month_grid(&ctx, &grid).iter().skip(2) {
            assert_eq!(line.width(), GRID_WIDTH);
        }
    }

    #[test]
    fn test_selected_day_is_reversed_when_colored() {
        let ctx = CalContext {
            color: true,
            ..test_context()
        };
        let grid = MonthGrid::new(date(2024, 2, 14), date(2024, 2, 14), WeekStart::Sunday);
        let lines = format_month_grid(&ctx, &grid);

        assert!(lines[4].contains("\x1b[7m14\x1b[0m"));
        // Spillover days are dimmed
        assert!(lines[2].starts_with("\x1b[90m28\x1b[0m"));
    }

    #[test]
    fn test_no_color_codes_when_disabled() {
        let ctx = test_context();
        let grid = MonthGrid::new(date(2024, 2, 14), date(2024, 2, 14), WeekStart::Sunday);
        for line in format_month_grid(&ctx, &grid) {
            assert!(!line.contains('\x1b'));
        }
    }

    #[test]
    fn test_header_width_and_color() {
        let header = format_month_header(2024, 9, GRID_WIDTH, true, false);
        assert_eq!(header.width(), GRID_WIDTH);

        let colored = format_month_header(2024, 9, GRID_WIDTH, true, true);
        assert!(colored.starts_with("\x1b[96m"));
        assert!(colored.ends_with("\x1b[0m"));
    }

    #[test]
    fn test_weekday_header_width() {
        let ctx = test_context();
        assert_eq!(format_weekday_headers(&ctx).width(), GRID_WIDTH);
    }

    #[test]
    fn test_weekday_order() {
        let sunday_first = get_weekday_order(WeekStart::Sunday);
        assert_eq!(sunday_first[0], chrono::Weekday::Sun);
        assert_eq!(sunday_first[6], chrono::Weekday::Sat);
        let monday_first = get_weekday_order(WeekStart::Monday);
        assert_eq!(monday_first[0], chrono::Weekday::Mon);
        assert_eq!(monday_first[6], chrono::Weekday::Sun);
    }

    #[test]
    fn test_localized_names() {
        let months = month_names(Locale::en_US);
        assert_eq!(months.len(), 12);
        assert_eq!(months[0].month, 1);
        assert_eq!(months[0].long_name, "January");
        assert_eq!(months[0].short_name, "Jan");

        let ru = month_names(Locale::ru_RU);
        assert_eq!(ru[0].long_name, "Январь");

        let days = weekday_names(WeekStart::Sunday, Locale::en_US);
        assert_eq!(days[0], ("Sunday".to_string(), "Sun".to_string()));
        assert_eq!(days[1].0, "Monday");
    }

    #[test]
    fn test_year_window_line() {
        let ctx = test_context();
        let line = format_year_window(&ctx, &YearWindow::from(&ctx));
        assert_eq!(line, "2022 2023 2024 2025 2026");
    }
}
