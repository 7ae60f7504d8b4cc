use crate::models::Checkin;
use crate::streak::days_into_week;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

const DAYS_PER_WEEK: usize = 7;
const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One square of the heatmap. Placeholder cells pad the first and last week
/// and have no date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: Option<NaiveDate>,
    pub count: u32,
    pub level: u8,
    pub label: Option<String>,
}

impl DayCell {
    fn placeholder() -> Self {
        Self {
            date: None,
            count: 0,
            level: 0,
            label: None,
        }
    }

    fn day(date: NaiveDate, count: u32) -> Self {
        Self {
            date: Some(date),
            count,
            level: intensity_level(count),
            label: Some(day_label(date, count)),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.date.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthLabel {
    pub label: &'static str,
    pub week: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearGrid {
    pub year: i32,
    pub habit_id: Option<Uuid>,
    pub weeks: Vec<Vec<DayCell>>,
    pub months: Vec<MonthLabel>,
    pub total_checkins: u32,
    pub active_days: u32,
}

/// Saturating quantization used by the renderer: 0, 1, 2, then 3 for
/// anything busier.
pub fn intensity_level(count: u32) -> u8 {
    match count {
        0 => 0,
        1 => 1,
        2 => 2,
        _ => 3,
    }
}

/// Lays out every day of `year` in weekly columns starting on `first_day`.
/// Returns `None` when the year is outside the calendar range.
pub fn build_year_grid(
    checkins: &[Checkin],
    year: i32,
    habit_filter: Option<Uuid>,
    first_day: Weekday,
) -> Option<YearGrid> {
    let first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let last = NaiveDate::from_ymd_opt(year, 12, 31)?;

    let mut counts: HashMap<NaiveDate, u32> = HashMap::new();
    for checkin in checkins {
        if habit_filter.is_some_and(|habit_id| checkin.habit_id != habit_id) {
            continue;
        }
        if checkin.date.year() != year {
            continue;
        }
        *counts.entry(checkin.date).or_default() += 1;
    }

    let mut weeks = Vec::with_capacity(54);
    let mut months = Vec::with_capacity(MONTH_NAMES.len());
    let mut total_checkins = 0u32;
    let mut active_days = 0u32;

    let leading = days_into_week(first, first_day) as usize;
    let mut current: Vec<DayCell> = (0..leading).map(|_| DayCell::placeholder()).collect();

    for date in first.iter_days().take_while(|date| *date <= last) {
        if date.day() == 1 {
            months.push(MonthLabel {
                label: MONTH_NAMES[date.month0() as usize],
                week: weeks.len(),
            });
        }

        let count = counts.get(&date).copied().unwrap_or(0);
        total_checkins = total_checkins.saturating_add(count);
        if count > 0 {
            active_days += 1;
        }

        current.push(DayCell::day(date, count));
        if current.len() == DAYS_PER_WEEK {
            weeks.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        current.resize_with(DAYS_PER_WEEK, DayCell::placeholder);
        weeks.push(current);
    }

    Some(YearGrid {
        year,
        habit_id: habit_filter,
        weeks,
        months,
        total_checkins,
        active_days,
    })
}

fn day_label(date: NaiveDate, count: u32) -> String {
    let date = date.format("%b %-d, %Y");
    match count {
        0 => format!("{date}: No activity"),
        1 => format!("{date}: 1 habit completed"),
        _ => format!("{date}: {count} habits completed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn checkin(habit_id: Uuid, date: NaiveDate) -> Checkin {
        Checkin {
            id: Uuid::new_v4(),
            habit_id,
            date,
            created_at: Utc::now(),
        }
    }

    fn real_cells(grid: &YearGrid) -> usize {
        grid.weeks
            .iter()
            .flatten()
            .filter(|cell| !cell.is_placeholder())
            .count()
    }

    fn cell(grid: &YearGrid, date: NaiveDate) -> &DayCell {
        grid.weeks
            .iter()
            .flatten()
            .find(|cell| cell.date == Some(date))
            .expect("missing day")
    }

    #[test]
    fn non_leap_year_has_365_real_days() {
        for year in [2021, 2022, 2023, 2025] {
            let grid = build_year_grid(&[], year, None, Weekday::Sun).unwrap();
            assert_eq!(real_cells(&grid), 365);
            assert!(grid.weeks.len() == 53 || grid.weeks.len() == 54);
            assert!(grid.weeks.iter().all(|week| week.len() == 7));
        }
    }

    #[test]
    fn leap_year_includes_february_29() {
        let grid = build_year_grid(&[], 2024, None, Weekday::Sun).unwrap();
        assert_eq!(real_cells(&grid), 366);
        assert_eq!(cell(&grid, day(2024, 2, 29)).count, 0);
    }

    #[test]
    fn leap_year_starting_saturday_spans_54_weeks() {
        let grid = build_year_grid(&[], 2000, None, Weekday::Sun).unwrap();
        assert_eq!(grid.weeks.len(), 54);
    }

    #[test]
    fn placeholders_only_pad_first_and_last_week() {
        // 2022-01-01 is a Saturday, 2022-12-31 is a Saturday.
        let grid = build_year_grid(&[], 2022, None, Weekday::Sun).unwrap();
        let first = &grid.weeks[0];
        assert!(first[..6].iter().all(DayCell::is_placeholder));
        assert_eq!(first[6].date, Some(day(2022, 1, 1)));
        let middle = &grid.weeks[1..grid.weeks.len() - 1];
        assert!(middle.iter().flatten().all(|cell| !cell.is_placeholder()));
        let last = grid.weeks.last().unwrap();
        assert_eq!(last[6].date, Some(day(2022, 12, 31)));
        assert!(last.iter().all(|cell| !cell.is_placeholder()));
    }

    #[test]
    fn monday_start_shifts_padding() {
        // 2024-01-01 is a Monday.
        let grid = build_year_grid(&[], 2024, None, Weekday::Mon).unwrap();
        assert_eq!(grid.weeks[0][0].date, Some(day(2024, 1, 1)));
        let sunday_grid = build_year_grid(&[], 2024, None, Weekday::Sun).unwrap();
        assert!(sunday_grid.weeks[0][0].is_placeholder());
        assert_eq!(sunday_grid.weeks[0][1].date, Some(day(2024, 1, 1)));
    }

    #[test]
    fn intensity_saturates_at_three() {
        assert_eq!(intensity_level(0), 0);
        assert_eq!(intensity_level(1), 1);
        assert_eq!(intensity_level(2), 2);
        assert_eq!(intensity_level(3), 3);
        assert_eq!(intensity_level(10), intensity_level(3));
    }

    #[test]
    fn counts_each_checkin_across_habits() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let date = day(2024, 5, 4);
        let checkins = vec![
            checkin(a, date),
            checkin(b, date),
            checkin(b, date),
            checkin(a, day(2024, 5, 5)),
            checkin(a, day(2023, 5, 4)),
        ];

        let all = build_year_grid(&checkins, 2024, None, Weekday::Sun).unwrap();
        assert_eq!(cell(&all, date).count, 3);
        assert_eq!(cell(&all, date).level, 3);
        assert_eq!(all.total_checkins, 4);
        assert_eq!(all.active_days, 2);

        let only_a = build_year_grid(&checkins, 2024, Some(a), Weekday::Sun).unwrap();
        assert_eq!(cell(&only_a, date).count, 1);
        assert_eq!(cell(&only_a, date).level, 1);
        assert_eq!(only_a.total_checkins, 2);
    }

    #[test]
    fn labels_describe_activity() {
        let habit = Uuid::new_v4();
        let checkins = vec![checkin(habit, day(2024, 1, 5)), checkin(habit, day(2024, 1, 5))];
        let grid = build_year_grid(&checkins, 2024, None, Weekday::Sun).unwrap();
        assert_eq!(
            cell(&grid, day(2024, 1, 5)).label.as_deref(),
            Some("Jan 5, 2024: 2 habits completed")
        );
        assert_eq!(
            cell(&grid, day(2024, 1, 6)).label.as_deref(),
            Some("Jan 6, 2024: No activity")
        );
    }

    #[test]
    fn month_labels_point_at_starting_week() {
        let grid = build_year_grid(&[], 2024, None, Weekday::Sun).unwrap();
        assert_eq!(grid.months.len(), 12);
        assert_eq!(grid.months[0].label, "Jan");
        assert_eq!(grid.months[0].week, 0);
        let march = &grid.months[2];
        assert!(grid.weeks[march.week].iter().any(|cell| cell.date == Some(day(2024, 3, 1))));
    }
}
