use crate::models::Checkin;
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};
use serde::Serialize;
use std::collections::BTreeSet;
use uuid::Uuid;

const DAYS_PER_WEEK: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StreakTier {
    Cold,
    Warming,
    Strong,
    Legendary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressTier {
    Low,
    Medium,
    High,
    Complete,
}

/// Derived per-habit values a habit card renders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HabitSummary {
    pub streak: u32,
    pub checked_today: bool,
    pub weekly_progress: f64,
    pub streak_tier: StreakTier,
    pub progress_tier: ProgressTier,
}

pub fn compute_streak(checkins: &[Checkin], habit_id: Uuid) -> u32 {
    compute_streak_at(today(), checkins, habit_id)
}

/// Consecutive days ending at the latest check-in. The streak survives one
/// missed day (latest == yesterday) and is broken by two or more.
pub fn compute_streak_at(today: NaiveDate, checkins: &[Checkin], habit_id: Uuid) -> u32 {
    let dates = habit_dates(checkins, habit_id);
    let Some(&latest) = dates.last() else {
        return 0;
    };

    if (today - latest).num_days() > 1 {
        return 0;
    }

    let mut streak = 0;
    let mut expected = latest;
    for &date in dates.iter().rev() {
        if date != expected {
            break;
        }
        streak += 1;
        match expected.pred_opt() {
            Some(previous) => expected = previous,
            None => break,
        }
    }

    streak
}

pub fn is_checked_today(checkins: &[Checkin], habit_id: Uuid) -> bool {
    is_checked_on(today(), checkins, habit_id)
}

pub fn is_checked_on(date: NaiveDate, checkins: &[Checkin], habit_id: Uuid) -> bool {
    checkins
        .iter()
        .any(|checkin| checkin.habit_id == habit_id && checkin.date == date)
}

pub fn weekly_progress(checkins: &[Checkin], habit_id: Uuid, first_day: Weekday) -> f64 {
    weekly_progress_at(today(), first_day, checkins, habit_id)
}

/// Percent of the week containing `today` that has a check-in, in `[0, 100]`.
/// Both week boundaries are inclusive; repeated check-ins on one day count once.
pub fn weekly_progress_at(
    today: NaiveDate,
    first_day: Weekday,
    checkins: &[Checkin],
    habit_id: Uuid,
) -> f64 {
    let start = week_start(today, first_day);
    let end = start + Duration::days(6);

    let days = habit_dates(checkins, habit_id)
        .into_iter()
        .filter(|date| *date >= start && *date <= end)
        .count();

    (days as f64 / DAYS_PER_WEEK * 100.0).min(100.0)
}

pub fn streak_tier(streak: u32) -> StreakTier {
    match streak {
        30.. => StreakTier::Legendary,
        7.. => StreakTier::Strong,
        3.. => StreakTier::Warming,
        _ => StreakTier::Cold,
    }
}

pub fn progress_tier(percent: f64) -> ProgressTier {
    if percent >= 100.0 {
        ProgressTier::Complete
    } else if percent >= 75.0 {
        ProgressTier::High
    } else if percent >= 50.0 {
        ProgressTier::Medium
    } else {
        ProgressTier::Low
    }
}

pub fn habit_summary_at(
    today: NaiveDate,
    first_day: Weekday,
    checkins: &[Checkin],
    habit_id: Uuid,
) -> HabitSummary {
    let streak = compute_streak_at(today, checkins, habit_id);
    let weekly_progress = weekly_progress_at(today, first_day, checkins, habit_id);
    HabitSummary {
        streak,
        checked_today: is_checked_on(today, checkins, habit_id),
        weekly_progress,
        streak_tier: streak_tier(streak),
        progress_tier: progress_tier(weekly_progress),
    }
}

/// First day of the week containing `date`.
pub fn week_start(date: NaiveDate, first_day: Weekday) -> NaiveDate {
    date - Duration::days(i64::from(days_into_week(date, first_day)))
}

/// Column offset of `date` inside a week beginning on `first_day`, `0..7`.
pub fn days_into_week(date: NaiveDate, first_day: Weekday) -> u32 {
    (date.weekday().num_days_from_sunday() + 7 - first_day.num_days_from_sunday()) % 7
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Distinct check-in dates of one habit, ascending.
fn habit_dates(checkins: &[Checkin], habit_id: Uuid) -> Vec<NaiveDate> {
    checkins
        .iter()
        .filter(|checkin| checkin.habit_id == habit_id)
        .map(|checkin| checkin.date)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
