use crate::badges::{BadgeKind, BadgeShelfEntry};
use crate::heatmap::YearGrid;
use crate::streak::HabitSummary;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    #[default]
    Daily,
    Weekly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    pub goal_type: GoalType,
    pub created_at: DateTime<Utc>,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkin {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Badge {
    pub id: Uuid,
    pub user_id: String,
    pub title: BadgeKind,
    pub unlocked_at: DateTime<Utc>,
}

/// Everything the service persists. Stands in for the hosted store.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub checkins: Vec<Checkin>,
    #[serde(default)]
    pub badges: Vec<Badge>,
}

impl AppData {
    pub fn habit(&self, id: Uuid) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    pub fn habit_mut(&mut self, id: Uuid) -> Option<&mut Habit> {
        self.habits.iter_mut().find(|habit| habit.id == id)
    }

    pub fn owner_habit_count(&self, user_id: &str) -> usize {
        self.habits
            .iter()
            .filter(|habit| habit.user_id == user_id)
            .count()
    }

    pub fn owner_badges(&self, user_id: &str) -> Vec<&Badge> {
        self.badges
            .iter()
            .filter(|badge| badge.user_id == user_id)
            .collect()
    }

    /// Check-ins on habits the owner holds.
    pub fn owner_checkins(&self, user_id: &str) -> Vec<Checkin> {
        let owned: HashSet<Uuid> = self
            .habits
            .iter()
            .filter(|habit| habit.user_id == user_id)
            .map(|habit| habit.id)
            .collect();
        self.checkins
            .iter()
            .filter(|checkin| owned.contains(&checkin.habit_id))
            .cloned()
            .collect()
    }

    pub fn has_checkin(&self, habit_id: Uuid, date: NaiveDate) -> bool {
        self.checkins
            .iter()
            .any(|checkin| checkin.habit_id == habit_id && checkin.date == date)
    }

    /// Removes the habit and cascades to its check-ins. Returns false when
    /// no habit had that id.
    pub fn remove_habit(&mut self, id: Uuid) -> bool {
        let before = self.habits.len();
        self.habits.retain(|habit| habit.id != id);
        if self.habits.len() == before {
            return false;
        }
        self.checkins.retain(|checkin| checkin.habit_id != id);
        true
    }

    /// Habits newest first, the order the dashboard lists them in.
    pub fn habits_newest_first(&self) -> Vec<&Habit> {
        let mut habits: Vec<&Habit> = self.habits.iter().collect();
        habits.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        habits
    }
}

#[derive(Debug, Deserialize)]
pub struct HabitRequest {
    pub name: String,
    #[serde(default)]
    pub goal_type: GoalType,
}

#[derive(Debug, Deserialize, Default)]
pub struct CheckinRequest {
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct HeatmapQuery {
    pub year: Option<i32>,
    pub habit_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct HabitView {
    #[serde(flatten)]
    pub habit: Habit,
    pub summary: HabitSummary,
}

#[derive(Debug, Serialize)]
pub struct HabitCreatedResponse {
    pub habit: HabitView,
    pub unlocked: Vec<Badge>,
}

#[derive(Debug, Serialize)]
pub struct CheckinResponse {
    pub checkin: Checkin,
    pub summary: HabitSummary,
    pub unlocked: Vec<Badge>,
}

#[derive(Debug, Serialize)]
pub struct BadgeShelfResponse {
    pub unlocked_count: usize,
    pub total: usize,
    pub badges: Vec<BadgeShelfEntry>,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub today: NaiveDate,
    pub habits: Vec<HabitView>,
    pub badges: BadgeShelfResponse,
    pub heatmap: YearGrid,
}
