use crate::models::Badge;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Achievement kinds. Serialized as the display title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BadgeKind {
    #[serde(rename = "Streak Starter")]
    StreakStarter,
    #[serde(rename = "Consistency Champ")]
    ConsistencyChamp,
    #[serde(rename = "Habit Hero")]
    HabitHero,
    #[serde(rename = "Century Club")]
    CenturyClub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    FirstHabit,
    Streak,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BadgeDefinition {
    pub kind: BadgeKind,
    pub title: &'static str,
    pub description: &'static str,
    pub requirement: u32,
    pub color: &'static str,
    pub trigger: Trigger,
}

pub static CATALOG: [BadgeDefinition; 4] = [
    BadgeDefinition {
        kind: BadgeKind::StreakStarter,
        title: "Streak Starter",
        description: "Complete a 7-day streak",
        requirement: 7,
        color: "#3b82f6",
        trigger: Trigger::Streak,
    },
    BadgeDefinition {
        kind: BadgeKind::ConsistencyChamp,
        title: "Consistency Champ",
        description: "Complete a 30-day streak",
        requirement: 30,
        color: "#eab308",
        trigger: Trigger::Streak,
    },
    BadgeDefinition {
        kind: BadgeKind::HabitHero,
        title: "Habit Hero",
        description: "Create your first habit",
        requirement: 1,
        color: "#22c55e",
        trigger: Trigger::FirstHabit,
    },
    BadgeDefinition {
        kind: BadgeKind::CenturyClub,
        title: "Century Club",
        description: "Complete a 100-day streak",
        requirement: 100,
        color: "#a855f7",
        trigger: Trigger::Streak,
    },
];

impl BadgeKind {
    pub fn definition(self) -> &'static BadgeDefinition {
        match self {
            BadgeKind::StreakStarter => &CATALOG[0],
            BadgeKind::ConsistencyChamp => &CATALOG[1],
            BadgeKind::HabitHero => &CATALOG[2],
            BadgeKind::CenturyClub => &CATALOG[3],
        }
    }

    pub fn title(self) -> &'static str {
        self.definition().title
    }
}

/// Streak badges unlocked by exactly this streak value. A streak that jumps
/// past a requirement does not earn it.
pub fn evaluate_new_badges(
    streak: u32,
    existing: &HashSet<BadgeKind>,
) -> Vec<&'static BadgeDefinition> {
    CATALOG
        .iter()
        .filter(|definition| definition.trigger == Trigger::Streak)
        .filter(|definition| definition.requirement == streak)
        .filter(|definition| !existing.contains(&definition.kind))
        .collect()
}

/// Habit Hero, when the owner had no habits before this one.
pub fn first_habit_badge(
    prior_habit_count: usize,
    existing: &HashSet<BadgeKind>,
) -> Option<&'static BadgeDefinition> {
    if prior_habit_count != 0 || existing.contains(&BadgeKind::HabitHero) {
        return None;
    }
    Some(BadgeKind::HabitHero.definition())
}

pub fn held_kinds<'a>(badges: impl IntoIterator<Item = &'a Badge>) -> HashSet<BadgeKind> {
    badges.into_iter().map(|badge| badge.title).collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct BadgeShelfEntry {
    #[serde(flatten)]
    pub definition: BadgeDefinition,
    pub unlocked: bool,
    pub unlocked_at: Option<DateTime<Utc>>,
}

/// Full catalog in display order, each entry marked with its unlock state.
pub fn catalog_view<'a>(badges: impl IntoIterator<Item = &'a Badge>) -> Vec<BadgeShelfEntry> {
    let badges: Vec<&Badge> = badges.into_iter().collect();
    CATALOG
        .iter()
        .map(|definition| {
            let unlocked_at = badges
                .iter()
                .filter(|badge| badge.title == definition.kind)
                .map(|badge| badge.unlocked_at)
                .min();
            BadgeShelfEntry {
                definition: *definition,
                unlocked: unlocked_at.is_some(),
                unlocked_at,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn held(kinds: &[BadgeKind]) -> HashSet<BadgeKind> {
        kinds.iter().copied().collect()
    }

    fn kinds(definitions: Vec<&BadgeDefinition>) -> Vec<BadgeKind> {
        definitions.into_iter().map(|definition| definition.kind).collect()
    }

    #[test]
    fn seven_day_streak_unlocks_streak_starter() {
        let unlocked = kinds(evaluate_new_badges(7, &HashSet::new()));
        assert_eq!(unlocked, vec![BadgeKind::StreakStarter]);
    }

    #[test]
    fn held_badge_is_not_emitted_again() {
        let existing = held(&[BadgeKind::StreakStarter]);
        assert!(evaluate_new_badges(7, &existing).is_empty());
    }

    #[test]
    fn trigger_is_exact_match_not_threshold() {
        assert!(!kinds(evaluate_new_badges(8, &HashSet::new())).contains(&BadgeKind::StreakStarter));
        assert!(evaluate_new_badges(31, &HashSet::new()).is_empty());
    }

    #[test]
    fn milestones_map_to_their_badges() {
        assert_eq!(
            kinds(evaluate_new_badges(30, &HashSet::new())),
            vec![BadgeKind::ConsistencyChamp]
        );
        assert_eq!(
            kinds(evaluate_new_badges(100, &HashSet::new())),
            vec![BadgeKind::CenturyClub]
        );
    }

    #[test]
    fn one_day_streak_does_not_unlock_habit_hero() {
        assert!(evaluate_new_badges(1, &HashSet::new()).is_empty());
        assert!(evaluate_new_badges(0, &HashSet::new()).is_empty());
    }

    #[test]
    fn habit_hero_only_for_first_habit() {
        let first = first_habit_badge(0, &HashSet::new()).map(|definition| definition.kind);
        assert_eq!(first, Some(BadgeKind::HabitHero));
        assert!(first_habit_badge(1, &HashSet::new()).is_none());
        assert!(first_habit_badge(0, &held(&[BadgeKind::HabitHero])).is_none());
    }

    #[test]
    fn kinds_serialize_as_titles() {
        let json = serde_json::to_string(&BadgeKind::ConsistencyChamp).unwrap();
        assert_eq!(json, "\"Consistency Champ\"");
        let kind: BadgeKind = serde_json::from_str("\"Century Club\"").unwrap();
        assert_eq!(kind, BadgeKind::CenturyClub);
        for definition in CATALOG {
            assert_eq!(definition.kind.title(), definition.title);
        }
    }

    #[test]
    fn catalog_view_marks_unlocked_entries() {
        let badge = Badge {
            id: Uuid::new_v4(),
            user_id: "local".to_string(),
            title: BadgeKind::HabitHero,
            unlocked_at: Utc::now(),
        };
        let view = catalog_view([&badge]);
        assert_eq!(view.len(), CATALOG.len());
        let unlocked: Vec<BadgeKind> = view
            .iter()
            .filter(|entry| entry.unlocked)
            .map(|entry| entry.definition.kind)
            .collect();
        assert_eq!(unlocked, vec![BadgeKind::HabitHero]);
        assert_eq!(view[2].unlocked_at, Some(badge.unlocked_at));
    }
}
