use crate::badges::{
    catalog_view, evaluate_new_badges, first_habit_badge, held_kinds, BadgeDefinition, CATALOG,
};
use crate::errors::AppError;
use crate::heatmap::{build_year_grid, YearGrid};
use crate::models::{
    AppData, Badge, BadgeShelfResponse, Checkin, CheckinRequest, CheckinResponse,
    DashboardResponse, Habit, HabitCreatedResponse, HabitRequest, HabitView, HeatmapQuery,
};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::streak::{habit_summary_at, today};
use crate::ui::render_index;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::{Datelike, NaiveDate, Utc, Weekday};
use tracing::info;
use uuid::Uuid;

const MAX_NAME_LEN: usize = 100;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(today(), state.config.week_start))
}

pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, AppError> {
    let today = today();
    let owner = &state.config.owner_id;
    let first_day = state.config.week_start;
    let data = state.data.lock().await;

    let heatmap = year_grid(&data, owner, today.year(), None, first_day)?;
    Ok(Json(DashboardResponse {
        today,
        habits: habit_views(&data, owner, today, first_day),
        badges: badge_shelf(&data, owner),
        heatmap,
    }))
}

pub async fn list_habits(State(state): State<AppState>) -> Json<Vec<HabitView>> {
    let data = state.data.lock().await;
    Json(habit_views(
        &data,
        &state.config.owner_id,
        today(),
        state.config.week_start,
    ))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<HabitRequest>,
) -> Result<(StatusCode, Json<HabitCreatedResponse>), AppError> {
    let name = validate_name(&payload.name)?;
    let owner = state.config.owner_id.clone();
    let mut data = state.data.lock().await;

    let prior_habits = data.owner_habit_count(&owner);
    let held = held_kinds(data.owner_badges(&owner));

    let habit = Habit {
        id: Uuid::new_v4(),
        name,
        goal_type: payload.goal_type,
        created_at: Utc::now(),
        user_id: owner.clone(),
    };
    let mut next = data.clone();
    next.habits.push(habit.clone());
    let unlocked = grant_badges(&mut next, &owner, first_habit_badge(prior_habits, &held));

    commit(&state, &mut data, next).await?;
    info!(habit_id = %habit.id, name = %habit.name, "habit created");

    let view = habit_view(&data, habit, today(), state.config.week_start);
    Ok((
        StatusCode::CREATED,
        Json(HabitCreatedResponse {
            habit: view,
            unlocked,
        }),
    ))
}

pub async fn update_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
    Json(payload): Json<HabitRequest>,
) -> Result<Json<HabitView>, AppError> {
    let name = validate_name(&payload.name)?;
    let mut data = state.data.lock().await;
    let mut next = data.clone();

    let habit = {
        let habit = owned_habit_mut(&mut next, habit_id, &state.config.owner_id)?;
        habit.name = name;
        habit.goal_type = payload.goal_type;
        habit.clone()
    };

    commit(&state, &mut data, next).await?;
    info!(habit_id = %habit.id, "habit updated");

    Ok(Json(habit_view(&data, habit, today(), state.config.week_start)))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    owned_habit_mut(&mut data, habit_id, &state.config.owner_id)?;

    let mut next = data.clone();
    next.remove_habit(habit_id);
    commit(&state, &mut data, next).await?;
    info!(habit_id = %habit_id, "habit deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub async fn check_in(
    State(state): State<AppState>,
    Path(habit_id): Path<Uuid>,
    Json(payload): Json<CheckinRequest>,
) -> Result<(StatusCode, Json<CheckinResponse>), AppError> {
    let today = today();
    let date = payload.date.unwrap_or(today);
    if date > today {
        return Err(AppError::bad_request("cannot check in for a future date"));
    }

    let owner = state.config.owner_id.clone();
    let first_day = state.config.week_start;
    let mut data = state.data.lock().await;
    owned_habit_mut(&mut data, habit_id, &owner)?;

    if data.has_checkin(habit_id, date) {
        return Err(AppError::conflict(format!("habit already checked in on {date}")));
    }

    let checkin = Checkin {
        id: Uuid::new_v4(),
        habit_id,
        date,
        created_at: Utc::now(),
    };
    let mut next = data.clone();
    next.checkins.push(checkin.clone());

    let summary = habit_summary_at(today, first_day, &next.checkins, habit_id);
    let held = held_kinds(next.owner_badges(&owner));
    let unlocked = grant_badges(&mut next, &owner, evaluate_new_badges(summary.streak, &held));

    commit(&state, &mut data, next).await?;
    info!(habit_id = %habit_id, %date, streak = summary.streak, "checked in");

    Ok((
        StatusCode::CREATED,
        Json(CheckinResponse {
            checkin,
            summary,
            unlocked,
        }),
    ))
}

pub async fn get_badges(State(state): State<AppState>) -> Json<BadgeShelfResponse> {
    let data = state.data.lock().await;
    Json(badge_shelf(&data, &state.config.owner_id))
}

pub async fn get_heatmap(
    State(state): State<AppState>,
    Query(query): Query<HeatmapQuery>,
) -> Result<Json<YearGrid>, AppError> {
    let year = query.year.unwrap_or_else(|| today().year());
    if !(1..=9999).contains(&year) {
        return Err(AppError::bad_request("year must be between 1 and 9999"));
    }

    let data = state.data.lock().await;
    if let Some(habit_id) = query.habit_id {
        match data.habit(habit_id) {
            Some(habit) if habit.user_id == state.config.owner_id => {}
            _ => return Err(AppError::not_found(format!("habit {habit_id} not found"))),
        }
    }

    let grid = year_grid(
        &data,
        &state.config.owner_id,
        year,
        query.habit_id,
        state.config.week_start,
    )?;
    Ok(Json(grid))
}

fn validate_name(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::bad_request("habit name must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::bad_request(format!(
            "habit name must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

fn owned_habit_mut<'a>(
    data: &'a mut AppData,
    habit_id: Uuid,
    owner: &str,
) -> Result<&'a mut Habit, AppError> {
    match data.habit_mut(habit_id) {
        Some(habit) if habit.user_id == owner => Ok(habit),
        _ => Err(AppError::not_found(format!("habit {habit_id} not found"))),
    }
}

/// Persists `next` and only then makes it the live state, so a failed write
/// leaves memory as it was.
async fn commit(state: &AppState, data: &mut AppData, next: AppData) -> Result<(), AppError> {
    persist_data(&state.config.data_path, &next).await?;
    *data = next;
    Ok(())
}

/// Records newly unlocked badges and returns the created rows.
fn grant_badges(
    data: &mut AppData,
    owner: &str,
    definitions: impl IntoIterator<Item = &'static BadgeDefinition>,
) -> Vec<Badge> {
    let mut unlocked = Vec::new();
    for definition in definitions {
        let badge = Badge {
            id: Uuid::new_v4(),
            user_id: owner.to_string(),
            title: definition.kind,
            unlocked_at: Utc::now(),
        };
        info!(badge = definition.title, "badge unlocked");
        data.badges.push(badge.clone());
        unlocked.push(badge);
    }
    unlocked
}

fn habit_view(data: &AppData, habit: Habit, today: NaiveDate, first_day: Weekday) -> HabitView {
    let summary = habit_summary_at(today, first_day, &data.checkins, habit.id);
    HabitView { habit, summary }
}

fn habit_views(data: &AppData, owner: &str, today: NaiveDate, first_day: Weekday) -> Vec<HabitView> {
    data.habits_newest_first()
        .into_iter()
        .filter(|habit| habit.user_id == owner)
        .map(|habit| habit_view(data, habit.clone(), today, first_day))
        .collect()
}

fn badge_shelf(data: &AppData, owner: &str) -> BadgeShelfResponse {
    let badges = catalog_view(data.owner_badges(owner));
    BadgeShelfResponse {
        unlocked_count: badges.iter().filter(|entry| entry.unlocked).count(),
        total: CATALOG.len(),
        badges,
    }
}

/// Grid over the owner's check-ins only.
fn year_grid(
    data: &AppData,
    owner: &str,
    year: i32,
    habit_id: Option<Uuid>,
    first_day: Weekday,
) -> Result<YearGrid, AppError> {
    build_year_grid(&data.owner_checkins(owner), year, habit_id, first_day)
        .ok_or_else(|| AppError::bad_request(format!("year {year} is out of range")))
}
