use crate::storage::resolve_data_path;
use anyhow::{bail, Context, Result};
use chrono::Weekday;
use std::{env, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_OWNER: &str = "local";

/// Runtime settings, read once from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub owner_id: String,
    /// First column of the heatmap and first day of the progress week.
    pub week_start: Weekday,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let owner_id = env::var("HABIT_OWNER_ID")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_OWNER.to_string());

        let week_start = match env::var("HABIT_WEEK_START") {
            Ok(value) => parse_week_start(&value).context("invalid HABIT_WEEK_START")?,
            Err(_) => Weekday::Sun,
        };

        Ok(Self {
            port,
            data_path: resolve_data_path(),
            owner_id,
            week_start,
        })
    }
}

pub fn parse_week_start(value: &str) -> Result<Weekday> {
    match value.trim().to_ascii_lowercase().as_str() {
        "sunday" | "sun" => Ok(Weekday::Sun),
        "monday" | "mon" => Ok(Weekday::Mon),
        other => bail!("week start must be 'sunday' or 'monday', got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_start_accepts_both_spellings() {
        assert_eq!(parse_week_start("Sunday").unwrap(), Weekday::Sun);
        assert_eq!(parse_week_start(" mon ").unwrap(), Weekday::Mon);
    }

    #[test]
    fn week_start_rejects_other_days() {
        let err = parse_week_start("friday").unwrap_err();
        assert!(err.to_string().contains("friday"));
    }
}
