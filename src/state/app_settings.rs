use crate::state::messages::{Day, NetworkRequest};
use anyhow::Context;
use chrono::{Days, NaiveDate};
use log::LevelFilter;
use scorepanel_api::{ClockFormat, DisplayConfig};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_SETTINGS_PATH: &str = "scorepanel.json";

/// Which days each instance asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WhichDay {
    #[default]
    Today,
    /// Today plus yesterday, delivered as separate updates.
    Both,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawSettings {
    time_format: Option<ClockFormat>,
    which_day: WhichDay,
    refresh_secs: Option<u64>,
    log_level: Option<String>,
    instances: Vec<DisplayConfig>,
}

#[derive(Debug, Default, Clone)]
pub struct AppSettings {
    pub clock: ClockFormat,
    pub which_day: WhichDay,
    pub refresh: Option<Duration>,
    pub log_level: Option<LevelFilter>,
    pub instances: Vec<DisplayConfig>,
}

impl AppSettings {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("could not read settings from {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid settings in {}", path.display()))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let raw: RawSettings = serde_json::from_str(content)?;

        let log_level = raw
            .log_level
            .as_deref()
            .map(str::parse::<LevelFilter>)
            .transpose()
            .context("logLevel must be one of off, error, warn, info, debug, trace")?;

        // The clock format is process-wide; every instance shares it.
        let clock = raw.time_format.unwrap_or_default();
        let instances = raw
            .instances
            .into_iter()
            .map(|mut cfg| {
                cfg.clock = clock;
                cfg
            })
            .collect();

        Ok(Self {
            clock,
            which_day: raw.which_day,
            refresh: raw.refresh_secs.filter(|s| *s > 0).map(Duration::from_secs),
            log_level,
            instances,
        })
    }

    /// One request per instance and day, in configuration order.
    pub fn requests(&self, today: NaiveDate) -> Vec<NetworkRequest> {
        let mut days = vec![(Day::Today, today)];
        if self.which_day == WhichDay::Both
            && let Some(yesterday) = today.checked_sub_days(Days::new(1))
        {
            days.push((Day::Yesterday, yesterday));
        }

        self.instances
            .iter()
            .enumerate()
            .flat_map(|(index, config)| {
                days.iter().map(move |(day, date)| NetworkRequest::GetScores {
                    index,
                    config: config.clone(),
                    day: *day,
                    date: *date,
                })
            })
            .collect()
    }
}
