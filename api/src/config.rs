use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Team-filter token that admits any game with a poll-ranked (1–25) side.
pub const TOP_25_WILDCARD: &str = "@T25";

/// Per-call display configuration for one league instance.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplayConfig {
    pub league: String,
    /// Team codes to keep (may include `@T25`). `None` keeps every game.
    pub teams: Option<Vec<String>>,
    pub hide_broadcasts: bool,
    pub skip_channels: Vec<String>,
    pub show_local_broadcasts: bool,
    pub display_local_channels: Vec<String>,
    /// Team codes whose home/away market broadcasts should be shown.
    pub local_markets: Vec<String>,
    #[serde(skip)]
    pub clock: ClockFormat,
}

impl DisplayConfig {
    pub fn new(league: impl Into<String>) -> Self {
        Self { league: league.into(), ..Default::default() }
    }

    pub fn wants_top_25(&self) -> bool {
        self.teams
            .as_ref()
            .is_some_and(|t| t.iter().any(|code| code == TOP_25_WILDCARD))
    }

    pub fn is_skipped(&self, channel: &str) -> bool {
        self.skip_channels.iter().any(|c| c == channel)
    }

    pub fn is_local_channel_requested(&self, channel: &str) -> bool {
        self.display_local_channels.iter().any(|c| c == channel)
    }

    pub fn is_local_market(&self, team_code: &str) -> bool {
        self.local_markets.iter().any(|c| c == team_code)
    }
}

/// Process-wide clock convention for kickoff times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClockFormat {
    #[default]
    H12,
    H24,
}

impl ClockFormat {
    /// chrono format string: "3:05 pm" or "15:05".
    pub fn pattern(&self) -> &'static str {
        match self {
            ClockFormat::H12 => "%-I:%M %P",
            ClockFormat::H24 => "%-H:%M",
        }
    }
}

impl Serialize for ClockFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ClockFormat::H12 => serializer.serialize_u8(12),
            ClockFormat::H24 => serializer.serialize_u8(24),
        }
    }
}

impl<'de> Deserialize<'de> for ClockFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            24 => Ok(ClockFormat::H24),
            12 => Ok(ClockFormat::H12),
            other => Err(serde::de::Error::custom(format!(
                "timeFormat must be 12 or 24, got {other}"
            ))),
        }
    }
}
