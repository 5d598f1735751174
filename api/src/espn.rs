//! ESPN scorepanel raw wire types: serde shapes for deserializing the feed.
//! These are turned into `GameRecord`s by the engine in format.rs.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Scorepanel  (site v2 API, /{sport}/scorepanel)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScorepanelResponse {
    #[serde(default)]
    pub scores: Vec<ScoreGroup>,
}

/// One league's slice of the scorepanel response.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScoreGroup {
    #[serde(default)]
    pub leagues: Vec<EspnLeague>,
    #[serde(default)]
    pub events: Vec<EspnEvent>,
}

impl ScoreGroup {
    pub fn label(&self) -> String {
        self.leagues
            .first()
            .and_then(|l| l.name.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnLeague {
    pub name: Option<String>,
    pub abbreviation: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "shortName")]
    pub short_name: Option<String>,
    pub date: Option<String>, // ISO 8601, often without seconds ("2024-03-09T20:00Z")
    pub status: Option<EspnStatus>,
    #[serde(default)]
    pub competitions: Vec<EspnCompetition>,
}

impl EspnEvent {
    /// The first competition carries everything the scorepanel shows.
    pub fn competition(&self) -> Option<&EspnCompetition> {
        self.competitions.first()
    }

    pub fn competitors(&self) -> &[EspnCompetitor] {
        self.competition()
            .map(|c| c.competitors.as_slice())
            .unwrap_or_default()
    }

    pub fn broadcasts(&self) -> &[EspnBroadcast] {
        self.competition()
            .map(|c| c.broadcasts.as_slice())
            .unwrap_or_default()
    }

    pub fn status_type(&self) -> Option<&EspnStatusType> {
        self.status.as_ref().and_then(|s| s.status_type.as_ref())
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatus {
    pub period: Option<u8>,
    #[serde(rename = "displayClock")]
    pub display_clock: Option<String>,
    #[serde(rename = "type")]
    pub status_type: Option<EspnStatusType>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnStatusType {
    pub id: Option<String>,     // "1", "28", "47", ...
    pub name: Option<String>,   // "STATUS_SCHEDULED", "STATUS_FULL_TIME"
    pub state: Option<String>,  // "pre" | "in" | "post"
    pub detail: Option<String>, // "Sat, March 9th at 3:00 PM EST"
    #[serde(rename = "shortDetail")]
    pub short_detail: Option<String>, // "67'"
    pub description: Option<String>,  // "Halftime", "Full Time"
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetition {
    pub date: Option<String>,
    #[serde(default)]
    pub competitors: Vec<EspnCompetitor>,
    #[serde(default)]
    pub broadcasts: Vec<EspnBroadcast>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnCompetitor {
    pub id: Option<String>,
    #[serde(rename = "homeAway")]
    pub home_away: Option<String>, // "home" | "away"
    pub team: Option<EspnTeam>,
    pub score: Option<FeedNumber>, // usually a string, occasionally a number
    #[serde(rename = "shootoutScore")]
    pub shootout_score: Option<FeedNumber>,
    #[serde(rename = "curatedRank")]
    pub curated_rank: Option<EspnRank>,
}

impl EspnCompetitor {
    pub fn abbreviation(&self) -> Option<&str> {
        self.team.as_ref().and_then(|t| t.abbreviation.as_deref())
    }

    pub fn rank(&self) -> Option<u32> {
        self.curated_rank
            .as_ref()
            .and_then(|r| r.current.as_ref())
            .and_then(FeedNumber::as_u32)
    }

    pub fn is_home(&self) -> bool {
        self.home_away.as_deref() == Some("home")
    }

    pub fn is_away(&self) -> bool {
        self.home_away.as_deref() == Some("away")
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnTeam {
    pub id: Option<String>,
    pub abbreviation: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "shortDisplayName")]
    pub short_display_name: Option<String>,
    pub location: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnRank {
    pub current: Option<FeedNumber>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EspnBroadcast {
    pub market: Option<String>, // "national" | "home" | "away"
    #[serde(default)]
    pub names: Vec<String>,
}

/// A numeric field ESPN may send as a JSON number or as a string.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum FeedNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl FeedNumber {
    /// Non-negative integer value, or `None` when the field isn't one.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            FeedNumber::Int(n) => u32::try_from(*n).ok(),
            FeedNumber::Float(f) if f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX) => {
                Some(*f as u32)
            }
            FeedNumber::Float(_) => None,
            FeedNumber::Text(s) => s.trim().parse::<u32>().ok(),
        }
    }
}
