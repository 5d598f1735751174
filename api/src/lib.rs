pub mod broadcast;
pub mod client;
pub mod config;
pub mod espn;
pub mod filter;
pub mod format;
pub mod league;
pub mod record;
pub mod status;

pub use config::{ClockFormat, DisplayConfig};
pub use format::ScoreFormatter;
pub use league::{LeagueClassifier, SportFamily};

use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Domain types: canonical records, independent of ESPN wire format
// ---------------------------------------------------------------------------

/// Macro phase of a game. Serialized as its number (0, 1, 2).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum GameMode {
    #[default]
    Scheduled = 0,
    Live = 1,
    Final = 2,
}

impl Serialize for GameMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

/// One side of a game as the display layer sees it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRecord {
    pub code: String,      // "ARS", or "SDSU " for the FCS school
    pub long_name: String, // "Arsenal", "UGA Bulldogs"
    pub rank: Option<u8>,  // poll rank 1–25, collegiate leagues only
    pub score: Option<u32>, // None = no score yet / unparseable, distinct from 0
    pub logo_url: String,
}

/// The normalized output unit for one contest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub classes: Vec<String>,
    pub game_mode: GameMode,
    pub home_team: TeamRecord,
    pub visitor_team: TeamRecord,
    pub status: Vec<String>,
    pub broadcast: Vec<String>,
}

/// Records for one league group of a scorepanel response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LeagueScores {
    pub label: String,
    pub records: Vec<GameRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_mode_serializes_as_number() {
        assert_eq!(serde_json::to_string(&GameMode::Scheduled).unwrap(), "0");
        assert_eq!(serde_json::to_string(&GameMode::Live).unwrap(), "1");
        assert_eq!(serde_json::to_string(&GameMode::Final).unwrap(), "2");
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = GameRecord {
            game_mode: GameMode::Live,
            home_team: TeamRecord { code: "ARS".into(), score: Some(0), ..Default::default() },
            ..Default::default()
        };
        let v = serde_json::to_value(&record).unwrap();
        assert_eq!(v["gameMode"], 1);
        assert_eq!(v["homeTeam"]["code"], "ARS");
        assert_eq!(v["homeTeam"]["score"], 0);
        assert!(v["visitorTeam"]["score"].is_null());
        assert_eq!(v["visitorTeam"]["logoUrl"], "");
    }
}
