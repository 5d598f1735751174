use chrono::NaiveDate;
use scorepanel_api::{DisplayConfig, LeagueScores};
use serde::{Serialize, Serializer};

/// Today's scores and yesterday's go out as separate updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Today,
    Yesterday,
}

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    GetScores { index: usize, config: DisplayConfig, day: Day, date: NaiveDate },
}

/// Everything one request produced, delivered in one piece.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreUpdate {
    pub index: usize,
    pub league: String,
    pub day: Day,
    #[serde(serialize_with = "yyyymmdd")]
    pub date: NaiveDate,
    pub scores: Vec<LeagueScores>,
}

#[derive(Debug)]
pub enum NetworkResponse {
    ScoreUpdate(ScoreUpdate),
}

fn yyyymmdd<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format("%Y%m%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_serializes_compact_date() {
        let update = ScoreUpdate {
            index: 2,
            league: "USA_MLS".into(),
            day: Day::Yesterday,
            date: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
            scores: vec![],
        };
        let v = serde_json::to_value(&update).unwrap();
        assert_eq!(v["date"], "20240704");
        assert_eq!(v["day"], "yesterday");
        assert_eq!(v["index"], 2);
    }
}
