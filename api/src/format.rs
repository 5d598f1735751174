//! The normalization engine: one score group in, ordered records out.
//!
//! Everything here is synchronous and side-effect free apart from debug
//! logging. The classifier and icon tables are borrowed read-only, so one
//! formatter can serve any number of concurrent requests.

use crate::broadcast::{self, BroadcastIcons};
use crate::config::DisplayConfig;
use crate::espn::{ScoreGroup, ScorepanelResponse};
use crate::league::{LeagueClassifier, SOCCER_ON_TV};
use crate::record::build_record;
use crate::{filter, status, GameRecord, LeagueScores};
use chrono::{NaiveDate, TimeZone};
use log::debug;
use std::fmt::Display;

pub struct ScoreFormatter<'a, Tz: TimeZone> {
    leagues: &'a LeagueClassifier,
    icons: &'a BroadcastIcons,
    tz: Tz,
}

impl<'a, Tz> ScoreFormatter<'a, Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub fn new(leagues: &'a LeagueClassifier, icons: &'a BroadcastIcons, tz: Tz) -> Self {
        Self { leagues, icons, tz }
    }

    pub fn leagues(&self) -> &LeagueClassifier {
        self.leagues
    }

    /// Format one league group of a scorepanel response for `date`.
    pub fn format(
        &self,
        config: &DisplayConfig,
        group: &ScoreGroup,
        date: NaiveDate,
    ) -> Vec<GameRecord> {
        let collegiate = self.leagues.is_collegiate(&config.league);

        let records = filter::select(&group.events, config, date, &self.tz)
            .into_iter()
            .map(|event| {
                let competitors = event.competitors();
                let (home, visitor) = crate::record::split_home_away(competitors);
                let outcome = status::resolve(
                    event,
                    home.unwrap_or(&DEFAULT_COMPETITOR),
                    visitor.unwrap_or(&DEFAULT_COMPETITOR),
                    config.clock,
                    &self.tz,
                );

                let channels = if outcome.broadcast {
                    let resolved =
                        broadcast::resolve(event.broadcasts(), competitors, config, self.icons);
                    if !resolved.rejected.is_empty() {
                        debug!(
                            "local channels available for {}: {}",
                            event.short_name.as_deref().unwrap_or("?"),
                            resolved.rejected.join(", ")
                        );
                    }
                    resolved.entries
                } else {
                    Vec::new()
                };

                build_record(&config.league, collegiate, competitors, outcome, channels)
            });

        if config.league == SOCCER_ON_TV {
            // the "on TV" view only lists games someone is showing
            records.filter(|r| !r.broadcast.is_empty()).collect()
        } else {
            records.collect()
        }
    }

    /// Format every league group in a response, each independently.
    pub fn format_response(
        &self,
        config: &DisplayConfig,
        response: &ScorepanelResponse,
        date: NaiveDate,
    ) -> Vec<LeagueScores> {
        response
            .scores
            .iter()
            .map(|group| LeagueScores {
                label: group.label(),
                records: self.format(config, group, date),
            })
            .collect()
    }
}

static DEFAULT_COMPETITOR: crate::espn::EspnCompetitor = crate::espn::EspnCompetitor {
    id: None,
    home_away: None,
    team: None,
    score: None,
    shootout_score: None,
    curated_rank: None,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TOP_25_WILDCARD;
    use crate::GameMode;
    use chrono::{FixedOffset, Utc};
    use serde_json::{json, Value};
    use std::collections::HashSet;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn team(abbr: &str, name: &str) -> Value {
        json!({ "abbreviation": abbr, "name": name, "shortDisplayName": name, "logo": format!("{abbr}.png") })
    }

    fn event(id: &str, date: &str, code: &str, home: Value, away: Value, broadcasts: Value) -> Value {
        json!({
            "id": id,
            "date": date,
            "shortName": id,
            "status": { "type": {
                "id": code,
                "detail": "detail",
                "shortDetail": "short",
                "description": "Full Time"
            }},
            "competitions": [{
                "date": date,
                "competitors": [home, away],
                "broadcasts": broadcasts
            }]
        })
    }

    fn side(home_away: &str, abbr: &str, name: &str, score: &str, extra: Value) -> Value {
        let mut v = json!({ "homeAway": home_away, "team": team(abbr, name), "score": score });
        if let (Some(obj), Value::Object(more)) = (v.as_object_mut(), extra) {
            obj.extend(more);
        }
        v
    }

    fn group(events: Vec<Value>) -> ScoreGroup {
        serde_json::from_value(json!({
            "leagues": [{ "name": "English Premier League" }],
            "events": events
        }))
        .unwrap()
    }

    fn fixture() -> ScoreGroup {
        group(vec![
            // Final on penalties; the away side is listed first in the feed
            event(
                "pk",
                "2024-05-04T11:30Z",
                "47",
                side("away", "CHE", "Chelsea", "1", json!({ "shootoutScore": 2 })),
                side("home", "ARS", "Arsenal", "1", json!({ "shootoutScore": 3 })),
                json!([{ "market": "national", "names": ["ESPN"] }]),
            ),
            event(
                "late",
                "2024-05-04T19:00Z",
                "1",
                side("home", "LIV", "Liverpool", "0", json!({})),
                side("away", "MUN", "Man United", "0", json!({})),
                json!([{ "market": "national", "names": ["Peacock", "Peacock"] }]),
            ),
            event(
                "early",
                "2024-05-04T14:00Z",
                "1",
                side("home", "TOT", "Spurs", "0", json!({})),
                side("away", "BOU", "Bournemouth", "0", json!({})),
                json!([]),
            ),
            // previous UTC day: filtered out
            event(
                "yesterday",
                "2024-05-03T19:00Z",
                "28",
                side("home", "EVE", "Everton", "2", json!({})),
                side("away", "BRE", "Brentford", "2", json!({})),
                json!([]),
            ),
        ])
    }

    #[test]
    fn end_to_end_three_games_in_kickoff_order() {
        let leagues = LeagueClassifier::new();
        let icons = BroadcastIcons::default();
        let fmt = ScoreFormatter::new(&leagues, &icons, Utc);
        let mut cfg = DisplayConfig::new("ENG_PREMIERE_LEAGUE");
        cfg.clock = crate::ClockFormat::H24;

        let records = fmt.format(&cfg, &fixture(), ymd(2024, 5, 4));
        assert_eq!(records.len(), 3);

        let pk = &records[0];
        assert_eq!(pk.game_mode, GameMode::Final);
        assert_eq!(pk.status, vec!["FT (PK) 3x2"]);
        assert_eq!(pk.home_team.code, "ARS");
        assert_eq!(pk.visitor_team.code, "CHE");
        assert_eq!(pk.home_team.score, Some(1));
        assert!(pk.broadcast.is_empty(), "finals carry no broadcast");

        let early = &records[1];
        assert_eq!(early.game_mode, GameMode::Scheduled);
        assert_eq!(early.status, vec!["14:00"]);
        assert_eq!(early.home_team.long_name, "Spurs");
        assert_eq!(early.home_team.logo_url, "TOT.png");
        assert!(early.broadcast.is_empty());

        let late = &records[2];
        assert_eq!(late.game_mode, GameMode::Scheduled);
        assert_eq!(late.status, vec!["19:00"]);
        assert_eq!(late.broadcast, vec![r#"<img src="logos/broadcast/Peacock.svg" class="broadcastIcon">"#]);
    }

    #[test]
    fn local_timezone_moves_games_across_days() {
        let leagues = LeagueClassifier::new();
        let icons = BroadcastIcons::default();
        // UTC-5: the "yesterday" game kicks off 14:00 local on the 3rd, the
        // others stay on the 4th.
        let fmt = ScoreFormatter::new(&leagues, &icons, FixedOffset::west_opt(5 * 3600).unwrap());
        let cfg = DisplayConfig::new("ENG_PREMIERE_LEAGUE");

        let on_4th = fmt.format(&cfg, &fixture(), ymd(2024, 5, 4));
        assert_eq!(on_4th.len(), 3);
        assert_eq!(on_4th[1].status, vec!["9:00 am"]);

        let on_3rd = fmt.format(&cfg, &fixture(), ymd(2024, 5, 3));
        assert_eq!(on_3rd.len(), 1);
        assert_eq!(on_3rd[0].home_team.code, "EVE");
        assert_eq!(on_3rd[0].status, vec!["Full Time"]);
    }

    #[test]
    fn soccer_on_tv_drops_games_without_broadcasts() {
        let leagues = LeagueClassifier::new();
        let icons = BroadcastIcons::default();
        let fmt = ScoreFormatter::new(&leagues, &icons, Utc);
        let cfg = DisplayConfig::new(SOCCER_ON_TV);

        let records = fmt.format(&cfg, &fixture(), ymd(2024, 5, 4));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].home_team.code, "LIV");
    }

    #[test]
    fn hidden_broadcasts_produce_no_entries() {
        let leagues = LeagueClassifier::new();
        let icons = BroadcastIcons::default();
        let fmt = ScoreFormatter::new(&leagues, &icons, Utc);
        let mut cfg = DisplayConfig::new("ENG_PREMIERE_LEAGUE");
        cfg.hide_broadcasts = true;

        let records = fmt.format(&cfg, &fixture(), ymd(2024, 5, 4));
        assert!(records.iter().all(|r| r.broadcast.is_empty()));
    }

    #[test]
    fn team_filter_with_wildcard_in_collegiate_league() {
        let leagues = LeagueClassifier::new();
        let icons = BroadcastIcons::default();
        let fmt = ScoreFormatter::new(&leagues, &icons, Utc);
        let mut cfg = DisplayConfig::new("NCAAF");
        cfg.teams = Some(vec!["DAL".into(), TOP_25_WILDCARD.into()]);

        let g = group(vec![
            event(
                "dal-usc",
                "2024-09-07T19:00Z",
                "1",
                side("home", "DAL", "Dallas", "0", json!({ "curatedRank": { "current": 99 } })),
                side("away", "USC", "Trojans", "0", json!({ "curatedRank": { "current": 10 } })),
                json!([]),
            ),
            event(
                "nobody",
                "2024-09-07T19:00Z",
                "1",
                side("home", "ABC", "Alphas", "0", json!({ "curatedRank": { "current": 99 } })),
                side("away", "XYZ", "Omegas", "0", json!({ "curatedRank": { "current": 99 } })),
                json!([]),
            ),
        ]);

        let records = fmt.format(&cfg, &g, ymd(2024, 9, 7));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].home_team.code, "DAL");
        assert_eq!(records[0].home_team.rank, None);
        assert_eq!(records[0].visitor_team.rank, Some(10));
        assert_eq!(records[0].visitor_team.long_name, "USC Trojans");
    }

    #[test]
    fn every_record_has_a_known_mode_and_unique_broadcasts() {
        let leagues = LeagueClassifier::new();
        let icons = BroadcastIcons::default();
        let fmt = ScoreFormatter::new(&leagues, &icons, Utc);
        let mut cfg = DisplayConfig::new("USA_MLS");
        cfg.show_local_broadcasts = true;

        let codes = ["0", "1", "2", "3", "7", "23", "47", "49", "99", "", "garbage"];
        let events = codes
            .iter()
            .enumerate()
            .map(|(i, code)| {
                event(
                    &format!("e{i}"),
                    "2024-06-01T18:00Z",
                    code,
                    side("home", &format!("H{i:02}"), "Home", "x", json!({})),
                    side("away", &format!("A{i:02}"), "Away", "", json!({})),
                    json!([
                        { "market": "national", "names": ["ESPN", "ESPN"] },
                        { "market": "home", "names": ["ESPN", "Local"] },
                        { "market": "away", "names": ["Local"] }
                    ]),
                )
            })
            .collect();

        let records = fmt.format(&cfg, &group(events), ymd(2024, 6, 1));
        assert_eq!(records.len(), codes.len());
        for r in &records {
            assert!(matches!(r.game_mode, GameMode::Scheduled | GameMode::Live | GameMode::Final));
            let unique: HashSet<_> = r.broadcast.iter().collect();
            assert_eq!(unique.len(), r.broadcast.len());
            assert_eq!(r.home_team.score, None);
        }
        // same kickoff everywhere: ordered by away code
        let away: Vec<_> = records.iter().map(|r| r.visitor_team.code.clone()).collect();
        let mut sorted = away.clone();
        sorted.sort();
        assert_eq!(away, sorted);
    }

    #[test]
    fn format_response_keeps_groups_separate() {
        let leagues = LeagueClassifier::new();
        let icons = BroadcastIcons::default();
        let fmt = ScoreFormatter::new(&leagues, &icons, Utc);
        let cfg = DisplayConfig::new("ALL_SOCCER");

        let response: ScorepanelResponse = serde_json::from_value(json!({
            "scores": [
                { "leagues": [{ "name": "English Premier League" }], "events": [
                    event("a", "2024-05-04T14:00Z", "1",
                        side("home", "TOT", "Spurs", "0", json!({})),
                        side("away", "BOU", "Bournemouth", "0", json!({})),
                        json!([]))
                ]},
                { "leagues": [{ "name": "Spanish LALIGA" }], "events": [] }
            ]
        }))
        .unwrap();

        let scores = fmt.format_response(&cfg, &response, ymd(2024, 5, 4));
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].label, "English Premier League");
        assert_eq!(scores[0].records.len(), 1);
        assert_eq!(scores[1].label, "Spanish LALIGA");
        assert!(scores[1].records.is_empty());
    }
}
