use crate::espn::{EspnCompetitor, FeedNumber};
use crate::status::StatusOutcome;
use crate::{GameRecord, TeamRecord};

/// Static fix-ups for team codes that collide across divisions.
#[derive(Debug, Clone, Copy)]
pub struct AbbreviationOverride {
    pub league: &'static str,
    pub abbreviation: &'static str,
    pub location_contains: &'static str,
    pub replacement: &'static str,
}

/// NCAAF has an FBS and an FCS "SDSU". The FCS school gets a trailing space,
/// which selects its own logo file and collapses away when displayed.
pub const ABBREVIATION_OVERRIDES: &[AbbreviationOverride] = &[AbbreviationOverride {
    league: "NCAAF",
    abbreviation: "SDSU",
    location_contains: "South Dakota State",
    replacement: "SDSU ",
}];

/// Pick (home, away) by each competitor's `homeAway` flag.
///
/// Feed position is only consulted for a competitor whose flag is missing.
pub fn split_home_away(
    competitors: &[EspnCompetitor],
) -> (Option<&EspnCompetitor>, Option<&EspnCompetitor>) {
    let home = competitors.iter().find(|c| c.is_home());
    let away = competitors.iter().find(|c| c.is_away());
    let other_than = |taken: &EspnCompetitor| {
        competitors.iter().find(|c| !std::ptr::eq(*c, taken))
    };

    match (home, away) {
        (Some(h), Some(a)) => (Some(h), Some(a)),
        (Some(h), None) => (Some(h), other_than(h)),
        (None, Some(a)) => (other_than(a), Some(a)),
        (None, None) => (competitors.first(), competitors.get(1)),
    }
}

/// Rank 1–25 passes through; anything else is unranked.
pub fn format_t25_ranking(rank: Option<u32>) -> Option<u8> {
    rank.filter(|r| (1..=25).contains(r)).and_then(|r| u8::try_from(r).ok())
}

fn team_code(league: &str, c: &EspnCompetitor) -> String {
    let team = c.team.as_ref();
    let Some(abbr) = c.abbreviation() else {
        // No code in the feed: first four letters of the name, upper-cased,
        // with a trailing space to keep the column width.
        let name = team.and_then(|t| t.name.as_deref()).unwrap_or_default();
        let short: String = name.chars().take(4).collect();
        return format!("{} ", short.to_uppercase());
    };

    let location = team.and_then(|t| t.location.as_deref()).unwrap_or_default();
    ABBREVIATION_OVERRIDES
        .iter()
        .find(|o| o.league == league && o.abbreviation == abbr && location.contains(o.location_contains))
        .map(|o| o.replacement.to_owned())
        .unwrap_or_else(|| abbr.to_owned())
}

fn long_name(c: &EspnCompetitor, collegiate: bool) -> String {
    let Some(team) = c.team.as_ref() else {
        return String::new();
    };
    if collegiate {
        let name = team.name.as_deref().unwrap_or_default();
        match team.abbreviation.as_deref() {
            Some(abbr) => format!("{abbr} {name}"),
            None => name.to_owned(),
        }
    } else {
        team.short_display_name
            .clone()
            .or_else(|| team.display_name.clone())
            .or_else(|| team.name.clone())
            .unwrap_or_default()
    }
}

/// Build one side of the record. A missing competitor yields an empty side.
pub fn team_record(c: Option<&EspnCompetitor>, league: &str, collegiate: bool) -> TeamRecord {
    let Some(c) = c else {
        return TeamRecord::default();
    };
    TeamRecord {
        code: team_code(league, c),
        long_name: long_name(c, collegiate),
        rank: if collegiate { format_t25_ranking(c.rank()) } else { None },
        score: c.score.as_ref().and_then(FeedNumber::as_u32),
        logo_url: c
            .team
            .as_ref()
            .and_then(|t| t.logo.clone())
            .unwrap_or_default(),
    }
}

/// Assemble the canonical record for one event.
pub fn build_record(
    league: &str,
    collegiate: bool,
    competitors: &[EspnCompetitor],
    status: StatusOutcome,
    broadcast: Vec<String>,
) -> GameRecord {
    let (home, visitor) = split_home_away(competitors);
    GameRecord {
        classes: status.class.map(|c| vec![c.to_owned()]).unwrap_or_default(),
        game_mode: status.phase,
        home_team: team_record(home, league, collegiate),
        visitor_team: team_record(visitor, league, collegiate),
        status: vec![status.text],
        broadcast: if status.broadcast { broadcast } else { Vec::new() },
    }
}
