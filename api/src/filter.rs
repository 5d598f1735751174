//! Team/date selection and kickoff ordering of a score group's events.

use crate::config::DisplayConfig;
use crate::espn::EspnEvent;
use crate::record::split_home_away;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::debug;

const TOP_25: std::ops::RangeInclusive<u32> = 1..=25;

/// Parse an ESPN timestamp. The feed usually drops seconds ("2024-03-09T20:00Z").
pub fn parse_feed_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%MZ").map(|n| n.and_utc()))
        .ok()
}

/// Kickoff time of the event, from the event date or its first competition.
pub fn kickoff(event: &EspnEvent) -> Option<DateTime<Utc>> {
    event
        .date
        .as_deref()
        .and_then(parse_feed_date)
        .or_else(|| {
            event
                .competition()
                .and_then(|c| c.date.as_deref())
                .and_then(parse_feed_date)
        })
}

/// Team filter. No team list keeps everything.
pub fn matches_teams(event: &EspnEvent, config: &DisplayConfig) -> bool {
    let Some(teams) = config.teams.as_ref() else {
        return true;
    };
    let competitors = event.competitors();

    if config.wants_top_25()
        && competitors
            .iter()
            .any(|c| c.rank().is_some_and(|r| TOP_25.contains(&r)))
    {
        return true;
    }

    competitors
        .iter()
        .filter_map(|c| c.abbreviation())
        .any(|code| teams.iter().any(|t| t == code))
}

/// True when the kickoff, seen from `tz`, falls on `date`.
///
/// The scorepanel for one date can include games from the neighbouring UTC
/// day, so this compares local calendar dates rather than trusting the query.
pub fn on_date<Tz: TimeZone>(event: &EspnEvent, date: NaiveDate, tz: &Tz) -> bool {
    match kickoff(event) {
        Some(k) => k.with_timezone(tz).date_naive() == date,
        None => {
            debug!(
                "dropping event {} with unparseable date {:?}",
                event.id.as_deref().unwrap_or("?"),
                event.date
            );
            false
        }
    }
}

fn away_code(event: &EspnEvent) -> &str {
    let (_, away) = split_home_away(event.competitors());
    away.and_then(|c| c.abbreviation()).unwrap_or_default()
}

/// Stable sort by kickoff, then by the away team's code.
pub fn sort_events(events: &mut [&EspnEvent]) {
    events.sort_by(|a, b| {
        kickoff(a)
            .cmp(&kickoff(b))
            .then_with(|| away_code(a).cmp(away_code(b)))
    });
}

/// Filter a score group's events for this config and date, in display order.
pub fn select<'a, Tz: TimeZone>(
    events: &'a [EspnEvent],
    config: &DisplayConfig,
    date: NaiveDate,
    tz: &Tz,
) -> Vec<&'a EspnEvent> {
    let mut selected: Vec<&EspnEvent> = events
        .iter()
        .filter(|e| matches_teams(e, config))
        .filter(|e| on_date(e, date, tz))
        .collect();
    sort_events(&mut selected);
    selected
}
