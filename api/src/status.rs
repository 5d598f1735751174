//! ESPN `status.type.id` → game phase, status text and broadcast eligibility.
//!
//! The mapping is a flat table so every code is visible in one place. Codes
//! that aren't listed resolve through `FALLBACK`, which keeps the game in the
//! scheduled phase and shows whatever detail text the feed sent.

use crate::config::ClockFormat;
use crate::espn::{EspnCompetitor, EspnEvent, FeedNumber};
use crate::filter::kickoff;
use crate::GameMode;
use chrono::TimeZone;
use std::fmt::Display;

/// Where a rule takes its status line from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusText {
    Detail,
    ShortDetail,
    Description,
    Fixed(&'static str),
    /// Local kickoff time in the configured clock format.
    KickoffTime,
    /// "FT (PK) <home>x<visitor>" from the shootout scores.
    PenaltyShootout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusRule {
    pub codes: &'static [&'static str],
    pub phase: GameMode,
    pub text: StatusText,
    /// Whether resolved broadcasts are attached to the record.
    pub broadcast: bool,
    pub class: Option<&'static str>,
}

const fn rule(
    codes: &'static [&'static str],
    phase: GameMode,
    text: StatusText,
    broadcast: bool,
) -> StatusRule {
    StatusRule { codes, phase, text, broadcast, class: None }
}

pub const STATUS_TABLE: &[StatusRule] = &[
    // not started
    rule(&["5", "6"], GameMode::Scheduled, StatusText::Detail, false), // cancelled, postponed
    rule(&["0"], GameMode::Scheduled, StatusText::Fixed("TBD"), false),
    rule(&["8"], GameMode::Scheduled, StatusText::Fixed("Suspended"), false),
    rule(&["1"], GameMode::Scheduled, StatusText::KickoffTime, true),
    // in progress: in-progress, start/end of period, overtime, soccer halves,
    // golden time, shootout, end of extra time
    rule(
        &["2", "21", "22", "24", "25", "26", "43", "44", "48"],
        GameMode::Live,
        StatusText::ShortDetail,
        true,
    ),
    rule(&["23"], GameMode::Live, StatusText::Description, true), // halftime
    StatusRule {
        codes: &["7", "17"], // delayed, rain delay
        phase: GameMode::Live,
        text: StatusText::Fixed("Delay"),
        broadcast: true,
        class: Some("delay"),
    },
    rule(&["49"], GameMode::Live, StatusText::Fixed("HALFTIME (ET)"), true),
    // completed
    rule(&["3", "28"], GameMode::Final, StatusText::Description, false), // final, full time
    rule(&["45", "46"], GameMode::Final, StatusText::Fixed("FT (AET)"), false),
    rule(&["47"], GameMode::Final, StatusText::PenaltyShootout, false),
    rule(&["4", "9", "10"], GameMode::Final, StatusText::Fixed("Forfeit"), false),
];

pub const FALLBACK: StatusRule = rule(&[], GameMode::Scheduled, StatusText::Detail, false);

/// Look up the rule for a status code. Total: unknown codes get `FALLBACK`.
pub fn classify(code: &str) -> &'static StatusRule {
    STATUS_TABLE
        .iter()
        .find(|r| r.codes.contains(&code))
        .unwrap_or(&FALLBACK)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusOutcome {
    pub phase: GameMode,
    pub text: String,
    pub broadcast: bool,
    pub class: Option<&'static str>,
}

/// Resolve an event's status into its phase and display text.
pub fn resolve<Tz>(
    event: &EspnEvent,
    home: &EspnCompetitor,
    visitor: &EspnCompetitor,
    clock: ClockFormat,
    tz: &Tz,
) -> StatusOutcome
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let status_type = event.status_type();
    let code = status_type.and_then(|t| t.id.as_deref()).unwrap_or_default();
    let detail = || status_type.and_then(|t| t.detail.clone()).unwrap_or_default();

    let rule = classify(code);
    let text = match rule.text {
        StatusText::Detail => detail(),
        StatusText::ShortDetail => status_type
            .and_then(|t| t.short_detail.clone())
            .unwrap_or_default(),
        StatusText::Description => status_type
            .and_then(|t| t.description.clone())
            .unwrap_or_default(),
        StatusText::Fixed(s) => s.to_owned(),
        StatusText::KickoffTime => kickoff(event)
            .map(|k| k.with_timezone(tz).format(clock.pattern()).to_string())
            .unwrap_or_else(detail),
        StatusText::PenaltyShootout => format!("FT (PK) {}", shootout_score(home, visitor)),
    };

    StatusOutcome { phase: rule.phase, text, broadcast: rule.broadcast, class: rule.class }
}

/// "<home>x<visitor>"; a missing shootout score shows as "-".
pub fn shootout_score(home: &EspnCompetitor, visitor: &EspnCompetitor) -> String {
    let side = |c: &EspnCompetitor| {
        c.shootout_score
            .as_ref()
            .and_then(FeedNumber::as_u32)
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".into())
    };
    format!("{}x{}", side(home), side(visitor))
}
