//! Broadcast channel resolution: compound-name rewriting, national/local
//! market admission, icon lookup and de-duplication.

use crate::config::DisplayConfig;
use crate::espn::{EspnBroadcast, EspnCompetitor};
use std::collections::{HashMap, HashSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Channel name rewriting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    Prefix(&'static str),
    Exact(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub enum SubLabel {
    /// Whatever follows the matched prefix, minus any of the listed leading words.
    Remainder { strip: &'static [&'static str] },
    Fixed(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct ChannelRewrite {
    pub matcher: Matcher,
    pub canonical: &'static str,
    pub label: SubLabel,
    /// CSS class wrapped around the sub-label.
    pub class: &'static str,
}

/// Evaluated in order; the first match wins.
pub const CHANNEL_REWRITES: &[ChannelRewrite] = &[
    ChannelRewrite {
        matcher: Matcher::Prefix("FanDuel"),
        canonical: "FanDuel",
        label: SubLabel::Remainder { strip: &["SN "] },
        class: "FanDuel",
    },
    ChannelRewrite {
        matcher: Matcher::Prefix("NBC Sports"),
        canonical: "NBC Sports",
        label: SubLabel::Remainder { strip: &[] },
        class: "NBCSports",
    },
    ChannelRewrite {
        matcher: Matcher::Exact("Space City Home (Alt.)"),
        canonical: "Space City Home Network",
        label: SubLabel::Fixed("(Alt.)"),
        class: "SpaceCityHome",
    },
    ChannelRewrite {
        matcher: Matcher::Exact("MSGB"),
        canonical: "MSG",
        label: SubLabel::Fixed("B"),
        class: "MSG",
    },
];

/// A channel name after rewriting: "FanDuel SN East" → ("FanDuel", "East").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub name: String,
    pub label: Option<(String, &'static str)>,
}

pub fn rewrite_channel(raw: &str) -> Channel {
    for rw in CHANNEL_REWRITES {
        let remainder = match rw.matcher {
            Matcher::Prefix(p) => raw.strip_prefix(p),
            Matcher::Exact(e) => (raw == e).then_some(""),
        };
        let Some(remainder) = remainder else {
            continue;
        };

        let label = match rw.label {
            SubLabel::Fixed(s) => s.to_owned(),
            SubLabel::Remainder { strip } => {
                let mut rest = remainder.trim_start();
                for word in strip {
                    rest = rest.strip_prefix(word).unwrap_or(rest);
                }
                rest.trim().to_owned()
            }
        };

        return Channel {
            name: rw.canonical.to_owned(),
            label: (!label.is_empty()).then_some((label, rw.class)),
        };
    }

    Channel { name: raw.to_owned(), label: None }
}

// ---------------------------------------------------------------------------
// Icons
// ---------------------------------------------------------------------------

const ICON_DIR: &str = "logos/broadcast";

const DEFAULT_ICONS: &[(&str, &str)] = &[
    ("ABC", "ABC.svg"),
    ("Apple TV", "AppleTV.svg"),
    ("beIN SPORTS", "beINSPORTS.svg"),
    ("CBS", "CBS.svg"),
    ("ESPN", "ESPN.svg"),
    ("ESPN2", "ESPN2.svg"),
    ("ESPN+", "ESPNPlus.svg"),
    ("ESPNU", "ESPNU.svg"),
    ("FanDuel", "FanDuel.svg"),
    ("FOX", "FOX.svg"),
    ("FS1", "FS1.svg"),
    ("FS2", "FS2.svg"),
    ("MSG", "MSG.svg"),
    ("NBC", "NBC.svg"),
    ("NBC Sports", "NBCSports.svg"),
    ("Paramount+", "ParamountPlus.svg"),
    ("Peacock", "Peacock.svg"),
    ("Space City Home Network", "SpaceCityHome.svg"),
    ("Telemundo", "Telemundo.svg"),
    ("TNT", "TNT.svg"),
    ("truTV", "truTV.svg"),
    ("TUDN", "TUDN.svg"),
    ("UniMás", "UniMas.svg"),
    ("Univision", "Univision.svg"),
    ("USA Net", "USANetwork.svg"),
];

/// Dark-on-transparent marks that need inverting on a black background.
const DEFAULT_INVERTED_ICONS: &[(&str, &str)] = &[
    ("Amazon Prime Video", "PrimeVideo.svg"),
    ("CBS Sports Network", "CBSSN.svg"),
    ("Fox Deportes", "FoxDeportes.svg"),
    ("Max", "Max.svg"),
    ("TSN", "TSN.svg"),
];

fn icon_table(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(name, file)| (name.to_string(), format!("{ICON_DIR}/{file}")))
        .collect()
}

/// Channel name → icon URL, in normal and inverted-colour variants.
#[derive(Debug, Clone)]
pub struct BroadcastIcons {
    normal: HashMap<String, String>,
    inverted: HashMap<String, String>,
}

impl Default for BroadcastIcons {
    fn default() -> Self {
        Self { normal: icon_table(DEFAULT_ICONS), inverted: icon_table(DEFAULT_INVERTED_ICONS) }
    }
}

impl BroadcastIcons {
    pub fn new(normal: HashMap<String, String>, inverted: HashMap<String, String>) -> Self {
        Self { normal, inverted }
    }

    /// Icon URL and whether it is the inverted variant. Normal icons win.
    pub fn lookup(&self, channel: &str) -> Option<(&str, bool)> {
        self.normal
            .get(channel)
            .map(|src| (src.as_str(), false))
            .or_else(|| self.inverted.get(channel).map(|src| (src.as_str(), true)))
    }
}

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BroadcastEntry {
    Icon { src: String, inverted: bool, label: Option<(String, &'static str)> },
    Text(String),
}

impl BroadcastEntry {
    pub fn from_channel(channel: Channel, icons: &BroadcastIcons) -> Self {
        match icons.lookup(&channel.name) {
            Some((src, inverted)) => BroadcastEntry::Icon {
                src: src.to_owned(),
                inverted,
                label: channel.label,
            },
            None => BroadcastEntry::Text(channel.name),
        }
    }
}

impl fmt::Display for BroadcastEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BroadcastEntry::Icon { src, inverted, label } => {
                let class = if *inverted {
                    "broadcastIcon broadcastIconInvert"
                } else {
                    "broadcastIcon"
                };
                write!(f, r#"<img src="{src}" class="{class}">"#)?;
                if let Some((text, css)) = label {
                    write!(f, r#"<span class="{css}">{text}</span>"#)?;
                }
                Ok(())
            }
            BroadcastEntry::Text(name) => f.write_str(name),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BroadcastResolution {
    /// Rendered entries, de-duplicated in first-seen order.
    pub entries: Vec<String>,
    /// Local channels that weren't shown; for diagnostics only.
    pub rejected: Vec<String>,
}

/// Resolve an event's broadcast markets into display entries.
pub fn resolve(
    markets: &[EspnBroadcast],
    competitors: &[EspnCompetitor],
    config: &DisplayConfig,
    icons: &BroadcastIcons,
) -> BroadcastResolution {
    let mut out = BroadcastResolution::default();
    if config.hide_broadcasts {
        return out;
    }

    let mut admitted: Vec<BroadcastEntry> = Vec::new();

    for market in markets.iter().filter(|m| m.market.as_deref() == Some("national")) {
        for raw in &market.names {
            let channel = rewrite_channel(raw);
            if !config.is_skipped(&channel.name) {
                admitted.push(BroadcastEntry::from_channel(channel, icons));
            }
        }
    }

    for market in markets {
        let Some(side) = market.market.as_deref().filter(|m| matches!(*m, "home" | "away")) else {
            continue;
        };
        let market_wanted = competitors.iter().any(|c| {
            c.home_away.as_deref() == Some(side)
                && c.abbreviation().is_some_and(|code| config.is_local_market(code))
        });

        for raw in &market.names {
            let channel = rewrite_channel(raw);
            let skipped = config.is_skipped(&channel.name);
            let requested = config.is_local_channel_requested(&channel.name);

            // an explicit request wins over the skip-list
            if ((config.show_local_broadcasts || market_wanted) && !skipped) || requested {
                admitted.push(BroadcastEntry::from_channel(channel, icons));
            } else if !config.show_local_broadcasts && !skipped {
                out.rejected.push(channel.name);
            }
        }
    }

    let mut seen = HashSet::new();
    out.entries = admitted
        .into_iter()
        .map(|e| e.to_string())
        .filter(|e| seen.insert(e.clone()))
        .collect();

    let mut seen = HashSet::new();
    out.rejected.retain(|name| seen.insert(name.clone()));
    out
}
