//! League membership tables and per-sport period labels.
//!
//! The tables are plain static slices; `LeagueClassifier` indexes them once
//! and is then shared read-only by every formatting call.

use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SportFamily {
    Soccer,
    Rugby,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueDescriptor {
    pub id: String,
    pub family: SportFamily,
    /// Path below `/apis/site/v2/sports/`, e.g. "soccer/rsa.2".
    pub api_path: String,
}

impl LeagueDescriptor {
    /// The scorepanel endpoint that carries this league. Only two exist, one
    /// per sport; the per-league `api_path` is never fetched directly.
    pub fn scorepanel_path(&self) -> &'static str {
        match self.family {
            SportFamily::Rugby => RUGBY_SCOREPANEL,
            SportFamily::Soccer | SportFamily::Other => SOCCER_SCOREPANEL,
        }
    }
}

const SOCCER_SCOREPANEL: &str = "soccer/scorepanel";
const RUGBY_SCOREPANEL: &str = "rugby/scorepanel";

/// Aggregate "everything on TV" view; suppresses games without broadcasts.
pub const SOCCER_ON_TV: &str = "SOCCER_ON_TV";

const LEAGUE_PATHS: &[(&str, &str)] = &[
    ("ALL_SOCCER", SOCCER_SCOREPANEL),
    (SOCCER_ON_TV, SOCCER_SCOREPANEL),
    ("RSA_FIRST_DIV", "soccer/rsa.2"),
    ("RUGBY", RUGBY_SCOREPANEL),
];

/// Leagues whose curated rank is a poll ranking and whose long names are
/// composed from abbreviation + name.
const COLLEGIATE_LEAGUES: &[&str] = &["NCAAF", "NCAAM"];

const RUGBY_LEAGUES: &[(&str, &str)] = &[
    ("RUGBY", "Rugby"),
    ("PREMIERSHIP_RUGBY", "Premiership Rugby"),
    ("RUGBY_WORLD_CUP", "Rugby World Cup"),
    ("SIX_NATIONS", "Six Nations"),
    ("THE_RUGBY_CHAMPIONSHIP", "The Rugby Championship"),
    ("EUROPEAN_RUGBY_CHAMPIONS_CUP", "European Rugby Champions Cup"),
    ("UNITED_RUGBY_CHAMPIONSHIP", "United Rugby Championship"),
    ("SUPER_RUGBY_PACIFIC", "Super Rugby Pacific"),
    ("OLYMPIC_MENS_7S", "Olympic Men's 7s"),
    ("OLYMPIC_WOMENS_RUGBY_SEVENS", "Olympic Women's Rugby Sevens"),
    ("INTERNATIONAL_TEST_MATCH", "International Test Match"),
    ("URBA_TOP_12", "URBA Top 12"),
    ("MITRE_10_CUP", "Mitre 10 Cup"),
    ("Major League Rugby", "Major League Rugby"),
];

const SOCCER_LEAGUES: &[&str] = &[
    // International
    "AFC_ASIAN_CUP",
    "AFC_ASIAN_CUP_Q",
    "AFF_CUP",
    "AFR_NATIONS_CUP",
    "AFR_NATIONS_CUP_Q",
    "CONCACAF_GOLD_CUP",
    "CONCACAF_NATIONS_Q",
    "CONCACAF_WOMENS_CHAMPIONSHIP",
    "CONMEBOL_COPA_AMERICA",
    "FIFA_CLUB_WORLD_CUP",
    "FIFA_CONFEDERATIONS_CUP",
    "FIFA_MENS_FRIENDLIES",
    "FIFA_MENS_OLYMPICS",
    "FIFA_WOMENS_FRIENDLIES",
    "FIFA_WOMENS_WORLD_CUP",
    "FIFA_WOMENS_OLYMPICS",
    "FIFA_WORLD_CUP",
    "FIFA_WORLD_CUP_Q_AFC",
    "FIFA_WORLD_CUP_Q_CAF",
    "FIFA_WORLD_CUP_Q_CONCACAF",
    "FIFA_WORLD_CUP_Q_CONMEBOL",
    "FIFA_WORLD_CUP_Q_OFC",
    "FIFA_WORLD_CUP_Q_UEFA",
    "FIFA_WORLD_U17",
    "FIFA_WORLD_U20",
    "UEFA_CHAMPIONS",
    "UEFA_EUROPA",
    "UEFA_EUROPEAN_CHAMPIONSHIP",
    "UEFA_EUROPEAN_CHAMPIONSHIP_Q",
    "UEFA_EUROPEAN_CHAMPIONSHIP_U19",
    "UEFA_EUROPEAN_CHAMPIONSHIP_U21",
    "UEFA_NATIONS",
    "SAFF_CHAMPIONSHIP",
    "WOMENS_EUROPEAN_CHAMPIONSHIP",
    // UK / Ireland
    "ENG_CARABAO_CUP",
    "ENG_CHAMPIONSHIP",
    "ENG_EFL",
    "ENG_FA_CUP",
    "ENG_LEAGUE_1",
    "ENG_LEAGUE_2",
    "ENG_NATIONAL",
    "ENG_PREMIERE_LEAGUE",
    "IRL_PREM",
    "NIR_PREM",
    "SCO_PREM",
    "SCO_CHAMPIONSHIP",
    "SCO_CHALLENGE_CUP",
    "SCO_CIS",
    "SCO_CUP",
    "SCO_LEAGUE_1",
    "SCO_LEAGUE_2",
    "WAL_PREM",
    // Europe
    "AUT_BUNDESLIGA",
    "BEL_DIV_A",
    "DEN_SAS_LIGAEN",
    "ESP_COPA_DEL_REY",
    "ESP_LALIGA",
    "ESP_SEGUNDA_DIV",
    "FRA_COUPE_DE_FRANCE",
    "FRA_COUPE_DE_LA_LIGUE",
    "FRA_LIGUE_1",
    "FRA_LIGUE_2",
    "GER_2_BUNDESLIGA",
    "GER_BUNDESLIGA",
    "GER_DFB_POKAL",
    "GRE_SUPER_LEAGUE",
    "ISR_PREMIER_LEAGUE",
    "ITA_COPPA_ITALIA",
    "ITA_SERIE_A",
    "ITA_SERIE_B",
    "MLT_PREMIER_LEAGUE",
    "NED_EERSTE_DIVISIE",
    "NED_EREDIVISIE",
    "NED_KNVB_BEKER",
    "NOR_ELITESERIEN",
    "POR_LIGA",
    "ROU_FIRST_DIV",
    "RUS_PREMIER_LEAGUE",
    "TUR_SUPER_LIG",
    "SUI_SUPER_LEAGUE",
    "SWE_ALLSVENSKANLIGA",
    // South America
    "ARG_COPA",
    "ARG_NACIONAL_B",
    "ARG_PRIMERA_DIV_B",
    "ARG_PRIMERA_DIV_C",
    "ARG_PRIMERA_DIV_D",
    "ARG_SUPERLIGA",
    "BOL_LIGA_PRO",
    "BRA_CAMP_CARIOCA",
    "BRA_CAMP_GAUCHO",
    "BRA_CAMP_MINEIRO",
    "BRA_CAMP_PAULISTA",
    "BRA_COPA",
    "BRA_SERIE_A",
    "BRA_SERIE_B",
    "BRA_SERIE_C",
    "CHI_COPA",
    "CHI_PRIMERA_DIV",
    "COL_COPA",
    "COL_PRIMERA_A",
    "COL_PRIMERA_B",
    "CONMEBOL_COPA_LIBERTADORES",
    "CONMEBOL_COPA_SUDAMERICANA",
    "ECU_PRIMERA_A",
    "PAR_PRIMERA_DIV",
    "PER_PRIMERA_PRO",
    "URU_PRIMERA_DIV",
    "VEN_PRIMERA_PRO",
    // North America
    "CONCACAF_CHAMPIONS",
    "CONCACAF_LEAGUE",
    "CRC_PRIMERA_DIV",
    "GUA_LIGA_NACIONAL",
    "HON_PRIMERA_DIV",
    "JAM_PREMIER_LEAGUE",
    "MEX_ASCENSO_MX",
    "MEX_COPA_MX",
    "MEX_LIGA_BANCOMER",
    "SLV_PRIMERA_DIV",
    "USA_MLS",
    "USA_NCAA_SL_M",
    "USA_NCAA_SL_W",
    "USA_NASL",
    "USA_NWSL",
    "USA_OPEN",
    "USA_USL",
    // Asia
    "AFC_CHAMPIONS",
    "AUS_A_LEAGUE",
    "CHN_SUPER_LEAGUE",
    "IDN_SUPER_LEAGUE",
    "IND_I_LEAGUE",
    "IND_SUPER_LEAGUE",
    "JPN_J_LEAGUE",
    "MYS_SUPER_LEAGUE",
    "SGP_PREMIER_LEAGUE",
    "THA_PREMIER_LEAGUE",
    // Africa
    "CAF_CHAMPIONS",
    "CAF_CONFED_CUP",
    "GHA_PREMIERE_LEAGUE",
    "KEN_PREMIERE_LEAGUE",
    "NGA_PRO_LEAGUE",
    "RSA_FIRST_DIV",
    "RSA_NEDBANK_CUP",
    "RSA_PREMIERSHIP",
    "RSA_TELKOM_KNOCKOUT",
    "UGA_SUPER_LEAGUE",
    "ZAM_SUPER_LEAGUE",
    "ZIM_PREMIER_LEAGUE",
];

/// Read-only league lookup, built once at startup.
#[derive(Debug, Clone)]
pub struct LeagueClassifier {
    soccer: HashSet<&'static str>,
    rugby: HashMap<&'static str, &'static str>,
    rugby_names: HashSet<&'static str>,
    paths: HashMap<&'static str, &'static str>,
    collegiate: HashSet<&'static str>,
}

impl Default for LeagueClassifier {
    fn default() -> Self {
        Self {
            soccer: SOCCER_LEAGUES.iter().copied().collect(),
            rugby: RUGBY_LEAGUES.iter().copied().collect(),
            rugby_names: RUGBY_LEAGUES.iter().map(|(_, name)| *name).collect(),
            paths: LEAGUE_PATHS.iter().copied().collect(),
            collegiate: COLLEGIATE_LEAGUES.iter().copied().collect(),
        }
    }
}

impl LeagueClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_soccer(&self, league: &str) -> bool {
        self.soccer.contains(league)
    }

    /// Rugby membership matches either the league id or its display name.
    pub fn is_rugby(&self, league: &str) -> bool {
        self.rugby.contains_key(league) || self.rugby_names.contains(league)
    }

    pub fn is_collegiate(&self, league: &str) -> bool {
        self.collegiate.contains(league)
    }

    pub fn rugby_display_name(&self, league: &str) -> Option<&'static str> {
        self.rugby.get(league).copied()
    }

    pub fn family(&self, league: &str) -> SportFamily {
        if self.is_soccer(league) {
            SportFamily::Soccer
        } else if self.is_rugby(league) {
            SportFamily::Rugby
        } else {
            SportFamily::Other
        }
    }

    /// Never fails: unlisted leagues fall back to the feed's default path.
    pub fn classify(&self, league: &str) -> LeagueDescriptor {
        let api_path = match self.paths.get(league) {
            Some(path) => *path,
            None if self.is_rugby(league) => RUGBY_SCOREPANEL,
            None => SOCCER_SCOREPANEL,
        };
        LeagueDescriptor {
            id: league.to_owned(),
            family: self.family(league),
            api_path: api_path.to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// Period labels
//
// Display helpers for long-form period text. Like broadcast entries they
// return host markup, not plain text.
// ---------------------------------------------------------------------------

/// "1<sup>ST</sup>", "2<sup>ND</sup>", "11<sup>TH</sup>", "21<sup>ST</sup>", ...
pub fn ordinal(p: u32) -> String {
    let suffix = match (p % 10, p % 100) {
        (1, m) if m != 11 => "ST",
        (2, m) if m != 12 => "ND",
        (3, m) if m != 13 => "RD",
        _ => "TH",
    };
    format!("{p}<sup>{suffix}</sup>")
}

/// Long-form label for the period currently being played. Plain periods
/// use `ordinal` markup.
pub fn period_label(family: SportFamily, p: u32) -> String {
    match family {
        SportFamily::Soccer if p > 2 => "ET".into(),
        // halves don't need a label
        SportFamily::Soccer => String::new(),
        _ if p == 5 => "OT".into(),
        _ if p > 5 => format!("{}OT", p - 4),
        _ => ordinal(p),
    }
}

/// Suffix appended to a final status when the game ran past regulation.
pub fn final_overtime_suffix(league: &str, family: SportFamily, p: u32) -> String {
    match family {
        SportFamily::Soccer if p > 2 => " (ET)".into(),
        SportFamily::Soccer => String::new(),
        _ if league == "MLB" => {
            if p > 9 {
                format!(" ({p})")
            } else {
                String::new()
            }
        }
        _ if p == 5 => " (OT)".into(),
        _ if p > 5 => format!(" ({}OT)", p - 4),
        _ => String::new(),
    }
}
