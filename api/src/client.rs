use crate::config::DisplayConfig;
use crate::espn::ScorepanelResponse;
use crate::format::ScoreFormatter;
use crate::LeagueScores;
use chrono::{NaiveDate, TimeZone};
use log::{debug, error};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

const ESPN_SITE_V2_SPORTS: &str = "https://site.api.espn.com/apis/site/v2/sports";
const RESULT_LIMIT: u32 = 200;

/// Scorepanel client backed by ESPN's public scoreboard endpoints.
///
/// ESPN hands these out without an API key. Keep it to one request per
/// league and day per refresh.
#[derive(Debug, Clone)]
pub struct ScorepanelApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for ScorepanelApi {
    fn default() -> Self {
        Self {
            client: Client::builder()
                .user_agent("scorepanel/0.1 (scoreboard feed normalizer)")
                .build()
                .unwrap_or_default(),
            base_url: ESPN_SITE_V2_SPORTS.to_owned(),
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl ScorepanelApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the client at another host, e.g. a local mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_owned(), ..Self::default() }
    }

    pub fn scorepanel_url(&self, api_path: &str, date: NaiveDate) -> String {
        format!(
            "{}/{api_path}?dates={}&limit={RESULT_LIMIT}",
            self.base_url,
            date.format("%Y%m%d")
        )
    }

    /// Fetch the raw scorepanel for a sport path ("soccer/scorepanel") and date.
    pub async fn fetch_scorepanel(
        &self,
        api_path: &str,
        date: NaiveDate,
    ) -> ApiResult<ScorepanelResponse> {
        let url = self.scorepanel_url(api_path, date);
        let raw: ScorepanelResponse = self.get(&url).await?;
        debug!("{url} fetched ({} league groups)", raw.scores.len());
        Ok(raw)
    }

    /// Fetch and format one league's scores for `date`.
    ///
    /// Failures are logged and produce an empty list, so one bad request
    /// never takes down its siblings.
    pub async fn get_scores<Tz>(
        &self,
        formatter: &ScoreFormatter<'_, Tz>,
        config: &DisplayConfig,
        date: NaiveDate,
    ) -> Vec<LeagueScores>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let league = formatter.leagues().classify(&config.league);
        match self.fetch_scorepanel(league.scorepanel_path(), date).await {
            Ok(raw) => formatter.format_response(config, &raw, date),
            Err(e) => {
                error!("{} scores for {}: {e}", config.league, date.format("%Y%m%d"));
                Vec::new()
            }
        }
    }

    async fn get<T: Default + serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        match response.error_for_status() {
            Ok(res) => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Parsing(e, url.to_owned())),
            Err(e) => {
                if e.status().map(|s| s.is_client_error()).unwrap_or(false) {
                    Ok(T::default())
                } else {
                    Err(ApiError::Api(e, url.to_owned()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcast::BroadcastIcons;
    use crate::league::LeagueClassifier;
    use chrono::Utc;
    use mockito::Matcher;

    const BODY: &str = r#"{
        "scores": [{
            "leagues": [{ "name": "Six Nations" }],
            "events": [{
                "id": "1",
                "date": "2024-03-16T14:15Z",
                "status": { "type": { "id": "28", "description": "Full Time" } },
                "competitions": [{
                    "competitors": [
                        { "homeAway": "home", "score": "24", "team": { "abbreviation": "WAL", "shortDisplayName": "Wales" } },
                        { "homeAway": "away", "score": "45", "team": { "abbreviation": "ITA", "shortDisplayName": "Italy" } }
                    ]
                }]
            }]
        }]
    }"#;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn query(date: &str) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("dates".into(), date.into()),
            Matcher::UrlEncoded("limit".into(), "200".into()),
        ])
    }

    #[test]
    fn url_carries_date_and_limit() {
        let api = ScorepanelApi::with_base_url("http://localhost/");
        assert_eq!(
            api.scorepanel_url("soccer/rsa.2", ymd(2024, 1, 9)),
            "http://localhost/soccer/rsa.2?dates=20240109&limit=200"
        );
    }

    #[tokio::test]
    async fn fetches_and_formats_rugby_group() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rugby/scorepanel")
            .match_query(query("20240316"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BODY)
            .create_async()
            .await;

        let api = ScorepanelApi::with_base_url(server.url());
        let leagues = LeagueClassifier::new();
        let icons = BroadcastIcons::default();
        let formatter = ScoreFormatter::new(&leagues, &icons, Utc);

        let scores = api
            .get_scores(&formatter, &DisplayConfig::new("SIX_NATIONS"), ymd(2024, 3, 16))
            .await;

        mock.assert_async().await;
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].label, "Six Nations");
        let game = &scores[0].records[0];
        assert_eq!(game.home_team.code, "WAL");
        assert_eq!(game.visitor_team.score, Some(45));
        assert_eq!(game.status, vec!["Full Time"]);
    }

    #[tokio::test]
    async fn league_with_own_path_still_reads_the_sport_scorepanel() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/soccer/scorepanel")
            .match_query(query("20240316"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "scores": [{ "leagues": [{ "name": "Motsepe Foundation Championship" }], "events": [] }] }"#)
            .create_async()
            .await;

        let api = ScorepanelApi::with_base_url(server.url());
        let leagues = LeagueClassifier::new();
        let icons = BroadcastIcons::default();
        let formatter = ScoreFormatter::new(&leagues, &icons, Utc);

        let scores = api
            .get_scores(&formatter, &DisplayConfig::new("RSA_FIRST_DIV"), ymd(2024, 3, 16))
            .await;

        mock.assert_async().await;
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].label, "Motsepe Foundation Championship");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let api = ScorepanelApi::with_base_url("http://127.0.0.1:1");
        let err = api
            .fetch_scorepanel("soccer/scorepanel", ymd(2024, 3, 16))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(..)));
        assert!(err.to_string().starts_with("Network error for http://127.0.0.1:1/soccer/scorepanel"));
    }

    #[tokio::test]
    async fn client_error_decodes_to_empty_response() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/soccer/scorepanel")
            .match_query(query("20240316"))
            .with_status(404)
            .create_async()
            .await;

        let api = ScorepanelApi::with_base_url(server.url());
        let raw = api.fetch_scorepanel("soccer/scorepanel", ymd(2024, 3, 16)).await.unwrap();
        assert!(raw.scores.is_empty());
    }

    #[tokio::test]
    async fn server_error_and_bad_body_yield_no_scores() {
        let mut server = mockito::Server::new_async().await;
        let _broken = server
            .mock("GET", "/soccer/scorepanel")
            .match_query(query("20240316"))
            .with_status(503)
            .create_async()
            .await;
        let _garbage = server
            .mock("GET", "/soccer/scorepanel")
            .match_query(query("20240317"))
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let api = ScorepanelApi::with_base_url(server.url());
        assert!(matches!(
            api.fetch_scorepanel("soccer/scorepanel", ymd(2024, 3, 16)).await,
            Err(ApiError::Api(..))
        ));
        assert!(matches!(
            api.fetch_scorepanel("soccer/scorepanel", ymd(2024, 3, 17)).await,
            Err(ApiError::Parsing(..))
        ));

        let leagues = LeagueClassifier::new();
        let icons = BroadcastIcons::default();
        let formatter = ScoreFormatter::new(&leagues, &icons, Utc);
        let scores = api
            .get_scores(&formatter, &DisplayConfig::new("USA_MLS"), ymd(2024, 3, 16))
            .await;
        assert!(scores.is_empty());
    }
}
