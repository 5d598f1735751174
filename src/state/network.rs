use crate::state::messages::{NetworkRequest, NetworkResponse, ScoreUpdate};
use chrono::Local;
use log::{debug, error};
use scorepanel_api::broadcast::BroadcastIcons;
use scorepanel_api::client::ScorepanelApi;
use scorepanel_api::{LeagueClassifier, ScoreFormatter};
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct NetworkWorker {
    client: ScorepanelApi,
    leagues: Arc<LeagueClassifier>,
    icons: Arc<BroadcastIcons>,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
}

impl NetworkWorker {
    pub fn new(
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self::with_client(ScorepanelApi::new(), requests, responses)
    }

    pub fn with_client(
        client: ScorepanelApi,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self {
            client,
            leagues: Arc::new(LeagueClassifier::new()),
            icons: Arc::new(BroadcastIcons::default()),
            requests,
            responses,
        }
    }

    /// Each request runs on its own task; a slow league never holds up the rest.
    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            let client = self.client.clone();
            let leagues = self.leagues.clone();
            let icons = self.icons.clone();
            let responses = self.responses.clone();

            tokio::spawn(async move {
                let response = handle_get_scores(&client, &leagues, &icons, request).await;
                if let Err(e) = responses.send(response).await {
                    error!("Failed to send network response: {e}");
                }
            });
        }
    }
}

async fn handle_get_scores(
    client: &ScorepanelApi,
    leagues: &LeagueClassifier,
    icons: &BroadcastIcons,
    request: NetworkRequest,
) -> NetworkResponse {
    let NetworkRequest::GetScores { index, config, day, date } = request;
    debug!("loading {} scores for {}", config.league, date.format("%Y%m%d"));

    let formatter = ScoreFormatter::new(leagues, icons, Local);
    let scores = client.get_scores(&formatter, &config, date).await;

    debug!("{} {}: {} league group(s)", config.league, date.format("%Y%m%d"), scores.len());
    NetworkResponse::ScoreUpdate(ScoreUpdate { index, league: config.league, day, date, scores })
}
