use crate::state::app_settings::AppSettings;
use crate::state::messages::NetworkRequest;
use chrono::Local;
use log::debug;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Re-issues every instance's requests on a fixed period.
/// "Today" is re-read on each tick so the panel rolls over at local midnight.
pub struct PeriodicRefresher {
    settings: Arc<AppSettings>,
    period: Duration,
    network_requests: mpsc::Sender<NetworkRequest>,
}

impl PeriodicRefresher {
    pub fn new(
        settings: Arc<AppSettings>,
        period: Duration,
        network_requests: mpsc::Sender<NetworkRequest>,
    ) -> Self {
        Self { settings, period, network_requests }
    }

    pub async fn run(self) {
        let mut scores_interval = interval(self.period);
        // Skip the immediate first tick so startup loading isn't double-triggered.
        scores_interval.tick().await;

        loop {
            scores_interval.tick().await;
            let today = Local::now().date_naive();
            debug!("refreshing {} instance(s)", self.settings.instances.len());
            for request in self.settings.requests(today) {
                if self.network_requests.send(request).await.is_err() {
                    return;
                }
            }
        }
    }
}
