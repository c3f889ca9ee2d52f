use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDateTime};
use reqwest::{Client, header::USER_AGENT};

use crate::{
    data::extract::extract_series_pair,
    domain::occupancy::{StudioSnapshot, Thresholds, studio_name_from_url},
};

pub const STUDIO_URL: &str = "https://www.fitx.de/fitnessstudios/karlsruhe-oststadt";
const CLIENT_USER_AGENT: &str = "Mozilla/5.0 (Scriptable Widget)";

#[derive(Debug, Clone)]
pub struct StudioClient {
    client: Client,
    url: String,
}

impl Default for StudioClient {
    fn default() -> Self {
        Self::new()
    }
}

impl StudioClient {
    pub fn new() -> Self {
        Self::with_url(STUDIO_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("reqwest client"),
            url: url.into(),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn studio_name(&self) -> String {
        studio_name_from_url(&self.url)
    }

    pub async fn fetch_html(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await
            .context("studio page request failed")?
            .error_for_status()
            .context("studio page returned non-success status")?;

        response
            .text()
            .await
            .context("failed to read studio page body")
    }

    /// Never fails: a broken fetch becomes a snapshot with the error status.
    pub async fn fetch_snapshot(
        &self,
        now: NaiveDateTime,
        thresholds: Thresholds,
    ) -> StudioSnapshot {
        match self.fetch_html().await {
            Ok(html) => snapshot_from_html(self.studio_name(), &html, now, thresholds),
            Err(err) => {
                tracing::warn!(url = %self.url, error = %format!("{err:#}"), "studio fetch failed");
                StudioSnapshot::failed(self.studio_name())
            }
        }
    }
}

#[must_use]
pub fn snapshot_from_html(
    name: impl Into<String>,
    html: &str,
    now: NaiveDateTime,
    thresholds: Thresholds,
) -> StudioSnapshot {
    let pair = extract_series_pair(html, now.weekday());
    let snapshot = StudioSnapshot::from_series(name, pair, now.time(), thresholds);
    tracing::info!(
        studio = %snapshot.name,
        percentage = ?snapshot.current_percentage,
        status = snapshot.status.label(),
        "snapshot built"
    );
    snapshot
}
