use anyhow::{Context, Result, bail};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::domain::{AddLandRequest, LandParcel, LandSearchFilters};

const USER_AGENT: &str = concat!("parcel-area/", env!("CARGO_PKG_VERSION"));

const LANDS_PATH: &str = "/lands";
const LANDS_SEARCH_PATH: &str = "/lands/search";

/// Blocking client for the land records API
pub struct LandsClient {
    client: Client,
    config: ApiConfig,
}

impl LandsClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Submit a new parcel; returns the stored record
    pub fn create_land(&self, request: &AddLandRequest) -> Result<LandParcel> {
        let url = self.url(LANDS_PATH);
        tracing::info!(
            deed = %request.form.deed_number,
            area_m2 = request.area,
            "submitting land parcel"
        );
        self.execute(|| self.authorize(self.client.post(&url).json(request)))
    }

    pub fn get_land(&self, id: &str) -> Result<LandParcel> {
        let url = self.land_url(id);
        self.execute(|| self.authorize(self.client.get(&url)))
    }

    /// Replace a stored parcel's form and boundary; returns the updated record
    pub fn update_land(&self, id: &str, request: &AddLandRequest) -> Result<LandParcel> {
        let url = self.land_url(id);
        tracing::info!(id, deed = %request.form.deed_number, "updating land parcel");
        self.execute(|| self.authorize(self.client.put(&url).json(request)))
    }

    pub fn delete_land(&self, id: &str) -> Result<()> {
        let url = self.land_url(id);
        tracing::info!(id, "deleting land parcel");
        self.send(|| self.authorize(self.client.delete(&url)))?;
        Ok(())
    }

    /// List parcels, going through the search endpoint only when a filter is set
    pub fn search_lands(&self, filters: &LandSearchFilters) -> Result<Vec<LandParcel>> {
        if filters.is_empty() {
            let url = self.url(LANDS_PATH);
            self.execute(|| self.authorize(self.client.get(&url)))
        } else {
            let url = self.url(LANDS_SEARCH_PATH);
            self.execute(|| self.authorize(self.client.get(&url).query(filters)))
        }
    }

    fn land_url(&self, id: &str) -> String {
        self.url(&format!("{}/{}", LANDS_PATH, id))
    }

    fn execute<T, F>(&self, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        decode(self.send(build)?)
    }

    /// Send a request, retrying rate-limit and gateway errors up to
    /// `max_retries` times after the first attempt
    fn send<F>(&self, build: F) -> Result<Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let attempts = self.config.max_retries.saturating_add(1);
        let mut last_error = None;

        for attempt in 0..attempts {
            if attempt > 0 {
                let wait_secs = self.config.retry_backoff_secs * attempt as u64;
                tracing::warn!(
                    "Land records API busy, retrying in {} seconds (attempt {}/{})",
                    wait_secs,
                    attempt + 1,
                    attempts
                );
                std::thread::sleep(Duration::from_secs(wait_secs));
            }

            let response = build()
                .send()
                .context("Failed to send request to land records API")?;

            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            match status.as_u16() {
                429 | 502 | 503 | 504 => {
                    last_error = Some(format!(
                        "land records API returned status {} (attempt {})",
                        status,
                        attempt + 1
                    ));
                    continue;
                }
                _ => {
                    let body = response.text().unwrap_or_default();
                    bail!("Land records API returned error status {}: {}", status, body.trim());
                }
            }
        }

        bail!(
            "Land records API failed after {} attempts: {}",
            attempts,
            last_error.unwrap_or_else(|| "Unknown error".to_string())
        )
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    response
        .json()
        .context("Failed to parse land records API response")
}
