use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::CONTENT_TYPE};

use crate::{Credentials, NiwaResponse, UvError};

use super::UvSource;

/// Wellington, the single forecast location served.
pub const LATITUDE: f64 = -41.2924;
pub const LONGITUDE: f64 = 174.7787;

const API_KEY_HEADER: &str = "x-apikey";

#[derive(Debug, Clone)]
pub struct NiwaClient {
    credentials: Credentials,
    http: Client,
}

impl NiwaClient {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_client(Client::new(), credentials)
    }

    pub fn with_client(http: Client, credentials: Credentials) -> Self {
        Self { credentials, http }
    }

    pub fn base_url(&self) -> &str {
        &self.credentials.api_url
    }
}

#[async_trait]
impl UvSource for NiwaClient {
    async fn fetch(&self) -> Result<NiwaResponse, UvError> {
        tracing::debug!(url = %self.base_url(), "requesting NIWA UV forecast");

        let res = self
            .http
            .get(self.base_url())
            .query(&[("lat", LATITUDE), ("long", LONGITUDE)])
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, self.credentials.api_key.as_str())
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        tracing::debug!(%status, bytes = body.len(), "NIWA responded");

        if status != StatusCode::OK {
            return Err(UvError::UpstreamStatus {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
