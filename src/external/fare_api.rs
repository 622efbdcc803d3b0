use async_trait::async_trait;
use std::time::Duration;

use crate::{
    api::FarePredictor,
    entities::{EstimateRequest, EstimateResponse, HealthStatus},
    error::{upstream_status_error, Error},
};

/// Client for the fare-prediction service.
#[derive(Clone, Debug)]
pub struct FareClient {
    client: reqwest::Client,
    api_base: String,
}

impl FareClient {
    pub fn new(api_base: &str, timeout: Option<Duration>) -> Result<Self, Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

#[async_trait]
impl FarePredictor for FareClient {
    #[tracing::instrument(skip(self))]
    async fn predict(&self, request: &EstimateRequest) -> Result<EstimateResponse, Error> {
        let url = self.url("/predict");

        let res = self.client.post(&url).json(request).send().await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            tracing::debug!("predict returned {}: {}", status, text);
            return Err(upstream_status_error(status.as_u16(), &text));
        }

        let data: EstimateResponse = serde_json::from_str(&text).map_err(|e| {
            tracing::debug!("failed to parse predict response: {}. Body: {}", e, text);
            e
        })?;

        Ok(data)
    }

    #[tracing::instrument(skip(self))]
    async fn health(&self) -> Result<HealthStatus, Error> {
        let res = self.client.get(self.url("/health")).send().await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            return Err(upstream_status_error(status.as_u16(), &text));
        }

        Ok(serde_json::from_str(&text)?)
    }
}

#[test]
fn trailing_slash_is_dropped() {
    let client = FareClient::new("http://localhost:8000/", None).unwrap();

    assert_eq!(client.url("/predict"), "http://localhost:8000/predict");
}
