//! Inference client trait and the hosted-space HTTP implementation

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use taglens_core::{Error, RawPrediction, Result};
use tracing::debug;

/// Upper bound on a single HTTP round trip to the hosted model. Independent
/// of the caller-side wait budget: a job that outlives its waiters still has
/// to terminate eventually.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Adapter to the remote classification model
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Run one prediction for the given text
    async fn predict(&self, text: &str) -> Result<RawPrediction>;

    /// Get the client name (for logs)
    fn name(&self) -> &str;
}

/// Client for a hosted Gradio space exposing a label-output prediction API
pub struct GradioSpaceClient {
    http: reqwest::Client,
    endpoint: String,
    name: String,
}

/// Gradio wraps predictions in a `data` array, one element per output
/// component; a label component carries the `confidences` list.
#[derive(Debug, Deserialize)]
struct GradioEnvelope {
    #[serde(default)]
    data: Vec<RawPrediction>,
}

impl GradioSpaceClient {
    /// Create a client for `base_url`, calling the given api name
    /// (e.g. `/classify_subjects`).
    pub fn new(base_url: &str, api_name: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::internal(format!("failed to build http client: {}", e)))?;

        let endpoint = format!(
            "{}/run/{}",
            base_url.trim_end_matches('/'),
            api_name.trim_start_matches('/')
        );

        Ok(Self {
            http,
            name: format!("gradio:{}", base_url),
            endpoint,
        })
    }
}

#[async_trait]
impl InferenceClient for GradioSpaceClient {
    async fn predict(&self, text: &str) -> Result<RawPrediction> {
        debug!(endpoint = %self.endpoint, "calling hosted model");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&serde_json::json!({ "data": [text] }))
            .send()
            .await
            .map_err(|e| Error::upstream(format!("request to hosted model failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream(format!(
                "hosted model answered {}",
                status
            )));
        }

        let envelope: GradioEnvelope = response
            .json()
            .await
            .map_err(|e| Error::malformed(format!("undecodable prediction body: {}", e)))?;

        envelope
            .data
            .into_iter()
            .next()
            .ok_or_else(|| Error::malformed("prediction envelope carried no outputs"))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
