use reqwest::Client;
use url::Url;

use crate::{
    config::Config,
    errors::{DispatchError, DispatchResult, StartupResult},
    models::{AnalysisRequest, AnalysisResponse},
    utils::build_client,
};

/// PageSpeed Insights v5 endpoint
pub const PAGESPEED_ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// Single-shot client for the PageSpeed Insights API
#[derive(Clone)]
pub struct PageSpeedClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl PageSpeedClient {
    pub fn new(client: Client, endpoint: Url, api_key: impl Into<String>) -> Self {
        Self {
            client,
            endpoint,
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> StartupResult<Self> {
        let client = build_client(config.proxy_url.as_deref(), config.user_agent.as_deref())?;
        Ok(Self::new(
            client,
            config.endpoint.clone(),
            config.api_key.clone(),
        ))
    }

    /// Build the outbound GET URL; query values are percent-encoded
    pub fn request_url(&self, request: &AnalysisRequest) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("url", request.url())
                .append_pair("strategy", request.strategy().as_str())
                .append_pair("category", request.category().as_str());
            // An empty `key=` is rejected by the API; keyless calls are allowed
            if !self.api_key.is_empty() {
                query.append_pair("key", &self.api_key);
            }
        }
        url
    }

    /// Perform the call under the request's deadline.
    ///
    /// Error messages never include the outbound URL so the API key stays out of logs.
    pub async fn fetch(&self, request: &AnalysisRequest) -> DispatchResult<AnalysisResponse> {
        let target = request.url();

        let call = async {
            let response = self
                .client
                .get(self.request_url(request))
                .send()
                .await
                .map_err(|e| DispatchError::Transport {
                    url: target.clone(),
                    message: e.without_url().to_string(),
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(DispatchError::HttpStatus {
                    url: target.clone(),
                    status: status.as_u16(),
                });
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| DispatchError::Transport {
                    url: target.clone(),
                    message: e.without_url().to_string(),
                })?;

            let parsed = serde_json::from_slice::<AnalysisResponse>(&body).map_err(|e| {
                DispatchError::Decode {
                    url: target.clone(),
                    message: e.to_string(),
                }
            })?;
            Ok::<_, DispatchError>(parsed)
        };

        tokio::time::timeout(request.timeout_duration(), call)
            .await
            .map_err(|_| DispatchError::Timeout {
                url: target.clone(),
                timeout_ms: *request.timeout(),
            })?
    }

    /// Run the analysis once. Every failure is logged and reported as `None`.
    pub async fn dispatch(&self, request: &AnalysisRequest) -> Option<AnalysisResponse> {
        tracing::debug!(
            url = %request.url(),
            strategy = %request.strategy(),
            category = %request.category(),
            "Requesting PageSpeed analysis"
        );

        match self.fetch(request).await {
            Ok(response) => Some(response),
            Err(e @ DispatchError::Timeout { .. }) => {
                tracing::warn!("PageSpeed request aborted: {}", e);
                None
            }
            Err(e) => {
                tracing::error!("PageSpeed request failed: {}", e);
                None
            }
        }
    }
}
