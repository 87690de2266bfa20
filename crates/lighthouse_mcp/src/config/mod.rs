use url::Url;

/// Configuration derived from CLI arguments and environment
#[derive(Debug, Clone)]
pub struct Config {
    /// PageSpeed Insights API key; empty means unauthenticated calls
    pub api_key: String,
    pub endpoint: Url,
    pub proxy_url: Option<String>,
    pub user_agent: Option<String>,
}
