use crate::errors::StartupError;
use reqwest::{Client, Proxy};

/// Default User-Agent sent to the PageSpeed API
pub const DEFAULT_USER_AGENT: &str = concat!(
    "ModelContextProtocol/1.0 (Lighthouse; +https://github.com/sabry-awad97/rust-mcp-servers) ",
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION")
);

/// Build a reqwest client with optional proxy.
///
/// No client-wide timeout is set; each call carries its own deadline.
pub fn build_client(
    proxy_url: Option<&str>,
    user_agent: Option<&str>,
) -> Result<Client, StartupError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
        .redirect(reqwest::redirect::Policy::limited(10));

    if let Some(proxy_url) = proxy_url {
        let proxy = Proxy::all(proxy_url).map_err(|e| StartupError::ClientError {
            message: format!("invalid proxy {}: {}", proxy_url, e),
        })?;
        builder = builder.proxy(proxy);
    }

    builder.build().map_err(|e| StartupError::ClientError {
        message: e.to_string(),
    })
}
