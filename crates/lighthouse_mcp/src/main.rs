use clap::Parser;
use url::Url;

mod config;
mod errors;
mod models;
mod server;
mod services;
mod utils;

use config::Config;
use services::PAGESPEED_ENDPOINT;

/// Lighthouse MCP Server
///
/// Exposes a `get-lighthouse-report` tool that runs Google PageSpeed Insights
/// against a URL and summarizes the Lighthouse result.
///
/// ## Configuration
/// ```json
/// {
///   "mcpServers": {
///     "lighthouse": {
///       "command": "mcp-server-lighthouse",
///       "env": {
///         "PAGESPEED_API_KEY": "<key>",
///         "LOG_LEVEL": "info"
///       }
///     }
///   }
/// }
/// ```
#[derive(Parser, Debug)]
#[command(name = "mcp-server-lighthouse")]
#[command(about = "MCP server for Lighthouse reports via PageSpeed Insights")]
#[command(version)]
struct Args {
    /// PageSpeed Insights API key (optional; unauthenticated calls are rate limited)
    #[arg(long, env = "PAGESPEED_API_KEY", default_value = "", hide_env_values = true)]
    api_key: String,

    /// PageSpeed Insights endpoint
    #[arg(long, default_value = PAGESPEED_ENDPOINT)]
    endpoint: Url,

    /// Proxy URL to use for requests (e.g., http://proxy:8080)
    #[arg(long)]
    proxy_url: Option<String>,

    /// Custom User-Agent string to use for requests
    #[arg(long)]
    user_agent: Option<String>,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            api_key: args.api_key,
            endpoint: args.endpoint,
            proxy_url: args.proxy_url,
            user_agent: args.user_agent,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if utils::logging::init_logging()? {
        tracing::info!("Starting Lighthouse MCP server");
    }

    if args.api_key.is_empty() {
        tracing::warn!("PAGESPEED_API_KEY is not set; requests will be unauthenticated");
    }

    if args.endpoint.as_str() != PAGESPEED_ENDPOINT {
        tracing::info!("Using PageSpeed endpoint: {}", args.endpoint);
    }

    if let Some(ref proxy) = args.proxy_url {
        tracing::info!("Using proxy: {}", proxy);
    }

    if let Err(e) = server::run(args.into()).await {
        tracing::error!("Failed to run MCP server: {}", e);
        return Err(e);
    }

    Ok(())
}
