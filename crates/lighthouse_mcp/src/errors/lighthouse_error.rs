use rmcp::ErrorData as McpError;
use serde_json::json;

/// Errors reported back to the MCP client
#[derive(Debug, thiserror::Error)]
pub enum LighthouseServerError {
    #[error("Invalid URL: {url}")]
    InvalidUrl { url: String },
    #[error("Invalid parameters: {message}")]
    InvalidParams { message: String },
    #[error("Resource not found: {uri}")]
    ResourceNotFound { uri: String },
}

/// Failures of a single PageSpeed call; logged, never sent to the client
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Request for {url} timed out after {timeout_ms} ms")]
    Timeout { url: String, timeout_ms: u64 },
    #[error("Failed to reach PageSpeed API for {url}: {message}")]
    Transport { url: String, message: String },
    #[error("HTTP error {status} for {url}")]
    HttpStatus { url: String, status: u16 },
    #[error("Malformed PageSpeed response for {url}: {message}")]
    Decode { url: String, message: String },
}

/// Errors raised while starting the server
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("HTTP client error: {message}")]
    ClientError { message: String },
    #[error("Logging initialization failed: {0}")]
    LoggingInitialization(String),
}

// Error codes
const ERROR_INVALID_URL: &str = "invalid_url";
const ERROR_INVALID_PARAMS: &str = "invalid_params";
const ERROR_RESOURCE_NOT_FOUND: &str = "resource_not_found";

/// Resource URIs exposed by the server
pub const AVAILABLE_RESOURCES: &[&str] = &["lighthouse://help", "lighthouse://categories"];

impl From<LighthouseServerError> for McpError {
    fn from(err: LighthouseServerError) -> Self {
        match err {
            LighthouseServerError::InvalidUrl { url } => {
                McpError::invalid_params(ERROR_INVALID_URL, Some(json!({ "url": url })))
            }
            LighthouseServerError::InvalidParams { message } => {
                McpError::invalid_params(ERROR_INVALID_PARAMS, Some(json!({ "message": message })))
            }
            LighthouseServerError::ResourceNotFound { uri } => McpError::resource_not_found(
                ERROR_RESOURCE_NOT_FOUND,
                Some(json!({
                    "uri": uri,
                    "available_resources": AVAILABLE_RESOURCES
                })),
            ),
        }
    }
}

pub type LighthouseResult<T> = Result<T, LighthouseServerError>;
pub type DispatchResult<T> = Result<T, DispatchError>;
pub type StartupResult<T> = Result<T, StartupError>;
pub type McpResult<T> = Result<T, McpError>;
