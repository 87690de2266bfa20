use rmcp::schemars;
use serde::Deserialize;

use crate::{errors::LighthouseServerError, services::Validate};

mod analysis_request;
pub use analysis_request::{
    AnalysisRequest, Category, DEFAULT_TIMEOUT_MS, Strategy, validate_target_url,
};

mod analysis_response;
pub use analysis_response::{AnalysisResponse, Audit, OrderedMap};

/// Arguments for the lighthouse-audit prompt
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AuditPromptArgs {
    /// URL of the page to audit
    url: String,
    /// Lighthouse category (performance, accessibility, best-practices, seo, pwa)
    #[serde(default)]
    category: Option<Category>,
    /// Device strategy (mobile, desktop)
    #[serde(default)]
    strategy: Option<Strategy>,
}

impl AuditPromptArgs {
    pub fn into_request(self) -> AnalysisRequest {
        AnalysisRequest::new(
            self.url.trim(),
            self.category.unwrap_or_default(),
            self.strategy.unwrap_or_default(),
            DEFAULT_TIMEOUT_MS,
        )
    }
}

impl Validate for AuditPromptArgs {
    fn validate(&self) -> Result<(), LighthouseServerError> {
        validate_target_url(self.url.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_args_into_request() {
        let args: AuditPromptArgs =
            serde_json::from_str(r#"{"url": "https://example.com", "strategy": "desktop"}"#)
                .unwrap();
        assert!(args.validate().is_ok());

        let request = args.into_request();
        assert_eq!(*request.category(), Category::Performance);
        assert_eq!(*request.strategy(), Strategy::Desktop);
        assert_eq!(*request.timeout(), DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_prompt_args_invalid_url() {
        let args: AuditPromptArgs = serde_json::from_str(r#"{"url": "example"}"#).unwrap();
        assert!(args.validate().is_err());
    }
}
