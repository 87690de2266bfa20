use std::{fmt, time::Duration};

use derive_getters::Getters;
use rmcp::schemars;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::{errors::LighthouseServerError, services::Validate};

/// Default deadline for a single PageSpeed call
pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Helper function to deserialize and trim strings
fn deserialize_trimmed_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(s.trim().to_string())
}

/// Simulated client used for the analysis
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Mobile,
    Desktop,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Mobile, Strategy::Desktop];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Mobile => "mobile",
            Strategy::Desktop => "desktop",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lighthouse category to score
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    Performance,
    Accessibility,
    BestPractices,
    Seo,
    Pwa,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Performance,
        Category::Accessibility,
        Category::BestPractices,
        Category::Seo,
        Category::Pwa,
    ];

    /// Identifier used both as query value and as key in the result's category map
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Performance => "performance",
            Category::Accessibility => "accessibility",
            Category::BestPractices => "best-practices",
            Category::Seo => "seo",
            Category::Pwa => "pwa",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for a Lighthouse analysis
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema, Getters)]
pub struct AnalysisRequest {
    /// Absolute URL of the page to analyze (e.g. https://example.com)
    #[serde(deserialize_with = "deserialize_trimmed_string")]
    url: String,
    /// Lighthouse category to report on
    #[serde(default)]
    category: Category,
    /// Device strategy used for the analysis
    #[serde(default)]
    strategy: Strategy,
    /// Timeout for the PageSpeed call in milliseconds
    #[serde(default = "default_timeout")]
    timeout: u64,
}

impl AnalysisRequest {
    pub fn new(url: impl Into<String>, category: Category, strategy: Strategy, timeout: u64) -> Self {
        Self {
            url: url.into(),
            category,
            strategy,
            timeout,
        }
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }
}

/// Check that `url` is an absolute http(s) URL with a host
pub fn validate_target_url(url: &str) -> Result<(), LighthouseServerError> {
    if url.is_empty() {
        return Err(LighthouseServerError::InvalidParams {
            message: "URL is required".to_string(),
        });
    }

    let parsed = Url::parse(url).map_err(|_| LighthouseServerError::InvalidUrl {
        url: url.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return Err(LighthouseServerError::InvalidUrl {
            url: url.to_string(),
        });
    }

    Ok(())
}

impl Validate for AnalysisRequest {
    fn validate(&self) -> Result<(), LighthouseServerError> {
        validate_target_url(&self.url)?;

        if self.timeout == 0 {
            return Err(LighthouseServerError::InvalidParams {
                message: "timeout must be a positive number of milliseconds".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let request: AnalysisRequest =
            serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();

        assert_eq!(request.url(), "https://example.com");
        assert_eq!(*request.category(), Category::Performance);
        assert_eq!(*request.strategy(), Strategy::Mobile);
        assert_eq!(*request.timeout(), DEFAULT_TIMEOUT_MS);
        assert_eq!(request.timeout_duration(), Duration::from_secs(60));
    }

    #[test]
    fn test_enum_values_parsed() {
        let request: AnalysisRequest = serde_json::from_str(
            r#"{"url": "  https://example.com/page  ", "category": "best-practices", "strategy": "desktop", "timeout": 1500}"#,
        )
        .unwrap();

        assert_eq!(request.url(), "https://example.com/page");
        assert_eq!(*request.category(), Category::BestPractices);
        assert_eq!(*request.strategy(), Strategy::Desktop);
        assert_eq!(*request.timeout(), 1500);
    }

    #[test]
    fn test_unknown_enum_rejected() {
        let result = serde_json::from_str::<AnalysisRequest>(
            r#"{"url": "https://example.com", "category": "speed"}"#,
        );
        assert!(result.is_err());

        let result = serde_json::from_str::<AnalysisRequest>(
            r#"{"url": "https://example.com", "strategy": "tablet"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validation() {
        let ok = AnalysisRequest::new(
            "https://example.com",
            Category::Seo,
            Strategy::Mobile,
            1000,
        );
        assert!(ok.validate().is_ok());

        let relative = AnalysisRequest::new("/about", Category::Seo, Strategy::Mobile, 1000);
        assert!(matches!(
            relative.validate(),
            Err(LighthouseServerError::InvalidUrl { .. })
        ));

        let wrong_scheme =
            AnalysisRequest::new("ftp://example.com", Category::Seo, Strategy::Mobile, 1000);
        assert!(wrong_scheme.validate().is_err());

        let empty = AnalysisRequest::new("", Category::Seo, Strategy::Mobile, 1000);
        assert!(matches!(
            empty.validate(),
            Err(LighthouseServerError::InvalidParams { .. })
        ));

        let zero_timeout =
            AnalysisRequest::new("https://example.com", Category::Seo, Strategy::Mobile, 0);
        assert!(matches!(
            zero_timeout.validate(),
            Err(LighthouseServerError::InvalidParams { .. })
        ));
    }

    #[test]
    fn test_display_matches_wire_names() {
        for category in Category::ALL {
            let wire = serde_json::to_value(category).unwrap();
            assert_eq!(wire, category.to_string());
        }
        for strategy in Strategy::ALL {
            let wire = serde_json::to_value(strategy).unwrap();
            assert_eq!(wire, strategy.to_string());
        }
    }
}
