use std::{fmt, marker::PhantomData};

use serde::{
    Deserialize, Deserializer,
    de::{DeserializeOwned, MapAccess, Visitor},
};

use super::Category;

/// Audit detail type marking an improvement opportunity
pub const OPPORTUNITY_DETAILS_TYPE: &str = "opportunity";

/// Decode a field, turning a value of the wrong shape into `None`
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// JSON object decoded in document order.
///
/// Entries whose value does not decode as `T` are dropped.
#[derive(Debug, Clone)]
pub struct OrderedMap<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for OrderedMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> OrderedMap<T> {
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

struct OrderedMapVisitor<T>(PhantomData<T>);

impl<'de, T: DeserializeOwned> Visitor<'de> for OrderedMapVisitor<T> {
    type Value = OrderedMap<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a JSON object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
            match T::deserialize(value) {
                Ok(value) => entries.push((key, value)),
                Err(e) => tracing::debug!("Skipping undecodable entry {}: {}", key, e),
            }
        }
        Ok(OrderedMap { entries })
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for OrderedMap<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// PageSpeed Insights v5 response. Every field may be missing.
///
/// Only a malformed body fails to decode; a field of the wrong type reads
/// as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<ApiError>,
    #[serde(default, deserialize_with = "lenient")]
    pub lighthouse_result: Option<LighthouseReport>,
}

/// Error reported by the PageSpeed service
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiError {
    #[serde(default, deserialize_with = "lenient")]
    pub code: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LighthouseReport {
    #[serde(default, deserialize_with = "lenient")]
    pub categories: Option<OrderedMap<CategoryResult>>,
    #[serde(default, deserialize_with = "lenient")]
    pub audits: Option<OrderedMap<Audit>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryResult {
    #[serde(default, deserialize_with = "lenient")]
    pub score: Option<f64>,
}

/// Individual audit result
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub display_value: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub numeric_value: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub details: Option<AuditDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditDetails {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub kind: Option<String>,
}

impl AnalysisResponse {
    pub fn audits(&self) -> Option<&OrderedMap<Audit>> {
        self.lighthouse_result.as_ref()?.audits.as_ref()
    }

    /// Score in [0, 1] for `category`, if the service computed one
    pub fn category_score(&self, category: Category) -> Option<f64> {
        self.lighthouse_result
            .as_ref()?
            .categories
            .as_ref()?
            .get(category.as_str())?
            .score
    }
}

impl Audit {
    pub fn is_opportunity(&self) -> bool {
        self.details
            .as_ref()
            .and_then(|details| details.kind.as_deref())
            == Some(OPPORTUNITY_DETAILS_TYPE)
    }

    /// Opportunity that still has room to improve; unscored audits never qualify
    pub fn has_savings(&self) -> bool {
        self.is_opportunity() && self.score.is_some_and(|score| score < 1.0)
    }
}
