//! Freesound API payloads and the formatted tool output.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// Freesound API Response Structures
// ============================================================================

/// Body of `GET /search/text/`.
#[derive(Debug, Default, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<RawSoundRecord>,
    #[serde(default)]
    pub next: Option<String>,
}

impl RawSearchResponse {
    /// Whether upstream has a page after this one.
    pub fn has_next_page(&self) -> bool {
        self.next.as_deref().is_some_and(|next| !next.is_empty())
    }
}

/// One sound as returned with the requested `fields`.
///
/// A field of an unexpected type falls back to its default instead of
/// failing the whole page.
#[derive(Debug, Default, Deserialize)]
pub struct RawSoundRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub license: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub r#type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_previews")]
    pub previews: BTreeMap<String, String>,
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode any JSON value, using the default when it has the wrong type.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Keep the string entries of a JSON array.
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Vec<Value> = lenient(deserializer)?;
    Ok(values
        .into_iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect())
}

/// Keep the string-valued entries of a JSON object.
fn lenient_previews<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: BTreeMap<String, Value> = lenient(deserializer)?;
    Ok(values
        .into_iter()
        .filter_map(|(k, v)| v.as_str().map(|url| (k, url.to_string())))
        .collect())
}

// ============================================================================
// Structured Output Types
// ============================================================================

/// A sound as presented to the client.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct FormattedSound {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub duration_seconds: Option<f64>,
    pub description: String,
    pub tags: Vec<String>,
    pub license: Option<String>,
    pub file_type: Option<String>,
    pub uploader: Option<String>,
    pub freesound_page: Option<String>,
    pub preview_urls: BTreeMap<String, String>,
    pub download_info: String,
}

/// Successful search output.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct FormattedResult {
    pub query: String,
    pub total_found: u64,
    pub results_returned: usize,
    pub sounds: Vec<FormattedSound>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Failed search output.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ErrorResult {
    pub error: String,
}

/// What a `search_sounds` call hands back: results or an error, never both.
#[derive(Debug, Clone, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum SearchOutcome {
    Found(FormattedResult),
    Failed(ErrorResult),
}

impl SearchOutcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default() {
        let raw: RawSearchResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(raw.count, 0);
        assert!(raw.results.is_empty());
        assert!(!raw.has_next_page());
    }

    #[test]
    fn test_null_fields_default() {
        let json = r#"{
            "count": null,
            "results": [{"id": 7, "description": null, "tags": null, "previews": null}],
            "next": null
        }"#;
        let raw: RawSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(raw.count, 0);
        let sound = &raw.results[0];
        assert_eq!(sound.id, Some(7));
        assert_eq!(sound.description, "");
        assert!(sound.tags.is_empty());
        assert!(sound.previews.is_empty());
        assert!(sound.name.is_none());
    }

    #[test]
    fn test_odd_field_types_do_not_fail_page() {
        let json = r#"{
            "count": 2,
            "results": [
                {"id": "not-a-number", "name": 5, "tags": ["rain", null, 3, "storm"],
                 "previews": {"preview-hq-mp3": "https://cdn/hq.mp3", "bad": 1}},
                {"id": 2, "name": "Wind", "duration": "long"}
            ]
        }"#;
        let raw: RawSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(raw.results.len(), 2);

        let first = &raw.results[0];
        assert!(first.id.is_none());
        assert!(first.name.is_none());
        assert_eq!(first.tags, vec!["rain", "storm"]);
        assert_eq!(first.previews.len(), 1);

        let second = &raw.results[1];
        assert_eq!(second.id, Some(2));
        assert_eq!(second.name.as_deref(), Some("Wind"));
        assert!(second.duration.is_none());
    }

    #[test]
    fn test_has_next_page() {
        let raw: RawSearchResponse = serde_json::from_str(
            r#"{"next": "https://freesound.org/apiv2/search/text/?page=2"}"#,
        )
        .unwrap();
        assert!(raw.has_next_page());

        let raw: RawSearchResponse = serde_json::from_str(r#"{"next": ""}"#).unwrap();
        assert!(!raw.has_next_page());
    }

    #[test]
    fn test_outcome_serializes_untagged() {
        let failed = SearchOutcome::Failed(ErrorResult {
            error: "Invalid JSON response".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            serde_json::json!({"error": "Invalid JSON response"})
        );
        assert!(failed.is_error());
    }
}
