//! Character record as returned by the character endpoints
//!
//! Field names follow the server's camelCase JSON. Only `thumbnail` is strictly
//! required beyond the identity fields: a record whose thumbnail lacks either
//! `path` or `extension` fails to deserialize.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

use crate::common::image::{Image, ImageVariant};

// ============================================================================
// Character
// ============================================================================

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// ISO-8601 timestamp exactly as sent, e.g. `2014-04-29T14:18:17-0400`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub modified: String,
    pub thumbnail: Image,
    #[serde(rename = "resourceURI", default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
    #[serde(default)]
    pub comics: ResourceList,
    #[serde(default)]
    pub series: ResourceList,
    #[serde(default)]
    pub stories: ResourceList,
    #[serde(default)]
    pub events: ResourceList,
    #[serde(default)]
    pub urls: Vec<ExternalUrl>,
}

impl Character {
    /// Concrete image URL for the requested size variant
    pub fn image_url(&self, variant: ImageVariant) -> String {
        self.thumbnail.url(variant)
    }

    /// True when the trimmed description is non-empty
    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }

    /// Parsed `modified` timestamp, `None` when the server sent something unparseable
    pub fn modified_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(&self.modified)
    }
}

/// Parse a server timestamp. The API emits `±hhmm` offsets, which RFC 3339
/// does not allow, so both forms are accepted.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Related items
// ============================================================================

/// Aggregate of related items (comics, series, stories or events)
///
/// `available` is the full count held by the server; `items` is a truncated
/// preview, so `items.len() <= available`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceList {
    #[serde(default)]
    pub available: u32,
    #[serde(default)]
    pub returned: u32,
    #[serde(rename = "collectionURI", default, skip_serializing_if = "Option::is_none")]
    pub collection_uri: Option<String>,
    #[serde(default)]
    pub items: Vec<ResourceSummary>,
}

/// Lightweight reference to a related item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceSummary {
    pub name: String,
    #[serde(rename = "resourceURI", default)]
    pub resource_uri: String,
    /// Story type (`cover`, `interiorStory`), only present on stories
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Public web page about the character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrl {
    /// Short label such as `detail`, `wiki` or `comiclink`
    #[serde(rename = "type")]
    pub kind: String,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPIDER_MAN: &str = r#"{
        "id": 1009610,
        "name": "Spider-Man",
        "description": "Bitten by a radioactive spider.",
        "modified": "2020-07-21T10:35:15-0400",
        "thumbnail": {"path": "http://i.annihil.us/u/prod/marvel/i/mg/3/50/526548a343e4b", "extension": "jpg"},
        "resourceURI": "http://gateway.marvel.com/v1/public/characters/1009610",
        "comics": {"available": 4100, "collectionURI": "http://gateway.marvel.com/v1/public/characters/1009610/comics",
                   "items": [{"resourceURI": "http://gateway.marvel.com/v1/public/comics/62304", "name": "Amazing Spider-Man (1999) #558"}],
                   "returned": 1},
        "series": {"available": 1000, "items": [], "returned": 0},
        "stories": {"available": 6000, "items": [{"resourceURI": "http://gateway.marvel.com/v1/public/stories/483", "name": "Interior #483", "type": "interiorStory"}], "returned": 1},
        "events": {"available": 40, "items": [], "returned": 0},
        "urls": [{"type": "detail", "url": "http://marvel.com/comics/characters/1009610/spider-man"}]
    }"#;

    #[test]
    fn test_deserialize_character() {
        let character: Character = serde_json::from_str(SPIDER_MAN).unwrap();
        assert_eq!(character.id, 1009610);
        assert_eq!(character.comics.available, 4100);
        assert_eq!(character.comics.items.len(), 1);
        assert_eq!(character.stories.items[0].kind.as_deref(), Some("interiorStory"));
        assert_eq!(character.urls[0].kind, "detail");
        assert!(character.has_description());
    }

    #[test]
    fn test_missing_thumbnail_extension_is_malformed() {
        let raw = r#"{"id": 1, "name": "X", "thumbnail": {"path": "http://x/y"}}"#;
        assert!(serde_json::from_str::<Character>(raw).is_err());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let raw = r#"{"id": 1, "name": "X", "description": null, "thumbnail": {"path": "http://x/y", "extension": "jpg"}}"#;
        let character: Character = serde_json::from_str(raw).unwrap();
        assert_eq!(character.description, "");
        assert_eq!(character.modified, "");
        assert!(!character.has_description());
        assert_eq!(character.events.available, 0);
        assert!(character.urls.is_empty());
    }

    #[test]
    fn test_whitespace_description_is_empty() {
        let raw = r#"{"id": 1, "name": "X", "description": "   ", "thumbnail": {"path": "p", "extension": "e"}}"#;
        let character: Character = serde_json::from_str(raw).unwrap();
        assert!(!character.has_description());
    }

    #[test]
    fn test_parse_timestamp_offsets() {
        let compact = parse_timestamp("2014-04-29T14:18:17-0400").unwrap();
        let rfc = parse_timestamp("2014-04-29T14:18:17-04:00").unwrap();
        assert_eq!(compact, rfc);
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("not a date").is_none());
    }
}
