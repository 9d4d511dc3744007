//! rss2json feed responses
//!
//! The proxy returns loosely shaped items: `thumbnail` may be an empty
//! string, `enclosure` may be an object, an empty array or missing. Everything
//! optional is normalized to `Option` here so the news widget can resolve
//! fields with plain pattern matching.

use serde::{Deserialize, Deserializer, Serialize};

use super::SourceError;

/// Top-level proxy response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub items: Option<Vec<FeedItem>>,
}

impl FeedResponse {
    /// Build an "ok" response around a list of items
    pub fn with_items(items: Vec<FeedItem>) -> Self {
        Self {
            status: "ok".to_string(),
            message: None,
            items: Some(items),
        }
    }

    /// Items of a successful response
    pub fn into_items(self) -> Result<Vec<FeedItem>, SourceError> {
        if self.status == "error" {
            return Err(SourceError::Upstream(
                self.message.unwrap_or_else(|| "feed conversion failed".to_string()),
            ));
        }
        self.items.ok_or(SourceError::MissingField("items"))
    }
}

/// One feed entry
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FeedItem {
    #[serde(default, deserialize_with = "non_empty")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "non_empty")]
    pub link: Option<String>,

    #[serde(default, rename = "pubDate", deserialize_with = "non_empty")]
    pub pub_date: Option<String>,

    #[serde(default, deserialize_with = "non_empty")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "non_empty")]
    pub content: Option<String>,

    #[serde(default, deserialize_with = "non_empty")]
    pub thumbnail: Option<String>,

    #[serde(default, deserialize_with = "enclosure")]
    pub enclosure: Option<Enclosure>,
}

/// Media attached to a feed entry
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Enclosure {
    #[serde(default, deserialize_with = "non_empty")]
    pub link: Option<String>,

    #[serde(default, rename = "type")]
    pub media_type: Option<String>,
}

/// Treat `null`, missing and `""` alike
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn enclosure<'de, D>(deserializer: D) -> Result<Option<Enclosure>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Shape {
        Single(Enclosure),
        Many(Vec<Enclosure>),
        Other(serde_json::Value),
    }

    let shape: Option<Shape> = Option::deserialize(deserializer)?;
    Ok(match shape {
        Some(Shape::Single(e)) => Some(e),
        Some(Shape::Many(list)) => list.into_iter().next(),
        Some(Shape::Other(_)) | None => None,
    })
}
