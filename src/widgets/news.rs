//! News Widget
//!
//! One card per configured feed, showing the feed's top story. Feeds are
//! fetched one after another in declaration order; each card is handed to the
//! caller as soon as its feed resolves, and a broken feed only costs its own
//! card.

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tokio::sync::mpsc;

use crate::sources::{DataSource, FeedItem, SourceError};

/// Number of description characters kept in a card snippet
pub const SNIPPET_CHARS: usize = 100;

const PLACEHOLDER_BASE: &str = "https://placehold.co/500x300/023020/ffffff";

/// Shown by the browser when a resolved image fails to load
pub const BROKEN_IMAGE_URL: &str = "https://placehold.co/500x300/023020/ffffff?text=News+Image";

/// A news source shown on the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedDescriptor {
    /// Card header, e.g. "International News"
    pub title: String,
    /// Publisher name shown next to the header
    pub source: String,
    /// RSS/Atom feed URL
    pub url: String,
}

impl FeedDescriptor {
    pub fn new(title: impl Into<String>, source: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
            url: url.into(),
        }
    }
}

/// Where a card image came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum ImageSource {
    Thumbnail(String),
    Enclosure(String),
    /// First `<img src>` inside the description markup
    Embedded(String),
    /// Generated image labelled with the feed title
    Placeholder(String),
}

impl ImageSource {
    pub fn url(&self) -> &str {
        match self {
            ImageSource::Thumbnail(url)
            | ImageSource::Enclosure(url)
            | ImageSource::Embedded(url)
            | ImageSource::Placeholder(url) => url,
        }
    }
}

/// A rendered news card
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NewsCard {
    Story(StoryCard),
    Failed { header: String },
}

impl NewsCard {
    pub fn header(&self) -> &str {
        match self {
            NewsCard::Story(story) => &story.header,
            NewsCard::Failed { header } => header,
        }
    }
}

/// Top story of one feed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryCard {
    pub header: String,
    pub source: String,
    pub image: ImageSource,
    pub headline: String,
    pub published: String,
    pub snippet: String,
    pub link: String,
}

/// Why a feed produced no story
#[derive(Debug, thiserror::Error)]
pub enum NewsError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Feed has no item with both a title and a body")]
    NoUsableItem,
}

fn embedded_image_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<img[^>]+src="([^">]+)""#).expect("valid image regex"))
}

/// First item with a title and some body text
pub fn top_item(items: &[FeedItem]) -> Option<&FeedItem> {
    items
        .iter()
        .find(|item| item.title.is_some() && (item.content.is_some() || item.description.is_some()))
}

/// Pick the card image: thumbnail, enclosure, embedded `<img>`, placeholder.
pub fn resolve_image(item: &FeedItem, feed_title: &str) -> ImageSource {
    if let Some(url) = &item.thumbnail {
        return ImageSource::Thumbnail(url.clone());
    }

    if let Some(url) = item.enclosure.as_ref().and_then(|e| e.link.as_ref()) {
        return ImageSource::Enclosure(url.clone());
    }

    if let Some(caps) = item
        .description
        .as_deref()
        .and_then(|d| embedded_image_re().captures(d))
    {
        return ImageSource::Embedded(caps[1].to_string());
    }

    ImageSource::Placeholder(placeholder_image(feed_title))
}

pub fn placeholder_image(feed_title: &str) -> String {
    format!("{}?text={}", PLACEHOLDER_BASE, urlencoding::encode(feed_title))
}

/// Strip markup, keep the first 100 characters and append "...".
///
/// The description is parsed as an HTML fragment and its text nodes joined,
/// so entities are decoded and a stray `<` in body text stays text.
/// Truncation is by character, not by word.
pub fn clean_description(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let fragment = Html::parse_fragment(html);
    let mut snippet: String = fragment
        .root_element()
        .text()
        .flat_map(str::chars)
        .take(SNIPPET_CHARS)
        .collect();
    snippet.push_str("...");
    snippet
}

/// Render a feed date like `Sat Oct 18 2026`.
///
/// The proxy emits `YYYY-MM-DD HH:MM:SS`; RFC 2822 and RFC 3339 are accepted
/// too. Anything else is shown as-is.
pub fn format_pub_date(raw: &str) -> String {
    const DISPLAY: &str = "%a %b %d %Y";

    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return dt.format(DISPLAY).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return dt.format(DISPLAY).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format(DISPLAY).to_string();
    }
    raw.to_string()
}

/// Build the story card for one feed's items
pub fn story_card(feed: &FeedDescriptor, items: &[FeedItem]) -> Result<StoryCard, NewsError> {
    let item = top_item(items).ok_or(NewsError::NoUsableItem)?;

    Ok(StoryCard {
        header: feed.title.clone(),
        source: feed.source.clone(),
        image: resolve_image(item, &feed.title),
        headline: item.title.clone().unwrap_or_default(),
        published: item
            .pub_date
            .as_deref()
            .map(format_pub_date)
            .unwrap_or_default(),
        snippet: clean_description(item.description.as_deref().unwrap_or_default()),
        link: item.link.clone().unwrap_or_default(),
    })
}

async fn load_feed(source: &dyn DataSource, feed: &FeedDescriptor) -> Result<StoryCard, NewsError> {
    let items = source.feed(&feed.url).await?.into_items()?;
    story_card(feed, &items)
}

/// Fetch feeds in order, sending each card as soon as it is ready.
///
/// Stops early if the receiver goes away.
pub async fn stream(source: &dyn DataSource, feeds: &[FeedDescriptor], tx: mpsc::Sender<NewsCard>) {
    for feed in feeds {
        let card = match load_feed(source, feed).await {
            Ok(story) => NewsCard::Story(story),
            Err(e) => {
                tracing::warn!(feed = %feed.title, error = %e, "Error fetching feed");
                NewsCard::Failed {
                    header: feed.title.clone(),
                }
            }
        };

        if tx.send(card).await.is_err() {
            tracing::debug!("News receiver dropped, stopping");
            return;
        }
    }
}

/// Fetch every feed and collect the cards in feed order
pub async fn load(source: &dyn DataSource, feeds: &[FeedDescriptor]) -> Vec<NewsCard> {
    let (tx, mut rx) = mpsc::channel(feeds.len().max(1));
    let producer = stream(source, feeds, tx);
    let consumer = async {
        let mut cards = Vec::with_capacity(feeds.len());
        while let Some(card) = rx.recv().await {
            cards.push(card);
        }
        cards
    };

    let ((), cards) = tokio::join!(producer, consumer);
    cards
}
