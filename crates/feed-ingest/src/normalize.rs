use std::sync::OnceLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use news_core::{NewsItem, RawFeedItem, RssFeed};
use regex::Regex;
use sha2::{Digest, Sha256};
use uuid::Uuid;

const NO_TITLE: &str = "No title";
const NO_DESCRIPTION: &str = "No description available";

/// Convert one feed's raw item list into the uniform item shape. A feed
/// that yields zero items produces an empty vec, not an error.
pub fn normalize(feed: &RssFeed, raw_items: Vec<RawFeedItem>) -> Vec<NewsItem> {
    raw_items
        .into_iter()
        .map(|raw| normalize_item(feed, raw))
        .collect()
}

fn normalize_item(feed: &RssFeed, raw: RawFeedItem) -> NewsItem {
    let content = raw.content.filter(|c| !c.is_empty());
    let image_url = content.as_deref().and_then(extract_image_url);

    NewsItem {
        id: derive_id(feed, &raw.guid, &raw.link, &raw.title),
        title: raw.title.unwrap_or_else(|| NO_TITLE.to_string()),
        description: raw
            .summary
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        content,
        source: feed.name.clone(),
        url: raw.link.unwrap_or_else(|| "#".to_string()),
        image_url,
        published_at: raw
            .pub_date
            .as_deref()
            .and_then(parse_pub_date)
            .unwrap_or_else(Utc::now),
        category: feed.category,
        sentiment: None,
    }
}

/// Item id: source guid when present, else a stable hash of the feed id,
/// link and title. Only when none of those exist does the id fall back to
/// a random suffix.
fn derive_id(
    feed: &RssFeed,
    guid: &Option<String>,
    link: &Option<String>,
    title: &Option<String>,
) -> String {
    if let Some(guid) = guid.as_deref().filter(|g| !g.is_empty()) {
        return guid.to_string();
    }

    if link.is_some() || title.is_some() {
        let mut hasher = Sha256::new();
        hasher.update(feed.id.as_bytes());
        hasher.update(b"\x1f");
        hasher.update(link.as_deref().unwrap_or("").as_bytes());
        hasher.update(b"\x1f");
        hasher.update(title.as_deref().unwrap_or("").as_bytes());
        return format!("{}-{}", feed.id, hex::encode(&hasher.finalize()[..8]));
    }

    format!("{}-{}", feed.id, Uuid::new_v4().simple())
}

/// Feed dates show up in RFC 2822 (most RSS), RFC 3339 (Atom) and the odd
/// bare "YYYY-MM-DD HH:MM:SS".
fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// First `<img ... src="...">` URL in the HTML body, if any.
fn extract_image_url(content: &str) -> Option<String> {
    static IMG_RE: OnceLock<Regex> = OnceLock::new();
    let re = IMG_RE.get_or_init(|| {
        Regex::new(r#"<img[^>]+src="([^">]+)""#).expect("valid img regex")
    });

    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
