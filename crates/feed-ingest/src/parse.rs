use std::sync::OnceLock;

use news_core::{IngestError, RawFeedItem};
use regex::Regex;

/// Parse raw feed text into the generic item shape. Tries RSS 2.0 first,
/// then Atom.
pub fn parse_feed(text: &str) -> Result<Vec<RawFeedItem>, IngestError> {
    let bytes = text.as_bytes();

    if let Ok(channel) = rss::Channel::read_from(bytes) {
        return Ok(channel.items().iter().map(raw_from_rss).collect());
    }

    if let Ok(feed) = atom_syndication::Feed::read_from(bytes) {
        return Ok(feed.entries().iter().map(raw_from_atom).collect());
    }

    Err(IngestError::Parse(
        "document is neither RSS nor Atom".to_string(),
    ))
}

fn raw_from_rss(item: &rss::Item) -> RawFeedItem {
    RawFeedItem {
        guid: item.guid().map(|g| g.value().to_string()),
        title: item.title().map(str::to_string),
        link: item.link().map(str::to_string),
        pub_date: item.pub_date().map(str::to_string),
        summary: item.description().map(strip_html),
        // content:encoded carries the HTML body in RSS 2.0
        content: item.content().map(str::to_string),
    }
}

fn raw_from_atom(entry: &atom_syndication::Entry) -> RawFeedItem {
    let content = entry
        .content()
        .and_then(|c| c.value())
        .map(str::to_string);
    let summary = entry
        .summary()
        .map(|s| strip_html(s.as_str()))
        .filter(|s| !s.is_empty());

    RawFeedItem {
        guid: Some(entry.id().to_string()),
        title: Some(entry.title().to_string()),
        link: entry.links().first().map(|l| l.href().to_string()),
        pub_date: Some(
            entry
                .published()
                .unwrap_or_else(|| entry.updated())
                .to_rfc3339(),
        ),
        summary,
        content,
    }
}

/// Drop tags and decode the handful of entities that show up in feed
/// summaries; collapses runs of whitespace.
pub fn strip_html(html: &str) -> String {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    let re = TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

    let text = re.replace_all(html, " ");
    let text = text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
