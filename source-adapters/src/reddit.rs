use newsdeck_core::{CoreError, Item, SourceError, SourceKind};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::debug;

const REDDIT_BASE_URL: &str = "https://reddit.com";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListing<T> {
    pub kind: String,
    pub data: RedditListingData<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingData<T> {
    pub children: Vec<RedditListingChild<T>>,
    pub after: Option<String>,
    pub before: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedditListingChild<T> {
    pub kind: String,
    pub data: T,
}

/// The subset of a Reddit post the aggregator cares about. Every field but
/// the title is optional in practice (deleted and promoted posts omit some).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RedditPostData {
    pub id: String,
    pub title: String,
    pub selftext: Option<String>,
    pub author: Option<String>,
    pub subreddit: Option<String>,
    pub url: Option<String>,
    pub permalink: Option<String>,
    pub created_utc: Option<f64>,
    pub score: i64,
    pub num_comments: Option<u64>,
    pub link_flair_text: Option<String>,
    pub link_flair_css_class: Option<String>,
    pub link_flair_background_color: Option<String>,
    pub link_flair_text_color: Option<String>,
    pub author_flair_text: Option<String>,
}

impl From<RedditPostData> for Item {
    fn from(post: RedditPostData) -> Self {
        let mut extra = Map::new();
        if let Some(permalink) = &post.permalink {
            extra.insert(
                "permalink".to_string(),
                json!(format!("{REDDIT_BASE_URL}{permalink}")),
            );
        }
        for (key, value) in [
            ("linkFlairCssClass", &post.link_flair_css_class),
            ("linkFlairBackgroundColor", &post.link_flair_background_color),
            ("linkFlairTextColor", &post.link_flair_text_color),
            ("authorFlairText", &post.author_flair_text),
        ] {
            if let Some(value) = value.as_ref().filter(|v| !v.is_empty()) {
                extra.insert(key.to_string(), Value::String(value.clone()));
            }
        }

        Item {
            title: post.title,
            body: post.selftext.filter(|s| !s.is_empty()),
            score: post.score,
            comment_count: post.num_comments,
            created_at: post.created_utc.map(|ts| ts as i64),
            author: post.author,
            group: post.subreddit,
            flair: post.link_flair_text.filter(|f| !f.is_empty()),
            source: SourceKind::Reddit,
            id: Some(post.id).filter(|id| !id.is_empty()),
            url: post.url,
            extra,
        }
    }
}

/// Converts a `/r/<name>/hot.json` style listing into items.
pub fn parse_listing(json: &str) -> Result<Vec<Item>, CoreError> {
    let listing: RedditListing<RedditPostData> =
        serde_json::from_str(json).map_err(|e| SourceError::InvalidPayload {
            source_name: "reddit".to_string(),
            details: e.to_string(),
        })?;

    let items: Vec<Item> = listing
        .data
        .children
        .into_iter()
        .map(|child| Item::from(child.data))
        .collect();

    debug!("Parsed {} Reddit posts", items.len());
    Ok(items)
}
