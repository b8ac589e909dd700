use crate::prefilter::{
    contains_any, count_matching, STORY_NEGATIVE_KEYWORDS, TECH_DOMAINS, TECH_KEYWORDS,
};
use chrono::{DateTime, Duration, Utc};
use newsdeck_core::{CoreError, Item, SourceError, SourceKind};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use tracing::{debug, info};
use url::Url;

pub const HACKER_NEWS_GROUP: &str = "hackernews";
const DISCUSSION_HOST: &str = "news.ycombinator.com";
const RECENT_WINDOW_HOURS: i64 = 24;

/// A story as returned by the Firebase `item/<id>.json` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HackerNewsStory {
    pub id: u64,
    pub title: String,
    pub url: Option<String>,
    pub score: i64,
    pub by: Option<String>,
    pub time: i64,
    pub descendants: Option<u64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl HackerNewsStory {
    pub fn discussion_url(&self) -> String {
        format!("https://{DISCUSSION_HOST}/item?id={}", self.id)
    }

    fn host(&self) -> Option<String> {
        let url = self.url.as_deref()?;
        Url::parse(url)
            .ok()?
            .host_str()
            .map(|host| host.to_lowercase())
    }

    /// Keyword hits in the title, +2 for linking out, +3 for a known tech
    /// domain, -1 for text-only posts.
    pub fn tech_relevance(&self) -> i32 {
        let mut score = count_matching(&self.title, TECH_KEYWORDS) as i32;

        match self.url.as_deref() {
            Some(url) => {
                if !url.contains(DISCUSSION_HOST) {
                    score += 2;
                }
                if let Some(host) = self.host() {
                    if TECH_DOMAINS.iter().any(|domain| host.contains(domain)) {
                        score += 3;
                    }
                }
            }
            None => score -= 1,
        }

        score
    }

    fn is_ask_or_help(&self) -> bool {
        let title = self.title.to_lowercase();
        title.starts_with("ask hn") || (title.starts_with("show hn") && title.contains("help"))
    }

    fn rejection(&self, cutoff: i64) -> Option<&'static str> {
        if self.title.trim().is_empty() {
            Some("no title")
        } else if self.time < cutoff {
            Some("too old")
        } else if self.score < 1 {
            Some("insufficient upvotes")
        } else if contains_any(&self.title, STORY_NEGATIVE_KEYWORDS) {
            Some("contains negative keywords")
        } else if self.title.contains('?') {
            Some("contains question mark")
        } else if self.is_ask_or_help() {
            Some("ask/help post")
        } else if self.tech_relevance() < 1 {
            Some("low tech relevance")
        } else {
            None
        }
    }
}

impl From<HackerNewsStory> for Item {
    fn from(story: HackerNewsStory) -> Self {
        let url = story.url.clone().or_else(|| Some(story.discussion_url()));
        let mut extra = serde_json::Map::new();
        extra.insert(
            "discussionUrl".to_string(),
            serde_json::Value::String(story.discussion_url()),
        );

        Item {
            title: story.title,
            body: None,
            score: story.score,
            comment_count: story.descendants,
            created_at: Some(story.time).filter(|t| *t > 0),
            author: story.by,
            group: Some(HACKER_NEWS_GROUP.to_string()),
            flair: None,
            source: SourceKind::HackerNews,
            id: Some(story.id.to_string()),
            url,
            extra,
        }
    }
}

pub fn parse_story(json: &str) -> Result<HackerNewsStory, CoreError> {
    Ok(serde_json::from_str(json).map_err(invalid_payload)?)
}

/// Parses a JSON array of stories. `null` entries (deleted items) are skipped.
pub fn parse_stories(json: &str) -> Result<Vec<HackerNewsStory>, CoreError> {
    let stories: Vec<Option<HackerNewsStory>> =
        serde_json::from_str(json).map_err(invalid_payload)?;
    let stories: Vec<HackerNewsStory> = stories.into_iter().flatten().collect();
    debug!("Parsed {} Hacker News stories", stories.len());
    Ok(stories)
}

/// Keeps recent, upvoted, tech-relevant stories that are not questions,
/// most relevant first and then by score.
pub fn prefilter_stories(stories: Vec<HackerNewsStory>, now: DateTime<Utc>) -> Vec<HackerNewsStory> {
    let total = stories.len();
    let cutoff = (now - Duration::hours(RECENT_WINDOW_HOURS)).timestamp();

    let mut kept: Vec<HackerNewsStory> = stories
        .into_iter()
        .filter(|story| match story.rejection(cutoff) {
            Some(reason) => {
                debug!("HN: filtered out {:?} ({})", story.title, reason);
                false
            }
            None => true,
        })
        .collect();

    kept.sort_by_key(|story| (Reverse(story.tech_relevance()), Reverse(story.score)));
    info!(
        "HN: kept {} tech-focused stories out of {}",
        kept.len(),
        total
    );
    kept
}

pub fn stories_to_items(stories: Vec<HackerNewsStory>) -> Vec<Item> {
    stories.into_iter().map(Item::from).collect()
}

fn invalid_payload(e: serde_json::Error) -> SourceError {
    SourceError::InvalidPayload {
        source_name: HACKER_NEWS_GROUP.to_string(),
        details: e.to_string(),
    }
}
