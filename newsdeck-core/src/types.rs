use crate::error::CoreError;
use crate::lenient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Where an item was fetched from. Carried through the pipeline untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Reddit,
    HackerNews,
    GitHub,
    #[default]
    Other,
}

/// One piece of aggregated content, normalized to a common shape.
///
/// Only `title` is required. Every other field falls back to a neutral value
/// when a source doesn't provide it; `source`, `id`, `url` and `extra` are
/// pass-through data that the pipeline never reads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, deserialize_with = "lenient::i64_or_zero")]
    pub score: i64,
    /// Negative counts read as absent.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_non_negative_u64"
    )]
    pub comment_count: Option<u64>,
    /// Unix timestamp in seconds.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::number"
    )]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flair: Option<String>,

    #[serde(default)]
    pub source: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Item {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }

    pub fn with_comments(mut self, comment_count: u64) -> Self {
        self.comment_count = Some(comment_count);
        self
    }

    pub fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_flair(mut self, flair: impl Into<String>) -> Self {
        self.flair = Some(flair.into());
        self
    }

    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or("")
    }

    pub fn comments(&self) -> u64 {
        self.comment_count.unwrap_or(0)
    }

    /// Lowercased grouping key; items without one share the empty key.
    pub fn group_key(&self) -> String {
        self.group.as_deref().unwrap_or("").to_lowercase()
    }

    /// `lowercase(title + " " + body)`, the text every keyword check runs against.
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.body_text()).to_lowercase()
    }

    /// Combined title and body length in characters.
    pub fn content_length(&self) -> usize {
        self.title.chars().count() + self.body_text().chars().count()
    }

    pub fn is_malformed(&self) -> bool {
        self.title.trim().is_empty()
    }
}

/// Parses a JSON array of items. Entries that are not item objects are
/// skipped with a warning; only a payload that isn't an array is an error.
pub fn parse_items(json: &str) -> Result<Vec<Item>, CoreError> {
    let entries: Vec<Value> = serde_json::from_str(json)?;
    let total = entries.len();
    let items: Vec<Item> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Skipping item {}: {}", index, e);
                None
            }
        })
        .collect();
    debug!("Parsed {} of {} items", items.len(), total);
    Ok(items)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightLevel {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl HighlightLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HighlightLevel::None => "none",
            HighlightLevel::Low => "low",
            HighlightLevel::Medium => "medium",
            HighlightLevel::High => "high",
        }
    }
}

impl fmt::Display for HighlightLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An item annotated by the relevance pipeline. Derived fields are rebuilt on
/// every run and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedItem {
    #[serde(flatten)]
    pub item: Item,
    pub relevance_score: f64,
    pub relevance_percentage: u8,
    pub matched_categories: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub highlight_level: HighlightLevel,
}

impl EnhancedItem {
    /// Wraps an item with zeroed relevance annotations.
    pub fn unscored(item: Item) -> Self {
        Self {
            item,
            relevance_score: 0.0,
            relevance_percentage: 0,
            matched_categories: Vec::new(),
            matched_keywords: Vec::new(),
            highlight_level: HighlightLevel::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCriterion {
    Relevance,
    #[default]
    Newest,
    Score,
    Comments,
}

impl SortCriterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortCriterion::Relevance => "relevance",
            SortCriterion::Newest => "newest",
            SortCriterion::Score => "score",
            SortCriterion::Comments => "comments",
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "relevance" => Ok(SortCriterion::Relevance),
            "newest" => Ok(SortCriterion::Newest),
            "score" => Ok(SortCriterion::Score),
            "comments" => Ok(SortCriterion::Comments),
            other => Err(format!("unknown sort criterion: {other}")),
        }
    }
}
