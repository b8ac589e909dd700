//! Persisted user preference documents.
//!
//! Both documents deserialize leniently: missing fields take their defaults and
//! out-of-range numbers are clamped or treated as unset instead of rejected, so
//! a stale or hand-edited document never stops the pipeline.

use crate::categories::{default_categories, default_category_ids, KeywordCategory};
use crate::lenient;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_MIN_UPVOTES: i64 = 1;
pub const DEFAULT_POSTS_PER_GROUP: usize = 15;
pub const DEFAULT_MAX_TOTAL_ITEMS: usize = 80;

/// Hard constraints and volume caps applied before scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterPreferences {
    #[serde(deserialize_with = "min_upvotes_or_default")]
    pub min_upvotes: i64,
    /// Zero or negative means no upper bound.
    #[serde(deserialize_with = "lenient::optional_positive_i64")]
    pub max_upvotes: Option<i64>,
    #[serde(deserialize_with = "non_negative_u64")]
    pub min_comments: u64,
    /// Negative means no time window.
    #[serde(alias = "timeRange", deserialize_with = "lenient::optional_non_negative_u64")]
    pub time_range_hours: Option<u64>,
    pub character_blacklist: Vec<String>,
    pub keyword_blacklist: Vec<String>,
    #[serde(deserialize_with = "non_negative_usize")]
    pub min_post_length: usize,
    /// Zero or negative means no upper bound.
    #[serde(deserialize_with = "lenient::optional_positive_usize")]
    pub max_post_length: Option<usize>,
    pub excluded_flairs: Vec<String>,
    pub excluded_authors: Vec<String>,
    #[serde(alias = "postsPerSubreddit", deserialize_with = "posts_per_group_or_default")]
    pub posts_per_group: usize,
    #[serde(alias = "maxTotalPosts", deserialize_with = "max_total_items_or_default")]
    pub max_total_items: usize,
    #[serde(deserialize_with = "enabled_or_default")]
    pub enabled: bool,
}

impl Default for FilterPreferences {
    fn default() -> Self {
        Self {
            min_upvotes: DEFAULT_MIN_UPVOTES,
            max_upvotes: None,
            min_comments: 0,
            time_range_hours: None,
            character_blacklist: Vec::new(),
            keyword_blacklist: vec!["removed".to_string(), "deleted".to_string()],
            min_post_length: 0,
            max_post_length: None,
            excluded_flairs: Vec::new(),
            excluded_authors: Vec::new(),
            posts_per_group: DEFAULT_POSTS_PER_GROUP,
            max_total_items: DEFAULT_MAX_TOTAL_ITEMS,
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlacklistKind {
    Character,
    Keyword,
    Flair,
    Author,
}

impl FilterPreferences {
    /// Preferences that let every item through.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn toggle_enabled(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Adds a blacklist entry. Blank values and duplicates are ignored;
    /// keywords are stored lowercased.
    pub fn add_to_blacklist(&mut self, kind: BlacklistKind, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() {
            return false;
        }
        let value = match kind {
            BlacklistKind::Keyword => value.to_lowercase(),
            _ => value.to_string(),
        };
        let list = self.blacklist_mut(kind);
        if list.contains(&value) {
            return false;
        }
        list.push(value);
        true
    }

    pub fn remove_from_blacklist(&mut self, kind: BlacklistKind, value: &str) -> bool {
        let list = self.blacklist_mut(kind);
        let before = list.len();
        list.retain(|entry| entry != value);
        list.len() != before
    }

    pub fn blacklist(&self, kind: BlacklistKind) -> &[String] {
        match kind {
            BlacklistKind::Character => &self.character_blacklist,
            BlacklistKind::Keyword => &self.keyword_blacklist,
            BlacklistKind::Flair => &self.excluded_flairs,
            BlacklistKind::Author => &self.excluded_authors,
        }
    }

    fn blacklist_mut(&mut self, kind: BlacklistKind) -> &mut Vec<String> {
        match kind {
            BlacklistKind::Character => &mut self.character_blacklist,
            BlacklistKind::Keyword => &mut self.keyword_blacklist,
            BlacklistKind::Flair => &mut self.excluded_flairs,
            BlacklistKind::Author => &mut self.excluded_authors,
        }
    }
}

/// Category table plus the keyword lists that drive relevance scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HighlightPreferences {
    pub categories: Vec<KeywordCategory>,
    pub enabled_categories: Vec<String>,
    pub primary_keywords: Vec<String>,
    pub secondary_keywords: Vec<String>,
    pub enable_highlighting: bool,
}

impl Default for HighlightPreferences {
    fn default() -> Self {
        Self {
            categories: default_categories(),
            enabled_categories: default_category_ids(),
            primary_keywords: Vec::new(),
            secondary_keywords: Vec::new(),
            enable_highlighting: true,
        }
    }
}

impl HighlightPreferences {
    pub fn with_categories(categories: Vec<KeywordCategory>) -> Self {
        let enabled_categories = categories.iter().map(|c| c.id.clone()).collect();
        Self {
            categories,
            enabled_categories,
            ..Self::default()
        }
    }

    pub fn is_category_enabled(&self, id: &str) -> bool {
        self.enabled_categories.iter().any(|enabled| enabled == id)
    }

    /// Flips a category on or off. Unknown ids are ignored.
    pub fn toggle_category(&mut self, id: &str) {
        if !self.categories.iter().any(|c| c.id == id) {
            return;
        }
        if self.is_category_enabled(id) {
            self.enabled_categories.retain(|enabled| enabled != id);
        } else {
            self.enabled_categories.push(id.to_string());
        }
    }

    pub fn category_mut(&mut self, id: &str) -> Option<&mut KeywordCategory> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    /// Replaces a category's keywords from comma-separated text.
    pub fn set_category_keywords(&mut self, id: &str, keywords: &str) -> bool {
        match self.category_mut(id) {
            Some(category) => {
                category.set_keywords(keywords.split(','));
                true
            }
            None => false,
        }
    }

    pub fn add_primary_keyword(&mut self, keyword: &str) -> bool {
        add_unique(&mut self.primary_keywords, keyword)
    }

    pub fn remove_primary_keyword(&mut self, keyword: &str) -> bool {
        remove_entry(&mut self.primary_keywords, keyword)
    }

    pub fn add_secondary_keyword(&mut self, keyword: &str) -> bool {
        add_unique(&mut self.secondary_keywords, keyword)
    }

    pub fn remove_secondary_keyword(&mut self, keyword: &str) -> bool {
        remove_entry(&mut self.secondary_keywords, keyword)
    }
}

fn add_unique(list: &mut Vec<String>, keyword: &str) -> bool {
    let keyword = keyword.trim();
    if keyword.is_empty() || list.iter().any(|k| k.eq_ignore_ascii_case(keyword)) {
        return false;
    }
    list.push(keyword.to_string());
    true
}

fn remove_entry(list: &mut Vec<String>, keyword: &str) -> bool {
    let before = list.len();
    list.retain(|k| k != keyword);
    list.len() != before
}

fn min_upvotes_or_default<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::number(deserializer)?.unwrap_or(DEFAULT_MIN_UPVOTES))
}

fn non_negative_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::number(deserializer)?.unwrap_or(0).max(0) as u64)
}

fn non_negative_usize<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::number(deserializer)?.unwrap_or(0).max(0) as usize)
}

fn posts_per_group_or_default<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::number(deserializer)?
        .map(|v| v.max(0) as usize)
        .unwrap_or(DEFAULT_POSTS_PER_GROUP))
}

fn max_total_items_or_default<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient::number(deserializer)?
        .map(|v| v.max(0) as usize)
        .unwrap_or(DEFAULT_MAX_TOTAL_ITEMS))
}

fn enabled_or_default<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        Some(serde_json::Value::Bool(enabled)) => Ok(enabled),
        _ => Ok(true),
    }
}
