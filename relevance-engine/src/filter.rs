//! Content filter: hard constraints first, then per-group and total caps.

use chrono::{DateTime, Utc};
use newsdeck_core::{FilterPreferences, Item};
use std::collections::HashMap;
use tracing::debug;

/// Why an item was dropped. Only used for the debug summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    Malformed,
    BelowMinScore,
    AboveMaxScore,
    TooFewComments,
    TooOld,
    BlacklistedCharacter,
    BlacklistedKeyword,
    TooShort,
    TooLong,
    ExcludedFlair,
    ExcludedAuthor,
}

pub fn filter_items(items: Vec<Item>, prefs: &FilterPreferences) -> Vec<Item> {
    filter_items_at(items, prefs, Utc::now())
}

/// Same as [`filter_items`] with an explicit clock.
pub fn filter_items_at(
    items: Vec<Item>,
    prefs: &FilterPreferences,
    now: DateTime<Utc>,
) -> Vec<Item> {
    if !prefs.enabled {
        debug!("Filters disabled, passing {} items through", items.len());
        return items;
    }

    let input_count = items.len();
    let rules = Rules::new(prefs, now);
    let mut rejected: HashMap<Rejection, usize> = HashMap::new();

    let survivors: Vec<Item> = items
        .into_iter()
        .filter(|item| match rules.check(item) {
            Ok(()) => true,
            Err(reason) => {
                *rejected.entry(reason).or_default() += 1;
                false
            }
        })
        .collect();

    debug!(
        "Filtered {} -> {} items (rejections: {:?})",
        input_count,
        survivors.len(),
        rejected
    );

    let mut capped = cap_per_group(survivors, prefs.posts_per_group);
    capped.sort_by(|a, b| b.score.cmp(&a.score));
    capped.truncate(prefs.max_total_items);

    debug!("{} items after group and total caps", capped.len());
    capped
}

/// Keeps at most `limit` items per lowercased grouping key, in input order.
/// Groups are emitted in order of first appearance.
pub fn cap_per_group(items: Vec<Item>, limit: usize) -> Vec<Item> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<Item>> = HashMap::new();

    for item in items {
        let key = item.group_key();
        let group = groups.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            Vec::new()
        });
        if group.len() < limit {
            group.push(item);
        }
    }

    order
        .into_iter()
        .filter_map(|key| groups.remove(&key))
        .flatten()
        .collect()
}

struct Rules<'a> {
    prefs: &'a FilterPreferences,
    oldest_allowed: Option<i64>,
    characters: Vec<String>,
    keywords: Vec<String>,
    flairs: Vec<String>,
}

impl<'a> Rules<'a> {
    fn new(prefs: &'a FilterPreferences, now: DateTime<Utc>) -> Self {
        let oldest_allowed = prefs.time_range_hours.map(|hours| {
            let window = i64::try_from(hours.saturating_mul(3600)).unwrap_or(i64::MAX);
            now.timestamp().saturating_sub(window)
        });

        Self {
            prefs,
            oldest_allowed,
            characters: lowered(&prefs.character_blacklist, |c| c.is_empty()),
            keywords: lowered(&prefs.keyword_blacklist, is_blank),
            flairs: lowered(&prefs.excluded_flairs, is_blank),
        }
    }

    fn check(&self, item: &Item) -> Result<(), Rejection> {
        let prefs = self.prefs;

        if item.is_malformed() {
            return Err(Rejection::Malformed);
        }
        if item.score < prefs.min_upvotes {
            return Err(Rejection::BelowMinScore);
        }
        if prefs.max_upvotes.is_some_and(|max| item.score > max) {
            return Err(Rejection::AboveMaxScore);
        }
        if item.comments() < prefs.min_comments {
            return Err(Rejection::TooFewComments);
        }
        if let (Some(oldest), Some(created_at)) = (self.oldest_allowed, item.created_at) {
            if created_at < oldest {
                return Err(Rejection::TooOld);
            }
        }

        // Characters match title and body apart, so the joining space never hits.
        let title = item.title.to_lowercase();
        let body = item.body_text().to_lowercase();
        if self
            .characters
            .iter()
            .any(|c| title.contains(c.as_str()) || body.contains(c.as_str()))
        {
            return Err(Rejection::BlacklistedCharacter);
        }
        let text = item.searchable_text();
        if self.keywords.iter().any(|k| text.contains(k.as_str())) {
            return Err(Rejection::BlacklistedKeyword);
        }

        let length = item.content_length();
        if length < prefs.min_post_length {
            return Err(Rejection::TooShort);
        }
        if prefs.max_post_length.is_some_and(|max| length > max) {
            return Err(Rejection::TooLong);
        }

        if let Some(flair) = &item.flair {
            let flair = flair.to_lowercase();
            if self.flairs.iter().any(|f| flair.contains(f.as_str())) {
                return Err(Rejection::ExcludedFlair);
            }
        }
        if let Some(author) = &item.author {
            if prefs.excluded_authors.iter().any(|a| a == author) {
                return Err(Rejection::ExcludedAuthor);
            }
        }

        Ok(())
    }
}

/// Lowercases blacklist entries, dropping the ones `skip` flags. An empty
/// entry would match every item. Characters keep whitespace entries.
fn lowered(entries: &[String], skip: impl Fn(&str) -> bool) -> Vec<String> {
    entries
        .iter()
        .filter(|e| !skip(e.as_str()))
        .map(|e| e.to_lowercase())
        .collect()
}

fn is_blank(entry: &str) -> bool {
    entry.trim().is_empty()
}
