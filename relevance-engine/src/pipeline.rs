use crate::filter::filter_items_at;
use crate::highlight::classify;
use crate::normalize::normalize_batch;
use crate::ranking::rank_items;
use crate::scoring::score_with_preferences;
use chrono::{DateTime, Utc};
use newsdeck_core::{
    EnhancedItem, FilterPreferences, HighlightLevel, HighlightPreferences, Item, SortCriterion,
};
use tracing::debug;

/// Scores, normalizes and classifies a batch. Percentages are relative to the
/// best raw score in `items`, so the whole batch must be passed at once.
pub fn enhance_items(items: Vec<Item>, prefs: &HighlightPreferences) -> Vec<EnhancedItem> {
    let scores: Vec<_> = items
        .iter()
        .map(|item| score_with_preferences(item, prefs))
        .collect();
    let raws: Vec<f64> = scores.iter().map(|s| s.raw).collect();
    let percentages = normalize_batch(&raws);

    let enhanced: Vec<EnhancedItem> = items
        .into_iter()
        .zip(scores)
        .zip(percentages)
        .map(|((item, score), percentage)| {
            let highlight_level = if prefs.enable_highlighting {
                classify(percentage)
            } else {
                HighlightLevel::None
            };
            EnhancedItem {
                item,
                relevance_score: score.raw,
                relevance_percentage: percentage,
                matched_categories: score.matched_categories,
                matched_keywords: score.matched_keywords,
                highlight_level,
            }
        })
        .collect();

    debug!(
        "Enhanced {} items ({} highlighted)",
        enhanced.len(),
        enhanced
            .iter()
            .filter(|e| e.highlight_level != HighlightLevel::None)
            .count()
    );
    enhanced
}

/// The full chain: filter, score, normalize, classify, rank.
pub struct Pipeline<'a> {
    filter: &'a FilterPreferences,
    highlight: &'a HighlightPreferences,
    sort: SortCriterion,
    now: Option<DateTime<Utc>>,
}

impl<'a> Pipeline<'a> {
    pub fn new(filter: &'a FilterPreferences, highlight: &'a HighlightPreferences) -> Self {
        Self {
            filter,
            highlight,
            sort: SortCriterion::default(),
            now: None,
        }
    }

    pub fn with_sort(mut self, sort: SortCriterion) -> Self {
        self.sort = sort;
        self
    }

    /// Pins the clock used by the time-window filter.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn run(&self, items: Vec<Item>) -> Vec<EnhancedItem> {
        let now = self.now.unwrap_or_else(Utc::now);
        let filtered = filter_items_at(items, self.filter, now);
        let enhanced = enhance_items(filtered, self.highlight);
        let ranked = rank_items(&enhanced, self.sort);
        debug!("Pipeline produced {} items sorted by {}", ranked.len(), self.sort);
        ranked
    }
}
