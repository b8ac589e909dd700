//! Keyword relevance scoring.
//!
//! Keywords are matched as literal, case-insensitive substrings. Each hit is
//! multiplied by a title weight (3 when the keyword also appears in the
//! title) and by the weight of whatever brought the keyword in: the category
//! weight, or the fixed primary/secondary weights. A logarithmic engagement
//! boost is added on top.

use newsdeck_core::{HighlightPreferences, Item, KeywordCategory};

pub const TITLE_WEIGHT: f64 = 3.0;
pub const BODY_WEIGHT: f64 = 1.0;
pub const PRIMARY_KEYWORD_WEIGHT: f64 = 3.0;
pub const SECONDARY_KEYWORD_WEIGHT: f64 = 2.0;
pub const ENGAGEMENT_FACTOR: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RelevanceScore {
    pub raw: f64,
    pub matched_categories: Vec<String>,
    pub matched_keywords: Vec<String>,
}

impl RelevanceScore {
    fn record_keyword(&mut self, keyword: &str) {
        if !self.matched_keywords.iter().any(|k| k == keyword) {
            self.matched_keywords.push(keyword.to_string());
        }
    }
}

/// Lowercased views of an item, built once per item.
struct ScoringText {
    text: String,
    title: String,
}

impl ScoringText {
    fn new(item: &Item) -> Self {
        Self {
            text: item.searchable_text(),
            title: item.title.to_lowercase(),
        }
    }

    /// Contribution of one keyword before the category/list weight is
    /// applied, or `None` when it doesn't occur.
    fn keyword_hits(&self, keyword: &str) -> Option<f64> {
        let needle = keyword.to_lowercase();
        if needle.trim().is_empty() {
            return None;
        }
        let occurrences = count_occurrences(&self.text, &needle);
        if occurrences == 0 {
            return None;
        }
        let title_weight = if self.title.contains(&needle) {
            TITLE_WEIGHT
        } else {
            BODY_WEIGHT
        };
        Some(occurrences as f64 * title_weight)
    }
}

/// Non-overlapping literal occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

pub fn score_item(
    item: &Item,
    categories: &[KeywordCategory],
    enabled_category_ids: &[String],
    primary_keywords: &[String],
    secondary_keywords: &[String],
) -> RelevanceScore {
    let text = ScoringText::new(item);
    let mut score = RelevanceScore::default();

    for category in categories
        .iter()
        .filter(|c| enabled_category_ids.iter().any(|id| id == &c.id))
    {
        let weight = category.effective_weight();
        if weight == 0.0 {
            continue;
        }
        let mut subtotal = 0.0;
        for keyword in &category.keywords {
            if let Some(hits) = text.keyword_hits(keyword) {
                subtotal += hits * weight;
                score.record_keyword(keyword);
            }
        }
        if subtotal > 0.0 {
            if !score.matched_categories.contains(&category.id) {
                score.matched_categories.push(category.id.clone());
            }
            score.raw += subtotal;
        }
    }

    for (keywords, weight) in [
        (primary_keywords, PRIMARY_KEYWORD_WEIGHT),
        (secondary_keywords, SECONDARY_KEYWORD_WEIGHT),
    ] {
        for keyword in keywords {
            if let Some(hits) = text.keyword_hits(keyword) {
                score.raw += hits * weight;
                score.record_keyword(keyword);
            }
        }
    }

    score.raw += engagement_boost(item.score);
    score
}

/// Scores an item against a highlight preference document.
pub fn score_with_preferences(item: &Item, prefs: &HighlightPreferences) -> RelevanceScore {
    score_item(
        item,
        &prefs.categories,
        &prefs.enabled_categories,
        &prefs.primary_keywords,
        &prefs.secondary_keywords,
    )
}

/// `ln(score + 1) * 0.5` for positive engagement, otherwise zero.
pub fn engagement_boost(engagement: i64) -> f64 {
    if engagement > 0 {
        (engagement as f64 + 1.0).ln() * ENGAGEMENT_FACTOR
    } else {
        0.0
    }
}
