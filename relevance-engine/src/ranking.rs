use newsdeck_core::{EnhancedItem, SortCriterion};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Returns a new, sorted copy of `items`. The sort is stable, so ties beyond
/// the declared tie-break keep their input order.
pub fn rank_items(items: &[EnhancedItem], criterion: SortCriterion) -> Vec<EnhancedItem> {
    let mut ranked = items.to_vec();
    ranked.sort_by(|a, b| compare(a, b, criterion));
    ranked
}

fn compare(a: &EnhancedItem, b: &EnhancedItem, criterion: SortCriterion) -> Ordering {
    match criterion {
        SortCriterion::Relevance => b
            .relevance_percentage
            .cmp(&a.relevance_percentage)
            .then_with(|| b.item.score.cmp(&a.item.score)),
        SortCriterion::Newest => match (a.item.created_at, b.item.created_at) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortCriterion::Score => b.item.score.cmp(&a.item.score),
        SortCriterion::Comments => b.item.comments().cmp(&a.item.comments()),
    }
}

/// Ranked items sharing one grouping key, for columnar display.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemGroup {
    pub key: String,
    pub items: Vec<EnhancedItem>,
}

/// Splits an already ranked list by lowercased grouping key. Groups appear in
/// order of their first item and keep the ranked order inside.
pub fn group_ranked(items: &[EnhancedItem]) -> Vec<ItemGroup> {
    let mut groups: Vec<ItemGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let key = item.item.group_key();
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(ItemGroup {
                key,
                items: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].items.push(item.clone());
    }

    groups
}
