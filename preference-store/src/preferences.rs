use crate::PreferenceStore;
use newsdeck_core::{CoreError, FilterPreferences, HighlightPreferences, SortCriterion};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

pub const FILTER_PREFERENCES_KEY: &str = "filter-preferences";
pub const HIGHLIGHT_PREFERENCES_KEY: &str = "highlight-preferences";
pub const SORT_PREFERENCE_KEY: &str = "sort-preferences";

pub async fn load_filter_preferences(
    store: &PreferenceStore,
) -> Result<FilterPreferences, CoreError> {
    load_json(store, FILTER_PREFERENCES_KEY).await
}

pub async fn save_filter_preferences(
    store: &PreferenceStore,
    prefs: &FilterPreferences,
) -> Result<(), CoreError> {
    save_json(store, FILTER_PREFERENCES_KEY, prefs).await
}

pub async fn load_highlight_preferences(
    store: &PreferenceStore,
) -> Result<HighlightPreferences, CoreError> {
    load_json(store, HIGHLIGHT_PREFERENCES_KEY).await
}

pub async fn save_highlight_preferences(
    store: &PreferenceStore,
    prefs: &HighlightPreferences,
) -> Result<(), CoreError> {
    save_json(store, HIGHLIGHT_PREFERENCES_KEY, prefs).await
}

/// The sort choice is stored as the bare criterion name, not JSON.
pub async fn load_sort_criterion(store: &PreferenceStore) -> Result<SortCriterion, CoreError> {
    let Some(raw) = store.get(SORT_PREFERENCE_KEY).await? else {
        return Ok(SortCriterion::default());
    };
    Ok(raw.parse().unwrap_or_else(|e| {
        warn!("Ignoring stored sort preference: {}", e);
        SortCriterion::default()
    }))
}

pub async fn save_sort_criterion(
    store: &PreferenceStore,
    criterion: SortCriterion,
) -> Result<(), CoreError> {
    store.set(SORT_PREFERENCE_KEY, criterion.as_str()).await
}

/// Reads a JSON document. Absent documents take the type's defaults; a
/// document that fails to parse keeps every field that still reads on its own.
/// Only storage failures are errors.
async fn load_json<T>(store: &PreferenceStore, key: &str) -> Result<T, CoreError>
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!("Stored {} is malformed, keeping readable fields: {}", key, e);
            Ok(salvage_fields(&raw, key))
        }
    }
}

/// Rebuilds a document field by field on top of the defaults, dropping the
/// fields that fail to deserialize.
fn salvage_fields<T>(raw: &str, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    let Ok(Value::Object(stored)) = serde_json::from_str::<Value>(raw) else {
        return T::default();
    };

    let mut kept = Map::new();
    for (field, value) in stored {
        kept.insert(field.clone(), value);
        if serde_json::from_value::<T>(Value::Object(kept.clone())).is_err() {
            warn!("Ignoring stored {}.{}", key, field);
            kept.remove(&field);
        }
    }
    serde_json::from_value(Value::Object(kept)).unwrap_or_default()
}

async fn save_json<T: Serialize>(
    store: &PreferenceStore,
    key: &str,
    value: &T,
) -> Result<(), CoreError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw).await
}
