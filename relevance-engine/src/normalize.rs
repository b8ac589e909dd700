/// Upper bound for any relevance percentage.
pub const MAX_PERCENTAGE: f64 = 95.0;

/// Rescales a raw score against the highest raw score in its batch.
///
/// Percentages are batch-relative; values from different batches are not
/// comparable.
pub fn relevance_percentage(raw: f64, batch: &[f64]) -> u8 {
    if batch.is_empty() {
        return 0;
    }
    scale(raw, batch_max(batch))
}

/// Normalizes every score of a batch in one pass.
pub fn normalize_batch(batch: &[f64]) -> Vec<u8> {
    let max = batch_max(batch);
    batch.iter().map(|&raw| scale(raw, max)).collect()
}

fn scale(raw: f64, max: f64) -> u8 {
    if raw.is_nan() || raw <= 0.0 || max <= 0.0 {
        return 0;
    }
    (raw / max * 100.0).min(MAX_PERCENTAGE).round() as u8
}

fn batch_max(batch: &[f64]) -> f64 {
    batch
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0, f64::max)
}
