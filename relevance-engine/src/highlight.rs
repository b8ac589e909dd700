use newsdeck_core::HighlightLevel;

pub const LOW_THRESHOLD: u8 = 20;
pub const MEDIUM_THRESHOLD: u8 = 50;
pub const HIGH_THRESHOLD: u8 = 75;

/// Maps a relevance percentage to its highlight tier. Each band includes its
/// lower bound.
pub fn classify(percentage: u8) -> HighlightLevel {
    match percentage {
        p if p < LOW_THRESHOLD => HighlightLevel::None,
        p if p < MEDIUM_THRESHOLD => HighlightLevel::Low,
        p if p < HIGH_THRESHOLD => HighlightLevel::Medium,
        _ => HighlightLevel::High,
    }
}
