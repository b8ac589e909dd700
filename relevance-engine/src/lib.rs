pub mod filter;
pub mod highlight;
pub mod normalize;
pub mod pipeline;
pub mod ranking;
pub mod scoring;


pub use filter::{cap_per_group, filter_items, filter_items_at, Rejection};
pub use highlight::classify;
pub use normalize::{normalize_batch, relevance_percentage, MAX_PERCENTAGE};
pub use pipeline::{enhance_items, Pipeline};
pub use ranking::{group_ranked, rank_items, ItemGroup};
pub use scoring::{engagement_boost, score_item, score_with_preferences, RelevanceScore};
