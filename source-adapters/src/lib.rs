//! Converters from raw Reddit, Hacker News and GitHub JSON into [`Item`]s,
//! along with the per-source prefilters applied before the shared pipeline.
//!
//! [`Item`]: newsdeck_core::Item

pub mod github;
pub mod hackernews;
pub mod prefilter;
pub mod reddit;

mod tests;

pub use github::{parse_search_response, prefilter_repos, repos_to_items, GitHubRepo};
pub use hackernews::{
    parse_stories, parse_story, prefilter_stories, stories_to_items, HackerNewsStory,
};
pub use reddit::{parse_listing, RedditPostData};
