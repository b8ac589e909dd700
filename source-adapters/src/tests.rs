#[cfg(test)]
mod tests {
    use crate::github::{GitHubOwner, GitHubRepo};
    use crate::hackernews::{HackerNewsStory, HACKER_NEWS_GROUP};
    use crate::{
        parse_listing, parse_search_response, parse_stories, parse_story, prefilter_repos,
        prefilter_stories, repos_to_items, stories_to_items,
    };
    use chrono::{DateTime, TimeZone, Utc};
    use newsdeck_core::{CoreError, Item, SourceError, SourceKind};

    const REDDIT_LISTING: &str = r#"{
        "kind": "Listing",
        "data": {
            "after": "t3_abc",
            "before": null,
            "children": [
                {
                    "kind": "t3",
                    "data": {
                        "id": "abc",
                        "title": "New LLM release",
                        "selftext": "",
                        "author": "someone",
                        "subreddit": "MachineLearning",
                        "url": "https://example.com/llm",
                        "permalink": "/r/MachineLearning/comments/abc/new_llm_release/",
                        "created_utc": 1700000000.0,
                        "score": 321,
                        "num_comments": 42,
                        "link_flair_text": "News",
                        "link_flair_background_color": ""
                    }
                },
                {
                    "kind": "t3",
                    "data": { "title": "Bare post" }
                }
            ]
        }
    }"#;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    fn story(id: u64, title: &str, url: Option<&str>, score: i64, age_hours: i64) -> HackerNewsStory {
        HackerNewsStory {
            id,
            title: title.to_string(),
            url: url.map(str::to_string),
            score,
            by: Some("pg".to_string()),
            time: now().timestamp() - age_hours * 3600,
            descendants: Some(3),
            kind: Some("story".to_string()),
        }
    }

    fn repo(name: &str, description: Option<&str>, stars: i64) -> GitHubRepo {
        GitHubRepo {
            id: 1,
            name: name.to_string(),
            full_name: format!("octo/{name}"),
            description: description.map(str::to_string),
            stargazers_count: stars,
            owner: GitHubOwner {
                login: "octo".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_reddit_listing_converts_posts() {
        let items = parse_listing(REDDIT_LISTING).unwrap();
        assert_eq!(items.len(), 2);

        let post = &items[0];
        assert_eq!(post.title, "New LLM release");
        assert_eq!(post.body, None);
        assert_eq!(post.score, 321);
        assert_eq!(post.comment_count, Some(42));
        assert_eq!(post.created_at, Some(1_700_000_000));
        assert_eq!(post.group.as_deref(), Some("MachineLearning"));
        assert_eq!(post.group_key(), "machinelearning");
        assert_eq!(post.flair.as_deref(), Some("News"));
        assert_eq!(post.source, SourceKind::Reddit);
        assert_eq!(
            post.extra["permalink"],
            "https://reddit.com/r/MachineLearning/comments/abc/new_llm_release/"
        );
        assert!(!post.extra.contains_key("linkFlairBackgroundColor"));

        let bare = &items[1];
        assert_eq!(bare.title, "Bare post");
        assert_eq!(bare.id, None);
        assert_eq!(bare.score, 0);
        assert_eq!(bare.created_at, None);
    }

    #[test]
    fn test_reddit_invalid_payload() {
        let result = parse_listing(r#"{"kind": "Listing"}"#);
        assert!(matches!(
            result,
            Err(CoreError::Source(SourceError::InvalidPayload { ref source_name, .. }))
                if source_name == "reddit"
        ));
    }

    #[test]
    fn test_hacker_news_stories_skip_deleted_entries() {
        let json = r#"[
            {"id": 1, "title": "Rust compiler release", "url": "https://github.com/rust-lang/rust",
             "score": 120, "by": "steve", "time": 1699990000, "descendants": 17, "type": "story"},
            null,
            {"id": 2, "title": "Text post", "score": 3, "by": "ann", "time": 1699990000, "type": "story"}
        ]"#;
        let stories = parse_stories(json).unwrap();
        assert_eq!(stories.len(), 2);
        assert_eq!(stories[0].kind.as_deref(), Some("story"));

        let items = stories_to_items(stories);
        assert_eq!(items[0].author.as_deref(), Some("steve"));
        assert_eq!(items[0].comment_count, Some(17));
        assert_eq!(items[0].group.as_deref(), Some(HACKER_NEWS_GROUP));
        assert_eq!(items[0].source, SourceKind::HackerNews);
        assert_eq!(items[0].id.as_deref(), Some("1"));

        // text posts link back to the discussion
        assert_eq!(
            items[1].url.as_deref(),
            Some("https://news.ycombinator.com/item?id=2")
        );
        assert_eq!(items[1].comment_count, None);
    }

    #[test]
    fn test_parse_single_story() {
        let parsed = parse_story(r#"{"id": 7, "title": "Hello", "score": 1, "time": 5}"#).unwrap();
        assert_eq!(parsed.id, 7);
        assert_eq!(parsed.url, None);
        assert!(parse_story("42").is_err());
    }

    #[test]
    fn test_tech_relevance() {
        // keyword + external link + known domain
        let linked = story(1, "Rust compiler release", Some("https://github.com/rust-lang"), 10, 1);
        assert_eq!(linked.tech_relevance(), 6);

        let external = story(2, "Postgres database internals", Some("https://example.com/p"), 10, 1);
        assert_eq!(external.tech_relevance(), 4);

        let discussion = story(3, "Rust", Some("https://news.ycombinator.com/item?id=3"), 10, 1);
        assert_eq!(discussion.tech_relevance(), 1);

        let text_only = story(4, "Zebra facts", None, 10, 1);
        assert_eq!(text_only.tech_relevance(), -1);
    }

    #[test]
    fn test_prefilter_stories() {
        let stories = vec![
            story(1, "Rust async runtime", Some("https://example.org/a"), 5, 2),
            story(2, "Rust tooling", Some("https://example.org/b"), 90, 25),
            story(3, "Rust compiler release", Some("https://github.com/rust-lang"), 10, 1),
            story(4, "Rust linker", Some("https://example.net/c"), 30, 3),
            story(5, "Unloved Rust crate", Some("https://example.org/d"), 0, 1),
            story(6, "Why Rust", Some("https://example.org/e"), 50, 1),
            story(7, "Ask HN: best Rust book", None, 70, 1),
            story(8, "Zebra facts", None, 80, 1),
            story(9, "Postgres database internals", Some("https://example.com/p"), 50, 1),
            story(10, "Why Rust?", Some("https://example.org/f"), 50, 1),
        ];

        let kept: Vec<u64> = prefilter_stories(stories, now())
            .into_iter()
            .map(|s| s.id)
            .collect();
        // relevance 6, 4, then the 3s by score
        assert_eq!(kept, vec![3, 9, 6, 4, 1]);
    }

    #[test]
    fn test_show_hn_help_posts_are_dropped() {
        let stories = vec![
            story(1, "Show HN: I need testers, help", Some("https://example.org/x"), 9, 1),
            story(2, "Show HN: Rust web framework", Some("https://example.org/y"), 9, 1),
        ];
        let kept = prefilter_stories(stories, now());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, 2);
    }

    #[test]
    fn test_github_search_response() {
        let json = r#"{
            "total_count": 1,
            "items": [{
                "id": 99,
                "name": "fastdb",
                "full_name": "octo/fastdb",
                "description": "An embedded database",
                "html_url": "https://github.com/octo/fastdb",
                "stargazers_count": 512,
                "forks_count": 12,
                "language": "Rust",
                "created_at": "2024-01-02T03:04:05Z",
                "pushed_at": "2024-01-03T00:00:00Z",
                "owner": {"login": "octo", "avatar_url": "https://avatars/octo"},
                "topics": ["database", "embedded"],
                "license": {"name": "MIT License"}
            }]
        }"#;
        let repos = parse_search_response(json).unwrap();
        let items = repos_to_items(repos).unwrap();
        assert_eq!(items.len(), 1);

        let item = &items[0];
        assert_eq!(item.title, "fastdb");
        assert_eq!(item.body.as_deref(), Some("An embedded database"));
        assert_eq!(item.score, 512);
        assert_eq!(item.comment_count, Some(12));
        assert_eq!(item.created_at, Some(1_704_164_645));
        assert_eq!(item.group.as_deref(), Some("rust"));
        assert_eq!(item.author.as_deref(), Some("octo"));
        assert_eq!(item.source, SourceKind::GitHub);
        assert_eq!(item.extra["license"], "MIT License");
        assert_eq!(item.extra["topics"][1], "embedded");
        assert_eq!(item.extra["fullName"], "octo/fastdb");
    }

    #[test]
    fn test_github_payload_errors() {
        assert!(parse_search_response("{}").unwrap().is_empty());
        assert!(matches!(
            parse_search_response("not json"),
            Err(CoreError::Source(SourceError::InvalidPayload { .. }))
        ));

        let mut bad = repo("fastdb", Some("An embedded database"), 3);
        bad.created_at = Some("yesterday".to_string());
        assert!(matches!(
            Item::try_from(bad),
            Err(SourceError::InvalidTimestamp { ref value }) if value == "yesterday"
        ));
    }

    #[test]
    fn test_prefilter_repos() {
        let repos = vec![
            repo("small", Some("A small parser"), 2),
            repo("unstarred", Some("A parser"), 0),
            repo("silent", None, 50),
            repo("blank", Some(""), 50),
            repo("course", Some("A beginner tutorial for parsers"), 80),
            repo("learning-rust", Some("Notes"), 90),
            repo("big", Some("A fast parser"), 40),
        ];
        let kept: Vec<String> = prefilter_repos(repos).into_iter().map(|r| r.name).collect();
        assert_eq!(kept, vec!["big", "small"]);
    }
}
