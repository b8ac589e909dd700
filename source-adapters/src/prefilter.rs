//! Source-side heuristics that drop support requests and off-topic items
//! before they reach the relevance pipeline.

/// Phrases that mark questions and requests for help on Hacker News.
pub const STORY_NEGATIVE_KEYWORDS: &[&str] = &[
    "help",
    "how do you",
    "how to",
    "can someone",
    "need help",
    "please help",
    "question",
    "eli5",
    "explain like",
    "what is",
    "why is",
    "where is",
    "when is",
    "which is",
    "ask hn",
    "show hn: help",
    "looking for",
    "recommendations",
    "advice",
    "should i",
    "anyone know",
    "does anyone",
    "has anyone",
    "thoughts on",
    "opinions on",
    "what do you think",
    "am i the only one",
    "is it just me",
];

/// Phrases that mark learning material and support repos on GitHub.
pub const REPO_NEGATIVE_KEYWORDS: &[&str] = &[
    "help",
    "how do you",
    "how to",
    "can someone",
    "need help",
    "please help",
    "question",
    "eli5",
    "explain like",
    "what is",
    "why is",
    "where is",
    "when is",
    "which is",
    "tutorial",
    "beginner",
    "learning",
];

pub const TECH_KEYWORDS: &[&str] = &[
    "ai",
    "artificial intelligence",
    "machine learning",
    "ml",
    "deep learning",
    "programming",
    "software",
    "developer",
    "coding",
    "code",
    "startup",
    "tech",
    "technology",
    "algorithm",
    "data",
    "web",
    "app",
    "application",
    "platform",
    "framework",
    "open source",
    "github",
    "api",
    "database",
    "cloud",
    "security",
    "blockchain",
    "cryptocurrency",
    "crypto",
    "mobile",
    "ios",
    "android",
    "react",
    "javascript",
    "python",
    "rust",
    "go",
    "java",
    "typescript",
    "devops",
    "infrastructure",
    "server",
    "backend",
    "frontend",
    "ui",
    "ux",
    "design",
    "product",
    "saas",
    "b2b",
    "venture capital",
    "funding",
    "ipo",
    "innovation",
    "disruption",
    "digital",
    "internet",
];

pub const TECH_DOMAINS: &[&str] = &[
    "github.com",
    "stackoverflow.com",
    "techcrunch.com",
    "wired.com",
    "arstechnica.com",
    "theverge.com",
    "engadget.com",
    "venturebeat.com",
    "recode.net",
    "medium.com",
    "dev.to",
    "hackernoon.com",
    "blogs.microsoft.com",
    "blog.google",
    "engineering.fb.com",
    "blog.twitter.com",
    "aws.amazon.com",
    "blog.cloudflare.com",
    "research.google.com",
    "openai.com",
    "anthropic.com",
];

pub fn contains_any(text: &str, phrases: &[&str]) -> bool {
    let lower = text.to_lowercase();
    phrases.iter().any(|phrase| lower.contains(phrase))
}

pub fn count_matching(text: &str, phrases: &[&str]) -> usize {
    let lower = text.to_lowercase();
    phrases.iter().filter(|phrase| lower.contains(*phrase)).count()
}
