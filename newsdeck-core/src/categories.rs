use serde::{Deserialize, Serialize};

/// A named, weighted group of related keywords.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub color: String,
}

fn default_weight() -> f64 {
    1.0
}

impl KeywordCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            keywords: Vec::new(),
            weight,
            color: String::new(),
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Weight usable for scoring. Non-finite or non-positive weights score nothing.
    pub fn effective_weight(&self) -> f64 {
        if self.weight.is_finite() && self.weight > 0.0 {
            self.weight
        } else {
            0.0
        }
    }

    /// Adds a user keyword. Returns false when it is blank or already present
    /// (case-insensitively).
    pub fn add_keyword(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() || self.has_keyword(keyword) {
            return false;
        }
        self.keywords.push(keyword.to_string());
        true
    }

    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        let lower = keyword.trim().to_lowercase();
        let before = self.keywords.len();
        self.keywords.retain(|k| k.to_lowercase() != lower);
        self.keywords.len() != before
    }

    /// Replaces the keyword list, trimming entries and dropping blanks.
    pub fn set_keywords<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.keywords.clear();
        for keyword in keywords {
            self.add_keyword(keyword.as_ref());
        }
    }

    fn has_keyword(&self, keyword: &str) -> bool {
        let lower = keyword.to_lowercase();
        self.keywords.iter().any(|k| k.to_lowercase() == lower)
    }
}

/// The built-in category table.
pub fn default_categories() -> Vec<KeywordCategory> {
    vec![
        KeywordCategory::new("ai", "AI & Machine Learning", 1.5)
            .with_keywords([
                "artificial intelligence",
                "machine learning",
                "deep learning",
                "neural network",
                "chatgpt",
                "gpt",
                "llm",
                "large language model",
                "transformer",
                "bert",
                "openai",
                "anthropic",
                "claude",
                "gemini",
                "bard",
                "copilot",
                "ai",
                "ml",
                "nlp",
                "computer vision",
                "generative ai",
                "prompt engineering",
                "fine-tuning",
                "rlhf",
                "agi",
                "diffusion",
                "stable diffusion",
            ])
            .with_color("green"),
        KeywordCategory::new("development", "Development & Programming", 1.2)
            .with_keywords([
                "programming",
                "coding",
                "development",
                "software",
                "javascript",
                "typescript",
                "react",
                "vue",
                "angular",
                "node",
                "python",
                "rust",
                "go",
                "java",
                "api",
                "framework",
                "library",
                "git",
                "github",
                "deployment",
                "devops",
                "docker",
                "kubernetes",
                "cloud",
                "aws",
                "frontend",
                "backend",
                "fullstack",
            ])
            .with_color("blue"),
        KeywordCategory::new("startup", "Startup & Business", 1.0)
            .with_keywords([
                "startup",
                "entrepreneur",
                "funding",
                "venture capital",
                "vc",
                "investment",
                "saas",
                "business model",
                "revenue",
                "growth",
                "scale",
                "monetization",
                "market",
                "product",
                "launch",
                "ipo",
                "acquisition",
                "unicorn",
            ])
            .with_color("amber"),
        KeywordCategory::new("tech", "Technology Trends", 1.1)
            .with_keywords([
                "blockchain",
                "crypto",
                "web3",
                "metaverse",
                "vr",
                "ar",
                "quantum",
                "cybersecurity",
                "privacy",
                "data",
                "analytics",
                "iot",
                "5g",
                "edge computing",
                "serverless",
                "microservices",
                "automation",
                "robotics",
            ])
            .with_color("purple"),
    ]
}

pub fn default_category_ids() -> Vec<String> {
    default_categories().into_iter().map(|c| c.id).collect()
}
