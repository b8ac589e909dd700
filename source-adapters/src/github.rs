use crate::prefilter::{contains_any, REPO_NEGATIVE_KEYWORDS};
use chrono::DateTime;
use newsdeck_core::{CoreError, Item, SourceError, SourceKind};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map};
use std::cmp::Reverse;
use tracing::{debug, info};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubOwner {
    pub login: String,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubLicense {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubRepo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: Option<String>,
    pub stargazers_count: i64,
    pub forks_count: u64,
    pub language: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub pushed_at: Option<String>,
    pub owner: GitHubOwner,
    pub topics: Vec<String>,
    pub license: Option<GitHubLicense>,
}

impl GitHubRepo {
    fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    fn rejection(&self) -> Option<&'static str> {
        if self.stargazers_count < 1 {
            Some("insufficient stars")
        } else if self.description_text().is_empty() {
            Some("no description")
        } else if contains_any(self.description_text(), REPO_NEGATIVE_KEYWORDS)
            || contains_any(&self.name, REPO_NEGATIVE_KEYWORDS)
        {
            Some("contains negative keywords")
        } else {
            None
        }
    }
}

/// Repos map onto items with stars as the score, forks as the comment count
/// and the lowercased language as the group.
impl TryFrom<GitHubRepo> for Item {
    type Error = SourceError;

    fn try_from(repo: GitHubRepo) -> Result<Self, Self::Error> {
        let created_at = match repo.created_at.as_deref() {
            Some(raw) => Some(
                DateTime::parse_from_rfc3339(raw)
                    .map_err(|_| SourceError::InvalidTimestamp {
                        value: raw.to_string(),
                    })?
                    .timestamp(),
            ),
            None => None,
        };

        let mut extra = Map::new();
        extra.insert("fullName".to_string(), json!(repo.full_name));
        extra.insert("topics".to_string(), json!(repo.topics));
        if let Some(license) = &repo.license {
            extra.insert("license".to_string(), json!(license.name));
        }
        if let Some(pushed_at) = &repo.pushed_at {
            extra.insert("pushedAt".to_string(), json!(pushed_at));
        }
        if let Some(updated_at) = &repo.updated_at {
            extra.insert("updatedAt".to_string(), json!(updated_at));
        }
        if let Some(avatar) = &repo.owner.avatar_url {
            extra.insert("ownerAvatarUrl".to_string(), json!(avatar));
        }

        Ok(Item {
            title: repo.name,
            body: repo.description.filter(|d| !d.is_empty()),
            score: repo.stargazers_count,
            comment_count: Some(repo.forks_count),
            created_at,
            author: Some(repo.owner.login).filter(|login| !login.is_empty()),
            group: repo.language.map(|language| language.to_lowercase()),
            flair: None,
            source: SourceKind::GitHub,
            id: Some(repo.id.to_string()),
            url: repo.html_url,
            extra,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<GitHubRepo>,
}

/// Reads the `items` array of a `/search/repositories` response.
pub fn parse_search_response(json: &str) -> Result<Vec<GitHubRepo>, CoreError> {
    let response: SearchResponse =
        serde_json::from_str(json).map_err(|e| SourceError::InvalidPayload {
            source_name: "github".to_string(),
            details: e.to_string(),
        })?;
    debug!("Parsed {} GitHub repositories", response.items.len());
    Ok(response.items)
}

/// Keeps starred repos with a description and no beginner or support
/// wording, most starred first.
pub fn prefilter_repos(repos: Vec<GitHubRepo>) -> Vec<GitHubRepo> {
    let total = repos.len();
    let mut kept: Vec<GitHubRepo> = repos
        .into_iter()
        .filter(|repo| match repo.rejection() {
            Some(reason) => {
                debug!("GitHub: filtered out {:?} ({})", repo.name, reason);
                false
            }
            None => true,
        })
        .collect();

    kept.sort_by_key(|repo| Reverse(repo.stargazers_count));
    info!("GitHub: kept {} repositories out of {}", kept.len(), total);
    kept
}

pub fn repos_to_items(repos: Vec<GitHubRepo>) -> Result<Vec<Item>, CoreError> {
    repos
        .into_iter()
        .map(|repo| Item::try_from(repo).map_err(CoreError::from))
        .collect()
}
