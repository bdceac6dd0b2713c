use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Raw repository payload from the GitHub listing endpoint. Only the
/// fields the pipeline consumes; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubRepo {
    pub id: i64,
    pub name: String,
    pub html_url: String,
    pub owner: RepoOwner,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub size: i64,
    #[serde(default)]
    pub has_pages: bool,
    #[serde(default)]
    pub has_wiki: bool,
    #[serde(default)]
    pub stargazers_count: i64,
    #[serde(default)]
    pub forks_count: i64,
    #[serde(default)]
    pub watchers_count: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepoOwner {
    pub login: String,
}

/// Language name to byte count, as returned by the languages endpoint.
pub type LanguageBytes = HashMap<String, i64>;

#[derive(Debug, Deserialize)]
pub struct TopicsResponse {
    #[serde(default)]
    pub names: Vec<String>,
}

/// One processed repository, shaped for the cache and frontend files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoProject {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub description: String,
    pub language: String,
    pub languages: Vec<String>,
    pub technologies: Vec<String>,
    pub github_url: String,
    pub demo_url: Option<String>,
    pub stars: i64,
    pub forks: i64,
    pub watchers: i64,
    pub created_at: NaiveDate,
    pub updated_at: NaiveDate,
    pub topics: Vec<String>,
    pub has_wiki: bool,
    pub has_pages: bool,
    pub is_recent: bool,
    pub size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameCount {
    pub name: String,
    pub count: usize,
}

/// Aggregate statistics computed once per batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioStats {
    #[serde(default)]
    pub total_projects: usize,
    #[serde(default)]
    pub total_stars: i64,
    #[serde(default)]
    pub total_forks: i64,
    #[serde(default)]
    pub top_languages: Vec<NameCount>,
    #[serde(default)]
    pub top_technologies: Vec<NameCount>,
    /// Project ids with the highest star counts, capped at six.
    #[serde(default)]
    pub featured_projects: Vec<i64>,
    #[serde(default)]
    pub recent_projects: usize,
    #[serde(default)]
    pub last_updated: String,
}

/// On-disk cache written after each successful fetch. Valid strictly
/// within the configured window from `timestamp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    pub timestamp: DateTime<Utc>,
    pub username: String,
    pub projects: Vec<RepoProject>,
    pub stats: PortfolioStats,
    pub count: usize,
}

/// Data file consumed by the static templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendData {
    #[serde(default)]
    pub projects: Vec<RepoProject>,
    #[serde(default)]
    pub stats: PortfolioStats,
    pub generated_at: DateTime<Utc>,
}
