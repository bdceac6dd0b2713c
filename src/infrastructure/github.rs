use std::time::Duration;

use reqwest::Client;
use tracing::{error, info};

use crate::{
    entities::repo::{GithubRepo, LanguageBytes, TopicsResponse},
    errors::FetchError,
};

const PAGE_SIZE: u32 = 100;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const PAUSE_BETWEEN_PAGES: Duration = Duration::from_millis(500);

/// Thin client over the GitHub REST API. The base URL is configurable
/// so tests can point it at a local mock server.
pub struct GithubClient {
    http: Client,
    base_url: String,
}

impl GithubClient {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("portfolio-site/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GithubClient { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    /// Pages through the listing endpoint until an empty page comes
    /// back, pausing between pages to stay under the rate limit. A
    /// failure mid-pagination keeps what was gathered so far.
    pub async fn list_repos(&self, username: &str) -> Result<Vec<GithubRepo>, FetchError> {
        info!("Buscando repositórios de {}...", username);

        let mut repos = Vec::new();
        let mut page = 1u32;

        loop {
            let url = format!("{}/users/{}/repos", self.base_url, username);
            let response = self
                .http
                .get(&url)
                .query(&[
                    ("page", page.to_string()),
                    ("per_page", PAGE_SIZE.to_string()),
                    ("sort", "updated".to_string()),
                    ("direction", "desc".to_string()),
                ])
                .send()
                .await;

            let response = match response.and_then(|r| r.error_for_status()) {
                Ok(response) => response,
                Err(e) => {
                    error!("Erro ao buscar repositórios: {}", e);
                    break;
                }
            };

            if let Some(remaining) = response
                .headers()
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok())
            {
                info!("Rate limit restante: {}", remaining);
            }

            let page_repos: Vec<GithubRepo> = response.json().await?;
            if page_repos.is_empty() {
                break;
            }

            info!("Página {}: {} repositórios", page, page_repos.len());
            repos.extend(page_repos);

            page += 1;
            tokio::time::sleep(PAUSE_BETWEEN_PAGES).await;
        }

        info!("Total de repositórios encontrados: {}", repos.len());
        Ok(repos)
    }

    pub async fn languages(&self, owner: &str, name: &str) -> Result<LanguageBytes, FetchError> {
        let url = format!("{}/repos/{}/{}/languages", self.base_url, owner, name);
        let languages = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(languages)
    }

    pub async fn topics(&self, owner: &str, name: &str) -> Result<Vec<String>, FetchError> {
        let url = format!("{}/repos/{}/{}/topics", self.base_url, owner, name);
        let topics: TopicsResponse = self
            .http
            .get(&url)
            .header("Accept", "application/vnd.github.mercy-preview+json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(topics.names)
    }
}
