use std::time::Duration;

use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use portfolio_site::{cache::ProjectCache, github::GithubClient, use_cases::build::build_portfolio};

fn repo_json(id: i64, name: &str, language: &str, stars: i64) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "html_url": format!("https://github.com/octocat/{name}"),
        "owner": { "login": "octocat" },
        "created_at": "2024-01-10T00:00:00Z",
        "updated_at": "2024-06-01T00:00:00Z",
        "description": format!("Repositório {name}"),
        "homepage": null,
        "language": language,
        "fork": false,
        "archived": false,
        "size": 120,
        "has_pages": false,
        "has_wiki": true,
        "stargazers_count": stars,
        "forks_count": 1,
        "watchers_count": stars
    })
}

async fn mount_repo_details(server: &MockServer, name: &str, language: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/octocat/{name}/languages")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ language: 1000 })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/octocat/{name}/topics")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "names": ["portfolio"] })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn list_repos_pages_until_an_empty_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            repo_json(1, "alpha", "Python", 3),
            repo_json(2, "beta", "Rust", 8),
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = GithubClient::new(&server.uri()).unwrap();
    let repos = client.list_repos("octocat").await.unwrap();

    assert_eq!(repos.len(), 2);
    assert_eq!(repos[0].name, "alpha");
}

#[tokio::test]
async fn listing_failure_mid_pagination_keeps_fetched_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([repo_json(1, "alpha", "Python", 3)])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = GithubClient::new(&server.uri()).unwrap();
    let repos = client.list_repos("octocat").await.unwrap();

    assert_eq!(repos.len(), 1);
}

#[tokio::test]
async fn build_pipeline_filters_processes_and_writes_both_files() {
    let server = MockServer::start().await;

    let mut fork = repo_json(3, "forked", "Python", 0);
    fork["fork"] = json!(true);
    let mut empty = repo_json(4, "vazio", "Python", 0);
    empty["size"] = json!(0);

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            repo_json(1, "meu-blog", "Python", 10),
            fork,
            empty,
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    mount_repo_details(&server, "meu-blog", "Python").await;

    let dir = tempdir().unwrap();
    let cache = ProjectCache::new(
        &dir.path().join("projects_data.json"),
        &dir.path().join("static/data/projects.json"),
        Duration::from_secs(3600),
    );

    let client = GithubClient::new(&server.uri()).unwrap();
    let result = build_portfolio(&client, &cache, "octocat", false)
        .await
        .unwrap()
        .expect("listing was not empty");

    assert_eq!(result.count, 1);
    let project = &result.projects[0];
    assert_eq!(project.title, "Meu Blog");
    assert_eq!(project.language, "Python");
    assert!(project.technologies.contains(&"Python".to_string()));
    assert_eq!(project.topics, vec!["portfolio"]);
    assert_eq!(result.stats.featured_projects, vec![1]);

    assert!(dir.path().join("projects_data.json").exists());
    assert!(dir.path().join("static/data/projects.json").exists());
}

#[tokio::test]
async fn second_run_is_served_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([repo_json(1, "alpha", "Python", 3)])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    mount_repo_details(&server, "alpha", "Python").await;

    let dir = tempdir().unwrap();
    let cache = ProjectCache::new(
        &dir.path().join("projects_data.json"),
        &dir.path().join("frontend.json"),
        Duration::from_secs(3600),
    );

    let client = GithubClient::new(&server.uri()).unwrap();
    let first = build_portfolio(&client, &cache, "octocat", false).await.unwrap().unwrap();
    let second = build_portfolio(&client, &cache, "octocat", false).await.unwrap().unwrap();

    assert_eq!(first.timestamp, second.timestamp);
}

#[tokio::test]
async fn detail_endpoint_failures_degrade_to_empty_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([repo_json(1, "alpha", "Python", 3)])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    // No languages or topics mocks mounted; both calls fail.
    let dir = tempdir().unwrap();
    let cache = ProjectCache::new(
        &dir.path().join("cache.json"),
        &dir.path().join("frontend.json"),
        Duration::from_secs(3600),
    );

    let client = GithubClient::new(&server.uri()).unwrap();
    let result = build_portfolio(&client, &cache, "octocat", false).await.unwrap().unwrap();

    let project = &result.projects[0];
    // Language comes from the listing even when the byte map is gone.
    assert_eq!(project.technologies, vec!["Python"]);
    assert!(project.topics.is_empty());
}

#[tokio::test]
async fn empty_listing_yields_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let cache = ProjectCache::new(
        &dir.path().join("cache.json"),
        &dir.path().join("frontend.json"),
        Duration::from_secs(3600),
    );

    let client = GithubClient::new(&server.uri()).unwrap();
    let result = build_portfolio(&client, &cache, "octocat", false).await.unwrap();

    assert!(result.is_none());
}
