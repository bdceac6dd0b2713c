use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use tracing::{error, info, warn};

use crate::{
    entities::{
        projeto::{ProjetoInsert, IMAGEM_PADRAO},
        repo::{CacheFile, FrontendData, GithubRepo, LanguageBytes, NameCount, PortfolioStats, RepoProject},
    },
    errors::{AppError, FetchError},
    infrastructure::{cache::ProjectCache, github::GithubClient},
    repositories::projetos::SqliteProjetoRepo,
    utils::markdown::sanitize_html,
};

pub const DESCRICAO_PADRAO: &str = "Projeto desenvolvido com dedicação";

const DIAS_RECENTE: i64 = 30;
const TOP_LINGUAGENS: usize = 5;
const TOP_TECNOLOGIAS: usize = 10;
const MAX_DESTAQUES: usize = 6;
const PAUSA_ENTRE_REPOS: Duration = Duration::from_millis(300);

/// Language to the common tools seen alongside it. The first paired
/// entry after the language itself is the framework added to the
/// technology set.
static TECH_MAPPING: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        ("Python", &["Python", "Flask", "Django", "FastAPI", "Pandas"][..]),
        ("JavaScript", &["JavaScript", "Node.js", "React", "Vue.js"][..]),
        ("TypeScript", &["TypeScript", "Angular", "Next.js"][..]),
        ("Java", &["Java", "Spring Boot"][..]),
        ("Go", &["Go", "Gin"][..]),
        ("Ruby", &["Ruby", "Rails"][..]),
        ("PHP", &["PHP", "Laravel"][..]),
        ("C#", &["C#", ".NET"][..]),
        ("HTML", &["HTML5", "CSS3", "Bootstrap"][..]),
        ("CSS", &["CSS3", "Sass"][..]),
        ("Jupyter Notebook", &["Python", "Jupyter", "Data Science"][..]),
        ("R", &["R", "Data Analysis"][..]),
        ("Rust", &["Rust"][..]),
        ("C++", &["C++"][..]),
        ("C", &["C"][..]),
    ])
});

/// Primary language to portfolio category, used when importing fetched
/// projects into the relational store.
static CATEGORY_MAPPING: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("Python", "Web App"),
        ("JavaScript", "Web App"),
        ("TypeScript", "Web App"),
        ("Java", "Backend"),
        ("Go", "Backend"),
        ("Jupyter Notebook", "Data Science"),
        ("R", "Data Science"),
        ("HTML", "Frontend"),
        ("CSS", "Frontend"),
    ])
});

pub fn should_include(repo: &GithubRepo) -> bool {
    !repo.fork && !repo.archived && repo.size > 0
}

/// "meu-projeto_web" becomes "Meu Projeto Web".
pub fn format_repo_title(name: &str) -> String {
    name.replace(['-', '_'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Top three languages by byte count, each mapped to itself plus its
/// paired framework. Deterministic: byte-count ties break on name.
pub fn determine_technologies(languages: &LanguageBytes) -> Vec<String> {
    let mut ordered: Vec<(&String, &i64)> = languages.iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let mut technologies = std::collections::BTreeSet::new();
    for (language, _) in ordered.into_iter().take(3) {
        if let Some(stack) = TECH_MAPPING.get(language.as_str()) {
            if let Some(primary) = stack.first() {
                technologies.insert(primary.to_string());
            }
            if let Some(framework) = stack.get(1) {
                technologies.insert(framework.to_string());
            }
        }
    }

    technologies.into_iter().collect()
}

pub fn category_for_language(language: &str) -> String {
    CATEGORY_MAPPING
        .get(language)
        .map(|c| c.to_string())
        .unwrap_or_else(|| "Outros".to_string())
}

/// Homepage when it is a well-formed http(s) URL, the pages-hosting URL
/// when the repository has pages enabled, otherwise nothing.
pub fn demo_url(repo: &GithubRepo) -> Option<String> {
    if let Some(homepage) = repo.homepage.as_deref() {
        if let Ok(parsed) = url::Url::parse(homepage) {
            if parsed.scheme() == "http" || parsed.scheme() == "https" {
                return Some(homepage.to_string());
            }
        }
    }

    if repo.has_pages {
        return Some(format!("https://{}.github.io/{}", repo.owner.login, repo.name));
    }

    None
}

pub fn is_recent(updated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(updated_at).num_days() <= DIAS_RECENTE
}

/// Fetches per-repository detail and assembles one record. Failures on
/// the language or topic calls degrade the affected field to empty.
pub async fn process_repository(client: &GithubClient, repo: &GithubRepo) -> RepoProject {
    info!("Processando: {}", repo.name);

    let languages = match client.languages(&repo.owner.login, &repo.name).await {
        Ok(languages) => languages,
        Err(e) => {
            warn!("Falha ao buscar linguagens de {}: {}", repo.name, e);
            LanguageBytes::default()
        }
    };

    let topics = match client.topics(&repo.owner.login, &repo.name).await {
        Ok(topics) => topics,
        Err(e) => {
            warn!("Falha ao buscar topics de {}: {}", repo.name, e);
            Vec::new()
        }
    };

    let mut technologies = determine_technologies(&languages);
    if technologies.is_empty() {
        if let Some(language) = repo.language.as_deref() {
            technologies = vec![language.to_string()];
        }
    }

    let now = Utc::now();

    let project = RepoProject {
        id: repo.id,
        name: repo.name.clone(),
        title: format_repo_title(&repo.name),
        description: repo
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DESCRICAO_PADRAO.to_string()),
        language: repo.language.clone().unwrap_or_else(|| "Outras".to_string()),
        languages: {
            let mut names: Vec<String> = languages.keys().cloned().collect();
            names.sort();
            names
        },
        technologies,
        github_url: repo.html_url.clone(),
        demo_url: demo_url(repo),
        stars: repo.stargazers_count,
        forks: repo.forks_count,
        watchers: repo.watchers_count,
        created_at: repo.created_at.date_naive(),
        updated_at: repo.updated_at.date_naive(),
        topics,
        has_wiki: repo.has_wiki,
        has_pages: repo.has_pages,
        is_recent: is_recent(repo.updated_at, now),
        size: repo.size,
    };

    tokio::time::sleep(PAUSA_ENTRE_REPOS).await;

    project
}

pub fn calculate_stats(projects: &[RepoProject], now: DateTime<Utc>) -> PortfolioStats {
    let total_stars = projects.iter().map(|p| p.stars).sum();
    let total_forks = projects.iter().map(|p| p.forks).sum();

    let top_languages = top_occurrences(projects.iter().flat_map(|p| p.languages.iter()), TOP_LINGUAGENS);
    let top_technologies =
        top_occurrences(projects.iter().flat_map(|p| p.technologies.iter()), TOP_TECNOLOGIAS);

    let mut by_stars: Vec<&RepoProject> = projects.iter().collect();
    by_stars.sort_by(|a, b| b.stars.cmp(&a.stars).then_with(|| a.id.cmp(&b.id)));
    let featured_projects = by_stars.iter().take(MAX_DESTAQUES).map(|p| p.id).collect();

    PortfolioStats {
        total_projects: projects.len(),
        total_stars,
        total_forks,
        top_languages,
        top_technologies,
        featured_projects,
        recent_projects: projects.iter().filter(|p| p.is_recent).count(),
        last_updated: now.format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

fn top_occurrences<'a>(values: impl Iterator<Item = &'a String>, limit: usize) -> Vec<NameCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values {
        *counts.entry(value.as_str()).or_default() += 1;
    }

    let mut ordered: Vec<(&str, usize)> = counts.into_iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    ordered
        .into_iter()
        .take(limit)
        .map(|(name, count)| NameCount { name: name.to_string(), count })
        .collect()
}

/// Runs the full fetch-filter-process-aggregate pipeline. A valid cache
/// short-circuits the run unless `force_refresh` is set. Returns `None`
/// when the listing endpoint yields no repositories at all.
pub async fn build_portfolio(
    client: &GithubClient,
    cache: &ProjectCache,
    username: &str,
    force_refresh: bool,
) -> Result<Option<CacheFile>, FetchError> {
    if !force_refresh {
        if let Some(cached) = cache.load() {
            info!("Usando dados do cache ({})", cached.timestamp);
            return Ok(Some(cached));
        }
    }

    let repos = client.list_repos(username).await?;
    if repos.is_empty() {
        error!("Nenhum repositório encontrado para {}", username);
        return Ok(None);
    }

    let filtered: Vec<&GithubRepo> = repos.iter().filter(|r| should_include(r)).collect();
    info!("Repositórios após filtros: {}/{}", filtered.len(), repos.len());

    let total = filtered.len();
    let mut projects = Vec::with_capacity(total);
    for (i, repo) in filtered.into_iter().enumerate() {
        info!("[{}/{}] {}", i + 1, total, repo.name);
        projects.push(process_repository(client, repo).await);
    }

    let now = Utc::now();
    let stats = calculate_stats(&projects, now);

    let result = CacheFile {
        timestamp: now,
        username: username.to_string(),
        count: projects.len(),
        projects,
        stats,
    };

    if let Err(e) = cache.save(&result) {
        error!("Erro ao salvar cache: {}", e);
    }

    let frontend = FrontendData {
        projects: result.projects.clone(),
        stats: result.stats.clone(),
        generated_at: now,
    };
    if let Err(e) = cache.save_frontend(&frontend) {
        error!("Erro ao salvar dados do frontend: {}", e);
    }

    Ok(Some(result))
}

/// Imports fetched projects into the relational store, skipping titles
/// that already exist. Returns (imported, skipped).
pub async fn import_projects(
    repo: &SqliteProjetoRepo,
    projects: &[RepoProject],
) -> Result<(usize, usize), AppError> {
    let mut imported = 0;
    let mut skipped = 0;

    for project in projects {
        if repo.titulo_existe(&project.title).await? {
            info!("Pulado (já existe): {}", project.title);
            skipped += 1;
            continue;
        }

        let insert = ProjetoInsert {
            titulo: project.title.clone(),
            descricao: descricao_rica(project),
            descricao_curta: Some(truncate(&project.description, 200)),
            tecnologias: project.technologies.join(", "),
            github_url: Some(project.github_url.clone()),
            demo_url: project.demo_url.clone(),
            imagem: IMAGEM_PADRAO.to_string(),
            data_criacao: project.created_at.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()).unwrap_or_else(Utc::now),
            destaque: project.stars > 5,
            categoria: category_for_language(&project.language),
        };

        match repo.criar(&insert).await {
            Ok(_) => {
                info!("Importado: {}", insert.titulo);
                imported += 1;
            }
            Err(e) => {
                error!("Erro ao importar {}: {}", insert.titulo, e);
                skipped += 1;
            }
        }
    }

    Ok((imported, skipped))
}

/// Long description block rendered on the detail page for imported
/// projects, sanitized before storage.
fn descricao_rica(project: &RepoProject) -> String {
    let html = format!(
        "<p>{}</p>\n\
         <h5>Informações do Repositório:</h5>\n\
         <ul>\n\
         <li><strong>Stars:</strong> {}</li>\n\
         <li><strong>Forks:</strong> {}</li>\n\
         <li><strong>Última atualização:</strong> {}</li>\n\
         </ul>",
        project.description, project.stars, project.forks, project.updated_at
    );
    sanitize_html(&html)
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn repo(name: &str) -> GithubRepo {
        GithubRepo {
            id: 1,
            name: name.to_string(),
            html_url: format!("https://github.com/octocat/{}", name),
            owner: crate::entities::repo::RepoOwner { login: "octocat".into() },
            created_at: Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            description: None,
            homepage: None,
            language: Some("Python".into()),
            fork: false,
            archived: false,
            size: 120,
            has_pages: false,
            has_wiki: true,
            stargazers_count: 3,
            forks_count: 1,
            watchers_count: 3,
        }
    }

    #[test]
    fn exclui_forks_arquivados_e_vazios() {
        assert!(should_include(&repo("ok")));

        let mut fork = repo("fork");
        fork.fork = true;
        assert!(!should_include(&fork));

        let mut archived = repo("archived");
        archived.archived = true;
        assert!(!should_include(&archived));

        let mut empty = repo("empty");
        empty.size = 0;
        assert!(!should_include(&empty));
    }

    #[test]
    fn titulo_formatado_a_partir_do_slug() {
        assert_eq!(format_repo_title("meu-projeto_web"), "Meu Projeto Web");
        assert_eq!(format_repo_title("api"), "Api");
    }

    #[test]
    fn tecnologias_do_top3_com_frameworks() {
        let languages = LanguageBytes::from([
            ("Python".to_string(), 500),
            ("HTML".to_string(), 100),
            ("CSS".to_string(), 50),
        ]);

        let technologies = determine_technologies(&languages);
        for expected in ["Python", "Flask", "HTML5", "CSS3", "Sass"] {
            assert!(technologies.iter().any(|t| t == expected), "faltou {expected}");
        }
    }

    #[test]
    fn tecnologias_sao_deterministicas() {
        let languages = LanguageBytes::from([
            ("Rust".to_string(), 900),
            ("JavaScript".to_string(), 900),
            ("Go".to_string(), 900),
            ("Python".to_string(), 10),
        ]);

        let first = determine_technologies(&languages);
        for _ in 0..10 {
            assert_eq!(determine_technologies(&languages), first);
        }
    }

    #[test]
    fn quarta_linguagem_fica_de_fora() {
        let languages = LanguageBytes::from([
            ("Python".to_string(), 400),
            ("HTML".to_string(), 300),
            ("CSS".to_string(), 200),
            ("Ruby".to_string(), 100),
        ]);

        let technologies = determine_technologies(&languages);
        assert!(!technologies.iter().any(|t| t == "Ruby"));
    }

    #[test]
    fn demo_url_prefere_homepage_valida() {
        let mut r = repo("site");
        r.homepage = Some("https://example.com".into());
        r.has_pages = true;
        assert_eq!(demo_url(&r).as_deref(), Some("https://example.com"));

        r.homepage = Some("não-é-url".into());
        assert_eq!(demo_url(&r).as_deref(), Some("https://octocat.github.io/site"));

        r.has_pages = false;
        assert!(demo_url(&r).is_none());
    }

    #[test]
    fn recente_dentro_de_30_dias() {
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 0, 0, 0).unwrap();
        assert!(is_recent(Utc.with_ymd_and_hms(2024, 6, 10, 0, 0, 0).unwrap(), now));
        assert!(!is_recent(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap(), now));
    }

    #[test]
    fn stats_agrega_contagens_e_destaques() {
        let mut a = projeto_processado(1, 10);
        a.languages = vec!["Python".into(), "HTML".into()];
        a.technologies = vec!["Python".into(), "Flask".into()];
        a.is_recent = true;

        let mut b = projeto_processado(2, 50);
        b.languages = vec!["Python".into()];
        b.technologies = vec!["Python".into()];

        let stats = calculate_stats(&[a, b], Utc::now());

        assert_eq!(stats.total_projects, 2);
        assert_eq!(stats.total_stars, 60);
        assert_eq!(stats.recent_projects, 1);
        assert_eq!(stats.featured_projects, vec![2, 1]);
        assert_eq!(stats.top_languages[0].name, "Python");
        assert_eq!(stats.top_languages[0].count, 2);
    }

    fn projeto_processado(id: i64, stars: i64) -> RepoProject {
        RepoProject {
            id,
            name: format!("repo-{id}"),
            title: format!("Repo {id}"),
            description: DESCRICAO_PADRAO.into(),
            language: "Python".into(),
            languages: vec![],
            technologies: vec![],
            github_url: format!("https://github.com/octocat/repo-{id}"),
            demo_url: None,
            stars,
            forks: 2,
            watchers: stars,
            created_at: chrono::NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            updated_at: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            topics: vec![],
            has_wiki: false,
            has_pages: false,
            is_recent: false,
            size: 10,
        }
    }
}
