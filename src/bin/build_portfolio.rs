use std::path::Path;

use anyhow::{bail, Context};

use portfolio_site::{
    cache::ProjectCache,
    db::sqlite::create_pool,
    github::GithubClient,
    repositories::projetos::SqliteProjetoRepo,
    settings::AppConfig,
    use_cases::build::{build_portfolio, import_projects},
};

/// Fetches the configured user's public repositories, rebuilds the
/// cache and the frontend data file, and optionally imports the result
/// into the relational store.
///
/// Flags: --force/-f bypasses the cache; --import writes to the
/// database as well.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let force_refresh = args.iter().any(|a| a == "--force" || a == "-f");
    let importar = args.iter().any(|a| a == "--import");

    if force_refresh {
        tracing::info!("Modo force refresh ativado");
    }

    let config = AppConfig::new().context("configuração inválida")?;

    let client = GithubClient::new(&config.github_api_url)?;
    let cache = ProjectCache::new(
        Path::new(&config.cache_file),
        Path::new(&config.frontend_data_file),
        config.cache_duration().context("cache_duration inválido")?,
    );

    let result = build_portfolio(&client, &cache, &config.github_username, force_refresh).await?;

    let Some(result) = result else {
        bail!("Nenhum repositório encontrado para {}", config.github_username);
    };

    tracing::info!(
        "Build concluído: {} projetos, {} stars, {} forks, {} recentes",
        result.stats.total_projects,
        result.stats.total_stars,
        result.stats.total_forks,
        result.stats.recent_projects,
    );

    if importar {
        let pool = create_pool(&config.database_url).await?;
        let repo = SqliteProjetoRepo::new(pool);
        let (importados, pulados) = import_projects(&repo, &result.projects).await?;
        tracing::info!("Importação concluída: {} importados, {} pulados", importados, pulados);
    }

    Ok(())
}
