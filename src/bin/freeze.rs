use std::path::Path;

use anyhow::Context;

use portfolio_site::{
    entities::site::SiteInfo, freeze::Freezer, repositories::projetos::JsonProjetoStore,
    settings::AppConfig,
};

/// Renders the site into a static file tree for host-agnostic serving.
/// Exits non-zero on any generation error.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = AppConfig::new().context("configuração inválida")?;

    let data_file = Path::new(&config.frontend_data_file);
    let store = JsonProjetoStore::carregar(data_file)?;
    let site = SiteInfo::new(&config.github_username);

    let freezer = Freezer::new(Path::new(&config.freeze_dir), data_file, site, store);
    let report = freezer.build().await.context("erro durante o build estático")?;

    tracing::info!(
        "Build estático concluído: {} arquivos, {:.2} KB em {}/",
        report.files,
        report.bytes as f64 / 1024.0,
        config.freeze_dir,
    );

    Ok(())
}
