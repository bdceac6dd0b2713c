use std::sync::Arc;

use actix_web::cookie::Key;
use sqlx::SqlitePool;

mod domain;
mod infrastructure;
mod interfaces;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;

pub use domain::{entities, use_cases};
pub use infrastructure::{cache, db, freeze, github, utils};
pub use interfaces::{flash, handlers, repositories, routes};

use entities::site::SiteInfo;
use repositories::{contatos::SqliteContatoRepo, projetos::{ProjetoProvider, SqliteProjetoRepo}};
use settings::AppConfig;

pub struct AppState {
    /// Read seam used by every page and API handler.
    pub projetos: Arc<dyn ProjetoProvider>,
    /// Write side, used by the admin route and the importer.
    pub projetos_repo: SqliteProjetoRepo,
    pub contatos: SqliteContatoRepo,
    pub site: SiteInfo,
    flash_key: Key,
}

impl AppState {
    pub fn new(config: &AppConfig, pool: SqlitePool) -> Self {
        let projetos_repo = SqliteProjetoRepo::new(pool.clone());

        AppState {
            projetos: Arc::new(projetos_repo.clone()),
            projetos_repo,
            contatos: SqliteContatoRepo::new(pool),
            site: SiteInfo::new(&config.github_username),
            flash_key: Key::derive_from(config.secret_key.as_bytes()),
        }
    }

    pub fn flash_key(&self) -> &Key {
        &self.flash_key
    }
}
