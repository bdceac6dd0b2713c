use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::{entities::contato::ContatoForm, errors::AppError};

#[async_trait]
pub trait ContatoRepository: Send + Sync {
    /// Persists a validated submission. `lido` starts false and is
    /// never set by anything in the public surface.
    async fn criar(&self, form: &ContatoForm) -> Result<i64, AppError>;
}

#[derive(Clone)]
pub struct SqliteContatoRepo {
    pub pool: SqlitePool,
}

impl SqliteContatoRepo {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteContatoRepo { pool }
    }
}

#[async_trait]
impl ContatoRepository for SqliteContatoRepo {
    async fn criar(&self, form: &ContatoForm) -> Result<i64, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO contatos (nome, email, assunto, mensagem, data_envio, lido)
            VALUES (?1, ?2, ?3, ?4, ?5, 0)
            "#,
        )
        .bind(&form.nome)
        .bind(&form.email)
        .bind(&form.assunto)
        .bind(&form.mensagem)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }
}
