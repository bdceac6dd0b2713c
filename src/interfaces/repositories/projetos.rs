use std::path::Path;

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::warn;

use crate::{
    entities::{
        projeto::{Projeto, ProjetoFiltro, ProjetoInsert, IMAGEM_PADRAO},
        repo::{FrontendData, RepoProject},
    },
    errors::AppError,
    use_cases::build::category_for_language,
    utils::markdown::sanitize_html,
};

/// Read seam shared by the dynamic site, the JSON API and the static
/// freezer. One implementation reads the relational store, the other
/// the batch-job data file.
#[async_trait]
pub trait ProjetoProvider: Send + Sync {
    /// Featured projects for the homepage, capped at `limit`.
    async fn destaques(&self, limit: i64) -> Result<Vec<Projeto>, AppError>;

    async fn total(&self) -> Result<i64, AppError>;

    /// All filters are conjunctive; results ordered by creation time,
    /// descending.
    async fn listar(&self, filtro: &ProjetoFiltro) -> Result<Vec<Projeto>, AppError>;

    async fn buscar(&self, id: i64) -> Result<Option<Projeto>, AppError>;

    /// Up to `limit` projects sharing the category, excluding the
    /// project itself. Order unspecified.
    async fn relacionados(&self, projeto: &Projeto, limit: i64) -> Result<Vec<Projeto>, AppError>;

    async fn categorias(&self) -> Result<Vec<String>, AppError>;
}

// ───── Relational store (dynamic mode) ───────────────────────────────

#[derive(Clone)]
pub struct SqliteProjetoRepo {
    pub pool: SqlitePool,
}

impl SqliteProjetoRepo {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteProjetoRepo { pool }
    }

    pub async fn criar(&self, projeto: &ProjetoInsert) -> Result<i64, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO projetos
                (titulo, descricao, descricao_curta, tecnologias, github_url,
                 demo_url, imagem, data_criacao, destaque, categoria)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&projeto.titulo)
        .bind(&projeto.descricao)
        .bind(&projeto.descricao_curta)
        .bind(&projeto.tecnologias)
        .bind(&projeto.github_url)
        .bind(&projeto.demo_url)
        .bind(&projeto.imagem)
        .bind(projeto.data_criacao)
        .bind(projeto.destaque)
        .bind(&projeto.categoria)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    pub async fn titulo_existe(&self, titulo: &str) -> Result<bool, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projetos WHERE titulo = ?1")
            .bind(titulo)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }
}

#[async_trait]
impl ProjetoProvider for SqliteProjetoRepo {
    async fn destaques(&self, limit: i64) -> Result<Vec<Projeto>, AppError> {
        let projetos = sqlx::query_as::<_, Projeto>(
            "SELECT * FROM projetos WHERE destaque = 1 ORDER BY data_criacao DESC LIMIT ?1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(projetos)
    }

    async fn total(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM projetos")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn listar(&self, filtro: &ProjetoFiltro) -> Result<Vec<Projeto>, AppError> {
        let filtro = filtro.normalizado();

        let projetos = sqlx::query_as::<_, Projeto>(
            r#"
            SELECT * FROM projetos
            WHERE (?1 IS NULL OR categoria = ?1)
              AND (?2 IS NULL OR instr(lower(tecnologias), lower(?2)) > 0)
              AND (?3 IS NULL
                   OR instr(lower(titulo), lower(?3)) > 0
                   OR instr(lower(descricao), lower(?3)) > 0
                   OR instr(lower(tecnologias), lower(?3)) > 0)
            ORDER BY data_criacao DESC
            "#,
        )
        .bind(&filtro.categoria)
        .bind(&filtro.tecnologia)
        .bind(&filtro.busca)
        .fetch_all(&self.pool)
        .await?;

        Ok(projetos)
    }

    async fn buscar(&self, id: i64) -> Result<Option<Projeto>, AppError> {
        let projeto = sqlx::query_as::<_, Projeto>("SELECT * FROM projetos WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(projeto)
    }

    async fn relacionados(&self, projeto: &Projeto, limit: i64) -> Result<Vec<Projeto>, AppError> {
        let projetos = sqlx::query_as::<_, Projeto>(
            r#"
            SELECT * FROM projetos
            WHERE categoria = ?1 AND id != ?2
            ORDER BY RANDOM()
            LIMIT ?3
            "#,
        )
        .bind(&projeto.categoria)
        .bind(projeto.id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(projetos)
    }

    async fn categorias(&self) -> Result<Vec<String>, AppError> {
        let categorias =
            sqlx::query_scalar("SELECT DISTINCT categoria FROM projetos ORDER BY categoria")
                .fetch_all(&self.pool)
                .await?;

        Ok(categorias)
    }
}

// ───── Batch-job data file (static mode) ─────────────────────────────

/// Read-only provider over the frontend data file written by the batch
/// job. Loaded once; all queries run in memory.
pub struct JsonProjetoStore {
    projetos: Vec<Projeto>,
    destaque_ids: Vec<i64>,
}

impl JsonProjetoStore {
    pub fn carregar(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            warn!("Arquivo de dados não encontrado: {}", path.display());
            return Ok(Self::vazio());
        }

        let raw = std::fs::read_to_string(path)?;
        let data: FrontendData = serde_json::from_str(&raw)?;
        Ok(Self::from_data(data))
    }

    pub fn from_data(data: FrontendData) -> Self {
        let mut projetos: Vec<Projeto> = data.projects.iter().map(Self::mapear).collect();
        projetos.sort_by(|a, b| b.data_criacao.cmp(&a.data_criacao));

        JsonProjetoStore {
            projetos,
            destaque_ids: data.stats.featured_projects,
        }
    }

    pub fn vazio() -> Self {
        JsonProjetoStore { projetos: Vec::new(), destaque_ids: Vec::new() }
    }

    /// Shapes a batch-job record into the shared view model. GitHub
    /// descriptions are sanitized because the templates render
    /// descriptions unescaped.
    fn mapear(p: &RepoProject) -> Projeto {
        let descricao = sanitize_html(&p.description);

        Projeto {
            id: p.id,
            titulo: p.title.clone(),
            descricao_curta: Some(descricao.chars().take(200).collect()),
            descricao,
            tecnologias: p.technologies.join(", "),
            github_url: Some(p.github_url.clone()),
            demo_url: p.demo_url.clone(),
            imagem: IMAGEM_PADRAO.to_string(),
            data_criacao: p
                .created_at
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc())
                .unwrap_or_default(),
            destaque: false,
            categoria: category_for_language(&p.language),
        }
    }
}

#[async_trait]
impl ProjetoProvider for JsonProjetoStore {
    /// Featured ids from the stats block first, then the remaining
    /// projects until the cap is reached.
    async fn destaques(&self, limit: i64) -> Result<Vec<Projeto>, AppError> {
        let limit = limit as usize;
        let mut destaques: Vec<Projeto> = self
            .destaque_ids
            .iter()
            .filter_map(|id| self.projetos.iter().find(|p| p.id == *id))
            .take(limit)
            .cloned()
            .collect();

        if destaques.len() < limit {
            let faltam = limit - destaques.len();
            let extras: Vec<Projeto> = self
                .projetos
                .iter()
                .filter(|p| !destaques.iter().any(|d| d.id == p.id))
                .take(faltam)
                .cloned()
                .collect();
            destaques.extend(extras);
        }

        Ok(destaques)
    }

    async fn total(&self) -> Result<i64, AppError> {
        Ok(self.projetos.len() as i64)
    }

    async fn listar(&self, filtro: &ProjetoFiltro) -> Result<Vec<Projeto>, AppError> {
        let filtro = filtro.normalizado();
        let contem = |blob: &str, termo: &str| blob.to_lowercase().contains(&termo.to_lowercase());

        let projetos = self
            .projetos
            .iter()
            .filter(|p| match filtro.categoria.as_deref() {
                Some(categoria) => p.categoria == categoria,
                None => true,
            })
            .filter(|p| match filtro.tecnologia.as_deref() {
                Some(tecnologia) => contem(&p.tecnologias, tecnologia),
                None => true,
            })
            .filter(|p| match filtro.busca.as_deref() {
                Some(busca) => {
                    contem(&p.titulo, busca)
                        || contem(&p.descricao, busca)
                        || contem(&p.tecnologias, busca)
                }
                None => true,
            })
            .cloned()
            .collect();

        Ok(projetos)
    }

    async fn buscar(&self, id: i64) -> Result<Option<Projeto>, AppError> {
        Ok(self.projetos.iter().find(|p| p.id == id).cloned())
    }

    async fn relacionados(&self, projeto: &Projeto, limit: i64) -> Result<Vec<Projeto>, AppError> {
        let relacionados = self
            .projetos
            .iter()
            .filter(|p| p.categoria == projeto.categoria && p.id != projeto.id)
            .take(limit as usize)
            .cloned()
            .collect();

        Ok(relacionados)
    }

    async fn categorias(&self) -> Result<Vec<String>, AppError> {
        let mut categorias: Vec<String> =
            self.projetos.iter().map(|p| p.categoria.clone()).collect();
        categorias.sort();
        categorias.dedup();
        Ok(categorias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::repo::{NameCount, PortfolioStats};
    use chrono::{NaiveDate, Utc};

    fn record(id: i64, title: &str, language: &str, stars: i64) -> RepoProject {
        RepoProject {
            id,
            name: title.to_lowercase(),
            title: title.to_string(),
            description: format!("Descrição de {title}"),
            language: language.to_string(),
            languages: vec![language.to_string()],
            technologies: vec![language.to_string()],
            github_url: format!("https://github.com/octocat/{}", title.to_lowercase()),
            demo_url: None,
            stars,
            forks: 0,
            watchers: stars,
            created_at: NaiveDate::from_ymd_opt(2024, 1, (id as u32).min(28)).unwrap(),
            updated_at: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
            topics: vec![],
            has_wiki: false,
            has_pages: false,
            is_recent: false,
            size: 10,
        }
    }

    fn store() -> JsonProjetoStore {
        JsonProjetoStore::from_data(FrontendData {
            projects: vec![
                record(1, "Alpha", "Python", 10),
                record(2, "Beta", "HTML", 3),
                record(3, "Gamma", "Python", 7),
            ],
            stats: PortfolioStats {
                featured_projects: vec![1, 3],
                top_languages: vec![NameCount { name: "Python".into(), count: 2 }],
                ..Default::default()
            },
            generated_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn destaques_seguem_ids_e_completam() {
        let destaques = store().destaques(6).await.unwrap();
        assert_eq!(destaques.len(), 3);
        assert_eq!(destaques[0].id, 1);
        assert_eq!(destaques[1].id, 3);
    }

    #[tokio::test]
    async fn filtros_sao_conjuntivos() {
        let filtro = ProjetoFiltro {
            categoria: Some("Web App".into()),
            tecnologia: Some("python".into()),
            busca: Some("gamma".into()),
        };
        let resultado = store().listar(&filtro).await.unwrap();
        assert_eq!(resultado.len(), 1);
        assert_eq!(resultado[0].titulo, "Gamma");
    }

    #[tokio::test]
    async fn categoria_derivada_da_linguagem() {
        let projeto = store().buscar(2).await.unwrap().unwrap();
        assert_eq!(projeto.categoria, "Frontend");
    }

    #[tokio::test]
    async fn relacionados_excluem_o_proprio() {
        let loja = store();
        let alpha = loja.buscar(1).await.unwrap().unwrap();
        let relacionados = loja.relacionados(&alpha, 3).await.unwrap();
        assert_eq!(relacionados.len(), 1);
        assert_eq!(relacionados[0].id, 3);
    }
}
