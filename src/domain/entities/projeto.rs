use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const IMAGEM_PADRAO: &str = "projeto-default.jpg";
pub const CATEGORIA_PADRAO: &str = "Web";

/// Portfolio project as stored in `projetos` and rendered by the
/// templates. `tecnologias` keeps the comma-joined blob from the
/// original schema; use [`Projeto::tecnologias_lista`] for the split
/// view.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Projeto {
    pub id: i64,
    pub titulo: String,
    pub descricao: String,
    pub descricao_curta: Option<String>,
    pub tecnologias: String,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub imagem: String,
    pub data_criacao: DateTime<Utc>,
    pub destaque: bool,
    pub categoria: String,
}

impl Projeto {
    pub fn tecnologias_lista(&self) -> Vec<String> {
        self.tecnologias
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Display date in the dd/mm/yyyy convention used by the templates.
    pub fn data_criacao_br(&self) -> String {
        self.data_criacao.format("%d/%m/%Y").to_string()
    }

    pub fn to_api(&self) -> ProjetoApi {
        ProjetoApi {
            id: self.id,
            titulo: self.titulo.clone(),
            descricao: self.descricao.clone(),
            descricao_curta: self.descricao_curta.clone(),
            tecnologias: self.tecnologias_lista(),
            github_url: self.github_url.clone(),
            demo_url: self.demo_url.clone(),
            imagem: self.imagem.clone(),
            data_criacao: self.data_criacao.format("%Y-%m-%d").to_string(),
            destaque: self.destaque,
            categoria: self.categoria.clone(),
        }
    }
}

/// JSON API shape served by `/api/projetos` and `/api/projeto/{id}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjetoApi {
    pub id: i64,
    pub titulo: String,
    pub descricao: String,
    pub descricao_curta: Option<String>,
    pub tecnologias: Vec<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub imagem: String,
    pub data_criacao: String,
    pub destaque: bool,
    pub categoria: String,
}

/// Admin "add project" form. Fields default to empty so a missing form
/// field surfaces as a validation notice instead of a deserialization
/// failure.
#[derive(Debug, Deserialize, Validate)]
pub struct NovoProjetoForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "titulo é obrigatório"))]
    pub titulo: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "descricao é obrigatória"))]
    pub descricao: String,

    #[serde(default)]
    pub descricao_curta: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "tecnologias é obrigatório"))]
    pub tecnologias: String,

    #[serde(default)]
    pub github_url: String,

    #[serde(default)]
    pub demo_url: String,

    #[serde(default)]
    pub categoria: String,

    /// HTML checkboxes submit "on" when ticked and nothing otherwise.
    #[serde(default)]
    pub destaque: Option<String>,
}

impl NovoProjetoForm {
    pub fn destaque_marcado(&self) -> bool {
        self.destaque.as_deref() == Some("on")
    }
}

/// Values ready for insertion, after validation and sanitization.
#[derive(Debug, Clone)]
pub struct ProjetoInsert {
    pub titulo: String,
    pub descricao: String,
    pub descricao_curta: Option<String>,
    pub tecnologias: String,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub imagem: String,
    pub data_criacao: DateTime<Utc>,
    pub destaque: bool,
    pub categoria: String,
}

/// Query parameters accepted by the listing page.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ProjetoFiltro {
    pub categoria: Option<String>,
    pub tecnologia: Option<String>,
    pub busca: Option<String>,
}

impl ProjetoFiltro {
    /// Empty strings and the "todas" pseudo-category behave as no filter.
    pub fn normalizado(&self) -> ProjetoFiltro {
        let limpar = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        ProjetoFiltro {
            categoria: limpar(&self.categoria).filter(|c| c != "todas"),
            tecnologia: limpar(&self.tecnologia),
            busca: limpar(&self.busca),
        }
    }
}
