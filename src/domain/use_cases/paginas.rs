use askama::Template;

use crate::{
    entities::{
        projeto::{Projeto, ProjetoFiltro},
        site::SiteInfo,
    },
    errors::AppError,
    interfaces::flash::Flash,
    repositories::projetos::ProjetoProvider,
};

pub const MAX_DESTAQUES: i64 = 6;
pub const MAX_RELACIONADOS: i64 = 3;

// Both the dynamic handlers and the static freezer render through these
// functions; only the provider behind them differs.

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    site: &'a SiteInfo,
    projetos: &'a [Projeto],
    total_projetos: i64,
}

#[derive(Template)]
#[template(path = "projetos.html")]
struct ProjetosTemplate<'a> {
    site: &'a SiteInfo,
    projetos: &'a [Projeto],
    categorias: &'a [String],
    categoria_atual: Option<String>,
    busca: Option<String>,
}

#[derive(Template)]
#[template(path = "projeto_detalhe.html")]
struct ProjetoDetalheTemplate<'a> {
    site: &'a SiteInfo,
    projeto: &'a Projeto,
    relacionados: &'a [Projeto],
}

#[derive(Template)]
#[template(path = "sobre.html")]
struct SobreTemplate<'a> {
    site: &'a SiteInfo,
    habilidades: &'a [GrupoHabilidades],
    experiencias: &'a [Experiencia],
    educacao: &'a [Educacao],
}

#[derive(Template)]
#[template(path = "contato.html")]
struct ContatoTemplate<'a> {
    site: &'a SiteInfo,
    flash: Option<Flash>,
}

#[derive(Template)]
#[template(path = "admin/add_project.html")]
struct AddProjectTemplate<'a> {
    site: &'a SiteInfo,
    flash: Option<Flash>,
}

#[derive(Template)]
#[template(path = "errors/404.html")]
struct Erro404Template;

#[derive(Template)]
#[template(path = "errors/500.html")]
struct Erro500Template;

pub struct GrupoHabilidades {
    pub grupo: &'static str,
    pub itens: &'static [&'static str],
}

pub struct Experiencia {
    pub cargo: &'static str,
    pub empresa: &'static str,
    pub periodo: &'static str,
    pub descricao: &'static str,
}

pub struct Educacao {
    pub curso: &'static str,
    pub instituicao: &'static str,
    pub periodo: &'static str,
    pub status: &'static str,
}

const HABILIDADES: &[GrupoHabilidades] = &[
    GrupoHabilidades {
        grupo: "Backend",
        itens: &["Python", "Flask", "Django", "FastAPI", "SQLAlchemy"],
    },
    GrupoHabilidades {
        grupo: "Frontend",
        itens: &["HTML5", "CSS3", "JavaScript", "Bootstrap", "jQuery"],
    },
    GrupoHabilidades {
        grupo: "Data Science",
        itens: &["Pandas", "NumPy", "Matplotlib", "Jupyter", "Scikit-learn"],
    },
    GrupoHabilidades {
        grupo: "Database",
        itens: &["PostgreSQL", "SQLite", "MySQL", "MongoDB"],
    },
    GrupoHabilidades {
        grupo: "DevOps",
        itens: &["Git", "GitHub", "Heroku", "Docker", "Linux"],
    },
    GrupoHabilidades {
        grupo: "Outros",
        itens: &["REST APIs", "Jinja2", "Testing", "Agile"],
    },
];

const EXPERIENCIAS: &[Experiencia] = &[
    Experiencia {
        cargo: "Desenvolvedora Python",
        empresa: "Tech Company",
        periodo: "2023 - Presente",
        descricao: "Desenvolvimento de aplicações web com Flask e Django",
    },
    Experiencia {
        cargo: "Desenvolvedora Junior",
        empresa: "StartUp Tech",
        periodo: "2022 - 2023",
        descricao: "Criação de APIs RESTful e automação de processos",
    },
];

const EDUCACAO: &[Educacao] = &[Educacao {
    curso: "Análise e Desenvolvimento de Sistemas",
    instituicao: "Universidade Federal",
    periodo: "2020 - 2023",
    status: "Concluído",
}];

pub async fn render_index(
    provider: &dyn ProjetoProvider,
    site: &SiteInfo,
) -> Result<String, AppError> {
    let projetos = provider.destaques(MAX_DESTAQUES).await?;
    let total_projetos = provider.total().await?;

    Ok(IndexTemplate { site, projetos: &projetos, total_projetos }.render()?)
}

pub async fn render_projetos(
    provider: &dyn ProjetoProvider,
    site: &SiteInfo,
    filtro: &ProjetoFiltro,
) -> Result<String, AppError> {
    let projetos = provider.listar(filtro).await?;
    let categorias = provider.categorias().await?;
    let filtro = filtro.normalizado();

    Ok(ProjetosTemplate {
        site,
        projetos: &projetos,
        categorias: &categorias,
        categoria_atual: filtro.categoria,
        busca: filtro.busca,
    }
    .render()?)
}

pub async fn render_projeto(
    provider: &dyn ProjetoProvider,
    site: &SiteInfo,
    id: i64,
) -> Result<String, AppError> {
    let projeto = provider
        .buscar(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Projeto {} não encontrado", id)))?;
    let relacionados = provider.relacionados(&projeto, MAX_RELACIONADOS).await?;

    Ok(ProjetoDetalheTemplate { site, projeto: &projeto, relacionados: &relacionados }.render()?)
}

pub fn render_sobre(site: &SiteInfo) -> Result<String, AppError> {
    Ok(SobreTemplate {
        site,
        habilidades: HABILIDADES,
        experiencias: EXPERIENCIAS,
        educacao: EDUCACAO,
    }
    .render()?)
}

pub fn render_contato(site: &SiteInfo, flash: Option<Flash>) -> Result<String, AppError> {
    Ok(ContatoTemplate { site, flash }.render()?)
}

pub fn render_add_project(site: &SiteInfo, flash: Option<Flash>) -> Result<String, AppError> {
    Ok(AddProjectTemplate { site, flash }.render()?)
}

// The error pages are self-contained so they can also be written out
// verbatim by the freezer.

pub fn render_404() -> String {
    Erro404Template
        .render()
        .unwrap_or_else(|_| "<h1>404 - Página Não Encontrada</h1>".to_string())
}

pub fn render_500() -> String {
    Erro500Template
        .render()
        .unwrap_or_else(|_| "<h1>500 - Erro Interno</h1>".to_string())
}
