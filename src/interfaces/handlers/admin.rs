use actix_web::{
    http::header::{self, ContentType},
    web, HttpRequest, HttpResponse, Responder,
};
use chrono::Utc;
use tracing::instrument;
use validator::Validate;

use crate::{
    entities::projeto::{NovoProjetoForm, ProjetoInsert, CATEGORIA_PADRAO, IMAGEM_PADRAO},
    errors::AppError,
    interfaces::flash::{clear_flash, set_flash, take_flash, Flash},
    use_cases::paginas,
    utils::markdown::safe_markdown_to_html,
    AppState,
};

// No authentication guard here; the route mirrors the single-admin
// deployment it came from.

#[instrument(skip(state, req))]
pub async fn add_project_form(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let flash = take_flash(&req, state.flash_key());
    let visto = flash.is_some();

    let body = paginas::render_add_project(&state.site, flash)?;
    let mut builder = HttpResponse::Ok();
    builder.insert_header(ContentType::html());
    if visto {
        clear_flash(&mut builder);
    }

    Ok(builder.body(body))
}

/// POST /admin/add-project. The long description is accepted as
/// Markdown and stored as sanitized HTML.
#[instrument(skip(state, form))]
pub async fn add_project(
    state: web::Data<AppState>,
    form: web::Form<NovoProjetoForm>,
) -> Result<impl Responder, AppError> {
    if form.validate().is_err() {
        let mut builder = HttpResponse::SeeOther();
        builder.insert_header((header::LOCATION, "/admin/add-project"));
        set_flash(&mut builder, state.flash_key(), &Flash::error("Por favor, preencha todos os campos!"));
        return Ok(builder.finish());
    }

    let opcional = |valor: &str| {
        let valor = valor.trim();
        (!valor.is_empty()).then(|| valor.to_string())
    };

    let insert = ProjetoInsert {
        titulo: form.titulo.trim().to_string(),
        descricao: safe_markdown_to_html(&form.descricao),
        descricao_curta: opcional(&form.descricao_curta),
        tecnologias: form.tecnologias.trim().to_string(),
        github_url: opcional(&form.github_url),
        demo_url: opcional(&form.demo_url),
        imagem: IMAGEM_PADRAO.to_string(),
        data_criacao: Utc::now(),
        destaque: form.destaque_marcado(),
        categoria: opcional(&form.categoria).unwrap_or_else(|| CATEGORIA_PADRAO.to_string()),
    };

    let (destino, flash) = match state.projetos_repo.criar(&insert).await {
        Ok(_) => ("/projetos", Flash::success("Projeto adicionado com sucesso!")),
        Err(e) => {
            tracing::error!("Erro ao adicionar projeto: {}", e);
            ("/admin/add-project", Flash::error("Erro ao adicionar projeto."))
        }
    };

    let mut builder = HttpResponse::SeeOther();
    builder.insert_header((header::LOCATION, destino));
    set_flash(&mut builder, state.flash_key(), &flash);

    Ok(builder.finish())
}
