use actix_web::{http::header::ContentType, web, HttpRequest, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::projeto::ProjetoFiltro,
    errors::AppError,
    interfaces::flash::{clear_flash, take_flash},
    use_cases::paginas,
    AppState,
};

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().insert_header(ContentType::html()).body(body)
}

#[instrument(skip(state))]
pub async fn index(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let body = paginas::render_index(state.projetos.as_ref(), &state.site).await?;
    Ok(html(body))
}

#[instrument(skip(state, filtro))]
pub async fn projetos(
    state: web::Data<AppState>,
    filtro: web::Query<ProjetoFiltro>,
) -> Result<impl Responder, AppError> {
    let body = paginas::render_projetos(state.projetos.as_ref(), &state.site, &filtro).await?;
    Ok(html(body))
}

#[instrument(skip(state))]
pub async fn projeto_detalhe(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let body = paginas::render_projeto(state.projetos.as_ref(), &state.site, *id).await?;
    Ok(html(body))
}

#[instrument(skip(state))]
pub async fn sobre(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    Ok(html(paginas::render_sobre(&state.site)?))
}

#[instrument(skip(state, req))]
pub async fn contato_form(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<impl Responder, AppError> {
    let flash = take_flash(&req, state.flash_key());
    let visto = flash.is_some();

    let body = paginas::render_contato(&state.site, flash)?;
    let mut builder = HttpResponse::Ok();
    builder.insert_header(ContentType::html());
    if visto {
        clear_flash(&mut builder);
    }

    Ok(builder.body(body))
}

pub async fn nao_encontrado() -> HttpResponse {
    HttpResponse::NotFound()
        .insert_header(ContentType::html())
        .body(paginas::render_404())
}
