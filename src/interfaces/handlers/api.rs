use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::projeto::{ProjetoApi, ProjetoFiltro},
    errors::AppError,
    AppState,
};

#[instrument(skip(state))]
pub async fn api_projetos(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let projetos = state.projetos.listar(&ProjetoFiltro::default()).await?;
    let resposta: Vec<ProjetoApi> = projetos.iter().map(|p| p.to_api()).collect();

    Ok(HttpResponse::Ok().json(resposta))
}

#[instrument(skip(state))]
pub async fn api_projeto(
    state: web::Data<AppState>,
    id: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let projeto = state
        .projetos
        .buscar(*id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Projeto {} não encontrado", id)))?;

    Ok(HttpResponse::Ok().json(projeto.to_api()))
}
