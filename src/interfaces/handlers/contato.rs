use actix_web::{http::header, web, HttpResponse, Responder};
use tracing::instrument;
use validator::Validate;

use crate::{
    entities::contato::ContatoForm,
    errors::AppError,
    interfaces::flash::{set_flash, Flash},
    repositories::contatos::ContatoRepository,
    AppState,
};

/// POST /contato. Invalid submissions are discarded; persistence
/// failures surface as a generic notice with the cause logged only.
#[instrument(skip(state, form))]
pub async fn contato_enviar(
    state: web::Data<AppState>,
    form: web::Form<ContatoForm>,
) -> Result<impl Responder, AppError> {
    let flash = if form.validate().is_err() {
        Flash::error("Por favor, preencha todos os campos!")
    } else {
        match state.contatos.criar(&form).await {
            Ok(_) => Flash::success("Mensagem enviada com sucesso! Entrarei em contato em breve."),
            Err(e) => {
                tracing::error!("Erro ao salvar contato: {}", e);
                Flash::error("Erro ao enviar mensagem. Tente novamente.")
            }
        }
    };

    let mut builder = HttpResponse::SeeOther();
    builder.insert_header((header::LOCATION, "/contato"));
    set_flash(&mut builder, state.flash_key(), &flash);

    Ok(builder.finish())
}
