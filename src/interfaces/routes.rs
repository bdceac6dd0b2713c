use actix_web::web;

use crate::handlers::{
    admin::{add_project, add_project_form},
    api::{api_projeto, api_projetos},
    contato::contato_enviar,
    paginas::{contato_form, index, nao_encontrado, projeto_detalhe, projetos, sobre},
};

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/projetos", web::get().to(projetos))
        .route("/projeto/{id}", web::get().to(projeto_detalhe))
        .route("/sobre", web::get().to(sobre))
        .route("/contato", web::get().to(contato_form))
        .route("/contato", web::post().to(contato_enviar));

    cfg.service(
        web::scope("/admin")
            .route("/add-project", web::get().to(add_project_form))
            .route("/add-project", web::post().to(add_project)),
    );

    cfg.service(
        web::scope("/api")
            .route("/projetos", web::get().to(api_projetos))
            .route("/projeto/{id}", web::get().to(api_projeto)),
    );

    cfg.default_service(web::route().to(nao_encontrado));
}
