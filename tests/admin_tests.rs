
use reqwest::{header, StatusCode};
use test_utils::*;

#[tokio::test]
async fn add_project_persists_markdown_as_sanitized_html() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form(
            "/admin/add-project",
            &[
                ("titulo", "Novo Projeto"),
                ("descricao", "# Visão geral\n\nUm projeto **legal**. <script>alert(1)</script>"),
                ("tecnologias", "Rust, Actix"),
                ("categoria", "Web"),
                ("destaque", "on"),
            ],
        )
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/projetos");

    let (descricao, destaque): (String, bool) =
        sqlx::query_as("SELECT descricao, destaque FROM projetos WHERE titulo = 'Novo Projeto'")
            .fetch_one(&app.pool)
            .await
            .unwrap();

    assert!(descricao.contains("<h1>"));
    assert!(descricao.contains("<strong>legal</strong>"));
    assert!(!descricao.contains("<script>"));
    assert!(destaque);
}

#[tokio::test]
async fn add_project_defaults_category_and_unchecked_featured() {
    let app = TestApp::spawn().await;

    app.post_form(
        "/admin/add-project",
        &[("titulo", "Simples"), ("descricao", "Texto"), ("tecnologias", "Python")],
    )
    .await;

    let (categoria, destaque): (String, bool) =
        sqlx::query_as("SELECT categoria, destaque FROM projetos WHERE titulo = 'Simples'")
            .fetch_one(&app.pool)
            .await
            .unwrap();

    assert_eq!(categoria, "Web");
    assert!(!destaque);
}

#[tokio::test]
async fn add_project_rejects_missing_required_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post_form("/admin/add-project", &[("titulo", "Sem Descrição")])
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/admin/add-project"
    );

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM projetos")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(total, 0);
}

#[tokio::test]
async fn add_project_form_renders() {
    let app = TestApp::spawn().await;

    let response = app.get("/admin/add-project").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains("Adicionar Projeto"));
}
