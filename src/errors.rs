use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use derive_more::Display;

use crate::use_cases::paginas;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    DatabaseError(String),
    TemplateError(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::TemplateError(msg) => write!(f, "Template error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        // The site is HTML-first, so errors surface as the fixed error
        // pages rather than JSON bodies. The original cause stays in the
        // logs only.
        match self.status_code() {
            StatusCode::NOT_FOUND => HttpResponse::NotFound()
                .insert_header(ContentType::html())
                .body(paginas::render_404()),
            status => {
                tracing::error!("request failed: {}", self);
                HttpResponse::build(status)
                    .insert_header(ContentType::html())
                    .body(paginas::render_500())
            }
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::TemplateError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DatabaseError(err.to_string()),
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(err: askama::Error) -> Self {
        AppError::TemplateError(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

/// Errors from the GitHub fetch pipeline. A listing-level failure aborts
/// the batch run; per-repository failures are downgraded at the call site.
#[derive(Debug, Display)]
pub enum FetchError {
    #[display("HTTP request failed: {_0}")]
    Http(reqwest::Error),
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Http(err)
    }
}
