use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Contact form submission. All four fields are required; anything
/// missing becomes an empty string and fails validation with a flash
/// notice, matching the public form behavior.
#[derive(Debug, Deserialize, Validate)]
pub struct ContatoForm {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub nome: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub assunto: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub mensagem: String,
}

/// Stored contact message. Immutable after creation; `lido` is always
/// false at insert and nothing in the public surface flips it.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Contato {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub assunto: String,
    pub mensagem: String,
    pub data_envio: DateTime<Utc>,
    pub lido: bool,
}
