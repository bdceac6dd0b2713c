pub mod admin;
pub mod api;
pub mod contato;
pub mod paginas;
