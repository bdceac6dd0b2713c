pub mod contatos;
pub mod projetos;
