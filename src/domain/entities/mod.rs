pub mod contato;
pub mod projeto;
pub mod repo;
pub mod site;
