pub mod flash;
pub mod handlers;
pub mod repositories;
pub mod routes;
