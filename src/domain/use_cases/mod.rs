pub mod build;
pub mod paginas;
