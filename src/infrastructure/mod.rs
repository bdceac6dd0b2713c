pub mod cache;
pub mod db;
pub mod freeze;
pub mod github;
pub mod utils;
