pub mod types;
pub mod models;
