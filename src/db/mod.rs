pub mod memory;

#[cfg(feature = "postgres")]
pub mod diesel;
#[cfg(feature = "postgres")]
pub mod models;
#[cfg(feature = "postgres")]
pub mod schema;
