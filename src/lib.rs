#[cfg(feature = "postgres")]
#[macro_use]
extern crate diesel;

#[cfg(feature = "postgres")]
#[macro_use]
extern crate diesel_migrations;

pub mod core;
pub mod auth;
pub mod http;
pub mod db;
pub mod util;
pub mod provider;
