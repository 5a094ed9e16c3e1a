pub mod config;
pub mod entities;
pub mod error;
pub mod lifecycle;
pub mod middleware;
pub mod pagination;
pub mod routes;
pub mod services;
pub mod state;
pub mod tracking;
pub mod utils;
