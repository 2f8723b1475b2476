//! Fleet Dashboard
//!
//! Servicio que mantiene el estado del dashboard de flota (tablas, diálogos,
//! avisos y sesión) y lo expone como JSON sobre el API REST remoto.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod table;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
