//! Configuración del proyecto
//!
//! Variables de entorno del dashboard.

pub mod environment;

pub use environment::*;
