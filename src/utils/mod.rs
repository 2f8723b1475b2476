//! Utilidades compartidas
//!
//! Errores de la aplicación y helpers de validación.

pub mod errors;
pub mod validation;

pub use errors::*;
