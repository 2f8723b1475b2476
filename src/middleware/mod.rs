//! Middleware del router

pub mod cors;

pub use cors::*;
