//! Clients - HTTP Clients for External APIs
//!
//! This module contains the client for the remote fleet REST API.

pub mod fleet_api_client;

// Re-export main types for convenience
pub use fleet_api_client::{FleetApi, HttpFleetApi, ListResponse};
