//! Cliente HTTP para el API de flota
//!
//! Este módulo contiene el trait `FleetApi`, que es la frontera con el API
//! REST remoto, y su implementación con reqwest. No se envían parámetros de
//! paginación: las listas se traen completas y se paginan en el dashboard.

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::EnvironmentConfig;
use crate::models::{
    AnalyticsSnapshot, CreateMaintenanceSchedule, Maintenance, Shipment,
    UpdateMaintenanceSchedule,
};
use crate::services::session_service::SessionManager;
use crate::utils::errors::AppResult;

pub const ANALYTICS_PATH: &str = "/shipments/analytics/";
pub const SHIPMENTS_PATH: &str = "/shipments/shipments";
pub const MAINTENANCES_PATH: &str = "/maintenances/maintenances";

/// Envoltorio `{results: [...]}` de las listas
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Operaciones del API de flota que usa el dashboard
#[async_trait]
pub trait FleetApi: Send + Sync {
    async fn fetch_analytics(&self) -> AppResult<AnalyticsSnapshot>;

    async fn fetch_shipments(&self) -> AppResult<Vec<Shipment>>;

    async fn cancel_shipment(&self, id: &str) -> AppResult<()>;

    async fn fetch_maintenances(&self) -> AppResult<Vec<Maintenance>>;

    async fn create_maintenance(&self, body: &CreateMaintenanceSchedule) -> AppResult<()>;

    async fn update_maintenance(&self, id: &str, body: &UpdateMaintenanceSchedule) -> AppResult<()>;

    async fn cancel_maintenance(&self, id: &str) -> AppResult<()>;
}

/// Implementación HTTP del API de flota
pub struct HttpFleetApi {
    client: Client,
    base_url: String,
    session: Arc<SessionManager>,
}

impl HttpFleetApi {
    /// Crear nuevo cliente con la URL base y el jar de cookies compartido
    pub fn new(
        config: &EnvironmentConfig,
        cookie_jar: Arc<Jar>,
        session: Arc<SessionManager>,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .cookie_provider(cookie_jar)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn item_url(&self, collection: &str, id: &str) -> String {
        format!("{}{}/{}", self.base_url, collection, urlencoding::encode(id))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> AppResult<T> {
        debug!("GET {}", url);
        let response = self
            .authorize(self.client.get(url))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    async fn delete(&self, url: &str) -> AppResult<()> {
        debug!("DELETE {}", url);
        self.authorize(self.client.delete(url))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[async_trait]
impl FleetApi for HttpFleetApi {
    async fn fetch_analytics(&self) -> AppResult<AnalyticsSnapshot> {
        self.get_json(&self.url(ANALYTICS_PATH)).await
    }

    async fn fetch_shipments(&self) -> AppResult<Vec<Shipment>> {
        let list: ListResponse<Shipment> = self.get_json(&self.url(SHIPMENTS_PATH)).await?;
        info!("📦 {} envíos recibidos", list.results.len());
        Ok(list.results)
    }

    async fn cancel_shipment(&self, id: &str) -> AppResult<()> {
        self.delete(&self.item_url(SHIPMENTS_PATH, id)).await
    }

    async fn fetch_maintenances(&self) -> AppResult<Vec<Maintenance>> {
        let list: ListResponse<Maintenance> = self.get_json(&self.url(MAINTENANCES_PATH)).await?;
        info!("🔧 {} mantenimientos recibidos", list.results.len());
        Ok(list.results)
    }

    async fn create_maintenance(&self, body: &CreateMaintenanceSchedule) -> AppResult<()> {
        let url = self.url(MAINTENANCES_PATH);
        debug!("POST {}", url);
        self.authorize(self.client.post(&url).json(body))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn update_maintenance(&self, id: &str, body: &UpdateMaintenanceSchedule) -> AppResult<()> {
        let url = self.item_url(MAINTENANCES_PATH, id);
        debug!("PATCH {}", url);
        self.authorize(self.client.patch(&url).json(body))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn cancel_maintenance(&self, id: &str) -> AppResult<()> {
        self.delete(&self.item_url(MAINTENANCES_PATH, id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::session_service::MemoryPersistence;

    fn test_client() -> HttpFleetApi {
        let config = EnvironmentConfig::from_lookup(|key| match key {
            "FLEET_API_URL" => Some("http://fleet.test/".to_string()),
            _ => None,
        })
        .unwrap();
        let session = Arc::new(SessionManager::new(Box::new(MemoryPersistence::default())));
        HttpFleetApi::new(&config, Arc::new(Jar::default()), session).unwrap()
    }

    #[test]
    fn test_urls_are_built_from_base() {
        let client = test_client();
        assert_eq!(client.base_url(), "http://fleet.test");
        assert_eq!(client.url(ANALYTICS_PATH), "http://fleet.test/shipments/analytics/");
        assert_eq!(
            client.item_url(MAINTENANCES_PATH, "a b/c"),
            "http://fleet.test/maintenances/maintenances/a%20b%2Fc"
        );
    }

    #[test]
    fn test_list_response_without_results() {
        let list: ListResponse<Shipment> = serde_json::from_str("{}").unwrap();
        assert!(list.results.is_empty());
    }
}
