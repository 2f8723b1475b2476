//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno: dónde escucha el
//! dashboard y cuál es la URL base del API de flota.

use std::env;
use std::time::Duration;

use crate::utils::errors::AppError;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// URL base única para todas las llamadas al API de flota
    pub api_base_url: String,
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub table_page_size: usize,
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Leer la configuración desde una función de búsqueda arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("FLEET_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AppError::Configuration("FLEET_API_URL must be set".to_string()))?;

        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(AppError::Configuration(format!(
                "FLEET_API_URL must be an http(s) URL, got '{}'",
                api_base_url
            )));
        }

        let table_page_size: usize = parse_or(&lookup, "TABLE_PAGE_SIZE", 10)?;
        if table_page_size == 0 {
            return Err(AppError::Configuration(
                "TABLE_PAGE_SIZE must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            port: parse_or(&lookup, "PORT", 3000)?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            api_base_url,
            cors_origins: lookup("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            request_timeout_secs: parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?,
            table_page_size,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la dirección del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, AppError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("{} must be a valid number", key))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            EnvironmentConfig::from_lookup(lookup_from(&[("FLEET_API_URL", "http://api.local/")]))
                .unwrap();
        assert_eq!(config.api_base_url, "http://api.local");
        assert_eq!(config.port, 3000);
        assert_eq!(config.table_page_size, 10);
        assert!(config.is_development());
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_missing_base_url_is_error() {
        let result = EnvironmentConfig::from_lookup(lookup_from(&[]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_invalid_number_is_error() {
        let result = EnvironmentConfig::from_lookup(lookup_from(&[
            ("FLEET_API_URL", "https://fleet.example.com"),
            ("PORT", "eighty"),
        ]));
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[test]
    fn test_cors_origins_split() {
        let config = EnvironmentConfig::from_lookup(lookup_from(&[
            ("FLEET_API_URL", "https://fleet.example.com"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("ENVIRONMENT", "production"),
        ]))
        .unwrap();
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert!(config.is_production());
    }
}
