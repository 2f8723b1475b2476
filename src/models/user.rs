//! Modelo de usuario de la sesión
//!
//! Perfil que llega con la acción `LOGIN` y se guarda serializado en la
//! cookie `user`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Perfil del operador autenticado
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Campos adicionales del perfil que el dashboard no interpreta
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Sesión activa: token bearer más perfil
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub access_token: String,
    pub user: UserProfile,
}
