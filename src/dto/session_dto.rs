use serde::{Deserialize, Serialize};

use crate::models::{Session, UserProfile};

// Request de la acción LOGIN
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub access_token: String,
    pub user: UserProfile,
}

// Response de sesión (el token no se devuelve)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: UserProfile,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            authenticated: true,
            user: session.user,
        }
    }
}
