//! Servicio de sesión
//!
//! Sesión del operador (token + perfil) compartida por todo el proceso.
//! Solo `login`/`logout` escriben; todos los demás leen. La persistencia
//! (cookies `accessToken` y `user`) se inyecta.

use once_cell::sync::OnceCell;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::Url;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{info, warn};

use crate::models::{Session, UserProfile};
use crate::utils::errors::{AppError, AppResult};

pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";
pub const USER_COOKIE: &str = "user";
pub const IS_AUTHENTICATED_COOKIE: &str = "isAuthenticated";

/// Dónde se guarda la sesión entre arranques
pub trait SessionPersistence: Send + Sync {
    fn load(&self) -> Option<Session>;

    fn save(&self, session: &Session) -> AppResult<()>;

    fn clear(&self) -> AppResult<()>;
}

/// Persistencia en memoria, sin efectos fuera del proceso
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    inner: Mutex<Option<Session>>,
}

impl SessionPersistence for MemoryPersistence {
    fn load(&self) -> Option<Session> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, session: &Session) -> AppResult<()> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// Persistencia en el jar de cookies que también usa el cliente HTTP
pub struct CookieJarPersistence {
    jar: Arc<Jar>,
    url: Url,
}

impl CookieJarPersistence {
    pub fn new(jar: Arc<Jar>, base_url: &str) -> AppResult<Self> {
        let url = Url::parse(base_url)
            .map_err(|e| AppError::Configuration(format!("invalid cookie URL '{}': {}", base_url, e)))?;
        Ok(Self { jar, url })
    }

    fn set_cookie(&self, name: &str, value: &str) {
        let cookie = format!("{}={}; Path=/", name, urlencoding::encode(value));
        self.jar.add_cookie_str(&cookie, &self.url);
    }

    fn expire_cookie(&self, name: &str) {
        let cookie = format!("{}=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT", name);
        self.jar.add_cookie_str(&cookie, &self.url);
    }

    fn cookie_value(&self, name: &str) -> Option<String> {
        let header = self.jar.cookies(&self.url)?;
        let header = header.to_str().ok()?;
        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(key, _)| *key == name)
            .and_then(|(_, value)| urlencoding::decode(value).ok())
            .map(|value| value.into_owned())
    }
}

impl SessionPersistence for CookieJarPersistence {
    fn load(&self) -> Option<Session> {
        let access_token = self.cookie_value(ACCESS_TOKEN_COOKIE)?;
        let raw_user = self.cookie_value(USER_COOKIE)?;
        match serde_json::from_str::<UserProfile>(&raw_user) {
            Ok(user) => Some(Session { access_token, user }),
            Err(e) => {
                warn!("⚠️ Cookie de usuario ilegible, se ignora: {}", e);
                None
            }
        }
    }

    fn save(&self, session: &Session) -> AppResult<()> {
        let user = serde_json::to_string(&session.user)
            .map_err(|e| AppError::Internal(format!("cannot serialize user profile: {}", e)))?;
        self.set_cookie(ACCESS_TOKEN_COOKIE, &session.access_token);
        self.set_cookie(USER_COOKIE, &user);
        self.set_cookie(IS_AUTHENTICATED_COOKIE, "true");
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        self.expire_cookie(ACCESS_TOKEN_COOKIE);
        self.expire_cookie(USER_COOKIE);
        self.expire_cookie(IS_AUTHENTICATED_COOKIE);
        Ok(())
    }
}

/// Sesión del proceso con persistencia inyectada
pub struct SessionManager {
    current: RwLock<Option<Session>>,
    persistence: Box<dyn SessionPersistence>,
}

impl SessionManager {
    /// El estado inicial se lee de la persistencia
    pub fn new(persistence: Box<dyn SessionPersistence>) -> Self {
        let initial = persistence.load();
        if initial.is_some() {
            info!("🔐 Sesión restaurada desde cookies");
        }
        Self {
            current: RwLock::new(initial),
            persistence,
        }
    }

    /// Acción `LOGIN`: fija token y perfil, y los persiste
    pub fn login(&self, user: UserProfile, access_token: String) -> AppResult<Session> {
        if access_token.trim().is_empty() {
            return Err(AppError::BadRequest("access token must not be empty".to_string()));
        }
        let session = Session { access_token, user };
        self.persistence.save(&session)?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
        info!("🔓 Sesión iniciada");
        Ok(session)
    }

    /// Acción `LOGOUT`: borra sesión y cookies
    pub fn logout(&self) -> AppResult<()> {
        self.persistence.clear()?;
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = None;
        info!("🔒 Sesión cerrada");
        Ok(())
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn access_token(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|s| s.access_token.clone())
    }
}

static GLOBAL_SESSION: OnceCell<Arc<SessionManager>> = OnceCell::new();

/// Inicializa la sesión del proceso. Solo se puede llamar una vez.
pub fn init_global(manager: Arc<SessionManager>) -> AppResult<Arc<SessionManager>> {
    GLOBAL_SESSION
        .set(manager.clone())
        .map_err(|_| AppError::Internal("session already initialized".to_string()))?;
    Ok(manager)
}

/// Sesión del proceso, si ya se inicializó
pub fn global() -> Option<Arc<SessionManager>> {
    GLOBAL_SESSION.get().cloned()
}
