//! Services module
//!
//! Este módulo contiene la lógica de la aplicación que no pertenece a una
//! tabla concreta: sesión, avisos, mutaciones remotas y el formulario de
//! mantenimiento.

pub mod maintenance_form;
pub mod mutation_gateway;
pub mod notification_service;
pub mod session_service;

pub use maintenance_form::{FormContext, FormMode, MaintenanceFormInput};
pub use mutation_gateway::{MutationGateway, MutationKind, PendingFlags};
pub use notification_service::{Notification, NotificationCenter, NotificationLevel};
pub use session_service::{
    CookieJarPersistence, MemoryPersistence, SessionManager, SessionPersistence,
};
