use anyhow::Result;
use dotenvy::dotenv;
use reqwest::cookie::Jar;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use fleet_dashboard::clients::HttpFleetApi;
use fleet_dashboard::config::EnvironmentConfig;
use fleet_dashboard::services::session_service::{self, CookieJarPersistence, SessionManager};
use fleet_dashboard::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level = if config.is_development() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚚 Fleet Dashboard");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);
    info!("🔗 API de flota: {}", config.api_base_url);

    // Jar de cookies compartido entre el cliente HTTP y la sesión
    let jar = Arc::new(Jar::default());
    let persistence = CookieJarPersistence::new(jar.clone(), &config.api_base_url)?;
    let session = session_service::init_global(Arc::new(SessionManager::new(Box::new(persistence))))?;

    let api = HttpFleetApi::new(&config, jar, session.clone())?;
    let app_state = AppState::new(config.clone(), Arc::new(api), session);
    let app = create_router(app_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("📊 Dashboard:");
    info!("   GET  /api/dashboard - Analytics + envíos + mantenimientos");
    info!("   GET  /api/analytics - Tarjetas de analytics");
    info!("📦 Envíos:");
    info!("   GET  /api/shipments - Tabla, detalle y diálogos");
    info!("   POST /api/shipments/intent - Orden, filtros, página, selección");
    info!("   POST /api/shipments/cancellation/confirm - Cancelar envío");
    info!("   POST /api/shipments/schedule - Programar mantenimiento");
    info!("🔧 Mantenimientos:");
    info!("   GET  /api/maintenances - Tabla y diálogos");
    info!("   POST /api/maintenances/update - Editar mantenimiento");
    info!("   POST /api/maintenances/cancellation/confirm - Cancelar mantenimiento");
    info!("🚛 Vehículos:");
    info!("   GET  /api/vehicles - Tabla de vehículos");
    info!("🔐 Sesión:");
    info!("   GET  /api/session - Sesión actual");
    info!("   POST /api/session/login - LOGIN");
    info!("   POST /api/session/logout - LOGOUT");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
