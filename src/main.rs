use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use transport_admin_server::config::CONFIG;
use transport_admin_server::db;
use transport_admin_server::handlers::{self, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("transport_admin_server=info,tower_http=info")),
        )
        .init();

    let pool = db::init_db_pool(&CONFIG.database_url, CONFIG.activation_scope).await?;
    tracing::info!("Database ready at {}", CONFIG.database_url);

    let state = AppState {
        pool,
        activation_scope: CONFIG.activation_scope,
    };

    let app = handlers::admin_router(state).layer(TraceLayer::new_for_http());

    let addr = CONFIG.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Admin server listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
