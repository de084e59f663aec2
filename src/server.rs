//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, identity mode, and Axum server lifecycle.

use crate::api::middleware::identity::{HeaderIdentity, IdentityResolver, TokenIdentity};
use crate::api::middleware::rate_limit;
use crate::application::services::{AuthService, CocktailService, RepositoryCocktailService};
use crate::config::{AuthMode, Config};
use crate::domain::repositories::{CocktailRepository, MemberTokenRepository};
use crate::infrastructure::persistence::{
    InMemoryCocktailRepository, InMemoryMemberTokenRepository, PgCocktailRepository,
    PgMemberTokenRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations, or the in-memory store
/// - Identity resolver for the configured [`AuthMode`]
/// - Rate limiter
/// - Axum HTTP server with graceful shutdown on Ctrl+C / SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Rate limit settings are invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = match config.database_url {
        Some(ref database_url) => {
            let pool = connect_pool(&config, database_url).await?;
            let pool = Arc::new(pool);

            build_state(
                &config,
                Arc::new(PgCocktailRepository::new(pool.clone())),
                Arc::new(PgMemberTokenRepository::new(pool)),
            )?
        }
        None => {
            tracing::warn!("No database configured; cocktails are kept in memory");
            build_state(
                &config,
                Arc::new(InMemoryCocktailRepository::new()),
                Arc::new(InMemoryMemberTokenRepository::new()),
            )?
        }
    };

    let router = rate_limit::apply(app_router(state), config.rate_limit())?;
    let app = NormalizePathLayer::trim_trailing_slash().layer(router);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Opens the pool and applies pending migrations.
async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;
    tracing::info!("Migrations applied");

    Ok(pool)
}

/// Wires repositories into services and picks the identity resolver.
///
/// # Errors
///
/// Returns an error if token mode is selected without a signing secret.
pub fn build_state<C, T>(config: &Config, cocktails: Arc<C>, tokens: Arc<T>) -> Result<AppState>
where
    C: CocktailRepository + 'static,
    T: MemberTokenRepository + 'static,
{
    let cocktail_service: Arc<dyn CocktailService> =
        Arc::new(RepositoryCocktailService::new(cocktails));

    let identity: Arc<dyn IdentityResolver> = match config.auth_mode {
        AuthMode::Header => {
            tracing::info!("Identity: X-Member-No header");
            Arc::new(HeaderIdentity)
        }
        AuthMode::Token => {
            let secret = config
                .token_signing_secret
                .clone()
                .filter(|s| !s.is_empty())
                .context("TOKEN_SIGNING_SECRET must be set when AUTH_MODE=token")?;
            tracing::info!("Identity: Bearer tokens");
            Arc::new(TokenIdentity::new(Arc::new(AuthService::new(tokens, secret))))
        }
    };

    Ok(AppState::new(cocktail_service, identity))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
