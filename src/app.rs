/*
 * Responsibility
 * - Load Config → build dependencies → assemble Router
 * - Apply middleware (context, HTTP layers, CORS)
 * - Start with axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware,
    services::{identity::PgIdentityQuery, session::ValkeySessionStore},
    state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set, e.g.
    // RUST_LOG=info,request_context=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the process is launched
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        // Production: default hook, keep serving.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting server in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = apply_layers(build_router(state), &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    let identity = Arc::new(PgIdentityQuery::new(db));

    let sessions = Arc::new(
        ValkeySessionStore::new(&config.redis_url, config.session_key_prefix.clone()).await?,
    );

    Ok(AppState::new(identity, sessions, config.app_env)
        .with_session_cookie(config.session_cookie_name.clone())
        .with_body_limit(config.body_limit_bytes))
}

/// Routes + context middleware, without transport layers.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .fallback(api::fallback::not_found);

    middleware::context::apply(router, state.clone()).with_state(state)
}

pub fn apply_layers(router: Router, config: &Config) -> Router {
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}
