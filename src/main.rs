use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use route_replay::{config, pipeline::load, routes, state};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "route_replay=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();

    // A route that cannot be loaded is fatal: there is nothing to play back.
    let route = load::load(&config.route_source).await.map_err(|err| {
        tracing::error!("Failed to load route from {}: {}", config.route_source, err);
        err
    })?;
    let state = state::AppState::new(&config, route)?;

    let app = Router::new()
        .merge(routes::health::router())
        .merge(routes::route::router())
        .merge(routes::playback::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Route replay listening on {}", addr);
    tracing::info!("Route: GET http://{}/api/route", addr);
    tracing::info!("Frame: GET http://{}/api/playback", addr);
    tracing::info!(
        "Controls: POST http://{}/api/playback/{{play,pause,toggle,reset}}, PUT /api/playback/speed",
        addr
    );

    axum::serve(listener, app).await?;
    Ok(())
}
