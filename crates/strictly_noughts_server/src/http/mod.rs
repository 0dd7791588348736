//! REST interface.

mod dto;
mod error;
mod handlers;

pub use dto::{ErrorBody, GameBody, LocationBody};
pub use error::ApiError;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, header};
use axum::response::Response;
use axum::routing::get;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::sync::Arc;
use strictly_noughts::{Engine, Minimax, Strategy};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, instrument, warn};

use crate::config::ServerConfig;
use crate::db::GameRepository;
use crate::service::GameService;

/// Strategy behind the shared service.
pub type DynStrategy = Box<dyn Strategy + Send + Sync>;

/// Handler state.
#[derive(Clone)]
pub struct AppState {
    service: Arc<GameService<DynStrategy>>,
    public_url: Arc<str>,
}

impl AppState {
    /// Creates handler state. `public_url` prefixes `Location` headers.
    pub fn new(service: GameService<DynStrategy>, public_url: impl Into<Arc<str>>) -> Self {
        Self {
            service: Arc::new(service),
            public_url: public_url.into(),
        }
    }

    /// Builds the state described by `config`, playing minimax.
    pub fn from_config(config: &ServerConfig) -> Self {
        let rng = match config.seed() {
            Some(seed) => SmallRng::seed_from_u64(*seed),
            None => SmallRng::from_os_rng(),
        };
        let strategy: DynStrategy = Box::new(Minimax::new());
        let service = GameService::new(
            GameRepository::new(config.db_path().as_str()),
            Engine::new(strategy),
            rng,
        );
        Self::new(service, config.public_url())
    }
}

/// Cross-origin policy: any origin may call the API from a browser.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::LOCATION])
}

/// Builds the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/games",
            get(handlers::list_games).post(handlers::create_game),
        )
        .route(
            "/api/v1/games/{id}",
            get(handlers::get_game)
                .put(handlers::update_game)
                .delete(handlers::delete_game),
        )
        .layer(
            ServiceBuilder::new()
                .map_request(|req: Request<Body>| {
                    info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
                    req
                })
                .map_response(|resp: Response| {
                    info!(status = %resp.status(), "Response sent");
                    resp
                })
                .layer(cors()),
        )
        .with_state(state)
}

/// Serves the API until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
#[instrument(skip(config), fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    let app = router(AppState::from_config(config));

    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(
        addr = %listener.local_addr()?,
        public_url = %config.public_url(),
        "Server ready"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
