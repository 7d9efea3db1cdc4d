use std::sync::Arc;
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

#[cfg(test)]
pub mod testing;

use config::AppConfig;
use database::StorageHealth;
use services::Services;

/// Everything a handler can reach: the business services, a storage probe
/// for `/health`, and the loaded configuration.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub health: Arc<dyn StorageHealth>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(services: Services, health: Arc<dyn StorageHealth>, config: AppConfig) -> Self {
        Self {
            services,
            health,
            config: Arc::new(config),
        }
    }
}

/// Builds the full HTTP application over `state`.
pub fn app(state: AppState) -> Router {
    let protected = Router::new()
        .merge(actor_routes())
        .merge(film_routes())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::identity,
        ));

    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .merge(user_routes())
        .merge(protected)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::request_deadline,
        ))
        .layer(TraceLayer::new_for_http());

    if state.config.api.enable_request_logging {
        router = router.layer(axum_middleware::from_fn(middleware::log_requests));
    }
    if state.config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }

    router.with_state(state)
}

fn user_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/sign-up", post(auth::sign_up))
        .route("/sign-in", post(auth::sign_in))
}

fn actor_routes() -> Router<AppState> {
    use handlers::protected::actor;

    Router::new()
        .route("/actor", get(actor::list).post(actor::create))
        .route(
            "/actor/:id",
            get(actor::get).put(actor::update).delete(actor::delete),
        )
}

fn film_routes() -> Router<AppState> {
    use handlers::protected::film;

    Router::new()
        .route("/film", get(film::list).post(film::create))
        .route(
            "/film/:id",
            get(film::get)
                .put(film::update)
                .delete(film::delete)
                .post(film::add_actors),
        )
}
