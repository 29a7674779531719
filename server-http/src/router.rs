//! Route table.

use crate::handlers::{self, albums, artists, auth, songs};
use crate::middleware::require_auth;
use crate::state::AppState;
use axum::middleware::from_fn_with_state;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the application router.
///
/// Everything except `/up`, `/register`, and `/login` sits behind the
/// bearer-token middleware.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/logout", post(auth::logout))
        .route("/artists", get(artists::list))
        .route("/artist/{id}", get(artists::show))
        .route("/create-artist", post(artists::create))
        .route("/update-artist/{id}", put(artists::update))
        .route("/delete-artist/{id}", delete(artists::delete))
        .route("/albums", get(albums::list))
        .route("/album/{id}", get(albums::show))
        .route("/create-album", post(albums::create))
        .route("/update-album/{id}", put(albums::update))
        .route("/delete-album/{id}", delete(albums::delete))
        .route("/songs", get(songs::list))
        .route("/songs/search", get(songs::search))
        .route("/song/{id}", get(songs::show))
        .route("/create-song", post(songs::create))
        .route("/update-song/{id}", put(songs::update))
        .route("/delete-song/{id}", delete(songs::delete))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/up", get(handlers::health_check))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
