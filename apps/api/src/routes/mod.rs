pub mod health;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use crate::auth::handle_session;
use crate::documents::handlers as documents;
use crate::enhance::handlers as enhance;
use crate::state::AppState;
use crate::templates::handle_list_templates;

/// Builds the full router. CORS is permissive: any origin, method and
/// header; `OPTIONS` preflights are answered with an empty body.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Generation API
        .route("/api/v1/enhance", post(enhance::handle_enhance))
        .route("/api/v1/generate", post(enhance::handle_generate))
        // Catalog & session
        .route("/api/v1/templates", get(handle_list_templates))
        .route("/api/v1/session", get(handle_session))
        // Saved CVs
        .route(
            "/api/v1/cvs",
            get(documents::handle_list_cvs).post(documents::handle_create_cv),
        )
        .route(
            "/api/v1/cvs/:id",
            get(documents::handle_get_cv)
                .patch(documents::handle_update_cv)
                .delete(documents::handle_delete_cv),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
