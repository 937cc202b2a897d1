use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use lentera_core::health::{healthz, readyz};
use lentera_core::middleware::request_id_layer;

use crate::handlers::{password, register, verification};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/register", post(register::register))
        .route("/resend-verification", post(verification::resend_verification))
        .route("/verify-email", post(verification::verify_email))
        .route("/forgot-password", post(password::forgot_password))
        .route("/reset-password", post(password::reset_password))
        .layer(
            ServiceBuilder::new()
                .layer(request_id_layer())
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}
