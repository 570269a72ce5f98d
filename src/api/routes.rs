use super::handlers::*;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/_action/adyen/verify", post(verify_api_key))
        .route("/api/adyen/refunds", post(post_refund))
        .route("/api/adyen/orders/:order_id/refunds", get(get_refunds))
        .route(
            "/api/adyen/orders/:order_id/notifications",
            get(get_order_notifications),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
