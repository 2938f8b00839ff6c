use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, add_item, borrow_item, get_events, get_item, get_member, get_statistics,
    list_items, list_members, register_member, reset_statistics, return_item,
};

/// Creates the API router with all library endpoints
///
/// Catalogue / members:
/// - POST /items, GET /items, GET /items/:id
/// - POST /members, GET /members, GET /members/:id
///
/// Loans:
/// - POST /loans - Borrow an item
/// - POST /returns - Return an item and compute the fee
///
/// Reporting:
/// - GET /statistics, POST /statistics/reset
/// - GET /events
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/items", post(add_item).get(list_items))
        .route("/items/:id", get(get_item))
        .route("/members", post(register_member).get(list_members))
        .route("/members/:id", get(get_member))
        .route("/loans", post(borrow_item))
        .route("/returns", post(return_item))
        .route("/statistics", get(get_statistics))
        .route("/statistics/reset", post(reset_statistics))
        .route("/events", get(get_events))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
