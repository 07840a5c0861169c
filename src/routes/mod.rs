// Route definitions

use axum::{
    response::Json,
    routing::{get, patch, post},
    Router,
};
use serde_json::{json, Value};

use crate::{models::ApiResponse, AppState};

mod auth;
mod billboards;
mod bookings;

pub fn create_router(app_state: AppState) -> Router {
    let api_router = Router::new()
        // Catalog
        .route("/billboards", post(billboards::create_billboard))
        .route("/billboards/search", post(billboards::search_billboards))
        .route(
            "/billboards/:id",
            get(billboards::view_billboard)
                .patch(billboards::update_billboard)
                .delete(billboards::delete_billboard),
        )
        .route("/billboards/:id/bookings", get(bookings::billboard_bookings))
        .route("/owners/:owner_id/billboards", get(billboards::owner_billboards))
        .route("/owners/:owner_id/stats", get(billboards::owner_stats))
        // Bookings
        .route("/bookings", post(bookings::create_booking))
        .route("/advertisers/:advertiser_id/bookings", get(bookings::advertiser_bookings))
        .route("/bookings/:id/status", patch(bookings::update_status))
        .route("/bookings/:id/creative", post(bookings::upload_creative))
        .route("/bookings/:id/creative/approval", post(bookings::approve_creative))
        .route("/bookings/:id/proof", post(bookings::upload_proof))
        // Accounts
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::current_user))
        .route("/users/:id", patch(auth::update_profile));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_router)
        .with_state(app_state)
}

async fn health() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::ok(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") })))
}
