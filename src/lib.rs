use std::{sync::Arc, time::Duration};

use axum::{extract::FromRef, Router};
use chrono::Utc;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod auth_middleware;
pub mod bookings;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod geo;
pub mod mock_data;
pub mod models;
pub mod query;
pub mod routes;
pub mod session;

use crate::{
    auth::AuthService, bookings::BookingRepository, catalog::BillboardRepository, config::Settings,
    session::SessionStore,
};

// Shared application state handed to every handler
#[derive(Clone, FromRef)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub billboards: Arc<BillboardRepository>,
    pub bookings: Arc<BookingRepository>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Builds every repository once, over freshly generated mock data.
    pub fn seeded(settings: Settings) -> Self {
        let settings = Arc::new(settings);
        let latency = Duration::from_millis(settings.simulated_latency_ms);
        let sessions = SessionStore::new(&settings.session_store_path);

        AppState {
            billboards: Arc::new(BillboardRepository::seeded(&settings)),
            bookings: Arc::new(BookingRepository::new(mock_data::seed_bookings(), latency)),
            auth: Arc::new(AuthService::new(mock_data::seed_users(Utc::now()), sessions, settings.clone())),
            settings,
        }
    }
}

/// The full router with request tracing, as served by the binary.
pub fn build_app(state: AppState) -> Router {
    routes::create_router(state).layer(TraceLayer::new_for_http())
}
