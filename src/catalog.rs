// In-memory billboard catalog: the repository behind search, lookup and
// owner listing management.

use std::time::Duration;

use chrono::Utc;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::RwLock;
use tracing::{debug, info};
use validator::Validate;

use crate::{
    config::Settings,
    error::{AppError, AppResult},
    mock_data,
    models::{Billboard, BillboardFilter, BillboardPatch, BillboardStatus, NewBillboard, OwnerStats},
    query,
};

const NOT_FOUND: &str = "Billboard not found";

/// Stand-in for the network round trip a real backend would cost.
pub(crate) async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

pub struct BillboardRepository {
    billboards: RwLock<Vec<Billboard>>,
    latency: Duration,
}

impl BillboardRepository {
    pub fn new(billboards: Vec<Billboard>, latency: Duration) -> Self {
        BillboardRepository { billboards: RwLock::new(billboards), latency }
    }

    /// Builds the repository over a freshly generated mock catalog.
    pub fn seeded(settings: &Settings) -> Self {
        let mut rng = match settings.catalog_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let catalog = mock_data::generate_catalog(&mut rng, settings.catalog_size, Utc::now());
        info!("Generated mock catalog with {} billboards", catalog.len());
        Self::new(catalog, Duration::from_millis(settings.simulated_latency_ms))
    }

    /// Filters and sorts a snapshot of the catalog. No filter returns
    /// everything in catalog order.
    pub async fn search(&self, filter: Option<&BillboardFilter>) -> Vec<Billboard> {
        simulate_latency(self.latency).await;
        let snapshot = self.billboards.read().await.clone();
        let results = match filter {
            Some(filter) => query::run(snapshot, filter),
            None => snapshot,
        };
        debug!("Search matched {} billboards", results.len());
        results
    }

    /// Pure lookup; see [`record_view`](Self::record_view) for the
    /// counting variant.
    pub async fn get_by_id(&self, id: &str) -> AppResult<Billboard> {
        simulate_latency(self.latency).await;
        self.billboards
            .read()
            .await
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
    }

    /// Looks up a billboard and counts the read as a detail view.
    pub async fn record_view(&self, id: &str) -> AppResult<Billboard> {
        simulate_latency(self.latency).await;
        let mut billboards = self.billboards.write().await;
        let billboard = billboards
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
        billboard.views_count += 1;
        Ok(billboard.clone())
    }

    pub async fn get_by_owner(&self, owner_id: &str) -> Vec<Billboard> {
        simulate_latency(self.latency).await;
        self.billboards
            .read()
            .await
            .iter()
            .filter(|b| b.owner_id == owner_id)
            .cloned()
            .collect()
    }

    pub async fn create(&self, fields: NewBillboard) -> AppResult<Billboard> {
        fields.validate()?;
        simulate_latency(self.latency).await;

        let mut billboards = self.billboards.write().await;
        // Length-based ids can collide once entries have been deleted, so
        // step past any id still in use.
        let mut next = billboards.len() + 1;
        while billboards.iter().any(|b| b.id == next.to_string()) {
            next += 1;
        }

        let billboard = Billboard {
            id: next.to_string(),
            owner_id: fields.owner_id,
            title: fields.title,
            description: fields.description,
            location: fields.location,
            dimensions: fields.dimensions,
            price_per_day: fields.price_per_day,
            lighting: fields.lighting,
            images: fields.images,
            status: fields.status,
            views_count: 0,
            rating: 0.0,
            review_count: 0,
            available_dates: fields.available_dates,
            created_at: Utc::now(),
            estimated_daily_impressions: fields.estimated_daily_impressions,
            kind: fields.kind,
            features: fields.features,
            min_booking_days: fields.min_booking_days,
        };
        billboards.push(billboard.clone());
        info!("Created billboard {} for owner {}", billboard.id, billboard.owner_id);
        Ok(billboard)
    }

    /// Shallow-merges `patch` into the stored record once every field it
    /// carries passes the same checks as a new listing.
    pub async fn update(&self, id: &str, patch: BillboardPatch) -> AppResult<Billboard> {
        patch.validate()?;
        simulate_latency(self.latency).await;
        let mut billboards = self.billboards.write().await;
        let billboard = billboards
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
        patch.apply_to(billboard);
        info!("Updated billboard {}", id);
        Ok(billboard.clone())
    }

    /// Removes the billboard. Bookings that reference it are left alone.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        simulate_latency(self.latency).await;
        let mut billboards = self.billboards.write().await;
        let index = billboards
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
        billboards.remove(index);
        info!("Deleted billboard {}", id);
        Ok(())
    }

    /// Dashboard aggregates over everything the owner has listed.
    pub async fn owner_stats(&self, owner_id: &str) -> OwnerStats {
        let owned = self.get_by_owner(owner_id).await;
        OwnerStats {
            total_listings: owned.len(),
            active_listings: owned.iter().filter(|b| b.status == BillboardStatus::Active).count(),
            total_views: owned.iter().map(|b| b.views_count).sum(),
            total_impressions: owned.iter().map(|b| b.estimated_daily_impressions).sum(),
        }
    }
}
