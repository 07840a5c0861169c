// Booking workflow: reservation, owner decisions, creative and proof uploads

use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use validator::Validate;

use crate::{
    catalog::simulate_latency,
    error::{AppError, AppResult},
    models::{Booking, BookingStatus, ImageRef, NewBooking},
};

const NOT_FOUND: &str = "Booking not found";

pub struct BookingRepository {
    bookings: RwLock<Vec<Booking>>,
    latency: Duration,
}

impl BookingRepository {
    pub fn new(bookings: Vec<Booking>, latency: Duration) -> Self {
        BookingRepository { bookings: RwLock::new(bookings), latency }
    }

    /// New bookings start pending with the creative unapproved. The date
    /// range is taken as given.
    pub async fn create(&self, request: NewBooking) -> AppResult<Booking> {
        request.validate()?;
        simulate_latency(self.latency).await;
        let mut bookings = self.bookings.write().await;
        let booking = Booking {
            id: (bookings.len() + 1).to_string(),
            billboard_id: request.billboard_id,
            advertiser_id: request.advertiser_id,
            start_date: request.start_date,
            end_date: request.end_date,
            total_amount: request.total_amount,
            status: BookingStatus::Pending,
            payment_id: None,
            creative_url: None,
            creative_approved: false,
            proof_of_display_url: None,
            created_at: Utc::now(),
        };
        bookings.push(booking.clone());
        info!(booking_id = %booking.id, billboard_id = %booking.billboard_id, "Booking created");
        Ok(booking)
    }

    pub async fn for_advertiser(&self, advertiser_id: &str) -> Vec<Booking> {
        simulate_latency(self.latency).await;
        self.bookings
            .read()
            .await
            .iter()
            .filter(|b| b.advertiser_id == advertiser_id)
            .cloned()
            .collect()
    }

    pub async fn for_billboard(&self, billboard_id: &str) -> Vec<Booking> {
        simulate_latency(self.latency).await;
        self.bookings
            .read()
            .await
            .iter()
            .filter(|b| b.billboard_id == billboard_id)
            .cloned()
            .collect()
    }

    pub async fn get(&self, booking_id: &str) -> AppResult<Booking> {
        simulate_latency(self.latency).await;
        self.bookings
            .read()
            .await
            .iter()
            .find(|b| b.id == booking_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
    }

    /// Owners may only confirm or cancel; completion comes from proof upload.
    pub async fn update_status(&self, booking_id: &str, status: BookingStatus) -> AppResult<Booking> {
        if !matches!(status, BookingStatus::Confirmed | BookingStatus::Cancelled) {
            return Err(AppError::Validation(format!(
                "Booking status can only be set to confirmed or cancelled, not {}",
                status.as_str()
            )));
        }
        self.modify(booking_id, |b| b.status = status).await
    }

    /// A fresh creative always needs approval again.
    pub async fn upload_creative(&self, booking_id: &str, creative: ImageRef) -> AppResult<Booking> {
        self.modify(booking_id, |b| {
            b.creative_url = Some(creative);
            b.creative_approved = false;
        })
        .await
    }

    pub async fn approve_creative(&self, booking_id: &str, approved: bool) -> AppResult<Booking> {
        self.modify(booking_id, |b| b.creative_approved = approved).await
    }

    pub async fn upload_proof(&self, booking_id: &str, proof: ImageRef) -> AppResult<Booking> {
        self.modify(booking_id, |b| {
            b.proof_of_display_url = Some(proof);
            b.status = BookingStatus::Completed;
        })
        .await
    }

    async fn modify<F>(&self, booking_id: &str, change: F) -> AppResult<Booking>
    where
        F: FnOnce(&mut Booking),
    {
        simulate_latency(self.latency).await;
        let mut bookings = self.bookings.write().await;
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == booking_id)
            .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))?;
        change(booking);
        info!(booking_id, status = booking.status.as_str(), "Booking updated");
        Ok(booking.clone())
    }
}
