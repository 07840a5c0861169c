// Data structures shared by the repositories and the HTTP layer

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

// --- Envelope ---

/// Uniform success/error envelope returned by every operation.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse { success: true, data: Some(data), error: None, message: None }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        ApiResponse { success: true, data: Some(data), error: None, message: Some(message.into()) }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        ApiResponse { success: false, data: None, error: Some(error.into()), message: None }
    }
}

impl ApiResponse<()> {
    pub fn done(message: impl Into<String>) -> Self {
        ApiResponse { success: true, data: None, error: None, message: Some(message.into()) }
    }
}

// --- Billboards ---

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Lighting {
    Daylight,
    Night,
    Both,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BillboardStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillboardType {
    Digital,
    Static,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DimensionUnit {
    Ft,
    M,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub unit: DimensionUnit,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub city: String,
    pub state: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
}

/// An image is either a remote URL or a handle to a bundled local asset.
/// Resolving either into pixels is the client's job.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ImageRef {
    Remote(String),
    Local(String),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Billboard {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub location: Location,
    pub dimensions: Dimensions,
    pub price_per_day: f64,
    pub lighting: Lighting,
    pub images: Vec<ImageRef>,
    pub status: BillboardStatus,
    pub views_count: u64,
    pub rating: f64,
    pub review_count: u32,
    pub available_dates: Vec<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub estimated_daily_impressions: u64,
    #[serde(rename = "type")]
    pub kind: BillboardType,
    pub features: Vec<String>,
    pub min_booking_days: u32,
}

/// Fields a caller supplies when listing a new billboard. The repository
/// assigns id, createdAt and the zeroed aggregates.
#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBillboard {
    #[validate(custom(function = "not_blank", message = "Owner id is required"))]
    pub owner_id: String,
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub location: Location,
    pub dimensions: Dimensions,
    #[validate(range(exclusive_min = 0.0, message = "Price per day must be positive"))]
    pub price_per_day: f64,
    pub lighting: Lighting,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    #[serde(default)]
    pub status: BillboardStatus,
    #[serde(default)]
    pub available_dates: Vec<NaiveDate>,
    #[serde(default)]
    pub estimated_daily_impressions: u64,
    #[serde(rename = "type")]
    pub kind: BillboardType,
    #[serde(default)]
    pub features: Vec<String>,
    #[validate(range(min = 1, message = "Minimum booking days must be at least 1"))]
    pub min_booking_days: u32,
}

/// Partial update merged shallowly into a stored billboard. `id`,
/// `createdAt` and `ownerId` cannot be changed.
#[derive(Debug, Serialize, Deserialize, Clone, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BillboardPatch {
    #[validate(custom(function = "not_blank", message = "Title is required"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<Location>,
    pub dimensions: Option<Dimensions>,
    #[validate(range(exclusive_min = 0.0, message = "Price per day must be positive"))]
    pub price_per_day: Option<f64>,
    pub lighting: Option<Lighting>,
    pub images: Option<Vec<ImageRef>>,
    pub status: Option<BillboardStatus>,
    pub views_count: Option<u64>,
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub available_dates: Option<Vec<NaiveDate>>,
    pub estimated_daily_impressions: Option<u64>,
    #[serde(rename = "type")]
    pub kind: Option<BillboardType>,
    pub features: Option<Vec<String>>,
    #[validate(range(min = 1, message = "Minimum booking days must be at least 1"))]
    pub min_booking_days: Option<u32>,
}

impl BillboardPatch {
    pub fn apply_to(self, b: &mut Billboard) {
        if let Some(v) = self.title {
            b.title = v;
        }
        if let Some(v) = self.description {
            b.description = v;
        }
        if let Some(v) = self.location {
            b.location = v;
        }
        if let Some(v) = self.dimensions {
            b.dimensions = v;
        }
        if let Some(v) = self.price_per_day {
            b.price_per_day = v;
        }
        if let Some(v) = self.lighting {
            b.lighting = v;
        }
        if let Some(v) = self.images {
            b.images = v;
        }
        if let Some(v) = self.status {
            b.status = v;
        }
        if let Some(v) = self.views_count {
            b.views_count = v;
        }
        if let Some(v) = self.rating {
            b.rating = v;
        }
        if let Some(v) = self.review_count {
            b.review_count = v;
        }
        if let Some(v) = self.available_dates {
            b.available_dates = v;
        }
        if let Some(v) = self.estimated_daily_impressions {
            b.estimated_daily_impressions = v;
        }
        if let Some(v) = self.kind {
            b.kind = v;
        }
        if let Some(v) = self.features {
            b.features = v;
        }
        if let Some(v) = self.min_booking_days {
            b.min_booking_days = v;
        }
    }
}

// --- Search ---

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoRadius {
    pub latitude: f64,
    pub longitude: f64,
    /// Kilometres
    pub radius: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Price,
    Distance,
    Rating,
}

// Search parameters; every field is optional and independent
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct BillboardFilter {
    pub location: Option<GeoRadius>,
    pub price_range: Option<PriceRange>,
    pub lighting: Option<Lighting>,
    pub min_width: Option<f64>,
    pub min_height: Option<f64>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub area: Option<String>,
    pub search_query: Option<String>,
    pub sort_by: Option<SortBy>,
}

/// Aggregates shown on the owner dashboard.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OwnerStats {
    pub total_listings: usize,
    pub active_listings: usize,
    pub total_views: u64,
    pub total_impressions: u64,
}

// --- Bookings ---

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub billboard_id: String,
    pub advertiser_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_amount: f64,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creative_url: Option<ImageRef>,
    pub creative_approved: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proof_of_display_url: Option<ImageRef>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    #[validate(custom(function = "not_blank", message = "Billboard id is required"))]
    pub billboard_id: String,
    #[validate(custom(function = "not_blank", message = "Advertiser id is required"))]
    pub advertiser_id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(range(min = 0.0, message = "Total amount cannot be negative"))]
    pub total_amount: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StatusUpdate {
    pub status: BookingStatus,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MediaUpload {
    pub url: ImageRef,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreativeDecision {
    pub approved: bool,
}

// --- Users ---

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Advertiser,
    Owner,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub user_type: UserType,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

/// Profile fields a user may change. Email and userType are fixed.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub profile_image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    pub full_name: String,
    pub user_type: UserType,
    pub phone: String,
}

/// Returned by login and register: the user plus the bearer token to send back.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn image_refs_are_tagged() {
        let remote = serde_json::to_value(ImageRef::Remote("https://cdn/x.png".into())).unwrap();
        assert_eq!(remote, json!({ "kind": "remote", "value": "https://cdn/x.png" }));

        let local: ImageRef =
            serde_json::from_value(json!({ "kind": "local", "value": "billboard3" })).unwrap();
        assert_eq!(local, ImageRef::Local("billboard3".into()));
    }

    #[test]
    fn filter_accepts_any_subset_of_fields() {
        let filter: BillboardFilter = serde_json::from_value(json!({
            "priceRange": { "min": 1000, "max": 5000 },
            "sortBy": "rating"
        }))
        .unwrap();
        assert_eq!(filter.price_range, Some(PriceRange { min: 1000.0, max: 5000.0 }));
        assert_eq!(filter.sort_by, Some(SortBy::Rating));
        assert!(filter.city.is_none());
        assert!(filter.location.is_none());
    }

    #[test]
    fn new_billboard_rejects_non_positive_price() {
        let mut listing: NewBillboard = serde_json::from_value(json!({
            "ownerId": "1",
            "title": "Static Hoarding at Baner",
            "location": {
                "latitude": 18.55, "longitude": 73.78,
                "address": "4 Main Road, Baner", "city": "Pune", "state": "Maharashtra"
            },
            "dimensions": { "width": 20, "height": 10, "unit": "ft" },
            "pricePerDay": 0,
            "lighting": "daylight",
            "type": "static",
            "minBookingDays": 7
        }))
        .unwrap();
        let errors = listing.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price_per_day"));

        listing.price_per_day = 5000.0;
        assert!(listing.validate().is_ok());
        assert_eq!(listing.status, BillboardStatus::Active);

        listing.title = "   ".into();
        assert!(listing.validate().is_err());
    }

    #[test]
    fn patch_checks_only_the_fields_it_carries() {
        assert!(BillboardPatch::default().validate().is_ok());

        let patch: BillboardPatch =
            serde_json::from_value(json!({ "pricePerDay": -5, "minBookingDays": 0, "rating": 9.5 })).unwrap();
        let errors = patch.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("price_per_day"));
        assert!(fields.contains_key("min_booking_days"));
        assert!(fields.contains_key("rating"));

        let fine = BillboardPatch { rating: Some(4.5), price_per_day: Some(1.0), ..Default::default() };
        assert!(fine.validate().is_ok());
    }

    #[test]
    fn registration_needs_an_email_and_password() {
        let form: RegisterRequest = serde_json::from_value(json!({
            "email": "not-an-email",
            "password": "",
            "fullName": "Ravi",
            "userType": "owner",
            "phone": "1"
        }))
        .unwrap();
        let errors = form.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn failure_envelope_omits_data() {
        let body = serde_json::to_value(ApiResponse::<()>::failure("Billboard not found")).unwrap();
        assert_eq!(body, json!({ "success": false, "error": "Billboard not found" }));
    }
}
