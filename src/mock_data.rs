// Synthetic seed data standing in for a real backend: a billboard catalog
// scattered around Pune plus the demo users and bookings.

use std::f64::consts::PI;

use chrono::{DateTime, Days, NaiveDate, TimeZone, Utc};
use rand::Rng;

use crate::models::{
    Billboard, BillboardStatus, BillboardType, Booking, BookingStatus, DimensionUnit, Dimensions,
    ImageRef, Lighting, Location, User, UserType,
};

pub const PUNE_LAT: f64 = 18.5204;
pub const PUNE_LNG: f64 = 73.8567;
const SCATTER_RADIUS_KM: f64 = 15.0;
const KM_PER_DEGREE: f64 = 111.3;
const CALENDAR_DAYS: u64 = 60;

const AREAS: [&str; 10] = [
    "Koregaon Park",
    "Baner",
    "Viman Nagar",
    "FC Road",
    "Hinjewadi",
    "Kalyani Nagar",
    "Aundh",
    "Magarpatta",
    "Hadapsar",
    "Kothrud",
];

const IMAGE_HANDLES: [&str; 11] = [
    "billboard1",
    "billboard3",
    "billboard4",
    "billboard5",
    "billboard6",
    "billboard7",
    "billboard8",
    "billboard9",
    "billboard10",
    "billboard11",
    "billboard12",
];

/// Uniformly random point within `radius_km` of the centre.
pub fn random_point_near<R: Rng + ?Sized>(
    rng: &mut R,
    center_lat: f64,
    center_lng: f64,
    radius_km: f64,
) -> (f64, f64) {
    let rd = radius_km / KM_PER_DEGREE;
    let w = rd * rng.random::<f64>().sqrt();
    let t = 2.0 * PI * rng.random::<f64>();
    (center_lat + w * t.sin(), center_lng + w * t.cos())
}

/// The next sixty days after `today`, minus every 7th and 11th day which
/// stand in for existing bookings.
pub fn available_dates(today: NaiveDate) -> Vec<NaiveDate> {
    (1..=CALENDAR_DAYS)
        .filter(|i| i % 7 != 0 && i % 11 != 0)
        .filter_map(|i| today.checked_add_days(Days::new(i)))
        .collect()
}

pub fn generate_catalog<R: Rng + ?Sized>(rng: &mut R, size: usize, now: DateTime<Utc>) -> Vec<Billboard> {
    let today = now.date_naive();

    (0..size)
        .map(|i| {
            let area = AREAS[rng.random_range(0..AREAS.len())];
            let (latitude, longitude) = random_point_near(rng, PUNE_LAT, PUNE_LNG, SCATTER_RADIUS_KM);
            let kind = if rng.random_bool(0.5) { BillboardType::Digital } else { BillboardType::Static };
            let digital = kind == BillboardType::Digital;
            let label = if digital { "digital" } else { "static" };

            Billboard {
                id: (i + 1).to_string(),
                owner_id: if rng.random_bool(0.5) { "1" } else { "2" }.to_string(),
                title: format!("{} Hoarding at {}", if digital { "Digital" } else { "Static" }, area),
                description: format!(
                    "High visibility {} billboard in {}. Great for brand awareness.",
                    label, area
                ),
                location: Location {
                    latitude,
                    longitude,
                    address: format!("{} Main Road, {}", rng.random_range(1..=100u32), area),
                    city: "Pune".to_string(),
                    state: "Maharashtra".to_string(),
                    zip_code: Some("411001".to_string()),
                },
                dimensions: if digital {
                    Dimensions { width: 40.0, height: 20.0, unit: DimensionUnit::Ft }
                } else {
                    Dimensions { width: 20.0, height: 10.0, unit: DimensionUnit::Ft }
                },
                price_per_day: if digital {
                    f64::from(15_000 + rng.random_range(0..10_000u32))
                } else {
                    f64::from(5_000 + rng.random_range(0..5_000u32))
                },
                lighting: if rng.random_bool(0.7) { Lighting::Both } else { Lighting::Daylight },
                images: vec![ImageRef::Local(
                    IMAGE_HANDLES[rng.random_range(0..IMAGE_HANDLES.len())].to_string(),
                )],
                status: BillboardStatus::Active,
                views_count: rng.random_range(0..1_000),
                rating: 3.5 + rng.random::<f64>() * 1.5,
                review_count: rng.random_range(0..50),
                available_dates: available_dates(today),
                created_at: now,
                estimated_daily_impressions: rng.random_range(5_000..50_000),
                kind,
                features: if digital {
                    vec!["LED".to_string(), "High Res".to_string()]
                } else {
                    vec!["Street View".to_string()]
                },
                min_booking_days: if digital { 1 } else { 7 },
            }
        })
        .collect()
}

pub fn seed_users(now: DateTime<Utc>) -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            email: "owner@example.com".to_string(),
            full_name: "John Owner".to_string(),
            user_type: UserType::Owner,
            phone: "+1234567890".to_string(),
            profile_image: Some("https://i.pravatar.cc/150?img=12".to_string()),
            verified: true,
            created_at: now,
        },
        User {
            id: "2".to_string(),
            email: "advertiser@example.com".to_string(),
            full_name: "Jane Advertiser".to_string(),
            user_type: UserType::Advertiser,
            phone: "+1234567891".to_string(),
            profile_image: Some("https://i.pravatar.cc/150?img=45".to_string()),
            verified: false,
            created_at: now,
        },
    ]
}

pub fn seed_bookings() -> Vec<Booking> {
    vec![
        Booking {
            id: "1".to_string(),
            billboard_id: "1".to_string(),
            advertiser_id: "2".to_string(),
            start_date: ymd(2024, 3, 15),
            end_date: ymd(2024, 3, 22),
            total_amount: 3500.0,
            status: BookingStatus::Confirmed,
            payment_id: Some("pay_123456".to_string()),
            creative_url: Some(ImageRef::Local("booking1".to_string())),
            creative_approved: true,
            proof_of_display_url: Some(ImageRef::Local("booking2".to_string())),
            created_at: utc(2024, 3, 1, 10, 0),
        },
        Booking {
            id: "2".to_string(),
            billboard_id: "2".to_string(),
            advertiser_id: "2".to_string(),
            start_date: ymd(2024, 3, 20),
            end_date: ymd(2024, 3, 27),
            total_amount: 2450.0,
            status: BookingStatus::Pending,
            payment_id: None,
            creative_url: None,
            creative_approved: false,
            proof_of_display_url: None,
            created_at: utc(2024, 3, 5, 14, 30),
        },
    ]
}

// Literal seed dates; fall back to the epoch rather than panic.
fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).single().unwrap_or_default()
}
