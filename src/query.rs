// Billboard query engine: predicate filter chain followed by the sort stage

use std::cmp::Ordering;

use crate::geo::haversine_km;
use crate::models::{Billboard, BillboardFilter, Lighting, SortBy};

/// Applies the filter and sort stages to an owned snapshot of the catalog.
pub fn run(candidates: Vec<Billboard>, filter: &BillboardFilter) -> Vec<Billboard> {
    let mut matched = apply_filters(candidates, filter);
    sort(&mut matched, filter);
    matched
}

/// Keeps the entries that satisfy every predicate present in `filter`,
/// preserving input order.
pub fn apply_filters(candidates: Vec<Billboard>, filter: &BillboardFilter) -> Vec<Billboard> {
    // Lowercase the text criteria once, not per candidate.
    let query = non_empty(&filter.search_query).map(str::to_lowercase);
    let city = non_empty(&filter.city).map(str::to_lowercase);
    let state = non_empty(&filter.state).map(str::to_lowercase);
    let area = non_empty(&filter.area).map(str::to_lowercase);

    candidates
        .into_iter()
        .filter(|b| query.as_deref().is_none_or(|q| matches_text(b, q)))
        .filter(|b| {
            filter.location.is_none_or(|center| {
                haversine_km(center.latitude, center.longitude, b.location.latitude, b.location.longitude)
                    <= center.radius
            })
        })
        .filter(|b| city.as_deref().is_none_or(|c| b.location.city.to_lowercase() == c))
        .filter(|b| state.as_deref().is_none_or(|s| b.location.state.to_lowercase() == s))
        .filter(|b| {
            filter
                .price_range
                .is_none_or(|range| b.price_per_day >= range.min && b.price_per_day <= range.max)
        })
        .filter(|b| filter.lighting.is_none_or(|wanted| lighting_matches(b.lighting, wanted)))
        .filter(|b| positive(filter.min_width).is_none_or(|w| b.dimensions.width >= w))
        .filter(|b| positive(filter.min_height).is_none_or(|h| b.dimensions.height >= h))
        .filter(|b| area.as_deref().is_none_or(|a| matches_area(b, a)))
        .collect()
}

/// Stable sort by the requested key; no key keeps the current order.
pub fn sort(billboards: &mut [Billboard], filter: &BillboardFilter) {
    match filter.sort_by {
        Some(SortBy::Price) => {
            billboards.sort_by(|a, b| cmp_f64(a.price_per_day, b.price_per_day));
        }
        Some(SortBy::Rating) => {
            billboards.sort_by(|a, b| cmp_f64(b.rating, a.rating));
        }
        Some(SortBy::Distance) => {
            // Without a reference point there is nothing to measure from.
            if let Some(center) = filter.location {
                let distance = |b: &Billboard| {
                    haversine_km(center.latitude, center.longitude, b.location.latitude, b.location.longitude)
                };
                billboards.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
            }
        }
        None => {}
    }
}

/// `both` lighting satisfies any requested lighting.
pub fn lighting_matches(actual: Lighting, wanted: Lighting) -> bool {
    actual == wanted || actual == Lighting::Both
}

fn matches_text(b: &Billboard, query: &str) -> bool {
    b.title.to_lowercase().contains(query)
        || b.location.city.to_lowercase().contains(query)
        || b.location.state.to_lowercase().contains(query)
        || b.location.address.to_lowercase().contains(query)
}

fn matches_area(b: &Billboard, area: &str) -> bool {
    b.location.address.to_lowercase().contains(area) || b.title.to_lowercase().contains(area)
}

// An empty string constrains nothing.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// A zero minimum constrains nothing.
fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
