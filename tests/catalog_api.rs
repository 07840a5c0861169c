//! HTTP tests for catalog search, detail views and listing management.

mod common;

use axum::http::{Method, StatusCode};
use common::{build_test_app, get, login, new_listing, register_owner, send};
use serde_json::json;

#[tokio::test]
async fn health_reports_ok() {
    let (app, _dir) = build_test_app();
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
}

#[tokio::test]
async fn search_without_filter_returns_whole_catalog_in_order() {
    let (app, _dir) = build_test_app();
    let (status, body) = send(&app, Method::POST, "/api/billboards/search", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let ids: Vec<String> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_str().unwrap().to_string())
        .collect();
    let expected: Vec<String> = (1..=60).map(|i| i.to_string()).collect();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn price_filter_with_rating_sort() {
    let (app, _dir) = build_test_app();
    let filter = json!({ "priceRange": { "min": 5000, "max": 9999 }, "sortBy": "rating" });
    let (status, body) = send(&app, Method::POST, "/api/billboards/search", None, Some(filter)).await;
    assert_eq!(status, StatusCode::OK);

    let results = body["data"].as_array().unwrap();
    assert!(!results.is_empty());
    for b in results {
        let price = b["pricePerDay"].as_f64().unwrap();
        assert!((5000.0..=9999.0).contains(&price));
        assert_eq!(b["type"], "static");
    }
    let ratings: Vec<f64> = results.iter().map(|b| b["rating"].as_f64().unwrap()).collect();
    assert!(ratings.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn detail_view_counts_views() {
    let (app, _dir) = build_test_app();
    let (_, first) = get(&app, "/api/billboards/5").await;
    let (_, second) = get(&app, "/api/billboards/5").await;

    let v1 = first["data"]["viewsCount"].as_u64().unwrap();
    let v2 = second["data"]["viewsCount"].as_u64().unwrap();
    assert_eq!(v2, v1 + 1);
}

#[tokio::test]
async fn unknown_billboard_is_a_404_envelope() {
    let (app, _dir) = build_test_app();
    let (status, body) = get(&app, "/api/billboards/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Billboard not found" }));
}

#[tokio::test]
async fn creating_a_listing_needs_an_owner_token() {
    let (app, _dir) = build_test_app();

    let (status, _) = send(&app, Method::POST, "/api/billboards", None, Some(new_listing("1"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let advertiser = login(&app, "advertiser@example.com").await;
    let (status, _) =
        send(&app, Method::POST, "/api/billboards", Some(&advertiser), Some(new_listing("2"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let owner = login(&app, "owner@example.com").await;
    let (status, _) = send(&app, Method::POST, "/api/billboards", Some(&owner), Some(new_listing("2"))).await;
    assert_eq!(status, StatusCode::FORBIDDEN, "owners list only under their own id");

    let (status, body) = send(&app, Method::POST, "/api/billboards", Some(&owner), Some(new_listing("1"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Billboard created successfully");
    let created = &body["data"];
    assert_eq!(created["id"], "61");
    assert_eq!(created["viewsCount"], 0);
    assert_eq!(created["rating"], 0.0);
    assert_eq!(created["reviewCount"], 0);
    assert_eq!(created["images"][0]["value"], "https://img.example/m.png");
}

#[tokio::test]
async fn owner_updates_and_deletes_own_listing() {
    let (app, _dir) = build_test_app();
    let owner = login(&app, "owner@example.com").await;
    let (_, body) = send(&app, Method::POST, "/api/billboards", Some(&owner), Some(new_listing("1"))).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();
    let uri = format!("/api/billboards/{id}");

    let (status, body) =
        send(&app, Method::PATCH, &uri, Some(&owner), Some(json!({ "pricePerDay": 19000 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pricePerDay"], 19000.0);
    assert_eq!(body["data"]["title"], "Digital Hoarding at Magarpatta");

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&owner), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Billboard deleted successfully");

    let (status, _) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn owner_listings_and_stats_agree() {
    let (app, _dir) = build_test_app();
    let (_, listings) = get(&app, "/api/owners/1/billboards").await;
    let (_, stats) = get(&app, "/api/owners/1/stats").await;

    let listings = listings["data"].as_array().unwrap();
    assert!(listings.iter().all(|b| b["ownerId"] == "1"));
    assert_eq!(stats["data"]["totalListings"].as_u64().unwrap() as usize, listings.len());

    let views: u64 = listings.iter().map(|b| b["viewsCount"].as_u64().unwrap()).sum();
    assert_eq!(stats["data"]["totalViews"].as_u64().unwrap(), views);
}

#[tokio::test]
async fn malformed_filter_is_a_bad_request() {
    let (app, _dir) = build_test_app();
    let filter = json!({ "sortBy": "popularity" });
    let (status, body) = send(&app, Method::POST, "/api/billboards/search", None, Some(filter)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn incomplete_listing_body_gets_an_error_envelope() {
    let (app, _dir) = build_test_app();
    let owner = login(&app, "owner@example.com").await;

    let (status, body) =
        send(&app, Method::POST, "/api/billboards", Some(&owner), Some(json!({ "ownerId": "1" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("title"));
}

#[tokio::test]
async fn patch_with_out_of_range_values_is_rejected() {
    let (app, _dir) = build_test_app();
    let owner = login(&app, "owner@example.com").await;
    let (_, body) = send(&app, Method::POST, "/api/billboards", Some(&owner), Some(new_listing("1"))).await;
    let uri = format!("/api/billboards/{}", body["data"]["id"].as_str().unwrap());

    let patch = json!({ "pricePerDay": -5, "minBookingDays": 0, "rating": 9.5 });
    let (status, body) = send(&app, Method::PATCH, &uri, Some(&owner), Some(patch)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (_, stored) = get(&app, &uri).await;
    assert_eq!(stored["data"]["pricePerDay"], 21000.0);
    assert_eq!(stored["data"]["minBookingDays"], 1);
    assert_eq!(stored["data"]["rating"], 0.0);
}

#[tokio::test]
async fn owner_id_cannot_be_patched() {
    let (app, _dir) = build_test_app();
    let owner = login(&app, "owner@example.com").await;
    let (_, body) = send(&app, Method::POST, "/api/billboards", Some(&owner), Some(new_listing("1"))).await;
    let uri = format!("/api/billboards/{}", body["data"]["id"].as_str().unwrap());

    let (status, body) =
        send(&app, Method::PATCH, &uri, Some(&owner), Some(json!({ "ownerId": "2", "title": "Renamed" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["ownerId"], "1");
    assert_eq!(body["data"]["title"], "Renamed");
}

#[tokio::test]
async fn other_owners_cannot_touch_a_listing() {
    let (app, _dir) = build_test_app();
    let owner = login(&app, "owner@example.com").await;
    let (_, body) = send(&app, Method::POST, "/api/billboards", Some(&owner), Some(new_listing("1"))).await;
    let uri = format!("/api/billboards/{}", body["data"]["id"].as_str().unwrap());

    let rival = register_owner(&app, "rival@example.com").await;
    let (status, body) =
        send(&app, Method::PATCH, &uri, Some(&rival), Some(json!({ "pricePerDay": 1 }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], false);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&rival), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["pricePerDay"], 21000.0);
}
