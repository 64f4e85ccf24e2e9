//! Integration tests for the browsing endpoints

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::Value;

use hm_api::create_app;
use hm_core::domain::entities::ListingType;
use hm_shared::config::CorsConfig;

use common::{listing, rent_listings, state_with};

#[actix_web::test]
async fn test_health_reports_store_backend() {
    let (state, _) = state_with(&[]).await;
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");
}

#[actix_web::test]
async fn test_category_pages_follow_cursor() {
    let mut listings = rent_listings(12, "owner");
    listings.push(listing("s01", 40, ListingType::Sale, false, "owner"));
    let (state, _) = state_with(&listings).await;
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/categories/rent/listings")
        .to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(first["data"].as_array().unwrap().len(), 10);
    assert_eq!(first["data"][0]["id"], "r12");
    assert_eq!(first["data"][0]["priceLabel"], "$2000 / month");
    assert_eq!(first["data"][0]["link"], "category/rent/r12");
    assert_eq!(first["has_more"], true);
    let cursor = first["next_cursor"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/categories/rent/listings?cursor={}", cursor))
        .to_request();
    let second: Value = test::call_and_read_body_json(&app, req).await;

    let ids: Vec<&str> = second["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["r02", "r01"]);
    assert_eq!(second["has_more"], false);
    assert!(second.get("next_cursor").is_none());
}

#[actix_web::test]
async fn test_unknown_category_is_bad_request() {
    let (state, _) = state_with(&[]).await;
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/categories/land/listings")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_CATEGORY");
}

#[actix_web::test]
async fn test_malformed_cursor_is_rejected() {
    let (state, _) = state_with(&rent_listings(3, "owner")).await;
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/offers?cursor=not-a-cursor")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_CURSOR");
}

#[actix_web::test]
async fn test_no_offers_is_an_empty_page() {
    let (state, _) = state_with(&rent_listings(3, "owner")).await;
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::get().uri("/api/v1/offers").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"], serde_json::json!([]));
    assert_eq!(body["has_more"], false);
}

#[actix_web::test]
async fn test_offers_one_per_page() {
    let listings = vec![
        listing("o1", 1, ListingType::Rent, true, "a"),
        listing("o2", 2, ListingType::Sale, true, "b"),
    ];
    let (state, _) = state_with(&listings).await;
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::get().uri("/api/v1/offers").to_request();
    let first: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(first["data"][0]["id"], "o2");
    assert_eq!(first["data"][0]["priceLabel"], "$1800");
    assert_eq!(first["has_more"], true);
}

#[actix_web::test]
async fn test_store_failure_is_service_unavailable() {
    let (state, store) = state_with(&rent_listings(3, "owner")).await;
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;
    store.set_unavailable(true);

    let req = test::TestRequest::get()
        .uri("/api/v1/categories/rent/listings")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "FETCH_FAILED");
    assert_eq!(body["message"], "Could not fetch listings");
}

#[actix_web::test]
async fn test_recent_listings_carousel() {
    let (state, _) = state_with(&rent_listings(7, "owner")).await;
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::get().uri("/api/v1/listings/recent").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let slides = body["slides"].as_array().unwrap();
    assert_eq!(slides.len(), 5);
    assert_eq!(slides[0]["listing_id"], "r07");
    assert_eq!(slides[0]["image_url"], "https://img.example.com/r07.jpg");
    assert_eq!(body["autoplay_delay_ms"], 3000);
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let (state, _) = state_with(&[]).await;
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::get().uri("/api/v2/nothing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
