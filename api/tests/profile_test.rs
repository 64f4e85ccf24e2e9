//! Integration tests for the profile endpoints

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use hm_api::create_app;
use hm_core::domain::entities::ListingType;
use hm_shared::config::CorsConfig;

use common::{listing, state_with};

fn draft() -> Value {
    json!({
        "type": "sale",
        "name": "Garden house",
        "offer": true,
        "imageUrls": ["https://img.example.com/house.jpg"],
        "regularPrice": 350000,
        "discountedPrice": 320000,
        "bedrooms": 4
    })
}

#[actix_web::test]
async fn test_create_then_list_own_listings() {
    let (state, _) = state_with(&[listing("b1", 1, ListingType::Rent, false, "bob")]).await;
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/alice/listings")
        .set_json(draft())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["data"]["userRef"], "alice");
    assert_eq!(created["data"]["priceLabel"], "$320000");

    let req = test::TestRequest::get()
        .uri("/api/v1/users/alice/listings")
        .to_request();
    let mine: Value = test::call_and_read_body_json(&app, req).await;
    let data = mine["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], created["data"]["id"]);
}

#[actix_web::test]
async fn test_invalid_draft_is_rejected() {
    let (state, _) = state_with(&[]).await;
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let mut invalid = draft();
    invalid["imageUrls"] = json!([]);

    let req = test::TestRequest::post()
        .uri("/api/v1/users/alice/listings")
        .set_json(invalid)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_foreign_listing_cannot_be_changed() {
    let (state, store) = state_with(&[listing("b1", 1, ListingType::Rent, false, "bob")]).await;
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::patch()
        .uri("/api/v1/users/alice/listings/b1")
        .set_json(json!({ "name": "Mine now" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri("/api/v1/users/alice/listings/b1")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    assert_eq!(store.count("listings").await, 1);
}

#[actix_web::test]
async fn test_edit_and_delete_own_listing() {
    let (state, store) = state_with(&[listing("b1", 1, ListingType::Rent, true, "bob")]).await;
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::patch()
        .uri("/api/v1/users/bob/listings/b1")
        .set_json(json!({ "offer": false, "name": "Quiet flat" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["name"], "Quiet flat");
    assert!(body["data"].get("discountedPrice").is_none());

    let req = test::TestRequest::delete()
        .uri("/api/v1/users/bob/listings/b1")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::delete()
        .uri("/api/v1/users/bob/listings/b1")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(store.count("listings").await, 0);
}

#[actix_web::test]
async fn test_update_profile_details() {
    let (state, _) = state_with(&[]).await;
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::put()
        .uri("/api/v1/users/u1/profile")
        .set_json(json!({ "name": "Ana", "email": "ana@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "ana@example.com");

    let req = test::TestRequest::put()
        .uri("/api/v1/users/u1/profile")
        .set_json(json!({ "name": "Ana", "email": "not-an-email" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_malformed_body_is_bad_request() {
    let (state, _) = state_with(&[]).await;
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/alice/listings")
        .set_json(json!({ "type": "castle" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_null_clears_location() {
    let (state, _) = state_with(&[listing("b1", 1, ListingType::Sale, false, "bob")]).await;
    let app = test::init_service(create_app(state, &CorsConfig::development())).await;

    let req = test::TestRequest::patch()
        .uri("/api/v1/users/bob/listings/b1")
        .set_json(json!({ "location": null }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["data"].get("location").is_none());
    assert_eq!(body["data"]["name"], "Listing b1");

    let req = test::TestRequest::get()
        .uri("/api/v1/users/bob/listings")
        .to_request();
    let mine: Value = test::call_and_read_body_json(&app, req).await;
    assert!(mine["data"][0].get("location").is_none());
}
