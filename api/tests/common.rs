//! Fixtures shared by the API integration tests
#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use chrono::{Duration, TimeZone, Utc};

use hm_api::AppState;
use hm_core::domain::entities::{Listing, ListingType, LISTINGS_COLLECTION};
use hm_core::repositories::InMemoryDocumentStore;
use hm_shared::config::AppConfig;

pub fn listing(id: &str, minute: i64, kind: ListingType, offer: bool, owner: &str) -> Listing {
    Listing {
        id: id.to_string(),
        listing_type: kind,
        name: format!("Listing {}", id),
        offer,
        user_ref: owner.to_string(),
        timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap() + Duration::minutes(minute),
        image_urls: vec![format!("https://img.example.com/{}.jpg", id)],
        regular_price: 2000,
        discounted_price: if offer { Some(1800) } else { None },
        location: Some("Harbour Street".to_string()),
        bedrooms: 3,
        bathrooms: 2,
        parking: true,
        furnished: false,
    }
}

/// `count` rent listings owned by `owner`, `r01` the oldest
pub fn rent_listings(count: usize, owner: &str) -> Vec<Listing> {
    (1..=count)
        .map(|i| listing(&format!("r{:02}", i), i as i64, ListingType::Rent, false, owner))
        .collect()
}

pub async fn state_with(listings: &[Listing]) -> (web::Data<AppState>, Arc<InMemoryDocumentStore>) {
    let store = Arc::new(
        InMemoryDocumentStore::with_documents(
            LISTINGS_COLLECTION,
            listings.iter().map(Listing::to_document),
        )
        .await,
    );
    let state = AppState::new(store.clone(), &AppConfig::development());
    (web::Data::new(state), store)
}
