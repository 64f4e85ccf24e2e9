//! Profile endpoints: the user's own listings and account details
//!
//! The `user_id` path segment identifies the acting user. Authenticating
//! that user is left to the deployment in front of this service.

use actix_web::{web, HttpResponse};

use hm_core::domain::entities::{ListingChanges, ListingDraft};
use hm_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::{ListingResponse, ProfileResponse, UpdateProfileRequest};
use crate::handlers::handle_domain_error;

/// Handler for GET /api/v1/users/{user_id}/listings
pub async fn my_listings(path: web::Path<String>, state: web::Data<AppState>) -> HttpResponse {
    let user_id = path.into_inner();

    match state.profile.my_listings(&user_id).await {
        Ok(listings) => {
            let data: Vec<ListingResponse> = listings.into_iter().map(Into::into).collect();
            HttpResponse::Ok().json(ApiResponse::success(data))
        }
        Err(e) => handle_domain_error(&e),
    }
}

/// Handler for POST /api/v1/users/{user_id}/listings
///
/// ## Errors
/// - 400 Bad Request: Draft failed validation
pub async fn create_listing(
    path: web::Path<String>,
    body: web::Json<ListingDraft>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let user_id = path.into_inner();

    match state.profile.create_listing(&user_id, body.into_inner()).await {
        Ok(listing) => {
            log::info!("Listing {} created by {}", listing.id, user_id);
            HttpResponse::Created().json(ApiResponse::success(ListingResponse::from(listing)))
        }
        Err(e) => handle_domain_error(&e),
    }
}

/// Handler for PATCH /api/v1/users/{user_id}/listings/{id}
///
/// ## Errors
/// - 403 Forbidden: Listing belongs to another user
/// - 404 Not Found: Unknown listing
pub async fn update_listing(
    path: web::Path<(String, String)>,
    body: web::Json<ListingChanges>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let (user_id, listing_id) = path.into_inner();

    match state
        .profile
        .update_listing(&user_id, &listing_id, body.into_inner())
        .await
    {
        Ok(listing) => HttpResponse::Ok().json(ApiResponse::success(ListingResponse::from(listing))),
        Err(e) => handle_domain_error(&e),
    }
}

/// Handler for DELETE /api/v1/users/{user_id}/listings/{id}
pub async fn delete_listing(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let (user_id, listing_id) = path.into_inner();

    match state.profile.delete_listing(&user_id, &listing_id).await {
        Ok(()) => {
            log::info!("Listing {} deleted by {}", listing_id, user_id);
            HttpResponse::NoContent().finish()
        }
        Err(e) => handle_domain_error(&e),
    }
}

/// Handler for PUT /api/v1/users/{user_id}/profile
pub async fn update_profile(
    path: web::Path<String>,
    body: web::Json<UpdateProfileRequest>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let user_id = path.into_inner();

    match state
        .profile
        .update_details(&user_id, body.into_inner().into())
        .await
    {
        Ok(profile) => HttpResponse::Ok().json(ApiResponse::success(ProfileResponse::from(profile))),
        Err(e) => handle_domain_error(&e),
    }
}
