//! Browsing endpoints: category pages, offers and the homepage carousel

use actix_web::{web, HttpResponse};

use hm_core::domain::entities::{Listing, ListingType};
use hm_core::domain::value_objects::{FetchResult, PageCursor};
use hm_core::errors::DomainError;
use hm_shared::types::CursorPaginatedResponse;

use crate::app::AppState;
use crate::dto::{CarouselResponse, ListingResponse, PageQuery};
use crate::handlers::{handle_cursor_error, handle_domain_error, invalid_category};

/// Handler for GET /api/v1/categories/{category}/listings
///
/// Returns one page of `rent` or `sale` listings, newest first. Pass the
/// `next_cursor` of a response as `?cursor=` to get the following page.
///
/// ## Errors
/// - 400 Bad Request: Unknown category or malformed cursor
/// - 503 Service Unavailable: Listings could not be fetched
pub async fn category_listings(
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let category = path.into_inner();
    let Ok(listing_type) = category.parse::<ListingType>() else {
        return invalid_category(&category);
    };
    let after = match decode_cursor(&query) {
        Ok(after) => after,
        Err(response) => return response,
    };

    match state.browse.category_page(listing_type, after).await {
        Ok(page) => page_response(page),
        Err(e) => handle_domain_error(&DomainError::from(e)),
    }
}

/// Handler for GET /api/v1/offers
///
/// Returns one page of discounted listings, newest first.
pub async fn offers(query: web::Query<PageQuery>, state: web::Data<AppState>) -> HttpResponse {
    let after = match decode_cursor(&query) {
        Ok(after) => after,
        Err(response) => return response,
    };

    match state.browse.offers_page(after).await {
        Ok(page) => page_response(page),
        Err(e) => handle_domain_error(&DomainError::from(e)),
    }
}

/// Handler for GET /api/v1/listings/recent
///
/// Slides of the homepage carousel.
pub async fn recent(state: web::Data<AppState>) -> HttpResponse {
    match state.carousel.load().await {
        Ok(carousel) => HttpResponse::Ok().json(CarouselResponse::from(carousel)),
        Err(e) => handle_domain_error(&DomainError::from(e)),
    }
}

fn decode_cursor(query: &PageQuery) -> Result<Option<PageCursor>, HttpResponse> {
    match query.cursor.as_deref().filter(|token| !token.is_empty()) {
        Some(token) => PageCursor::decode(token)
            .map(Some)
            .map_err(|e| handle_cursor_error(&e)),
        None => Ok(None),
    }
}

fn page_response(page: FetchResult<Listing>) -> HttpResponse {
    let next_cursor = match page.next_cursor.as_ref().map(PageCursor::encode).transpose() {
        Ok(token) => token,
        Err(e) => return handle_cursor_error(&e),
    };
    let data: Vec<ListingResponse> = page.items.into_iter().map(ListingResponse::from).collect();
    HttpResponse::Ok().json(CursorPaginatedResponse::new(data, next_cursor))
}
