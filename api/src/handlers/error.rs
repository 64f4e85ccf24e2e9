//! Conversion of domain failures into HTTP error responses

use actix_web::{http::StatusCode, HttpResponse};

use hm_core::errors::{CursorError, DomainError, StoreError};
use hm_shared::errors::{error_codes, ErrorResponse};

/// Message shown to users when listings could not be read
pub const FETCH_FAILED_MESSAGE: &str = "Could not fetch listings";

fn respond(status: StatusCode, body: ErrorResponse) -> HttpResponse {
    HttpResponse::build(status).json(body)
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Fetch(failed) => {
            log::warn!("Fetch failed for {}: {}", failed.collection, failed.message);
            respond(
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new(error_codes::FETCH_FAILED, FETCH_FAILED_MESSAGE),
            )
        }
        DomainError::Validation { message } => respond(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message.as_str()),
        ),
        DomainError::NotFound { resource } => respond(
            StatusCode::NOT_FOUND,
            ErrorResponse::new(error_codes::NOT_FOUND, format!("{} not found", resource)),
        ),
        DomainError::Unauthorized => respond(
            StatusCode::FORBIDDEN,
            ErrorResponse::new(
                error_codes::FORBIDDEN,
                "You can only change your own listings",
            ),
        ),
        DomainError::Cursor(e) => handle_cursor_error(e),
        DomainError::Store(StoreError::NotFound { collection, id }) => respond(
            StatusCode::NOT_FOUND,
            ErrorResponse::new(error_codes::NOT_FOUND, format!("{}/{} not found", collection, id)),
        ),
        DomainError::Store(StoreError::Conflict { .. }) => respond(
            StatusCode::CONFLICT,
            ErrorResponse::new(error_codes::BAD_REQUEST, error.to_string()),
        ),
        DomainError::Store(e) => {
            log::error!("Store error: {}", e);
            respond(
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorResponse::new(error_codes::STORE_ERROR, "The data store is unavailable"),
            )
        }
        DomainError::Document(e) => {
            log::error!("Undecodable document: {}", e);
            internal_error()
        }
        DomainError::Internal { message } => {
            log::error!("Internal error: {}", message);
            internal_error()
        }
    }
}

/// A continuation token could not be decoded, or not be produced for a page
pub fn handle_cursor_error(error: &CursorError) -> HttpResponse {
    match error {
        CursorError::Invalid { .. } => respond(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::INVALID_CURSOR, error.to_string()),
        ),
        CursorError::Encode { reason } => {
            log::error!("Cursor encoding failed: {}", reason);
            internal_error()
        }
    }
}

/// Unknown category path segment
pub fn invalid_category(category: &str) -> HttpResponse {
    respond(
        StatusCode::BAD_REQUEST,
        ErrorResponse::new(
            error_codes::INVALID_CATEGORY,
            format!("Unknown category '{}', expected 'rent' or 'sale'", category),
        ),
    )
}

fn internal_error() -> HttpResponse {
    respond(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use hm_core::errors::FetchFailed;

    #[test]
    fn test_status_mapping() {
        let cases = vec![
            (DomainError::Fetch(FetchFailed::new("listings", "timeout")), StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::Validation { message: "bad".into() }, StatusCode::BAD_REQUEST),
            (DomainError::NotFound { resource: "Listing".into() }, StatusCode::NOT_FOUND),
            (DomainError::Unauthorized, StatusCode::FORBIDDEN),
            (DomainError::Cursor(CursorError::invalid("junk")), StatusCode::BAD_REQUEST),
            (DomainError::Cursor(CursorError::encode("broken")), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::Store(StoreError::unavailable("down")), StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::Internal { message: "x".into() }, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(handle_domain_error(&error).status(), status, "{:?}", error);
        }
    }

    #[test]
    fn test_invalid_category_is_bad_request() {
        assert_eq!(invalid_category("land").status(), StatusCode::BAD_REQUEST);
    }
}
