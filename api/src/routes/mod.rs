//! Route handlers
//!
//! - Health check
//! - Browsing (categories, offers, carousel)
//! - Profile (own listings, account details)

pub mod health;
pub mod listings;
pub mod profile;

use actix_web::web;

/// Register the `/api/v1` routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route(
                "/categories/{category}/listings",
                web::get().to(listings::category_listings),
            )
            .route("/offers", web::get().to(listings::offers))
            .route("/listings/recent", web::get().to(listings::recent))
            .service(
                web::scope("/users/{user_id}")
                    .route("/listings", web::get().to(profile::my_listings))
                    .route("/listings", web::post().to(profile::create_listing))
                    .route("/listings/{id}", web::patch().to(profile::update_listing))
                    .route("/listings/{id}", web::delete().to(profile::delete_listing))
                    .route("/profile", web::put().to(profile::update_profile)),
            ),
    );
}
