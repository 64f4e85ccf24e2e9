//! Application state and factory
//!
//! This module handles the initialization of the application state
//! and provides the factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpResponse};

use hm_core::repositories::DocumentStore;
use hm_core::services::{
    BrowseService, CarouselService, FetcherConfig, PaginatedFetcher, ProfileService,
};
use hm_shared::config::{AppConfig, CorsConfig};
use hm_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::create_cors;
use crate::routes::{self, health::health_check};

/// Services shared by all workers
pub struct AppState {
    pub browse: BrowseService<dyn DocumentStore>,
    pub carousel: CarouselService<dyn DocumentStore>,
    pub profile: ProfileService<dyn DocumentStore>,
    /// Name of the store backend, reported by the health check
    pub store_backend: &'static str,
}

impl AppState {
    /// Wire the services over one store handle
    pub fn new(store: Arc<dyn DocumentStore>, config: &AppConfig) -> Self {
        let fetcher = PaginatedFetcher::new(store.clone(), FetcherConfig::from(&config.store));
        Self {
            browse: BrowseService::new(fetcher.clone(), config.feeds.clone()),
            carousel: CarouselService::new(fetcher.clone(), config.feeds.carousel_size),
            profile: ProfileService::new(fetcher),
            store_backend: store.backend_name(),
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
    cors: &CorsConfig,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().error_handler(|err, _req| {
            let message = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest()
                    .json(ErrorResponse::new(error_codes::BAD_REQUEST, message)),
            )
            .into()
        }))
        .wrap(Logger::default())
        .wrap(create_cors(cors))
        .route("/health", web::get().to(health_check))
        .configure(routes::configure)
        .default_service(web::route().to(not_found))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
