//! # HomeMarket Core
//!
//! Core business logic and domain layer for the HomeMarket backend.
//! This crate contains the listing and profile entities, the document model
//! the stores speak, the paginated fetcher and the screen services built on
//! it, and the error types shared by the outer layers.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Listing, ListingChanges, ListingDraft, ListingType, ProfileDetails, UserProfile,
    LISTINGS_COLLECTION, USERS_COLLECTION,
};
pub use domain::value_objects::{
    Document, EqualityFilter, FetchRequest, FetchResult, FieldValue, Fields, FromDocument,
    PageCursor, PageSize, StoreQuery,
};
pub use errors::{CursorError, DocumentError, DomainError, DomainResult, FetchFailed, StoreError};
pub use repositories::{DocumentStore, InMemoryDocumentStore};
pub use services::{
    BrowseService, Carousel, CarouselService, FeedView, FetcherConfig, ListingFeed, LoadOutcome,
    PaginatedFetcher, ProfileListings, ProfileService, Slide,
};
