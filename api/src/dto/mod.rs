//! Request and response bodies of the HTTP API

pub mod listing;
pub mod profile;

pub use listing::{CarouselResponse, ListingResponse, PageQuery};
pub use profile::{ProfileResponse, UpdateProfileRequest};
