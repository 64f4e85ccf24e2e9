//! Business services containing domain logic and use cases.

pub mod browse;
pub mod carousel;
pub mod feed;
pub mod fetcher;
pub mod profile;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use browse::{
    carousel_request, category_request, offers_request, owner_request, BrowseService,
};
pub use carousel::{Carousel, CarouselService, Slide, AUTOPLAY_DELAY_MS};
pub use feed::{FeedView, ListingFeed, LoadOutcome, FETCH_FAILED_NOTICE};
pub use fetcher::{FetcherConfig, PaginatedFetcher};
pub use profile::{ProfileListings, ProfileService};
