//! Listing queries of the browsing screens

use hm_shared::config::FeedConfig;
use hm_shared::types::SortOrder;

use crate::domain::entities::{listing::fields, Listing, ListingType, LISTINGS_COLLECTION};
use crate::domain::value_objects::{FetchRequest, FetchResult, PageCursor, PageSize};
use crate::errors::FetchFailed;
use crate::repositories::DocumentStore;

use super::feed::ListingFeed;
use super::fetcher::PaginatedFetcher;

fn newest_listings() -> FetchRequest {
    FetchRequest::new(LISTINGS_COLLECTION).order_by(fields::TIMESTAMP, SortOrder::Desc)
}

/// Listings of one category, newest first
pub fn category_request(category: ListingType, page_size: u32) -> FetchRequest {
    newest_listings()
        .filter_eq(fields::TYPE, category.as_str())
        .page_size(page_size)
}

/// Listings with a discounted price, newest first
pub fn offers_request(page_size: u32) -> FetchRequest {
    newest_listings()
        .filter_eq(fields::OFFER, true)
        .page_size(page_size)
}

/// The newest listings of any kind
pub fn carousel_request(size: u32) -> FetchRequest {
    newest_listings().page_size(size)
}

/// Every listing owned by `user_id`, newest first
pub fn owner_request(user_id: &str) -> FetchRequest {
    newest_listings()
        .filter_eq(fields::USER_REF, user_id)
        .page_size(PageSize::Unbounded)
}

/// Category and offers browsing
pub struct BrowseService<S: DocumentStore + ?Sized> {
    fetcher: PaginatedFetcher<S>,
    feeds: FeedConfig,
}

impl<S: DocumentStore + ?Sized> BrowseService<S> {
    pub fn new(fetcher: PaginatedFetcher<S>, feeds: FeedConfig) -> Self {
        Self { fetcher, feeds }
    }

    /// One page of a category, resumed after `after` when given
    pub async fn category_page(
        &self,
        category: ListingType,
        after: Option<PageCursor>,
    ) -> Result<FetchResult<Listing>, FetchFailed> {
        let request = category_request(category, self.feeds.category_page_size).after(after);
        self.fetcher.fetch_page(&request).await
    }

    /// One page of offers, resumed after `after` when given
    pub async fn offers_page(
        &self,
        after: Option<PageCursor>,
    ) -> Result<FetchResult<Listing>, FetchFailed> {
        let request = offers_request(self.feeds.offers_page_size).after(after);
        self.fetcher.fetch_page(&request).await
    }

    /// Feed over a category for incremental loading
    pub fn category_feed(&self, category: ListingType) -> ListingFeed<S> {
        ListingFeed::new(
            self.fetcher.clone(),
            category_request(category, self.feeds.category_page_size),
        )
    }

    pub fn offers_feed(&self) -> ListingFeed<S> {
        ListingFeed::new(self.fetcher.clone(), offers_request(self.feeds.offers_page_size))
    }
}
