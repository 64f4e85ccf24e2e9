//! Incrementally loaded listing feed
//!
//! Holds the listings accumulated for one query and the cursor of the next
//! page. A feed never holds its lock while the store is being read; a
//! single load permit and a generation counter keep overlapping loads and
//! superseded queries from corrupting the sequence. The permit is released
//! when a load finishes or its future is dropped.

use std::sync::Arc;

use tokio::sync::{Mutex, Semaphore};

use crate::domain::entities::Listing;
use crate::domain::value_objects::{FetchRequest, PageCursor};
use crate::errors::FetchFailed;
use crate::repositories::DocumentStore;

use super::fetcher::PaginatedFetcher;

/// Notification recorded on a feed after a failed load
pub const FETCH_FAILED_NOTICE: &str = "Could not fetch listings";

/// Result of a load request that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was fetched and applied
    Loaded {
        appended: usize,
        end_of_results: bool,
    },
    /// Another load is pending; nothing was requested
    InFlight,
    /// The previous page was the last one; nothing was requested
    Exhausted,
    /// The feed was reset while this load was pending; the page was dropped
    Stale,
}

/// Snapshot of a feed for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct FeedView {
    pub items: Vec<Listing>,
    pub loading: bool,
    /// The first page came back without any listing
    pub empty: bool,
    pub end_of_results: bool,
    pub notification: Option<String>,
}

#[derive(Debug)]
struct FeedState {
    request: FetchRequest,
    items: Vec<Listing>,
    next_cursor: Option<PageCursor>,
    loaded: bool,
    /// One permit per query; held by the pending load
    loads: Arc<Semaphore>,
    generation: u64,
    notification: Option<String>,
}

impl FeedState {
    fn new(request: FetchRequest, generation: u64) -> Self {
        Self {
            request,
            items: Vec::new(),
            next_cursor: None,
            loaded: false,
            loads: Arc::new(Semaphore::new(1)),
            generation,
            notification: None,
        }
    }

    fn exhausted(&self) -> bool {
        self.loaded && self.next_cursor.is_none()
    }

    fn loading(&self) -> bool {
        self.loads.available_permits() == 0
    }
}

/// A listing sequence grown page by page
pub struct ListingFeed<S: DocumentStore + ?Sized> {
    fetcher: PaginatedFetcher<S>,
    state: Mutex<FeedState>,
}

impl<S: DocumentStore + ?Sized> ListingFeed<S> {
    pub fn new(fetcher: PaginatedFetcher<S>, request: FetchRequest) -> Self {
        Self {
            fetcher,
            state: Mutex::new(FeedState::new(request, 0)),
        }
    }

    /// Fetch the first page, replacing whatever the feed holds
    pub async fn load_initial(&self) -> Result<LoadOutcome, FetchFailed> {
        self.load(false).await
    }

    /// Fetch the page after the last one and append it
    ///
    /// Behaves as [`load_initial`](Self::load_initial) when nothing has been
    /// loaded yet.
    pub async fn load_more(&self) -> Result<LoadOutcome, FetchFailed> {
        self.load(true).await
    }

    /// Switch to another query, dropping the accumulated listings
    ///
    /// A load still pending for the previous query will come back `Stale`.
    pub async fn reset(&self, request: FetchRequest) {
        let mut state = self.state.lock().await;
        let generation = state.generation + 1;
        *state = FeedState::new(request, generation);
        tracing::debug!(generation, "Feed reset");
    }

    pub async fn view(&self) -> FeedView {
        let state = self.state.lock().await;
        FeedView {
            items: state.items.clone(),
            loading: state.loading(),
            empty: state.loaded && state.items.is_empty(),
            end_of_results: state.exhausted(),
            notification: state.notification.clone(),
        }
    }

    /// Drop the pending notification once it has been shown
    pub async fn dismiss_notification(&self) {
        self.state.lock().await.notification = None;
    }

    async fn load(&self, append: bool) -> Result<LoadOutcome, FetchFailed> {
        let (request, generation, append, _permit) = {
            let state = self.state.lock().await;
            let Ok(permit) = Arc::clone(&state.loads).try_acquire_owned() else {
                return Ok(LoadOutcome::InFlight);
            };
            let append = append && state.loaded;
            if append && state.exhausted() {
                return Ok(LoadOutcome::Exhausted);
            }
            let after = if append { state.next_cursor.clone() } else { None };
            (state.request.resume(after), state.generation, append, permit)
        };

        let result = self.fetcher.fetch_page::<Listing>(&request).await;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            tracing::debug!(
                collection = %request.collection,
                generation,
                current = state.generation,
                "Discarding page of a superseded query"
            );
            return Ok(LoadOutcome::Stale);
        }

        match result {
            Ok(page) => {
                let appended = page.items.len();
                if append {
                    state.items.extend(page.items);
                } else {
                    state.items = page.items;
                }
                state.next_cursor = page.next_cursor;
                state.loaded = true;
                state.notification = None;
                Ok(LoadOutcome::Loaded {
                    appended,
                    end_of_results: state.next_cursor.is_none(),
                })
            }
            Err(e) => {
                state.notification = Some(FETCH_FAILED_NOTICE.to_string());
                Err(e)
            }
        }
    }
}
