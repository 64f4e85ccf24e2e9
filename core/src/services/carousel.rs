//! Homepage carousel of the newest listings

use serde::{Deserialize, Serialize};

use crate::domain::entities::Listing;
use crate::errors::FetchFailed;
use crate::repositories::DocumentStore;

use super::browse::carousel_request;
use super::fetcher::PaginatedFetcher;

/// Delay between automatic slide changes
pub const AUTOPLAY_DELAY_MS: u64 = 3000;

/// One carousel slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub listing_id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub price_label: String,
    pub link: String,
}

impl From<&Listing> for Slide {
    fn from(listing: &Listing) -> Self {
        Self {
            listing_id: listing.id.clone(),
            name: listing.name.clone(),
            image_url: listing.cover_image().map(str::to_string),
            price_label: listing.price_label(),
            link: listing.detail_link(),
        }
    }
}

/// Rotating set of slides
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Carousel {
    slides: Vec<Slide>,
    position: usize,
}

impl Carousel {
    pub fn new(slides: Vec<Slide>) -> Self {
        Self { slides, position: 0 }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.position)
    }

    /// Move to the next slide, wrapping after the last
    pub fn advance(&mut self) -> Option<&Slide> {
        if !self.slides.is_empty() {
            self.position = (self.position + 1) % self.slides.len();
        }
        self.current()
    }

    /// Move to the previous slide, wrapping before the first
    pub fn previous(&mut self) -> Option<&Slide> {
        if !self.slides.is_empty() {
            self.position = (self.position + self.slides.len() - 1) % self.slides.len();
        }
        self.current()
    }

    pub fn into_slides(self) -> Vec<Slide> {
        self.slides
    }
}

/// Loads the carousel from the store
pub struct CarouselService<S: DocumentStore + ?Sized> {
    fetcher: PaginatedFetcher<S>,
    size: u32,
}

impl<S: DocumentStore + ?Sized> CarouselService<S> {
    pub fn new(fetcher: PaginatedFetcher<S>, size: u32) -> Self {
        Self { fetcher, size }
    }

    /// Fetch the newest listings as slides; a single page, never resumed
    pub async fn load(&self) -> Result<Carousel, FetchFailed> {
        let page = self
            .fetcher
            .fetch_page::<Listing>(&carousel_request(self.size))
            .await?;
        Ok(Carousel::new(page.items.iter().map(Slide::from).collect()))
    }
}
