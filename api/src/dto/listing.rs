//! Listing payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hm_core::domain::entities::{Listing, ListingType};
use hm_core::services::carousel::{Carousel, Slide, AUTOPLAY_DELAY_MS};

/// Query string of paged listing endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    /// Token returned as `next_cursor` by the previous page
    pub cursor: Option<String>,
}

/// A listing as shown on cards and detail pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub id: String,
    #[serde(rename = "type")]
    pub listing_type: ListingType,
    pub name: String,
    pub offer: bool,
    pub user_ref: String,
    pub timestamp: DateTime<Utc>,
    pub image_urls: Vec<String>,
    pub regular_price: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounted_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking: bool,
    pub furnished: bool,
    /// Formatted display price
    pub price_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub link: String,
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        let price_label = listing.price_label();
        let cover_image = listing.cover_image().map(str::to_string);
        let link = listing.detail_link();
        Self {
            id: listing.id,
            listing_type: listing.listing_type,
            name: listing.name,
            offer: listing.offer,
            user_ref: listing.user_ref,
            timestamp: listing.timestamp,
            image_urls: listing.image_urls,
            regular_price: listing.regular_price,
            discounted_price: listing.discounted_price,
            location: listing.location,
            bedrooms: listing.bedrooms,
            bathrooms: listing.bathrooms,
            parking: listing.parking,
            furnished: listing.furnished,
            price_label,
            cover_image,
            link,
        }
    }
}

/// Homepage carousel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselResponse {
    pub slides: Vec<Slide>,
    /// Delay between automatic slide changes
    pub autoplay_delay_ms: u64,
}

impl From<Carousel> for CarouselResponse {
    fn from(carousel: Carousel) -> Self {
        Self {
            slides: carousel.into_slides(),
            autoplay_delay_ms: AUTOPLAY_DELAY_MS,
        }
    }
}
