//! Listing entity representing a property offered for rent or sale.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use hm_shared::utils::validation::{validators, Validate, ValidationErrors};

use crate::domain::value_objects::{Document, FieldValue, Fields, FromDocument};
use crate::errors::DocumentError;

/// Collection holding all listings
pub const LISTINGS_COLLECTION: &str = "listings";

/// Stored field names of a listing document
pub mod fields {
    pub const TYPE: &str = "type";
    pub const NAME: &str = "name";
    pub const OFFER: &str = "offer";
    pub const USER_REF: &str = "userRef";
    pub const TIMESTAMP: &str = "timestamp";
    pub const IMAGE_URLS: &str = "imageUrls";
    pub const REGULAR_PRICE: &str = "regularPrice";
    pub const DISCOUNTED_PRICE: &str = "discountedPrice";
    pub const LOCATION: &str = "location";
    pub const BEDROOMS: &str = "bedrooms";
    pub const BATHROOMS: &str = "bathrooms";
    pub const PARKING: &str = "parking";
    pub const FURNISHED: &str = "furnished";
}

/// Listing category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    Rent,
    Sale,
}

impl ListingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Rent => "rent",
            ListingType::Sale => "sale",
        }
    }
}

impl fmt::Display for ListingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ListingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rent" => Ok(ListingType::Rent),
            "sale" => Ok(ListingType::Sale),
            _ => Err(format!("Invalid listing type: {}", s)),
        }
    }
}

/// A property listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Unique identifier within the listings collection
    pub id: String,

    /// Rent or sale
    #[serde(rename = "type")]
    pub listing_type: ListingType,

    /// Title shown on cards and slides
    pub name: String,

    /// Whether a discounted price applies
    pub offer: bool,

    /// Id of the owning user
    pub user_ref: String,

    /// Creation time, the default sort key
    pub timestamp: DateTime<Utc>,

    /// Image URLs in display order
    pub image_urls: Vec<String>,

    pub regular_price: u64,

    pub discounted_price: Option<u64>,

    pub location: Option<String>,

    pub bedrooms: u32,

    pub bathrooms: u32,

    pub parking: bool,

    pub furnished: bool,
}

impl Listing {
    /// Create a listing from a draft, owned by `owner`
    pub fn from_draft(id: impl Into<String>, owner: impl Into<String>, draft: ListingDraft) -> Self {
        Self {
            id: id.into(),
            listing_type: draft.listing_type,
            name: draft.name,
            offer: draft.offer,
            user_ref: owner.into(),
            timestamp: Utc::now(),
            image_urls: draft.image_urls,
            regular_price: draft.regular_price,
            discounted_price: draft.discounted_price.filter(|_| draft.offer),
            location: draft.location,
            bedrooms: draft.bedrooms,
            bathrooms: draft.bathrooms,
            parking: draft.parking,
            furnished: draft.furnished,
        }
    }

    /// Price shown to visitors: the discounted price when there is one
    pub fn display_price(&self) -> u64 {
        self.discounted_price.unwrap_or(self.regular_price)
    }

    /// Formatted price, rentals are priced per month
    pub fn price_label(&self) -> String {
        match self.listing_type {
            ListingType::Rent => format!("${} / month", self.display_price()),
            ListingType::Sale => format!("${}", self.display_price()),
        }
    }

    /// First image, used as cover
    pub fn cover_image(&self) -> Option<&str> {
        self.image_urls.first().map(String::as_str)
    }

    /// Relative link to the listing detail page
    pub fn detail_link(&self) -> String {
        format!("category/{}/{}", self.listing_type, self.id)
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_ref == user_id
    }

    /// Editable part of the listing
    pub fn to_draft(&self) -> ListingDraft {
        ListingDraft {
            listing_type: self.listing_type,
            name: self.name.clone(),
            offer: self.offer,
            image_urls: self.image_urls.clone(),
            regular_price: self.regular_price,
            discounted_price: self.discounted_price,
            location: self.location.clone(),
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            parking: self.parking,
            furnished: self.furnished,
        }
    }

    /// Apply a partial edit
    pub fn apply(&mut self, changes: ListingChanges) {
        if let Some(listing_type) = changes.listing_type {
            self.listing_type = listing_type;
        }
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(offer) = changes.offer {
            self.offer = offer;
        }
        if let Some(image_urls) = changes.image_urls {
            self.image_urls = image_urls;
        }
        if let Some(regular_price) = changes.regular_price {
            self.regular_price = regular_price;
        }
        if let Some(discounted_price) = changes.discounted_price {
            self.discounted_price = discounted_price;
        }
        if let Some(location) = changes.location {
            self.location = location;
        }
        if let Some(bedrooms) = changes.bedrooms {
            self.bedrooms = bedrooms;
        }
        if let Some(bathrooms) = changes.bathrooms {
            self.bathrooms = bathrooms;
        }
        if let Some(parking) = changes.parking {
            self.parking = parking;
        }
        if let Some(furnished) = changes.furnished {
            self.furnished = furnished;
        }
        // A listing that is no longer on offer drops its discount
        if !self.offer {
            self.discounted_price = None;
        }
    }

    /// All stored fields except the id
    pub fn to_fields(&self) -> Fields {
        let mut map = Fields::new();
        map.insert(fields::TYPE.into(), self.listing_type.as_str().into());
        map.insert(fields::NAME.into(), self.name.clone().into());
        map.insert(fields::OFFER.into(), self.offer.into());
        map.insert(fields::USER_REF.into(), self.user_ref.clone().into());
        map.insert(fields::TIMESTAMP.into(), self.timestamp.into());
        map.insert(fields::IMAGE_URLS.into(), self.image_urls.clone().into());
        map.insert(fields::REGULAR_PRICE.into(), self.regular_price.into());
        map.insert(fields::DISCOUNTED_PRICE.into(), self.discounted_price.into());
        map.insert(fields::LOCATION.into(), self.location.clone().into());
        map.insert(fields::BEDROOMS.into(), self.bedrooms.into());
        map.insert(fields::BATHROOMS.into(), self.bathrooms.into());
        map.insert(fields::PARKING.into(), self.parking.into());
        map.insert(fields::FURNISHED.into(), self.furnished.into());
        map
    }

    pub fn to_document(&self) -> Document {
        Document::with_fields(self.id.clone(), self.to_fields())
    }
}

impl FromDocument for Listing {
    fn from_document(document: Document) -> Result<Self, DocumentError> {
        let id = document.id.as_str();

        let listing_type = document
            .require(fields::TYPE)?
            .as_str()
            .ok_or_else(|| DocumentError::wrong_type(id, fields::TYPE, "string"))?
            .parse::<ListingType>()
            .map_err(|e| DocumentError::invalid_value(id, fields::TYPE, e))?;

        let name = required_string(&document, fields::NAME)?;
        let user_ref = required_string(&document, fields::USER_REF)?;

        let timestamp = document
            .require(fields::TIMESTAMP)?
            .as_timestamp()
            .ok_or_else(|| DocumentError::wrong_type(id, fields::TIMESTAMP, "timestamp"))?;

        let regular_price = document
            .require(fields::REGULAR_PRICE)?
            .as_u64()
            .ok_or_else(|| DocumentError::wrong_type(id, fields::REGULAR_PRICE, "non-negative integer"))?;

        let discounted_price = match document.get(fields::DISCOUNTED_PRICE) {
            None | Some(FieldValue::Null) => None,
            Some(value) => Some(value.as_u64().ok_or_else(|| {
                DocumentError::wrong_type(id, fields::DISCOUNTED_PRICE, "non-negative integer")
            })?),
        };

        let image_urls = match document.get(fields::IMAGE_URLS) {
            None | Some(FieldValue::Null) => Vec::new(),
            Some(value) => value
                .as_array()
                .ok_or_else(|| DocumentError::wrong_type(id, fields::IMAGE_URLS, "array"))?
                .iter()
                .map(|url| {
                    url.as_str()
                        .map(str::to_string)
                        .ok_or_else(|| DocumentError::wrong_type(id, fields::IMAGE_URLS, "array of strings"))
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        let location = document
            .get(fields::LOCATION)
            .and_then(FieldValue::as_str)
            .map(str::to_string);

        let count = |field: &str| -> Result<u32, DocumentError> {
            match document.get(field) {
                None | Some(FieldValue::Null) => Ok(0),
                Some(value) => {
                    let n = value
                        .as_i64()
                        .ok_or_else(|| DocumentError::wrong_type(id, field, "integer"))?;
                    u32::try_from(n).map_err(|_| {
                        DocumentError::invalid_value(id, field, format!("{} is not a valid count", n))
                    })
                }
            }
        };
        let bedrooms = count(fields::BEDROOMS)?;
        let bathrooms = count(fields::BATHROOMS)?;
        let flag = |field: &str| -> bool {
            document.get(field).and_then(FieldValue::as_bool).unwrap_or(false)
        };

        Ok(Self {
            listing_type,
            name,
            offer: flag(fields::OFFER),
            user_ref,
            timestamp,
            image_urls,
            regular_price,
            discounted_price,
            location,
            bedrooms,
            bathrooms,
            parking: flag(fields::PARKING),
            furnished: flag(fields::FURNISHED),
            id: document.id,
        })
    }
}

fn required_string(document: &Document, field: &str) -> Result<String, DocumentError> {
    document
        .require(field)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DocumentError::wrong_type(&document.id, field, "string"))
}

/// Owner-supplied content of a new listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDraft {
    #[serde(rename = "type")]
    pub listing_type: ListingType,
    pub name: String,
    #[serde(default)]
    pub offer: bool,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub regular_price: u64,
    #[serde(default)]
    pub discounted_price: Option<u64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    #[serde(default)]
    pub parking: bool,
    #[serde(default)]
    pub furnished: bool,
}

impl Validate for ListingDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if !validators::not_empty(&self.name) {
            errors.add_error(fields::NAME, "Name is required", "REQUIRED");
        } else if !validators::length_between(&self.name, 1, 120) {
            errors.add_error(fields::NAME, "Name must be at most 120 characters", "LENGTH");
        }

        if self.image_urls.is_empty() {
            errors.add_error(fields::IMAGE_URLS, "At least one image is required", "REQUIRED");
        } else if self.image_urls.len() > 6 {
            errors.add_error(fields::IMAGE_URLS, "At most 6 images are allowed", "TOO_MANY");
        }
        if self.image_urls.iter().any(|url| !validators::is_valid_url(url)) {
            errors.add_error(fields::IMAGE_URLS, "Image URLs must be http(s) URLs", "INVALID_URL");
        }

        if self.regular_price == 0 {
            errors.add_error(fields::REGULAR_PRICE, "Regular price must be positive", "OUT_OF_RANGE");
        }

        match (self.offer, self.discounted_price) {
            (true, None) => errors.add_error(
                fields::DISCOUNTED_PRICE,
                "Discounted price is required for offers",
                "REQUIRED",
            ),
            (true, Some(discounted)) if discounted >= self.regular_price => errors.add_error(
                fields::DISCOUNTED_PRICE,
                "Discounted price must be below the regular price",
                "OUT_OF_RANGE",
            ),
            _ => {}
        }

        errors.into_result()
    }
}

/// Partial edit of an existing listing; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingChanges {
    #[serde(rename = "type", default)]
    pub listing_type: Option<ListingType>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub offer: Option<bool>,
    #[serde(default)]
    pub image_urls: Option<Vec<String>>,
    #[serde(default)]
    pub regular_price: Option<u64>,
    /// `Some(None)`, sent as `null`, clears the discount
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub discounted_price: Option<Option<u64>>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<Option<String>>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub parking: Option<bool>,
    #[serde(default)]
    pub furnished: Option<bool>,
}

/// A field that is present maps to `Some`, even when it is `null`
fn present_or_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
