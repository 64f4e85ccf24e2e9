//! Domain entities representing core business objects.

pub mod listing;
pub mod user_profile;

// Re-export commonly used types
pub use listing::{Listing, ListingChanges, ListingDraft, ListingType, LISTINGS_COLLECTION};
pub use user_profile::{ProfileDetails, UserProfile, USERS_COLLECTION};
