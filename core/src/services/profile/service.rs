//! Profile service: the signed-in user's listings and account details

use std::sync::Arc;
use uuid::Uuid;

use hm_shared::utils::validation::Validate;

use crate::domain::entities::{
    Listing, ListingChanges, ListingDraft, ProfileDetails, UserProfile, LISTINGS_COLLECTION,
    USERS_COLLECTION,
};
use crate::domain::value_objects::FromDocument;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::DocumentStore;

use crate::services::browse::owner_request;
use crate::services::fetcher::PaginatedFetcher;

/// Operations behind the profile screen
///
/// Callers pass the id of the authenticated user as `owner`; establishing
/// that identity happens outside this service.
pub struct ProfileService<S: DocumentStore + ?Sized> {
    fetcher: PaginatedFetcher<S>,
}

impl<S: DocumentStore + ?Sized> ProfileService<S> {
    pub fn new(fetcher: PaginatedFetcher<S>) -> Self {
        Self { fetcher }
    }

    fn store(&self) -> &Arc<S> {
        self.fetcher.store()
    }

    /// All listings owned by `user_id`, newest first
    pub async fn my_listings(&self, user_id: &str) -> DomainResult<Vec<Listing>> {
        let page = self.fetcher.fetch_page::<Listing>(&owner_request(user_id)).await?;
        Ok(page.items)
    }

    /// Publish a new listing owned by `owner`
    pub async fn create_listing(&self, owner: &str, draft: ListingDraft) -> DomainResult<Listing> {
        draft.validate()?;

        let listing = Listing::from_draft(Uuid::new_v4().to_string(), owner, draft);
        self.store()
            .insert(LISTINGS_COLLECTION, listing.to_document())
            .await?;

        tracing::info!(
            listing_id = %listing.id,
            owner = %owner,
            event = "listing_created",
            "Listing created"
        );
        Ok(listing)
    }

    /// Edit a listing owned by `owner`
    pub async fn update_listing(
        &self,
        owner: &str,
        id: &str,
        changes: ListingChanges,
    ) -> DomainResult<Listing> {
        let mut listing = self.owned_listing(owner, id).await?;

        listing.apply(changes);
        listing.to_draft().validate()?;

        self.store()
            .update(LISTINGS_COLLECTION, id, listing.to_fields())
            .await?;

        tracing::info!(listing_id = %id, owner = %owner, event = "listing_updated", "Listing updated");
        Ok(listing)
    }

    /// Remove a listing owned by `owner`
    pub async fn delete_listing(&self, owner: &str, id: &str) -> DomainResult<()> {
        self.owned_listing(owner, id).await?;

        if !self.store().delete(LISTINGS_COLLECTION, id).await? {
            return Err(not_found_listing());
        }

        tracing::info!(listing_id = %id, owner = %owner, event = "listing_deleted", "Listing deleted");
        Ok(())
    }

    /// Stored account details, `None` when never saved
    pub async fn profile(&self, user_id: &str) -> DomainResult<Option<UserProfile>> {
        match self.store().get(USERS_COLLECTION, user_id).await? {
            Some(document) => Ok(Some(UserProfile::from_document(document)?)),
            None => Ok(None),
        }
    }

    /// Save name and e-mail of `user_id`
    ///
    /// Nothing is written when the stored details already match.
    pub async fn update_details(
        &self,
        user_id: &str,
        details: ProfileDetails,
    ) -> DomainResult<UserProfile> {
        let details = details.normalized();
        details.validate()?;

        if let Some(existing) = self.profile(user_id).await? {
            if !existing.differs_from(&details) {
                tracing::debug!(user_id = %user_id, "Profile unchanged, skipping write");
                return Ok(existing);
            }
        }

        let profile = UserProfile::new(user_id, details);
        self.store()
            .upsert(USERS_COLLECTION, user_id, profile.to_fields())
            .await?;

        tracing::info!(user_id = %user_id, event = "profile_updated", "Profile details updated");
        Ok(profile)
    }

    async fn owned_listing(&self, owner: &str, id: &str) -> DomainResult<Listing> {
        let document = self
            .store()
            .get(LISTINGS_COLLECTION, id)
            .await?
            .ok_or_else(not_found_listing)?;
        let listing = Listing::from_document(document)?;

        if !listing.is_owned_by(owner) {
            tracing::warn!(
                listing_id = %id,
                owner = %owner,
                event = "ownership_denied",
                "Attempt to modify a listing of another user"
            );
            return Err(DomainError::Unauthorized);
        }
        Ok(listing)
    }
}

fn not_found_listing() -> DomainError {
    DomainError::NotFound {
        resource: "Listing".to_string(),
    }
}
