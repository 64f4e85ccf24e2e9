//! Local state of the "your listings" section

use crate::domain::entities::Listing;

/// Listings shown on the profile screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileListings {
    items: Vec<Listing>,
}

impl ProfileListings {
    pub fn new(items: Vec<Listing>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[Listing] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop a deleted listing without refetching; `false` if it was not shown
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|listing| listing.id != id);
        self.items.len() != before
    }

    /// Put an edited listing in place of the shown one
    pub fn replace(&mut self, listing: Listing) -> bool {
        match self.items.iter_mut().find(|shown| shown.id == listing.id) {
            Some(shown) => {
                *shown = listing;
                true
            }
            None => false,
        }
    }
}
