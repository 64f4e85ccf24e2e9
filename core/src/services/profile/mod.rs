//! Profile screen services

mod listings;
mod service;


pub use listings::ProfileListings;
pub use service::ProfileService;
