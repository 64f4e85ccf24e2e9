//! Account detail payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hm_core::domain::entities::{ProfileDetails, UserProfile};

/// Body of `PUT /users/{user_id}/profile`
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
}

impl From<UpdateProfileRequest> for ProfileDetails {
    fn from(request: UpdateProfileRequest) -> Self {
        ProfileDetails::new(request.name, request.email)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub updated_at: DateTime<Utc>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            updated_at: profile.updated_at,
        }
    }
}
