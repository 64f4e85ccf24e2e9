//! Account details shown and edited on the profile page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hm_shared::utils::validation::{validators, Validate, ValidationErrors};

use crate::domain::value_objects::{Document, FieldValue, Fields, FromDocument};
use crate::errors::DocumentError;

/// Collection holding one document per user
pub const USERS_COLLECTION: &str = "users";

pub mod fields {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const TIMESTAMP: &str = "timestamp";
}

/// Stored account details of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User id, also the document id
    pub id: String,
    pub name: String,
    pub email: String,
    /// Last time the details were written
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(id: impl Into<String>, details: ProfileDetails) -> Self {
        Self {
            id: id.into(),
            name: details.name,
            email: details.email,
            updated_at: Utc::now(),
        }
    }

    /// Whether saving `details` would change anything
    pub fn differs_from(&self, details: &ProfileDetails) -> bool {
        self.name != details.name || self.email != details.email
    }

    pub fn to_fields(&self) -> Fields {
        let mut map = Fields::new();
        map.insert(fields::NAME.into(), self.name.clone().into());
        map.insert(fields::EMAIL.into(), self.email.clone().into());
        map.insert(fields::TIMESTAMP.into(), self.updated_at.into());
        map
    }
}

impl FromDocument for UserProfile {
    fn from_document(document: Document) -> Result<Self, DocumentError> {
        let string = |field: &str| -> Result<String, DocumentError> {
            document
                .require(field)?
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| DocumentError::wrong_type(&document.id, field, "string"))
        };
        let name = string(fields::NAME)?;
        let email = string(fields::EMAIL)?;
        let updated_at = document
            .get(fields::TIMESTAMP)
            .and_then(FieldValue::as_timestamp)
            .unwrap_or_else(Utc::now);

        Ok(Self {
            id: document.id,
            name,
            email,
            updated_at,
        })
    }
}

/// Editable account details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDetails {
    pub name: String,
    pub email: String,
}

impl ProfileDetails {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Trim surrounding whitespace before validation and storage
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
        }
    }
}

impl Validate for ProfileDetails {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if !validators::not_empty(&self.name) {
            errors.add_error(fields::NAME, "Name is required", "REQUIRED");
        }
        if !validators::is_valid_email(&self.email) {
            errors.add_error(fields::EMAIL, "Invalid email format", "INVALID_EMAIL");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_document_conversion() {
        let profile = UserProfile::new("u1", ProfileDetails::new("Jane", "jane@example.com"));
        let doc = Document::with_fields("u1", profile.to_fields());
        assert_eq!(UserProfile::from_document(doc).unwrap(), profile);
    }

    #[test]
    fn test_details_validation() {
        assert!(ProfileDetails::new("Jane", "jane@example.com").validate().is_ok());
        let errors = ProfileDetails::new("", "not-an-email").validate().unwrap_err();
        assert!(errors.has_field(fields::NAME));
        assert!(errors.has_field(fields::EMAIL));
    }

    #[test]
    fn test_normalized_and_differs() {
        let details = ProfileDetails::new("  Jane ", " Jane@Example.com ").normalized();
        assert_eq!(details, ProfileDetails::new("Jane", "jane@example.com"));

        let profile = UserProfile::new("u1", details.clone());
        assert!(!profile.differs_from(&details));
        assert!(profile.differs_from(&ProfileDetails::new("Janet", "jane@example.com")));
    }
}
