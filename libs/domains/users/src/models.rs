use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// User entity - the single persisted record of this domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Identifier assigned by the datastore on insert
    pub id: i32,
    /// Email address (unique index lives in the datastore)
    pub email: String,
    /// Optional display name
    pub name: Option<String>,
    /// Insert timestamp assigned by the datastore
    pub created_at: DateTime<Utc>,
}

/// DTO for creating a new user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateUser {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// DTO for a partial update. `None` leaves the field untouched.
///
/// `name` is nullable: a missing key is `None`, an explicit `null` is
/// `Some(None)` and clears the stored name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub name: Option<Option<String>>,
}

/// Any present value, `null` included, becomes `Some(_)`; serde's `default`
/// covers the missing-key case.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl UpdateUser {
    /// True when the update carries no fields to change
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none()
    }
}

impl User {
    /// Merge the fields of an UpdateUser into this record.
    ///
    /// `id` and `created_at` are never touched.
    pub fn apply_update(&mut self, update: UpdateUser) {
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
    }
}
