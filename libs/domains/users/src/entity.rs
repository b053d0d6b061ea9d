use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sea-ORM Entity for the users table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for crate::models::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            created_at: model.created_at.into(),
        }
    }
}

// id and created_at stay NotSet so the database defaults fill them in
impl From<crate::models::CreateUser> for ActiveModel {
    fn from(input: crate::models::CreateUser) -> Self {
        ActiveModel {
            id: NotSet,
            email: Set(input.email),
            name: Set(input.name),
            created_at: NotSet,
        }
    }
}

impl ActiveModel {
    /// Build an update for the row `id` touching only the provided fields
    pub fn for_update(id: i32, input: crate::models::UpdateUser) -> Self {
        ActiveModel {
            id: sea_orm::ActiveValue::Unchanged(id),
            email: input.email.map(Set).unwrap_or(NotSet),
            // Some(None) writes NULL
            name: input.name.map(Set).unwrap_or(NotSet),
            created_at: NotSet,
        }
    }
}
