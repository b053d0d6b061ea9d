use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{CreateUser, UpdateUser, User},
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository using SeaORM
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

fn write_error(err: DbErr, email: Option<&str>) -> UserError {
    with_written_email(UserError::from(err), email)
}

/// The unique-index detail names the constraint; report the email that was written instead
fn with_written_email(err: UserError, email: Option<&str>) -> UserError {
    match (err, email) {
        (UserError::DuplicateEmail(_), Some(email)) => UserError::DuplicateEmail(email.to_string()),
        (other, _) => other,
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let email = input.email.clone();
        let active_model: entity::ActiveModel = input.into();

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(|e| write_error(e, Some(&email)))?;

        tracing::info!(user_id = model.id, "Created user");
        Ok(model.into())
    }

    async fn update(&self, id: i32, input: UpdateUser) -> UserResult<User> {
        // Nothing to write: read the row back so a missing id still fails
        if input.is_empty() {
            return entity::Entity::find_by_id(id)
                .one(&self.db)
                .await?
                .map(Into::into)
                .ok_or(UserError::NotFound(id));
        }

        let email = input.email.clone();
        let model = entity::ActiveModel::for_update(id, input)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => UserError::NotFound(id),
                other => write_error(other, email.as_deref()),
            })?;

        tracing::info!(user_id = id, "Updated user");
        Ok(model.into())
    }

    async fn find_unique(&self, id: i32) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_many(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
