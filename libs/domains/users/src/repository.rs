use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};

/// Datastore client for User records
///
/// Mirrors the four primitives the service relies on. Errors are reported
/// as the datastore sees them; callers decide what to do with them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; the datastore assigns `id` and `created_at`
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    /// Update the row matching `id`. A missing row is `UserError::NotFound`.
    async fn update(&self, id: i32, input: UpdateUser) -> UserResult<User>;

    /// Look up a user by id. A missing row is `Ok(None)`.
    async fn find_unique(&self, id: i32) -> UserResult<Option<User>>;

    /// All users in insertion order
    async fn find_many(&self) -> UserResult<Vec<User>>;
}

#[derive(Debug, Default)]
struct Store {
    next_id: i32,
    rows: BTreeMap<i32, User>,
}

impl Store {
    fn email_taken(&self, email: &str, except: Option<i32>) -> bool {
        self.rows
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Emulates the pieces of the schema the service depends on: serial ids
/// starting at 1, insert timestamps and the unique email index.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let mut store = self.store.write().await;

        if store.email_taken(&input.email, None) {
            return Err(UserError::DuplicateEmail(input.email));
        }

        store.next_id += 1;
        let user = User {
            id: store.next_id,
            email: input.email,
            name: input.name,
            created_at: Utc::now(),
        };
        store.rows.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn update(&self, id: i32, input: UpdateUser) -> UserResult<User> {
        let mut store = self.store.write().await;

        if !store.rows.contains_key(&id) {
            return Err(UserError::NotFound(id));
        }

        if let Some(ref email) = input.email {
            if store.email_taken(email, Some(id)) {
                return Err(UserError::DuplicateEmail(email.clone()));
            }
        }

        let user = store.rows.get_mut(&id).ok_or(UserError::NotFound(id))?;
        user.apply_update(input);
        let updated = user.clone();

        tracing::info!(user_id = id, "Updated user");
        Ok(updated)
    }

    async fn find_unique(&self, id: i32) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.rows.get(&id).cloned())
    }

    async fn find_many(&self) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        Ok(store.rows.values().cloned().collect())
    }
}
