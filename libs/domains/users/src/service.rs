use std::sync::Arc;

use crate::error::UserResult;
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::UserRepository;

/// Service layer for User records
///
/// Each method forwards to exactly one repository call and returns its
/// outcome as-is: no validation, no retries, no error translation.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new user
    pub async fn create_user(&self, data: CreateUser) -> UserResult<User> {
        self.repository.create(data).await
    }

    /// Update the user with the given id
    pub async fn update_user(&self, id: i32, data: UpdateUser) -> UserResult<User> {
        self.repository.update(id, data).await
    }

    /// Get a user by id; `None` when no such row exists
    pub async fn get_user(&self, id: i32) -> UserResult<Option<User>> {
        self.repository.find_unique(id).await
    }

    /// List every user in insertion order
    pub async fn get_users(&self) -> UserResult<Vec<User>> {
        self.repository.find_many().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UserError;
    use crate::repository::MockUserRepository;
    use chrono::{DateTime, Utc};
    use mockall::predicate::eq;

    fn timestamp() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn user(id: i32, email: &str, name: &str) -> User {
        User {
            id,
            email: email.to_string(),
            name: Some(name.to_string()),
            created_at: timestamp(),
        }
    }

    fn unreachable() -> UserError {
        UserError::Unavailable("Database unreachable".to_string())
    }

    #[tokio::test]
    async fn test_create_user_returns_created_row() {
        let mut mock_repo = MockUserRepository::new();
        let user_data = CreateUser {
            email: "test@example.com".to_string(),
            name: Some("Test User".to_string()),
        };
        let created = user(1, "test@example.com", "Test User");

        let returned = created.clone();
        mock_repo
            .expect_create()
            .with(eq(user_data.clone()))
            .times(1)
            .returning(move |_| Ok(returned.clone()));

        let service = UserService::new(mock_repo);
        let result = service.create_user(user_data).await.unwrap();

        assert_eq!(result, created);
    }

    #[tokio::test]
    async fn test_create_user_propagates_duplicate_email() {
        let mut mock_repo = MockUserRepository::new();
        let user_data = CreateUser {
            email: "test@example.com".to_string(),
            name: Some("Test User".to_string()),
        };

        mock_repo
            .expect_create()
            .times(1)
            .returning(|input| Err(UserError::DuplicateEmail(input.email)));

        let service = UserService::new(mock_repo);
        let err = service.create_user(user_data).await.unwrap_err();

        assert_eq!(
            err,
            UserError::DuplicateEmail("test@example.com".to_string())
        );
        assert_eq!(
            err.to_string(),
            "User with email 'test@example.com' already exists"
        );
    }

    #[tokio::test]
    async fn test_update_user_forwards_id_and_data() {
        let mut mock_repo = MockUserRepository::new();
        let updated_data = UpdateUser {
            email: Some("updated@example.com".to_string()),
            name: None,
        };
        let updated = user(1, "updated@example.com", "Test User");

        let returned = updated.clone();
        mock_repo
            .expect_update()
            .with(eq(1), eq(updated_data.clone()))
            .times(1)
            .returning(move |_, _| Ok(returned.clone()));

        let service = UserService::new(mock_repo);
        let result = service.update_user(1, updated_data).await.unwrap();

        assert_eq!(result, updated);
    }

    #[tokio::test]
    async fn test_update_user_propagates_unreachable() {
        let mut mock_repo = MockUserRepository::new();
        let updated_data = UpdateUser {
            email: Some("updated@example.com".to_string()),
            name: Some(Some("Updated User".to_string())),
        };

        mock_repo
            .expect_update()
            .times(1)
            .returning(|_, _| Err(unreachable()));

        let service = UserService::new(mock_repo);
        let err = service.update_user(1, updated_data).await.unwrap_err();

        assert_eq!(err, unreachable());
    }

    #[tokio::test]
    async fn test_update_user_propagates_not_found() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_update()
            .with(eq(99), eq(UpdateUser::default()))
            .times(1)
            .returning(|id, _| Err(UserError::NotFound(id)));

        let service = UserService::new(mock_repo);
        let err = service
            .update_user(99, UpdateUser::default())
            .await
            .unwrap_err();

        assert_eq!(err, UserError::NotFound(99));
    }

    #[tokio::test]
    async fn test_get_user_returns_row() {
        let mut mock_repo = MockUserRepository::new();
        let found = user(1, "test@example.com", "Test User");

        let returned = found.clone();
        mock_repo
            .expect_find_unique()
            .with(eq(1))
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = UserService::new(mock_repo);
        let result = service.get_user(1).await.unwrap();

        assert_eq!(result, Some(found));
    }

    #[tokio::test]
    async fn test_get_user_absence_is_not_an_error() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_unique()
            .with(eq(404))
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(mock_repo);
        let result = service.get_user(404).await;

        assert_eq!(result, Ok(None));
    }

    #[tokio::test]
    async fn test_get_user_propagates_unreachable() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_unique()
            .times(1)
            .returning(|_| Err(unreachable()));

        let service = UserService::new(mock_repo);
        let err = service.get_user(1).await.unwrap_err();

        assert_eq!(err, unreachable());
    }

    #[tokio::test]
    async fn test_get_users_preserves_order() {
        let mut mock_repo = MockUserRepository::new();
        let users = vec![
            user(1, "user1@example.com", "User One"),
            user(2, "user2@example.com", "User Two"),
        ];

        let returned = users.clone();
        mock_repo
            .expect_find_many()
            .times(1)
            .returning(move || Ok(returned.clone()));

        let service = UserService::new(mock_repo);
        let result = service.get_users().await.unwrap();

        assert_eq!(result, users);
        assert_eq!(result[0].email, "user1@example.com");
        assert_eq!(result[1].email, "user2@example.com");
    }

    #[tokio::test]
    async fn test_get_users_propagates_unreachable() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_many()
            .times(1)
            .returning(|| Err(unreachable()));

        let service = UserService::new(mock_repo);
        let err = service.get_users().await.unwrap_err();

        assert_eq!(err, unreachable());
    }

    #[tokio::test]
    async fn test_service_makes_no_extra_calls() {
        // Only find_many is expected; any other call would panic the mock
        let mut mock_repo = MockUserRepository::new();
        mock_repo
            .expect_find_many()
            .times(1)
            .returning(|| Ok(Vec::new()));

        let service = UserService::new(mock_repo);
        assert!(service.get_users().await.unwrap().is_empty());
    }
}
