//! User service - application use cases on top of the user store.
//!
//! This is where duplicate emails are turned away: the store only answers
//! `exists_by_email`, the schema enforces uniqueness, and this layer reports
//! either outcome as `AppError::Conflict`. Updates check and write inside one
//! serializable transaction.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewUser, User, UserChanges};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::{UnitOfWork, UserRepository};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Get user by ID
    async fn get_user(&self, id: i64) -> AppResult<User>;

    /// List all users
    async fn list_users(&self) -> AppResult<Vec<User>>;

    /// Number of users
    async fn count_users(&self) -> AppResult<u64>;

    /// Check whether an email is already registered (exact match)
    async fn email_taken(&self, email: &str) -> AppResult<bool>;

    /// Create a user, rejecting an email that is already taken
    async fn create_user(&self, new_user: NewUser) -> AppResult<User>;

    /// Apply changes to an existing user
    async fn update_user(&self, id: i64, changes: UserChanges) -> AppResult<User>;

    /// Delete an existing user
    async fn delete_user(&self, id: i64) -> AppResult<()>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

fn email_conflict(email: &str) -> AppError {
    AppError::conflict(format!("User with email {}", email))
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: i64) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found()
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.uow.users().find_all().await
    }

    async fn count_users(&self) -> AppResult<u64> {
        self.uow.users().count().await
    }

    async fn email_taken(&self, email: &str) -> AppResult<bool> {
        self.uow.users().exists_by_email(email).await
    }

    async fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        let users = self.uow.users();

        if users.exists_by_email(&new_user.email).await? {
            return Err(email_conflict(&new_user.email));
        }

        let email = new_user.email.clone();
        let user = users.save(User::from(new_user)).await.map_err(|e| {
            // lost a race with a concurrent insert of the same email
            if e.is_unique_violation() {
                email_conflict(&email)
            } else {
                e
            }
        })?;

        tracing::info!(user_id = ?user.id, "User created");
        Ok(user)
    }

    async fn update_user(&self, id: i64, changes: UserChanges) -> AppResult<User> {
        if changes.is_empty() {
            return self.get_user(id).await;
        }

        let new_email = changes.email.clone();

        let user = self
            .uow
            .transaction_serializable(move |ctx| {
                Box::pin(async move {
                    let users = ctx.users();
                    let mut user = users.find_by_id(id).await?.ok_or_not_found()?;

                    if let Some(email) = changes.email.as_deref() {
                        if let Some(owner) = users.find_by_email(email).await? {
                            if owner.id != user.id {
                                return Err(email_conflict(email));
                            }
                        }
                    }

                    user.apply(changes);
                    users.save(user).await
                })
            })
            .await
            .map_err(|e| match new_email {
                Some(ref email) if e.is_unique_violation() => email_conflict(email),
                _ => e,
            })?;

        tracing::info!(user_id = id, "User updated");
        Ok(user)
    }

    async fn delete_user(&self, id: i64) -> AppResult<()> {
        let users = self.uow.users();

        if !users.exists_by_id(id).await? {
            return Err(AppError::NotFound);
        }

        users.delete_by_id(id).await?;
        tracing::info!(user_id = id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockUserRepository, TransactionContext, TxFuture};
    use mockall::predicate::eq;
    use sea_orm::DbErr;

    fn stored_user(id: i64, email: &str) -> User {
        User {
            id: Some(id),
            name: "Test User".to_string(),
            email: email.to_string(),
            phone: None,
        }
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            phone: None,
        }
    }

    /// UnitOfWork over a MockUserRepository; transactions are unavailable.
    struct TestUnitOfWork {
        user_repo: Arc<MockUserRepository>,
    }

    impl TestUnitOfWork {
        fn new(user_repo: MockUserRepository) -> Self {
            Self {
                user_repo: Arc::new(user_repo),
            }
        }
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.user_repo.clone()
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test mock"))
        }

        async fn transaction_serializable<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test mock"))
        }
    }

    fn manager(repo: MockUserRepository) -> UserManager<TestUnitOfWork> {
        UserManager::new(Arc::new(TestUnitOfWork::new(repo)))
    }

    #[tokio::test]
    async fn test_get_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(4))
            .returning(|id| Ok(Some(stored_user(id, "a@x.com"))));

        let user = manager(repo).get_user(4).await.unwrap();
        assert_eq!(user.id, Some(4));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let result = manager(repo).get_user(4).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_email()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(|_| Ok(false));
        repo.expect_save()
            .withf(|user| user.id.is_none() && user.email == "a@x.com")
            .times(1)
            .returning(|mut user| {
                user.id = Some(1);
                Ok(user)
            });

        let user = manager(repo).create_user(new_user("a@x.com")).await.unwrap();
        assert_eq!(user.id, Some(1));
        assert_eq!(user.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_email().returning(|_| Ok(true));
        repo.expect_save().times(0);

        let result = manager(repo).create_user(new_user("a@x.com")).await;
        match result {
            Err(AppError::Conflict(msg)) => assert!(msg.contains("a@x.com")),
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_user_propagates_persistence_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_email()
            .returning(|_| Err(AppError::from(DbErr::Custom("connection lost".to_string()))));
        repo.expect_save().times(0);

        let result = manager(repo).create_user(new_user("a@x.com")).await;
        assert!(matches!(result, Err(AppError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_update_user_without_changes_skips_transaction() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(stored_user(id, "a@x.com"))));

        let user = manager(repo)
            .update_user(2, UserChanges::default())
            .await
            .unwrap();
        assert_eq!(user.id, Some(2));
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_id().with(eq(3)).returning(|_| Ok(true));
        repo.expect_delete_by_id()
            .with(eq(3))
            .times(1)
            .returning(|_| Ok(()));

        tokio_test::assert_ok!(manager(repo).delete_user(3).await);
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_id().returning(|_| Ok(false));
        repo.expect_delete_by_id().times(0);

        let result = manager(repo).delete_user(3).await;
        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_all()
            .returning(|| Ok(vec![stored_user(1, "a@x.com"), stored_user(2, "b@x.com")]));
        repo.expect_count().returning(|| Ok(2));

        let service = manager(repo);
        assert_eq!(service.list_users().await.unwrap().len(), 2);
        assert_eq!(service.count_users().await.unwrap(), 2);
    }
}
