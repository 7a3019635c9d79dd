//! In-memory implementation of UserRepository.
//!
//! Holds users in a `BTreeMap` behind a tokio `RwLock`. No constraints are
//! enforced: two users may share an email here, unlike the SQL schema.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sea_orm::DbErr;
use tokio::sync::RwLock;

use super::user_repository::UserRepository;
use crate::domain::User;
use crate::errors::AppResult;

#[derive(Debug)]
struct State {
    users: BTreeMap<i64, User>,
    /// `None` once `i64::MAX` has been handed out
    next_id: Option<i64>,
}

/// In-memory user store, ids assigned from 1
#[derive(Debug)]
pub struct MemoryUserStore {
    state: RwLock<State>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                users: BTreeMap::new(),
                next_id: Some(1),
            }),
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MemoryUserStore {
    async fn save(&self, mut user: User) -> AppResult<User> {
        let mut state = self.state.write().await;

        let id = match user.id {
            Some(id) => id,
            None => state
                .next_id
                .ok_or_else(|| DbErr::Custom("user id sequence exhausted".to_string()))?,
        };
        // keep generated ids ahead of any explicit one
        if state.next_id.is_some_and(|next| next <= id) {
            state.next_id = id.checked_add(1);
        }

        user.id = Some(id);
        state.users.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.state.read().await.users.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        self.state.write().await.users.remove(&id);
        Ok(())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.state.read().await.users.len() as u64)
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        Ok(self.state.read().await.users.contains_key(&id))
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        let state = self.state.read().await;
        Ok(state.users.values().any(|u| u.email == email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;

    #[tokio::test]
    async fn test_ids_start_at_one() {
        let store = MemoryUserStore::new();

        let first = store.save(User::new("A", "a@x.com")).await.unwrap();
        let second = store.save(User::new("B", "b@x.com")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn test_explicit_id_advances_sequence() {
        let store = MemoryUserStore::new();

        let mut pinned = User::new("P", "p@x.com");
        pinned.id = Some(10);
        store.save(pinned).await.unwrap();

        let next = store.save(User::new("N", "n@x.com")).await.unwrap();
        assert_eq!(next.id, Some(11));
    }

    #[tokio::test]
    async fn test_max_id_exhausts_sequence() {
        let store = MemoryUserStore::new();

        let mut last = User::new("Z", "z@x.com");
        last.id = Some(i64::MAX);
        let saved = store.save(last).await.unwrap();
        assert_eq!(saved.id, Some(i64::MAX));

        let err = store.save(User::new("N", "n@x.com")).await.unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
        assert_eq!(store.count().await.unwrap(), 1);

        // explicit ids below the ceiling still work
        let mut low = User::new("L", "l@x.com");
        low.id = Some(5);
        assert_eq!(store.save(low).await.unwrap().id, Some(5));
    }

    #[tokio::test]
    async fn test_save_existing_replaces() {
        let store = MemoryUserStore::new();
        let mut user = store.save(User::new("A", "a@x.com")).await.unwrap();

        user.name = "Alice".to_string();
        store.save(user.clone()).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
        assert_eq!(store.find_by_id(1).await.unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_email_match_is_exact() {
        let store = MemoryUserStore::new();
        store.save(User::new("A", "a@x.com")).await.unwrap();

        assert!(store.exists_by_email("a@x.com").await.unwrap());
        assert!(!store.exists_by_email("A@X.COM").await.unwrap());
        assert!(!store.exists_by_email(" a@x.com").await.unwrap());
    }
}
