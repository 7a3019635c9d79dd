//! User repository: the persistence contract and its SeaORM adapters.
//!
//! The queries are written once against `ConnectionTrait`, so the pooled
//! adapter and the transaction-scoped adapter behave identically.

use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbBackend, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Statement,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::config::USERS_TABLE;
use crate::domain::User;
use crate::errors::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User persistence contract.
///
/// Every method fails only with `AppError::Persistence`. Absence is reported
/// through the return value, never as an error. Email comparison is exact and
/// case-sensitive.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert when `user.id` is `None` or not stored, otherwise update.
    /// Returns the stored row, including the assigned id.
    async fn save(&self, user: User) -> AppResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find user by exact email
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List all users
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// Delete user by ID. Deleting a missing ID is a no-op.
    async fn delete_by_id(&self, id: i64) -> AppResult<()>;

    /// Number of stored users
    async fn count(&self) -> AppResult<u64>;

    /// Check whether a user with this ID is stored
    async fn exists_by_id(&self, id: i64) -> AppResult<bool>;

    /// Check whether any stored user has exactly this email
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;
}

/// Pooled-connection implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn save(&self, user: User) -> AppResult<User> {
        save(&self.db, user).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        find_by_id(&self.db, id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        find_by_email(&self.db, email).await
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        find_all(&self.db).await
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        delete_by_id(&self.db, id).await
    }

    async fn count(&self) -> AppResult<u64> {
        count(&self.db).await
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        exists_by_id(&self.db, id).await
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        exists_by_email(&self.db, email).await
    }
}

/// Transaction-scoped implementation of UserRepository.
///
/// Borrows the transaction, so it cannot outlive the unit of work that
/// handed it out. Commit and rollback stay with the caller.
pub struct TxUserStore<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxUserStore<'a> {
    /// Create new transaction-aware repository
    pub fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl<'a> UserRepository for TxUserStore<'a> {
    async fn save(&self, user: User) -> AppResult<User> {
        save(self.txn, user).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        find_by_id(self.txn, id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        find_by_email(self.txn, email).await
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        find_all(self.txn).await
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        delete_by_id(self.txn, id).await
    }

    async fn count(&self) -> AppResult<u64> {
        count(self.txn).await
    }

    async fn exists_by_id(&self, id: i64) -> AppResult<bool> {
        exists_by_id(self.txn, id).await
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        exists_by_email(self.txn, email).await
    }
}

// =============================================================================
// Queries
// =============================================================================

async fn save<C: ConnectionTrait>(db: &C, user: User) -> AppResult<User> {
    let existing = match user.id {
        Some(id) => UserEntity::find_by_id(id).one(db).await?,
        None => None,
    };

    let model = match existing {
        Some(model) => {
            let mut active: ActiveModel = model.into();
            active.name = Set(user.name);
            active.email = Set(user.email);
            active.phone = Set(user.phone);

            let model = active.update(db).await?;
            tracing::debug!(user_id = model.id, "User updated");
            model
        }
        None => {
            let explicit_id = user.id.is_some();
            let active = ActiveModel {
                id: user.id.map_or(NotSet, Set),
                name: Set(user.name),
                email: Set(user.email),
                phone: Set(user.phone),
            };

            let model = active.insert(db).await?;
            if explicit_id {
                sync_id_sequence(db).await?;
            }
            tracing::debug!(user_id = model.id, explicit_id, "User inserted");
            model
        }
    };

    Ok(User::from(model))
}

/// Move the id sequence past an explicitly inserted id so the next generated
/// id cannot collide with it. SQLite's AUTOINCREMENT already tracks the max.
async fn sync_id_sequence<C: ConnectionTrait>(db: &C) -> AppResult<()> {
    if let Some(stmt) = id_sequence_statement(db.get_database_backend()) {
        db.execute(stmt).await?;
    }
    Ok(())
}

fn id_sequence_statement(backend: DbBackend) -> Option<Statement> {
    match backend {
        DbBackend::Postgres => Some(Statement::from_string(
            backend,
            format!(
                "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
                 GREATEST((SELECT MAX(id) FROM {table}), 1))",
                table = USERS_TABLE
            ),
        )),
        _ => None,
    }
}

async fn find_by_id<C: ConnectionTrait>(db: &C, id: i64) -> AppResult<Option<User>> {
    let result = UserEntity::find_by_id(id).one(db).await?;
    Ok(result.map(User::from))
}

async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> AppResult<Option<User>> {
    let result = UserEntity::find()
        .filter(user::Column::Email.eq(email))
        .one(db)
        .await?;

    Ok(result.map(User::from))
}

async fn find_all<C: ConnectionTrait>(db: &C) -> AppResult<Vec<User>> {
    let models = UserEntity::find()
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?;

    Ok(models.into_iter().map(User::from).collect())
}

async fn delete_by_id<C: ConnectionTrait>(db: &C, id: i64) -> AppResult<()> {
    let result = UserEntity::delete_by_id(id).exec(db).await?;

    if result.rows_affected == 0 {
        tracing::debug!(user_id = id, "Delete of absent user ignored");
    }

    Ok(())
}

async fn count<C: ConnectionTrait>(db: &C) -> AppResult<u64> {
    Ok(UserEntity::find().count(db).await?)
}

async fn exists_by_id<C: ConnectionTrait>(db: &C, id: i64) -> AppResult<bool> {
    let matches = UserEntity::find()
        .filter(user::Column::Id.eq(id))
        .count(db)
        .await?;

    Ok(matches > 0)
}

async fn exists_by_email<C: ConnectionTrait>(db: &C, email: &str) -> AppResult<bool> {
    let matches = UserEntity::find()
        .filter(user::Column::Email.eq(email))
        .count(db)
        .await?;

    Ok(matches > 0)
}
