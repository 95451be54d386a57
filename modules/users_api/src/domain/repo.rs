use crate::contract::{BirthDateRange, NewUser, User};
use async_trait::async_trait;

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Load a user by id.
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;
    /// Check existence by id.
    async fn exists(&self, id: i64) -> anyhow::Result<bool>;
    /// Insert a validated user; storage assigns the id.
    async fn insert(&self, u: NewUser) -> anyhow::Result<User>;
    /// Overwrite every column of an existing user (by primary key in `u.id`).
    async fn update(&self, u: User) -> anyhow::Result<()>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: i64) -> anyhow::Result<bool>;
    /// Users whose birth date falls into `range`, ordered by id.
    async fn find_by_birth_date_range(&self, range: BirthDateRange) -> anyhow::Result<Vec<User>>;
}
