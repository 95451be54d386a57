use std::sync::Arc;

use chrono::NaiveDate;

use crate::contract::{BirthDateRange, NewUser, User, UserPatch};
use crate::domain::age::is_age_valid;
use crate::domain::error::DomainError;
use crate::domain::merge::merge_partial;
use crate::domain::ports::Clock;
use crate::domain::repo::UsersRepository;
use crate::domain::validation::{validate_new_user, validate_patch};
use tracing::{debug, info, instrument};

/// Domain service with business rules for user management.
/// Depends only on the repository and clock ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
    clock: Arc<dyn Clock>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Whole years a user must have reached when a birth date is set.
    pub minimum_age: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self { minimum_age: 18 }
    }
}

fn db_error(e: anyhow::Error) -> DomainError {
    DomainError::database(format!("{e:#}"))
}

impl Service {
    pub fn new(
        repo: Arc<dyn UsersRepository>,
        clock: Arc<dyn Clock>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            clock,
            config,
        }
    }

    #[instrument(name = "users_api.service.get_user", skip(self), fields(user_id = id))]
    pub async fn get_user(&self, id: i64) -> Result<User, DomainError> {
        debug!("Getting user by id");
        self.load(id).await
    }

    #[instrument(
        name = "users_api.service.create_user",
        skip(self, new_user),
        fields(email = %new_user.email)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        let today = self.clock.today();
        validate_new_user(&new_user, today)?;
        self.ensure_age(new_user.birth_date, today)?;

        let user = self.repo.insert(new_user).await.map_err(db_error)?;

        info!(user_id = user.id, "Successfully created user");
        Ok(user)
    }

    /// Full update: every field is replaced, the birth date is age-checked.
    #[instrument(
        name = "users_api.service.replace_user",
        skip(self, new_user),
        fields(user_id = id)
    )]
    pub async fn replace_user(&self, id: i64, new_user: NewUser) -> Result<User, DomainError> {
        info!("Replacing user");

        let today = self.clock.today();
        validate_new_user(&new_user, today)?;

        let current = self.load(id).await?;
        self.ensure_age(new_user.birth_date, today)?;

        let user = User::from_new(current.id, new_user);
        self.repo.update(user.clone()).await.map_err(db_error)?;

        info!("Successfully replaced user");
        Ok(user)
    }

    /// Partial update: only provided fields that differ are written.
    #[instrument(
        name = "users_api.service.patch_user",
        skip(self, patch),
        fields(user_id = id)
    )]
    pub async fn patch_user(&self, id: i64, patch: UserPatch) -> Result<User, DomainError> {
        info!("Patching user");

        let today = self.clock.today();
        validate_patch(&patch, today)?;

        let current = self.load(id).await?;
        let merged = merge_partial(&current, &patch, self.config.minimum_age, today)?;

        if merged.is_unchanged() {
            debug!("Patch carries no changes, skipping write");
            return Ok(merged.user);
        }

        self.repo
            .update(merged.user.clone())
            .await
            .map_err(db_error)?;

        info!(changed = ?merged.changed, "Successfully patched user");
        Ok(merged.user)
    }

    #[instrument(name = "users_api.service.delete_user", skip(self), fields(user_id = id))]
    pub async fn delete_user(&self, id: i64) -> Result<(), DomainError> {
        info!("Deleting user");

        if !self.repo.exists(id).await.map_err(db_error)? {
            return Err(DomainError::user_not_found(id));
        }
        let deleted = self.repo.delete(id).await.map_err(db_error)?;
        if !deleted {
            // Removed concurrently between the existence check and the delete
            return Err(DomainError::user_not_found(id));
        }

        info!("Successfully deleted user");
        Ok(())
    }

    #[instrument(name = "users_api.service.find_by_birth_date_range", skip(self))]
    pub async fn find_by_birth_date_range(
        &self,
        range: BirthDateRange,
    ) -> Result<Vec<User>, DomainError> {
        if let (Some(start), Some(end)) = (range.start, range.end) {
            if start > end {
                return Err(DomainError::invalid_range(start, end));
            }
        }

        let users = self
            .repo
            .find_by_birth_date_range(range)
            .await
            .map_err(db_error)?;

        debug!("Found {} users in birth date range", users.len());
        Ok(users)
    }

    // --- helpers ---

    async fn load(&self, id: i64) -> Result<User, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(db_error)?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    fn ensure_age(&self, birth_date: NaiveDate, today: NaiveDate) -> Result<(), DomainError> {
        if is_age_valid(birth_date, self.config.minimum_age, today) {
            Ok(())
        } else {
            Err(DomainError::age_below_minimum(self.config.minimum_age))
        }
    }
}
