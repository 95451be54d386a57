//! Users REST module: CRUD over a single `users` table, with a partial-update
//! merge and a minimum-age rule on birth dates.

// === PUBLIC CONTRACT ===
pub mod contract;

pub use contract::{BirthDateRange, NewUser, User, UserPatch};

/// Key of this module's entry in `AppConfig.modules`.
pub const MODULE_NAME: &str = "users_api";

// === INTERNAL MODULES ===
// Exposed for the server binary and integration tests.
#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::UsersApiConfig;
use crate::domain::ports::Clock;
use crate::domain::service::Service;
use crate::infra::storage::sea_orm_repo::SeaOrmUsersRepository;

/// Wire the domain service onto a SeaORM connection.
pub fn build_service(
    db: DatabaseConnection,
    clock: Arc<dyn Clock>,
    cfg: &UsersApiConfig,
) -> Arc<Service> {
    let repo = Arc::new(SeaOrmUsersRepository::new(db));
    Arc::new(Service::new(repo, clock, cfg.into()))
}
