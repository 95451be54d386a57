#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use users_api::api::rest::routes;
use users_api::config::UsersApiConfig;
use users_api::contract::NewUser;
use users_api::domain::ports::FixedClock;
use users_api::domain::service::Service;
use users_api::infra::storage::{connect, schema::ensure_schema};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Reference "today" for every test in this crate.
pub fn today() -> NaiveDate {
    date(2024, 1, 1)
}

pub async fn memory_db() -> DatabaseConnection {
    let db = connect("sqlite::memory:", None).await.unwrap();
    ensure_schema(&db).await.unwrap();
    db
}

pub async fn sqlite_service() -> Arc<Service> {
    users_api::build_service(
        memory_db().await,
        Arc::new(FixedClock(today())),
        &UsersApiConfig::default(),
    )
}

pub async fn app() -> Router {
    routes::router(sqlite_service().await, Duration::from_secs(5))
}

pub fn new_user(email: &str, birth_date: NaiveDate) -> NewUser {
    NewUser {
        email: email.to_string(),
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        birth_date,
        address: Some("Kyiv".to_string()),
        phone_number: Some("+380501234567".to_string()),
    }
}
