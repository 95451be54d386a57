//! Service behaviour against a real (in-memory SQLite) database.

mod common;

use common::{date, new_user, sqlite_service};
use users_api::contract::{BirthDateRange, UserPatch};
use users_api::domain::error::DomainError;

#[tokio::test]
async fn create_assigns_increasing_ids_and_persists() {
    let svc = sqlite_service().await;

    let a = svc
        .create_user(new_user("a@x.com", date(1990, 1, 1)))
        .await
        .unwrap();
    let b = svc
        .create_user(new_user("b@x.com", date(1991, 1, 1)))
        .await
        .unwrap();
    assert!(b.id > a.id);

    let loaded = svc.get_user(a.id).await.unwrap();
    assert_eq!(loaded, a);
    assert_eq!(loaded.phone_number.as_deref(), Some("+380501234567"));
}

#[tokio::test]
async fn create_rejects_underage_without_storing() {
    let svc = sqlite_service().await;

    let err = svc
        .create_user(new_user("kid@x.com", date(2010, 1, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AgeBelowMinimum { minimum_age: 18 }));

    let all = svc
        .find_by_birth_date_range(BirthDateRange::default())
        .await
        .unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn replace_overwrites_every_field() {
    let svc = sqlite_service().await;
    let created = svc
        .create_user(new_user("a@x.com", date(1990, 1, 1)))
        .await
        .unwrap();

    let mut replacement = new_user("z@x.com", date(1980, 2, 2));
    replacement.address = None;
    replacement.phone_number = None;

    let replaced = svc.replace_user(created.id, replacement).await.unwrap();
    assert_eq!(replaced.id, created.id);
    assert_eq!(replaced.email, "z@x.com");
    assert_eq!(replaced.address, None);

    assert_eq!(svc.get_user(created.id).await.unwrap(), replaced);
}

#[tokio::test]
async fn replace_missing_user_is_not_found() {
    let svc = sqlite_service().await;
    let err = svc
        .replace_user(404, new_user("a@x.com", date(1990, 1, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UserNotFound { id: 404 }));
}

#[tokio::test]
async fn patch_changes_only_provided_fields() {
    let svc = sqlite_service().await;
    let created = svc
        .create_user(new_user("a@x.com", date(2000, 1, 1)))
        .await
        .unwrap();

    let patch = UserPatch {
        email: Some("new@x.com".into()),
        address: Some("NewAddr".into()),
        ..Default::default()
    };
    let patched = svc.patch_user(created.id, patch).await.unwrap();

    assert_eq!(patched.email, "new@x.com");
    assert_eq!(patched.address.as_deref(), Some("NewAddr"));
    assert_eq!(patched.first_name, created.first_name);
    assert_eq!(patched.birth_date, created.birth_date);
    assert_eq!(svc.get_user(created.id).await.unwrap(), patched);
}

#[tokio::test]
async fn failed_patch_leaves_stored_record_untouched() {
    let svc = sqlite_service().await;
    let created = svc
        .create_user(new_user("a@x.com", date(2000, 1, 1)))
        .await
        .unwrap();

    let patch = UserPatch {
        email: Some("changed@x.com".into()),
        first_name: Some("".into()),
        ..Default::default()
    };
    let err = svc.patch_user(created.id, patch).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::BlankValueNotAllowed { field: "first_name" }
    ));

    let too_young = UserPatch {
        birth_date: Some(date(2023, 1, 1)),
        ..Default::default()
    };
    assert!(matches!(
        svc.patch_user(created.id, too_young).await.unwrap_err(),
        DomainError::AgeBelowMinimum { .. }
    ));

    assert_eq!(svc.get_user(created.id).await.unwrap(), created);
}

#[tokio::test]
async fn delete_removes_and_then_reports_not_found() {
    let svc = sqlite_service().await;
    let created = svc
        .create_user(new_user("a@x.com", date(1990, 1, 1)))
        .await
        .unwrap();

    svc.delete_user(created.id).await.unwrap();
    assert!(matches!(
        svc.get_user(created.id).await.unwrap_err(),
        DomainError::UserNotFound { .. }
    ));
    assert!(matches!(
        svc.delete_user(created.id).await.unwrap_err(),
        DomainError::UserNotFound { .. }
    ));
}

#[tokio::test]
async fn range_query_bounds() {
    let svc = sqlite_service().await;
    let dates = [date(1980, 1, 1), date(1990, 1, 1), date(1995, 6, 15), date(2000, 1, 1)];
    let mut ids = Vec::new();
    for (i, d) in dates.iter().enumerate() {
        let u = svc
            .create_user(new_user(&format!("u{i}@x.com"), *d))
            .await
            .unwrap();
        ids.push(u.id);
    }

    let between = |start, end| BirthDateRange { start, end };
    let found_ids = |users: Vec<users_api::User>| users.into_iter().map(|u| u.id).collect::<Vec<_>>();

    // Both bounds: inclusive
    let res = svc
        .find_by_birth_date_range(between(Some(date(1990, 1, 1)), Some(date(2000, 1, 1))))
        .await
        .unwrap();
    assert_eq!(found_ids(res), vec![ids[1], ids[2], ids[3]]);

    // Only start: strictly after
    let res = svc
        .find_by_birth_date_range(between(Some(date(1990, 1, 1)), None))
        .await
        .unwrap();
    assert_eq!(found_ids(res), vec![ids[2], ids[3]]);

    // Only end: strictly before
    let res = svc
        .find_by_birth_date_range(between(None, Some(date(1990, 1, 1))))
        .await
        .unwrap();
    assert_eq!(found_ids(res), vec![ids[0]]);

    // Neither: everything
    let res = svc
        .find_by_birth_date_range(BirthDateRange::default())
        .await
        .unwrap();
    assert_eq!(res.len(), 4);
}

#[tokio::test]
async fn inverted_range_is_rejected() {
    let svc = sqlite_service().await;
    let err = svc
        .find_by_birth_date_range(BirthDateRange {
            start: Some(date(1999, 1, 1)),
            end: Some(date(1990, 1, 1)),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidRange { .. }));
}

#[tokio::test]
async fn schema_bootstrap_is_idempotent() {
    let db = common::memory_db().await;
    users_api::infra::storage::schema::ensure_schema(&db)
        .await
        .unwrap();
}
