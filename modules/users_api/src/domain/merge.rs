//! Partial-update merge.
//!
//! Every text field follows the same policy, driven by [`TEXT_FIELDS`]:
//! absent → untouched, equal → untouched, blank → rejected, otherwise
//! overwritten. The birth date is the one field with its own rule: a changed
//! value must satisfy the minimum age.
//!
//! All candidate values are checked before anything is applied, so a failure
//! leaves the caller with nothing to persist.

use chrono::NaiveDate;

use crate::contract::{User, UserPatch};
use crate::domain::age::is_age_valid;
use crate::domain::error::DomainError;

/// Name of the birth-date field as reported in [`Merged::changed`].
pub const BIRTH_DATE: &str = "birth_date";

struct TextField {
    name: &'static str,
    candidate: fn(&UserPatch) -> Option<&str>,
    current: fn(&User) -> Option<&str>,
    apply: fn(&mut User, String),
}

const TEXT_FIELDS: [TextField; 5] = [
    TextField {
        name: "email",
        candidate: |p| p.email.as_deref(),
        current: |u| Some(u.email.as_str()),
        apply: |u, v| u.email = v,
    },
    TextField {
        name: "first_name",
        candidate: |p| p.first_name.as_deref(),
        current: |u| Some(u.first_name.as_str()),
        apply: |u, v| u.first_name = v,
    },
    TextField {
        name: "last_name",
        candidate: |p| p.last_name.as_deref(),
        current: |u| Some(u.last_name.as_str()),
        apply: |u, v| u.last_name = v,
    },
    TextField {
        name: "address",
        candidate: |p| p.address.as_deref(),
        current: |u| u.address.as_deref(),
        apply: |u, v| u.address = Some(v),
    },
    TextField {
        name: "phone_number",
        candidate: |p| p.phone_number.as_deref(),
        current: |u| u.phone_number.as_deref(),
        apply: |u, v| u.phone_number = Some(v),
    },
];

/// Result of a successful merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    pub user: User,
    /// Fields that received a new value, in evaluation order.
    pub changed: Vec<&'static str>,
}

impl Merged {
    pub fn is_unchanged(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Merge `patch` onto `existing`, returning the updated copy.
///
/// Fails with [`DomainError::BlankValueNotAllowed`] for the first changed
/// text field whose new value is blank, or with
/// [`DomainError::AgeBelowMinimum`] when a changed birth date is too recent.
pub fn merge_partial(
    existing: &User,
    patch: &UserPatch,
    minimum_age: u32,
    today: NaiveDate,
) -> Result<Merged, DomainError> {
    let mut pending = Vec::with_capacity(TEXT_FIELDS.len());
    for field in &TEXT_FIELDS {
        let Some(value) = (field.candidate)(patch) else {
            continue;
        };
        if (field.current)(existing) == Some(value) {
            continue;
        }
        if value.trim().is_empty() {
            return Err(DomainError::blank_value(field.name));
        }
        pending.push((field, value));
    }

    let birth_date = match patch.birth_date {
        Some(date) if date != existing.birth_date => {
            if !is_age_valid(date, minimum_age, today) {
                return Err(DomainError::age_below_minimum(minimum_age));
            }
            Some(date)
        }
        _ => None,
    };

    let mut user = existing.clone();
    let mut changed = Vec::with_capacity(pending.len() + 1);
    for (field, value) in pending {
        (field.apply)(&mut user, value.to_owned());
        changed.push(field.name);
    }
    if let Some(date) = birth_date {
        user.birth_date = date;
        changed.push(BIRTH_DATE);
    }

    Ok(Merged { user, changed })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 1, 1)
    }

    fn existing() -> User {
        User {
            id: 7,
            email: "a@x.com".into(),
            first_name: "A".into(),
            last_name: "B".into(),
            birth_date: date(2000, 1, 1),
            address: Some("Addr".into()),
            phone_number: Some("123".into()),
        }
    }

    fn merge(patch: &UserPatch) -> Result<Merged, DomainError> {
        merge_partial(&existing(), patch, 18, today())
    }

    #[test]
    fn empty_patch_leaves_record_unchanged() {
        let merged = merge(&UserPatch::default()).unwrap();
        assert_eq!(merged.user, existing());
        assert!(merged.is_unchanged());
    }

    #[test]
    fn only_provided_fields_are_overwritten() {
        let patch = UserPatch {
            email: Some("new@x.com".into()),
            address: Some("NewAddr".into()),
            ..Default::default()
        };
        let merged = merge(&patch).unwrap();

        let expected = User {
            email: "new@x.com".into(),
            address: Some("NewAddr".into()),
            ..existing()
        };
        assert_eq!(merged.user, expected);
        assert_eq!(merged.changed, vec!["email", "address"]);
    }

    #[test]
    fn equal_values_are_not_reported_as_changes() {
        let patch = UserPatch {
            email: Some("a@x.com".into()),
            first_name: Some("A".into()),
            birth_date: Some(date(2000, 1, 1)),
            ..Default::default()
        };
        let merged = merge(&patch).unwrap();
        assert_eq!(merged.user, existing());
        assert!(merged.is_unchanged());
    }

    #[test]
    fn blank_value_is_rejected_for_every_text_field() {
        for field in TEXT_FIELDS.iter().map(|f| f.name) {
            for blank in ["", "   ", "\t\n"] {
                let mut patch = UserPatch::default();
                match field {
                    "email" => patch.email = Some(blank.into()),
                    "first_name" => patch.first_name = Some(blank.into()),
                    "last_name" => patch.last_name = Some(blank.into()),
                    "address" => patch.address = Some(blank.into()),
                    "phone_number" => patch.phone_number = Some(blank.into()),
                    other => unreachable!("unexpected field {other}"),
                }
                let err = merge(&patch).unwrap_err();
                assert!(
                    matches!(err, DomainError::BlankValueNotAllowed { field: f } if f == field),
                    "{field}: {err:?}"
                );
            }
        }
    }

    #[test]
    fn blank_first_name_scenario() {
        let original = existing();
        let patch = UserPatch {
            first_name: Some(String::new()),
            ..Default::default()
        };
        let err = merge_partial(&original, &patch, 18, today()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::BlankValueNotAllowed {
                field: "first_name"
            }
        ));
        assert_eq!(original, existing());
    }

    #[test]
    fn blank_value_on_missing_optional_field_is_rejected() {
        let user = User {
            address: None,
            ..existing()
        };
        let patch = UserPatch {
            address: Some(" ".into()),
            ..Default::default()
        };
        let err = merge_partial(&user, &patch, 18, today()).unwrap_err();
        assert!(matches!(
            err,
            DomainError::BlankValueNotAllowed { field: "address" }
        ));
    }

    #[test]
    fn blank_resubmitted_over_blank_is_a_noop() {
        let user = User {
            address: Some(String::new()),
            ..existing()
        };
        let patch = UserPatch {
            address: Some(String::new()),
            ..Default::default()
        };
        let merged = merge_partial(&user, &patch, 18, today()).unwrap();
        assert!(merged.is_unchanged());
    }

    #[test]
    fn optional_field_can_be_set_from_none() {
        let user = User {
            phone_number: None,
            ..existing()
        };
        let patch = UserPatch {
            phone_number: Some("+1 555 0100".into()),
            ..Default::default()
        };
        let merged = merge_partial(&user, &patch, 18, today()).unwrap();
        assert_eq!(merged.user.phone_number.as_deref(), Some("+1 555 0100"));
        assert_eq!(merged.changed, vec!["phone_number"]);
    }

    #[test]
    fn failure_does_not_apply_earlier_valid_fields() {
        let original = existing();
        let patch = UserPatch {
            email: Some("changed@x.com".into()),
            last_name: Some("".into()),
            ..Default::default()
        };
        assert!(merge_partial(&original, &patch, 18, today()).is_err());
        assert_eq!(original.email, "a@x.com");
    }

    #[test]
    fn too_young_birth_date_is_rejected() {
        let patch = UserPatch {
            birth_date: Some(date(2023, 1, 1)),
            ..Default::default()
        };
        let err = merge(&patch).unwrap_err();
        assert!(matches!(
            err,
            DomainError::AgeBelowMinimum { minimum_age: 18 }
        ));
    }

    #[test]
    fn valid_birth_date_change_is_applied() {
        let patch = UserPatch {
            birth_date: Some(date(1990, 6, 15)),
            ..Default::default()
        };
        let merged = merge(&patch).unwrap();
        assert_eq!(merged.user.birth_date, date(1990, 6, 15));
        assert_eq!(merged.changed, vec![BIRTH_DATE]);
    }

    #[test]
    fn resubmitting_same_birth_date_skips_age_check() {
        // Stored record predates a raised threshold
        let user = User {
            birth_date: date(2010, 5, 5),
            ..existing()
        };
        let patch = UserPatch {
            birth_date: Some(date(2010, 5, 5)),
            ..Default::default()
        };
        let merged = merge_partial(&user, &patch, 18, today()).unwrap();
        assert_eq!(merged.user, user);
    }

    #[test]
    fn blank_value_reported_before_age_violation() {
        let patch = UserPatch {
            phone_number: Some("".into()),
            birth_date: Some(date(2023, 1, 1)),
            ..Default::default()
        };
        let err = merge(&patch).unwrap_err();
        assert!(matches!(
            err,
            DomainError::BlankValueNotAllowed {
                field: "phone_number"
            }
        ));
    }

    #[test]
    fn identifier_is_never_touched() {
        let patch = UserPatch {
            email: Some("z@x.com".into()),
            first_name: Some("Z".into()),
            last_name: Some("Y".into()),
            birth_date: Some(date(1980, 1, 1)),
            address: Some("Elsewhere".into()),
            phone_number: Some("999".into()),
        };
        let merged = merge(&patch).unwrap();
        assert_eq!(merged.user.id, 7);
        assert_eq!(merged.changed.len(), 6);
    }
}
