use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::contract::{NewUser, UserPatch};
use crate::domain::error::{DomainError, FieldViolation};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_!#$%&'*+/=?`{|}~^.-]+@[a-zA-Z0-9.-]+$").expect("valid email regex")
});

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+]*[(]?[0-9]{1,4}[)]?[-\s./0-9]*$").expect("valid phone regex")
});

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn check_required(
    out: &mut Vec<FieldViolation>,
    field: &'static str,
    label: &str,
    value: &str,
) {
    if is_blank(value) {
        out.push(FieldViolation::new(
            field,
            format!("{label} should not be blank"),
        ));
    }
}

fn check_email(out: &mut Vec<FieldViolation>, email: &str) {
    if !is_blank(email) && !EMAIL_RE.is_match(email) {
        out.push(FieldViolation::new("email", "Invalid email format"));
    }
}

fn check_phone(out: &mut Vec<FieldViolation>, phone: Option<&str>) {
    if let Some(phone) = phone.filter(|p| !is_blank(p)) {
        if !PHONE_RE.is_match(phone) {
            out.push(FieldViolation::new(
                "phone_number",
                "Invalid phone number format",
            ));
        }
    }
}

fn check_past(out: &mut Vec<FieldViolation>, birth_date: NaiveDate, today: NaiveDate) {
    if birth_date >= today {
        out.push(FieldViolation::new(
            "birth_date",
            "The birth date must be in the past",
        ));
    }
}

fn finish(violations: Vec<FieldViolation>) -> Result<(), DomainError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(DomainError::invalid_input(violations))
    }
}

/// Field checks for create and full update. Collects every violation.
pub fn validate_new_user(user: &NewUser, today: NaiveDate) -> Result<(), DomainError> {
    let mut violations = Vec::new();
    check_required(&mut violations, "email", "Email", &user.email);
    check_email(&mut violations, &user.email);
    check_required(&mut violations, "first_name", "First name", &user.first_name);
    check_required(&mut violations, "last_name", "Last name", &user.last_name);
    check_past(&mut violations, user.birth_date, today);
    check_phone(&mut violations, user.phone_number.as_deref());
    finish(violations)
}

/// Format checks for present, non-blank patch values. Blank values are left
/// to the merge, which rejects them only when they would change the record.
pub fn validate_patch(patch: &UserPatch, today: NaiveDate) -> Result<(), DomainError> {
    let mut violations = Vec::new();
    if let Some(email) = patch.email.as_deref() {
        check_email(&mut violations, email);
    }
    if let Some(birth_date) = patch.birth_date {
        check_past(&mut violations, birth_date, today);
    }
    check_phone(&mut violations, patch.phone_number.as_deref());
    finish(violations)
}
