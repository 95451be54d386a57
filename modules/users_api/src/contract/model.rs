use chrono::NaiveDate;

/// Stored user record. `id` is assigned by storage and never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// Full field set used by create and full update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// Partial update: `None` means "not provided".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// Birth date filter. Both bounds → inclusive; a single bound is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BirthDateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl User {
    /// Assemble a stored record from a full field set.
    pub fn from_new(id: i64, new_user: NewUser) -> Self {
        Self {
            id,
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            birth_date: new_user.birth_date,
            address: new_user.address,
            phone_number: new_user.phone_number,
        }
    }
}
