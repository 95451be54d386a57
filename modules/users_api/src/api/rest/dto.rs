use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::contract::model::{BirthDateRange, NewUser, User, UserPatch};

/// REST DTO for user representation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// REST DTO for create and full update
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserReq {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// REST DTO for partial update; omitted members stay unchanged
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
pub struct PatchUserReq {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// Query parameters of the birth date search
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Lower bound (`YYYY-MM-DD`)
    pub start: Option<NaiveDate>,
    /// Upper bound (`YYYY-MM-DD`)
    pub end: Option<NaiveDate>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            birth_date: user.birth_date,
            address: user.address,
            phone_number: user.phone_number,
        }
    }
}

impl From<UserReq> for NewUser {
    fn from(req: UserReq) -> Self {
        Self {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            birth_date: req.birth_date,
            address: req.address,
            phone_number: req.phone_number,
        }
    }
}

impl From<PatchUserReq> for UserPatch {
    fn from(req: PatchUserReq) -> Self {
        Self {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            birth_date: req.birth_date,
            address: req.address,
            phone_number: req.phone_number,
        }
    }
}

impl From<SearchQuery> for BirthDateRange {
    fn from(q: SearchQuery) -> Self {
        Self {
            start: q.start,
            end: q.end,
        }
    }
}
