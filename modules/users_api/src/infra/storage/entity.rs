use chrono::NaiveDate;
use sea_orm::entity::prelude::*;

use crate::contract::User;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(m: Model) -> Self {
        Self {
            id: m.id,
            email: m.email,
            first_name: m.first_name,
            last_name: m.last_name,
            birth_date: m.birth_date,
            address: m.address,
            phone_number: m.phone_number,
        }
    }
}
