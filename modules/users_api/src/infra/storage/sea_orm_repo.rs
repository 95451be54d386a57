//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it works with a `DatabaseConnection`
//! or a transaction handle alike.

use anyhow::Context;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::contract::{BirthDateRange, NewUser, User};
use crate::domain::repo::UsersRepository;
use crate::infra::storage::entity::{ActiveModel as UserAM, Column, Entity as UserEntity};

pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let found = UserEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn exists(&self, id: i64) -> anyhow::Result<bool> {
        let count = UserEntity::find_by_id(id)
            .count(&self.conn)
            .await
            .context("exists failed")?;
        Ok(count > 0)
    }

    async fn insert(&self, u: NewUser) -> anyhow::Result<User> {
        let m = UserAM {
            id: NotSet,
            email: Set(u.email),
            first_name: Set(u.first_name),
            last_name: Set(u.last_name),
            birth_date: Set(u.birth_date),
            address: Set(u.address),
            phone_number: Set(u.phone_number),
        };
        let stored = m.insert(&self.conn).await.context("insert failed")?;
        Ok(stored.into())
    }

    async fn update(&self, u: User) -> anyhow::Result<()> {
        let m = UserAM {
            id: Set(u.id),
            email: Set(u.email),
            first_name: Set(u.first_name),
            last_name: Set(u.last_name),
            birth_date: Set(u.birth_date),
            address: Set(u.address),
            phone_number: Set(u.phone_number),
        };
        let _ = m.update(&self.conn).await.context("update failed")?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> anyhow::Result<bool> {
        let res = UserEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn find_by_birth_date_range(&self, range: BirthDateRange) -> anyhow::Result<Vec<User>> {
        let query = match (range.start, range.end) {
            (Some(start), Some(end)) => UserEntity::find().filter(Column::BirthDate.between(start, end)),
            (Some(start), None) => UserEntity::find().filter(Column::BirthDate.gt(start)),
            (None, Some(end)) => UserEntity::find().filter(Column::BirthDate.lt(end)),
            (None, None) => UserEntity::find(),
        };

        let rows = query
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
            .context("find_by_birth_date_range failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
