use sea_orm::{ConnectionTrait, DbErr, Schema};

use crate::infra::storage::entity::Entity as UserEntity;

/// Create the `users` table from the entity definition when it is missing.
pub async fn ensure_schema<C>(conn: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let backend = conn.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(UserEntity);
    stmt.if_not_exists();
    conn.execute(backend.build(&stmt)).await?;
    tracing::debug!("users table ensured");
    Ok(())
}
