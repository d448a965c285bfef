//! PostgreSQL Profile Lookup

use kernel::id::UserId;
use sqlx::PgPool;

use crate::domain::repository::ProfileDirectory;
use crate::error::GateResult;

/// Reads the `profiles` table owned by the farm context
#[derive(Clone)]
pub struct PgProfileDirectory {
    pool: PgPool,
}

impl PgProfileDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProfileDirectory for PgProfileDirectory {
    async fn exists(&self, user_id: &UserId) -> GateResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM profiles WHERE id = $1)")
                .bind(user_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }
}
