//! Diesel-backed implementation of the user store port.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::user::{PrincipalId, UserRecord, UserType};

use super::models::UserRecordRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// PostgreSQL adapter for [`UserStore`].
#[derive(Clone)]
pub struct DieselUserStore {
    pool: DbPool,
}

impl DieselUserStore {
    /// Create a store backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(err: PoolError) -> UserStoreError {
    UserStoreError::connection(err.to_string())
}

fn map_diesel_error(err: diesel::result::Error) -> UserStoreError {
    UserStoreError::query(err.to_string())
}

fn map_row_error(err: impl std::fmt::Display) -> UserStoreError {
    UserStoreError::query(err.to_string())
}

#[async_trait]
impl UserStore for DieselUserStore {
    async fn find_by_id(&self, id: &PrincipalId) -> Result<Option<UserRecord>, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .find(id.as_ref())
            .select(UserRecordRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(UserRecord::try_from)
            .transpose()
            .map_err(map_row_error)
    }

    async fn update_user_type(
        &self,
        id: &PrincipalId,
        user_type: UserType,
        updated_at: DateTime<Utc>,
    ) -> Result<UserRecord, UserStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(users::table.find(id.as_ref()))
            .set((
                users::user_type.eq(user_type.as_str()),
                users::updated_at.eq(updated_at),
            ))
            .returning(UserRecordRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let row = row.ok_or_else(|| UserStoreError::not_found(id.to_string()))?;
        UserRecord::try_from(row).map_err(map_row_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_failures() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert!(matches!(err, UserStoreError::Connection { .. }));
        assert!(err.to_string().contains("timed out"));
    }

    #[rstest]
    fn diesel_errors_map_to_query_failures() {
        let err = map_diesel_error(diesel::result::Error::BrokenTransactionManager);
        assert!(matches!(err, UserStoreError::Query { .. }));
    }
}
