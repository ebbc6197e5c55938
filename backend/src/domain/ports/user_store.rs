//! Driven port for relational user persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::user::{PrincipalId, UserRecord, UserType};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user store adapters.
    ///
    /// `NotFound` is reserved for mutations that target a missing row;
    /// lookups express absence through `Option` instead.
    pub enum UserStoreError {
        /// Store connection could not be established or timed out.
        Connection { message: String } => "user store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user store query failed: {message}",
        /// Mutation targeted a user row that does not exist.
        NotFound { id: String } => "user '{id}' not found",
    }
}

/// Capability interface over the relational user table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch the authorization-relevant user row by identifier.
    async fn find_by_id(&self, id: &PrincipalId) -> Result<Option<UserRecord>, UserStoreError>;

    /// Write a new role and bump `updated_at`; returns the updated row.
    async fn update_user_type(
        &self,
        id: &PrincipalId,
        user_type: UserType,
        updated_at: DateTime<Utc>,
    ) -> Result<UserRecord, UserStoreError>;
}
