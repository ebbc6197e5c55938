//! Request authentication: credential to request-scoped session.
//!
//! Combines the identity verifier with the relational user store. The
//! resulting session always carries the *relational* `user_type`: during a
//! half-finished claims sync the relational side is the one guarded by the
//! local transaction boundary, so acting on the embedded claim could grant
//! a stale role.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::error::Error;
use super::identity::IdentityVerifier;
use super::ports::{IdentityProvider, SessionService, UserStore, UserStoreError};
use super::session::Session;

/// Resolves bearer credentials into sessions. Read-only.
#[derive(Clone)]
pub struct SessionResolver<P, U> {
    verifier: IdentityVerifier<P>,
    users: Arc<U>,
}

impl<P, U> SessionResolver<P, U> {
    /// Create a resolver over the given verifier and user store.
    pub fn new(verifier: IdentityVerifier<P>, users: Arc<U>) -> Self {
        Self { verifier, users }
    }
}

fn map_store_error(error: &UserStoreError) -> Error {
    match error {
        UserStoreError::Connection { .. } => {
            Error::service_unavailable("user store unavailable during authentication")
        }
        UserStoreError::Query { .. } | UserStoreError::NotFound { .. } => {
            Error::internal("user lookup failed during authentication")
        }
    }
}

#[async_trait]
impl<P, U> SessionService for SessionResolver<P, U>
where
    P: IdentityProvider,
    U: UserStore,
{
    async fn resolve(&self, credential: &str) -> Result<Session, Error> {
        let principal = self.verifier.verify(credential).await?;

        let record = self
            .users
            .find_by_id(&principal.id)
            .await
            .map_err(|err| map_store_error(&err))?;

        // A provider identity with no local row is not-yet-provisioned.
        // Reported as plain unauthorized so the response does not reveal
        // whether the account exists at the provider.
        let Some(record) = record else {
            return Err(Error::unauthorized("unknown account"));
        };

        if principal.claims.user_type != Some(record.user_type) {
            debug!(
                user = %record.id,
                relational = %record.user_type,
                "provider claim disagrees with relational role; relational wins"
            );
        }

        Ok(Session {
            principal_id: record.id,
            user_type: record.user_type,
            expires_at: principal.expires_at,
        })
    }
}
