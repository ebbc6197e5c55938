//! Two-stage role synchronisation across the relational store and the
//! identity provider.
//!
//! The relational `user_type` and the provider's `user_type` claim are two
//! records of the same fact. A role change writes the relational row first
//! (stage `relational`), then the provider claim (stage `claims`). The
//! stages are not atomic across stores: a claims-stage failure leaves a
//! known-inconsistent state in which the relational value is new and the
//! claim is stale. That outcome is surfaced with `stage = "claims"` and
//! `relationalCommitted = true` so the caller can retry; the retry skips
//! the relational write when the row already holds the target role, so a
//! committed relational stage is never repeated.
//!
//! Concurrent calls for the same user are not serialised here; both stages
//! are last-write-wins independently. Callers needing strict ordering must
//! serialise role changes at a higher layer.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::{debug, error};

use super::access::{Action, authorize};
use super::error::Error;
use super::ports::{
    IdentityProvider, IdentityProviderError, UserStore, UserStoreError, UserTypeCommand,
};
use super::principal::AuthClaims;
use super::session::Session;
use super::user::{PrincipalId, UserRecord, UserType};

/// Which store a partial failure stopped at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    Relational,
    Claims,
}

impl SyncStage {
    /// Canonical name used in structured error details.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relational => "relational",
            Self::Claims => "claims",
        }
    }
}

/// Keeps the relational role and the provider claim in agreement.
#[derive(Clone)]
pub struct ClaimsSynchronizer<P, U> {
    provider: Arc<P>,
    users: Arc<U>,
}

impl<P, U> ClaimsSynchronizer<P, U> {
    /// Create a synchroniser over the given ports.
    pub fn new(provider: Arc<P>, users: Arc<U>) -> Self {
        Self { provider, users }
    }
}

fn sync_details(stage: SyncStage, relational_committed: bool) -> serde_json::Value {
    json!({ "stage": stage.as_str(), "relationalCommitted": relational_committed })
}

fn relational_failure(error: &UserStoreError) -> Error {
    let base = match error {
        UserStoreError::Connection { .. } => {
            Error::service_unavailable("role update failed before any store changed")
        }
        UserStoreError::Query { .. } | UserStoreError::NotFound { .. } => {
            Error::internal("role update failed before any store changed")
        }
    };
    base.with_details(sync_details(SyncStage::Relational, false))
}

fn claims_failure(error: &IdentityProviderError) -> Error {
    let base = match error {
        IdentityProviderError::Unavailable { .. } => Error::service_unavailable(
            "role committed relationally but the provider claim is stale; retry to finish",
        ),
        _ => Error::internal(
            "role committed relationally but the provider claim is stale; retry to finish",
        ),
    };
    base.with_details(sync_details(SyncStage::Claims, true))
}

#[async_trait]
impl<P, U> UserTypeCommand for ClaimsSynchronizer<P, U>
where
    P: IdentityProvider,
    U: UserStore,
{
    async fn set_user_type(
        &self,
        session: &Session,
        target: &PrincipalId,
        new_type: UserType,
    ) -> Result<UserRecord, Error> {
        authorize(
            session,
            &Action::ChangeUserType {
                target: target.clone(),
            },
        )?;

        let existing = self
            .users
            .find_by_id(target)
            .await
            .map_err(|err| relational_failure(&err))?;

        let record = match existing {
            // Resume path: a previous invocation already committed the
            // relational stage; only the claims stage remains.
            Some(record) if record.user_type == new_type => {
                debug!(user = %target, role = %new_type, "relational row already current, resuming claims stage");
                record
            }
            Some(_) => self
                .users
                .update_user_type(target, new_type, Utc::now())
                .await
                .map_err(|err| relational_failure(&err))?,
            None => return Err(Error::not_found("user not found")),
        };

        // `set_claims` merges, so a role-only payload leaves every other
        // provider claim in place.
        let claims = AuthClaims::with_user_type(new_type);
        if let Err(err) = self.provider.set_claims(target, &claims).await {
            error!(
                user = %target,
                role = %new_type,
                %err,
                "claims stage failed; relational committed, provider claim stale"
            );
            return Err(claims_failure(&err));
        }

        Ok(record)
    }
}
