//! Driving port for session resolution.
//!
//! Inbound adapters call this to turn a bearer credential into a
//! request-scoped [`Session`] without knowing about the identity provider
//! or the user store. Handler tests substitute a test double instead of
//! wiring either backend.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::session::Session;

/// Domain use-case port for authenticating a request.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Verify the credential and produce the caller's session.
    async fn resolve(&self, credential: &str) -> Result<Session, Error>;
}

/// Fixture resolver used until real wiring, and by handler tests.
///
/// Accepts [`FIXTURE_CREDENTIAL`](super::FIXTURE_CREDENTIAL) and resolves
/// it to a company session for `usr_fixture`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSessionService;

#[async_trait]
impl SessionService for FixtureSessionService {
    async fn resolve(&self, credential: &str) -> Result<Session, Error> {
        use chrono::{Duration, Utc};

        use super::identity_provider::{FIXTURE_CREDENTIAL, FIXTURE_PRINCIPAL_ID};
        use crate::domain::user::{PrincipalId, UserType};

        if credential != FIXTURE_CREDENTIAL {
            return Err(Error::unauthorized("invalid credential"));
        }
        let principal_id = PrincipalId::new(FIXTURE_PRINCIPAL_ID)
            .map_err(|err| Error::internal(format!("invalid fixture principal id: {err}")))?;
        Ok(Session {
            principal_id,
            user_type: UserType::Company,
            expires_at: Utc::now() + Duration::hours(1),
        })
    }
}
