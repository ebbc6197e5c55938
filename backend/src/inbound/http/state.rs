//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain use-case ports and remain testable without IO.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureJobsQuery, FixtureSessionService, FixtureUserTypeCommand, JobsQuery, SessionService,
    UserTypeCommand,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub sessions: Arc<dyn SessionService>,
    pub jobs: Arc<dyn JobsQuery>,
    pub user_type: Arc<dyn UserTypeCommand>,
}

impl HttpState {
    /// Construct state from explicit port implementations.
    pub fn new(
        sessions: Arc<dyn SessionService>,
        jobs: Arc<dyn JobsQuery>,
        user_type: Arc<dyn UserTypeCommand>,
    ) -> Self {
        Self {
            sessions,
            jobs,
            user_type,
        }
    }

    /// Fixture-backed state for handler tests and local bring-up.
    pub fn fixtures() -> Self {
        Self {
            sessions: Arc::new(FixtureSessionService),
            jobs: Arc::new(FixtureJobsQuery),
            user_type: Arc::new(FixtureUserTypeCommand),
        }
    }
}
