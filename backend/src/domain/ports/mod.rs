//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod identity_provider;
mod jobs_query;
mod project_store;
mod session_service;
mod user_store;
mod user_type_command;

#[cfg(test)]
pub use identity_provider::MockIdentityProvider;
pub use identity_provider::{
    FIXTURE_CREDENTIAL, FIXTURE_PRINCIPAL_ID, FixtureIdentityProvider, IdentityProvider,
    IdentityProviderError,
};
pub use jobs_query::{FixtureJobsQuery, JobsQuery};
#[cfg(test)]
pub use project_store::MockProjectStore;
pub use project_store::{
    ProjectGraphRecord, ProjectStore, ProjectStoreError, ProjectWithProposalCount, ProposalRecord,
};
pub use session_service::{FixtureSessionService, SessionService};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{UserStore, UserStoreError};
pub use user_type_command::{FixtureUserTypeCommand, UserTypeCommand};
