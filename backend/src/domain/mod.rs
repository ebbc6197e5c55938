//! Domain primitives, services, and ports for the marketplace
//! authorization core.
//!
//! Everything here is transport and storage agnostic. Inbound adapters map
//! the [`Error`] payload onto HTTP; outbound adapters implement the traits
//! under [`ports`]. The four services (`IdentityVerifier`,
//! `ClaimsSynchronizer`, `SessionResolver`, `JobGraphReader`) contain the
//! only real invariants in the system: the dual-store role agreement and
//! the viewer-scoped trimming of the job graph.

pub mod access;
pub mod claims_sync;
pub mod error;
pub mod identity;
pub mod job_reader;
pub mod ports;
pub mod principal;
pub mod project;
pub mod session;
pub mod session_resolver;
pub mod user;

pub use self::access::{Action, Visibility, authorize, submitter_visibility};
pub use self::claims_sync::{ClaimsSynchronizer, SyncStage};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity::IdentityVerifier;
pub use self::job_reader::JobGraphReader;
pub use self::principal::{AuthClaims, ClaimsWindowError, Principal, validate_window};
pub use self::project::{
    CompanyCard, JobGraph, JobSummary, Project, ProjectId, ProjectStatus, Proposal, ProposalId,
    ProposalStatus, ProposalView, SubmitterView,
};
pub use self::session::Session;
pub use self::session_resolver::SessionResolver;
pub use self::user::{PrincipalId, UserProfile, UserRecord, UserType, UserValidationError};
