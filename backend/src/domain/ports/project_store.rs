//! Driven port for project/proposal persistence.
//!
//! The graph read returns one cohesive record (project, owning company
//! profile, proposals, submitter profiles) so consumers get a consistent
//! snapshot without sequencing individual queries. Visibility trimming is
//! *not* applied here; the store always loads full profiles and the job
//! reader masks them per viewer.

use async_trait::async_trait;

use crate::domain::project::{Project, ProjectId, Proposal};
use crate::domain::user::{PrincipalId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by project store adapters.
    pub enum ProjectStoreError {
        /// Store connection could not be established or timed out.
        Connection { message: String } => "project store connection failed: {message}",
        /// Query failed during execution or row conversion.
        Query { message: String } => "project store query failed: {message}",
    }
}

/// A proposal joined with its submitter's full profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalRecord {
    pub proposal: Proposal,
    pub submitter: Option<UserProfile>,
}

/// Untrimmed job graph as loaded from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectGraphRecord {
    pub project: Project,
    pub company: Option<UserProfile>,
    pub proposals: Vec<ProposalRecord>,
}

/// Listing row: a project plus its aggregate proposal count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectWithProposalCount {
    pub project: Project,
    pub proposal_count: u32,
}

/// Capability interface over the project and proposal tables.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Load a project with company and proposals; `None` when absent.
    async fn find_graph(
        &self,
        id: ProjectId,
    ) -> Result<Option<ProjectGraphRecord>, ProjectStoreError>;

    /// List projects owned by `company_id` with proposal counts.
    ///
    /// Adapters order rows by `created_at` descending, `id` ascending on
    /// ties; the job reader re-asserts the same order for fixtures.
    async fn list_by_company(
        &self,
        company_id: &PrincipalId,
    ) -> Result<Vec<ProjectWithProposalCount>, ProjectStoreError>;
}
