//! Job graph reads with viewer-scoped field trimming.
//!
//! Loads the full graph through the project store, then applies the access
//! gate's pure visibility mask. Loading first and trimming second keeps
//! the gate and the reader independently testable, at the cost of loading
//! profile fields that some viewers never see.
//!
//! The graph is a fully materialised snapshot sized by proposals-per-job;
//! that is assumed small and unpaginated, which becomes a scaling risk if
//! jobs start attracting thousands of proposals.

use std::sync::Arc;

use async_trait::async_trait;

use super::access::{Action, Visibility, authorize, submitter_visibility};
use super::error::Error;
use super::ports::{
    JobsQuery, ProjectGraphRecord, ProjectStore, ProjectStoreError, ProposalRecord,
};
use super::project::{
    CompanyCard, JobGraph, JobSummary, ProjectId, ProposalView, SubmitterView,
};
use super::session::Session;

/// Reads jobs and job listings on behalf of a session.
#[derive(Clone)]
pub struct JobGraphReader<S> {
    projects: Arc<S>,
}

impl<S> JobGraphReader<S> {
    /// Create a reader over the given project store.
    pub fn new(projects: Arc<S>) -> Self {
        Self { projects }
    }
}

fn map_store_error(error: &ProjectStoreError) -> Error {
    match error {
        ProjectStoreError::Connection { .. } => {
            Error::service_unavailable("project store unavailable")
        }
        ProjectStoreError::Query { .. } => Error::internal("project read failed"),
    }
}

fn trim_proposal(
    record: ProposalRecord,
    session: &Session,
    company_id: &crate::domain::user::PrincipalId,
) -> ProposalView {
    let ProposalRecord {
        proposal,
        submitter,
    } = record;
    let submitter_view = match submitter_visibility(session, company_id, &proposal.user_id) {
        Visibility::Full => SubmitterView::Full {
            id: proposal.user_id.clone(),
            name: submitter.as_ref().and_then(|p| p.name.clone()),
            image_url: submitter.as_ref().and_then(|p| p.image_url.clone()),
        },
        Visibility::Redacted => SubmitterView::Redacted {
            id: proposal.user_id.clone(),
        },
    };
    ProposalView {
        id: proposal.id,
        value: proposal.value,
        status: proposal.status,
        submitter: submitter_view,
    }
}

fn assemble_graph(record: ProjectGraphRecord, session: &Session) -> JobGraph {
    let ProjectGraphRecord {
        project,
        company,
        proposals,
    } = record;
    let company = company.map_or_else(
        || CompanyCard {
            id: project.company_id.clone(),
            name: None,
            image_url: None,
        },
        CompanyCard::from,
    );
    let proposals = proposals
        .into_iter()
        .map(|proposal| trim_proposal(proposal, session, &project.company_id))
        .collect();
    JobGraph {
        project,
        company,
        proposals,
    }
}

#[async_trait]
impl<S> JobsQuery for JobGraphReader<S>
where
    S: ProjectStore,
{
    async fn get_job(&self, id: ProjectId, session: &Session) -> Result<JobGraph, Error> {
        authorize(session, &Action::ReadJob)?;

        let record = self
            .projects
            .find_graph(id)
            .await
            .map_err(|err| map_store_error(&err))?;

        // Absent and malformed ids are reported identically upstream; the
        // inbound adapter folds unparseable path ids into the same error.
        let Some(record) = record else {
            return Err(Error::not_found("job not found"));
        };
        Ok(assemble_graph(record, session))
    }

    async fn list_my_jobs(&self, session: &Session) -> Result<Vec<JobSummary>, Error> {
        authorize(session, &Action::ListOwnJobs)?;

        // Scope is forced to the session principal; no caller-supplied
        // company id exists on this path.
        let rows = self
            .projects
            .list_by_company(&session.principal_id)
            .await
            .map_err(|err| map_store_error(&err))?;

        let mut summaries: Vec<JobSummary> = rows
            .into_iter()
            .map(|row| JobSummary {
                id: row.project.id,
                title: row.project.title,
                status: row.project.status,
                created_at: row.project.created_at,
                proposal_count: row.proposal_count,
            })
            .collect();
        summaries.sort_by(JobSummary::listing_order);
        Ok(summaries)
    }
}
