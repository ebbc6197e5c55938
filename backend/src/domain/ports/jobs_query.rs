//! Driving port for job reads.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::project::{JobGraph, JobSummary, ProjectId};
use crate::domain::session::Session;

/// Domain use-case port for reading the job graph.
#[async_trait]
pub trait JobsQuery: Send + Sync {
    /// Load one job with company card and viewer-trimmed proposals.
    async fn get_job(&self, id: ProjectId, session: &Session) -> Result<JobGraph, Error>;

    /// List the caller's own jobs with proposal counts, newest first.
    async fn list_my_jobs(&self, session: &Session) -> Result<Vec<JobSummary>, Error>;
}

/// Fixture query for handler tests that do not exercise job reads.
///
/// Behaves like an empty marketplace: every lookup is absent and listings
/// are empty (the access gate still applies).
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureJobsQuery;

#[async_trait]
impl JobsQuery for FixtureJobsQuery {
    async fn get_job(&self, _id: ProjectId, _session: &Session) -> Result<JobGraph, Error> {
        Err(Error::not_found("job not found"))
    }

    async fn list_my_jobs(&self, session: &Session) -> Result<Vec<JobSummary>, Error> {
        crate::domain::access::authorize(session, &crate::domain::access::Action::ListOwnJobs)?;
        Ok(Vec::new())
    }
}
