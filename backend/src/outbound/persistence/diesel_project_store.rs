//! Diesel-backed implementation of the project store port.
//!
//! `find_graph` materialises the project, the owning company's profile,
//! every proposal and every submitter profile in one logical read so the
//! job reader sees a consistent snapshot. Profiles are batch-loaded to
//! avoid per-proposal queries.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    ProjectGraphRecord, ProjectStore, ProjectStoreError, ProjectWithProposalCount, ProposalRecord,
};
use crate::domain::project::{Project, ProjectId, Proposal};
use crate::domain::user::{PrincipalId, UserProfile};

use super::models::{ProjectRow, ProposalRow, UserProfileRow};
use super::pool::{DbPool, PoolError};
use super::schema::{projects, proposals, users};

/// PostgreSQL adapter for [`ProjectStore`].
#[derive(Clone)]
pub struct DieselProjectStore {
    pool: DbPool,
}

impl DieselProjectStore {
    /// Create a store backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(err: PoolError) -> ProjectStoreError {
    ProjectStoreError::connection(err.to_string())
}

fn map_diesel_error(err: diesel::result::Error) -> ProjectStoreError {
    ProjectStoreError::query(err.to_string())
}

fn map_row_error(err: impl std::fmt::Display) -> ProjectStoreError {
    ProjectStoreError::query(err.to_string())
}

async fn load_profiles(
    conn: &mut diesel_async::AsyncPgConnection,
    ids: &[&str],
) -> Result<HashMap<PrincipalId, UserProfile>, ProjectStoreError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<UserProfileRow> = users::table
        .filter(users::id.eq_any(ids.iter().copied()))
        .select(UserProfileRow::as_select())
        .load(conn)
        .await
        .map_err(map_diesel_error)?;

    rows.into_iter()
        .map(|row| {
            let profile = UserProfile::try_from(row).map_err(map_row_error)?;
            Ok((profile.id.clone(), profile))
        })
        .collect()
}

#[async_trait]
impl ProjectStore for DieselProjectStore {
    async fn find_graph(
        &self,
        id: ProjectId,
    ) -> Result<Option<ProjectGraphRecord>, ProjectStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let project_row = projects::table
            .find(id.as_uuid())
            .select(ProjectRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        let Some(project_row) = project_row else {
            return Ok(None);
        };
        let project = Project::try_from(project_row).map_err(map_row_error)?;

        let proposal_rows: Vec<ProposalRow> = proposals::table
            .filter(proposals::project_id.eq(id.as_uuid()))
            .order(proposals::created_at.asc())
            .select(ProposalRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let proposal_list: Vec<Proposal> = proposal_rows
            .into_iter()
            .map(|row| Proposal::try_from(row).map_err(map_row_error))
            .collect::<Result<_, _>>()?;

        // One batch lookup covers the company card and every submitter.
        let mut profile_ids: Vec<&str> = proposal_list
            .iter()
            .map(|proposal| proposal.user_id.as_ref())
            .collect();
        profile_ids.push(project.company_id.as_ref());
        profile_ids.sort_unstable();
        profile_ids.dedup();

        let mut profiles = load_profiles(&mut conn, &profile_ids).await?;

        let company = profiles.remove(&project.company_id);
        let proposals = proposal_list
            .into_iter()
            .map(|proposal| {
                let submitter = profiles.get(&proposal.user_id).cloned();
                ProposalRecord {
                    proposal,
                    submitter,
                }
            })
            .collect();

        Ok(Some(ProjectGraphRecord {
            project,
            company,
            proposals,
        }))
    }

    async fn list_by_company(
        &self,
        company_id: &PrincipalId,
    ) -> Result<Vec<ProjectWithProposalCount>, ProjectStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let project_rows: Vec<ProjectRow> = projects::table
            .filter(projects::company_id.eq(company_id.as_ref()))
            .order((projects::created_at.desc(), projects::id.asc()))
            .select(ProjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        if project_rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<uuid::Uuid> = project_rows.iter().map(|row| row.id).collect();
        let counts: Vec<(uuid::Uuid, i64)> = proposals::table
            .filter(proposals::project_id.eq_any(&ids))
            .group_by(proposals::project_id)
            .select((proposals::project_id, count_star()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let counts: HashMap<uuid::Uuid, i64> = counts.into_iter().collect();

        project_rows
            .into_iter()
            .map(|row| {
                let count = counts.get(&row.id).copied().unwrap_or(0);
                let project = Project::try_from(row).map_err(map_row_error)?;
                Ok(ProjectWithProposalCount {
                    project,
                    proposal_count: u32::try_from(count).unwrap_or(u32::MAX),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_map_to_connection_failures() {
        let err = map_pool_error(PoolError::checkout("pool exhausted"));
        assert!(matches!(err, ProjectStoreError::Connection { .. }));
    }

    #[rstest]
    fn diesel_errors_map_to_query_failures() {
        let err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(err, ProjectStoreError::Query { .. }));
    }
}
