//! Project (job) and proposal data model plus viewer-facing shapes.
//!
//! Storage rows carry full submitter profiles; the viewer-facing types in
//! this module are produced *after* the visibility mask is applied, so an
//! inbound adapter can serialise them without re-checking permissions.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::{PrincipalId, UserProfile};

/// Stable project identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct ProjectId(Uuid);

impl ProjectId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ProjectId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// Stable proposal identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct ProposalId(Uuid);

impl ProposalId {
    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Open,
    Closed,
}

impl ProjectStatus {
    /// Canonical lowercase name as stored relationally.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Lifecycle state of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    Pending,
    Accepted,
    Rejected,
}

impl ProposalStatus {
    /// Canonical lowercase name as stored relationally.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

/// A job posted by a company user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub company_id: PrincipalId,
    pub title: String,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
}

/// A freelancer's offer against a project. `value` is in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    pub id: ProposalId,
    pub project_id: ProjectId,
    pub user_id: PrincipalId,
    pub value: i64,
    pub status: ProposalStatus,
}

/// Owning company as shown on a job page: identifying card only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompanyCard {
    pub id: PrincipalId,
    pub name: Option<String>,
    pub image_url: Option<String>,
}

impl From<UserProfile> for CompanyCard {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            name: profile.name,
            image_url: profile.image_url,
        }
    }
}

/// Proposal submitter after visibility trimming.
///
/// `Redacted` exposes only the non-identifying id so counts and joins stay
/// stable for every viewer; name and image exist solely in `Full`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", tag = "visibility")]
pub enum SubmitterView {
    Full {
        id: PrincipalId,
        name: Option<String>,
        image_url: Option<String>,
    },
    Redacted {
        id: PrincipalId,
    },
}

impl SubmitterView {
    /// Submitter id regardless of trimming.
    pub fn id(&self) -> &PrincipalId {
        match self {
            Self::Full { id, .. } | Self::Redacted { id } => id,
        }
    }
}

/// A proposal as seen by a specific viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProposalView {
    pub id: ProposalId,
    pub value: i64,
    pub status: ProposalStatus,
    pub submitter: SubmitterView,
}

/// Fully materialised job page snapshot for one viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobGraph {
    pub project: Project,
    pub company: CompanyCard,
    pub proposals: Vec<ProposalView>,
}

/// Listing row for a company's own jobs; proposals are counted, not loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: ProjectId,
    pub title: String,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub proposal_count: u32,
}

impl JobSummary {
    /// Listing order: `created_at` descending, ties broken by `id` ascending.
    ///
    /// The persistence adapter orders its query the same way; re-asserting
    /// the order here keeps fixture-backed stores deterministic too.
    pub fn listing_order(a: &Self, b: &Self) -> Ordering {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn summary(ts: i64, id: &str) -> JobSummary {
        JobSummary {
            id: ProjectId::from_uuid(id.parse().expect("fixture uuid")),
            title: "job".to_owned(),
            status: ProjectStatus::Open,
            created_at: Utc.timestamp_opt(ts, 0).single().expect("fixture time"),
            proposal_count: 0,
        }
    }

    #[rstest]
    fn listing_order_is_created_desc_then_id_asc() {
        // A(createdAt=10, id=..b), B(createdAt=10, id=..a), C(createdAt=20, id=..f).
        let a = summary(10, "00000000-0000-0000-0000-00000000000b");
        let b = summary(10, "00000000-0000-0000-0000-00000000000a");
        let c = summary(20, "00000000-0000-0000-0000-00000000000f");

        let mut rows = vec![a.clone(), b.clone(), c.clone()];
        rows.sort_by(JobSummary::listing_order);
        assert_eq!(rows, vec![c, b, a]);
    }

    #[rstest]
    fn redacted_submitter_serialises_without_identifying_fields() {
        let view = SubmitterView::Redacted {
            id: PrincipalId::new("usr_9").expect("fixture id"),
        };
        let value = serde_json::to_value(&view).expect("serialise");
        assert_eq!(value.get("visibility"), Some(&serde_json::json!("redacted")));
        assert!(value.get("name").is_none());
        assert!(value.get("imageUrl").is_none());
    }
}
