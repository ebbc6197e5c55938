//! Diesel row structs mapping the marketplace tables to domain types.
//!
//! Rows stay private to the outbound layer; conversion into domain types
//! validates stored enum strings and ids so a corrupt row surfaces as a
//! query error rather than a panic.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::project::{Project, ProjectId, Proposal, ProposalId};
use crate::domain::user::{PrincipalId, UserProfile, UserRecord, UserValidationError};

use super::schema::{projects, proposals, users};

/// Authorization-relevant columns of a user row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRecordRow {
    pub id: String,
    pub user_type: String,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<UserRecordRow> for UserRecord {
    type Error = UserValidationError;

    fn try_from(row: UserRecordRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PrincipalId::new(row.id)?,
            user_type: row.user_type.parse()?,
            updated_at: row.updated_at,
        })
    }
}

/// Identifying profile columns of a user row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserProfileRow {
    pub id: String,
    pub name: Option<String>,
    pub image_url: Option<String>,
}

impl TryFrom<UserProfileRow> for UserProfile {
    type Error = UserValidationError;

    fn try_from(row: UserProfileRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PrincipalId::new(row.id)?,
            name: row.name,
            image_url: row.image_url,
        })
    }
}

/// A full project row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProjectRow {
    pub id: uuid::Uuid,
    pub company_id: String,
    pub title: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Conversion failures for project and proposal rows.
#[derive(Debug, thiserror::Error)]
pub(crate) enum RowConversionError {
    #[error("{0}")]
    Identity(#[from] UserValidationError),
    #[error("unknown status '{value}' on row {id}")]
    UnknownStatus { id: uuid::Uuid, value: String },
}

impl TryFrom<ProjectRow> for Project {
    type Error = RowConversionError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let status = match row.status.as_str() {
            "open" => crate::domain::project::ProjectStatus::Open,
            "closed" => crate::domain::project::ProjectStatus::Closed,
            other => {
                return Err(RowConversionError::UnknownStatus {
                    id: row.id,
                    value: other.to_owned(),
                });
            }
        };
        Ok(Self {
            id: ProjectId::from_uuid(row.id),
            company_id: PrincipalId::new(row.company_id)?,
            title: row.title,
            status,
            created_at: row.created_at,
        })
    }
}

/// A full proposal row.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = proposals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProposalRow {
    pub id: uuid::Uuid,
    pub project_id: uuid::Uuid,
    pub user_id: String,
    pub value: i64,
    pub status: String,
}

impl TryFrom<ProposalRow> for Proposal {
    type Error = RowConversionError;

    fn try_from(row: ProposalRow) -> Result<Self, Self::Error> {
        let status = match row.status.as_str() {
            "pending" => crate::domain::project::ProposalStatus::Pending,
            "accepted" => crate::domain::project::ProposalStatus::Accepted,
            "rejected" => crate::domain::project::ProposalStatus::Rejected,
            other => {
                return Err(RowConversionError::UnknownStatus {
                    id: row.id,
                    value: other.to_owned(),
                });
            }
        };
        Ok(Self {
            id: ProposalId::from_uuid(row.id),
            project_id: ProjectId::from_uuid(row.project_id),
            user_id: PrincipalId::new(row.user_id)?,
            value: row.value,
            status,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::project::{ProjectStatus, ProposalStatus};
    use crate::domain::user::UserType;
    use rstest::rstest;

    #[rstest]
    fn user_record_row_parses_role() {
        let row = UserRecordRow {
            id: "usr_1".to_owned(),
            user_type: "company".to_owned(),
            updated_at: Utc::now(),
        };
        let record = UserRecord::try_from(row).expect("valid row");
        assert_eq!(record.user_type, UserType::Company);
    }

    #[rstest]
    fn user_record_row_rejects_unknown_role() {
        let row = UserRecordRow {
            id: "usr_1".to_owned(),
            user_type: "superuser".to_owned(),
            updated_at: Utc::now(),
        };
        assert!(UserRecord::try_from(row).is_err());
    }

    #[rstest]
    #[case("open", ProjectStatus::Open)]
    #[case("closed", ProjectStatus::Closed)]
    fn project_row_parses_status(#[case] raw: &str, #[case] expected: ProjectStatus) {
        let row = ProjectRow {
            id: uuid::Uuid::nil(),
            company_id: "usr_c".to_owned(),
            title: "job".to_owned(),
            status: raw.to_owned(),
            created_at: Utc::now(),
        };
        let project = Project::try_from(row).expect("valid row");
        assert_eq!(project.status, expected);
    }

    #[rstest]
    fn proposal_row_rejects_unknown_status() {
        let row = ProposalRow {
            id: uuid::Uuid::nil(),
            project_id: uuid::Uuid::nil(),
            user_id: "usr_f".to_owned(),
            value: 1_000,
            status: "withdrawn".to_owned(),
        };
        assert!(Proposal::try_from(row).is_err());
    }

    #[rstest]
    fn proposal_row_converts_fields() {
        let row = ProposalRow {
            id: uuid::Uuid::nil(),
            project_id: uuid::Uuid::nil(),
            user_id: "usr_f".to_owned(),
            value: 250_000,
            status: "pending".to_owned(),
        };
        let proposal = Proposal::try_from(row).expect("valid row");
        assert_eq!(proposal.value, 250_000);
        assert_eq!(proposal.status, ProposalStatus::Pending);
    }
}
