//! Access gate: pure authorization rules for the marketplace.
//!
//! No IO, no panics, no business logic beyond policy. Rules are evaluated
//! in declaration order and the first match wins; anything unmatched is
//! denied. Keeping the gate pure lets the graph reader load first and trim
//! afterwards, and lets both be tested in isolation.

use super::error::Error;
use super::session::Session;
use super::user::{PrincipalId, UserType};

/// Operations the gate knows how to judge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// List the caller's own jobs. Scope is forced to the caller's id; a
    /// company can never list another company's jobs through this action.
    ListOwnJobs,
    /// Read a single job page. Public to any authenticated session; the
    /// nested proposal list is trimmed separately per submitter.
    ReadJob,
    /// Mutate a project owned by `owner` (status change and the like).
    MutateProject { owner: PrincipalId },
    /// Change the role recorded for `target` in both stores.
    ChangeUserType { target: PrincipalId },
}

/// Field-level visibility for a proposal's submitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Viewer may see the submitter's name and image.
    Full,
    /// Viewer sees only non-identifying fields.
    Redacted,
}

/// Authorize `action` for `session`. Default-deny.
pub fn authorize(session: &Session, action: &Action) -> Result<(), Error> {
    match action {
        Action::ListOwnJobs => {
            if session.user_type == UserType::Company {
                Ok(())
            } else {
                Err(Error::forbidden("only company accounts can list their jobs"))
            }
        }
        Action::ReadJob => Ok(()),
        Action::MutateProject { owner } => {
            if session.user_type == UserType::Company && session.is_principal(owner) {
                Ok(())
            } else {
                Err(Error::forbidden("project does not belong to this account"))
            }
        }
        Action::ChangeUserType { target } => {
            // The one-off admin identity of the original system is gone; a
            // role change is an explicit operation on the caller's own record.
            if session.is_principal(target) {
                Ok(())
            } else {
                Err(Error::forbidden("cannot change another account's role"))
            }
        }
    }
}

/// Visibility of a proposal submitter's profile for this viewer.
///
/// Full profile fields are visible to the job's owning company and to the
/// submitter themself; every other viewer gets the redacted shape.
pub fn submitter_visibility(
    session: &Session,
    company_id: &PrincipalId,
    submitter_id: &PrincipalId,
) -> Visibility {
    if session.is_principal(company_id) || session.is_principal(submitter_id) {
        Visibility::Full
    } else {
        Visibility::Redacted
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use chrono::{Duration, Utc};
    use rstest::rstest;

    fn session(id: &str, user_type: UserType) -> Session {
        Session {
            principal_id: PrincipalId::new(id).expect("fixture id"),
            user_type,
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    fn pid(id: &str) -> PrincipalId {
        PrincipalId::new(id).expect("fixture id")
    }

    #[rstest]
    #[case(UserType::Company, true)]
    #[case(UserType::Freelancer, false)]
    fn listing_own_jobs_requires_company(#[case] user_type: UserType, #[case] allowed: bool) {
        let result = authorize(&session("usr_a", user_type), &Action::ListOwnJobs);
        match (allowed, result) {
            (true, Ok(())) => {}
            (false, Err(err)) => assert_eq!(err.code(), ErrorCode::Forbidden),
            (expected, got) => panic!("expected allowed={expected}, got {got:?}"),
        }
    }

    #[rstest]
    #[case(UserType::Freelancer)]
    #[case(UserType::Company)]
    fn reading_a_job_is_open_to_any_session(#[case] user_type: UserType) {
        authorize(&session("usr_a", user_type), &Action::ReadJob).expect("read is public");
    }

    #[rstest]
    fn mutating_someone_elses_project_is_forbidden() {
        let err = authorize(
            &session("usr_a", UserType::Company),
            &Action::MutateProject { owner: pid("usr_b") },
        )
        .expect_err("not the owner");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    fn freelancer_cannot_mutate_even_their_own_id_as_owner() {
        // Wrong user type is denied even when the ids line up.
        let err = authorize(
            &session("usr_a", UserType::Freelancer),
            &Action::MutateProject { owner: pid("usr_a") },
        )
        .expect_err("wrong role");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }

    #[rstest]
    fn owner_may_mutate_their_project() {
        authorize(
            &session("usr_a", UserType::Company),
            &Action::MutateProject { owner: pid("usr_a") },
        )
        .expect("owner allowed");
    }

    #[rstest]
    #[case("usr_a", "usr_a", true)]
    #[case("usr_a", "usr_b", false)]
    fn role_changes_are_self_service_only(
        #[case] caller: &str,
        #[case] target: &str,
        #[case] allowed: bool,
    ) {
        let result = authorize(
            &session(caller, UserType::Freelancer),
            &Action::ChangeUserType { target: pid(target) },
        );
        assert_eq!(result.is_ok(), allowed);
    }

    #[rstest]
    #[case("usr_company", Visibility::Full)]
    #[case("usr_submitter", Visibility::Full)]
    #[case("usr_other", Visibility::Redacted)]
    fn submitter_profile_visible_to_owner_and_submitter_only(
        #[case] viewer: &str,
        #[case] expected: Visibility,
    ) {
        let viewer_session = session(viewer, UserType::Freelancer);
        let visibility = submitter_visibility(
            &viewer_session,
            &pid("usr_company"),
            &pid("usr_submitter"),
        );
        assert_eq!(visibility, expected);
    }
}
