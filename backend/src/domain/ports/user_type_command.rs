//! Driving port for role changes across both identity stores.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::session::Session;
use crate::domain::user::{PrincipalId, UserRecord, UserType};

/// Domain use-case port for the two-stage role update.
#[async_trait]
pub trait UserTypeCommand: Send + Sync {
    /// Change `target`'s role in the relational store and provider claims.
    ///
    /// The caller's session is gated first (self-service only); the update
    /// then runs relational-first with the partial-failure contract
    /// described on `ClaimsSynchronizer`.
    async fn set_user_type(
        &self,
        session: &Session,
        target: &PrincipalId,
        new_type: UserType,
    ) -> Result<UserRecord, Error>;
}

/// Fixture command for handler tests that do not exercise synchronisation.
///
/// Applies the access gate, then pretends both stages committed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserTypeCommand;

#[async_trait]
impl UserTypeCommand for FixtureUserTypeCommand {
    async fn set_user_type(
        &self,
        session: &Session,
        target: &PrincipalId,
        new_type: UserType,
    ) -> Result<UserRecord, Error> {
        use crate::domain::access::{Action, authorize};

        authorize(
            session,
            &Action::ChangeUserType {
                target: target.clone(),
            },
        )?;
        Ok(UserRecord {
            id: target.clone(),
            user_type: new_type,
            updated_at: chrono::Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use chrono::{Duration, Utc};
    use rstest::rstest;

    fn session(id: &str) -> Session {
        Session {
            principal_id: PrincipalId::new(id).expect("fixture id"),
            user_type: UserType::Freelancer,
            expires_at: Utc::now() + Duration::hours(1),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_command_gates_targets() {
        let own = PrincipalId::new("usr_a").expect("fixture id");
        let other = PrincipalId::new("usr_b").expect("fixture id");

        let updated = FixtureUserTypeCommand
            .set_user_type(&session("usr_a"), &own, UserType::Company)
            .await
            .expect("self-service change allowed");
        assert_eq!(updated.user_type, UserType::Company);

        let err = FixtureUserTypeCommand
            .set_user_type(&session("usr_a"), &other, UserType::Company)
            .await
            .expect_err("foreign change denied");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
