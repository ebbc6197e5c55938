//! User identity and role model.
//!
//! The marketplace keeps two records of who a user is: the identity
//! provider's principal (external) and the relational user row (local).
//! Both are keyed by the same opaque [`PrincipalId`]; the relational
//! [`UserRecord::user_type`] is the authoritative role for authorization.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors returned by identity constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    UntrimmedId,
    UnknownUserType { value: String },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "principal id must not be empty"),
            Self::UntrimmedId => write!(f, "principal id must not carry surrounding whitespace"),
            Self::UnknownUserType { value } => {
                write!(f, "unknown user type '{value}' (expected freelancer or company)")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable identifier shared by the identity provider and the relational store.
///
/// Provider ids are opaque strings, not UUIDs; the only invariants are
/// non-emptiness and the absence of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "usr_2f9Qk3b")]
pub struct PrincipalId(String);

impl PrincipalId {
    /// Validate and construct a [`PrincipalId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::UntrimmedId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for PrincipalId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<PrincipalId> for String {
    fn from(value: PrincipalId) -> Self {
        value.0
    }
}

impl TryFrom<String> for PrincipalId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Marketplace role recorded for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    /// Submits proposals against company projects.
    Freelancer,
    /// Owns projects and reviews incoming proposals.
    Company,
}

impl UserType {
    /// Canonical lowercase name as stored relationally and in claims.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Freelancer => "freelancer",
            Self::Company => "company",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "freelancer" => Ok(Self::Freelancer),
            "company" => Ok(Self::Company),
            other => Err(UserValidationError::UnknownUserType {
                value: other.to_owned(),
            }),
        }
    }
}

/// Relational user row as the authorization layer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: PrincipalId,
    pub user_type: UserType,
    pub updated_at: DateTime<Utc>,
}

/// Identifying profile fields subject to visibility trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: PrincipalId,
    pub name: Option<String>,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyId)]
    #[case(" usr_1", UserValidationError::UntrimmedId)]
    #[case("usr_1 ", UserValidationError::UntrimmedId)]
    fn invalid_principal_ids(#[case] raw: &str, #[case] expected: UserValidationError) {
        let err = PrincipalId::new(raw).expect_err("invalid id must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("usr_2f9Qk3b")]
    #[case("auth0|64b2")]
    fn opaque_ids_survive_round_trips(#[case] raw: &str) {
        let id = PrincipalId::new(raw).expect("valid id");
        assert_eq!(id.as_ref(), raw);
        let json = serde_json::to_string(&id).expect("serialise");
        let back: PrincipalId = serde_json::from_str(&json).expect("deserialise");
        assert_eq!(back, id);
    }

    #[rstest]
    #[case("freelancer", UserType::Freelancer)]
    #[case("company", UserType::Company)]
    fn user_type_parses_canonical_names(#[case] raw: &str, #[case] expected: UserType) {
        assert_eq!(raw.parse::<UserType>().expect("known type"), expected);
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    fn unknown_user_type_is_rejected() {
        let err = "admin".parse::<UserType>().expect_err("unknown must fail");
        assert_eq!(
            err,
            UserValidationError::UnknownUserType {
                value: "admin".to_owned()
            }
        );
    }
}
