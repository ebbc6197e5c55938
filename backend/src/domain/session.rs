//! Request-scoped authenticated session.

use chrono::{DateTime, Utc};

use super::user::{PrincipalId, UserType};

/// Authenticated caller context derived per request and never persisted.
///
/// ## Invariants
/// - `user_type` is always taken from the relational user record, not from
///   the credential's embedded claim, so a half-finished claims sync can
///   never grant a stale role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub principal_id: PrincipalId,
    pub user_type: UserType,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Whether this session belongs to the given principal.
    pub fn is_principal(&self, id: &PrincipalId) -> bool {
        &self.principal_id == id
    }
}
