//! Member bearer token entity.

use chrono::{DateTime, Utc};

/// A bearer token issued to a member.
///
/// Only the HMAC hash of the raw token is stored.
#[derive(Debug, Clone)]
pub struct MemberToken {
    pub id: i64,
    pub member_no: i64,
    pub name: String,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl MemberToken {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}
