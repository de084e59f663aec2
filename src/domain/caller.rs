//! Identity of the member issuing a request.

use crate::error::AppError;

/// Message returned when a mutating operation is attempted anonymously.
pub const LOGIN_REQUIRED_MESSAGE: &str = "로그인이 필요합니다.";

/// Who is calling: a resolved member or nobody.
///
/// Read operations accept both variants and let the service decide what an
/// anonymous caller may see. Mutating operations unwrap the member number
/// with [`Caller::require_member`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Caller {
    Authenticated { member_no: i64 },
    Anonymous,
}

impl Caller {
    pub fn member_no(&self) -> Option<i64> {
        match self {
            Caller::Authenticated { member_no } => Some(*member_no),
            Caller::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Caller::Authenticated { .. })
    }

    /// Returns the member number, or `401 Unauthorized` for anonymous callers.
    pub fn require_member(self) -> Result<i64, AppError> {
        self.member_no()
            .ok_or_else(|| AppError::unauthorized(LOGIN_REQUIRED_MESSAGE))
    }
}

impl From<Option<i64>> for Caller {
    fn from(member_no: Option<i64>) -> Self {
        match member_no {
            Some(member_no) => Caller::Authenticated { member_no },
            None => Caller::Anonymous,
        }
    }
}
