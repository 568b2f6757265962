use crate::model::{Role, User};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-side record bound to a login token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// A session is no longer valid from `expires_at` on.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Payload returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user: User,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let session = Session {
            user_id: "2".into(),
            email: "user@test.com".into(),
            role: Role::Customer,
            expires_at: now,
        };
        assert!(!session.is_expired(now - Duration::milliseconds(1)));
        assert!(session.is_expired(now));
        assert!(session.is_expired(now + Duration::milliseconds(1)));
    }
}
