//! # Session Manager
//!
//! Issues, validates and expires login tokens, and gates admin-only
//! operations.
//!
//! Sessions are stored under `api_session_<token>`, so any number of users can
//! be signed in at once. Every protected operation takes the caller's token
//! and passes it through [`SessionManager::require_auth`].
//!
//! Expiry is checked lazily: a session past its `expires_at` is deleted the
//! first time it is presented, and the caller gets `SessionExpired`. The next
//! call with the same token sees no session at all.

use crate::error::{ApiError, ApiResult};
use crate::ids;
use crate::model::{LoginData, Session, User};
use crate::seed;
use crate::state::ShopState;
use chrono::{Duration, Utc};
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct SessionManager {
    state: ShopState,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(state: ShopState, ttl: Duration) -> Self {
        Self { state, ttl }
    }

    /// Checks the credentials and opens a session.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginData> {
        let users = self.state.users().await?;
        let user = users
            .into_iter()
            .find(|u| u.email == email)
            .ok_or(ApiError::InvalidCredentials)?;

        if !seed::credentials_match(email, password) {
            return Err(ApiError::InvalidCredentials);
        }

        let token = ids::session_token(&user.id);
        let session = Session {
            user_id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            expires_at: Utc::now() + self.ttl,
        };
        self.state.save_session(&token, &session).await?;

        info!(user_id = %user.id, role = %user.role, "Logged in");
        Ok(LoginData { user, token })
    }

    /// Drops the session behind `token`, if there is one.
    pub async fn logout(&self, token: &str) -> ApiResult<()> {
        self.state.delete_session(token).await?;
        debug!("Logged out");
        Ok(())
    }

    /// Resolves `token` to a live session.
    ///
    /// Fails with `AuthenticationRequired` when no session exists,
    /// `SessionExpired` when it has expired (the session is removed), and
    /// `AdminRequired` when `needs_admin` is set for a non-admin.
    pub async fn require_auth(&self, token: &str, needs_admin: bool) -> ApiResult<Session> {
        let session = self
            .state
            .session(token)
            .await?
            .ok_or(ApiError::AuthenticationRequired)?;

        if session.is_expired(Utc::now()) {
            self.state.delete_session(token).await?;
            info!(user_id = %session.user_id, "Session expired");
            return Err(ApiError::SessionExpired);
        }

        if needs_admin && !session.is_admin() {
            return Err(ApiError::AdminRequired);
        }

        Ok(session)
    }

    /// The user behind `token`.
    pub async fn current_user(&self, token: &str) -> ApiResult<User> {
        let session = self.require_auth(token, false).await?;
        self.state
            .users()
            .await?
            .into_iter()
            .find(|u| u.id == session.user_id)
            .ok_or(ApiError::UserNotFound(session.user_id))
    }

    /// Whether `token` maps to a live session. Never removes anything.
    pub async fn is_authenticated(&self, token: &str) -> ApiResult<bool> {
        Ok(self
            .state
            .session(token)
            .await?
            .is_some_and(|s| !s.is_expired(Utc::now())))
    }
}
