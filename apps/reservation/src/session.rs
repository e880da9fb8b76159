//! Identity of the current user
//!
//! The form receives a [`SessionContext`] when it is created and copies the
//! user id into the draft. Nothing in the library reads ambient state.

/// Environment variable read by [`SessionContext::from_env`]
pub const USER_ID_ENV: &str = "SHOWTIME_USER_ID";

/// Who is making the reservation
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionContext {
    user_id: Option<String>,
}

impl SessionContext {
    /// Session for a signed-in user
    #[must_use]
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    /// Session without a user
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user_id: None }
    }

    /// Session from `SHOWTIME_USER_ID`; unset or blank means anonymous
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(USER_ID_ENV)
            .ok()
            .filter(|id| !id.trim().is_empty())
            .map_or_else(Self::anonymous, Self::signed_in)
    }

    /// Current user id, if any
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// User id as stored in the draft; empty when anonymous
    #[must_use]
    pub fn draft_user_id(&self) -> String {
        self.user_id.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_session_has_empty_draft_id() {
        let session = SessionContext::anonymous();
        assert_eq!(session.user_id(), None);
        assert_eq!(session.draft_user_id(), "");
    }

    #[test]
    fn signed_in_session_keeps_id() {
        let session = SessionContext::signed_in("u-7");
        assert_eq!(session.user_id(), Some("u-7"));
        assert_eq!(session.draft_user_id(), "u-7");
    }
}
