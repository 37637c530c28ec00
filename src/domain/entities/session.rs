//! Per-request caller identity.

/// The caller's session as seen by the services.
///
/// Holds at most the logged-in username. Handlers load it from the cookie
/// session and pass it explicitly into service calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserSession {
    user: Option<String>,
}

impl UserSession {
    /// A session with nobody logged in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session bound to `username`.
    pub fn for_user(username: impl Into<String>) -> Self {
        Self {
            user: Some(username.into()),
        }
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Drops the bound username. Clearing an anonymous session is a no-op.
    pub fn clear(&mut self) {
        self.user = None;
    }
}
