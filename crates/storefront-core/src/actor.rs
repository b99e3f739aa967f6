//! The shopper on whose behalf requests are made, as reported by the
//! authentication provider.

/// A signed-in user. The access token is sent as a bearer credential and
/// never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    access_token: String,
}

impl User {
    pub fn new(id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            access_token: access_token.into(),
        }
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl std::fmt::Debug for User {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("access_token", &"[redacted]")
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Actor {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Actor {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Actor::Authenticated(_))
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&User> {
        match self {
            Actor::Authenticated(user) => Some(user),
            Actor::Anonymous => None,
        }
    }

    /// Stable key used to tell whether two checks were made for the same
    /// actor.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.current_user().map(|u| u.id.as_str())
    }
}
