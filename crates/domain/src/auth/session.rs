//! Auth session aggregate.

use common::UserId;
use serde::{Deserialize, Serialize};

use crate::aggregate::{Aggregate, DomainEvent, SnapshotCapable};

/// Staff role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Waiter,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMIN"),
            Role::Waiter => write!(f, "WAITER"),
        }
    }
}

/// The signed-in staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: UserId,
    pub username: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_name: Option<String>,

    pub role: Role,
}

impl UserInfo {
    /// Returns the real name if known, the username otherwise.
    pub fn display_name(&self) -> &str {
        self.real_name.as_deref().unwrap_or(&self.username)
    }

    /// Returns true for administrators.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Events that can occur on the auth session.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthEvent {
    TokenSet(String),
    UserSet(UserInfo),
    SignedOut,
}

impl std::fmt::Debug for AuthEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthEvent::TokenSet(_) => f.debug_tuple("TokenSet").field(&"<redacted>").finish(),
            AuthEvent::UserSet(user) => f.debug_tuple("UserSet").field(user).finish(),
            AuthEvent::SignedOut => f.write_str("SignedOut"),
        }
    }
}

impl DomainEvent for AuthEvent {
    fn event_type(&self) -> &'static str {
        match self {
            AuthEvent::TokenSet(_) => "TokenSet",
            AuthEvent::UserSet(_) => "UserSet",
            AuthEvent::SignedOut => "SignedOut",
        }
    }
}

/// Bearer token and user of the current staff session.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<UserInfo>,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .finish()
    }
}

impl Aggregate for AuthSession {
    type Event = AuthEvent;

    fn aggregate_type() -> &'static str {
        "AuthSession"
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            AuthEvent::TokenSet(token) => self.token = Some(token),
            AuthEvent::UserSet(user) => self.user = Some(user),
            AuthEvent::SignedOut => {
                self.token = None;
                self.user = None;
            }
        }
    }
}

impl SnapshotCapable for AuthSession {
    fn snapshot_key() -> &'static str {
        "auth"
    }
}

impl AuthSession {
    /// Returns the bearer token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the signed-in user, if known.
    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    /// Returns true if a token is held.
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Stores a token. An empty token signs out.
    pub fn set_token(&self, token: String) -> Vec<AuthEvent> {
        if token.is_empty() {
            return self.clear_token();
        }
        if self.token.as_deref() == Some(token.as_str()) {
            return vec![];
        }

        vec![AuthEvent::TokenSet(token)]
    }

    /// Stores the user profile.
    pub fn set_user(&self, user: UserInfo) -> Vec<AuthEvent> {
        if self.user.as_ref() == Some(&user) {
            return vec![];
        }

        vec![AuthEvent::UserSet(user)]
    }

    /// Drops both token and user.
    pub fn clear_token(&self) -> Vec<AuthEvent> {
        if self.token.is_none() && self.user.is_none() {
            return vec![];
        }

        vec![AuthEvent::SignedOut]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn waiter() -> UserInfo {
        UserInfo {
            id: UserId::new(2),
            username: "amy".to_string(),
            real_name: None,
            role: Role::Waiter,
        }
    }

    #[test]
    fn test_set_token_logs_in() {
        let mut session = AuthSession::default();
        assert!(!session.is_logged_in());

        session.apply_events(session.set_token("abc".into()));
        assert!(session.is_logged_in());
        assert_eq!(session.token(), Some("abc"));
        assert!(session.set_token("abc".into()).is_empty());
    }

    #[test]
    fn test_clear_token_drops_user() {
        let mut session = AuthSession::default();
        session.apply_events(session.set_token("abc".into()));
        session.apply_events(session.set_user(waiter()));

        session.apply_events(session.clear_token());
        assert!(!session.is_logged_in());
        assert_eq!(session.user(), None);
        assert!(session.clear_token().is_empty());
    }

    #[test]
    fn test_empty_token_signs_out() {
        let mut session = AuthSession::default();
        session.apply_events(session.set_token("abc".into()));
        assert_eq!(session.set_token(String::new()), vec![AuthEvent::SignedOut]);
    }

    #[test]
    fn test_user_wire_format() {
        let json = serde_json::json!({
            "id": 1,
            "username": "boss",
            "realName": "Li Wei",
            "role": "ADMIN"
        });
        let user: UserInfo = serde_json::from_value(json).unwrap();
        assert!(user.is_admin());
        assert_eq!(user.display_name(), "Li Wei");
        assert_eq!(waiter().display_name(), "amy");
    }

    #[test]
    fn test_debug_output_hides_token() {
        let mut session = AuthSession::default();
        let events = session.set_token("secret-jwt".into());
        assert!(!format!("{events:?}").contains("secret-jwt"));

        session.apply_events(events);
        session.apply(AuthEvent::UserSet(waiter()));
        let rendered = format!("{session:?}");
        assert!(!rendered.contains("secret-jwt"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("amy"));
    }
}
