//! Auth session commands.

use crate::command::Command;

use super::{AuthEvent, AuthSession, UserInfo};

/// Command to store a bearer token.
#[derive(Clone)]
pub struct SetToken {
    pub token: String,
}

// Tokens stay out of logs.
impl std::fmt::Debug for SetToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SetToken").field("token", &"<redacted>").finish()
    }
}

impl Command for SetToken {
    type Aggregate = AuthSession;

    fn name(&self) -> &'static str {
        "set_token"
    }

    fn decide(self, session: &AuthSession) -> Vec<AuthEvent> {
        session.set_token(self.token)
    }
}

/// Command to store the signed-in user.
#[derive(Debug, Clone)]
pub struct SetUser {
    pub user: UserInfo,
}

impl Command for SetUser {
    type Aggregate = AuthSession;

    fn name(&self) -> &'static str {
        "set_user"
    }

    fn decide(self, session: &AuthSession) -> Vec<AuthEvent> {
        session.set_user(self.user)
    }
}

/// Command to sign out.
#[derive(Debug, Clone, Default)]
pub struct ClearToken;

impl Command for ClearToken {
    type Aggregate = AuthSession;

    fn name(&self) -> &'static str {
        "clear_token"
    }

    fn decide(self, session: &AuthSession) -> Vec<AuthEvent> {
        session.clear_token()
    }
}
