//! Auth service holding the staff bearer token.

use snapshot_store::SnapshotStore;
use tokio::sync::watch;

use crate::command::{CommandHandler, CommandResult, StateChange};

use super::{AuthSession, ClearToken, SetToken, SetUser, UserInfo};

/// Service for the staff auth session.
///
/// Holds the bearer token the API client attaches to requests and the
/// profile returned by login. Persisted under its own snapshot key so a
/// restart keeps the user signed in.
pub struct AuthService<S: SnapshotStore> {
    handler: CommandHandler<S, AuthSession>,
}

impl<S: SnapshotStore> AuthService<S> {
    /// Opens the service, rehydrating the session from `store`.
    pub fn open(store: S) -> Self {
        Self {
            handler: CommandHandler::open(store),
        }
    }

    /// Returns a reference to the underlying command handler.
    pub fn handler(&self) -> &CommandHandler<S, AuthSession> {
        &self.handler
    }

    /// Stores a bearer token.
    #[tracing::instrument(skip(self, token))]
    pub fn set_token(&self, token: &str) -> CommandResult<AuthSession> {
        self.handler.execute(SetToken {
            token: token.to_string(),
        })
    }

    /// Stores the signed-in user.
    #[tracing::instrument(skip(self), fields(username = %user.username))]
    pub fn set_user(&self, user: UserInfo) -> CommandResult<AuthSession> {
        self.handler.execute(SetUser { user })
    }

    /// Drops the token and the user.
    #[tracing::instrument(skip(self))]
    pub fn clear_token(&self) -> CommandResult<AuthSession> {
        self.handler.execute(ClearToken)
    }

    /// Returns the bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.handler.read(|s| s.token().map(str::to_string))
    }

    /// Returns the signed-in user, if known.
    pub fn user(&self) -> Option<UserInfo> {
        self.handler.read(|s| s.user().cloned())
    }

    /// Returns true if a token is held.
    pub fn is_logged_in(&self) -> bool {
        self.handler.read(AuthSession::is_logged_in)
    }

    /// Subscribes to session changes.
    pub fn subscribe(&self) -> watch::Receiver<StateChange<AuthSession>> {
        self.handler.subscribe()
    }
}
