use domain::UserInfo;
use snapshot_store::SnapshotStore;

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::models::{LoginRequest, LoginResponse};
use crate::transport::Transport;

/// Staff sign-in.
pub struct AuthApi<'a, T: Transport, S: SnapshotStore> {
    http: &'a HttpClient<T, S>,
}

impl<'a, T: Transport, S: SnapshotStore> AuthApi<'a, T, S> {
    pub(crate) fn new(http: &'a HttpClient<T, S>) -> Self {
        Self { http }
    }

    /// Signs in and stores the returned token and profile.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response: LoginResponse = self.http.post("/auth/login", &request).await?;
        self.http.auth().set_token(&response.token);
        self.http.auth().set_user(response.user_info());

        tracing::info!(user_id = %response.user_id, "signed in");
        Ok(response)
    }

    /// Signs out locally. The backend keeps no session to end.
    pub fn logout(&self) {
        self.http.auth().clear_token();
    }

    /// Returns the signed-in user, if any.
    pub fn me(&self) -> Option<UserInfo> {
        self.http.auth().user()
    }
}
