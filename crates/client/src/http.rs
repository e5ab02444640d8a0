//! Envelope-unwrapping HTTP client.

use std::sync::Arc;

use domain::AuthService;
use serde::Serialize;
use serde::de::DeserializeOwned;
use snapshot_store::SnapshotStore;

use crate::api::{AuthApi, DishApi, DishSpecApi, OrderApi, ReportApi, TableApi};
use crate::envelope::ApiResponse;
use crate::error::{ClientError, ClientResult};
use crate::transport::{ApiRequest, Method, Transport};

/// HTTP client for the restaurant backend.
///
/// Attaches the bearer token held by the auth session to every request,
/// unwraps the response envelope and signs the user out when the backend
/// answers 401.
pub struct HttpClient<T: Transport, S: SnapshotStore> {
    transport: T,
    auth: Arc<AuthService<S>>,
}

impl<T: Transport, S: SnapshotStore> HttpClient<T, S> {
    /// Creates a client sending through `transport` with tokens from `auth`.
    pub fn new(transport: T, auth: Arc<AuthService<S>>) -> Self {
        Self { transport, auth }
    }

    /// Returns the auth session this client reads tokens from.
    pub fn auth(&self) -> &AuthService<S> {
        &self.auth
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn auth_api(&self) -> AuthApi<'_, T, S> {
        AuthApi::new(self)
    }

    pub fn dishes(&self) -> DishApi<'_, T, S> {
        DishApi::new(self)
    }

    pub fn dish_specs(&self) -> DishSpecApi<'_, T, S> {
        DishSpecApi::new(self)
    }

    pub fn tables(&self) -> TableApi<'_, T, S> {
        TableApi::new(self)
    }

    pub fn orders(&self) -> OrderApi<'_, T, S> {
        OrderApi::new(self)
    }

    pub fn reports(&self) -> ReportApi<'_, T, S> {
        ReportApi::new(self)
    }

    /// Make a GET request.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> ClientResult<R> {
        self.send(ApiRequest::new(Method::Get, path)).await
    }

    /// Make a POST request with JSON body.
    pub async fn post<R: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<R> {
        let body = serde_json::to_value(body)?;
        self.send(ApiRequest::new(Method::Post, path).with_body(body))
            .await
    }

    /// Make a POST request without body.
    pub async fn post_empty<R: DeserializeOwned>(&self, path: &str) -> ClientResult<R> {
        self.send(ApiRequest::new(Method::Post, path)).await
    }

    /// Make a PUT request with JSON body.
    pub async fn put<R: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<R> {
        let body = serde_json::to_value(body)?;
        self.send(ApiRequest::new(Method::Put, path).with_body(body))
            .await
    }

    /// Make a DELETE request.
    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> ClientResult<R> {
        self.send(ApiRequest::new(Method::Delete, path)).await
    }

    /// Sends a request and unwraps the envelope of its response.
    #[tracing::instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send<R: DeserializeOwned>(&self, mut request: ApiRequest) -> ClientResult<R> {
        request.bearer = self.auth.token();
        let method = request.method;

        let response = self.transport.send(request).await?;
        metrics::counter!(
            "api_requests_total",
            "method" => method.as_str(),
            "status" => response.status.to_string()
        )
        .increment(1);

        if response.status == 401 {
            tracing::warn!("bearer token rejected, signing out");
            self.auth.clear_token();
            return Err(ClientError::unauthorized());
        }

        if !response.is_success() {
            tracing::debug!(status = response.status, "request failed");
            return Err(ClientError::Status {
                status: response.status,
                body: response.text(),
            });
        }

        ApiResponse::from_slice(&response.body)?.into_data()
    }
}
