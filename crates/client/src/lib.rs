//! Restaurant API client for the ordering pad.
//!
//! Wraps the backend's `{code, message, data}` envelope, keeps the staff
//! bearer token in a persisted auth session, and ties the cart engine to
//! order submission.

pub mod api;
pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod loading;
pub mod models;
pub mod pagination;
pub mod transport;

use std::sync::Arc;

use domain::{AuthService, CartEngine};
use snapshot_store::{JsonFileStore, SnapshotStore};

pub use config::Config;
pub use envelope::ApiResponse;
pub use error::{ClientError, ClientResult, LOGIN_ROUTE};
pub use http::HttpClient;
pub use loading::LoadingFlag;
pub use pagination::Pagination;
pub use transport::{ApiRequest, Method, RawResponse, ReqwestTransport, Transport};

/// Everything one ordering pad needs: cart, auth session and API client.
///
/// Cart and auth share one snapshot store under different keys.
pub struct PadApp<T: Transport, S: SnapshotStore> {
    pub cart: CartEngine<S>,
    pub http: HttpClient<T, S>,
    pub loading: LoadingFlag,
}

impl<T: Transport, S: SnapshotStore + Clone> PadApp<T, S> {
    /// Opens cart and auth session from `store` and sends through `transport`.
    pub fn new(transport: T, store: S) -> Self {
        let auth = Arc::new(AuthService::open(store.clone()));
        Self {
            cart: CartEngine::open(store),
            http: HttpClient::new(transport, auth),
            loading: LoadingFlag::new(),
        }
    }
}

impl<T: Transport, S: SnapshotStore> PadApp<T, S> {
    pub fn auth(&self) -> &AuthService<S> {
        self.http.auth()
    }
}

/// Creates the pad application backed by the network and the snapshot directory.
pub fn create_app(config: &Config) -> ClientResult<PadApp<ReqwestTransport, JsonFileStore>> {
    let transport = ReqwestTransport::new(config)?;
    let store = JsonFileStore::new(&config.snapshot_dir);
    tracing::debug!(dir = %store.dir().display(), "using snapshot directory");

    Ok(PadApp::new(transport, store))
}
