use common::TableId;
use snapshot_store::SnapshotStore;

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::models::{CreateTableRequest, Table, UpdateTableRequest};
use crate::transport::{ApiRequest, Method, Transport};

/// Dining tables.
pub struct TableApi<'a, T: Transport, S: SnapshotStore> {
    http: &'a HttpClient<T, S>,
}

impl<'a, T: Transport, S: SnapshotStore> TableApi<'a, T, S> {
    pub(crate) fn new(http: &'a HttpClient<T, S>) -> Self {
        Self { http }
    }

    /// Lists tables, optionally only those of one type.
    pub async fn list(&self, table_type: Option<i32>) -> ClientResult<Vec<Table>> {
        let mut request = ApiRequest::new(Method::Get, "/tables");
        if let Some(table_type) = table_type {
            request = request.with_query("type", table_type);
        }
        self.http.send(request).await
    }

    pub async fn get(&self, id: TableId) -> ClientResult<Table> {
        self.http.get(&format!("/tables/{id}")).await
    }

    pub async fn create(&self, request: &CreateTableRequest) -> ClientResult<()> {
        self.http.post("/tables", request).await
    }

    pub async fn update(&self, id: TableId, request: &UpdateTableRequest) -> ClientResult<()> {
        self.http.put(&format!("/tables/{id}"), request).await
    }

    pub async fn delete(&self, id: TableId) -> ClientResult<()> {
        self.http.delete(&format!("/tables/{id}")).await
    }

    /// Marks a table occupied by a party.
    pub async fn open(&self, id: TableId, customer_count: u32) -> ClientResult<()> {
        let request = ApiRequest::new(Method::Post, format!("/tables/{id}/open"))
            .with_query("customerCount", customer_count.max(1));
        self.http.send(request).await
    }

    /// Marks a table free again.
    pub async fn clear(&self, id: TableId) -> ClientResult<()> {
        self.http.post_empty(&format!("/tables/{id}/clear")).await
    }

    /// Marks a table as waiting to be cleared.
    pub async fn pending_clear(&self, id: TableId) -> ClientResult<()> {
        self.http
            .post_empty(&format!("/tables/{id}/pending-clear"))
            .await
    }
}
