use snapshot_store::SnapshotStore;

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::models::{TableStats, TodayStats, TopDish};
use crate::transport::{ApiRequest, Method, Transport};

/// Number of dishes returned by [`ReportApi::top_dishes`] by default.
pub const DEFAULT_TOP_DISHES: u32 = 10;

/// Sales reports.
pub struct ReportApi<'a, T: Transport, S: SnapshotStore> {
    http: &'a HttpClient<T, S>,
}

impl<'a, T: Transport, S: SnapshotStore> ReportApi<'a, T, S> {
    pub(crate) fn new(http: &'a HttpClient<T, S>) -> Self {
        Self { http }
    }

    pub async fn today(&self) -> ClientResult<TodayStats> {
        self.http.get("/reports/today").await
    }

    /// Best-selling dishes, at most `limit` of them.
    pub async fn top_dishes(&self, limit: Option<u32>) -> ClientResult<Vec<TopDish>> {
        let request = ApiRequest::new(Method::Get, "/reports/top-dishes")
            .with_query("limit", limit.unwrap_or(DEFAULT_TOP_DISHES));
        self.http.send(request).await
    }

    pub async fn tables(&self) -> ClientResult<Vec<TableStats>> {
        self.http.get("/reports/tables").await
    }
}
