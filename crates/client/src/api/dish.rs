use common::DishId;
use snapshot_store::SnapshotStore;

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::models::{Category, Dish, DishForm, DishQuery};
use crate::transport::{ApiRequest, Method, Transport};

/// Menu dishes and categories.
pub struct DishApi<'a, T: Transport, S: SnapshotStore> {
    http: &'a HttpClient<T, S>,
}

impl<'a, T: Transport, S: SnapshotStore> DishApi<'a, T, S> {
    pub(crate) fn new(http: &'a HttpClient<T, S>) -> Self {
        Self { http }
    }

    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        self.http.get("/dishes/categories").await
    }

    /// Lists dishes, optionally filtered by category and sale status.
    pub async fn list(&self, query: &DishQuery) -> ClientResult<Vec<Dish>> {
        let mut request = ApiRequest::new(Method::Get, "/dishes");
        if let Some(category_id) = query.category_id {
            request = request.with_query("categoryId", category_id);
        }
        if let Some(status) = query.status {
            request = request.with_query("status", status);
        }
        self.http.send(request).await
    }

    pub async fn detail(&self, id: DishId) -> ClientResult<Dish> {
        self.http.get(&format!("/dishes/{id}")).await
    }

    pub async fn create(&self, form: &DishForm) -> ClientResult<()> {
        self.http.post("/dishes", form).await
    }

    pub async fn update(&self, id: DishId, form: &DishForm) -> ClientResult<()> {
        self.http.put(&format!("/dishes/{id}"), form).await
    }

    pub async fn delete(&self, id: DishId) -> ClientResult<()> {
        self.http.delete(&format!("/dishes/{id}")).await
    }

    /// Puts a dish on sale or takes it off.
    pub async fn toggle_status(&self, id: DishId) -> ClientResult<()> {
        self.http.post_empty(&format!("/dishes/{id}/toggle")).await
    }
}
