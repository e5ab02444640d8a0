use common::{DishId, SpecId};
use snapshot_store::SnapshotStore;

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::models::{CreateSpecRequest, SpecItem, UpdateSpecRequest};
use crate::transport::Transport;

/// Priced dish specifications.
pub struct DishSpecApi<'a, T: Transport, S: SnapshotStore> {
    http: &'a HttpClient<T, S>,
}

impl<'a, T: Transport, S: SnapshotStore> DishSpecApi<'a, T, S> {
    pub(crate) fn new(http: &'a HttpClient<T, S>) -> Self {
        Self { http }
    }

    /// Lists the enabled specs of a dish.
    pub async fn list(&self, dish_id: DishId) -> ClientResult<Vec<SpecItem>> {
        self.http.get(&format!("/dish-specs/dish/{dish_id}")).await
    }

    /// Lists all specs of a dish, disabled ones included.
    pub async fn list_all(&self, dish_id: DishId) -> ClientResult<Vec<SpecItem>> {
        self.http.get(&format!("/dish-specs/dish/{dish_id}/all")).await
    }

    pub async fn get(&self, id: SpecId) -> ClientResult<SpecItem> {
        self.http.get(&format!("/dish-specs/{id}")).await
    }

    pub async fn create(&self, request: &CreateSpecRequest) -> ClientResult<SpecItem> {
        self.http.post("/dish-specs", request).await
    }

    pub async fn update(&self, id: SpecId, request: &UpdateSpecRequest) -> ClientResult<()> {
        self.http.put(&format!("/dish-specs/{id}"), request).await
    }

    pub async fn delete(&self, id: SpecId) -> ClientResult<()> {
        self.http.delete(&format!("/dish-specs/{id}")).await
    }

    /// Replaces the spec list of a dish. Items without an id are created.
    pub async fn batch_update(&self, dish_id: DishId, specs: &[SpecItem]) -> ClientResult<()> {
        self.http
            .post(&format!("/dish-specs/batch/{dish_id}"), &specs)
            .await
    }

    pub async fn toggle_status(&self, id: SpecId) -> ClientResult<()> {
        self.http.post_empty(&format!("/dish-specs/{id}/toggle")).await
    }

    /// Switches a dish between base-price and per-spec ordering.
    pub async fn toggle_dish_spec_mode(&self, dish_id: DishId) -> ClientResult<()> {
        self.http
            .post_empty(&format!("/dishes/{dish_id}/toggle-specs"))
            .await
    }
}
