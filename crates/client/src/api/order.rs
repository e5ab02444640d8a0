use common::{OrderId, OrderItemId, TableId};
use domain::{CartEngine, CartItemRequest, CreateOrderRequest};
use rust_decimal::Decimal;
use snapshot_store::SnapshotStore;

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::models::{Order, OrderDetail, PayRequest};
use crate::transport::{ApiRequest, Method, Transport};

/// Orders and their lines.
pub struct OrderApi<'a, T: Transport, S: SnapshotStore> {
    http: &'a HttpClient<T, S>,
}

impl<'a, T: Transport, S: SnapshotStore> OrderApi<'a, T, S> {
    pub(crate) fn new(http: &'a HttpClient<T, S>) -> Self {
        Self { http }
    }

    /// Lists orders, optionally only those with one status.
    pub async fn list(&self, status: Option<i32>) -> ClientResult<Vec<Order>> {
        let mut request = ApiRequest::new(Method::Get, "/orders");
        if let Some(status) = status {
            request = request.with_query("status", status);
        }
        self.http.send(request).await
    }

    /// Lists orders that are neither completed nor cancelled.
    pub async fn active(&self) -> ClientResult<Vec<Order>> {
        self.http.get("/orders/active").await
    }

    pub async fn detail(&self, id: OrderId) -> ClientResult<OrderDetail> {
        self.http.get(&format!("/orders/{id}")).await
    }

    /// Returns the open order of a table.
    pub async fn by_table(&self, table_id: TableId) -> ClientResult<OrderDetail> {
        self.http.get(&format!("/orders/by-table/{table_id}")).await
    }

    pub async fn create(&self, request: &CreateOrderRequest) -> ClientResult<Order> {
        self.http.post("/orders", request).await
    }

    /// Places the cart as an order and empties the cart once the backend
    /// accepted it.
    ///
    /// An empty cart or one without a table is rejected before anything is
    /// sent. On any failure the cart is left untouched.
    #[tracing::instrument(skip(self, cart))]
    pub async fn submit_cart<C: SnapshotStore>(
        &self,
        cart: &CartEngine<C>,
        remark: Option<String>,
    ) -> ClientResult<Order> {
        let request = cart.order_request(remark)?;
        let order = self.create(&request).await?;

        cart.clear_cart();
        tracing::info!(order_id = %order.id, order_no = %order.order_no, "cart submitted");
        Ok(order)
    }

    /// Adds a dish to an existing order.
    pub async fn add_dish(&self, order_id: OrderId, item: &CartItemRequest) -> ClientResult<()> {
        self.http.post(&format!("/orders/{order_id}/add"), item).await
    }

    pub async fn pay(&self, order_id: OrderId, request: &PayRequest) -> ClientResult<()> {
        self.http
            .post(&format!("/orders/{order_id}/pay"), request)
            .await
    }

    /// Amount still owed on an order.
    pub async fn unpaid_amount(&self, order_id: OrderId) -> ClientResult<Decimal> {
        self.http
            .get(&format!("/orders/{order_id}/unpaid-amount"))
            .await
    }

    /// Moves one order line through the kitchen workflow.
    pub async fn update_item_status(&self, item_id: OrderItemId, status: i32) -> ClientResult<()> {
        let request = ApiRequest::new(Method::Post, format!("/orders/items/{item_id}/status"))
            .with_query("status", status);
        self.http.send(request).await
    }

    pub async fn complete(&self, order_id: OrderId) -> ClientResult<()> {
        self.http
            .post_empty(&format!("/orders/{order_id}/complete"))
            .await
    }

    pub async fn cancel(&self, order_id: OrderId) -> ClientResult<()> {
        self.http
            .post_empty(&format!("/orders/{order_id}/cancel"))
            .await
    }
}
