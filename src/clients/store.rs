use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Configuration;
use crate::executor::RequestExecutor;
use crate::http_client::reqwest::ReqwestHttpClient;
use crate::http_client::HttpClient;
use crate::model::Order;
use crate::specification::json_default;
use crate::{Response, Result};

#[derive(Clone)]
pub struct StoreClient {
    executor: RequestExecutor,
}

impl Default for StoreClient {
    fn default() -> Self {
        StoreClient::new()
    }
}

impl StoreClient {
    pub fn new() -> Self {
        StoreClient::with_config(Configuration::get_instance())
    }

    pub fn with_config(config: &Configuration) -> Self {
        StoreClient::with_http_client(config, Arc::new(ReqwestHttpClient::default()))
    }

    pub fn with_http_client(config: &Configuration, client: Arc<dyn HttpClient>) -> Self {
        StoreClient {
            executor: RequestExecutor::new(json_default(config), client),
        }
    }

    /// Counts of pets per status, as a free-form JSON object.
    pub fn get_inventory(&self) -> Result<Response> {
        self.executor.get("/store/inventory")
    }

    pub fn place_order(&self, order: &Order) -> Result<Response> {
        self.executor.post("/store/order", order)
    }

    pub fn get_order_by_id(&self, order_id: i64) -> Result<Response> {
        self.executor.get_with_id("/store/order/{id}", order_id)
    }

    pub fn delete_order(&self, order_id: i64) -> Result<Response> {
        self.executor.delete_with_id("/store/order/{id}", order_id)
    }

    pub fn get_inventory_map(&self) -> Result<HashMap<String, u64>> {
        self.get_inventory()?.as_map()
    }

    pub fn place_order_and_get_response(&self, order: &Order) -> Result<Order> {
        self.place_order(order)?.as_model()
    }
}
