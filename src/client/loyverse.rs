use super::InventoryApi;
use crate::config::LoyverseConfig;
use crate::error::UpstreamError;
use crate::models::{
    InventoryLevel, InventoryLevelList, InventoryUpdate, InventoryUpdateRequest, Item, ItemId,
    ItemList, Store, StoreId, StoreList, Variant, VariantList,
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::{debug, warn};

/// 单次查询的最大条数 (Loyverse 分页上限内)
const PAGE_LIMIT: &str = "50";

/// Loyverse REST API 客户端
#[derive(Clone)]
pub struct LoyverseClient {
    http: Client,
    base_url: String,
    token: String,
}

impl fmt::Debug for LoyverseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoyverseClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl LoyverseClient {
    pub fn new(config: &LoyverseConfig) -> Result<Self, UpstreamError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.token)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, UpstreamError> {
        debug!(path, ?query, "Loyverse GET");
        let response = self
            .authorized(self.http.get(self.url(path)))
            .query(query)
            .send()
            .await?;
        let response = Self::check_status(path, response).await?;
        Ok(response.json::<T>().await?)
    }

    /// 非 2xx 转换为带状态码和响应体的错误
    async fn check_status(path: &str, response: Response) -> Result<Response, UpstreamError> {
        let status = response.status();
        debug!(path, status = status.as_u16(), "Loyverse response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(path, status = status.as_u16(), body = %body, "Loyverse API request failed");
        Err(UpstreamError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl InventoryApi for LoyverseClient {
    async fn list_stores(&self) -> Result<Vec<Store>, UpstreamError> {
        let list: StoreList = self.get_json("stores", &[]).await?;
        Ok(list.stores)
    }

    async fn variants_by_sku(&self, sku: &str) -> Result<Vec<Variant>, UpstreamError> {
        let list: VariantList = self
            .get_json("variants", &[("sku", sku), ("limit", PAGE_LIMIT)])
            .await?;
        Ok(list.variants)
    }

    async fn items_by_sku(&self, sku: &str) -> Result<Vec<Item>, UpstreamError> {
        let list: ItemList = self
            .get_json("items", &[("sku", sku), ("limit", PAGE_LIMIT)])
            .await?;
        Ok(list.items)
    }

    async fn get_item(&self, item_id: &ItemId) -> Result<Item, UpstreamError> {
        self.get_json(&format!("items/{}", item_id), &[]).await
    }

    async fn variants_by_item(&self, item_id: &ItemId) -> Result<Vec<Variant>, UpstreamError> {
        let list: VariantList = self
            .get_json(
                "variants",
                &[("items_ids", item_id.as_str()), ("limit", PAGE_LIMIT)],
            )
            .await?;
        Ok(list.variants)
    }

    async fn inventory_levels(
        &self,
        store_id: &StoreId,
        item_id: &ItemId,
    ) -> Result<Vec<InventoryLevel>, UpstreamError> {
        let list: InventoryLevelList = self
            .get_json(
                "inventory",
                &[("store_ids", store_id.as_str()), ("item_ids", item_id.as_str())],
            )
            .await?;
        Ok(list.inventory_levels)
    }

    async fn set_inventory(&self, update: &InventoryUpdate) -> Result<(), UpstreamError> {
        let body = InventoryUpdateRequest {
            inventory_levels: vec![update.clone()],
        };
        debug!(
            variant_id = %update.variant_id,
            store_id = %update.store_id,
            stock_after = update.stock_after,
            "Loyverse POST inventory"
        );

        let response = self
            .authorized(self.http.post(self.url("inventory")))
            .json(&body)
            .send()
            .await?;
        Self::check_status("inventory", response).await?;
        Ok(())
    }
}
