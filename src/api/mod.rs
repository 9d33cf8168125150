pub mod handlers;

pub use handlers::*;

use crate::service::InventoryService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// 构建路由
pub fn router(service: Arc<InventoryService>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/scan", post(scan))
        .route("/items", get(list_items))
        .route("/items/export", get(export_items))
        .route("/reset", post(reset))
        .route("/update-loyverse", post(update_loyverse))
        .route("/test-loyverse", get(test_loyverse))
        .with_state(service)
}
