use crate::error::{ResolveError, SyncError};
use crate::models::{ScanRecord, ScanSummary, SyncFailure, SyncedItem};
use crate::service::InventoryService;
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

/// 请求体: 扫码值
#[derive(Debug, Default, Deserialize)]
pub struct ScanRequest {
    #[serde(default)]
    pub barcode: String,
}

/// 扫码响应体
#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub success: bool,
    #[serde(flatten)]
    pub summary: ScanSummary,
}

/// 通用响应体
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SyncDetails {
    pub updates: Vec<SyncedItem>,
    pub errors: Vec<SyncFailure>,
}

/// 同步响应体 (含明细)
#[derive(Debug, Serialize)]
pub struct SyncResponse {
    pub success: bool,
    pub message: String,
    pub updates: usize,
    pub errors: usize,
    pub details: SyncDetails,
}

#[derive(Debug, Serialize)]
pub struct ConnectionResponse {
    pub success: bool,
    pub message: String,
    pub stores: usize,
}

/// 错误响应: `{success: false, error}` 加对应状态码
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ResolveError> for ApiError {
    fn from(e: ResolveError) -> Self {
        let status = match e {
            ResolveError::NotFound(_) => StatusCode::NOT_FOUND,
            ResolveError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        Self::new(status, e.to_string())
    }
}

impl From<SyncError> for ApiError {
    fn from(e: SyncError) -> Self {
        let status = match e {
            SyncError::NothingToSync => StatusCode::BAD_REQUEST,
            SyncError::NoStore | SyncError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };
        Self::new(status, e.to_string())
    }
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 扫码
///
/// 请求体缺失、不是 JSON 或 `barcode` 不是字符串, 都按未提供扫码值处理。
pub async fn scan(
    State(service): State<Arc<InventoryService>>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<ScanResponse>, ApiError> {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!(status = %rejection.status(), reason = %rejection.body_text(), "Rejected scan request body");
            ScanRequest::default()
        }
    };
    if req.barcode.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "No barcode provided"));
    }

    let summary = service.scan(&req.barcode).await?;
    Ok(Json(ScanResponse {
        success: true,
        summary,
    }))
}

/// 已扫码记录
pub async fn list_items(State(service): State<Arc<InventoryService>>) -> Json<Vec<ScanRecord>> {
    Json(service.list())
}

/// 导出 CSV
pub async fn export_items(State(service): State<Arc<InventoryService>>) -> Response {
    match service.export_csv() {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"scan-report.csv\"",
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "CSV export failed");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, format!("Export failed: {}", e))
                .into_response()
        }
    }
}

/// 清空计数
pub async fn reset(State(service): State<Arc<InventoryService>>) -> Json<MessageResponse> {
    service.reset();
    Json(MessageResponse {
        success: true,
        message: "All counts reset".to_string(),
    })
}

/// 把计数写回 Loyverse
pub async fn update_loyverse(
    State(service): State<Arc<InventoryService>>,
) -> Result<Json<SyncResponse>, ApiError> {
    let result = service.sync().await?;

    let updates = result.succeeded.len();
    let errors = result.failed.len();
    let mut message = format!("Updated {} items", updates);
    if errors > 0 {
        message.push_str(&format!(", {} errors", errors));
    }

    Ok(Json(SyncResponse {
        success: true,
        message,
        updates,
        errors,
        details: SyncDetails {
            updates: result.succeeded,
            errors: result.failed,
        },
    }))
}

/// Loyverse 连通性检查
pub async fn test_loyverse(
    State(service): State<Arc<InventoryService>>,
) -> Result<Json<ConnectionResponse>, ApiError> {
    let stores = service.check_connection().await.map_err(|e| {
        ApiError::new(StatusCode::BAD_GATEWAY, format!("Connection failed: {}", e))
    })?;

    Ok(Json(ConnectionResponse {
        success: true,
        message: "Loyverse API connected successfully!".to_string(),
        stores,
    }))
}
