//! 错误类型

/// Loyverse 远程调用失败
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UpstreamError {
    /// 非 2xx 响应, 保留状态码和响应体用于诊断
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("decode error: {0}")]
    Decode(String),
}

impl UpstreamError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// 扫码解析失败
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Loyverse API error: {0}")]
    Upstream(#[from] UpstreamError),
}

/// 单条库存写入失败
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StockWriteError {
    #[error("missing variant identity")]
    MissingVariantIdentity,

    #[error("no store configured in Loyverse")]
    NoStore,

    #[error("inventory update failed: {0}")]
    Upstream(#[from] UpstreamError),
}

/// 整批同步失败 (单条失败不会走到这里)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyncError {
    #[error("No items to update")]
    NothingToSync,

    #[error("no store configured in Loyverse")]
    NoStore,

    #[error("cannot resolve store: {0}")]
    Upstream(#[from] UpstreamError),
}
