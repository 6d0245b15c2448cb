// src/error.rs
use thiserror::Error;

/// Everything that can go wrong while wiring up the page. None of these are
/// fatal: callers log them and fall back to an inert UI state.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Storage unavailable")]
    StorageUnavailable,
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Duplicate gallery id: {0}")]
    DuplicateId(String),
    #[error("Gallery catalog is empty")]
    EmptyCatalog,
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Missing DOM node: {0}")]
    MissingNode(String),
    #[error("DOM error: {0}")]
    Dom(String),
}

impl From<gloo_net::Error> for SiteError {
    fn from(e: gloo_net::Error) -> Self {
        SiteError::Transport(e.to_string())
    }
}

impl From<wasm_bindgen::JsValue> for SiteError {
    fn from(e: wasm_bindgen::JsValue) -> Self {
        SiteError::Dom(format!("{:?}", e))
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;
