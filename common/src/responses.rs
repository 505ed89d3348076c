use serde::{Deserialize, Serialize};

/// Rendered output of a template, as returned by the preview endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPreviewResponse {
    pub markup: String,
    pub stylesheet: String,
    pub page_version: String,
}

/// JSON error body. `details` is only present for internal failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
