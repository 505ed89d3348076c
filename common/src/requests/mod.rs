use crate::model::brand::BrandConfig;
use serde::{Deserialize, Serialize};

/// Request payload for the package endpoints.
///
/// Fields are optional at the wire level so that a missing field surfaces as
/// a validation error naming it, rather than a generic JSON parse failure.
/// `slug`, `user_email` and `affiliate_code` are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurePackageRequest {
    pub slug: Option<String>,
    pub user_email: Option<String>,
    pub affiliate_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_domain: Option<String>,
}

/// Request payload for the render preview endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderPreviewRequest {
    pub config: BrandConfig,
    /// Pins the cache-busting suffix; a random one is drawn when absent.
    #[serde(default)]
    pub page_version: Option<String>,
}
