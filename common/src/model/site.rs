use crate::model::brand::BrandConfig;
use serde::{Deserialize, Serialize};

/// A stored landing page: which template it uses and the brand data to
/// render it with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRecord {
    pub slug: String,
    pub template_id: String,
    pub config: BrandConfig,
}
