use serde::{Deserialize, Serialize};

/// Catalogue entry for one registered landing-page template.
///
/// The editor uses `field_schema` to decide which `BrandConfig` fields to
/// show for the template; the renderer never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub field_schema: Vec<FieldSchema>,
}

/// One editable field, addressed by its dotted path inside `BrandConfig`
/// (e.g. `copy.headline`, `sections.faq`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    pub key: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Textarea,
    Url,
    Image,
    Color,
    Number,
    Section,
}
