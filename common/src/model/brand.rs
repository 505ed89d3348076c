use serde::{Deserialize, Serialize};

/// Describes a single landing page: copy, palette, imagery and which optional
/// sections the chosen template should include.
///
/// A `BrandConfig` is stored per site record and loaded fresh for every
/// package request. Renderers only ever borrow it.
///
/// Sections follow opt-out semantics: a section that is absent from the
/// stored JSON, or present without an `enabled` flag, is rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandConfig {
    pub brand_name: String,
    #[serde(default)]
    pub copy: BrandCopy,
    #[serde(default)]
    pub colors: BrandColors,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_image1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_image2: Option<String>,
    #[serde(default)]
    pub sections: Sections,

    // Template-specific extensions. Only the prize wheel reads these today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popup_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popup_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popup_prize: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_balance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandCopy {
    pub headline: String,
    pub subheadline: String,
    pub cta: String,
}

/// Palette exposed to stylesheets as `--color-primary`, `--color-secondary`
/// and `--color-accent`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

impl Default for BrandColors {
    fn default() -> Self {
        Self {
            primary: "#2563eb".to_string(),
            secondary: "#1e293b".to_string(),
            accent: "#f59e0b".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Sections {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<FeaturesSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<PricingSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faq: Option<FaqSection>,
}

impl Sections {
    pub fn features_enabled(&self) -> bool {
        self.features.as_ref().map_or(true, FeaturesSection::is_enabled)
    }

    pub fn pricing_enabled(&self) -> bool {
        self.pricing.as_ref().map_or(true, PricingSection::is_enabled)
    }

    pub fn faq_enabled(&self) -> bool {
        self.faq.as_ref().map_or(true, FaqSection::is_enabled)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeaturesSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub items: Vec<FeatureItem>,
}

impl FeaturesSection {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeatureItem {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub plans: Vec<PricingPlan>,
}

impl PricingSection {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingPlan {
    pub name: String,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    pub features: Vec<String>,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaqSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub items: Vec<FaqItem>,
}

impl FaqSection {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_default_to_enabled() {
        let config: BrandConfig = serde_json::from_str(r#"{"brandName":"Acme"}"#).unwrap();
        assert!(config.sections.features_enabled());
        assert!(config.sections.pricing_enabled());
        assert!(config.sections.faq_enabled());
        assert_eq!(config.colors, BrandColors::default());
    }

    #[test]
    fn explicit_opt_out_disables_section() {
        let config: BrandConfig = serde_json::from_str(
            r#"{"brandName":"Acme","sections":{"pricing":{"enabled":false},"faq":{"items":[]}}}"#,
        )
        .unwrap();
        assert!(!config.sections.pricing_enabled());
        assert!(config.sections.faq_enabled());
    }

    #[test]
    fn reads_camel_case_extension_fields() {
        let config: BrandConfig = serde_json::from_str(
            r#"{"brandName":"Spin","featureImage1":"a.png","popupPrize":"50 free spins","gameBalance":1200.5}"#,
        )
        .unwrap();
        assert_eq!(config.feature_image1.as_deref(), Some("a.png"));
        assert_eq!(config.popup_prize.as_deref(), Some("50 free spins"));
        assert_eq!(config.game_balance, Some(1200.5));
    }
}
