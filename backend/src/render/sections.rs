//! Optional section blocks shared by the templates.
//!
//! Each block returns an empty string when its section is switched off.
//! Features fall back to generic items so an enabled-by-default section is
//! never empty; pricing and FAQ render nothing until they have content.

use crate::render::html::{escape, or_default, safe_url};
use common::model::brand::{BrandConfig, FeatureItem};

fn default_features() -> Vec<FeatureItem> {
    vec![
        FeatureItem {
            title: "Fast setup".to_string(),
            description: "Get started in minutes with no technical knowledge required.".to_string(),
            icon: Some("⚡".to_string()),
        },
        FeatureItem {
            title: "Trusted quality".to_string(),
            description: "Thousands of customers rely on us every day.".to_string(),
            icon: Some("★".to_string()),
        },
        FeatureItem {
            title: "Real support".to_string(),
            description: "Friendly people ready to help whenever you need it.".to_string(),
            icon: Some("✓".to_string()),
        },
    ]
}

/// Feature grid. Falls back to three generic items and pairs the first two
/// with `featureImage1`/`featureImage2` when those are set.
pub fn features(config: &BrandConfig) -> String {
    if !config.sections.features_enabled() {
        return String::new();
    }
    let section = config.sections.features.clone().unwrap_or_default();
    let items = if section.items.is_empty() {
        default_features()
    } else {
        section.items
    };
    let fallback_title = format!("Why {}", config.brand_name.trim());
    let title = section.title.as_deref().unwrap_or(&fallback_title);
    let images = [&config.feature_image1, &config.feature_image2];

    let mut out = String::new();
    out.push_str("<section class=\"lp-features\">\n");
    out.push_str(&format!("  <h2>{}</h2>\n", escape(title)));
    out.push_str("  <div class=\"lp-feature-grid\">\n");
    for (index, item) in items.iter().enumerate() {
        out.push_str("    <article class=\"lp-feature\">\n");
        let image = images
            .get(index)
            .and_then(|img| img.as_deref())
            .and_then(safe_url);
        if let Some(src) = image {
            out.push_str(&format!(
                "      <img class=\"lp-feature-image\" src=\"{}\" alt=\"{}\" loading=\"lazy\">\n",
                src,
                escape(&item.title)
            ));
        } else if let Some(icon) = item.icon.as_deref().filter(|i| !i.trim().is_empty()) {
            out.push_str(&format!(
                "      <span class=\"lp-feature-icon\">{}</span>\n",
                escape(icon)
            ));
        }
        out.push_str(&format!("      <h3>{}</h3>\n", escape(&item.title)));
        out.push_str(&format!("      <p>{}</p>\n", escape(&item.description)));
        out.push_str("    </article>\n");
    }
    out.push_str("  </div>\n</section>\n");
    out
}

/// Plan cards; highlighted plans get an extra class.
pub fn pricing(config: &BrandConfig) -> String {
    let Some(section) = config.sections.pricing.as_ref() else {
        return String::new();
    };
    if !section.is_enabled() || section.plans.is_empty() {
        return String::new();
    }
    let title = section.title.as_deref().unwrap_or("Pricing");

    let mut out = String::new();
    out.push_str("<section class=\"lp-pricing\">\n");
    out.push_str(&format!("  <h2>{}</h2>\n", escape(title)));
    out.push_str("  <div class=\"lp-plan-grid\">\n");
    for plan in &section.plans {
        let class = if plan.highlighted {
            "lp-plan lp-plan-highlighted"
        } else {
            "lp-plan"
        };
        out.push_str(&format!("    <article class=\"{}\">\n", class));
        out.push_str(&format!("      <h3>{}</h3>\n", escape(&plan.name)));
        match plan.period.as_deref().filter(|p| !p.trim().is_empty()) {
            Some(period) => out.push_str(&format!(
                "      <p class=\"lp-price\">{}<span>/{}</span></p>\n",
                escape(&plan.price),
                escape(period)
            )),
            None => out.push_str(&format!(
                "      <p class=\"lp-price\">{}</p>\n",
                escape(&plan.price)
            )),
        }
        if !plan.features.is_empty() {
            out.push_str("      <ul>\n");
            for feature in &plan.features {
                out.push_str(&format!("        <li>{}</li>\n", escape(feature)));
            }
            out.push_str("      </ul>\n");
        }
        out.push_str("    </article>\n");
    }
    out.push_str("  </div>\n</section>\n");
    out
}

/// Question list as `<details>` elements.
pub fn faq(config: &BrandConfig) -> String {
    let Some(section) = config.sections.faq.as_ref() else {
        return String::new();
    };
    if !section.is_enabled() || section.items.is_empty() {
        return String::new();
    }
    let title = section.title.as_deref().unwrap_or("Frequently asked questions");

    let mut out = String::new();
    out.push_str("<section class=\"lp-faq\">\n");
    out.push_str(&format!("  <h2>{}</h2>\n", escape(title)));
    for item in &section.items {
        out.push_str("  <details>\n");
        out.push_str(&format!(
            "    <summary>{}</summary>\n",
            escape(&item.question)
        ));
        out.push_str(&format!("    <p>{}</p>\n", escape(&item.answer)));
        out.push_str("  </details>\n");
    }
    out.push_str("</section>\n");
    out
}

/// Call-to-action anchor. A missing or unsafe `ctaUrl` points at `#`.
pub fn cta_link(config: &BrandConfig, class: &str) -> String {
    let href = config
        .cta_url
        .as_deref()
        .and_then(safe_url)
        .unwrap_or_else(|| "#".to_string());
    format!(
        "<a class=\"{}\" href=\"{}\" rel=\"noopener\">{}</a>",
        class,
        href,
        escape(or_default(&config.copy.cta, "Get started"))
    )
}

/// Logo image when one is configured, otherwise the brand name as text.
pub fn brand_mark(config: &BrandConfig) -> String {
    match config.logo_url.as_deref().and_then(safe_url) {
        Some(src) => format!(
            "<img class=\"lp-logo\" src=\"{}\" alt=\"{}\">",
            src,
            escape(&config.brand_name)
        ),
        None => format!(
            "<span class=\"lp-brand\">{}</span>",
            escape(&config.brand_name)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::brand::{FaqItem, FaqSection, FeaturesSection, PricingPlan, PricingSection};

    fn config() -> BrandConfig {
        BrandConfig {
            brand_name: "Acme".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn features_render_defaults_when_unspecified() {
        let html = features(&config());
        assert!(html.contains("Why Acme"));
        assert!(html.contains("Fast setup"));
    }

    #[test]
    fn features_can_be_switched_off() {
        let mut cfg = config();
        cfg.sections.features = Some(FeaturesSection {
            enabled: Some(false),
            ..Default::default()
        });
        assert!(features(&cfg).is_empty());
    }

    #[test]
    fn feature_images_replace_icons() {
        let mut cfg = config();
        cfg.feature_image1 = Some("https://img.example.com/one.png".to_string());
        let html = features(&cfg);
        assert!(html.contains("src=\"https://img.example.com/one.png\""));
        // Second and third items keep their icons.
        assert_eq!(html.matches("lp-feature-icon").count(), 2);
    }

    #[test]
    fn pricing_and_faq_need_content() {
        let mut cfg = config();
        assert!(pricing(&cfg).is_empty());
        assert!(faq(&cfg).is_empty());

        cfg.sections.pricing = Some(PricingSection {
            enabled: None,
            title: None,
            plans: vec![PricingPlan {
                name: "Pro".to_string(),
                price: "$9".to_string(),
                period: Some("month".to_string()),
                features: vec!["Everything".to_string()],
                highlighted: true,
            }],
        });
        cfg.sections.faq = Some(FaqSection {
            enabled: None,
            title: None,
            items: vec![FaqItem {
                question: "Is it <safe>?".to_string(),
                answer: "Yes".to_string(),
            }],
        });
        assert!(pricing(&cfg).contains("lp-plan-highlighted"));
        assert!(pricing(&cfg).contains("$9<span>/month</span>"));
        assert!(faq(&cfg).contains("Is it &lt;safe&gt;?"));
    }

    #[test]
    fn cta_falls_back_to_hash_for_unsafe_urls() {
        let mut cfg = config();
        cfg.cta_url = Some("javascript:void(0)".to_string());
        assert!(cta_link(&cfg, "lp-cta").contains("href=\"#\""));
        assert!(cta_link(&cfg, "lp-cta").contains(">Get started<"));
    }
}
