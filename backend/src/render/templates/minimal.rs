//! Single-screen page: headline, supporting line, one button.

use super::compose_stylesheet;
use crate::render::html::{escape, or_default, safe_url};
use crate::render::{base_fields, field, sections, LandingTemplate, PageVersion, RenderedPage};
use common::model::brand::BrandConfig;
use common::model::template::{FieldKind, FieldSchema};

pub(crate) struct Minimal;

pub(crate) static MINIMAL: Minimal = Minimal;

const MINIMAL_CSS: &str = r#".lp-minimal{min-height:100vh;display:flex;flex-direction:column;align-items:center;justify-content:center;gap:1.5rem;padding:2rem;text-align:center;background:var(--color-primary);color:#fff}
.lp-minimal .lp-brand{color:#fff}
.lp-minimal .lp-hero-image{max-width:480px;border-radius:12px}
.lp-minimal .lp-faq{color:var(--color-secondary);background:#fff;border-radius:12px}
"#;

impl LandingTemplate for Minimal {
    fn name(&self) -> &'static str {
        "Minimal"
    }

    fn description(&self) -> &'static str {
        "One focused screen with a single call to action and an optional FAQ."
    }

    fn field_schema(&self) -> Vec<FieldSchema> {
        let mut fields = base_fields();
        fields.push(field("heroImage", "Image", FieldKind::Image));
        fields.push(field("sections.faq", "FAQ", FieldKind::Section));
        fields
    }

    fn render(&self, config: &BrandConfig, version: &PageVersion) -> RenderedPage {
        let mut markup = format!(
            "<div class=\"lp lp-minimal\" data-template=\"minimal\" data-page-version=\"{}\">\n",
            version
        );
        markup.push_str(&format!("  {}\n", sections::brand_mark(config)));
        if let Some(src) = config.hero_image.as_deref().and_then(safe_url) {
            markup.push_str(&format!(
                "  <img class=\"lp-hero-image\" src=\"{}\" alt=\"\">\n",
                src
            ));
        }
        markup.push_str(&format!(
            "  <h1>{}</h1>\n",
            escape(or_default(&config.copy.headline, &config.brand_name))
        ));
        if !config.copy.subheadline.trim().is_empty() {
            markup.push_str(&format!("  <p>{}</p>\n", escape(&config.copy.subheadline)));
        }
        markup.push_str(&format!("  {}\n", sections::cta_link(config, "lp-cta")));
        markup.push_str(&sections::faq(config));
        markup.push_str("</div>\n");

        RenderedPage {
            markup,
            stylesheet: compose_stylesheet("minimal", config, version, MINIMAL_CSS),
        }
    }
}
