//! Long-form landing page: hero, features, pricing, FAQ.

use super::compose_stylesheet;
use crate::render::html::{escape, or_default, safe_url};
use crate::render::{base_fields, field, sections, FieldSchemaExt, LandingTemplate, PageVersion, RenderedPage};
use common::model::brand::BrandConfig;
use common::model::template::{FieldKind, FieldSchema};

pub(crate) struct Classic;

pub(crate) static CLASSIC: Classic = Classic;

const CLASSIC_CSS: &str = r#".lp-header{display:flex;align-items:center;justify-content:space-between;padding:1rem 1.5rem;max-width:1080px;margin:0 auto}
.lp-hero{padding:5rem 1.5rem;text-align:center;color:#fff;background:linear-gradient(135deg,var(--color-primary),var(--color-secondary))}
.lp-hero h1{font-size:clamp(2rem,5vw,3.5rem)}
.lp-hero .lp-sub{max-width:640px;margin:0 auto 2rem;font-size:1.25rem;opacity:.9}
.lp-hero-image{display:block;max-width:880px;margin:2.5rem auto 0;border-radius:16px;box-shadow:0 20px 50px rgba(0,0,0,.25)}
"#;

impl LandingTemplate for Classic {
    fn name(&self) -> &'static str {
        "Classic"
    }

    fn description(&self) -> &'static str {
        "Hero with call to action followed by features, pricing and FAQ sections."
    }

    fn field_schema(&self) -> Vec<FieldSchema> {
        let mut fields = base_fields();
        fields.extend([
            field("heroImage", "Hero image", FieldKind::Image)
                .describe("Shown below the headline"),
            field("featureImage1", "Feature image 1", FieldKind::Image),
            field("featureImage2", "Feature image 2", FieldKind::Image),
            field("sections.features", "Features", FieldKind::Section),
            field("sections.pricing", "Pricing", FieldKind::Section)
                .describe("Hidden until at least one plan is added"),
            field("sections.faq", "FAQ", FieldKind::Section),
        ]);
        fields
    }

    fn render(&self, config: &BrandConfig, version: &PageVersion) -> RenderedPage {
        let mut markup = format!(
            "<div class=\"lp lp-classic\" data-template=\"classic\" data-page-version=\"{}\">\n",
            version
        );
        markup.push_str(&format!(
            "<header class=\"lp-header\">{}</header>\n",
            sections::brand_mark(config)
        ));

        markup.push_str("<section class=\"lp-hero\">\n");
        markup.push_str(&format!(
            "  <h1>{}</h1>\n",
            escape(or_default(&config.copy.headline, &config.brand_name))
        ));
        if !config.copy.subheadline.trim().is_empty() {
            markup.push_str(&format!(
                "  <p class=\"lp-sub\">{}</p>\n",
                escape(&config.copy.subheadline)
            ));
        }
        markup.push_str(&format!("  {}\n", sections::cta_link(config, "lp-cta")));
        if let Some(src) = config.hero_image.as_deref().and_then(safe_url) {
            markup.push_str(&format!(
                "  <img class=\"lp-hero-image\" src=\"{}\" alt=\"{}\">\n",
                src,
                escape(&config.brand_name)
            ));
        }
        markup.push_str("</section>\n");

        markup.push_str(&sections::features(config));
        markup.push_str(&sections::pricing(config));
        markup.push_str(&sections::faq(config));

        markup.push_str(&format!(
            "<footer class=\"lp-footer\"><p>&copy; {}</p></footer>\n</div>\n",
            escape(&config.brand_name)
        ));

        RenderedPage {
            markup,
            stylesheet: compose_stylesheet("classic", config, version, CLASSIC_CSS),
        }
    }
}
