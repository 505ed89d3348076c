mod classic;
mod minimal;
mod prize_wheel;

use crate::render::html::palette_rule;
use crate::render::PageVersion;
use common::model::brand::BrandConfig;

pub(crate) use classic::CLASSIC;
pub(crate) use minimal::MINIMAL;
pub(crate) use prize_wheel::PRIZE_WHEEL;

/// Rules every template starts from.
const BASE_CSS: &str = r#"*,*::before,*::after{box-sizing:border-box}
body{margin:0;font-family:system-ui,-apple-system,"Segoe UI",Roboto,sans-serif;line-height:1.5;color:var(--color-secondary);background:#fff}
img{max-width:100%;height:auto}
.lp h1,.lp h2,.lp h3{line-height:1.2;margin:0 0 .5em}
.lp-cta{display:inline-block;padding:.9em 2em;border-radius:999px;background:var(--color-accent);color:#fff;font-weight:700;text-decoration:none}
.lp-cta:hover{filter:brightness(1.1)}
.lp-logo{max-height:48px}
.lp-brand{font-weight:800;font-size:1.25rem;color:var(--color-primary)}
.lp-features,.lp-pricing,.lp-faq{padding:4rem 1.5rem;max-width:1080px;margin:0 auto}
.lp-feature-grid,.lp-plan-grid{display:grid;gap:1.5rem;grid-template-columns:repeat(auto-fit,minmax(240px,1fr))}
.lp-feature,.lp-plan{padding:1.5rem;border-radius:12px;background:#f8fafc}
.lp-feature-icon{font-size:2rem;color:var(--color-primary)}
.lp-plan-highlighted{outline:3px solid var(--color-primary)}
.lp-price{font-size:2rem;font-weight:800;color:var(--color-primary)}
.lp-price span{font-size:1rem;font-weight:400}
.lp-faq details{border-bottom:1px solid #e2e8f0;padding:1rem 0}
.lp-faq summary{cursor:pointer;font-weight:600}
.lp-footer{padding:2rem;text-align:center;font-size:.875rem;color:#64748b}
"#;

/// Stylesheet header, palette and base rules followed by template rules.
fn compose_stylesheet(template: &str, config: &BrandConfig, version: &PageVersion, rules: &str) -> String {
    let mut css = format!("/* {} page {} */\n", template, version);
    css.push_str(&palette_rule(&config.colors));
    css.push_str(BASE_CSS);
    css.push_str(rules);
    css
}
