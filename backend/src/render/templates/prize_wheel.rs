//! Gamified page: a spin wheel, a balance counter and a prize popup.
//!
//! The popup opens through the `:target` selector so the page works without
//! any script of its own.

use super::compose_stylesheet;
use crate::render::html::{escape, or_default};
use crate::render::{base_fields, field, sections, FieldSchemaExt, LandingTemplate, PageVersion, RenderedPage};
use common::model::brand::BrandConfig;
use common::model::template::{FieldKind, FieldSchema};

pub(crate) struct PrizeWheel;

pub(crate) static PRIZE_WHEEL: PrizeWheel = PrizeWheel;

const SEGMENTS: usize = 8;

const PRIZE_WHEEL_CSS: &str = r#".lp-prize-wheel{min-height:100vh;text-align:center;padding:2rem 1rem;color:#fff;background:radial-gradient(circle at top,var(--color-primary),var(--color-secondary))}
.lp-balance{display:inline-block;margin:1rem 0;padding:.4em 1.2em;border-radius:999px;background:rgba(0,0,0,.3);font-variant-numeric:tabular-nums}
.lp-wheel{position:relative;width:min(80vw,360px);aspect-ratio:1;margin:2rem auto;border-radius:50%;border:8px solid #fff;background:conic-gradient(var(--color-accent) 0 12.5%,var(--color-primary) 0 25%,var(--color-accent) 0 37.5%,var(--color-primary) 0 50%,var(--color-accent) 0 62.5%,var(--color-primary) 0 75%,var(--color-accent) 0 87.5%,var(--color-primary) 0 100%)}
.lp-wheel-segment{position:absolute;left:50%;top:50%;transform-origin:0 0;font-weight:700;font-size:.8rem}
.lp-wheel-pointer{position:absolute;top:-18px;left:50%;transform:translateX(-50%);border:14px solid transparent;border-top-color:#fff}
.lp-popup{display:none;position:fixed;inset:0;align-items:center;justify-content:center;background:rgba(0,0,0,.65)}
.lp-popup:target{display:flex}
.lp-popup-card{max-width:420px;padding:2rem;border-radius:16px;background:#fff;color:var(--color-secondary)}
.lp-popup-prize{font-size:1.75rem;font-weight:800;color:var(--color-accent)}
"#;

impl LandingTemplate for PrizeWheel {
    fn name(&self) -> &'static str {
        "Prize wheel"
    }

    fn description(&self) -> &'static str {
        "Spin-to-win wheel with a player balance and a prize popup that leads to the offer."
    }

    fn field_schema(&self) -> Vec<FieldSchema> {
        let mut fields = base_fields();
        fields.extend([
            field("popupTitle", "Popup title", FieldKind::Text)
                .required()
                .placeholder("Congratulations!"),
            field("popupMessage", "Popup message", FieldKind::Textarea)
                .placeholder("You unlocked a welcome bonus"),
            field("popupPrize", "Prize", FieldKind::Text)
                .required()
                .placeholder("100 free spins"),
            field("gameBalance", "Starting balance", FieldKind::Number)
                .describe("Shown above the wheel; leave empty to hide"),
        ]);
        fields
    }

    fn render(&self, config: &BrandConfig, version: &PageVersion) -> RenderedPage {
        let mut markup = format!(
            "<div class=\"lp lp-prize-wheel\" data-template=\"prize-wheel\" data-page-version=\"{}\">\n",
            version
        );
        markup.push_str(&format!("  {}\n", sections::brand_mark(config)));
        markup.push_str(&format!(
            "  <h1>{}</h1>\n",
            escape(or_default(&config.copy.headline, "Spin the wheel"))
        ));
        if !config.copy.subheadline.trim().is_empty() {
            markup.push_str(&format!(
                "  <p class=\"lp-sub\">{}</p>\n",
                escape(&config.copy.subheadline)
            ));
        }
        if let Some(balance) = config.game_balance.and_then(format_balance) {
            markup.push_str(&format!(
                "  <p class=\"lp-balance\">Balance: <strong>{}</strong></p>\n",
                balance
            ));
        }

        let prize = config.popup_prize.as_deref().unwrap_or("");
        let prize = or_default(prize, "Bonus");
        markup.push_str("  <div class=\"lp-wheel\">\n    <span class=\"lp-wheel-pointer\"></span>\n");
        for index in 0..SEGMENTS {
            let label = if index % 2 == 0 { escape(prize) } else { "×".to_string() };
            markup.push_str(&format!(
                "    <span class=\"lp-wheel-segment\" style=\"transform:rotate({}deg) translate(30%,-50%)\">{}</span>\n",
                index * 360 / SEGMENTS + 360 / SEGMENTS / 2,
                label
            ));
        }
        markup.push_str("  </div>\n");
        markup.push_str("  <a class=\"lp-cta lp-spin\" href=\"#lp-prize\">Spin</a>\n");

        let title = config.popup_title.as_deref().unwrap_or("");
        let message = config.popup_message.as_deref().unwrap_or("");
        markup.push_str("  <div class=\"lp-popup\" id=\"lp-prize\">\n    <div class=\"lp-popup-card\">\n");
        markup.push_str(&format!(
            "      <h2>{}</h2>\n",
            escape(or_default(title, "Congratulations!"))
        ));
        if !message.trim().is_empty() {
            markup.push_str(&format!("      <p>{}</p>\n", escape(message)));
        }
        markup.push_str(&format!(
            "      <p class=\"lp-popup-prize\">{}</p>\n",
            escape(prize)
        ));
        markup.push_str(&format!("      {}\n", sections::cta_link(config, "lp-cta")));
        markup.push_str("    </div>\n  </div>\n");
        markup.push_str(&sections::faq(config));
        markup.push_str("</div>\n");

        RenderedPage {
            markup,
            stylesheet: compose_stylesheet("prize-wheel", config, version, PRIZE_WHEEL_CSS),
        }
    }
}

/// Formats a balance with two decimals and comma thousands separators.
/// Non-finite values are not shown.
fn format_balance(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    Some(format!("{}{}.{}", sign, grouped, fraction))
}
