//! Runs the shipped `script.js` of secure packages in QuickJS against a small
//! DOM stand-in, with and without obfuscation.

use backend::package::{build_secure_package, BuiltPackage, PackageInputs};
use backend::protect::obfuscate::{ObfuscateError, ObfuscationBackend, ObfuscationProfile, PassObfuscator};
use backend::render::{self, PageVersion};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{TimeZone, Utc};
use common::model::site::SiteRecord;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rquickjs::{Context, Runtime};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use zip::ZipArchive;

const DOM_STUB: &str = r#"
var harness = { root: { innerHTML: '' }, doc: { innerHTML: '' }, props: {}, appended: [], listeners: {}, intervals: [] };
harness.doc.style = { setProperty: function (name, value) { harness.props[name] = value; } };
var window = {
  outerWidth: 1280, innerWidth: 1280, outerHeight: 800, innerHeight: 800,
  location: { protocol: harnessProtocol, hostname: harnessHost },
  console: {}
};
var document = {
  documentElement: harness.doc,
  body: { appendChild: function (node) { harness.appended.push(node); } },
  getElementById: function (id) { return id === 'prelander-root' ? harness.root : null; },
  createElement: function (tag) {
    return { tag: tag, style: {}, attrs: {}, setAttribute: function (key, value) { this.attrs[key] = value; } };
  },
  addEventListener: function (type, handler) { harness.listeners[type] = handler; }
};
function setInterval(callback, ms) { harness.intervals.push(callback); return harness.intervals.length; }
"#;

const REPORT: &str = r#"
for (var harnessTick = 0; harnessTick < harness.intervals.length; harnessTick++) {
  harness.intervals[harnessTick]();
}
var harnessBlocked = false;
if (harness.listeners.keydown) {
  harness.listeners.keydown({
    key: 'F12', ctrlKey: false, metaKey: false, shiftKey: false,
    preventDefault: function () { harnessBlocked = true; },
    stopPropagation: function () {}
  });
}
JSON.stringify({
  halted: harness.doc.innerHTML !== '',
  page: harness.doc.innerHTML,
  html: harness.root.innerHTML,
  props: harness.props,
  tag: harness.appended.length ? harness.appended[0].attrs : null,
  blocksF12: harnessBlocked,
  contextMenuHooked: typeof harness.listeners.contextmenu === 'function'
});
"#;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GuardRun {
    halted: bool,
    page: String,
    html: String,
    props: HashMap<String, String>,
    tag: Option<HashMap<String, String>>,
    blocks_f12: bool,
    context_menu_hooked: bool,
}

struct Passthrough;

impl ObfuscationBackend for Passthrough {
    fn apply(&self, source: &str, _profile: &ObfuscationProfile) -> Result<String, ObfuscateError> {
        Ok(source.to_string())
    }
}

fn site(template_id: &str) -> SiteRecord {
    SiteRecord {
        slug: "acme".to_string(),
        template_id: template_id.to_string(),
        config: serde_json::from_value(serde_json::json!({
            "brandName": "Café Royale™",
            "copy": {"headline": "Spin to win 🎰", "subheadline": "Ünïcödé & <markup>", "cta": "Play"},
            "colors": {"primary": "#0f766e", "secondary": "#0f172a", "accent": "#f97316"},
            "ctaUrl": "https://acme.test/play",
            "sections": {"faq": {"items": [{"question": "Wie?", "answer": "Ganz einfach: 日本語"}]}},
            "popupTitle": "Gewonnen!",
            "popupPrize": "100 € bonus",
            "gameBalance": 250
        }))
        .unwrap(),
    }
}

fn build(site: &SiteRecord, allowed_domain: Option<&str>, backend: &dyn ObfuscationBackend, seed: u64) -> BuiltPackage {
    let inputs = PackageInputs {
        site,
        affiliate_code: "AFF1",
        allowed_domain,
        generated_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
    };
    build_secure_package(&inputs, backend, &mut StdRng::seed_from_u64(seed)).unwrap()
}

fn script_of(built: &BuiltPackage) -> String {
    let mut zip = ZipArchive::new(Cursor::new(built.bytes.as_slice())).unwrap();
    let mut script = String::new();
    zip.by_name("script.js").unwrap().read_to_string(&mut script).unwrap();
    script
}

fn run_guard(script: &str, protocol: &str, hostname: &str) -> GuardRun {
    let runtime = Runtime::new().unwrap();
    let context = Context::full(&runtime).unwrap();
    let source = format!(
        "var harnessProtocol = {};\nvar harnessHost = {};\n{}\n{}\n{}",
        serde_json::to_string(protocol).unwrap(),
        serde_json::to_string(hostname).unwrap(),
        DOM_STUB,
        script,
        REPORT
    );
    let report = context
        .with(|ctx| ctx.eval::<String, _>(source))
        .unwrap_or_else(|e| panic!("guard script failed on {}: {}", hostname, e));
    serde_json::from_str(&report).unwrap()
}

#[test]
fn obfuscated_guard_injects_the_rendered_page() {
    for template_id in ["classic", "prize-wheel", "minimal"] {
        let site = site(template_id);
        for seed in 0..4 {
            let built = build(&site, Some("example.com"), &PassObfuscator::with_seed(seed), seed + 100);
            let run = run_guard(&script_of(&built), "https:", "shop.example.com");

            let expected = render::render(template_id, &site.config, &PageVersion::pinned(&built.page_version)).unwrap();
            assert!(!run.halted, "{} seed {} halted: {}", template_id, seed, run.page);
            assert_eq!(run.html, expected.markup, "{} seed {}", template_id, seed);
            assert_eq!(run.props["--color-primary"], "#0f766e");
            assert_eq!(run.props["--color-secondary"], "#0f172a");
            assert_eq!(run.props["--color-accent"], "#f97316");

            let tag = run.tag.expect("tracking node appended");
            assert_eq!(tag["data-ref"], BASE64.encode(&built.affiliate_token));
            assert_eq!(tag["data-site"], "acme");
            assert!(run.blocks_f12);
            assert!(run.context_menu_hooked);
        }
    }
}

#[test]
fn domain_check_accepts_domain_subdomains_and_loopback() {
    let site = site("classic");
    let backends: [(&str, &dyn ObfuscationBackend); 2] =
        [("plain", &Passthrough), ("obfuscated", &PassObfuscator::with_seed(7))];
    for (label, backend) in backends {
        let script = script_of(&build(&site, Some("example.com"), backend, 11));
        for host in ["example.com", "shop.example.com", "deep.shop.example.com", "localhost", "127.0.0.1", "[::1]"] {
            let run = run_guard(&script, "https:", host);
            assert!(!run.halted, "{} script rejected {}: {}", label, host, run.page);
            assert!(!run.html.is_empty(), "{} script left {} empty", label, host);
        }
    }
}

#[test]
fn domain_check_rejects_lookalike_hosts() {
    let site = site("classic");
    let backends: [(&str, &dyn ObfuscationBackend); 2] =
        [("plain", &Passthrough), ("obfuscated", &PassObfuscator::with_seed(7))];
    for (label, backend) in backends {
        let script = script_of(&build(&site, Some("example.com"), backend, 11));
        for host in ["example.com.evil.net", "notexample.com", "example.org"] {
            let run = run_guard(&script, "https:", host);
            assert!(run.halted, "{} script accepted {}", label, host);
            assert!(run.page.contains(&format!("not authorised to run on {}", host)));
            assert!(run.html.is_empty());
            assert!(run.tag.is_none());
        }
    }
}

#[test]
fn unlocked_package_runs_on_any_host_but_not_from_disk() {
    let site = site("minimal");
    let script = script_of(&build(&site, None, &PassObfuscator::with_seed(3), 21));

    let run = run_guard(&script, "https:", "anything.test");
    assert!(!run.halted);
    assert!(run.html.contains("Spin to win 🎰"));

    let run = run_guard(&script, "file:", "");
    assert!(run.halted);
    assert!(run.page.contains("must be served from a web server"));
    assert!(run.html.is_empty());
}
