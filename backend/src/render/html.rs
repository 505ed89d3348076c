//! Escaping and value-sanitising helpers shared by every template.
//!
//! Brand data comes straight from the editor, so all of it is treated as
//! untrusted text: copy is entity-escaped, URLs are filtered by scheme and
//! colors are reduced to a safe character set before landing in CSS.

use common::model::brand::BrandColors;

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Returns an escaped URL suitable for `href`/`src`, or `None` when the value
/// is blank or uses a scheme that can execute script.
pub fn safe_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lowered: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    if lowered.starts_with("javascript:") || lowered.starts_with("vbscript:") {
        return None;
    }
    if lowered.starts_with("data:") && !lowered.starts_with("data:image/") {
        return None;
    }
    Some(escape(trimmed))
}

/// Keeps a color token only if it is made of characters that can appear in a
/// CSS color (`#hex`, `rgb(...)`, `hsl(...)`, named colors). Anything else
/// falls back to `fallback`.
pub fn css_color(value: &str, fallback: &str) -> String {
    let value = value.trim();
    let allowed = |c: char| c.is_ascii_alphanumeric() || "#(),.% ".contains(c);
    if value.is_empty() || value.len() > 64 || !value.chars().all(allowed) {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Palette with every unusable token replaced by its default.
pub fn resolved_palette(colors: &BrandColors) -> BrandColors {
    let defaults = BrandColors::default();
    BrandColors {
        primary: css_color(&colors.primary, &defaults.primary),
        secondary: css_color(&colors.secondary, &defaults.secondary),
        accent: css_color(&colors.accent, &defaults.accent),
    }
}

/// `:root` block exposing the palette as custom properties.
pub fn palette_rule(colors: &BrandColors) -> String {
    let palette = resolved_palette(colors);
    format!(
        ":root {{\n  --color-primary: {};\n  --color-secondary: {};\n  --color-accent: {};\n}}\n",
        palette.primary, palette.secondary, palette.accent,
    )
}

/// Returns the trimmed value, or `fallback` when the value is blank.
pub fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn rejects_script_urls() {
        assert_eq!(safe_url("javascript:alert(1)"), None);
        assert_eq!(safe_url(" JavaScript:alert(1)"), None);
        assert_eq!(safe_url("java\tscript:alert(1)"), None);
        assert_eq!(safe_url("data:text/html;base64,AAAA"), None);
        assert_eq!(safe_url("   "), None);
        assert_eq!(
            safe_url("https://cdn.example.com/a.png?x=1&y=2").as_deref(),
            Some("https://cdn.example.com/a.png?x=1&amp;y=2")
        );
        assert!(safe_url("data:image/png;base64,AAAA").is_some());
    }

    #[test]
    fn css_color_falls_back_on_injection() {
        assert_eq!(css_color("#ff0000", "#000"), "#ff0000");
        assert_eq!(css_color("rgb(1, 2, 3)", "#000"), "rgb(1, 2, 3)");
        assert_eq!(css_color("red;}body{display:none", "#000"), "#000");
        assert_eq!(css_color("", "#000"), "#000");
    }
}
