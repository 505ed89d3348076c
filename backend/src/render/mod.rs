//! # Template Registry & Renderer
//!
//! Turns a `BrandConfig` into static markup plus a stylesheet.
//!
//! Templates form a closed set (`TemplateId`); each variant is backed by a
//! unit struct implementing `LandingTemplate`. Looking up an id that is not in
//! the set yields `RenderError::UnknownTemplate` instead of a silent miss.
//!
//! Rendering is pure: no I/O, no clock, no ambient randomness. The only
//! varying input is the `PageVersion` suffix, which callers draw from their own
//! RNG (or pin, in tests and previews) and pass in explicitly. Image and logo
//! URLs are emitted as opaque strings and never fetched.

pub mod html;
mod sections;
mod templates;

use common::model::brand::BrandConfig;
use common::model::template::{FieldKind, FieldSchema, TemplateInfo};
use rand::RngCore;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("unknown template: {0}")]
    UnknownTemplate(String),
}

/// Markup fragment (the page body) and the stylesheet that goes with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub markup: String,
    pub stylesheet: String,
}

/// Cache-busting suffix stamped into rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageVersion(String);

impl PageVersion {
    /// Draws a fresh 8-hex-digit version from `rng`.
    pub fn generate<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self(format!("{:08x}", rng.next_u32()))
    }

    /// Uses a caller-supplied version. Characters outside `[A-Za-z0-9._-]`
    /// are dropped so the value is safe inside attributes and CSS comments.
    pub fn pinned(value: &str) -> Self {
        let cleaned: String = value
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
            .take(32)
            .collect();
        if cleaned.is_empty() {
            Self("0".to_string())
        } else {
            Self(cleaned)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A renderable landing-page design.
pub trait LandingTemplate: Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// Fields this template exposes to the editor.
    fn field_schema(&self) -> Vec<FieldSchema>;
    fn render(&self, config: &BrandConfig, version: &PageVersion) -> RenderedPage;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    Classic,
    PrizeWheel,
    Minimal,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [TemplateId::Classic, TemplateId::PrizeWheel, TemplateId::Minimal];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Classic => "classic",
            TemplateId::PrizeWheel => "prize-wheel",
            TemplateId::Minimal => "minimal",
        }
    }

    pub fn template(&self) -> &'static dyn LandingTemplate {
        match self {
            TemplateId::Classic => &templates::CLASSIC,
            TemplateId::PrizeWheel => &templates::PRIZE_WHEEL,
            TemplateId::Minimal => &templates::MINIMAL,
        }
    }

    pub fn info(&self) -> TemplateInfo {
        let template = self.template();
        TemplateInfo {
            id: self.as_str().to_string(),
            name: template.name().to_string(),
            description: template.description().to_string(),
            field_schema: template.field_schema(),
        }
    }
}

impl FromStr for TemplateId {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| RenderError::UnknownTemplate(s.to_string()))
    }
}

/// Renders `config` with the template registered under `template_id`.
pub fn render(
    template_id: &str,
    config: &BrandConfig,
    version: &PageVersion,
) -> Result<RenderedPage, RenderError> {
    let id: TemplateId = template_id.parse()?;
    Ok(id.template().render(config, version))
}

/// Catalogue of every registered template, in registry order.
pub fn catalogue() -> Vec<TemplateInfo> {
    TemplateId::ALL.iter().map(TemplateId::info).collect()
}

/// Builder for the schema entries templates share.
pub(crate) fn field(key: &str, label: &str, kind: FieldKind) -> FieldSchema {
    FieldSchema {
        key: key.to_string(),
        label: label.to_string(),
        kind,
        required: false,
        placeholder: None,
        description: None,
    }
}

pub(crate) trait FieldSchemaExt {
    fn required(self) -> Self;
    fn placeholder(self, text: &str) -> Self;
    fn describe(self, text: &str) -> Self;
}

impl FieldSchemaExt for FieldSchema {
    fn required(mut self) -> Self {
        self.required = true;
        self
    }

    fn placeholder(mut self, text: &str) -> Self {
        self.placeholder = Some(text.to_string());
        self
    }

    fn describe(mut self, text: &str) -> Self {
        self.description = Some(text.to_string());
        self
    }
}

/// Schema entries every template exposes.
pub(crate) fn base_fields() -> Vec<FieldSchema> {
    vec![
        field("brandName", "Brand name", FieldKind::Text)
            .required()
            .placeholder("Acme Inc."),
        field("copy.headline", "Headline", FieldKind::Text)
            .required()
            .placeholder("The fastest way to ..."),
        field("copy.subheadline", "Subheadline", FieldKind::Textarea)
            .placeholder("One or two sentences that expand on the headline"),
        field("copy.cta", "Button text", FieldKind::Text)
            .required()
            .placeholder("Get started"),
        field("ctaUrl", "Button link", FieldKind::Url)
            .placeholder("https://")
            .describe("Where the call-to-action sends visitors"),
        field("colors.primary", "Primary color", FieldKind::Color).required(),
        field("colors.secondary", "Secondary color", FieldKind::Color),
        field("colors.accent", "Accent color", FieldKind::Color),
        field("logoUrl", "Logo", FieldKind::Image),
    ]
}
