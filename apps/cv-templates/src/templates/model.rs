//! Configuration Model: the typed schema of a CV template and its defaults.
//!
//! JSON field names are camelCase so definitions authored for the web client
//! deserialize unchanged. Groups that have a sensible default (`typography`,
//! `layout`, `sections`) may be omitted from a definition.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current shape version of [`TemplateConfiguration`].
pub const SCHEMA_VERSION: u32 = 1;

// ────────────────────────────────────────────────────────────────────────────
// Closed enumerations
// ────────────────────────────────────────────────────────────────────────────

/// Classification tag used for catalog filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Professional,
    Creative,
    Modern,
    Minimal,
    Academic,
    Executive,
    Technical,
}

impl TemplateCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateCategory::Professional => "professional",
            TemplateCategory::Creative => "creative",
            TemplateCategory::Modern => "modern",
            TemplateCategory::Minimal => "minimal",
            TemplateCategory::Academic => "academic",
            TemplateCategory::Executive => "executive",
            TemplateCategory::Technical => "technical",
        }
    }
}

impl fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    Serif,
    SansSerif,
    Monospace,
    /// Uses `Typography::custom_font` when supplied.
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    SingleColumn,
    TwoColumn,
    Sidebar,
}

impl LayoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::SingleColumn => "single-column",
            LayoutKind::TwoColumn => "two-column",
            LayoutKind::Sidebar => "sidebar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Solid,
    Dashed,
    Dotted,
    None,
}

impl BorderStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Dotted => "dotted",
            BorderStyle::None => "none",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
            TextAlign::Justify => "justify",
        }
    }
}

/// A named content block of a CV.
///
/// Declaration order doubles as the tiebreak when two enabled sections share
/// the same `order` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Header,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
    Awards,
    Publications,
    Volunteer,
    Custom,
}

impl SectionKind {
    pub const ALL: [SectionKind; 12] = [
        SectionKind::Header,
        SectionKind::Summary,
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::Skills,
        SectionKind::Projects,
        SectionKind::Certifications,
        SectionKind::Languages,
        SectionKind::Awards,
        SectionKind::Publications,
        SectionKind::Volunteer,
        SectionKind::Custom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Header => "header",
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skills => "skills",
            SectionKind::Projects => "projects",
            SectionKind::Certifications => "certifications",
            SectionKind::Languages => "languages",
            SectionKind::Awards => "awards",
            SectionKind::Publications => "publications",
            SectionKind::Volunteer => "volunteer",
            SectionKind::Custom => "custom",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Field groups
// ────────────────────────────────────────────────────────────────────────────

/// Color values are opaque strings (usually hex).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub primary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    pub text: String,
    pub background: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<String>,
}

/// Font sizes in px.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSizes {
    pub base: f32,
    pub heading: f32,
    pub small: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontWeights {
    pub normal: u16,
    pub bold: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: FontFamily,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_font: Option<String>,
    pub font_size: FontSizes,
    /// Unitless multiplier.
    pub line_height: f32,
    pub font_weight: FontWeights,
}

/// Spacing in px.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    pub section: f32,
    pub element: f32,
    pub margin: f32,
    pub padding: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Borders {
    pub enabled: bool,
    pub style: BorderStyle,
    /// px
    pub width: f32,
    /// px
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    pub header: TextAlign,
    pub content: TextAlign,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(rename = "type")]
    pub kind: LayoutKind,
    pub spacing: Spacing,
    pub borders: Borders,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub enabled: bool,
    pub order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMetadata {
    #[serde(default)]
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Declarative description of one visual template.
///
/// Never mutated once registered; customizations and clones are new values
/// with their own `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateConfiguration {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: TemplateCategory,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default = "default_version")]
    pub version: u32,
    pub colors: ColorScheme,
    #[serde(default = "default_typography")]
    pub typography: Typography,
    #[serde(default = "default_layout")]
    pub layout: Layout,
    #[serde(default = "default_sections")]
    pub sections: BTreeMap<SectionKind, SectionConfig>,
    pub metadata: TemplateMetadata,
}

impl TemplateConfiguration {
    /// Builds a configuration from the default groups, stamped with the
    /// current time.
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: TemplateCategory) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            category,
            is_premium: false,
            version: SCHEMA_VERSION,
            colors: default_colors(),
            typography: default_typography(),
            layout: default_layout(),
            sections: default_sections(),
            metadata: TemplateMetadata {
                author: String::new(),
                created_at: now,
                updated_at: now,
                tags: Vec::new(),
                industries: Vec::new(),
                roles: Vec::new(),
            },
        }
    }

    /// Enabled sections in render order.
    pub fn render_order(&self) -> Vec<SectionKind> {
        let mut enabled: Vec<(SectionKind, u32)> = self
            .sections
            .iter()
            .filter(|(_, section)| section.enabled)
            .map(|(kind, section)| (*kind, section.order))
            .collect();
        // BTreeMap iteration is already in declaration order, and the sort is stable.
        enabled.sort_by_key(|(_, order)| *order);
        enabled.into_iter().map(|(kind, _)| kind).collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Defaults
// ────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_BORDER_COLOR: &str = "#e5e7eb";

fn default_version() -> u32 {
    SCHEMA_VERSION
}

pub fn default_colors() -> ColorScheme {
    ColorScheme {
        primary: "#2563eb".to_string(),
        secondary: Some("#64748b".to_string()),
        accent: Some("#0ea5e9".to_string()),
        text: "#1f2937".to_string(),
        background: "#ffffff".to_string(),
        border: Some(DEFAULT_BORDER_COLOR.to_string()),
    }
}

pub fn default_typography() -> Typography {
    Typography {
        font_family: FontFamily::SansSerif,
        custom_font: None,
        font_size: FontSizes {
            base: 14.0,
            heading: 20.0,
            small: 12.0,
        },
        line_height: 1.5,
        font_weight: FontWeights {
            normal: 400,
            bold: 700,
        },
    }
}

pub fn default_layout() -> Layout {
    Layout {
        kind: LayoutKind::SingleColumn,
        spacing: Spacing {
            section: 24.0,
            element: 12.0,
            margin: 32.0,
            padding: 16.0,
        },
        borders: Borders {
            enabled: false,
            style: BorderStyle::Solid,
            width: 1.0,
            radius: 0.0,
        },
        alignment: Alignment {
            header: TextAlign::Left,
            content: TextAlign::Left,
        },
    }
}

/// Starting point for a section that an overlay introduces.
pub const DEFAULT_SECTION_CONFIG: SectionConfig = SectionConfig {
    enabled: true,
    order: 0,
};

/// Header through certifications enabled in declaration order; the rest
/// present but disabled.
pub fn default_sections() -> BTreeMap<SectionKind, SectionConfig> {
    SectionKind::ALL
        .iter()
        .enumerate()
        .map(|(order, kind)| {
            let config = SectionConfig {
                enabled: *kind <= SectionKind::Certifications,
                order: order as u32,
            };
            (*kind, config)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sections_cover_every_kind() {
        let sections = default_sections();
        assert_eq!(sections.len(), SectionKind::ALL.len());
        assert!(sections[&SectionKind::Header].enabled);
        assert!(!sections[&SectionKind::Volunteer].enabled);
    }

    #[test]
    fn test_render_order_sorts_by_order_and_skips_disabled() {
        let mut config = TemplateConfiguration::new("t", "T", TemplateCategory::Modern);
        config.sections = BTreeMap::from([
            (SectionKind::Header, SectionConfig { enabled: true, order: 0 }),
            (SectionKind::Skills, SectionConfig { enabled: true, order: 1 }),
            (SectionKind::Experience, SectionConfig { enabled: true, order: 5 }),
            (SectionKind::Awards, SectionConfig { enabled: false, order: 2 }),
        ]);
        assert_eq!(
            config.render_order(),
            vec![SectionKind::Header, SectionKind::Skills, SectionKind::Experience]
        );
    }

    #[test]
    fn test_render_order_ties_keep_declaration_order() {
        let mut config = TemplateConfiguration::new("t", "T", TemplateCategory::Modern);
        config.sections = BTreeMap::from([
            (SectionKind::Projects, SectionConfig { enabled: true, order: 3 }),
            (SectionKind::Summary, SectionConfig { enabled: true, order: 3 }),
        ]);
        assert_eq!(
            config.render_order(),
            vec![SectionKind::Summary, SectionKind::Projects]
        );
    }

    #[test]
    fn test_json_uses_camel_case_and_enum_spellings() {
        let mut config = TemplateConfiguration::new("modern", "Modern", TemplateCategory::Professional);
        config.is_premium = true;
        let value = serde_json::to_value(&config).unwrap();

        assert_eq!(value["isPremium"], true);
        assert_eq!(value["category"], "professional");
        assert_eq!(value["typography"]["fontFamily"], "sans-serif");
        assert_eq!(value["typography"]["lineHeight"], 1.5);
        assert_eq!(value["layout"]["type"], "single-column");
        assert_eq!(value["sections"]["experience"]["order"], 2);
        assert!(value["metadata"]["createdAt"].is_string());
    }

    #[test]
    fn test_optional_groups_default_when_omitted() {
        let json = serde_json::json!({
            "id": "bare",
            "name": "Bare",
            "category": "minimal",
            "colors": { "primary": "#000000", "text": "#111111", "background": "#ffffff" },
            "metadata": {
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-01T00:00:00Z"
            }
        });
        let config: TemplateConfiguration = serde_json::from_value(json).unwrap();

        assert_eq!(config.version, SCHEMA_VERSION);
        assert_eq!(config.typography, default_typography());
        assert_eq!(config.layout, default_layout());
        assert_eq!(config.sections, default_sections());
        assert_eq!(config.colors.secondary, None);
        assert!(config.metadata.tags.is_empty());
    }
}
