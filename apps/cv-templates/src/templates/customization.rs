//! Partial overlays consumed by the customizer.
//!
//! Every field is optional: `Some` overrides the base value, `None` inherits it.
//! `id`, `version` and `metadata.updatedAt` are owned by the engine and
//! cannot be overlaid.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::EngineError;
use crate::templates::model::{
    BorderStyle, FontFamily, LayoutKind, SectionKind, TemplateCategory, TextAlign,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateCustomization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<TemplateCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorsPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typography: Option<TypographyPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutPatch>,
    /// Per-section patch; sections not listed are untouched.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub sections: BTreeMap<SectionKind, SectionPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataPatch>,
}

impl TemplateCustomization {
    /// Parses an overlay from a request body or form payload.
    pub fn from_json(value: Value) -> Result<Self, EngineError> {
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorsPatch {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
    pub text: Option<String>,
    pub background: Option<String>,
    pub border: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypographyPatch {
    pub font_family: Option<FontFamily>,
    pub custom_font: Option<String>,
    pub font_size: Option<FontSizePatch>,
    pub line_height: Option<f32>,
    pub font_weight: Option<FontWeightPatch>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSizePatch {
    pub base: Option<f32>,
    pub heading: Option<f32>,
    pub small: Option<f32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontWeightPatch {
    pub normal: Option<u16>,
    pub bold: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPatch {
    #[serde(rename = "type")]
    pub kind: Option<LayoutKind>,
    pub spacing: Option<SpacingPatch>,
    pub borders: Option<BordersPatch>,
    pub alignment: Option<AlignmentPatch>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingPatch {
    pub section: Option<f32>,
    pub element: Option<f32>,
    pub margin: Option<f32>,
    pub padding: Option<f32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BordersPatch {
    pub enabled: Option<bool>,
    pub style: Option<BorderStyle>,
    pub width: Option<f32>,
    pub radius: Option<f32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentPatch {
    pub header: Option<TextAlign>,
    pub content: Option<TextAlign>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionPatch {
    pub enabled: Option<bool>,
    pub order: Option<u32>,
}

/// Label lists replace the base list wholesale; they are never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MetadataPatch {
    pub author: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
    pub industries: Option<Vec<String>>,
    pub roles: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_overlay() {
        let overlay = TemplateCustomization::from_json(serde_json::json!({
            "colors": { "primary": "#000000" },
            "typography": { "fontSize": { "base": 12 } },
            "layout": { "type": "two-column" },
            "sections": { "projects": { "enabled": false } }
        }))
        .unwrap();

        let colors = overlay.colors.unwrap();
        assert_eq!(colors.primary.as_deref(), Some("#000000"));
        assert_eq!(colors.background, None);
        assert_eq!(
            overlay.typography.unwrap().font_size.unwrap().base,
            Some(12.0)
        );
        assert_eq!(overlay.layout.unwrap().kind, Some(LayoutKind::TwoColumn));
        assert_eq!(
            overlay.sections[&SectionKind::Projects],
            SectionPatch { enabled: Some(false), order: None }
        );
        assert!(overlay.metadata.is_none());
    }

    #[test]
    fn test_empty_object_is_empty_overlay() {
        let overlay = TemplateCustomization::from_json(serde_json::json!({})).unwrap();
        assert_eq!(overlay, TemplateCustomization::default());
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        let result = TemplateCustomization::from_json(serde_json::json!({
            "layout": { "type": "three-column" }
        }));
        assert!(matches!(result, Err(EngineError::Serialization(_))));
    }
}
