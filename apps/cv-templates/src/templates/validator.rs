//! Template validation.
//!
//! Structural problems are hard errors and are all reported together.
//! Readability heuristics run only on structurally valid configurations and
//! only ever produce warnings.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::EngineError;
use crate::templates::model::{
    ColorScheme, FontFamily, Layout, TemplateConfiguration, Typography, SCHEMA_VERSION,
};

/// Base font sizes below this (px) draw a readability warning.
pub const MIN_READABLE_FONT_SIZE: f32 = 10.0;

const FONT_WEIGHT_RANGE: RangeInclusive<u16> = 1..=1000;

/// Top-level keys a JSON definition must carry.
const REQUIRED_FIELDS: &[&str] = &["id", "name", "category", "colors", "metadata"];

/// Keys required inside a group whenever the group itself is present.
const REQUIRED_GROUP_FIELDS: &[(&str, &[&str])] = &[
    ("colors", &["primary", "text", "background"]),
    (
        "typography",
        &["fontFamily", "fontSize", "lineHeight", "fontWeight"],
    ),
    ("layout", &["type", "spacing", "borders", "alignment"]),
    ("metadata", &["createdAt", "updatedAt"]),
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl TemplateValidationResult {
    fn failure(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
            warnings: Vec::new(),
        }
    }

    /// Converts a hard failure into [`EngineError::InvalidConfiguration`];
    /// a passing result (warnings included) is handed back unchanged.
    pub fn into_result(self) -> Result<Self, EngineError> {
        if self.is_valid {
            Ok(self)
        } else {
            Err(EngineError::InvalidConfiguration {
                errors: self.errors,
            })
        }
    }
}

/// Validates a typed configuration.
pub fn validate(config: &TemplateConfiguration) -> TemplateValidationResult {
    let errors = structural_errors(config);
    if !errors.is_empty() {
        return TemplateValidationResult::failure(errors);
    }

    TemplateValidationResult {
        is_valid: true,
        errors: Vec::new(),
        warnings: readability_warnings(config),
    }
}

/// Validates untyped input such as a definition file or request body.
///
/// Every missing required key is reported before deserialization is
/// attempted, so a caller sees the whole list at once.
pub fn validate_json(value: &Value) -> TemplateValidationResult {
    let Some(object) = value.as_object() else {
        return TemplateValidationResult::failure(vec![
            "configuration must be a JSON object".to_string()
        ]);
    };

    let mut errors: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !object.contains_key(**field))
        .map(|field| format!("missing required field '{field}'"))
        .collect();

    for (group, fields) in REQUIRED_GROUP_FIELDS {
        match object.get(*group) {
            None => {}
            Some(Value::Object(inner)) => errors.extend(
                fields
                    .iter()
                    .filter(|field| !inner.contains_key(**field))
                    .map(|field| format!("missing required field '{group}.{field}'")),
            ),
            Some(_) => errors.push(format!("field '{group}' must be an object")),
        }
    }

    if !errors.is_empty() {
        return TemplateValidationResult::failure(errors);
    }

    match serde_json::from_value::<TemplateConfiguration>(value.clone()) {
        Ok(config) => validate(&config),
        Err(e) => TemplateValidationResult::failure(vec![format!("invalid configuration: {e}")]),
    }
}

fn structural_errors(config: &TemplateConfiguration) -> Vec<String> {
    let mut errors = Vec::new();

    if config.id.trim().is_empty() {
        errors.push("id is required".to_string());
    } else if config.id.chars().any(char::is_whitespace) {
        errors.push(format!("id '{}' must not contain whitespace", config.id));
    }
    if config.name.trim().is_empty() {
        errors.push("name is required".to_string());
    }
    if config.version == 0 || config.version > SCHEMA_VERSION {
        errors.push(format!(
            "version {} is not supported (expected 1..={SCHEMA_VERSION})",
            config.version
        ));
    }

    check_colors(&config.colors, &mut errors);
    check_typography(&config.typography, &mut errors);
    check_layout(&config.layout, &mut errors);

    if config.sections.is_empty() {
        errors.push("sections must declare at least one section".to_string());
    }

    errors
}

fn check_colors(colors: &ColorScheme, errors: &mut Vec<String>) {
    for (field, value) in [
        ("primary", &colors.primary),
        ("text", &colors.text),
        ("background", &colors.background),
    ] {
        if value.trim().is_empty() {
            errors.push(format!("colors.{field} is required"));
        }
    }

    for (field, value) in [
        ("secondary", &colors.secondary),
        ("accent", &colors.accent),
        ("border", &colors.border),
    ] {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            errors.push(format!("colors.{field} must not be empty when set"));
        }
    }
}

fn check_typography(typography: &Typography, errors: &mut Vec<String>) {
    if typography.font_family == FontFamily::Custom
        && typography
            .custom_font
            .as_deref()
            .is_some_and(|font| font.trim().is_empty())
    {
        errors.push("typography.customFont must not be empty when set".to_string());
    }

    let sizes = &typography.font_size;
    for (field, value) in [
        ("fontSize.base", sizes.base),
        ("fontSize.heading", sizes.heading),
        ("fontSize.small", sizes.small),
        ("lineHeight", typography.line_height),
    ] {
        if !(value.is_finite() && value > 0.0) {
            errors.push(format!(
                "typography.{field} must be a positive number (got {value})"
            ));
        }
    }

    for (field, value) in [
        ("normal", typography.font_weight.normal),
        ("bold", typography.font_weight.bold),
    ] {
        if !FONT_WEIGHT_RANGE.contains(&value) {
            errors.push(format!(
                "typography.fontWeight.{field} must be between {} and {} (got {value})",
                FONT_WEIGHT_RANGE.start(),
                FONT_WEIGHT_RANGE.end()
            ));
        }
    }
}

fn check_layout(layout: &Layout, errors: &mut Vec<String>) {
    let spacing = &layout.spacing;
    for (field, value) in [
        ("spacing.section", spacing.section),
        ("spacing.element", spacing.element),
        ("spacing.margin", spacing.margin),
        ("spacing.padding", spacing.padding),
        ("borders.width", layout.borders.width),
        ("borders.radius", layout.borders.radius),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            errors.push(format!(
                "layout.{field} must be a non-negative number (got {value})"
            ));
        }
    }
}

fn readability_warnings(config: &TemplateConfiguration) -> Vec<String> {
    let mut warnings = Vec::new();

    let colors = &config.colors;
    if colors
        .primary
        .trim()
        .eq_ignore_ascii_case(colors.background.trim())
    {
        warnings.push(
            "Primary color is the same as the background color; primary-colored text will not be readable"
                .to_string(),
        );
    }

    let base = config.typography.font_size.base;
    if base < MIN_READABLE_FONT_SIZE {
        warnings.push(format!(
            "Base font size {base}px may be hard to read (recommended minimum is {MIN_READABLE_FONT_SIZE}px)"
        ));
    }

    warnings
}
