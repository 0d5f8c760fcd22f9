//! Variable Compiler: projects a configuration into flat presentation
//! variables for the rendering layer.
//!
//! Every variable comes from exactly one configuration field or a fixed
//! fallback chain. No validation happens here: callers compile only
//! configurations that already passed the validator.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::templates::model::{FontFamily, TemplateConfiguration, Typography, DEFAULT_BORDER_COLOR};

pub const SERIF_STACK: &str = "Georgia, 'Times New Roman', Times, serif";
pub const SANS_SERIF_STACK: &str = "'Inter', 'Helvetica Neue', Arial, sans-serif";
pub const MONOSPACE_STACK: &str = "'JetBrains Mono', 'Fira Code', Consolas, monospace";
/// Used for `custom` when no raw font string is supplied.
pub const SYSTEM_STACK: &str =
    "system-ui, -apple-system, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif";

/// Flat `--name -> value` map, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CompiledVariables(BTreeMap<String, String>);

impl CompiledVariables {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }

    /// Renders the variables as one CSS rule, e.g. `to_css(":root")`.
    pub fn to_css(&self, selector: &str) -> String {
        let mut css = format!("{selector} {{\n");
        for (name, value) in self.iter() {
            css.push_str(&format!("  {name}: {value};\n"));
        }
        css.push('}');
        css
    }

    fn set(&mut self, name: &str, value: impl Into<String>) {
        self.0.insert(name.to_string(), value.into());
    }
}

pub fn compile(config: &TemplateConfiguration) -> CompiledVariables {
    let mut vars = CompiledVariables::default();

    let colors = &config.colors;
    vars.set("--color-primary", colors.primary.as_str());
    vars.set(
        "--color-secondary",
        colors.secondary.as_deref().unwrap_or(&colors.primary),
    );
    vars.set(
        "--color-accent",
        colors.accent.as_deref().unwrap_or(&colors.primary),
    );
    vars.set("--color-text", colors.text.as_str());
    vars.set("--color-background", colors.background.as_str());
    vars.set(
        "--color-border",
        colors.border.as_deref().unwrap_or(DEFAULT_BORDER_COLOR),
    );

    let typography = &config.typography;
    vars.set("--font-family", resolve_font_family(typography));
    vars.set("--font-size-base", px(typography.font_size.base));
    vars.set("--font-size-heading", px(typography.font_size.heading));
    vars.set("--font-size-small", px(typography.font_size.small));
    vars.set("--line-height", typography.line_height.to_string());
    vars.set("--font-weight-normal", typography.font_weight.normal.to_string());
    vars.set("--font-weight-bold", typography.font_weight.bold.to_string());

    let layout = &config.layout;
    vars.set("--layout-type", layout.kind.as_str());
    vars.set("--spacing-section", px(layout.spacing.section));
    vars.set("--spacing-element", px(layout.spacing.element));
    vars.set("--spacing-margin", px(layout.spacing.margin));
    vars.set("--spacing-padding", px(layout.spacing.padding));
    let border_style = if layout.borders.enabled {
        layout.borders.style.as_str()
    } else {
        "none"
    };
    vars.set("--border-style", border_style);
    vars.set("--border-width", px(layout.borders.width));
    vars.set("--border-radius", px(layout.borders.radius));
    vars.set("--align-header", layout.alignment.header.as_str());
    vars.set("--align-content", layout.alignment.content.as_str());

    vars
}

/// Concrete font stack for the typography's family selector.
pub fn resolve_font_family(typography: &Typography) -> String {
    match typography.font_family {
        FontFamily::Serif => SERIF_STACK.to_string(),
        FontFamily::SansSerif => SANS_SERIF_STACK.to_string(),
        FontFamily::Monospace => MONOSPACE_STACK.to_string(),
        FontFamily::Custom => typography
            .custom_font
            .as_deref()
            .map(str::trim)
            .filter(|font| !font.is_empty())
            .unwrap_or(SYSTEM_STACK)
            .to_string(),
    }
}

fn px(value: f32) -> String {
    format!("{value}px")
}
