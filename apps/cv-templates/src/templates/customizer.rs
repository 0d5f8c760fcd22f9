//! Customizer: derives new configurations from registered templates.
//!
//! Each field group has its own merge function. Present overlay keys
//! override, absent keys inherit. The result is re-validated as a whole and
//! never written back to the registry.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::EngineError;
use crate::templates::customization::{
    AlignmentPatch, BordersPatch, ColorsPatch, FontSizePatch, FontWeightPatch, LayoutPatch,
    MetadataPatch, SectionPatch, SpacingPatch, TemplateCustomization, TypographyPatch,
};
use crate::templates::model::{
    Alignment, Borders, ColorScheme, FontSizes, FontWeights, Layout, SectionConfig, SectionKind,
    Spacing, TemplateConfiguration, TemplateMetadata, Typography, DEFAULT_SECTION_CONFIG,
};
use crate::templates::registry::TemplateRegistry;
use crate::templates::validator::validate;

/// Applies `overlay` to the registered template `template_id`.
///
/// Returns `Ok(None)` when the id is not registered and
/// `Err(EngineError::InvalidConfiguration)` when the merged result fails
/// validation.
pub fn customize(
    registry: &TemplateRegistry,
    template_id: &str,
    overlay: &TemplateCustomization,
) -> Result<Option<TemplateConfiguration>, EngineError> {
    customize_at(registry, template_id, overlay, Utc::now())
}

/// [`customize`] with an explicit `updatedAt` timestamp.
pub fn customize_at(
    registry: &TemplateRegistry,
    template_id: &str,
    overlay: &TemplateCustomization,
    now: DateTime<Utc>,
) -> Result<Option<TemplateConfiguration>, EngineError> {
    let Some(entry) = registry.get(template_id) else {
        debug!(template_id, "Customization requested for unknown template");
        return Ok(None);
    };
    let base = &entry.config;

    let customized = TemplateConfiguration {
        id: derive_id(&base.id, "custom"),
        name: overlay
            .name
            .clone()
            .unwrap_or_else(|| format!("{} (Custom)", base.name)),
        description: pick(overlay.description.as_ref(), &base.description),
        category: overlay.category.unwrap_or(base.category),
        is_premium: overlay.is_premium.unwrap_or(base.is_premium),
        version: base.version,
        colors: merge_colors(&base.colors, overlay.colors.as_ref()),
        typography: merge_typography(&base.typography, overlay.typography.as_ref()),
        layout: merge_layout(&base.layout, overlay.layout.as_ref()),
        sections: merge_sections(&base.sections, &overlay.sections),
        metadata: merge_metadata(&base.metadata, overlay.metadata.as_ref(), now),
    };

    let result = validate(&customized).into_result()?;
    for warning in &result.warnings {
        warn!(template_id, customized_id = %customized.id, "{warning}");
    }
    debug!(template_id, customized_id = %customized.id, "Template customized");

    Ok(Some(customized))
}

/// Copies a registered template under a fresh id.
///
/// The copy is named `new_name`, or `"<name> (Copy)"` when none is given,
/// and both timestamps are reset to now.
pub fn clone_template(
    registry: &TemplateRegistry,
    template_id: &str,
    new_name: Option<&str>,
) -> Option<TemplateConfiguration> {
    clone_template_at(registry, template_id, new_name, Utc::now())
}

pub fn clone_template_at(
    registry: &TemplateRegistry,
    template_id: &str,
    new_name: Option<&str>,
    now: DateTime<Utc>,
) -> Option<TemplateConfiguration> {
    let base = &registry.get(template_id)?.config;

    let mut copy = base.clone();
    copy.id = derive_id(&base.id, "copy");
    copy.name = match new_name {
        Some(name) => name.to_string(),
        None => format!("{} (Copy)", base.name),
    };
    copy.metadata.created_at = now;
    copy.metadata.updated_at = now;
    Some(copy)
}

/// `<base>-<kind>-<uuid>`; the uuid keeps derived ids unique per process.
fn derive_id(base_id: &str, kind: &str) -> String {
    format!("{base_id}-{kind}-{}", Uuid::new_v4().simple())
}

fn pick<T: Clone>(overlay: Option<&T>, base: &T) -> T {
    overlay.unwrap_or(base).clone()
}

// ────────────────────────────────────────────────────────────────────────────
// Field-group merges
// ────────────────────────────────────────────────────────────────────────────

pub fn merge_colors(base: &ColorScheme, patch: Option<&ColorsPatch>) -> ColorScheme {
    let Some(patch) = patch else {
        return base.clone();
    };
    ColorScheme {
        primary: pick(patch.primary.as_ref(), &base.primary),
        secondary: patch.secondary.clone().or_else(|| base.secondary.clone()),
        accent: patch.accent.clone().or_else(|| base.accent.clone()),
        text: pick(patch.text.as_ref(), &base.text),
        background: pick(patch.background.as_ref(), &base.background),
        border: patch.border.clone().or_else(|| base.border.clone()),
    }
}

pub fn merge_typography(base: &Typography, patch: Option<&TypographyPatch>) -> Typography {
    let Some(patch) = patch else {
        return base.clone();
    };
    Typography {
        font_family: patch.font_family.unwrap_or(base.font_family),
        custom_font: patch.custom_font.clone().or_else(|| base.custom_font.clone()),
        font_size: merge_font_sizes(&base.font_size, patch.font_size.as_ref()),
        line_height: patch.line_height.unwrap_or(base.line_height),
        font_weight: merge_font_weights(&base.font_weight, patch.font_weight.as_ref()),
    }
}

fn merge_font_sizes(base: &FontSizes, patch: Option<&FontSizePatch>) -> FontSizes {
    let Some(patch) = patch else {
        return *base;
    };
    FontSizes {
        base: patch.base.unwrap_or(base.base),
        heading: patch.heading.unwrap_or(base.heading),
        small: patch.small.unwrap_or(base.small),
    }
}

fn merge_font_weights(base: &FontWeights, patch: Option<&FontWeightPatch>) -> FontWeights {
    let Some(patch) = patch else {
        return *base;
    };
    FontWeights {
        normal: patch.normal.unwrap_or(base.normal),
        bold: patch.bold.unwrap_or(base.bold),
    }
}

pub fn merge_layout(base: &Layout, patch: Option<&LayoutPatch>) -> Layout {
    let Some(patch) = patch else {
        return base.clone();
    };
    Layout {
        kind: patch.kind.unwrap_or(base.kind),
        spacing: merge_spacing(&base.spacing, patch.spacing.as_ref()),
        borders: merge_borders(&base.borders, patch.borders.as_ref()),
        alignment: merge_alignment(&base.alignment, patch.alignment.as_ref()),
    }
}

fn merge_spacing(base: &Spacing, patch: Option<&SpacingPatch>) -> Spacing {
    let Some(patch) = patch else {
        return *base;
    };
    Spacing {
        section: patch.section.unwrap_or(base.section),
        element: patch.element.unwrap_or(base.element),
        margin: patch.margin.unwrap_or(base.margin),
        padding: patch.padding.unwrap_or(base.padding),
    }
}

fn merge_borders(base: &Borders, patch: Option<&BordersPatch>) -> Borders {
    let Some(patch) = patch else {
        return *base;
    };
    Borders {
        enabled: patch.enabled.unwrap_or(base.enabled),
        style: patch.style.unwrap_or(base.style),
        width: patch.width.unwrap_or(base.width),
        radius: patch.radius.unwrap_or(base.radius),
    }
}

fn merge_alignment(base: &Alignment, patch: Option<&AlignmentPatch>) -> Alignment {
    let Some(patch) = patch else {
        return *base;
    };
    Alignment {
        header: patch.header.unwrap_or(base.header),
        content: patch.content.unwrap_or(base.content),
    }
}

/// Only sections named in the patch are touched. A section the base does not
/// declare starts from [`DEFAULT_SECTION_CONFIG`].
pub fn merge_sections(
    base: &BTreeMap<SectionKind, SectionConfig>,
    patch: &BTreeMap<SectionKind, SectionPatch>,
) -> BTreeMap<SectionKind, SectionConfig> {
    let mut merged = base.clone();
    for (kind, section_patch) in patch {
        let current = merged.get(kind).copied().unwrap_or(DEFAULT_SECTION_CONFIG);
        merged.insert(
            *kind,
            SectionConfig {
                enabled: section_patch.enabled.unwrap_or(current.enabled),
                order: section_patch.order.unwrap_or(current.order),
            },
        );
    }
    merged
}

/// Refreshes `updated_at`; `created_at` is inherited unless overlaid.
pub fn merge_metadata(
    base: &TemplateMetadata,
    patch: Option<&MetadataPatch>,
    now: DateTime<Utc>,
) -> TemplateMetadata {
    let mut merged = base.clone();
    merged.updated_at = now;
    if let Some(patch) = patch {
        if let Some(author) = &patch.author {
            merged.author = author.clone();
        }
        if let Some(created_at) = patch.created_at {
            merged.created_at = created_at;
        }
        if let Some(tags) = &patch.tags {
            merged.tags = tags.clone();
        }
        if let Some(industries) = &patch.industries {
            merged.industries = industries.clone();
        }
        if let Some(roles) = &patch.roles {
            merged.roles = roles.clone();
        }
    }
    merged
}
