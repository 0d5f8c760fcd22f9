//! Stock templates registered at startup.

use crate::templates::model::{
    BorderStyle, FontFamily, LayoutKind, SectionConfig, SectionKind, TemplateCategory,
    TemplateConfiguration, TextAlign,
};
use crate::templates::registry::{
    RegistrationFailure, RendererHandle, TemplateRegistry, TemplateRegistryEntry,
};

/// Renderer handle payload for the stock templates: the name of the
/// front-end component that draws them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentKey(pub &'static str);

const AUTHOR: &str = "CV Builder";

/// Registers every stock template, returning the entries that failed.
pub fn register_builtins(registry: &mut TemplateRegistry) -> Vec<RegistrationFailure> {
    registry.register_all(builtin_entries())
}

pub fn builtin_entries() -> Vec<TemplateRegistryEntry> {
    vec![
        entry(modern(), "ModernTemplate"),
        entry(classic(), "ClassicTemplate"),
        entry(minimal(), "MinimalTemplate"),
        entry(creative(), "CreativeTemplate"),
        entry(executive(), "ExecutiveTemplate"),
        entry(academic(), "AcademicTemplate"),
        entry(technical(), "TechnicalTemplate"),
    ]
}

fn entry(config: TemplateConfiguration, component: &'static str) -> TemplateRegistryEntry {
    let id = config.id.clone();
    TemplateRegistryEntry::new(config, RendererHandle::new(ComponentKey(component)))
        .with_thumbnail(format!("/templates/{id}/thumbnail.png"))
        .with_preview(format!("/templates/{id}/preview.png"))
}

fn base(
    id: &str,
    name: &str,
    description: &str,
    category: TemplateCategory,
    labels: Labels,
) -> TemplateConfiguration {
    let mut config = TemplateConfiguration::new(id, name, category);
    config.description = description.to_string();
    config.metadata.author = AUTHOR.to_string();
    config.metadata.tags = to_strings(labels.tags);
    config.metadata.industries = to_strings(labels.industries);
    config.metadata.roles = to_strings(labels.roles);
    config
}

struct Labels {
    tags: &'static [&'static str],
    industries: &'static [&'static str],
    roles: &'static [&'static str],
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn set_section(config: &mut TemplateConfiguration, kind: SectionKind, enabled: bool, order: u32) {
    config.sections.insert(kind, SectionConfig { enabled, order });
}

fn modern() -> TemplateConfiguration {
    base(
        "modern",
        "Modern",
        "Clean single-column layout with a bold blue accent",
        TemplateCategory::Professional,
        Labels {
            tags: &["modern", "clean", "professional", "mid-level"],
            industries: &["technology", "startups"],
            roles: &["developer", "designer", "product-manager"],
        },
    )
}

fn classic() -> TemplateConfiguration {
    let mut config = base(
        "classic",
        "Classic",
        "Traditional serif layout suited to conservative industries",
        TemplateCategory::Professional,
        Labels {
            tags: &["classic", "traditional", "professional", "senior"],
            industries: &["finance", "law", "consulting"],
            roles: &["analyst", "consultant", "lawyer"],
        },
    );
    config.colors.primary = "#1f2937".into();
    config.colors.accent = Some("#4b5563".into());
    config.typography.font_family = FontFamily::Serif;
    config.layout.alignment.header = TextAlign::Center;
    config.layout.borders.enabled = true;
    config
}

fn minimal() -> TemplateConfiguration {
    let mut config = base(
        "minimal",
        "Minimal",
        "Generous whitespace and a restrained palette",
        TemplateCategory::Minimal,
        Labels {
            tags: &["minimal", "clean", "entry-level", "junior", "graduate"],
            industries: &["technology", "design"],
            roles: &["developer", "designer"],
        },
    );
    config.colors.primary = "#111827".into();
    config.colors.secondary = None;
    config.colors.accent = None;
    config.layout.spacing.section = 32.0;
    config.layout.spacing.margin = 48.0;
    set_section(&mut config, SectionKind::Certifications, false, 6);
    config
}

fn creative() -> TemplateConfiguration {
    let mut config = base(
        "creative",
        "Creative",
        "Sidebar layout with vivid colors for portfolio-driven roles",
        TemplateCategory::Creative,
        Labels {
            tags: &["creative", "colorful", "portfolio", "mid-level"],
            industries: &["design", "marketing", "media"],
            roles: &["designer", "marketer", "writer"],
        },
    );
    config.is_premium = true;
    config.colors.primary = "#7c3aed".into();
    config.colors.secondary = Some("#ec4899".into());
    config.colors.accent = Some("#f59e0b".into());
    config.layout.kind = LayoutKind::Sidebar;
    config.layout.borders.radius = 8.0;
    set_section(&mut config, SectionKind::Projects, true, 2);
    set_section(&mut config, SectionKind::Experience, true, 3);
    config
}

fn executive() -> TemplateConfiguration {
    let mut config = base(
        "executive",
        "Executive",
        "Understated serif design for senior leadership",
        TemplateCategory::Executive,
        Labels {
            tags: &["executive", "director", "leadership", "senior"],
            industries: &["finance", "consulting", "technology"],
            roles: &["executive", "manager", "director"],
        },
    );
    config.is_premium = true;
    config.colors.primary = "#0f172a".into();
    config.colors.accent = Some("#b45309".into());
    config.typography.font_family = FontFamily::Serif;
    config.typography.font_size.heading = 22.0;
    config.layout.borders.enabled = true;
    config.layout.borders.style = BorderStyle::Solid;
    set_section(&mut config, SectionKind::Awards, true, 7);
    config
}

fn academic() -> TemplateConfiguration {
    let mut config = base(
        "academic",
        "Academic",
        "Publication-focused layout for research careers",
        TemplateCategory::Academic,
        Labels {
            tags: &["academic", "research", "publications"],
            industries: &["education", "research"],
            roles: &["researcher", "professor"],
        },
    );
    config.colors.primary = "#7c2d12".into();
    config.typography.font_family = FontFamily::Serif;
    config.layout.alignment.content = TextAlign::Justify;
    set_section(&mut config, SectionKind::Education, true, 2);
    set_section(&mut config, SectionKind::Experience, true, 3);
    set_section(&mut config, SectionKind::Publications, true, 4);
    set_section(&mut config, SectionKind::Awards, true, 8);
    config
}

fn technical() -> TemplateConfiguration {
    let mut config = base(
        "technical",
        "Technical",
        "Two-column layout with a monospace accent for engineering roles",
        TemplateCategory::Technical,
        Labels {
            tags: &["technical", "engineering", "lead", "principal"],
            industries: &["technology", "engineering"],
            roles: &["engineer", "developer", "architect"],
        },
    );
    config.colors.primary = "#059669".into();
    config.typography.font_family = FontFamily::Monospace;
    config.typography.font_size.base = 13.0;
    config.layout.kind = LayoutKind::TwoColumn;
    set_section(&mut config, SectionKind::Skills, true, 2);
    set_section(&mut config, SectionKind::Experience, true, 3);
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::validator::validate;

    #[test]
    fn test_builtins_are_valid_without_warnings() {
        for entry in builtin_entries() {
            let result = validate(&entry.config);
            assert!(result.is_valid, "{}: {:?}", entry.id, result.errors);
            assert!(result.warnings.is_empty(), "{}: {:?}", entry.id, result.warnings);
        }
    }

    #[test]
    fn test_register_builtins() {
        let mut registry = TemplateRegistry::new();
        let failures = register_builtins(&mut registry);
        assert!(failures.is_empty());
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn test_builtins_are_idempotent() {
        let mut registry = TemplateRegistry::new();
        register_builtins(&mut registry);
        register_builtins(&mut registry);
        assert_eq!(registry.len(), 7);
    }

    #[test]
    fn test_renderer_handle_carries_component() {
        let entries = builtin_entries();
        let modern = entries.iter().find(|e| e.id == "modern").unwrap();
        assert_eq!(
            modern.renderer.downcast_ref::<ComponentKey>(),
            Some(&ComponentKey("ModernTemplate"))
        );
        assert_eq!(
            modern.thumbnail.as_deref(),
            Some("/templates/modern/thumbnail.png")
        );
    }

    #[test]
    fn test_academic_puts_publications_before_awards() {
        let order = academic().render_order();
        let publications = order.iter().position(|k| *k == SectionKind::Publications);
        let awards = order.iter().position(|k| *k == SectionKind::Awards);
        assert!(publications < awards);
        assert!(publications.is_some());
    }
}
