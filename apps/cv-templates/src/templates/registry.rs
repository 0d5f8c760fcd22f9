//! Template registry: the in-memory catalog of renderable templates.
//!
//! An explicit value owned by the composition root rather than a global, so
//! every test builds its own isolated catalog. Writes take `&mut self`; hosts
//! that share the registry across threads wrap it in a lock.

use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::errors::EngineError;
use crate::templates::model::{TemplateCategory, TemplateConfiguration};
use crate::templates::recommend::{self, RecommendationProfile};
use crate::templates::validator::{validate, TemplateValidationResult};

/// Opaque handle to whatever actually draws a template.
///
/// The engine stores and clones it but never looks inside; only the
/// rendering layer knows the concrete type and downcasts to it.
#[derive(Clone)]
pub struct RendererHandle(Arc<dyn Any + Send + Sync>);

impl RendererHandle {
    pub fn new<T: Any + Send + Sync>(renderer: T) -> Self {
        Self(Arc::new(renderer))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for RendererHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RendererHandle(..)")
    }
}

/// A registered, renderable template.
///
/// Display fields mirror the owned configuration and are filled in by
/// [`TemplateRegistryEntry::new`].
#[derive(Debug, Clone)]
pub struct TemplateRegistryEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: TemplateCategory,
    pub is_premium: bool,
    pub renderer: RendererHandle,
    pub config: TemplateConfiguration,
    pub thumbnail: Option<String>,
    pub preview: Option<String>,
}

impl TemplateRegistryEntry {
    pub fn new(config: TemplateConfiguration, renderer: RendererHandle) -> Self {
        Self {
            id: config.id.clone(),
            name: config.name.clone(),
            description: config.description.clone(),
            category: config.category,
            is_premium: config.is_premium,
            renderer,
            config,
            thumbnail: None,
            preview: None,
        }
    }

    pub fn with_thumbnail(mut self, path: impl Into<String>) -> Self {
        self.thumbnail = Some(path.into());
        self
    }

    pub fn with_preview(mut self, path: impl Into<String>) -> Self {
        self.preview = Some(path.into());
        self
    }
}

/// Filters for [`TemplateRegistry::list`]. Unset fields do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateFilter {
    pub category: Option<TemplateCategory>,
    pub is_premium: Option<bool>,
    /// Any-of match against `metadata.tags`; empty means no tag filter.
    pub tags: Vec<String>,
}

impl TemplateFilter {
    pub fn by_category(category: TemplateCategory) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn matches(&self, entry: &TemplateRegistryEntry) -> bool {
        if self.category.is_some_and(|category| category != entry.category) {
            return false;
        }
        if self.is_premium.is_some_and(|premium| premium != entry.is_premium) {
            return false;
        }
        self.tags.is_empty()
            || self
                .tags
                .iter()
                .any(|tag| entry.config.metadata.tags.contains(tag))
    }
}

/// A single entry rejected by [`TemplateRegistry::register_all`].
#[derive(Debug)]
pub struct RegistrationFailure {
    pub id: String,
    pub error: EngineError,
}

#[derive(Debug, Default)]
pub struct TemplateRegistry {
    /// Keyed by id; iteration order (id ascending) is the registry order
    /// used by `search` and as the `recommend` tiebreak.
    entries: BTreeMap<String, TemplateRegistryEntry>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores an entry, replacing any entry with the same id.
    ///
    /// Display fields are re-derived from the owned configuration, so edits
    /// made to them after [`TemplateRegistryEntry::new`] never reach the
    /// catalog. Returns the validation result so callers can surface warnings.
    pub fn register(
        &mut self,
        mut entry: TemplateRegistryEntry,
    ) -> Result<TemplateValidationResult, EngineError> {
        if entry.id != entry.config.id {
            return Err(EngineError::EntryMismatch {
                entry_id: entry.id,
                config_id: entry.config.id,
            });
        }

        let result = validate(&entry.config).into_result()?;
        for warning in &result.warnings {
            warn!(template_id = %entry.id, "{warning}");
        }

        entry.name = entry.config.name.clone();
        entry.description = entry.config.description.clone();
        entry.category = entry.config.category;
        entry.is_premium = entry.config.is_premium;

        let id = entry.id.clone();
        let replaced = self.entries.insert(id.clone(), entry).is_some();
        info!(template_id = %id, replaced, "Template registered");
        Ok(result)
    }

    /// Registers each entry independently; one bad template never blocks
    /// the rest.
    pub fn register_all(
        &mut self,
        entries: impl IntoIterator<Item = TemplateRegistryEntry>,
    ) -> Vec<RegistrationFailure> {
        let mut failures = Vec::new();
        for entry in entries {
            let id = entry.id.clone();
            if let Err(error) = self.register(entry) {
                warn!(template_id = %id, "Template registration failed: {error}");
                failures.push(RegistrationFailure { id, error });
            }
        }
        failures
    }

    pub fn get(&self, id: &str) -> Option<&TemplateRegistryEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<TemplateRegistryEntry> {
        self.entries.remove(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in registry order.
    pub fn entries(&self) -> impl Iterator<Item = &TemplateRegistryEntry> {
        self.entries.values()
    }

    /// Entries passing `filter`, sorted by display name (byte order, ties by id).
    pub fn list(&self, filter: &TemplateFilter) -> Vec<&TemplateRegistryEntry> {
        let mut matches: Vec<&TemplateRegistryEntry> =
            self.entries().filter(|entry| filter.matches(entry)).collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        matches
    }

    pub fn categories(&self) -> BTreeSet<TemplateCategory> {
        self.entries().map(|entry| entry.category).collect()
    }

    /// Case-insensitive substring search; see [`recommend::search`].
    pub fn search(&self, query: &str) -> Vec<&TemplateRegistryEntry> {
        recommend::search(self.entries(), query)
    }

    /// Profile-based recommendation; see [`recommend::recommend`].
    pub fn recommend(&self, profile: &RecommendationProfile) -> Vec<&TemplateRegistryEntry> {
        recommend::recommend(self.entries(), profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, name: &str, category: TemplateCategory) -> TemplateRegistryEntry {
        let mut config = TemplateConfiguration::new(id, name, category);
        config.metadata.tags = vec![id.to_string()];
        TemplateRegistryEntry::new(config, RendererHandle::new(id.to_string()))
    }

    #[test]
    fn test_register_and_get_round_trip() {
        let mut registry = TemplateRegistry::new();
        let modern = entry("modern", "Modern", TemplateCategory::Professional);
        let expected = modern.config.clone();

        registry.register(modern).expect("Should register");
        assert_eq!(registry.get("modern").unwrap().config, expected);
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_reregistration_replaces() {
        let mut registry = TemplateRegistry::new();
        registry
            .register(entry("modern", "Modern", TemplateCategory::Professional))
            .unwrap();
        let second = entry("modern", "Modern v2", TemplateCategory::Modern);
        let expected = second.config.clone();
        registry.register(second).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("modern").unwrap().config, expected);
        assert_eq!(registry.get("modern").unwrap().name, "Modern v2");
    }

    #[test]
    fn test_invalid_entry_rejected_without_touching_registry() {
        let mut registry = TemplateRegistry::new();
        let mut bad = entry("bad", "Bad", TemplateCategory::Creative);
        bad.config.colors.primary = String::new();
        bad.config.typography.font_size.base = 0.0;

        let err = registry.register(bad).unwrap_err();
        match err {
            EngineError::InvalidConfiguration { errors } => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_all_isolates_failures() {
        let mut registry = TemplateRegistry::new();
        let mut bad = entry("bad", "Bad", TemplateCategory::Creative);
        bad.config.name = String::new();

        let failures = registry.register_all(vec![
            entry("a", "A", TemplateCategory::Modern),
            bad,
            entry("b", "B", TemplateCategory::Modern),
        ]);

        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].id, "bad");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_mismatched_entry_id_rejected() {
        let mut registry = TemplateRegistry::new();
        let mut e = entry("modern", "Modern", TemplateCategory::Professional);
        e.id = "other".into();
        assert!(matches!(
            registry.register(e),
            Err(EngineError::EntryMismatch { .. })
        ));
    }

    #[test]
    fn test_display_fields_follow_config() {
        let mut registry = TemplateRegistry::new();
        let mut e = entry("lux", "Lux", TemplateCategory::Executive);
        e.name = "Stale".into();
        e.category = TemplateCategory::Academic;
        e.is_premium = true;
        registry.register(e).unwrap();

        let stored = registry.get("lux").unwrap();
        assert_eq!(stored.name, "Lux");
        assert_eq!(stored.category, stored.config.category);
        assert_eq!(stored.is_premium, stored.config.is_premium);
        assert!(!stored.is_premium);

        assert!(registry
            .list(&TemplateFilter::by_category(TemplateCategory::Academic))
            .is_empty());
        assert_eq!(
            registry.categories().into_iter().collect::<Vec<_>>(),
            vec![TemplateCategory::Executive]
        );
    }

    #[test]
    fn test_register_returns_warnings() {
        let mut registry = TemplateRegistry::new();
        let mut e = entry("pale", "Pale", TemplateCategory::Minimal);
        e.config.colors.primary = "#ffffff".into();
        let result = registry.register(e).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert!(registry.contains("pale"));
    }

    #[test]
    fn test_list_sorted_by_name_and_filtered() {
        let mut registry = TemplateRegistry::new();
        registry.register_all(vec![
            entry("z", "Alpha", TemplateCategory::Academic),
            entry("a", "Zulu", TemplateCategory::Academic),
            entry("m", "Mike", TemplateCategory::Creative),
        ]);

        let names: Vec<&str> = registry
            .list(&TemplateFilter::default())
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha", "Mike", "Zulu"]);

        let academic = registry.list(&TemplateFilter::by_category(TemplateCategory::Academic));
        assert!(academic
            .iter()
            .all(|e| e.category == TemplateCategory::Academic));
        assert_eq!(academic.len(), 2);
    }

    #[test]
    fn test_list_premium_and_tag_filters() {
        let mut registry = TemplateRegistry::new();
        let mut premium = entry("lux", "Lux", TemplateCategory::Executive);
        premium.config.is_premium = true;
        registry.register_all(vec![premium, entry("plain", "Plain", TemplateCategory::Minimal)]);

        let filter = TemplateFilter {
            is_premium: Some(true),
            ..TemplateFilter::default()
        };
        let ids: Vec<&str> = registry.list(&filter).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["lux"]);

        let filter = TemplateFilter {
            tags: vec!["nope".into(), "plain".into()],
            ..TemplateFilter::default()
        };
        let ids: Vec<&str> = registry.list(&filter).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["plain"]);
    }

    #[test]
    fn test_categories_are_distinct() {
        let mut registry = TemplateRegistry::new();
        registry.register_all(vec![
            entry("a", "A", TemplateCategory::Modern),
            entry("b", "B", TemplateCategory::Modern),
            entry("c", "C", TemplateCategory::Academic),
        ]);
        let categories: Vec<TemplateCategory> = registry.categories().into_iter().collect();
        assert_eq!(
            categories,
            vec![TemplateCategory::Modern, TemplateCategory::Academic]
        );
    }

    #[test]
    fn test_remove_entry() {
        let mut registry = TemplateRegistry::new();
        registry
            .register(entry("a", "A", TemplateCategory::Modern))
            .unwrap();
        assert!(registry.remove("a").is_some());
        assert!(registry.remove("a").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_renderer_handle_is_opaque_but_downcastable() {
        let handle = RendererHandle::new("ModernTemplate");
        assert_eq!(handle.downcast_ref::<&str>(), Some(&"ModernTemplate"));
        assert!(handle.downcast_ref::<String>().is_none());
        assert_eq!(format!("{handle:?}"), "RendererHandle(..)");
    }
}
