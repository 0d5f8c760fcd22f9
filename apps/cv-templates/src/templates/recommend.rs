//! Recommendation and free-text search over registry entries.
//!
//! Both are read-only. `recommend` filters hard on the profile and then
//! orders by score; `search` is a plain substring match with no ranking.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::templates::registry::TemplateRegistryEntry;

pub const INDUSTRY_MATCH_SCORE: u32 = 2;
pub const ROLE_MATCH_SCORE: u32 = 2;
pub const PREFERENCE_MATCH_SCORE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Executive,
}

impl ExperienceLevel {
    /// Template tags that signal suitability for this level.
    pub fn synonym_tags(self) -> &'static [&'static str] {
        match self {
            ExperienceLevel::Entry => &["entry-level", "junior", "graduate"],
            ExperienceLevel::Mid => &["mid-level", "professional", "experienced"],
            ExperienceLevel::Senior => &["senior", "lead", "principal"],
            ExperienceLevel::Executive => &["executive", "director", "leadership"],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecommendationProfile {
    pub industry: Option<String>,
    pub role: Option<String>,
    pub experience: Option<ExperienceLevel>,
    /// Free-text tags the user would like the template to carry.
    pub preferences: Vec<String>,
}

/// Hard filter: every attribute the profile sets must match exactly.
pub fn passes_filters(entry: &TemplateRegistryEntry, profile: &RecommendationProfile) -> bool {
    let metadata = &entry.config.metadata;

    if let Some(industry) = &profile.industry {
        if !metadata.industries.contains(industry) {
            return false;
        }
    }
    if let Some(role) = &profile.role {
        if !metadata.roles.contains(role) {
            return false;
        }
    }
    if let Some(level) = profile.experience {
        let synonyms = level.synonym_tags();
        if !metadata.tags.iter().any(|tag| synonyms.contains(&tag.as_str())) {
            return false;
        }
    }
    true
}

/// Ordering score for an entry that already passed [`passes_filters`].
pub fn score_entry(entry: &TemplateRegistryEntry, profile: &RecommendationProfile) -> u32 {
    let metadata = &entry.config.metadata;
    let mut score = 0;

    if profile
        .industry
        .as_ref()
        .is_some_and(|industry| metadata.industries.contains(industry))
    {
        score += INDUSTRY_MATCH_SCORE;
    }
    if profile
        .role
        .as_ref()
        .is_some_and(|role| metadata.roles.contains(role))
    {
        score += ROLE_MATCH_SCORE;
    }
    // Repeated preferences count once.
    let preference_hits = profile
        .preferences
        .iter()
        .filter(|preference| metadata.tags.contains(preference))
        .collect::<BTreeSet<_>>()
        .len() as u32;

    score + preference_hits * PREFERENCE_MATCH_SCORE
}

/// Filtered entries with their scores, highest first.
///
/// The sort is stable, so equal scores keep the input order (registry order,
/// i.e. id ascending, when fed from a registry).
pub fn recommend_scored<'a>(
    entries: impl IntoIterator<Item = &'a TemplateRegistryEntry>,
    profile: &RecommendationProfile,
) -> Vec<(&'a TemplateRegistryEntry, u32)> {
    let mut scored: Vec<(&TemplateRegistryEntry, u32)> = entries
        .into_iter()
        .filter(|entry| passes_filters(entry, profile))
        .map(|entry| (entry, score_entry(entry, profile)))
        .collect();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored
}

pub fn recommend<'a>(
    entries: impl IntoIterator<Item = &'a TemplateRegistryEntry>,
    profile: &RecommendationProfile,
) -> Vec<&'a TemplateRegistryEntry> {
    recommend_scored(entries, profile)
        .into_iter()
        .map(|(entry, _)| entry)
        .collect()
}

/// Case-insensitive substring match on name, description, tags, industries
/// and roles. Results keep input order; a blank query matches everything.
pub fn search<'a>(
    entries: impl IntoIterator<Item = &'a TemplateRegistryEntry>,
    query: &str,
) -> Vec<&'a TemplateRegistryEntry> {
    let needle = query.trim().to_lowercase();
    entries
        .into_iter()
        .filter(|entry| matches_query(entry, &needle))
        .collect()
}

/// `needle` must already be lowercase.
fn matches_query(entry: &TemplateRegistryEntry, needle: &str) -> bool {
    let metadata = &entry.config.metadata;
    let hit = |text: &str| text.to_lowercase().contains(needle);

    hit(entry.name.as_str())
        || hit(entry.description.as_str())
        || metadata.tags.iter().any(|tag| hit(tag.as_str()))
        || metadata.industries.iter().any(|industry| hit(industry.as_str()))
        || metadata.roles.iter().any(|role| hit(role.as_str()))
}
