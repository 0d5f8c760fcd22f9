// Template Configuration Engine.
// Registry, validation, customization, variable compilation and
// recommendation over declarative CV templates.

pub mod builtin;
pub mod compiler;
pub mod customization;
pub mod customizer;
pub mod loader;
pub mod model;
pub mod recommend;
pub mod registry;
pub mod store;
pub mod validator;

// Re-export the public API consumed by the binary and host applications.
pub use compiler::{compile, CompiledVariables};
pub use customization::TemplateCustomization;
pub use customizer::{clone_template, customize};
pub use model::{SectionKind, TemplateCategory, TemplateConfiguration};
pub use recommend::{ExperienceLevel, RecommendationProfile};
pub use registry::{RendererHandle, TemplateFilter, TemplateRegistry, TemplateRegistryEntry};
pub use validator::{validate, validate_json, TemplateValidationResult};
