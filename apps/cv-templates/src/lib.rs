//! CV template configuration engine.
//!
//! A catalog of declarative, versioned CV templates that can be validated,
//! customized per user, compiled into presentation variables, searched and
//! recommended.
//!
//! ```rust
//! use cv_templates::templates::{builtin, compile, TemplateRegistry};
//!
//! let mut registry = TemplateRegistry::new();
//! builtin::register_builtins(&mut registry);
//!
//! let modern = registry.get("modern").unwrap();
//! let vars = compile(&modern.config);
//! assert_eq!(vars.get("--color-primary"), Some("#2563eb"));
//! ```

pub mod config;
pub mod errors;
pub mod templates;

pub use errors::EngineError;
