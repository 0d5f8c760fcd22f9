use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cv_templates::config::Config;
use cv_templates::templates::builtin::register_builtins;
use cv_templates::templates::loader::load_dir;
use cv_templates::templates::{
    RendererHandle, TemplateFilter, TemplateRegistry, TemplateRegistryEntry,
};

fn main() -> Result<()> {
    // Load configuration first
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV template catalog v{}", env!("CARGO_PKG_VERSION"));

    let mut registry = TemplateRegistry::new();
    let mut failed = register_builtins(&mut registry).len();

    if let Some(dir) = &config.template_dir {
        let definitions = load_dir(dir)
            .with_context(|| format!("Failed to load templates from {}", dir.display()))?;
        let mut entries = Vec::new();
        for definition in definitions {
            match definition.result {
                // File-defined templates are drawn by the generic renderer, keyed by source path.
                Ok(template) => entries.push(TemplateRegistryEntry::new(
                    template,
                    RendererHandle::new(definition.path),
                )),
                Err(e) => {
                    warn!("{e}");
                    failed += 1;
                }
            }
        }
        failed += registry.register_all(entries).len();
    }

    let categories: Vec<&str> = registry.categories().iter().map(|c| c.as_str()).collect();
    info!(
        templates = registry.len(),
        categories = %categories.join(", "),
        "Template catalog ready"
    );
    for entry in registry.list(&TemplateFilter::default()) {
        let sections: Vec<&str> = entry
            .config
            .render_order()
            .iter()
            .map(|kind| kind.as_str())
            .collect();
        info!(
            id = %entry.id,
            name = %entry.name,
            premium = entry.is_premium,
            sections = %sections.join(" > "),
            "Template"
        );
    }

    if failed > 0 {
        warn!("{failed} template(s) were rejected");
        if config.strict_templates {
            bail!("{failed} template(s) were rejected and STRICT_TEMPLATES is set");
        }
    }

    Ok(())
}
