pub mod generate;
pub mod play;
pub mod saves;

use std::path::{Path, PathBuf};

use wf_core::TemplateCatalog;
use wf_fiction::{ClassifierConfig, EngineConfig};

/// Load the catalog at `path`, or the bundled one.
///
/// This is the only fatal startup failure.
pub fn load_catalog(path: Option<&Path>) -> Result<TemplateCatalog, String> {
    let catalog = match path {
        Some(path) => TemplateCatalog::load(path),
        None => TemplateCatalog::bundled(),
    }
    .map_err(|e| format!("failed to load templates: {e}"))?;
    let source = path.map_or_else(|| "bundled".to_string(), |p| p.display().to_string());
    tracing::debug!(
        source = %source,
        start = catalog.starting_location(),
        locations = catalog.locations.len(),
        "catalog ready"
    );
    Ok(catalog)
}

/// Engine configuration for a save directory, with the classifier enabled
/// when the environment configures one.
pub fn engine_config(save_dir: PathBuf) -> EngineConfig {
    let config = EngineConfig::default().with_save_dir(save_dir);
    match ClassifierConfig::from_env() {
        Some(classifier) => {
            tracing::info!(endpoint = %classifier.endpoint, "intent classifier enabled");
            config.with_classifier(classifier)
        }
        None => config,
    }
}
