use crate::core::forcefield::error::{LoadError, ParameterError};
use crate::core::forcefield::options::LoadOptions;
use crate::core::forcefield::params::ParameterSet;
use crate::core::io::library::ReaxffLibrary;
use crate::core::io::traits::ParameterFormat;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

fn publish(set: ParameterSet) -> Arc<ParameterSet> {
    info!(
        globals = set.globals().count(),
        tables = set.tables().count(),
        elements = set.elements().len(),
        warnings = set.warnings().len(),
        "Force field parameters loaded."
    );
    Arc::new(set)
}

/// Loads a ReaxFF library file and publishes it for shared, read-only use.
///
/// Either the whole file validates and a complete set is returned, or an
/// error is returned and nothing is published.
#[instrument(skip_all, fields(path = %path.display()), name = "load_force_field")]
pub fn load_force_field(
    path: &Path,
    options: &LoadOptions,
) -> Result<Arc<ParameterSet>, LoadError> {
    info!("Loading ReaxFF parameter library.");
    let set = ReaxffLibrary::new(options.clone()).read_from_path(path)?;
    Ok(publish(set))
}

#[instrument(skip_all, name = "load_force_field_from_str")]
pub fn load_force_field_from_str(
    text: &str,
    options: &LoadOptions,
) -> Result<Arc<ParameterSet>, LoadError> {
    let set = ReaxffLibrary::new(options.clone()).read_from_str(text)?;
    Ok(publish(set))
}

/// Checks a library file and returns every violation without building
/// anything. An empty list means the file loads cleanly with `options`.
#[instrument(skip_all, fields(path = %path.display()), name = "lint_force_field")]
pub fn lint_force_field(
    path: &Path,
    options: &LoadOptions,
) -> Result<Vec<ParameterError>, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    let errors = ReaxffLibrary::new(options.clone()).lint_str(&text);
    info!(errors = errors.len(), "Lint finished.");
    Ok(errors)
}
