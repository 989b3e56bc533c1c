//! Command implementations.

mod extract;
mod info;
mod validate;

use std::path::Path;

use contracts::FeatureBlueprint;
use tracing::info;

use crate::error::{CliError, Result};

pub use extract::run_extract;
pub use info::run_info;
pub use validate::run_validate;

/// Load a blueprint, or the built-in defaults when no path is given
fn load_blueprint(path: Option<&Path>) -> Result<FeatureBlueprint> {
    let Some(path) = path else {
        info!("No configuration file given, using defaults");
        return Ok(FeatureBlueprint::default());
    };

    if !path.exists() {
        return Err(CliError::config_not_found(path));
    }

    info!(config = %path.display(), "Loading configuration");
    Ok(config_loader::ConfigLoader::load_from_path(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_path() {
        let blueprint = load_blueprint(None).unwrap();
        assert!(blueprint.sinks.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = load_blueprint(Some(Path::new("nope/features.toml"))).unwrap_err();
        assert!(matches!(err, CliError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.toml");
        std::fs::write(&path, "[segmentation]\nwindow_duration = 5.0\n").unwrap();

        let blueprint = load_blueprint(Some(&path)).unwrap();
        assert_eq!(blueprint.segmentation.window_duration, 5.0);
    }
}
