pub use crate::core::forcefield::options::{
    DuplicatePolicy, ErrorPolicy, LoadOptions, LoadOptionsBuilder,
};
use std::path::Path;
use thiserror::Error;

impl LoadOptions {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("TOML parsing error: {0}")]
    Parse(#[source] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn options_are_the_core_loader_types() {
        let options: crate::core::forcefield::options::LoadOptions =
            LoadOptionsBuilder::new().collect_all().build();
        let builder = crate::core::forcefield::builder::TableBuilder::new(options.clone());
        assert_eq!(builder.options(), &options);
    }

    #[test]
    fn toml_uses_kebab_case_keys_and_values() {
        let options = LoadOptions::from_toml_str(
            r#"
            error-policy = "collect-all"
            duplicate-policy = "reject"
            "#,
        )
        .unwrap();
        assert_eq!(options.error_policy, ErrorPolicy::CollectAll);
        assert_eq!(options.duplicate_policy, DuplicatePolicy::Reject);
    }

    #[test]
    fn toml_missing_keys_fall_back_to_defaults() {
        let options = LoadOptions::from_toml_str("duplicate-policy = \"reject\"").unwrap();
        assert_eq!(options.error_policy, ErrorPolicy::FailFast);
        assert_eq!(LoadOptions::from_toml_str("").unwrap(), LoadOptions::default());
    }

    #[test]
    fn toml_string_errors_are_config_errors() {
        assert!(matches!(
            LoadOptions::from_toml_str("strictness = 3"),
            Err(ConfigError::Parse(_))
        ));
        let error = LoadOptions::from_toml_str("error-policy = \"sometimes\"").unwrap_err();
        assert!(matches!(error, ConfigError::Parse(_)));
        assert!(error.to_string().starts_with("TOML parsing error: "));
    }

    #[test]
    fn from_path_reads_options_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("loader.toml");
        fs::write(&path, "error-policy = \"collect-all\"\n").unwrap();
        let options = LoadOptions::from_path(&path).unwrap();
        assert_eq!(options.error_policy, ErrorPolicy::CollectAll);
    }

    #[test]
    fn from_path_reports_io_and_toml_errors_with_path() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            LoadOptions::from_path(&missing),
            Err(ConfigError::Io { .. })
        ));

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "error-policy = [").unwrap();
        match LoadOptions::from_path(&broken) {
            Err(ConfigError::Toml { path, .. }) => assert!(path.ends_with("broken.toml")),
            other => panic!("expected TOML error, got {:?}", other),
        }
    }
}
