//! `ppc.toml` project configuration.
//!
//! Entirely optional: a build with no config file anywhere in the search
//! path just runs with [`Config::default()`]. CLI flags always win over
//! whatever a config file says — see `compile`'s merge of the two.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Default configuration file name, searched for starting in the current
/// directory.
pub const CONFIG_FILE_NAME: &str = "ppc.toml";

/// Project-wide compiler configuration, loaded from an optional `ppc.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    /// Directory generated output (`.ppprw`, `.asm`, the executable) is
    /// written into, relative to the source file's own directory. `None`
    /// keeps output next to the source, matching spec.md §6's default.
    #[serde(default)]
    pub output_dir: Option<String>,

    /// Overrides the `nasm` binary invoked at link time.
    #[serde(default)]
    pub nasm: Option<String>,

    /// Overrides the `ld` binary invoked at link time.
    #[serde(default)]
    pub ld: Option<String>,

    /// Keep the `.ppprw`/`.asm` intermediates after a successful build.
    #[serde(default)]
    pub keep_temps: bool,
}

impl Config {
    /// Loads configuration from the first `ppc.toml` found searching the
    /// current directory, then the user's config directory. Returns the
    /// default configuration if none is found anywhere.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("nie można odczytać pliku konfiguracyjnego '{}'", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("nie można przetworzyć pliku konfiguracyjnego '{}'", path.display()))?;
        Ok(config)
    }

    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    fn check_system_config() -> Option<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("ppc").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config().or_else(Self::check_system_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_keeps_output_next_to_source() {
        let config = Config::default();
        assert!(config.output_dir.is_none());
        assert!(config.nasm.is_none());
        assert!(config.ld.is_none());
        assert!(!config.keep_temps);
    }

    #[test]
    fn loads_overrides_from_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ppc.toml");
        std::fs::write(
            &path,
            r#"
            output_dir = "build"
            nasm = "/opt/nasm/bin/nasm"
            ld = "/opt/binutils/bin/ld"
            keep_temps = true
            "#,
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.output_dir.as_deref(), Some("build"));
        assert_eq!(config.nasm.as_deref(), Some("/opt/nasm/bin/nasm"));
        assert_eq!(config.ld.as_deref(), Some("/opt/binutils/bin/ld"));
        assert!(config.keep_temps);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = Config::load_from_path(Path::new("/nonexistent/ppc.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ppc.toml");
        std::fs::write(&path, "keep_temps = true\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert!(config.output_dir.is_none());
        assert!(config.keep_temps);
    }
}
