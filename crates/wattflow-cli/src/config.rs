//! Configuration file discovery for the CLI.
//!
//! An explicit `--config` path must exist. Without one, the first existing
//! file among the search locations is used, and the built-in defaults apply
//! when none exists.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use wattflow::{WattflowError, config::AppConfig};

/// Configuration file name looked up in every search location.
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Failed to read configuration {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse TOML configuration {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl From<ConfigError> for WattflowError {
    fn from(err: ConfigError) -> Self {
        WattflowError::Config(err.to_string())
    }
}

/// Loads the configuration used for a run.
///
/// `explicit_path` wins when given. Otherwise `wattflow/config.toml` under the
/// working directory is tried, then the platform configuration directory.
///
/// # Errors
///
/// Returns [`WattflowError::Config`] when the explicit file is missing, or
/// when the selected file cannot be read or parsed.
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, WattflowError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return Ok(read_config(path)?);
    }

    match search_paths().into_iter().find(|(_, path)| path.is_file()) {
        Some((origin, path)) => {
            info!(origin, path = path.display().to_string(); "Loading configuration");
            Ok(read_config(&path)?)
        }
        None => {
            debug!("No configuration file found, using default configuration");
            Ok(AppConfig::default())
        }
    }
}

/// Candidate configuration files in priority order, tagged with where they
/// come from.
fn search_paths() -> Vec<(&'static str, PathBuf)> {
    let mut paths = vec![("local", Path::new("wattflow").join(CONFIG_FILE))];
    match ProjectDirs::from("com", "wattflow", "wattflow") {
        Some(dirs) => paths.push(("system", dirs.config_dir().join(CONFIG_FILE))),
        None => debug!("Could not determine platform-specific config directory"),
    }
    paths
}

fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::MissingFile(path.to_path_buf()),
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    toml::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.message().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use wattflow::layout::NodeAlign;

    use super::*;

    #[test]
    fn test_explicit_config_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r##"
[layout]
node_width = 24.0
align = "justify"

[style]
background_color = "white"
link_opacity = 0.6
"##,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.layout().node_width, 24.0);
        assert_eq!(config.layout().align, NodeAlign::Justify);
        assert_eq!(config.layout().node_padding, 20.0);
        assert!(config.style().background_color().unwrap().is_some());
        assert_eq!(config.style().render_style().unwrap().link_opacity(), 0.6);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        assert_eq!(load_config(Some(&path)).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_missing_explicit_config() {
        let dir = tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml"))).unwrap_err();

        assert!(matches!(err, WattflowError::Config(_)));
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_unreadable_config() {
        let dir = tempdir().unwrap();
        let err = read_config(dir.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(matches!(
            WattflowError::from(err),
            WattflowError::Config(message) if message.contains("Failed to read")
        ));
    }

    #[test]
    fn test_search_paths_start_local() {
        let paths = search_paths();
        assert_eq!(paths[0].0, "local");
        assert!(paths.iter().all(|(_, path)| path.ends_with(CONFIG_FILE)));
    }

    #[test]
    fn test_malformed_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[layout]\nalign = \"diagonal\"\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, WattflowError::Config(_)));
    }
}
