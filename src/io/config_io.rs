use std::fs;
use std::path::{Path, PathBuf};

use crate::io::dataset::CONFIG_TEMPLATE;
use crate::io::recovery::atomic_write;
use crate::model::config::FolioConfig;

/// Error type for configuration I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse folio.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not edit folio.toml: {0}")]
    EditError(#[from] toml_edit::TomlError),
    #[error("invalid config key '{0}': expected <section>.<name>")]
    InvalidKey(String),
    #[error("{path} already exists (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },
}

/// Resolve the data directory: explicit override, then `FOLIO_DIR`, then
/// `$XDG_DATA_HOME/folio`, then `$HOME/.local/share/folio`.
pub fn data_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    if let Some(dir) = std::env::var_os("FOLIO_DIR").filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }
    let data_home = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local").join("share"));
    data_home.join("folio")
}

fn home_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("folio.toml")
}

pub fn store_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("store")
}

/// Read folio.toml. A missing file yields the defaults.
pub fn read_config(data_dir: &Path) -> Result<FolioConfig, ConfigError> {
    let path = config_path(data_dir);
    let text = match fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(FolioConfig::default()),
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };
    Ok(toml::from_str(&text)?)
}

/// Write the commented config template. Refuses to overwrite unless `force`.
pub fn write_template(data_dir: &Path, force: bool) -> Result<PathBuf, ConfigError> {
    let path = config_path(data_dir);
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists { path });
    }
    fs::create_dir_all(data_dir).map_err(|e| ConfigError::WriteError {
        path: data_dir.to_path_buf(),
        source: e,
    })?;
    atomic_write(&path, CONFIG_TEMPLATE.as_bytes()).map_err(|e| ConfigError::WriteError {
        path: path.clone(),
        source: e,
    })?;
    Ok(path)
}

/// Set `section.name = value` in a config document, preserving comments.
/// Integers and booleans are written as such; everything else as a string.
pub fn set_value(doc: &mut toml_edit::DocumentMut, key: &str, value: &str) -> Result<(), ConfigError> {
    let (section, name) = key
        .split_once('.')
        .filter(|(s, n)| !s.is_empty() && !n.is_empty() && !n.contains('.'))
        .ok_or_else(|| ConfigError::InvalidKey(key.to_string()))?;

    if !doc.contains_key(section) {
        doc[section] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    if !doc[section].is_table_like() {
        return Err(ConfigError::InvalidKey(key.to_string()));
    }
    let item = if let Ok(n) = value.parse::<i64>() {
        toml_edit::value(n)
    } else if let Ok(b) = value.parse::<bool>() {
        toml_edit::value(b)
    } else {
        toml_edit::value(value)
    };
    doc[section][name] = item;
    Ok(())
}

/// Apply `set_value` to folio.toml on disk, validating the result before
/// writing it back.
pub fn update_config_file(data_dir: &Path, key: &str, value: &str) -> Result<FolioConfig, ConfigError> {
    let path = config_path(data_dir);
    let text = match fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };
    let mut doc: toml_edit::DocumentMut = text.parse()?;
    set_value(&mut doc, key, value)?;
    let updated = doc.to_string();
    let config: FolioConfig = toml::from_str(&updated)?;

    fs::create_dir_all(data_dir).map_err(|e| ConfigError::WriteError {
        path: data_dir.to_path_buf(),
        source: e,
    })?;
    atomic_write(&path, updated.as_bytes()).map_err(|e| ConfigError::WriteError {
        path: path.clone(),
        source: e,
    })?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::StartupSource;
    use tempfile::TempDir;

    #[test]
    fn missing_config_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.startup.source, StartupSource::Persisted);
    }

    #[test]
    fn template_round_trip_and_force() {
        let tmp = TempDir::new().unwrap();
        write_template(tmp.path(), false).unwrap();
        assert!(matches!(
            write_template(tmp.path(), false),
            Err(ConfigError::AlreadyExists { .. })
        ));
        write_template(tmp.path(), true).unwrap();
        let written = fs::read_to_string(config_path(tmp.path())).unwrap();
        assert_eq!(written, CONFIG_TEMPLATE);
    }

    #[test]
    fn set_value_preserves_comments() {
        let mut doc: toml_edit::DocumentMut = CONFIG_TEMPLATE.parse().unwrap();
        set_value(&mut doc, "startup.source", "bundled").unwrap();
        set_value(&mut doc, "upload.max_bytes", "1024").unwrap();
        let out = doc.to_string();
        assert!(out.contains("source = \"bundled\""));
        assert!(out.contains("max_bytes = 1024"));
        assert!(out.contains("# folio configuration"));
    }

    #[test]
    fn set_value_rejects_bad_keys() {
        let mut doc = toml_edit::DocumentMut::new();
        assert!(set_value(&mut doc, "nosection", "x").is_err());
        assert!(set_value(&mut doc, "a.b.c", "x").is_err());
    }

    #[test]
    fn set_value_under_scalar_is_an_error() {
        let mut doc: toml_edit::DocumentMut = "images = 5\n".parse().unwrap();
        assert!(matches!(
            set_value(&mut doc, "images.max_retries", "3"),
            Err(ConfigError::InvalidKey(_))
        ));
        assert_eq!(doc.to_string(), "images = 5\n");

        let mut doc: toml_edit::DocumentMut = "images = { max_retries = 1 }\n".parse().unwrap();
        set_value(&mut doc, "images.max_retries", "3").unwrap();
        assert_eq!(doc["images"]["max_retries"].as_integer(), Some(3));
    }

    #[test]
    fn update_config_file_validates() {
        let tmp = TempDir::new().unwrap();
        let config = update_config_file(tmp.path(), "images.base_url", "").unwrap();
        assert_eq!(config.images.base_url, "");
        assert!(read_config(tmp.path()).unwrap().images.base_url.is_empty());

        // Invalid enum value never reaches disk
        assert!(update_config_file(tmp.path(), "startup.source", "cloud").is_err());
        assert_eq!(
            read_config(tmp.path()).unwrap().startup.source,
            StartupSource::Persisted
        );
    }

    #[test]
    fn data_dir_override_wins() {
        let dir = data_dir(Some(Path::new("/tmp/folio-here")));
        assert_eq!(dir, PathBuf::from("/tmp/folio-here"));
    }
}
