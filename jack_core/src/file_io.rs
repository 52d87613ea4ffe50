//! # File I/O Module
//!
//! Saves and loads studies and bare configurations:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure study schema compatibility
//! - **Config validation**: Loaded configurations are checked before use
//!
//! ## File Format
//!
//! Studies are saved as `.jack` files containing pretty-printed JSON.
//! Configurations are plain JSON; missing fields take their defaults.
//!
//! ## Example
//!
//! ```rust,no_run
//! use jack_core::config::JackConfig;
//! use jack_core::file_io::{load_study, save_study};
//! use jack_core::study::Study;
//! use std::path::Path;
//!
//! let study = Study::new("Prototype", JackConfig::default());
//! let path = Path::new("prototype.jack");
//!
//! save_study(&study, path).unwrap();
//! let loaded = load_study(path).unwrap();
//! assert_eq!(loaded.meta.title, "Prototype");
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::JackConfig;
use crate::errors::{CalcError, CalcResult};
use crate::study::{Study, SCHEMA_VERSION};

/// Save a study with atomic write semantics.
///
/// The save process:
/// 1. Serialize the study to JSON
/// 2. Write to a temporary file (.tmp)
/// 3. Sync to disk (fsync)
/// 4. Rename .tmp over the target (atomic on most filesystems)
///
/// # Example
///
/// ```rust,no_run
/// use jack_core::file_io::save_study;
/// use jack_core::study::Study;
/// use std::path::Path;
///
/// save_study(&Study::default(), Path::new("study.jack"))?;
/// # Ok::<(), jack_core::errors::CalcError>(())
/// ```
pub fn save_study(study: &Study, path: &Path) -> CalcResult<()> {
    write_json_atomic(study, path)?;
    log::debug!("saved study '{}' to {}", study.meta.title, path.display());
    Ok(())
}

/// Load a study from a file.
///
/// # Returns
///
/// * `Ok(Study)` - Successfully loaded study
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_study(path: &Path) -> CalcResult<Study> {
    let study: Study = read_json(path)?;
    validate_version(&study.meta.version)?;
    Ok(study)
}

/// Save a configuration with atomic write semantics.
pub fn save_config(config: &JackConfig, path: &Path) -> CalcResult<()> {
    write_json_atomic(config, path)
}

/// Load and validate a configuration.
///
/// # Returns
///
/// * `Ok(JackConfig)` - Parsed and validated configuration
/// * `Err(CalcError::InvalidInput)` - A parameter is out of range
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_config(path: &Path) -> CalcResult<JackConfig> {
    let config: JackConfig = read_json(path)?;
    config.validate()?;
    Ok(config)
}

fn temp_path_for(path: &Path) -> PathBuf {
    let extension = path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    path.with_extension(extension)
}

fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = temp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let mut file = File::open(path).map_err(|e| {
        CalcError::file_error("open", path.display().to_string(), e.to_string())
    })?;

    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|e| {
        CalcError::file_error("read", path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .map(|p| p.parse())
        .collect::<Result<_, _>>()
        .map_err(|_| mismatch())?;
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    // Major version must match
    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // Under 0.x, a newer minor version may carry breaking changes
    if current_parts[0] == 0 && file_parts.len() > 1 && current_parts.len() > 1 && file_parts[1] > current_parts[1] {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::JackMaterial;
    use crate::study::STUDY_EXTENSION;
    use std::env::temp_dir;

    fn temp_file(name: &str, extension: &str) -> PathBuf {
        temp_dir().join(format!("jack_test_{}_{}.{}", name, std::process::id(), extension))
    }

    #[test]
    fn test_temp_path_generation() {
        assert_eq!(temp_path_for(Path::new("/a/b/study.jack")), Path::new("/a/b/study.jack.tmp"));
        assert_eq!(temp_path_for(Path::new("/a/b/config")), Path::new("/a/b/config.tmp"));
    }

    #[test]
    fn test_study_save_and_load() {
        let path = temp_file("study_roundtrip", STUDY_EXTENSION);
        let mut config = JackConfig::default();
        config.materials.diagonal = JackMaterial::Al5052H32;
        let study = Study::new("Aluminum jack", config);

        save_study(&study, &path).unwrap();
        let loaded = load_study(&path).unwrap();
        assert_eq!(loaded.meta, study.meta);
        assert_eq!(loaded.config.materials, study.config.materials);
        assert_eq!(loaded.config.load, study.config.load);
        assert!(loaded.result.is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_file("atomic", STUDY_EXTENSION);
        save_study(&Study::default(), &path).unwrap();

        assert!(!temp_path_for(&path).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_newer_study_version_is_rejected() {
        let path = temp_file("version", STUDY_EXTENSION);
        let mut study = Study::default();
        study.meta.version = "1.0.0".to_string();
        save_study(&study, &path).unwrap();

        let err = load_study(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_config_save_and_load() {
        let path = temp_file("config", "json");
        let config = JackConfig::default();
        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.targets, config.targets);
        assert_eq!(loaded.solver.bounds, config.solver.bounds);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_invalid_config_is_rejected_on_load() {
        let path = temp_file("bad_config", "json");
        fs::write(&path, r#"{ "load": { "force_lb": -5.0 } }"#).unwrap();
        assert_eq!(load_config(&path).unwrap_err().error_code(), "INVALID_INPUT");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_malformed_json() {
        let path = temp_file("malformed", "json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(load_config(&path).unwrap_err().error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let err = load_study(&temp_file("does_not_exist", "jack")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.9").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("latest").is_err());
    }
}
