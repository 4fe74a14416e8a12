// Copyright 2024-2026 The Pedersen-RS Authors.
//
// Code is licensed under GPLv3.0 License.

//! Reading and writing wire records in YAML, JSON or XML.
//!
//! The format is chosen by an explicit tag when given, by the file
//! extension otherwise, and by trying every decoder in order as a last
//! resort on reads. Writes default to YAML when nothing selects a format.

pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{Error, Result};

/// Default mode bits of written files.
pub const DEFAULT_FILE_MODE: u32 = 0o400;

/// Serialization format of a persisted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
    Xml,
}

impl FileFormat {
    /// Every supported format, in decoder try-order.
    pub const ALL: [FileFormat; 3] = [FileFormat::Yaml, FileFormat::Json, FileFormat::Xml];

    /// The canonical file extension, without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Yaml => "yaml",
            FileFormat::Json => "json",
            FileFormat::Xml => "xml",
        }
    }

    /// Detects the format from a file extension.
    pub fn from_path(path: &Path) -> Option<FileFormat> {
        let extension = path.extension()?.to_str()?;

        match extension.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Some(FileFormat::Yaml),
            "json" => Some(FileFormat::Json),
            "xml" => Some(FileFormat::Xml),
            _ => None,
        }
    }

    fn marshal<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            FileFormat::Yaml => serde_yaml::to_string(value)
                .map_err(|err| Error::encoding("marshalling yaml", err.to_string())),
            FileFormat::Json => serde_json::to_string_pretty(value)
                .map_err(|err| Error::encoding("marshalling json", err.to_string())),
            FileFormat::Xml => quick_xml::se::to_string(value)
                .map_err(|err| Error::encoding("marshalling xml", err.to_string())),
        }
    }

    fn unmarshal<T: DeserializeOwned>(&self, data: &str) -> Result<T> {
        match self {
            FileFormat::Yaml => serde_yaml::from_str(data)
                .map_err(|err| Error::encoding("unmarshalling yaml", err.to_string())),
            FileFormat::Json => serde_json::from_str(data)
                .map_err(|err| Error::encoding("unmarshalling json", err.to_string())),
            FileFormat::Xml => quick_xml::de::from_str(data)
                .map_err(|err| Error::encoding("unmarshalling xml", err.to_string())),
        }
    }
}

impl FromStr for FileFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<FileFormat> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" => Ok(FileFormat::Yaml),
            "json" => Ok(FileFormat::Json),
            "xml" => Ok(FileFormat::Xml),
            other => Err(Error::InvalidOptions(format!(
                "file format must be one of \"yaml\", \"json\", \"xml\", got \"{other}\""
            ))),
        }
    }
}

/// Reads and decodes a record file.
///
/// With neither an explicit format nor a recognized extension, every
/// decoder is tried in [`FileFormat::ALL`] order and the last decode
/// error is reported on failure.
pub fn read_file<T: DeserializeOwned>(path: &Path, format: Option<FileFormat>) -> Result<T> {
    let data = fs::read_to_string(path)
        .map_err(|err| Error::io(format!("reading {}", path.display()), err))?;

    let formats = match format.or_else(|| FileFormat::from_path(path)) {
        Some(format) => vec![format],
        None => FileFormat::ALL.to_vec(),
    };

    let mut last_error = None;

    for format in formats {
        match format.unmarshal(&data) {
            Ok(value) => return Ok(value),
            Err(err) => last_error = Some(err),
        }
    }

    Err(last_error
        .unwrap_or_else(|| Error::encoding(path.display().to_string(), "unknown file format")))
}

/// Encodes and writes a record file with the requested mode bits.
///
/// The format falls back from the explicit tag to the file extension to
/// YAML; when the file name does not already carry the chosen format's
/// extension, the extension is appended. Parent directories are created
/// with owner rwx added to `perm` so the file itself can be placed in
/// them.
pub fn write_file<T: Serialize>(
    path: &Path,
    value: &T,
    format: Option<FileFormat>,
    perm: u32,
) -> Result<()> {
    let format = format
        .or_else(|| FileFormat::from_path(path))
        .unwrap_or(FileFormat::Yaml);

    let path = ensure_extension(path, format);
    let data = format.marshal(value)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent, perm | 0o700)
                .map_err(|err| Error::io(format!("creating {}", parent.display()), err))?;
        }
    }

    fs::write(&path, data).map_err(|err| Error::io(format!("writing {}", path.display()), err))?;

    set_mode(&path, perm).map_err(|err| Error::io(format!("chmod {}", path.display()), err))
}

fn ensure_extension(path: &Path, format: FileFormat) -> PathBuf {
    if FileFormat::from_path(path) == Some(format) {
        return path.to_path_buf();
    }

    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(format.extension());

    PathBuf::from(name)
}

#[cfg(unix)]
fn create_dir_all(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;

    fs::DirBuilder::new().recursive(true).mode(mode).create(path)
}

#[cfg(not(unix))]
fn create_dir_all(path: &Path, _mode: u32) -> std::io::Result<()> {
    fs::create_dir_all(path)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
