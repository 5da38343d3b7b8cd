//! Content package archive loader
//!
//! A package export is a zip archive holding:
//! - `resources.cnt`: base64 encoded JSON resource index
//! - `contentmetadata.md`: base64 encoded package description
//! - `<id>_content`: one payload per resource; for integration flows and
//!   script collections this is itself a zip archive
//!
//! An archive with neither index file is a bare integration flow export.

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::Path;
use tracing::{debug, warn};
use zip::ZipArchive;

use super::ImportError;
use crate::config::ArchiveSection;
use crate::models::{PackageResource, ResourceIndex};

/// Entry name of the resource index
pub const RESOURCE_INDEX_ENTRY: &str = "resources.cnt";

/// Entry name of the package description
pub const CONTENT_METADATA_ENTRY: &str = "contentmetadata.md";

/// Read every file entry of a zip archive into memory
fn read_zip_entries(bytes: &[u8]) -> Result<BTreeMap<String, Vec<u8>>, ImportError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ImportError::ArchiveError(format!("Failed to open zip archive: {}", e)))?;

    let mut entries = BTreeMap::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(|e| {
            ImportError::ArchiveError(format!("Failed to read zip entry {}: {}", i, e))
        })?;
        if file.is_dir() {
            continue;
        }
        let name = file.name().to_string();
        let mut content = Vec::new();
        file.read_to_end(&mut content).map_err(|e| {
            ImportError::ArchiveError(format!("Failed to read zip entry {}: {}", name, e))
        })?;
        entries.insert(name, content);
    }
    Ok(entries)
}

/// Decode a base64 entry as UTF-8 text
pub fn decode_base64_text(content: &[u8]) -> Result<String, ImportError> {
    let compact: Vec<u8> = content
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    let decoded = STANDARD
        .decode(compact)
        .map_err(|e| ImportError::DecodeError(format!("Invalid base64 content: {}", e)))?;
    Ok(match String::from_utf8(decoded) {
        Ok(text) => text,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    })
}

/// An exported content package held in memory.
#[derive(Debug, Clone)]
pub struct PackageArchive {
    name: String,
    entries: BTreeMap<String, Vec<u8>>,
}

impl PackageArchive {
    /// Load a package from zip bytes
    pub fn from_bytes(name: impl Into<String>, bytes: &[u8]) -> Result<Self, ImportError> {
        let name = name.into();
        let entries = read_zip_entries(bytes)?;
        debug!("Loaded package '{}' with {} entries", name, entries.len());
        Ok(Self { name, entries })
    }

    /// Load a package from a zip file on disk
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read package archive: {}", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_bytes(name, &bytes)
            .with_context(|| format!("Failed to load package archive: {}", path.display()))
    }

    /// File name of the archive
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entry by exact name, or by name within any folder
    pub fn entry(&self, name: &str) -> Option<&[u8]> {
        if let Some(content) = self.entries.get(name) {
            return Some(content);
        }
        let nested = format!("/{}", name);
        self.entries
            .iter()
            .find(|(key, _)| key.ends_with(&nested))
            .map(|(_, content)| content.as_slice())
    }

    /// Whether the archive carries package index files
    pub fn is_content_package(&self) -> bool {
        self.entry(RESOURCE_INDEX_ENTRY).is_some() || self.entry(CONTENT_METADATA_ENTRY).is_some()
    }

    /// Decode the resource index, if the archive has one.
    ///
    /// Entries that cannot be read as a resource are logged and skipped.
    ///
    /// # Errors
    ///
    /// `ImportError::DecodeError` when the entry is not base64 encoded JSON
    /// or the document is not an object with a `resources` list.
    pub fn resource_index(&self) -> Result<Option<ResourceIndex>, ImportError> {
        let Some(raw) = self.entry(RESOURCE_INDEX_ENTRY) else {
            return Ok(None);
        };
        let json = decode_base64_text(raw)?;
        let document: serde_json::Value = serde_json::from_str(&json)
            .map_err(|e| ImportError::DecodeError(format!("Invalid resource index: {}", e)))?;
        let serde_json::Value::Object(mut document) = document else {
            return Err(ImportError::DecodeError(
                "Invalid resource index: expected a JSON object".to_string(),
            ));
        };

        let entries = match document.remove("resources") {
            None | Some(serde_json::Value::Null) => Vec::new(),
            Some(serde_json::Value::Array(entries)) => entries,
            Some(_) => {
                return Err(ImportError::DecodeError(
                    "Invalid resource index: 'resources' is not a list".to_string(),
                ));
            }
        };

        let mut resources = Vec::with_capacity(entries.len());
        for (position, entry) in entries.into_iter().enumerate() {
            match PackageResource::from_index_entry(entry) {
                Ok(resource) => resources.push(resource),
                Err(e) => warn!("Skipping resource #{} of '{}': {}", position, self.name, e),
            }
        }
        Ok(Some(ResourceIndex { resources }))
    }

    /// Decode the package description, if the archive has one
    pub fn content_metadata(&self) -> Result<Option<String>, ImportError> {
        self.entry(CONTENT_METADATA_ENTRY)
            .map(decode_base64_text)
            .transpose()
    }

    /// Locate the artifact files of a bare integration flow archive
    pub fn artifact_files(&self, archive: &ArchiveSection) -> ArtifactFiles {
        ArtifactFiles::from_entries(&self.entries, archive)
    }
}

/// The text files of one integration flow artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactFiles {
    /// Parameter schema document
    pub schema: Option<String>,
    /// Property store
    pub properties: Option<String>,
    /// Process definition
    pub process: Option<String>,
    /// Every file name in the artifact archive
    pub files: Vec<String>,
}

impl ArtifactFiles {
    /// Read an artifact's nested zip payload
    pub fn from_zip_bytes(bytes: &[u8], archive: &ArchiveSection) -> Result<Self, ImportError> {
        let entries = read_zip_entries(bytes)?;
        Ok(Self::from_entries(&entries, archive))
    }

    /// Pick the first entry with each configured suffix
    pub fn from_entries(entries: &BTreeMap<String, Vec<u8>>, archive: &ArchiveSection) -> Self {
        let find = |suffix: &str| {
            entries
                .iter()
                .find(|(name, _)| name.ends_with(suffix))
                .map(|(_, content)| String::from_utf8_lossy(content).into_owned())
        };

        Self {
            schema: find(&archive.schema_suffix),
            properties: find(&archive.property_suffix),
            process: find(&archive.process_suffix),
            files: entries.keys().cloned().collect(),
        }
    }
}

/// File names inside a script collection payload
pub fn list_archive_files(bytes: &[u8]) -> Result<Vec<String>, ImportError> {
    Ok(read_zip_entries(bytes)?.into_keys().collect())
}
