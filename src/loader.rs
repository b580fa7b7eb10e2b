use crate::error::{Error, Result};
use crate::registry::Registry;
use log::debug;
use std::fs;
use std::path::Path;

/// Loader for registry snapshots.
///
/// A snapshot is the serialized form of a [`Registry`], written as JSON or
/// YAML. The format is picked from the file extension.
///
/// # Example
///
/// ```no_run
/// use route_sitemap::loader::SnapshotLoader;
/// use std::path::Path;
///
/// let registry = SnapshotLoader::load_file(Path::new("routes.yaml")).unwrap();
/// println!("Loaded {} top-level layers", registry.layers.len());
/// ```
pub struct SnapshotLoader;

/// Serialization format of a snapshot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    /// Pick the format from a file extension (`json`, `yaml`, `yml`).
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Some(SnapshotFormat::Json),
            Some("yaml") | Some("yml") => Some(SnapshotFormat::Yaml),
            _ => None,
        }
    }
}

impl SnapshotLoader {
    /// Reads and deserializes a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The extension is not a supported snapshot format
    /// - The file cannot be read
    /// - The content does not describe a registry
    pub fn load_file(path: &Path) -> Result<Registry> {
        debug!("Loading registry snapshot: {}", path.display());

        let format = SnapshotFormat::from_path(path)
            .ok_or_else(|| Error::UnsupportedSnapshot(path.to_path_buf()))?;
        let content = fs::read_to_string(path)?;

        let registry = Self::load_str(&content, format).map_err(|e| Error::SnapshotError {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        debug!(
            "Loaded snapshot {} with {} top-level layers",
            path.display(),
            registry.layers.len()
        );
        Ok(registry)
    }

    /// Deserializes snapshot content in the given format.
    pub fn load_str(content: &str, format: SnapshotFormat) -> Result<Registry> {
        let registry = match format {
            SnapshotFormat::Json => serde_json::from_str(content)?,
            // Layers are written as single-key maps (`- route: {...}`), not YAML tags
            SnapshotFormat::Yaml => serde_yaml::with::singleton_map_recursive::deserialize(
                serde_yaml::Deserializer::from_str(content),
            )?,
        };
        Ok(registry)
    }
}
