//! Extraction settings shared by the pipeline stages.

/// Default path under which the documentation UI is mounted.
pub const DEFAULT_DOCS_ROOT: &str = "/api-docs";

/// Conventional name of a handler's request parameter.
pub const DEFAULT_REQUEST_IDENT: &str = "req";

/// Settings for a single extraction run.
///
/// The documentation root doubles as the reserved segment: any endpoint whose
/// path contains it as whole segments is excluded, so the documentation never describes itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path the documentation UI is served under (e.g. `/api-docs`)
    pub docs_root: String,
    /// Request identifier assumed when a handler's first parameter can't be detected
    pub request_ident: String,
}

impl Config {
    /// Create a config with the given documentation root and default request identifier
    pub fn with_docs_root(docs_root: impl Into<String>) -> Self {
        Self {
            docs_root: docs_root.into(),
            ..Self::default()
        }
    }

    /// The reserved documentation segment, without surrounding slashes.
    pub fn docs_segment(&self) -> &str {
        self.docs_root.trim_matches('/')
    }

    /// Whether `path` points into the documentation UI, i.e. contains the
    /// documentation segment as whole path segments.
    pub fn is_docs_path(&self, path: &str) -> bool {
        let segment = self.docs_segment();
        if segment.is_empty() {
            return false;
        }
        let wanted: Vec<&str> = segment.split('/').collect();
        let parts: Vec<&str> = path.split('/').collect();
        parts.windows(wanted.len()).any(|window| window == wanted.as_slice())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            docs_root: DEFAULT_DOCS_ROOT.to_string(),
            request_ident: DEFAULT_REQUEST_IDENT.to_string(),
        }
    }
}
