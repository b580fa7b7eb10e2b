//! Endpoint grouping.
//!
//! Two views are built from the same raw walk:
//!
//! - [`aggregate`]: one endpoint per path, verbs space-joined (sitemap form)
//! - [`expand_methods`]: one endpoint per (path, verb) pair (OpenAPI form)
//!
//! Both normalize paths and drop anything under the documentation root.

use crate::config::Config;
use crate::endpoint::Endpoint;
use log::debug;

/// Prepend `/` to a path that lacks one. Idempotent.
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Group raw endpoints by path, in order of first appearance.
///
/// Verbs are concatenated in member order without deduplication, so two routes
/// declaring the same verb on one path show up as e.g. `get get`. Handler
/// chains are concatenated the same way.
pub fn aggregate(raw: &[Endpoint], config: &Config) -> Vec<Endpoint> {
    let mut groups: Vec<Endpoint> = Vec::new();

    for endpoint in visible(raw, config) {
        let path = normalize_path(&endpoint.path);
        match groups.iter_mut().find(|group| group.path == path) {
            Some(group) => {
                group.method.push(' ');
                group.method.push_str(&endpoint.method);
                group.handlers.extend(endpoint.handlers.iter().cloned());
            }
            None => groups.push(Endpoint::new(
                endpoint.method.clone(),
                path,
                endpoint.handlers.clone(),
            )),
        }
    }

    debug!("Aggregated {} raw endpoints into {} paths", raw.len(), groups.len());
    groups
}

/// Split raw endpoints into one entry per (path, verb) pair, in order of first
/// appearance. Repeated pairs share one entry whose handler chain is the
/// concatenation of theirs.
pub fn expand_methods(raw: &[Endpoint], config: &Config) -> Vec<Endpoint> {
    let mut expanded: Vec<Endpoint> = Vec::new();

    for endpoint in visible(raw, config) {
        let path = normalize_path(&endpoint.path);
        for method in endpoint.methods() {
            match expanded
                .iter_mut()
                .find(|e| e.path == path && e.method == method)
            {
                Some(existing) => existing.handlers.extend(endpoint.handlers.iter().cloned()),
                None => expanded.push(Endpoint::new(method, path.clone(), endpoint.handlers.clone())),
            }
        }
    }

    debug!("Expanded {} raw endpoints into {} operations", raw.len(), expanded.len());
    expanded
}

fn visible<'a>(raw: &'a [Endpoint], config: &'a Config) -> impl Iterator<Item = &'a Endpoint> {
    raw.iter().filter(move |endpoint| {
        let hidden = config.is_docs_path(&endpoint.path);
        if hidden {
            debug!("Skipping documentation endpoint {}", endpoint.path);
        }
        !hidden
    })
}
