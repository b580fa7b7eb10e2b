//! Documentation-fragment locators.
//!
//! The documentation UI deep-links an operation as `#/<tag>/<method>_<path>`
//! with braces and slashes flattened to underscores, e.g.
//! `get /duplicate/{id}` under tag `vinyl` becomes
//! `/api-docs/#/vinyl/get_duplicate__id_`.

use crate::endpoint::Endpoint;

/// Computes locators for endpoints under one documentation root and tag.
#[derive(Debug, Clone)]
pub struct SwaggerProjector {
    docs_root: String,
    tag: String,
}

impl SwaggerProjector {
    pub fn new(docs_root: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            docs_root: docs_root.into(),
            tag: tag.into(),
        }
    }

    /// Locator for a single (method, path) pair.
    pub fn locator(&self, method: &str, path: &str, route_params: &[String]) -> String {
        locator(&self.docs_root, &self.tag, method, path, route_params)
    }

    /// Set `swagger_path` on every endpoint.
    ///
    /// Aggregated endpoints link to the fragment of their first verb.
    pub fn project(&self, endpoints: Vec<Endpoint>) -> Vec<Endpoint> {
        endpoints
            .into_iter()
            .map(|endpoint| {
                let method = endpoint.methods().next().unwrap_or_default().to_string();
                let swagger_path = self.locator(&method, &endpoint.path, &endpoint.route_params);
                Endpoint {
                    swagger_path: Some(swagger_path),
                    ..endpoint
                }
            })
            .collect()
    }
}

/// Build a locator from `(tag, method, path, route_params)` alone.
pub fn locator(docs_root: &str, tag: &str, method: &str, path: &str, route_params: &[String]) -> String {
    let mut fragment = format!("{}{}", method, path);
    for name in route_params {
        fragment = fragment.replace(&format!("{{{}}}", name), &format!("_{}_", name));
    }
    let fragment = fragment.replace('/', "_");

    format!("{}/#/{}/{}", docs_root.trim_end_matches('/'), tag, fragment)
}
