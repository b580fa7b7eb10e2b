use crate::registry::Handler;
use serde::Serialize;

/// A single documented HTTP endpoint.
///
/// `method` holds one lower-case verb, or several space-joined verbs in the
/// aggregated form produced by [`crate::aggregator::aggregate`]. `path` uses
/// `:name` placeholders until parameter inference rewrites them to `{name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub method: String,
    pub path: String,
    /// Handler chain, scanned for parameter usage but never invoked
    #[serde(skip)]
    pub handlers: Vec<Handler>,
    /// Route parameter names in declaration order
    #[serde(rename = "routeParams")]
    pub route_params: Vec<String>,
    /// Query parameter names in discovery order
    #[serde(rename = "queryParams")]
    pub query_params: Vec<String>,
    /// Body parameter names in discovery order
    #[serde(rename = "bodyParams")]
    pub body_params: Vec<String>,
    /// Locator of this endpoint's fragment in the documentation UI
    #[serde(rename = "swaggerPath", skip_serializing_if = "Option::is_none")]
    pub swagger_path: Option<String>,
}

impl Endpoint {
    /// Create an endpoint with no inferred parameters
    pub fn new(method: impl Into<String>, path: impl Into<String>, handlers: Vec<Handler>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            handlers,
            route_params: Vec::new(),
            query_params: Vec::new(),
            body_params: Vec::new(),
            swagger_path: None,
        }
    }

    /// The individual verbs of this endpoint, in order, repeats included
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.method.split_whitespace()
    }

    /// Whether any body parameter was inferred
    pub fn has_body(&self) -> bool {
        !self.body_params.is_empty()
    }
}

/// Push `name` unless it's already present, keeping first-seen order.
pub(crate) fn push_distinct(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}
