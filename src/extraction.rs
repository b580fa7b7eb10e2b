//! Extraction pipeline.
//!
//! An [`Extraction`] walks a registry once and keeps the raw endpoints, from
//! which both views are derived on demand:
//!
//! - [`Extraction::routes`] — grouped by path, for the sitemap
//! - [`Extraction::operations`] — one per (path, verb), for the OpenAPI document
//!
//! # Example
//!
//! ```
//! use route_sitemap::config::Config;
//! use route_sitemap::extraction::Extraction;
//! use route_sitemap::registry::{Handler, Registry};
//!
//! let registry = Registry::new()
//!     .get("/admin", [Handler::opaque("a")])
//!     .post("/admin", [Handler::opaque("b")])
//!     .get("/duplicate/:id", [Handler::opaque("c")]);
//!
//! let routes = Extraction::new(&registry, Config::default()).routes();
//! assert_eq!(routes[0].method, "get post");
//! assert_eq!(routes[1].path, "/duplicate/{id}");
//! ```

use crate::aggregator;
use crate::config::Config;
use crate::endpoint::Endpoint;
use crate::inference;
use crate::openapi_builder::{OpenApiBuilder, OpenApiDocument};
use crate::registry::Registry;
use crate::swagger::SwaggerProjector;
use crate::walker;
use log::info;

/// The raw endpoints of one registry walk.
#[derive(Debug, Clone)]
pub struct Extraction {
    raw: Vec<Endpoint>,
    config: Config,
}

impl Extraction {
    /// Walk `registry` from the root.
    pub fn new(registry: &Registry, config: Config) -> Self {
        let raw = walker::walk("", &registry.layers);
        info!("Extracted {} raw endpoints", raw.len());
        Self { raw, config }
    }

    /// Endpoints exactly as walked, before normalization and grouping
    pub fn raw(&self) -> &[Endpoint] {
        &self.raw
    }

    /// One enriched endpoint per path, verbs space-joined.
    pub fn routes(&self) -> Vec<Endpoint> {
        inference::infer(aggregator::aggregate(&self.raw, &self.config), &self.config)
    }

    /// [`Self::routes`] with documentation locators for `tag`.
    pub fn linked_routes(&self, tag: &str) -> Vec<Endpoint> {
        self.projector(tag).project(self.routes())
    }

    /// One enriched endpoint per (path, verb), with documentation locators for `tag`.
    pub fn operations(&self, tag: &str) -> Vec<Endpoint> {
        let expanded = aggregator::expand_methods(&self.raw, &self.config);
        self.projector(tag)
            .project(inference::infer(expanded, &self.config))
    }

    /// The OpenAPI document for this registry, with every operation under `tag`.
    pub fn openapi(&self, tag: &str) -> OpenApiDocument {
        self.document(OpenApiBuilder::new(tag))
    }

    /// Fill `builder` with this registry's operations, tagged with the builder's tag.
    pub fn document(&self, mut builder: OpenApiBuilder) -> OpenApiDocument {
        let operations = self.operations(builder.tag());
        for operation in &operations {
            builder.add_endpoint(operation);
        }
        builder.build()
    }

    fn projector(&self, tag: &str) -> SwaggerProjector {
        SwaggerProjector::new(self.config.docs_root.clone(), tag)
    }
}

/// Walk, group and enrich `registry` in one call.
pub fn parse_routes(registry: &Registry, config: &Config) -> Vec<Endpoint> {
    Extraction::new(registry, config.clone()).routes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Handler;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_routes_end_to_end() {
        let registry = Registry::new()
            .get("/admin", [Handler::opaque("adminGet")])
            .post("/admin", [Handler::opaque("adminPost")])
            .get("/duplicate/:id", [Handler::opaque("byId")]);

        let routes = parse_routes(&registry, &Config::default());
        let summary: Vec<_> = routes
            .iter()
            .map(|e| (e.method.as_str(), e.path.as_str(), e.route_params.clone()))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("get post", "/admin", Vec::<String>::new()),
                ("get", "/duplicate/{id}", vec!["id".to_string()]),
            ]
        );
    }

    #[test]
    fn test_both_views_from_one_walk() {
        let registry = Registry::new()
            .get("/admin", [])
            .post("/admin", [])
            .put("/noo", []);
        let extraction = Extraction::new(&registry, Config::default());

        assert_eq!(extraction.raw().len(), 3);
        assert_eq!(extraction.routes().len(), 2);
        assert_eq!(extraction.operations("vinyl").len(), 3);
    }

    #[test]
    fn test_operations_carry_locators() {
        let registry = Registry::new().get("/duplicate/:id", []);
        let operations = Extraction::new(&registry, Config::default()).operations("vinyl");
        assert_eq!(
            operations[0].swagger_path.as_deref(),
            Some("/api-docs/#/vinyl/get_duplicate__id_")
        );
    }

    #[test]
    fn test_operations_keep_divergent_params_per_method() {
        let registry = Registry::new()
            .get("/search", [Handler::new("find", "(req, res) => res.send(req.query.q)")])
            .post("/search", [Handler::new("save", "(req, res) => res.send(req.body.q)")]);

        let operations = Extraction::new(&registry, Config::default()).operations("t");
        assert_eq!(operations[0].query_params, vec!["q"]);
        assert!(operations[0].body_params.is_empty());
        assert_eq!(operations[1].body_params, vec!["q"]);
        assert!(operations[1].query_params.is_empty());
    }

    #[test]
    fn test_document_uses_builder_info_and_tag() {
        let registry = Registry::new().get("/admin", [Handler::opaque("adminGet")]);
        let builder = OpenApiBuilder::new("shop").with_info("Shop".to_string(), "3.0.1".to_string(), None);

        let doc = Extraction::new(&registry, Config::default()).document(builder);
        assert_eq!(doc.info.title, "Shop");
        assert_eq!(doc.info.version, "3.0.1");
        assert_eq!(doc.tags(), vec!["shop"]);
    }
}
