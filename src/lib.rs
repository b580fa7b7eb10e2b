//! Route Sitemap - endpoint documentation from a web application's route registry.
//!
//! This library walks a nested route registry, reconstructs every endpoint's
//! full path, groups verbs per path and infers which route, query and body
//! parameters each endpoint reads. The resulting model feeds an HTML sitemap
//! and an OpenAPI 3.0 document.
//!
//! # Architecture
//!
//! 1. [`registry`] - Route registry model and builder (routes, mounts, middleware)
//! 2. [`loader`] - Loads registry snapshots from JSON or YAML
//! 3. [`decoder`] - Turns mount pattern tokens back into path segments
//! 4. [`walker`] - Flattens the registry into raw endpoints
//! 5. [`aggregator`] - Normalizes paths and groups endpoints per path or per verb
//! 6. [`inference`] - Infers route, query and body parameters
//! 7. [`swagger`] - Computes documentation-UI locators
//! 8. [`sitemap`] / [`openapi_builder`] - Assemble the HTML and OpenAPI outputs
//! 9. [`installer`] - Installs the documentation into a registry exactly once
//!
//! [`extraction`] ties steps 3 to 8 together.
//!
//! # Example Usage
//!
//! ```
//! use route_sitemap::{
//!     config::Config,
//!     extraction::Extraction,
//!     registry::{Handler, Registry},
//!     serializer::serialize_json,
//! };
//!
//! let api = Registry::new()
//!     .get("/bar", [Handler::new("bar", "function (req, res) { res.send(req.query.master) }")]);
//! let app = Registry::new()
//!     .mount("/api", api)
//!     .put("/duplicate/:id/group/:nick", [Handler::opaque("group")]);
//!
//! let extraction = Extraction::new(&app, Config::default());
//!
//! let routes = extraction.routes();
//! assert_eq!(routes[0].path, "/api/bar");
//! assert_eq!(routes[0].query_params, vec!["master"]);
//! assert_eq!(routes[1].route_params, vec!["id", "nick"]);
//!
//! let json = serialize_json(&extraction.openapi("vinyl")).unwrap();
//! assert!(json.contains("/duplicate/{id}/group/{nick}"));
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod cli;
pub mod config;
pub mod registry;
pub mod loader;
pub mod decoder;
pub mod endpoint;
pub mod walker;
pub mod aggregator;
pub mod inference;
pub mod swagger;
pub mod extraction;
pub mod openapi_builder;
pub mod sitemap;
pub mod installer;
pub mod serializer;
pub mod error;
