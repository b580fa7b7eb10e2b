//! Route registry model.
//!
//! A registry is an ordered sequence of [`Layer`]s, each of which is either a
//! terminal route, a mount delegating to a nested registry, or a bare
//! middleware. The same model is built in-process through the builder methods
//! on [`Registry`] or deserialized from a registry snapshot (see
//! [`crate::loader`]).
//!
//! # Example
//!
//! ```
//! use route_sitemap::registry::{Handler, Registry};
//!
//! let api = Registry::new()
//!     .post("/foo", [Handler::opaque("isAuthenticated"), Handler::opaque("create")])
//!     .get("/bar", [Handler::opaque("list")]);
//!
//! let app = Registry::new()
//!     .mount("/api", api)
//!     .get("/admin", [Handler::opaque("admin")]);
//!
//! assert_eq!(app.layers.len(), 2);
//! ```

use crate::decoder;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque reference to a request handler.
///
/// Handlers are never invoked. Their source text, when available, is scanned
/// for the parameters they read; `source: None` models a handler that cannot
/// be turned back into text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handler {
    /// Handler name, used for logging
    pub name: String,
    /// Serialized source text of the handler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Handler {
    /// Create a handler with known source text
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: Some(source.into()),
        }
    }

    /// Create a handler whose source text is unavailable
    pub fn opaque(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
        }
    }
}

/// The path-matching token a mount or middleware was registered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountToken {
    /// A literal path, used verbatim
    Path(String),
    /// The string form of a compiled prefix pattern (e.g. `/^\/api\/?(?=\/|$)/i`)
    Pattern(String),
}

/// A terminal route: one path, its declared verbs and its handler chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub path: String,
    /// Declared verbs in declaration order, lower-cased
    #[serde(deserialize_with = "lowercase_methods")]
    pub methods: Vec<String>,
    #[serde(default)]
    pub handlers: Vec<Handler>,
}

fn lowercase_methods<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let methods = Vec::<String>::deserialize(deserializer)?;
    Ok(methods.into_iter().map(|m| m.to_lowercase()).collect())
}

/// A nested registry delegated to under a path prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mount {
    pub token: MountToken,
    #[serde(default)]
    pub layers: Vec<Layer>,
}

/// Middleware registered without a nested registry or a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Middleware {
    pub token: MountToken,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<Handler>,
}

/// One node of a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Route(Route),
    Mount(Mount),
    Middleware(Middleware),
}

/// An ordered sequence of layers, in registration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    #[serde(default)]
    pub layers: Vec<Layer>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer
    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Register a route answering every verb in `methods`
    pub fn route<I, M>(mut self, path: &str, methods: M, handlers: I) -> Self
    where
        I: IntoIterator<Item = Handler>,
        M: IntoIterator,
        M::Item: AsRef<str>,
    {
        self.push(Layer::Route(Route {
            path: path.to_string(),
            methods: methods
                .into_iter()
                .map(|m| m.as_ref().to_lowercase())
                .collect(),
            handlers: handlers.into_iter().collect(),
        }));
        self
    }

    pub fn get<I: IntoIterator<Item = Handler>>(self, path: &str, handlers: I) -> Self {
        self.route(path, ["get"], handlers)
    }

    pub fn post<I: IntoIterator<Item = Handler>>(self, path: &str, handlers: I) -> Self {
        self.route(path, ["post"], handlers)
    }

    pub fn put<I: IntoIterator<Item = Handler>>(self, path: &str, handlers: I) -> Self {
        self.route(path, ["put"], handlers)
    }

    pub fn delete<I: IntoIterator<Item = Handler>>(self, path: &str, handlers: I) -> Self {
        self.route(path, ["delete"], handlers)
    }

    pub fn patch<I: IntoIterator<Item = Handler>>(self, path: &str, handlers: I) -> Self {
        self.route(path, ["patch"], handlers)
    }

    /// Mount a nested registry under `path`.
    ///
    /// The mount is stored as a compiled prefix pattern, the way routing
    /// libraries keep it, so extraction goes through the token decoder.
    pub fn mount(mut self, path: &str, registry: Registry) -> Self {
        self.push(Layer::Mount(Mount {
            token: MountToken::Pattern(decoder::encode_prefix(path)),
            layers: registry.layers,
        }));
        self
    }

    /// Register middleware matching every path under `path`
    pub fn middleware(mut self, path: &str, handler: Handler) -> Self {
        self.push(Layer::Middleware(Middleware {
            token: MountToken::Pattern(decoder::encode_prefix(path)),
            handler: Some(handler),
        }));
        self
    }

    /// Register middleware matching every path
    pub fn middleware_all(self, handler: Handler) -> Self {
        self.middleware("/", handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_registration_order() {
        let registry = Registry::new()
            .get("/admin", [Handler::opaque("a")])
            .post("/admin", [Handler::opaque("b")])
            .put("/noo", [Handler::opaque("c")]);

        let paths: Vec<_> = registry
            .layers
            .iter()
            .map(|layer| match layer {
                Layer::Route(route) => (route.path.as_str(), route.methods.join(" ")),
                _ => panic!("expected route"),
            })
            .collect();

        assert_eq!(
            paths,
            vec![
                ("/admin", "get".to_string()),
                ("/admin", "post".to_string()),
                ("/noo", "put".to_string()),
            ]
        );
    }

    #[test]
    fn test_route_lowercases_methods() {
        let registry = Registry::new().route("/x", ["GET", "Post"], []);
        match &registry.layers[0] {
            Layer::Route(route) => assert_eq!(route.methods, vec!["get", "post"]),
            other => panic!("unexpected layer: {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_lowercases_methods() {
        let json = r#"{"layers": [{"route": {"path": "/admin", "methods": ["GET", "Post"]}}]}"#;
        let registry: Registry = serde_json::from_str(json).unwrap();
        match &registry.layers[0] {
            Layer::Route(route) => assert_eq!(route.methods, vec!["get", "post"]),
            other => panic!("unexpected layer: {:?}", other),
        }
    }

    #[test]
    fn test_mount_stores_pattern_token() {
        let registry = Registry::new().mount("/api", Registry::new());
        match &registry.layers[0] {
            Layer::Mount(mount) => {
                assert_eq!(
                    mount.token,
                    MountToken::Pattern(r"/^\/api\/?(?=\/|$)/i".to_string())
                );
            }
            other => panic!("unexpected layer: {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_snapshot_shape() {
        let json = r#"{
            "layers": [
                {"route": {"path": "/admin", "methods": ["get"],
                           "handlers": [{"name": "admin", "source": "function (req, res) {}"}]}},
                {"mount": {"token": {"path": "/api"}, "layers": []}},
                {"middleware": {"token": {"pattern": "/^\\/zaz\\/?(?=\\/|$)/i"}}}
            ]
        }"#;

        let registry: Registry = serde_json::from_str(json).unwrap();
        assert_eq!(registry.layers.len(), 3);
        assert!(matches!(&registry.layers[1], Layer::Mount(m) if m.token == MountToken::Path("/api".into())));
        assert!(matches!(&registry.layers[2], Layer::Middleware(m) if m.handler.is_none()));
    }
}
