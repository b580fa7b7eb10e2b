//! Parameter inference.
//!
//! Route parameters come from the path syntax ([`route`]). Query and body
//! parameters come from scanning the source text of every handler in the
//! chain ([`source`]), since any middleware in the chain may read them.
//!
//! The scan is shallow by design of its inputs: handlers are never executed,
//! so reads through aliases or destructuring go unreported. Matches inside
//! comments never count.

pub mod route;
pub mod source;

use crate::config::Config;
use crate::endpoint::{push_distinct, Endpoint};
use log::debug;

/// Enrich every endpoint with its route, query and body parameters.
pub fn infer(endpoints: Vec<Endpoint>, config: &Config) -> Vec<Endpoint> {
    endpoints
        .into_iter()
        .map(|endpoint| infer_endpoint(endpoint, config))
        .collect()
}

/// Enrich a single endpoint, rewriting its `:name` placeholders to `{name}`.
pub fn infer_endpoint(endpoint: Endpoint, config: &Config) -> Endpoint {
    let route = route::extract(&endpoint.path);
    let mut enriched = Endpoint {
        path: route.path,
        route_params: route.names,
        ..endpoint
    };

    for handler in &enriched.handlers {
        let Some(text) = handler.source.as_deref() else {
            debug!("Handler {} has no source, skipping scan", handler.name);
            continue;
        };
        let found = source::scan(text, &config.request_ident);
        for name in &found.query {
            push_distinct(&mut enriched.query_params, name);
        }
        for name in &found.body {
            push_distinct(&mut enriched.body_params, name);
        }
    }

    debug!(
        "Inferred {} {}: route={:?} query={:?} body={:?}",
        enriched.method,
        enriched.path,
        enriched.route_params,
        enriched.query_params,
        enriched.body_params
    );
    enriched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Handler;

    #[test]
    fn test_infer_route_params_and_rewrite() {
        let endpoint = Endpoint::new("put", "/duplicate/:id/group/:nick", Vec::new());
        let enriched = infer_endpoint(endpoint, &Config::default());

        assert_eq!(enriched.path, "/duplicate/{id}/group/{nick}");
        assert_eq!(enriched.route_params, vec!["id", "nick"]);
    }

    #[test]
    fn test_infer_scans_whole_chain() {
        let handlers = vec![
            Handler::new("auth", "function (req, res, next) { if (req.query.token) next() }"),
            Handler::opaque("native"),
            Handler::new("create", "(req, res) => res.send(req.body.username + req.query.token)"),
        ];
        let enriched = infer_endpoint(Endpoint::new("post", "/api/foo", handlers), &Config::default());

        assert_eq!(enriched.query_params, vec!["token"]);
        assert_eq!(enriched.body_params, vec!["username"]);
    }

    #[test]
    fn test_infer_unserializable_handler_contributes_nothing() {
        let endpoint = Endpoint::new("get", "/x", vec![Handler::opaque("native")]);
        let enriched = infer_endpoint(endpoint, &Config::default());
        assert!(enriched.query_params.is_empty());
        assert!(enriched.body_params.is_empty());
    }

    #[test]
    fn test_infer_preserves_order() {
        let endpoints = vec![
            Endpoint::new("get", "/a", Vec::new()),
            Endpoint::new("get", "/b/:id", Vec::new()),
        ];
        let enriched = infer(endpoints, &Config::default());
        let paths: Vec<_> = enriched.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["/a", "/b/{id}"]);
    }
}
