//! Route-tree walking.
//!
//! Flattens a nested registry into raw endpoints in registration order. Raw
//! endpoints keep the path exactly as accumulated; normalization and grouping
//! happen in [`crate::aggregator`].

use crate::decoder;
use crate::endpoint::Endpoint;
use crate::registry::{Layer, Route};
use log::debug;

/// Verb assumed for bare middleware.
///
/// Middleware can answer any verb; `get` is an approximation that keeps the
/// path visible in the documentation.
pub const IMPLICIT_METHOD: &str = "get";

/// Walk `layers` under `prefix`, producing one raw endpoint per route and per
/// addressable middleware.
pub fn walk(prefix: &str, layers: &[Layer]) -> Vec<Endpoint> {
    let mut endpoints = Vec::new();
    walk_into(prefix, layers, &mut endpoints);
    endpoints
}

fn walk_into(prefix: &str, layers: &[Layer], out: &mut Vec<Endpoint>) {
    for layer in layers {
        match layer {
            Layer::Route(route) => out.push(route_endpoint(prefix, route)),
            Layer::Mount(mount) => {
                let next = decoder::join(prefix, &decoder::decode(&mount.token));
                debug!("Descending into mount at '{}' ({} layers)", next, mount.layers.len());
                walk_into(&next, &mount.layers, out);
            }
            Layer::Middleware(middleware) => {
                let next = decoder::join(prefix, &decoder::decode(&middleware.token));
                if next.is_empty() {
                    continue;
                }
                debug!(
                    "Assuming {} for middleware {} at '{}'",
                    IMPLICIT_METHOD,
                    middleware
                        .handler
                        .as_ref()
                        .map(|h| h.name.as_str())
                        .unwrap_or("<anonymous>"),
                    next
                );
                out.push(Endpoint::new(IMPLICIT_METHOD, next, Vec::new()));
            }
        }
    }
}

fn route_endpoint(prefix: &str, route: &Route) -> Endpoint {
    Endpoint::new(
        route.methods.join(" "),
        format!("{}{}", prefix, route.path),
        route.handlers.clone(),
    )
}
