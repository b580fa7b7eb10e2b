//! HTML sitemap rendering.

use crate::config::Config;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::extraction::Extraction;
use crate::registry::Registry;
use log::debug;
use minijinja::{context, Environment};
use once_cell::sync::OnceCell;
use serde::Serialize;

const TEMPLATE_NAME: &str = "sitemap.html";
const TEMPLATE_SOURCE: &str = include_str!("../templates/sitemap.html");

/// One template row: the endpoint plus its verbs split out for the badges.
#[derive(Serialize)]
struct SitemapEntry<'a> {
    #[serde(flatten)]
    endpoint: &'a Endpoint,
    methods: Vec<&'a str>,
}

/// Renders enriched endpoints into an HTML page.
pub struct SitemapRenderer {
    env: Environment<'static>,
}

impl SitemapRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, TEMPLATE_SOURCE)?;
        Ok(Self { env })
    }

    /// Render `routes` in the order given.
    pub fn render(&self, routes: &[Endpoint]) -> Result<String> {
        debug!("Rendering sitemap with {} routes", routes.len());
        let entries: Vec<SitemapEntry> = routes
            .iter()
            .map(|endpoint| SitemapEntry {
                endpoint,
                methods: endpoint.methods().collect(),
            })
            .collect();

        let template = self.env.get_template(TEMPLATE_NAME)?;
        Ok(template.render(context! { routes => entries })?)
    }
}

/// A sitemap computed on first access and reused afterwards.
///
/// Concurrent first accesses render once; the others wait for that result.
pub struct CachedSitemap {
    registry: Registry,
    config: Config,
    tag: Option<String>,
    html: OnceCell<String>,
    #[cfg(test)]
    renders: std::sync::atomic::AtomicUsize,
}

impl CachedSitemap {
    /// Sitemap of `registry`; with a `tag`, paths link into the documentation UI.
    pub fn new(registry: Registry, config: Config, tag: Option<String>) -> Self {
        Self {
            registry,
            config,
            tag,
            html: OnceCell::new(),
            #[cfg(test)]
            renders: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// The rendered page, computing it if this is the first call.
    pub fn html(&self) -> Result<&str> {
        self.html
            .get_or_try_init(|| {
                #[cfg(test)]
                self.renders.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                let extraction = Extraction::new(&self.registry, self.config.clone());
                let routes = match &self.tag {
                    Some(tag) => extraction.linked_routes(tag),
                    None => extraction.routes(),
                };
                SitemapRenderer::new()?.render(&routes)
            })
            .map(String::as_str)
    }

    pub fn is_rendered(&self) -> bool {
        self.html.get().is_some()
    }
}
