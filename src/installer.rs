//! Documentation install.
//!
//! Installing computes the OpenAPI document for a registry and mounts the
//! documentation UI into it under the documentation root. Only the first
//! install takes effect: later calls, whatever their tag, return the first
//! installation untouched. The "already installed" state lives in the
//! [`DocsInstaller`] value, so independent installers (and tests) don't share it.

use crate::config::Config;
use crate::decoder;
use crate::extraction::Extraction;
use crate::openapi_builder::OpenApiDocument;
use crate::registry::{Handler, Layer, Middleware, MountToken, Registry};
use log::{info, warn};
use once_cell::sync::OnceCell;

/// Handler names of the layers mounted for the documentation UI.
const DOCS_HANDLERS: [&str; 2] = ["docsAssets", "docsUi"];

/// The result of the first successful install.
#[derive(Debug, Clone, PartialEq)]
pub struct Installation {
    pub tag: String,
    pub document: OpenApiDocument,
}

/// Installs documentation at most once.
#[derive(Debug, Default)]
pub struct DocsInstaller {
    installed: OnceCell<Installation>,
}

impl DocsInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the document for `registry` under `tag` and mount the
    /// documentation UI into it, unless an earlier call already did.
    pub fn install(&self, tag: &str, registry: &mut Registry, config: &Config) -> &Installation {
        let installation = self.installed.get_or_init(|| {
            let document = Extraction::new(registry, config.clone()).openapi(tag);
            for name in DOCS_HANDLERS {
                registry.push(Layer::Middleware(Middleware {
                    token: MountToken::Pattern(decoder::encode_prefix(&config.docs_root)),
                    handler: Some(Handler::opaque(name)),
                }));
            }
            info!(
                "Installed documentation at {} with tag '{}' ({} paths)",
                config.docs_root,
                tag,
                document.paths.len()
            );
            Installation {
                tag: tag.to_string(),
                document,
            }
        });

        if installation.tag != tag {
            warn!(
                "Documentation already installed with tag '{}', ignoring '{}'",
                installation.tag, tag
            );
        }
        installation
    }

    pub fn installation(&self) -> Option<&Installation> {
        self.installed.get()
    }

    pub fn is_installed(&self) -> bool {
        self.installed.get().is_some()
    }

    /// Forget the current installation. Layers already mounted stay in their registry.
    pub fn reset(&mut self) {
        self.installed.take();
    }
}
