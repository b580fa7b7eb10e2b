use crate::config::{Config, DEFAULT_DOCS_ROOT, DEFAULT_REQUEST_IDENT};
use crate::openapi_builder::{DEFAULT_DESCRIPTION, DEFAULT_TITLE, DEFAULT_VERSION};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// Route Sitemap - generate an HTML sitemap or an OpenAPI document from a route registry snapshot
#[derive(Parser, Debug)]
#[command(name = "route-sitemap")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the registry snapshot (.json, .yaml or .yml)
    #[arg(value_name = "SNAPSHOT")]
    pub snapshot_path: PathBuf,

    /// Output format (html sitemap, or json/yaml OpenAPI document)
    #[arg(short = 'f', long = "format", value_enum, default_value = "html")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Tag grouping every operation in the documentation
    #[arg(short = 't', long = "tag", default_value = "api")]
    pub tag: String,

    /// Title of the generated API document
    #[arg(long = "title", default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Version of the generated API document
    #[arg(long = "api-version", default_value = DEFAULT_VERSION)]
    pub api_version: String,

    /// Description of the generated API document
    #[arg(long = "description", default_value = DEFAULT_DESCRIPTION)]
    pub description: String,

    /// Path the documentation UI is served under; excluded from the output
    #[arg(long = "docs-root", default_value = DEFAULT_DOCS_ROOT)]
    pub docs_root: String,

    /// Request parameter name assumed when a handler's own can't be detected
    #[arg(long = "request-ident", default_value = DEFAULT_REQUEST_IDENT)]
    pub request_ident: String,

    /// Don't link sitemap entries to the documentation UI
    #[arg(long = "no-links")]
    pub no_links: bool,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// HTML sitemap
    Html,
    /// OpenAPI document as JSON
    Json,
    /// OpenAPI document as YAML
    Yaml,
}

impl CliArgs {
    /// Extraction settings carried by these arguments
    pub fn config(&self) -> Config {
        Config {
            docs_root: self.docs_root.clone(),
            request_ident: self.request_ident.clone(),
        }
    }
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.snapshot_path.is_file() {
        anyhow::bail!(
            "Snapshot path is not a file: {}",
            args.snapshot_path.display()
        );
    }

    if !args.docs_root.starts_with('/') {
        anyhow::bail!("Documentation root must start with '/': {}", args.docs_root);
    }

    info!("Snapshot: {}", args.snapshot_path.display());
    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else {
        info!("Output: stdout");
    }

    Ok(args)
}

/// Run the main workflow, returning the rendered output
pub fn render(args: &CliArgs) -> Result<String> {
    use crate::extraction::Extraction;
    use crate::loader::SnapshotLoader;
    use crate::openapi_builder::OpenApiBuilder;
    use crate::serializer::{serialize_json, serialize_yaml};
    use crate::sitemap::SitemapRenderer;

    // Step 1: Load the registry snapshot
    info!("Loading registry snapshot...");
    let registry = SnapshotLoader::load_file(&args.snapshot_path)?;

    // Step 2: Walk the registry once
    let extraction = Extraction::new(&registry, args.config());

    // Step 3: Render the requested artifact
    let content = match args.output_format {
        OutputFormat::Html => {
            let routes = if args.no_links {
                extraction.routes()
            } else {
                extraction.linked_routes(&args.tag)
            };
            info!("Rendering sitemap with {} paths", routes.len());
            SitemapRenderer::new()?.render(&routes)?
        }
        OutputFormat::Json | OutputFormat::Yaml => {
            let builder = OpenApiBuilder::new(args.tag.as_str()).with_info(
                args.title.clone(),
                args.api_version.clone(),
                Some(args.description.clone()),
            );
            let document = extraction.document(builder);
            info!("Built OpenAPI document with {} paths", document.paths.len());
            if args.output_format == OutputFormat::Json {
                serialize_json(&document)?
            } else {
                serialize_yaml(&document)?
            }
        }
    };

    Ok(content)
}

/// Run the main workflow and write its output
pub fn run(args: CliArgs) -> Result<()> {
    use crate::serializer::write_to_file;

    let content = render(&args)?;

    if let Some(output_path) = &args.output_path {
        info!("Writing output to: {}", output_path.display());
        write_to_file(&content, output_path)?;
    } else {
        println!("{}", content);
    }

    Ok(())
}
