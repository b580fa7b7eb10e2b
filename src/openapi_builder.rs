use crate::endpoint::Endpoint;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Content types a request body is declared with.
pub const BODY_CONTENT_TYPES: [&str; 2] = ["application/x-www-form-urlencoded", "application/json"];

pub const DEFAULT_TITLE: &str = "Generated API";
pub const DEFAULT_VERSION: &str = "1.0.0";
pub const DEFAULT_DESCRIPTION: &str = "API documentation generated from the route registry";

/// OpenAPI document builder
pub struct OpenApiBuilder {
    /// OpenAPI info section
    info: Info,
    /// Tag every operation is grouped under
    tag: String,
    /// Paths collection (URL path -> method -> Operation)
    paths: BTreeMap<String, PathItem>,
}

/// OpenAPI Info object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    /// API title
    pub title: String,
    /// API version
    pub version: String,
    /// API description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// All operations of a single path, keyed by lower-case verb
pub type PathItem = BTreeMap<String, Operation>;

/// OpenAPI Operation object - represents a single API operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub tags: Vec<String>,
    /// Path and query parameters
    pub parameters: Vec<Parameter>,
    /// Request body, present when any body parameter was inferred
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    /// Responses (inference can't tell them, so this stays empty)
    pub responses: BTreeMap<String, Response>,
}

/// OpenAPI Parameter object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter location (path, query)
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Parameter name
    pub name: String,
    /// Set for path parameters only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// The location where a parameter value is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Path parameter embedded in the URL (e.g. `/users/{id}`)
    Path,
    /// Query string parameter (e.g. `?page=1`)
    Query,
}

/// OpenAPI RequestBody object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Content types and their schemas
    pub content: BTreeMap<String, MediaType>,
}

/// OpenAPI MediaType object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    pub schema: Schema,
}

/// Minimal schema: an object of named properties, or a plain typed value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,
}

impl Schema {
    pub fn string() -> Self {
        Self {
            schema_type: "string".to_string(),
            properties: None,
        }
    }

    /// Object schema with one string property per name
    pub fn object_of_strings<'a>(names: impl IntoIterator<Item = &'a String>) -> Self {
        Self {
            schema_type: "object".to_string(),
            properties: Some(
                names
                    .into_iter()
                    .map(|name| (name.clone(), Schema::string()))
                    .collect(),
            ),
        }
    }
}

/// OpenAPI Response object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,
}

/// Complete OpenAPI document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    /// OpenAPI version
    pub openapi: String,
    /// API info
    pub info: Info,
    /// API paths
    pub paths: BTreeMap<String, PathItem>,
}

impl OpenApiDocument {
    /// The operation for `path` and `method`, if documented
    pub fn operation(&self, path: &str, method: &str) -> Option<&Operation> {
        self.paths.get(path).and_then(|item| item.get(method))
    }

    /// Every tag used by any operation, without repeats
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = Vec::new();
        for operation in self.paths.values().flat_map(|item| item.values()) {
            for tag in &operation.tags {
                if !tags.contains(&tag.as_str()) {
                    tags.push(tag);
                }
            }
        }
        tags
    }
}

impl OpenApiBuilder {
    /// Create a new OpenApiBuilder with default info, grouping operations under `tag`
    pub fn new(tag: impl Into<String>) -> Self {
        debug!("Initializing OpenApiBuilder");
        Self {
            info: Info {
                title: DEFAULT_TITLE.to_string(),
                version: DEFAULT_VERSION.to_string(),
                description: Some(DEFAULT_DESCRIPTION.to_string()),
            },
            tag: tag.into(),
            paths: BTreeMap::new(),
        }
    }

    /// Set custom info for the API
    pub fn with_info(mut self, title: String, version: String, description: Option<String>) -> Self {
        self.info = Info {
            title,
            version,
            description,
        };
        self
    }

    /// Tag every operation is grouped under
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Add an enriched endpoint, one operation per verb it carries.
    ///
    /// The first operation added for a (path, verb) pair wins.
    pub fn add_endpoint(&mut self, endpoint: &Endpoint) {
        for method in endpoint.methods() {
            debug!("Adding operation: {} {}", method, endpoint.path);
            let operation = self.operation(endpoint);
            let path_item = self.paths.entry(endpoint.path.clone()).or_default();
            if path_item.contains_key(method) {
                debug!("Operation {} {} already documented", method, endpoint.path);
                continue;
            }
            path_item.insert(method.to_string(), operation);
        }
    }

    fn operation(&self, endpoint: &Endpoint) -> Operation {
        let path_params = endpoint.route_params.iter().map(|name| Parameter {
            location: ParameterLocation::Path,
            name: name.clone(),
            required: Some(true),
        });
        let query_params = endpoint.query_params.iter().map(|name| Parameter {
            location: ParameterLocation::Query,
            name: name.clone(),
            required: None,
        });

        let request_body = endpoint.has_body().then(|| RequestBody {
            content: BODY_CONTENT_TYPES
                .iter()
                .map(|content_type| {
                    (
                        content_type.to_string(),
                        MediaType {
                            schema: Schema::object_of_strings(&endpoint.body_params),
                        },
                    )
                })
                .collect(),
        });

        Operation {
            tags: vec![self.tag.clone()],
            parameters: path_params.chain(query_params).collect(),
            request_body,
            responses: BTreeMap::new(),
        }
    }

    /// Build the final OpenAPI document
    pub fn build(self) -> OpenApiDocument {
        debug!("Building final OpenAPI document with {} paths", self.paths.len());

        OpenApiDocument {
            openapi: "3.0.0".to_string(),
            info: self.info,
            paths: self.paths,
        }
    }
}
