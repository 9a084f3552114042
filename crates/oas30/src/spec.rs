//! Root document and metadata objects

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::components::{ComponentKind, Components};
use crate::extensions::{impl_extensible, Extensions};
use crate::path::{HttpMethod, Operation, Paths};
use crate::reference::RefOr;
use crate::schema::Schema;
use crate::security::{SecurityRequirement, SecurityScheme};
use crate::Map;

/// OpenAPI version written by [`OpenApi::new`]
pub const DEFAULT_OPENAPI_VERSION: &str = "3.0.3";

/// OpenAPI 3.0 document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenApi {
    /// Semantic version of the OpenAPI Specification the document uses.
    /// Not related to `info.version`.
    pub openapi: String,

    /// Metadata about the API
    pub info: Info,

    /// Connectivity information. An absent or empty list means a single
    /// server with url `/`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,

    /// Available paths and operations
    pub paths: Paths,

    /// Reusable objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,

    /// Alternative security requirements for the whole API; satisfying one
    /// of them authorizes a request. Operations can override this.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,

    /// Tags with additional metadata. Names must be unique.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,

    /// Additional external documentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl OpenApi {
    /// Create a new document with the given API title and version
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            openapi: DEFAULT_OPENAPI_VERSION.to_string(),
            info: Info::new(title, version),
            servers: None,
            paths: Paths::default(),
            components: None,
            security: None,
            tags: None,
            external_docs: None,
            extensions: Extensions::new(),
        }
    }

    /// Set API description
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.info.description = Some(desc.into());
        self
    }

    /// Set terms of service URL
    pub fn terms_of_service(mut self, url: impl Into<String>) -> Self {
        self.info.terms_of_service = Some(url.into());
        self
    }

    /// Set contact information
    pub fn contact(mut self, contact: Contact) -> Self {
        self.info.contact = Some(contact);
        self
    }

    /// Set license information
    pub fn license(mut self, license: License) -> Self {
        self.info.license = Some(license);
        self
    }

    /// Add a server
    pub fn server(mut self, server: Server) -> Self {
        self.servers.get_or_insert_with(Vec::new).push(server);
        self
    }

    /// Add a path operation, replacing any operation already bound to the method
    pub fn path(mut self, path: impl Into<String>, method: HttpMethod, operation: Operation) -> Self {
        self.paths
            .paths
            .entry(path.into())
            .or_default()
            .set_operation(method, operation);
        self
    }

    /// Add a schema to components
    pub fn schema(mut self, name: impl Into<String>, schema: impl Into<RefOr<Schema>>) -> Self {
        self.components_mut()
            .schemas
            .get_or_insert_with(Map::new)
            .insert(name.into(), schema.into());
        self
    }

    /// Add a security scheme to components
    pub fn security_scheme(mut self, name: impl Into<String>, scheme: SecurityScheme) -> Self {
        self.components_mut()
            .security_schemes
            .get_or_insert_with(Map::new)
            .insert(name.into(), RefOr::Item(scheme));
        self
    }

    /// Add a global security requirement
    pub fn security_requirement(mut self, name: impl Into<String>, scopes: Vec<String>) -> Self {
        let mut req = SecurityRequirement::new();
        req.insert(name.into(), scopes);
        self.security.get_or_insert_with(Vec::new).push(req);
        self
    }

    /// Add a tag
    pub fn tag(mut self, tag: Tag) -> Self {
        self.tags.get_or_insert_with(Vec::new).push(tag);
        self
    }

    /// Set external documentation
    pub fn external_docs(mut self, docs: ExternalDocs) -> Self {
        self.external_docs = Some(docs);
        self
    }

    /// Components, created on first use
    pub fn components_mut(&mut self) -> &mut Components {
        self.components.get_or_insert_with(Components::default)
    }

    /// Servers that apply to the document
    ///
    /// Falls back to a single server with url `/` when none are declared.
    pub fn effective_servers(&self) -> Vec<Server> {
        match &self.servers {
            Some(servers) if !servers.is_empty() => servers.clone(),
            _ => vec![Server::default_server()],
        }
    }

    /// Parse the `openapi` field
    pub fn spec_version(&self) -> Result<SpecVersion, SpecVersionError> {
        self.openapi.parse()
    }

    /// All operations as `(path, method, operation)` in document order
    pub fn operations(&self) -> impl Iterator<Item = (&str, HttpMethod, &Operation)> + '_ {
        self.paths.iter().flat_map(|(path, item)| {
            item.operations()
                .map(move |(method, op)| (path.as_str(), method, op))
        })
    }

    /// Find an operation by its `operationId`
    pub fn operation_by_id(&self, id: &str) -> Option<(&str, HttpMethod, &Operation)> {
        self.operations()
            .find(|(_, _, op)| op.operation_id.as_deref() == Some(id))
    }

    /// Look up a tag declaration by name
    pub fn find_tag(&self, name: &str) -> Option<&Tag> {
        self.tags.as_ref()?.iter().find(|t| t.name == name)
    }

    /// Inline schema registered under `#/components/schemas/<name>`
    pub fn component_schema(&self, name: &str) -> Option<&RefOr<Schema>> {
        self.components.as_ref()?.schemas.as_ref()?.get(name)
    }

    /// Local `$ref` path of a schema component
    pub fn schema_ref(name: &str) -> String {
        ComponentKind::Schemas.reference_path(name)
    }
}

/// Info Object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    /// Title of the application
    pub title: String,

    /// Version of the document (distinct from the OpenAPI version)
    pub version: String,

    /// Short description; CommonMark allowed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// URL of the Terms of Service
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,

    /// Contact information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,

    /// License information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Info {
    /// Create info with title and version
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
            terms_of_service: None,
            contact: None,
            license: None,
            extensions: Extensions::new(),
        }
    }
}

/// Contact information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Identifying name of the contact person/organization
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Contact URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Contact {
    /// Create new contact
    pub fn new() -> Self {
        Self::default()
    }

    /// Set name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set email
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// License information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    /// License name
    pub name: String,

    /// License URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl License {
    /// Create a new license
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
            extensions: Extensions::new(),
        }
    }

    /// Set URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Server definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    /// Target host URL. May be relative and may contain `{variables}`.
    pub url: String,

    /// Server description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Values for the variables of the URL template
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<ServerVariable>>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Server {
    /// Create a new server
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
            variables: None,
            extensions: Extensions::new(),
        }
    }

    /// Server used when a document declares none
    pub fn default_server() -> Self {
        Self::new("/")
    }

    /// Set description
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Add a variable
    pub fn variable(mut self, name: impl Into<String>, var: ServerVariable) -> Self {
        self.variables
            .get_or_insert_with(Map::new)
            .insert(name.into(), var);
        self
    }

    /// Substitute `{name}` variables in the URL
    ///
    /// Uses the override when one is given, the variable default otherwise.
    /// Placeholders without a declared variable or override are left as is.
    pub fn resolve_url(&self, overrides: &HashMap<String, String>) -> String {
        let mut out = String::with_capacity(self.url.len());
        let mut rest = self.url.as_str();

        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            let name = &rest[start + 1..start + len];
            out.push_str(&rest[..start]);

            let value = overrides.get(name).map(String::as_str).or_else(|| {
                self.variables
                    .as_ref()
                    .and_then(|vars| vars.get(name))
                    .map(|var| var.default.as_str())
            });
            match value {
                Some(value) => out.push_str(value),
                None => out.push_str(&rest[start..=start + len]),
            }
            rest = &rest[start + len + 1..];
        }

        out.push_str(rest);
        out
    }
}

/// Server variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerVariable {
    /// Allowed values
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,

    /// Value used when none is supplied
    pub default: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl ServerVariable {
    /// Create a new variable with default value
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            enum_values: None,
            default: default.into(),
            description: None,
            extensions: Extensions::new(),
        }
    }

    /// Set allowed values
    pub fn enum_values(mut self, values: Vec<String>) -> Self {
        self.enum_values = Some(values);
        self
    }

    /// Set description
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

/// Tag for grouping operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    /// Tag name
    pub name: String,

    /// Tag description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// External documentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Tag {
    /// Create a new tag
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            external_docs: None,
            extensions: Extensions::new(),
        }
    }

    /// Set description
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Set external documentation
    pub fn external_docs(mut self, docs: ExternalDocs) -> Self {
        self.external_docs = Some(docs);
        self
    }
}

/// External documentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalDocs {
    /// URL to external documentation
    pub url: String,

    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl ExternalDocs {
    /// Create new external documentation
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
            extensions: Extensions::new(),
        }
    }

    /// Set description
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }
}

impl_extensible!(OpenApi, Info, Contact, License, Server, ServerVariable, Tag, ExternalDocs);

/// Parsed value of the `openapi` field
///
/// Accepts `major.minor` and `major.minor.patch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpecVersion {
    /// Major version number
    pub major: u32,
    /// Minor version number
    pub minor: u32,
    /// Patch version number (defaults to 0)
    pub patch: u32,
}

impl SpecVersion {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Whether the version belongs to the 3.0 line this crate models
    pub fn is_3_0(&self) -> bool {
        self.major == 3 && self.minor == 0
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for SpecVersion {
    type Err = SpecVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SpecVersionError::Empty);
        }

        let parts: Vec<&str> = s.split('.').collect();
        let number = |part: &str| -> Result<u32, SpecVersionError> {
            part.parse().map_err(|_| SpecVersionError::InvalidNumber)
        };

        match parts.as_slice() {
            [major, minor] => Ok(SpecVersion::new(number(major)?, number(minor)?, 0)),
            [major, minor, patch] => Ok(SpecVersion::new(
                number(major)?,
                number(minor)?,
                number(patch)?,
            )),
            _ => Err(SpecVersionError::InvalidFormat),
        }
    }
}

impl PartialOrd for SpecVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SpecVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

/// Error type for `openapi` version parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecVersionError {
    /// Invalid number in version string
    InvalidNumber,
    /// Not `major.minor[.patch]`
    InvalidFormat,
    /// Empty version string
    Empty,
}

impl fmt::Display for SpecVersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidNumber => write!(f, "invalid number in openapi version"),
            Self::InvalidFormat => write!(f, "invalid openapi version format"),
            Self::Empty => write!(f, "empty openapi version string"),
        }
    }
}

impl std::error::Error for SpecVersionError {}
