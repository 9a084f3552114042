//! Parameter and Header objects

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::content::{Example, MediaType};
use crate::extensions::{deserialize_present, impl_extensible, Extensions};
use crate::reference::RefOr;
use crate::schema::Schema;
use crate::Map;

/// Where a parameter is carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

impl ParameterLocation {
    /// Value of the `in` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Header => "header",
            Self::Path => "path",
            Self::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a parameter value is serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterStyle {
    /// `;color=blue` (path)
    Matrix,
    /// `.blue` (path)
    Label,
    /// `color=blue` (query, cookie)
    Form,
    /// `blue,black` (path, header)
    Simple,
    /// `blue%20black` (query)
    SpaceDelimited,
    /// `blue|black` (query)
    PipeDelimited,
    /// `color[R]=100` (query)
    DeepObject,
}

/// Rules a parameter breaks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    #[error("path parameter `{0}` must be required")]
    PathNotRequired(String),

    #[error("parameter `{0}` has both `schema` and `content`")]
    SchemaAndContent(String),

    #[error("parameter `{0}` needs either `schema` or `content`")]
    MissingSchema(String),

    #[error("parameter `{0}` has {1} entries in `content`, expected exactly one")]
    ContentEntries(String, usize),
}

/// Parameter Object: a single operation parameter
///
/// A parameter is identified by the combination of `name` and `in`.
/// Deserialization enforces the structural rules of the object: path
/// parameters are required, and exactly one of `schema` or a single-entry
/// `content` describes the value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ParameterRepr")]
pub struct Parameter {
    /// Case-sensitive parameter name
    pub name: String,

    /// Location of the parameter
    #[serde(rename = "in")]
    pub location: ParameterLocation,

    /// Brief description; CommonMark allowed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether the parameter is mandatory. Always `Some(true)` for path parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    /// Allow sending an empty value (query only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_empty_value: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ParameterStyle>,

    /// Generate separate parameters for each array item or object property
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,

    /// Allow RFC 3986 reserved characters without percent-encoding (query only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_reserved: Option<bool>,

    /// Schema of the value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<RefOr<Schema>>,

    /// Media type representation of the value; a single entry
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Map<MediaType>>,

    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub example: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Map<RefOr<Example>>>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParameterRepr {
    name: String,
    #[serde(rename = "in")]
    location: ParameterLocation,
    description: Option<String>,
    required: Option<bool>,
    deprecated: Option<bool>,
    allow_empty_value: Option<bool>,
    style: Option<ParameterStyle>,
    explode: Option<bool>,
    allow_reserved: Option<bool>,
    schema: Option<RefOr<Schema>>,
    content: Option<Map<MediaType>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    example: Option<serde_json::Value>,
    examples: Option<Map<RefOr<Example>>>,
    #[serde(flatten)]
    extensions: Extensions,
}

impl TryFrom<ParameterRepr> for Parameter {
    type Error = ParameterError;

    fn try_from(repr: ParameterRepr) -> Result<Self, Self::Error> {
        let parameter = Parameter {
            name: repr.name,
            location: repr.location,
            description: repr.description,
            required: repr.required,
            deprecated: repr.deprecated,
            allow_empty_value: repr.allow_empty_value,
            style: repr.style,
            explode: repr.explode,
            allow_reserved: repr.allow_reserved,
            schema: repr.schema,
            content: repr.content,
            example: repr.example,
            examples: repr.examples,
            extensions: repr.extensions,
        };
        parameter.check()?;
        Ok(parameter)
    }
}

impl Parameter {
    fn new(name: impl Into<String>, location: ParameterLocation, schema: RefOr<Schema>) -> Self {
        Self {
            name: name.into(),
            location,
            description: None,
            required: (location == ParameterLocation::Path).then_some(true),
            deprecated: None,
            allow_empty_value: None,
            style: None,
            explode: None,
            allow_reserved: None,
            schema: Some(schema),
            content: None,
            example: None,
            examples: None,
            extensions: Extensions::new(),
        }
    }

    /// Required path parameter
    pub fn path(name: impl Into<String>, schema: impl Into<RefOr<Schema>>) -> Self {
        Self::new(name, ParameterLocation::Path, schema.into())
    }

    /// Optional query parameter
    pub fn query(name: impl Into<String>, schema: impl Into<RefOr<Schema>>) -> Self {
        Self::new(name, ParameterLocation::Query, schema.into())
    }

    /// Optional header parameter
    pub fn header(name: impl Into<String>, schema: impl Into<RefOr<Schema>>) -> Self {
        Self::new(name, ParameterLocation::Header, schema.into())
    }

    /// Optional cookie parameter
    pub fn cookie(name: impl Into<String>, schema: impl Into<RefOr<Schema>>) -> Self {
        Self::new(name, ParameterLocation::Cookie, schema.into())
    }

    /// Set description
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Set whether the parameter is mandatory; path parameters stay required
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required || self.location == ParameterLocation::Path);
        self
    }

    /// Whether the parameter is mandatory; an absent `required` means false
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    /// Mark as deprecated
    pub fn deprecated(mut self) -> Self {
        self.deprecated = Some(true);
        self
    }

    /// Set serialization style
    pub fn style(mut self, style: ParameterStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Set explode
    pub fn explode(mut self, explode: bool) -> Self {
        self.explode = Some(explode);
        self
    }

    /// Set example value
    pub fn example(mut self, example: serde_json::Value) -> Self {
        self.example = Some(example);
        self
    }

    /// Describe the value with a schema; drops any `content`
    pub fn with_schema(mut self, schema: impl Into<RefOr<Schema>>) -> Self {
        self.schema = Some(schema.into());
        self.content = None;
        self
    }

    /// Describe the value with a media type; drops any `schema`
    pub fn with_content(mut self, media_type: impl Into<String>, content: MediaType) -> Self {
        let mut map = Map::new();
        map.insert(media_type.into(), content);
        self.content = Some(map);
        self.schema = None;
        self
    }

    /// Style used when `style` is absent
    pub fn default_style(&self) -> ParameterStyle {
        match self.location {
            ParameterLocation::Query | ParameterLocation::Cookie => ParameterStyle::Form,
            ParameterLocation::Path | ParameterLocation::Header => ParameterStyle::Simple,
        }
    }

    /// Declared style or the default for the location
    pub fn effective_style(&self) -> ParameterStyle {
        self.style.unwrap_or_else(|| self.default_style())
    }

    /// Declared explode or the default for the style (true only for `form`)
    pub fn effective_explode(&self) -> bool {
        self.explode
            .unwrap_or(self.effective_style() == ParameterStyle::Form)
    }

    /// Whether both parameters have the same name and location
    ///
    /// Header names compare case-insensitively.
    pub fn same_identity(&self, other: &Parameter) -> bool {
        if self.location != other.location {
            return false;
        }
        match self.location {
            ParameterLocation::Header => self.name.eq_ignore_ascii_case(&other.name),
            _ => self.name == other.name,
        }
    }

    /// Check the structural rules enforced on deserialization
    pub fn check(&self) -> Result<(), ParameterError> {
        if self.location == ParameterLocation::Path && !self.is_required() {
            return Err(ParameterError::PathNotRequired(self.name.clone()));
        }
        match (&self.schema, &self.content) {
            (Some(_), Some(_)) => Err(ParameterError::SchemaAndContent(self.name.clone())),
            (None, None) => Err(ParameterError::MissingSchema(self.name.clone())),
            (None, Some(content)) if content.len() != 1 => {
                Err(ParameterError::ContentEntries(self.name.clone(), content.len()))
            }
            _ => Ok(()),
        }
    }
}

/// Header Object
///
/// Follows the Parameter Object without `name` (given by the map key) and
/// `in` (implicitly `header`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_empty_value: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ParameterStyle>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_reserved: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<RefOr<Schema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Map<MediaType>>,

    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub example: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Map<RefOr<Example>>>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Header {
    /// Header described by a schema
    pub fn new(schema: impl Into<RefOr<Schema>>) -> Self {
        Self {
            schema: Some(schema.into()),
            ..Default::default()
        }
    }

    /// Set description
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Mark as required
    pub fn required(mut self) -> Self {
        self.required = Some(true);
        self
    }
}

impl_extensible!(Parameter, Header);
