//! Request and response payload objects

use serde::{Deserialize, Serialize};

use crate::expression::{ExpressionError, RuntimeExpression};
use crate::extensions::{deserialize_present, impl_extensible, Extensions};
use crate::parameter::{Header, ParameterStyle};
use crate::reference::RefOr;
use crate::schema::Schema;
use crate::spec::Server;
use crate::vocab::KnownMediaType;
use crate::Map;

/// Media Type Object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema of the content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<RefOr<Schema>>,

    /// Example of the media type; exclusive with `examples`
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub example: Option<serde_json::Value>,

    /// Named examples; exclusive with `example`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Map<RefOr<Example>>>,

    /// Encoding by property name (multipart and form bodies only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<Map<Encoding>>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl MediaType {
    /// Media type described by a schema
    pub fn new(schema: impl Into<RefOr<Schema>>) -> Self {
        Self {
            schema: Some(schema.into()),
            ..Default::default()
        }
    }

    /// Set example
    pub fn example(mut self, example: serde_json::Value) -> Self {
        self.example = Some(example);
        self.examples = None;
        self
    }

    /// Add a named example
    pub fn named_example(mut self, name: impl Into<String>, example: impl Into<RefOr<Example>>) -> Self {
        self.example = None;
        self.examples
            .get_or_insert_with(Map::new)
            .insert(name.into(), example.into());
        self
    }

    /// Add an encoding for a property
    pub fn encoding(mut self, property: impl Into<String>, encoding: Encoding) -> Self {
        self.encoding
            .get_or_insert_with(Map::new)
            .insert(property.into(), encoding);
        self
    }
}

/// Encoding Object: serialization of a single schema property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Encoding {
    /// Content-Type for the property, e.g. `image/png, image/jpeg`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Extra multipart headers; `Content-Type` is ignored here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<RefOr<Header>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ParameterStyle>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub explode: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_reserved: Option<bool>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Encoding {
    /// Encoding with a content type
    pub fn new(content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            ..Default::default()
        }
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, header: impl Into<RefOr<Header>>) -> Self {
        self.headers
            .get_or_insert_with(Map::new)
            .insert(name.into(), header.into());
        self
    }
}

/// Example Object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Embedded literal example; exclusive with `externalValue`
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<serde_json::Value>,

    /// URL of a literal example; exclusive with `value`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_value: Option<String>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Example {
    /// Example with an embedded value
    pub fn value(value: serde_json::Value) -> Self {
        Self {
            value: Some(value),
            ..Default::default()
        }
    }

    /// Example stored at a URL
    pub fn external(url: impl Into<String>) -> Self {
        Self {
            external_value: Some(url.into()),
            ..Default::default()
        }
    }

    /// Set summary
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}

/// Request Body Object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Content by media type or media type range
    pub content: Map<MediaType>,

    /// Whether the body is mandatory (defaults to false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl RequestBody {
    /// Empty request body
    pub fn new() -> Self {
        Self::default()
    }

    /// Required `application/json` body
    pub fn json(schema: impl Into<RefOr<Schema>>) -> Self {
        Self::new()
            .content(KnownMediaType::ApplicationJson.as_str(), MediaType::new(schema))
            .required(true)
    }

    /// Add content for a media type
    pub fn content(mut self, media_type: impl Into<String>, content: MediaType) -> Self {
        self.content.insert(media_type.into(), content);
        self
    }

    /// Set description
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Set required
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Whether the body is mandatory
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

/// Response Object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Short description; CommonMark allowed
    pub description: String,

    /// Response headers by name; `Content-Type` is ignored here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<RefOr<Header>>>,

    /// Content by media type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Map<MediaType>>,

    /// Operation links that can be followed from the response
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Map<RefOr<Link>>>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Response {
    /// Response without content
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    /// `application/json` response
    pub fn json(description: impl Into<String>, schema: impl Into<RefOr<Schema>>) -> Self {
        Self::new(description).content(KnownMediaType::ApplicationJson.as_str(), MediaType::new(schema))
    }

    /// Add content for a media type
    pub fn content(mut self, media_type: impl Into<String>, content: MediaType) -> Self {
        self.content
            .get_or_insert_with(Map::new)
            .insert(media_type.into(), content);
        self
    }

    /// Add a header
    pub fn header(mut self, name: impl Into<String>, header: impl Into<RefOr<Header>>) -> Self {
        self.headers
            .get_or_insert_with(Map::new)
            .insert(name.into(), header.into());
        self
    }

    /// Add a link
    pub fn link(mut self, name: impl Into<String>, link: impl Into<RefOr<Link>>) -> Self {
        self.links
            .get_or_insert_with(Map::new)
            .insert(name.into(), link.into());
        self
    }
}

/// Link Object: a design-time link from a response to another operation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Relative or absolute reference to an operation; exclusive with `operationId`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_ref: Option<String>,

    /// Name of an existing operation; exclusive with `operationRef`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    /// Parameters to pass, as constants or runtime expressions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<serde_json::Value>>,

    /// Request body to pass, as a constant or runtime expression
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub request_body: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Server for the target operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<Server>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Link {
    /// Link to an operation by ID
    pub fn to_operation(operation_id: impl Into<String>) -> Self {
        Self {
            operation_id: Some(operation_id.into()),
            ..Default::default()
        }
    }

    /// Add a parameter value
    pub fn parameter(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.parameters
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    /// Parse a parameter value as a runtime expression
    ///
    /// `None` when the parameter is absent or is a constant (not a string
    /// starting with `$`).
    pub fn parameter_expression(
        &self,
        name: &str,
    ) -> Option<Result<RuntimeExpression, ExpressionError>> {
        let value = self.parameters.as_ref()?.get(name)?;
        expression_value(value)
    }

    /// Parse the request body as a runtime expression
    pub fn request_body_expression(&self) -> Option<Result<RuntimeExpression, ExpressionError>> {
        expression_value(self.request_body.as_ref()?)
    }
}

fn expression_value(value: &serde_json::Value) -> Option<Result<RuntimeExpression, ExpressionError>> {
    match value.as_str() {
        Some(s) if s.starts_with('$') => Some(s.parse()),
        _ => None,
    }
}

impl_extensible!(MediaType, Encoding, Example, RequestBody, Response, Link);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::Source;
    use serde_json::json;

    #[test]
    fn request_body_json() {
        let body = RequestBody::json(Schema::reference("NewPet")).description("Pet to add");
        assert!(body.is_required());
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            json!({
                "description": "Pet to add",
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/NewPet" }
                    }
                },
                "required": true
            })
        );
    }

    #[test]
    fn request_body_requires_content() {
        let result: Result<RequestBody, _> =
            serde_json::from_value(json!({ "description": "no content" }));
        assert!(result.is_err());
    }

    #[test]
    fn response_requires_description() {
        let result: Result<Response, _> = serde_json::from_value(json!({ "content": {} }));
        assert!(result.is_err());
    }

    #[test]
    fn response_with_headers_and_links() {
        let response = Response::json("A pet", Schema::reference("Pet"))
            .header("X-Rate-Limit", Header::new(Schema::integer()))
            .link(
                "GetOwner",
                Link::to_operation("getOwner").parameter("ownerId", "$response.body#/ownerId"),
            );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["headers"]["X-Rate-Limit"]["schema"]["type"], "integer");
        assert_eq!(json["links"]["GetOwner"]["operationId"], "getOwner");
    }

    #[test]
    fn link_parameter_expressions() {
        let link = Link::to_operation("getUser")
            .parameter("userId", "$request.path.id")
            .parameter("limit", 10)
            .parameter("label", "plain");

        let expr = link.parameter_expression("userId").unwrap().unwrap();
        assert_eq!(expr, RuntimeExpression::Request(Source::Path("id".to_string())));
        assert!(link.parameter_expression("limit").is_none());
        assert!(link.parameter_expression("label").is_none());
        assert!(link.parameter_expression("missing").is_none());
        assert!(link.request_body_expression().is_none());
    }

    #[test]
    fn media_type_example_exclusivity() {
        let media = MediaType::new(Schema::string())
            .example(json!("a"))
            .named_example("b", Example::value(json!("b")).summary("B"));
        assert!(media.example.is_none());
        assert_eq!(media.examples.as_ref().unwrap().len(), 1);

        let media = media.example(json!("c"));
        assert!(media.examples.is_none());
    }

    #[test]
    fn multipart_encoding() {
        let media = MediaType::new(Schema::object()).encoding(
            "profileImage",
            Encoding::new("image/png, image/jpeg")
                .header("X-Rate-Limit-Limit", Header::new(Schema::integer())),
        );
        let json = serde_json::to_value(&media).unwrap();
        assert_eq!(
            json["encoding"]["profileImage"]["contentType"],
            "image/png, image/jpeg"
        );
    }
}
