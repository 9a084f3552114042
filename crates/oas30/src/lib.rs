//! Typed OpenAPI 3.0 object model
//!
//! This crate describes the shape of an OpenAPI 3.0 document as Rust types.
//! Every object of the OpenAPI 3.0 specification has a struct or enum here,
//! with field names serialized exactly as they appear in the document.
//!
//! A JSON or YAML document conforms to the model when it deserializes into
//! [`OpenApi`]. Unknown fields are kept in each object's extension map, so
//! a document survives a load/save cycle unchanged.
//!
//! # Features
//!
//! - Every OpenAPI 3.0 object, including security schemes and OAuth flows
//! - `$ref` or inline values via [`RefOr`]
//! - Ordered maps: documents keep their key order
//! - Runtime expressions (`$request.body#/id`) as a parsed type
//! - JSON and YAML loading (`yaml` feature, on by default)
//!
//! # Usage
//!
//! ```rust
//! use oas30::{HttpMethod, OpenApi, Operation, Parameter, Response, Schema};
//!
//! let spec = OpenApi::new("Pet Store", "1.0.0")
//!     .description("Sample pet store")
//!     .path(
//!         "/pets/{petId}",
//!         HttpMethod::Get,
//!         Operation::new()
//!             .operation_id("showPetById")
//!             .parameter(Parameter::path("petId", Schema::string()))
//!             .response(200, Response::json("A pet", Schema::reference("Pet"))),
//!     );
//!
//! let json = spec.to_json();
//! assert_eq!(json["openapi"], "3.0.3");
//! assert_eq!(json["paths"]["/pets/{petId}"]["get"]["parameters"][0]["required"], true);
//! ```
//!
//! What the crate does not do: it does not validate payloads against
//! schemas, resolve `$ref`s, merge documents or lint them.

mod components;
mod config;
mod content;
mod document;
mod error;
mod extensions;
mod parameter;
mod path;
mod reference;
mod schema;
mod security;
mod spec;

pub mod expression;
pub mod vocab;

pub use components::{ComponentKind, Components};
pub use config::{DocumentConfig, DocumentFormat};
pub use content::{Encoding, Example, Link, MediaType, RequestBody, Response};
pub use error::{Error, Result};
pub use expression::{ExpressionError, RuntimeExpression};
pub use extensions::{is_extension_key, Extensible, Extensions, EXTENSION_PREFIX};
pub use parameter::{Header, Parameter, ParameterError, ParameterLocation, ParameterStyle};
pub use path::{
    template_parameters, Callback, HttpMethod, Operation, PathItem, PathTemplateError, Paths,
    Responses, StatusCode, StatusCodeError, UnknownMethod,
};
pub use reference::{RefOr, Reference};
pub use schema::{
    AdditionalProperties, DataFormat, Discriminator, Schema, SchemaKind, SchemaType, Xml,
};
pub use security::{
    ApiKeyLocation, ApiKeyScheme, AuthorizationCodeFlow, ClientCredentialsFlow, HttpScheme,
    ImplicitFlow, OAuth2Scheme, OAuthFlows, OpenIdConnectScheme, PasswordFlow,
    SecurityRequirement, SecurityScheme,
};
pub use spec::{
    Contact, ExternalDocs, Info, License, OpenApi, Server, ServerVariable, SpecVersion,
    SpecVersionError, Tag, DEFAULT_OPENAPI_VERSION,
};

/// Ordered map used for every string-keyed map of the model
pub type Map<V> = indexmap::IndexMap<String, V>;

/// Prelude module for building documents
pub mod prelude {
    pub use crate::{
        Components, Extensible, Header, HttpMethod, MediaType, OpenApi, Operation, Parameter,
        PathItem, RefOr, RequestBody, Response, Schema, SecurityScheme, Server, StatusCode, Tag,
    };
}
