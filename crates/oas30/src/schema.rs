//! Schema Object
//!
//! OpenAPI 3.0 uses an extended subset of JSON Schema Wright Draft 00. A
//! schema is one of a number, string, boolean, array or object schema, or a
//! composition (`allOf`, `anyOf`, `oneOf`, `not`). The wire format is a flat
//! object, so [`Schema`] keeps every keyword as an optional field and
//! [`Schema::kind`] recovers the variant.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;

use crate::components::ComponentKind;
use crate::extensions::{deserialize_present, impl_extensible, Extensions};
use crate::reference::RefOr;
use crate::spec::ExternalDocs;
use crate::Map;

/// Value of the `type` keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Integer,
    Number,
    String,
    Boolean,
    Array,
    Object,
}

impl SchemaType {
    /// Keyword value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of the `format` keyword
///
/// Formats are open: anything outside the formats defined by OpenAPI is
/// kept verbatim in [`DataFormat::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataFormat {
    /// Signed 32 bits
    Int32,
    /// Signed 64 bits
    Int64,
    Float,
    Double,
    /// Base64 encoded characters
    Byte,
    /// Any sequence of octets
    Binary,
    /// RFC 3339 full-date
    Date,
    /// RFC 3339 date-time
    DateTime,
    /// Hint to obscure the input
    Password,
    /// Any other format, e.g. `uuid` or `email`
    Other(String),
}

impl DataFormat {
    /// Keyword value
    pub fn as_str(&self) -> &str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float => "float",
            Self::Double => "double",
            Self::Byte => "byte",
            Self::Binary => "binary",
            Self::Date => "date",
            Self::DateTime => "date-time",
            Self::Password => "password",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for DataFormat {
    fn from(s: &str) -> Self {
        match s {
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "float" => Self::Float,
            "double" => Self::Double,
            "byte" => Self::Byte,
            "binary" => Self::Binary,
            "date" => Self::Date,
            "date-time" => Self::DateTime,
            "password" => Self::Password,
            other => Self::Other(other.to_string()),
        }
    }
}

impl FromStr for DataFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DataFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DataFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s.as_str()))
    }
}

/// `additionalProperties`: a boolean or a schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<RefOr<Schema>>),
}

/// Discriminator for polymorphism in `oneOf`/`anyOf`/`allOf`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discriminator {
    /// Payload property holding the discriminator value
    pub property_name: String,

    /// Payload values to schema names or references
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping: Option<Map<String>>,
}

/// XML Object: fine-tuning of the XML representation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Xml {
    /// Element or attribute name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Absolute namespace URI
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Name prefix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Attribute instead of element (default false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<bool>,

    /// Wrap array items in an element (arrays only, default false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapped: Option<bool>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Schema Object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<DataFormat>,

    /// Allows `null` in addition to the declared type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,

    /// Sent in responses only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,

    /// Sent in requests only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_only: Option<bool>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub example: Option<Value>,

    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<Discriminator>,

    // Number constraints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiple_of: Option<Number>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,

    /// `minimum` itself is excluded (boolean in OpenAPI 3.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,

    /// `maximum` itself is excluded (boolean in OpenAPI 3.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_maximum: Option<bool>,

    // String constraints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    /// ECMA 262 regular expression
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    // Array constraints
    /// Item schema; required when `type` is `array`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<RefOr<Schema>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,

    // Object constraints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Map<RefOr<Schema>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_properties: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_properties: Option<u64>,

    // Composition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<RefOr<Schema>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<RefOr<Schema>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<RefOr<Schema>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub not: Option<Box<RefOr<Schema>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml: Option<Xml>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl_extensible!(Schema, Xml);

/// Borrowed view of the variant a [`Schema`] represents
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SchemaKind<'a> {
    /// `number` or `integer`
    Number { integer: bool },
    String,
    Boolean,
    Array { items: Option<&'a RefOr<Schema>> },
    Object { properties: Option<&'a Map<RefOr<Schema>>> },
    AllOf(&'a [RefOr<Schema>]),
    AnyOf(&'a [RefOr<Schema>]),
    OneOf(&'a [RefOr<Schema>]),
    Not(&'a RefOr<Schema>),
    /// No type and no composition: any value
    Any,
}

impl Schema {
    /// Create a new empty schema
    pub fn new() -> Self {
        Self::default()
    }

    fn typed(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Default::default()
        }
    }

    /// Create a string schema
    pub fn string() -> Self {
        Self::typed(SchemaType::String)
    }

    /// Create a number schema
    pub fn number() -> Self {
        Self::typed(SchemaType::Number)
    }

    /// Create an integer schema
    pub fn integer() -> Self {
        Self::typed(SchemaType::Integer)
    }

    /// Create a boolean schema
    pub fn boolean() -> Self {
        Self::typed(SchemaType::Boolean)
    }

    /// Create an array schema
    pub fn array(items: impl Into<RefOr<Schema>>) -> Self {
        Self {
            items: Some(Box::new(items.into())),
            ..Self::typed(SchemaType::Array)
        }
    }

    /// Create an object schema
    pub fn object() -> Self {
        Self::typed(SchemaType::Object)
    }

    /// Schema matching all of the given schemas
    pub fn all_of(schemas: Vec<RefOr<Schema>>) -> Self {
        Self {
            all_of: Some(schemas),
            ..Default::default()
        }
    }

    /// Schema matching at least one of the given schemas
    pub fn any_of(schemas: Vec<RefOr<Schema>>) -> Self {
        Self {
            any_of: Some(schemas),
            ..Default::default()
        }
    }

    /// Schema matching exactly one of the given schemas
    pub fn one_of(schemas: Vec<RefOr<Schema>>) -> Self {
        Self {
            one_of: Some(schemas),
            ..Default::default()
        }
    }

    /// Schema matching anything the given schema does not
    pub fn not(schema: impl Into<RefOr<Schema>>) -> Self {
        Self {
            not: Some(Box::new(schema.into())),
            ..Default::default()
        }
    }

    /// Reference to a schema
    ///
    /// A bare name points at `#/components/schemas/<name>`; anything
    /// containing `#` or `/` is used as the `$ref` unchanged.
    pub fn reference(name: &str) -> RefOr<Schema> {
        if name.contains('#') || name.contains('/') {
            RefOr::reference(name)
        } else {
            RefOr::reference(ComponentKind::Schemas.reference_path(name))
        }
    }

    /// Make this schema nullable
    pub fn nullable(mut self) -> Self {
        self.nullable = Some(true);
        self
    }

    /// Add a title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a format
    pub fn with_format(mut self, format: impl Into<DataFormat>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Add a property to an object schema
    pub fn with_property(mut self, name: impl Into<String>, schema: impl Into<RefOr<Schema>>) -> Self {
        self.properties
            .get_or_insert_with(Map::new)
            .insert(name.into(), schema.into());
        self
    }

    /// Add a required property
    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        let required = self.required.get_or_insert_with(Vec::new);
        if !required.contains(&name) {
            required.push(name);
        }
        self
    }

    /// Set `additionalProperties`
    pub fn with_additional_properties(mut self, additional: AdditionalProperties) -> Self {
        self.additional_properties = Some(additional);
        self
    }

    /// Restrict to the given values
    pub fn with_enum(mut self, values: Vec<Value>) -> Self {
        self.enum_values = Some(values);
        self
    }

    /// Add an example
    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }

    /// Add a default value
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Inclusive lower bound
    pub fn with_minimum(mut self, minimum: impl Into<Number>) -> Self {
        self.minimum = Some(minimum.into());
        self
    }

    /// Inclusive upper bound
    pub fn with_maximum(mut self, maximum: impl Into<Number>) -> Self {
        self.maximum = Some(maximum.into());
        self
    }

    /// Length bounds for strings
    pub fn with_length(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    /// Regular expression for strings
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Mark as read-only
    pub fn read_only(mut self) -> Self {
        self.read_only = Some(true);
        self
    }

    /// Mark as write-only
    pub fn write_only(mut self) -> Self {
        self.write_only = Some(true);
        self
    }

    /// Whether `null` is allowed
    pub fn is_nullable(&self) -> bool {
        self.nullable.unwrap_or(false)
    }

    /// Whether a property is listed in `required`
    pub fn is_required(&self, property: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|r| r.iter().any(|p| p == property))
    }

    /// Schema of a property
    pub fn property(&self, name: &str) -> Option<&RefOr<Schema>> {
        self.properties.as_ref()?.get(name)
    }

    /// Which variant of the schema union this is
    ///
    /// `type` decides when present. Without it, the first composition
    /// keyword found decides (`allOf`, `anyOf`, `oneOf`, then `not`), and
    /// object keywords make an untyped object schema.
    pub fn kind(&self) -> SchemaKind<'_> {
        match self.schema_type {
            Some(SchemaType::Integer) => return SchemaKind::Number { integer: true },
            Some(SchemaType::Number) => return SchemaKind::Number { integer: false },
            Some(SchemaType::String) => return SchemaKind::String,
            Some(SchemaType::Boolean) => return SchemaKind::Boolean,
            Some(SchemaType::Array) => {
                return SchemaKind::Array {
                    items: self.items.as_deref(),
                }
            }
            Some(SchemaType::Object) => {
                return SchemaKind::Object {
                    properties: self.properties.as_ref(),
                }
            }
            None => {}
        }

        if let Some(all) = &self.all_of {
            SchemaKind::AllOf(all)
        } else if let Some(any) = &self.any_of {
            SchemaKind::AnyOf(any)
        } else if let Some(one) = &self.one_of {
            SchemaKind::OneOf(one)
        } else if let Some(not) = &self.not {
            SchemaKind::Not(not)
        } else if self.properties.is_some() || self.additional_properties.is_some() {
            SchemaKind::Object {
                properties: self.properties.as_ref(),
            }
        } else {
            SchemaKind::Any
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_builder_object() {
        let schema = Schema::object()
            .with_title("User")
            .with_property("id", Schema::integer().with_format(DataFormat::Int64))
            .with_property("email", Schema::string().with_format("email"))
            .with_property("nickname", Schema::string().nullable())
            .with_required("id")
            .with_required("id");

        assert_eq!(schema.required, Some(vec!["id".to_string()]));
        assert!(schema.is_required("id"));
        assert!(!schema.is_required("email"));

        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["properties"]["id"]["format"], "int64");
        assert_eq!(json["properties"]["email"]["format"], "email");
        assert_eq!(json["properties"]["nickname"]["nullable"], true);
    }

    #[test]
    fn test_data_format_open_set() {
        assert_eq!(DataFormat::from("date-time"), DataFormat::DateTime);
        assert_eq!(DataFormat::from("uuid"), DataFormat::Other("uuid".to_string()));
        assert_eq!(DataFormat::Other("uuid".to_string()).to_string(), "uuid");

        let schema: Schema = serde_json::from_value(json!({ "type": "string", "format": "binary" })).unwrap();
        assert_eq!(schema.format, Some(DataFormat::Binary));
    }

    #[test]
    fn test_kind_from_type() {
        assert_eq!(Schema::integer().kind(), SchemaKind::Number { integer: true });
        assert_eq!(Schema::number().kind(), SchemaKind::Number { integer: false });
        assert_eq!(Schema::boolean().kind(), SchemaKind::Boolean);

        let array = Schema::array(Schema::string());
        match array.kind() {
            SchemaKind::Array { items: Some(items) } => {
                assert_eq!(items.as_item().unwrap().schema_type, Some(SchemaType::String));
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_kind_without_type() {
        let composed = Schema::one_of(vec![Schema::reference("Cat"), Schema::reference("Dog")]);
        assert!(matches!(composed.kind(), SchemaKind::OneOf(s) if s.len() == 2));

        let negated = Schema::not(Schema::string());
        assert!(matches!(negated.kind(), SchemaKind::Not(_)));

        let untyped_object: Schema =
            serde_json::from_value(json!({ "properties": { "a": { "type": "string" } } })).unwrap();
        assert!(matches!(untyped_object.kind(), SchemaKind::Object { properties: Some(_) }));

        assert_eq!(Schema::new().kind(), SchemaKind::Any);
    }

    #[test]
    fn test_reference_helper() {
        assert_eq!(Schema::reference("Pet").as_ref_str(), Some("#/components/schemas/Pet"));
        assert_eq!(
            Schema::reference("common.yaml#/Pet").as_ref_str(),
            Some("common.yaml#/Pet")
        );
    }

    #[test]
    fn test_numbers_keep_their_representation() {
        let input = json!({
            "type": "integer",
            "minimum": 0,
            "exclusiveMinimum": true,
            "maximum": 10.5,
            "multipleOf": 2
        });
        let schema: Schema = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(schema.exclusive_minimum, Some(true));
        assert_eq!(serde_json::to_value(&schema).unwrap(), input);
    }

    #[test]
    fn test_additional_properties_forms() {
        let schema: Schema = serde_json::from_value(json!({
            "type": "object",
            "additionalProperties": false
        }))
        .unwrap();
        assert_eq!(schema.additional_properties, Some(AdditionalProperties::Bool(false)));

        let schema: Schema = serde_json::from_value(json!({
            "type": "object",
            "additionalProperties": { "$ref": "#/components/schemas/Value" }
        }))
        .unwrap();
        match schema.additional_properties {
            Some(AdditionalProperties::Schema(s)) => assert!(s.is_ref()),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_discriminator_and_xml() {
        let schema: Schema = serde_json::from_value(json!({
            "oneOf": [
                { "$ref": "#/components/schemas/Cat" },
                { "$ref": "#/components/schemas/Dog" }
            ],
            "discriminator": {
                "propertyName": "petType",
                "mapping": { "dog": "#/components/schemas/Dog" }
            },
            "xml": { "name": "animal", "wrapped": true }
        }))
        .unwrap();

        let discriminator = schema.discriminator.as_ref().unwrap();
        assert_eq!(discriminator.property_name, "petType");
        assert_eq!(discriminator.mapping.as_ref().unwrap()["dog"], "#/components/schemas/Dog");
        assert_eq!(schema.xml.as_ref().unwrap().wrapped, Some(true));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result: Result<Schema, _> = serde_json::from_value(json!({ "type": "null" }));
        assert!(result.is_err());
    }
}
