//! Components Object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::content::{Example, Link, RequestBody, Response};
use crate::extensions::{impl_extensible, Extensions};
use crate::parameter::{Header, Parameter};
use crate::path::Callback;
use crate::reference::RefOr;
use crate::schema::Schema;
use crate::security::SecurityScheme;
use crate::Map;

/// Reusable objects of a document
///
/// Nothing defined here affects the API unless it is referenced from
/// outside the components object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<Map<RefOr<Schema>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses: Option<Map<RefOr<Response>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<RefOr<Parameter>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Map<RefOr<Example>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_bodies: Option<Map<RefOr<RequestBody>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Map<RefOr<Header>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_schemes: Option<Map<RefOr<SecurityScheme>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Map<RefOr<Link>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub callbacks: Option<Map<RefOr<Callback>>>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl_extensible!(Components);

impl Components {
    /// Create empty components
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether no component of any kind is defined
    pub fn is_empty(&self) -> bool {
        fn none_or_empty<V>(map: &Option<Map<V>>) -> bool {
            map.as_ref().map_or(true, |m| m.is_empty())
        }

        none_or_empty(&self.schemas)
            && none_or_empty(&self.responses)
            && none_or_empty(&self.parameters)
            && none_or_empty(&self.examples)
            && none_or_empty(&self.request_bodies)
            && none_or_empty(&self.headers)
            && none_or_empty(&self.security_schemes)
            && none_or_empty(&self.links)
            && none_or_empty(&self.callbacks)
    }

    /// Names defined for one kind of component, in document order
    pub fn names(&self, kind: ComponentKind) -> Vec<&str> {
        fn keys<V>(map: &Option<Map<V>>) -> Vec<&str> {
            map.iter().flat_map(|m| m.keys().map(String::as_str)).collect()
        }

        match kind {
            ComponentKind::Schemas => keys(&self.schemas),
            ComponentKind::Responses => keys(&self.responses),
            ComponentKind::Parameters => keys(&self.parameters),
            ComponentKind::Examples => keys(&self.examples),
            ComponentKind::RequestBodies => keys(&self.request_bodies),
            ComponentKind::Headers => keys(&self.headers),
            ComponentKind::SecuritySchemes => keys(&self.security_schemes),
            ComponentKind::Links => keys(&self.links),
            ComponentKind::Callbacks => keys(&self.callbacks),
        }
    }

    /// Local `$ref` path for a component
    pub fn reference_path(kind: ComponentKind, name: &str) -> String {
        kind.reference_path(name)
    }
}

/// The sections of the components object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Schemas,
    Responses,
    Parameters,
    Examples,
    RequestBodies,
    Headers,
    SecuritySchemes,
    Links,
    Callbacks,
}

impl ComponentKind {
    /// All kinds in the order they appear in the specification
    pub const ALL: [ComponentKind; 9] = [
        ComponentKind::Schemas,
        ComponentKind::Responses,
        ComponentKind::Parameters,
        ComponentKind::Examples,
        ComponentKind::RequestBodies,
        ComponentKind::Headers,
        ComponentKind::SecuritySchemes,
        ComponentKind::Links,
        ComponentKind::Callbacks,
    ];

    /// Field name in the components object
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Schemas => "schemas",
            Self::Responses => "responses",
            Self::Parameters => "parameters",
            Self::Examples => "examples",
            Self::RequestBodies => "requestBodies",
            Self::Headers => "headers",
            Self::SecuritySchemes => "securitySchemes",
            Self::Links => "links",
            Self::Callbacks => "callbacks",
        }
    }

    /// `#/components/<kind>/<name>`
    pub fn reference_path(&self, name: &str) -> String {
        format!("#/components/{}/{}", self.as_str(), name)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_path() {
        assert_eq!(
            Components::reference_path(ComponentKind::RequestBodies, "NewPet"),
            "#/components/requestBodies/NewPet"
        );
    }

    #[test]
    fn test_kind_parse() {
        for kind in ComponentKind::ALL {
            assert_eq!(kind.as_str().parse::<ComponentKind>(), Ok(kind));
        }
        assert!("definitions".parse::<ComponentKind>().is_err());
    }

    #[test]
    fn test_names_and_emptiness() {
        let mut components = Components::new();
        assert!(components.is_empty());

        components.schemas = Some(Map::from_iter([
            ("Pet".to_string(), RefOr::Item(Schema::object())),
            ("Error".to_string(), RefOr::Item(Schema::object())),
        ]));
        assert!(!components.is_empty());
        assert_eq!(components.names(ComponentKind::Schemas), vec!["Pet", "Error"]);
        assert!(components.names(ComponentKind::Links).is_empty());
    }

    #[test]
    fn test_deserialize_camel_case_sections() {
        let components: Components = serde_json::from_value(serde_json::json!({
            "requestBodies": {
                "Pet": { "$ref": "#/components/requestBodies/Other" }
            },
            "securitySchemes": {
                "api_key": { "type": "apiKey", "name": "api_key", "in": "header" }
            }
        }))
        .unwrap();

        assert_eq!(components.names(ComponentKind::RequestBodies), vec!["Pet"]);
        assert_eq!(components.names(ComponentKind::SecuritySchemes), vec!["api_key"]);
    }
}
