//! `$ref` objects and the reference-or-value wrapper

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};

use crate::components::ComponentKind;
use crate::extensions::{Buffered, Extensions};

const LOCAL_COMPONENTS_PREFIX: &str = "#/components/";

/// Reference Object
///
/// A `$ref` pointing at another component, in this document or elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    /// The reference string, e.g. `#/components/schemas/Pet`
    #[serde(rename = "$ref")]
    pub reference: String,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Reference {
    /// Create a reference from a raw `$ref` string
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            extensions: Extensions::new(),
        }
    }

    /// Create a local reference to a named component
    pub fn component(kind: ComponentKind, name: &str) -> Self {
        Self::new(kind.reference_path(name))
    }

    /// Whether this reference points into the same document
    pub fn is_local(&self) -> bool {
        self.reference.starts_with('#')
    }

    /// Name of the referenced component for local `#/components/...` references
    pub fn component_name(&self) -> Option<&str> {
        let rest = self.reference.strip_prefix(LOCAL_COMPONENTS_PREFIX)?;
        let (_, name) = rest.split_once('/')?;
        if name.is_empty() || name.contains('/') {
            return None;
        }
        Some(name)
    }

    /// Kind of the referenced component for local `#/components/...` references
    pub fn component_kind(&self) -> Option<ComponentKind> {
        let rest = self.reference.strip_prefix(LOCAL_COMPONENTS_PREFIX)?;
        let (kind, _) = rest.split_once('/')?;
        kind.parse().ok()
    }
}

/// Either a `$ref` or an inline value
///
/// Most places in an OpenAPI document that accept an object also accept a
/// Reference Object in its place. An object with a `$ref` key is a
/// reference; anything else must be a valid `T`, and its error is reported
/// as is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    /// A `$ref` to a value defined elsewhere
    Ref(Reference),
    /// The value itself
    Item(T),
}

impl<T> RefOr<T> {
    /// Create a `$ref` from a raw reference string
    pub fn reference(reference: impl Into<String>) -> Self {
        Self::Ref(Reference::new(reference))
    }

    /// The inline value, if this is not a reference
    pub fn as_item(&self) -> Option<&T> {
        match self {
            Self::Item(item) => Some(item),
            Self::Ref(_) => None,
        }
    }

    /// Mutable access to the inline value
    pub fn as_item_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Item(item) => Some(item),
            Self::Ref(_) => None,
        }
    }

    /// The `$ref` string, if this is a reference
    pub fn as_ref_str(&self) -> Option<&str> {
        match self {
            Self::Ref(r) => Some(&r.reference),
            Self::Item(_) => None,
        }
    }

    /// Consume and return the inline value
    pub fn into_item(self) -> Option<T> {
        match self {
            Self::Item(item) => Some(item),
            Self::Ref(_) => None,
        }
    }

    /// Whether this is a `$ref`
    pub fn is_ref(&self) -> bool {
        matches!(self, Self::Ref(_))
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for RefOr<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Buffered(value) = Buffered::deserialize(deserializer)?;
        let is_ref = value
            .as_object()
            .is_some_and(|object| object.contains_key("$ref"));

        if is_ref {
            Reference::deserialize(value)
                .map(Self::Ref)
                .map_err(de::Error::custom)
        } else {
            T::deserialize(value)
                .map(Self::Item)
                .map_err(de::Error::custom)
        }
    }
}

impl<T> From<T> for RefOr<T> {
    fn from(item: T) -> Self {
        Self::Item(item)
    }
}
