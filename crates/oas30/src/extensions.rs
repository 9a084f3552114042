//! Specification extensions
//!
//! Most OpenAPI objects accept extra fields. The specification reserves the
//! `x-` prefix for them; other unknown keys are kept as well so that no part
//! of a loaded document is dropped.

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};
use std::fmt;

/// Extra fields of an object, in document order
pub type Extensions = indexmap::IndexMap<String, Value>;

/// Prefix reserved for vendor extensions
pub const EXTENSION_PREFIX: &str = "x-";

/// Whether a key is a vendor extension key (`x-...`)
pub fn is_extension_key(key: &str) -> bool {
    key.starts_with(EXTENSION_PREFIX)
}

/// Deserialize a present field as `Some`, so `"example": null` becomes
/// `Some(Value::Null)` instead of `None`. Pair with `#[serde(default)]`.
pub(crate) fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Buffered::deserialize(deserializer).map(|Buffered(value)| Some(value))
}

/// Any loaded value as a [`Value`]
///
/// Unlike `Value` itself this accepts the non-string map keys YAML allows
/// (`200:` under `responses`) and stores them as strings.
pub(crate) struct Buffered(pub(crate) Value);

impl<'de> Deserialize<'de> for Buffered {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(BufferedVisitor).map(Buffered)
    }
}

struct BufferedVisitor;

impl<'de> Visitor<'de> for BufferedVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Number::from_f64(v).map_or(Value::Null, Value::Number))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Buffered::deserialize(deserializer).map(|Buffered(value)| value)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(Buffered(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut object = serde_json::Map::new();
        while let Some(MapKey(key)) = access.next_key()? {
            let Buffered(value) = access.next_value()?;
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}

struct MapKey(String);

impl<'de> Deserialize<'de> for MapKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapKeyVisitor;

        impl<'de> Visitor<'de> for MapKeyVisitor {
            type Value = String;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string, number or boolean map key")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
                Ok(v.to_owned())
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
                Ok(v)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
                Ok(v.to_string())
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
                Ok(v.to_string())
            }
        }

        deserializer.deserialize_any(MapKeyVisitor).map(MapKey)
    }
}

/// Access to the extension map of an OpenAPI object
pub trait Extensible {
    /// All extra fields
    fn extensions(&self) -> &Extensions;

    /// Mutable access to the extra fields
    fn extensions_mut(&mut self) -> &mut Extensions;

    /// Value of a single extra field
    fn extension(&self, key: &str) -> Option<&Value> {
        self.extensions().get(key)
    }

    /// Insert an extra field, returning the previous value
    fn set_extension(&mut self, key: impl Into<String>, value: Value) -> Option<Value>
    where
        Self: Sized,
    {
        self.extensions_mut().insert(key.into(), value)
    }

    /// Only the `x-` prefixed fields
    fn vendor_extensions(&self) -> Box<dyn Iterator<Item = (&String, &Value)> + '_> {
        Box::new(
            self.extensions()
                .iter()
                .filter(|(key, _)| is_extension_key(key)),
        )
    }
}

macro_rules! impl_extensible {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::extensions::Extensible for $ty {
                fn extensions(&self) -> &$crate::extensions::Extensions {
                    &self.extensions
                }

                fn extensions_mut(&mut self) -> &mut $crate::extensions::Extensions {
                    &mut self.extensions
                }
            }
        )*
    };
}

pub(crate) use impl_extensible;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Info, Tag};

    #[test]
    fn extension_keys() {
        assert!(is_extension_key("x-logo"));
        assert!(!is_extension_key("logo"));
        assert!(!is_extension_key("X-logo"));
    }

    #[test]
    fn vendor_extensions_skip_other_keys() {
        let mut tag = Tag::new("pets");
        tag.set_extension("x-display-name", serde_json::json!("Pets"));
        tag.set_extension("legacy", serde_json::json!(true));

        let vendor: Vec<_> = tag.vendor_extensions().map(|(k, _)| k.as_str()).collect();
        assert_eq!(vendor, vec!["x-display-name"]);
        assert_eq!(tag.extension("legacy"), Some(&serde_json::json!(true)));
    }

    #[test]
    fn unknown_fields_land_in_extensions() {
        let info: Info = serde_json::from_value(serde_json::json!({
            "title": "Pets",
            "version": "1.0.0",
            "x-logo": { "url": "https://example.com/logo.png" }
        }))
        .unwrap();

        assert_eq!(
            info.extension("x-logo"),
            Some(&serde_json::json!({ "url": "https://example.com/logo.png" }))
        );
        let round_trip = serde_json::to_value(&info).unwrap();
        assert_eq!(round_trip["x-logo"]["url"], "https://example.com/logo.png");
    }
}
