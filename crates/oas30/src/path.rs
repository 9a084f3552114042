//! Paths, path items, operations and responses

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::content::{RequestBody, Response};
use crate::expression::{self, ExpressionError, RuntimeExpression};
use crate::extensions::{impl_extensible, is_extension_key, Extensions};
use crate::parameter::Parameter;
use crate::reference::RefOr;
use crate::security::SecurityRequirement;
use crate::spec::{ExternalDocs, Server};
use crate::Map;

/// HTTP methods a path item can bind an operation to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// All methods in the order the specification lists them
    pub const ALL: [HttpMethod; 8] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Delete,
        HttpMethod::Options,
        HttpMethod::Head,
        HttpMethod::Patch,
        HttpMethod::Trace,
    ];

    /// Field name in a path item
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Put => "put",
            Self::Post => "post",
            Self::Delete => "delete",
            Self::Options => "options",
            Self::Head => "head",
            Self::Patch => "patch",
            Self::Trace => "trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Delete => http::Method::DELETE,
            HttpMethod::Options => http::Method::OPTIONS,
            HttpMethod::Head => http::Method::HEAD,
            HttpMethod::Patch => http::Method::PATCH,
            HttpMethod::Trace => http::Method::TRACE,
        }
    }
}

impl TryFrom<&http::Method> for HttpMethod {
    type Error = UnknownMethod;

    fn try_from(method: &http::Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

/// A method name OpenAPI 3.0 has no path item field for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl fmt::Display for UnknownMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported HTTP method: \"{}\"", self.0)
    }
}

impl std::error::Error for UnknownMethod {}

/// Paths Object: relative paths to their path items
///
/// Keys start with `/` and may contain `{parameter}` templates. `x-` keys
/// are kept as extensions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paths {
    /// Path items by path template
    pub paths: Map<PathItem>,

    /// Specification extensions
    pub extensions: Extensions,

    order: KeyOrder<String>,
}

impl Paths {
    /// Create empty paths
    pub fn new() -> Self {
        Self::default()
    }

    /// Path item for a path template
    pub fn get(&self, path: &str) -> Option<&PathItem> {
        self.paths.get(path)
    }

    /// Insert a path item, returning the one it replaces
    pub fn insert(&mut self, path: impl Into<String>, item: PathItem) -> Option<PathItem> {
        self.paths.insert(path.into(), item)
    }

    /// Iterate path items in document order
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, PathItem> {
        self.paths.iter()
    }

    /// Number of paths
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no path is defined
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Serialize for Paths {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_in_order(serializer, &self.order, &self.paths, &self.extensions)
    }
}

/// Keys of a map whose entries are split across several fields, in the
/// order they were loaded
///
/// Maps with the same entries compare equal whatever their order, as
/// `IndexMap` does.
#[derive(Debug, Clone)]
struct KeyOrder<K>(Vec<K>);

impl<K> Default for KeyOrder<K> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<K> PartialEq for KeyOrder<K> {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

/// Write loaded keys in their recorded order, then the ones added since
fn serialize_in_order<S, V>(
    serializer: S,
    order: &KeyOrder<String>,
    entries: &Map<V>,
    extensions: &Extensions,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    let mut map = serializer.serialize_map(Some(entries.len() + extensions.len()))?;
    let mut written = HashSet::new();
    for key in &order.0 {
        if !written.insert(key.as_str()) {
            continue;
        }
        if let Some(item) = entries.get(key) {
            map.serialize_entry(key, item)?;
        } else if let Some(value) = extensions.get(key) {
            map.serialize_entry(key, value)?;
        }
    }
    for (key, item) in entries {
        if written.insert(key.as_str()) {
            map.serialize_entry(key, item)?;
        }
    }
    for (key, value) in extensions {
        if written.insert(key.as_str()) {
            map.serialize_entry(key, value)?;
        }
    }
    map.end()
}

impl<'de> Deserialize<'de> for Paths {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PathsVisitor;

        impl<'de> Visitor<'de> for PathsVisitor {
            type Value = Paths;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of paths to path items")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Paths, A::Error> {
                let mut paths = Paths::new();
                while let Some(key) = access.next_key::<String>()? {
                    paths.order.0.push(key.clone());
                    if is_extension_key(&key) {
                        let value = access.next_value()?;
                        paths.extensions.insert(key, value);
                    } else {
                        let item = access.next_value()?;
                        paths.paths.insert(key, item);
                    }
                }
                Ok(paths)
            }
        }

        deserializer.deserialize_map(PathsVisitor)
    }
}

impl<'a> IntoIterator for &'a Paths {
    type Item = (&'a String, &'a PathItem);
    type IntoIter = indexmap::map::Iter<'a, String, PathItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

/// Path Item Object: the operations available on a single path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// External definition of this path item
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Summary for all operations in this path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Description for all operations in this path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,

    /// Servers overriding the document servers for this path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,

    /// Parameters shared by all operations of this path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<RefOr<Parameter>>>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl PathItem {
    /// Create an empty path item
    pub fn new() -> Self {
        Self::default()
    }

    /// Path item that only points at an external definition
    pub fn reference(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Default::default()
        }
    }

    /// Operation bound to a method
    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        self.slot(method).as_ref()
    }

    /// Mutable operation bound to a method
    pub fn operation_mut(&mut self, method: HttpMethod) -> Option<&mut Operation> {
        self.slot_mut(method).as_mut()
    }

    /// Bind an operation to a method, returning the one it replaces
    pub fn set_operation(&mut self, method: HttpMethod, operation: Operation) -> Option<Operation> {
        self.slot_mut(method).replace(operation)
    }

    /// Remove the operation bound to a method
    pub fn remove_operation(&mut self, method: HttpMethod) -> Option<Operation> {
        self.slot_mut(method).take()
    }

    /// Builder form of [`PathItem::set_operation`]
    pub fn with_operation(mut self, method: HttpMethod, operation: Operation) -> Self {
        self.set_operation(method, operation);
        self
    }

    /// Add a path-level parameter
    pub fn parameter(mut self, parameter: impl Into<RefOr<Parameter>>) -> Self {
        self.parameters
            .get_or_insert_with(Vec::new)
            .push(parameter.into());
        self
    }

    /// Defined operations in method order
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> + '_ {
        HttpMethod::ALL
            .into_iter()
            .filter_map(move |method| self.operation(method).map(|op| (method, op)))
    }

    /// Parameters that apply to the operation bound to `method`
    ///
    /// Path-level parameters come first, minus those the operation
    /// redefines with the same name and location. `$ref` parameters cannot
    /// be compared without resolving them and are always kept.
    pub fn parameters_for(&self, method: HttpMethod) -> Vec<&RefOr<Parameter>> {
        let op_params: &[RefOr<Parameter>] = self
            .operation(method)
            .and_then(|op| op.parameters.as_deref())
            .unwrap_or_default();
        let path_params: &[RefOr<Parameter>] = self.parameters.as_deref().unwrap_or_default();

        let overridden = |p: &Parameter| {
            op_params.iter().filter_map(RefOr::as_item).any(|o| o.same_identity(p))
        };

        path_params
            .iter()
            .filter(|p| p.as_item().map_or(true, |p| !overridden(p)))
            .chain(op_params.iter())
            .collect()
    }

    fn slot(&self, method: HttpMethod) -> &Option<Operation> {
        match method {
            HttpMethod::Get => &self.get,
            HttpMethod::Put => &self.put,
            HttpMethod::Post => &self.post,
            HttpMethod::Delete => &self.delete,
            HttpMethod::Options => &self.options,
            HttpMethod::Head => &self.head,
            HttpMethod::Patch => &self.patch,
            HttpMethod::Trace => &self.trace,
        }
    }

    fn slot_mut(&mut self, method: HttpMethod) -> &mut Option<Operation> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Options => &mut self.options,
            HttpMethod::Head => &mut self.head,
            HttpMethod::Patch => &mut self.patch,
            HttpMethod::Trace => &mut self.trace,
        }
    }
}

/// Operation (endpoint) on a path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Tags for grouping
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Short summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Verbose explanation; CommonMark allowed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Additional external documentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,

    /// Unique identifier among all operations of the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    /// Operation parameters; override path-level ones with the same name and location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<RefOr<Parameter>>>,

    /// Request body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RefOr<RequestBody>>,

    /// Possible responses
    pub responses: Responses,

    /// Out-of-band callbacks keyed by a unique name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callbacks: Option<Map<RefOr<Callback>>>,

    /// Whether the operation is deprecated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    /// Security requirements overriding the document-level ones.
    /// An empty list removes the top-level requirement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,

    /// Servers overriding path and document servers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,

    /// Specification extensions
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Operation {
    /// Create a new operation
    pub fn new() -> Self {
        Self::default()
    }

    /// Set summary
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set description
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Add a tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.get_or_insert_with(Vec::new).push(tag.into());
        self
    }

    /// Set operation ID
    pub fn operation_id(mut self, id: impl Into<String>) -> Self {
        self.operation_id = Some(id.into());
        self
    }

    /// Set external documentation
    pub fn external_docs(mut self, docs: ExternalDocs) -> Self {
        self.external_docs = Some(docs);
        self
    }

    /// Add a parameter
    pub fn parameter(mut self, parameter: impl Into<RefOr<Parameter>>) -> Self {
        self.parameters
            .get_or_insert_with(Vec::new)
            .push(parameter.into());
        self
    }

    /// Set request body
    pub fn request_body(mut self, body: impl Into<RefOr<RequestBody>>) -> Self {
        self.request_body = Some(body.into());
        self
    }

    /// Add a response for an exact status code
    pub fn response(mut self, code: u16, response: impl Into<RefOr<Response>>) -> Self {
        self.responses
            .responses
            .insert(StatusCode::Code(code), response.into());
        self
    }

    /// Add a response for a status class such as `4XX`
    pub fn response_range(mut self, class: u8, response: impl Into<RefOr<Response>>) -> Self {
        self.responses
            .responses
            .insert(StatusCode::Range(class), response.into());
        self
    }

    /// Set the response for undeclared status codes
    pub fn default_response(mut self, response: impl Into<RefOr<Response>>) -> Self {
        self.responses.default = Some(response.into());
        self
    }

    /// Add a callback
    pub fn callback(mut self, name: impl Into<String>, callback: impl Into<RefOr<Callback>>) -> Self {
        self.callbacks
            .get_or_insert_with(Map::new)
            .insert(name.into(), callback.into());
        self
    }

    /// Mark as deprecated
    pub fn deprecated(mut self) -> Self {
        self.deprecated = Some(true);
        self
    }

    /// Add a security requirement
    pub fn security_requirement(mut self, name: impl Into<String>, scopes: Vec<String>) -> Self {
        let mut req = SecurityRequirement::new();
        req.insert(name.into(), scopes);
        self.security.get_or_insert_with(Vec::new).push(req);
        self
    }

    /// Add a server
    pub fn server(mut self, server: Server) -> Self {
        self.servers.get_or_insert_with(Vec::new).push(server);
        self
    }

    /// Whether the operation is declared deprecated
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.unwrap_or(false)
    }
}

/// Responses Object: expected responses by status code
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Responses {
    /// Response for status codes not declared individually
    pub default: Option<RefOr<Response>>,

    /// Responses by status code or status class
    pub responses: indexmap::IndexMap<StatusCode, RefOr<Response>>,

    /// Specification extensions
    pub extensions: Extensions,

    order: KeyOrder<ResponsesKey>,
}

impl Responses {
    /// Create empty responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Response that applies to a concrete status code
    ///
    /// An exact code wins over its class (`2XX`), which wins over `default`.
    pub fn for_status(&self, code: u16) -> Option<&RefOr<Response>> {
        self.responses
            .get(&StatusCode::Code(code))
            .or_else(|| {
                let class = u8::try_from(code / 100).ok()?;
                self.responses.get(&StatusCode::Range(class))
            })
            .or(self.default.as_ref())
    }

    /// Whether nothing is declared
    pub fn is_empty(&self) -> bool {
        self.default.is_none() && self.responses.is_empty()
    }
}

impl Serialize for Responses {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.responses.len() + self.extensions.len() + usize::from(self.default.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        let mut default_written = false;
        let mut codes = HashSet::new();
        let mut keys = HashSet::new();

        for key in &self.order.0 {
            match key {
                ResponsesKey::Default => {
                    if let (Some(default), false) = (&self.default, default_written) {
                        map.serialize_entry("default", default)?;
                    }
                    default_written = true;
                }
                ResponsesKey::Status(code) => {
                    if let (Some(response), true) = (self.responses.get(code), codes.insert(*code)) {
                        map.serialize_entry(code, response)?;
                    }
                }
                ResponsesKey::Extension(key) => {
                    if let (Some(value), true) = (self.extensions.get(key), keys.insert(key.as_str())) {
                        map.serialize_entry(key, value)?;
                    }
                }
            }
        }

        for (code, response) in &self.responses {
            if codes.insert(*code) {
                map.serialize_entry(code, response)?;
            }
        }
        if let (Some(default), false) = (&self.default, default_written) {
            map.serialize_entry("default", default)?;
        }
        for (key, value) in &self.extensions {
            if keys.insert(key.as_str()) {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

#[derive(Debug, Clone)]
enum ResponsesKey {
    Default,
    Status(StatusCode),
    Extension(String),
}

impl<'de> Deserialize<'de> for ResponsesKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = ResponsesKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("`default`, an HTTP status code, a status class like `2XX` or an `x-` extension")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<ResponsesKey, E> {
                if v == "default" {
                    Ok(ResponsesKey::Default)
                } else if is_extension_key(v) {
                    Ok(ResponsesKey::Extension(v.to_string()))
                } else {
                    v.parse().map(ResponsesKey::Status).map_err(E::custom)
                }
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<ResponsesKey, E> {
                StatusCode::from_number(v)
                    .map(ResponsesKey::Status)
                    .map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<ResponsesKey, E> {
                let v = u64::try_from(v).map_err(|_| E::custom(StatusCodeError::OutOfRange))?;
                self.visit_u64(v)
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

impl<'de> Deserialize<'de> for Responses {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ResponsesVisitor;

        impl<'de> Visitor<'de> for ResponsesVisitor {
            type Value = Responses;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of status codes to responses")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Responses, A::Error> {
                let mut responses = Responses::new();
                while let Some(key) = access.next_key::<ResponsesKey>()? {
                    responses.order.0.push(key.clone());
                    match key {
                        ResponsesKey::Default => {
                            if responses.default.is_some() {
                                return Err(de::Error::custom("duplicate response key `default`"));
                            }
                            responses.default = Some(access.next_value()?);
                        }
                        ResponsesKey::Status(code) => {
                            if responses.responses.contains_key(&code) {
                                return Err(de::Error::custom(format_args!(
                                    "duplicate response key `{}`",
                                    code
                                )));
                            }
                            let response = access.next_value()?;
                            responses.responses.insert(code, response);
                        }
                        ResponsesKey::Extension(key) => {
                            let value = access.next_value()?;
                            responses.extensions.insert(key, value);
                        }
                    }
                }
                Ok(responses)
            }
        }

        deserializer.deserialize_map(ResponsesVisitor)
    }
}

/// Key of the responses map
///
/// Class keys parse case-insensitively (`4xx`, `4XX`) and always print in
/// upper case, so `4xx` is saved as `4XX`. A responses map holding both
/// spellings is rejected as a duplicate key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusCode {
    /// A single code such as `404`
    Code(u16),
    /// A class of codes: `Range(4)` is `4XX`
    Range(u8),
}

impl StatusCode {
    fn from_number(n: u64) -> Result<Self, StatusCodeError> {
        match u16::try_from(n) {
            Ok(code @ 100..=599) => Ok(Self::Code(code)),
            _ => Err(StatusCodeError::OutOfRange),
        }
    }

    /// Whether a concrete status code falls under this key
    pub fn matches(&self, code: u16) -> bool {
        match *self {
            Self::Code(c) => c == code,
            Self::Range(class) => code / 100 == u16::from(class),
        }
    }

    /// The matching `http` status code for single codes
    pub fn as_http(&self) -> Option<http::StatusCode> {
        match *self {
            Self::Code(code) => http::StatusCode::from_u16(code).ok(),
            Self::Range(_) => None,
        }
    }

    /// Canonical reason phrase for single codes
    pub fn canonical_reason(&self) -> Option<&'static str> {
        self.as_http()?.canonical_reason()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "{}", code),
            Self::Range(class) => write!(f, "{}XX", class),
        }
    }
}

impl FromStr for StatusCode {
    type Err = StatusCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 3 {
            return Err(StatusCodeError::InvalidFormat(s.to_string()));
        }

        if bytes[1].eq_ignore_ascii_case(&b'X') && bytes[2].eq_ignore_ascii_case(&b'X') {
            return match bytes[0] {
                b'1'..=b'5' => Ok(Self::Range(bytes[0] - b'0')),
                _ => Err(StatusCodeError::OutOfRange),
            };
        }

        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(StatusCodeError::InvalidFormat(s.to_string()));
        }
        s.parse::<u64>()
            .map_err(|_| StatusCodeError::InvalidFormat(s.to_string()))
            .and_then(Self::from_number)
    }
}

impl From<http::StatusCode> for StatusCode {
    fn from(code: http::StatusCode) -> Self {
        Self::Code(code.as_u16())
    }
}

impl Serialize for StatusCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StatusCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match ResponsesKey::deserialize(deserializer)? {
            ResponsesKey::Status(code) => Ok(code),
            ResponsesKey::Default => Err(de::Error::custom("`default` is not a status code")),
            ResponsesKey::Extension(key) => Err(de::Error::custom(StatusCodeError::InvalidFormat(key))),
        }
    }
}

/// Error type for status code keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusCodeError {
    /// Not three digits or `<digit>XX`
    InvalidFormat(String),
    /// Outside 100..=599 or the 1XX..5XX classes
    OutOfRange,
}

impl fmt::Display for StatusCodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "invalid status code key: \"{}\"", s),
            Self::OutOfRange => write!(f, "status code out of range"),
        }
    }
}

impl std::error::Error for StatusCodeError {}

/// Callback Object: out-of-band requests the API may initiate
///
/// Keys are runtime expressions, possibly embedded in a URL
/// (`{$request.body#/callbackUrl}`), that evaluate to the callback URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Callback {
    /// Path items by expression
    pub expressions: Map<PathItem>,

    /// Specification extensions
    pub extensions: Extensions,

    order: KeyOrder<String>,
}

impl Callback {
    /// Create an empty callback
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path item for an expression
    pub fn expression(mut self, expression: impl Into<String>, item: PathItem) -> Self {
        self.expressions.insert(expression.into(), item);
        self
    }

    /// Parse the runtime expressions used by the callback keys
    pub fn runtime_expressions(&self) -> Result<Vec<RuntimeExpression>, ExpressionError> {
        let mut out = Vec::new();
        for key in self.expressions.keys() {
            if key.starts_with('$') {
                out.push(key.parse()?);
            } else {
                out.extend(expression::extract_embedded(key)?);
            }
        }
        Ok(out)
    }
}

impl Serialize for Callback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_in_order(serializer, &self.order, &self.expressions, &self.extensions)
    }
}

impl<'de> Deserialize<'de> for Callback {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CallbackVisitor;

        impl<'de> Visitor<'de> for CallbackVisitor {
            type Value = Callback;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of expressions to path items")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Callback, A::Error> {
                let mut callback = Callback::new();
                while let Some(key) = access.next_key::<String>()? {
                    callback.order.0.push(key.clone());
                    if is_extension_key(&key) {
                        let value = access.next_value()?;
                        callback.extensions.insert(key, value);
                    } else {
                        let item = access.next_value()?;
                        callback.expressions.insert(key, item);
                    }
                }
                Ok(callback)
            }
        }

        deserializer.deserialize_map(CallbackVisitor)
    }
}

impl_extensible!(Paths, PathItem, Operation, Responses, Callback);

/// Error in a path template such as `/users/{id}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathTemplateError {
    /// Path must start with '/'
    MustStartWithSlash { path: String },
    /// `{` inside a parameter
    NestedBraces { path: String, position: usize },
    /// `}` without a matching `{`
    UnmatchedClosingBrace { path: String, position: usize },
    /// `{}`
    EmptyParameterName { path: String, position: usize },
    /// `{` never closed
    UnclosedBrace { path: String },
}

impl fmt::Display for PathTemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MustStartWithSlash { path } => {
                write!(f, "path must start with '/', got: \"{}\"", path)
            }
            Self::NestedBraces { path, position } => {
                write!(f, "nested braces at position {} in path: \"{}\"", position, path)
            }
            Self::UnmatchedClosingBrace { path, position } => {
                write!(f, "unmatched closing brace '}}' at position {} in path: \"{}\"", position, path)
            }
            Self::EmptyParameterName { path, position } => {
                write!(f, "empty parameter name '{{}}' at position {} in path: \"{}\"", position, path)
            }
            Self::UnclosedBrace { path } => {
                write!(f, "unclosed brace '{{' in path: \"{}\"", path)
            }
        }
    }
}

impl std::error::Error for PathTemplateError {}

/// Names of the `{parameters}` in a path template, in order
///
/// ```
/// use oas30::template_parameters;
///
/// assert_eq!(
///     template_parameters("/users/{userId}/posts/{postId}").unwrap(),
///     vec!["userId", "postId"]
/// );
/// assert!(template_parameters("/users/{").is_err());
/// ```
pub fn template_parameters(path: &str) -> Result<Vec<&str>, PathTemplateError> {
    if !path.starts_with('/') {
        return Err(PathTemplateError::MustStartWithSlash {
            path: path.to_string(),
        });
    }

    let mut names = Vec::new();
    let mut param_start: Option<usize> = None;

    for (i, ch) in path.char_indices() {
        match ch {
            '{' => {
                if param_start.is_some() {
                    return Err(PathTemplateError::NestedBraces {
                        path: path.to_string(),
                        position: i,
                    });
                }
                param_start = Some(i);
            }
            '}' => {
                let Some(start) = param_start.take() else {
                    return Err(PathTemplateError::UnmatchedClosingBrace {
                        path: path.to_string(),
                        position: i,
                    });
                };
                let name = &path[start + 1..i];
                if name.is_empty() {
                    return Err(PathTemplateError::EmptyParameterName {
                        path: path.to_string(),
                        position: start,
                    });
                }
                names.push(name);
            }
            _ => {}
        }
    }

    if param_start.is_some() {
        return Err(PathTemplateError::UnclosedBrace {
            path: path.to_string(),
        });
    }

    Ok(names)
}
