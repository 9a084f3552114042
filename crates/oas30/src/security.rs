//! Security Scheme and Security Requirement Objects

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extensions::{impl_extensible, Extensible, Extensions};
use crate::Map;

/// Security schemes that apply to an operation
///
/// Each key names a scheme declared in `components.securitySchemes`. The
/// value lists the scopes required for `oauth2`/`openIdConnect` and must be
/// empty for the other scheme types. All schemes of one requirement must be
/// satisfied together.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Location of an API key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Query,
    Header,
    Cookie,
}

impl fmt::Display for ApiKeyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Query => "query",
            Self::Header => "header",
            Self::Cookie => "cookie",
        })
    }
}

/// `apiKey` scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyScheme {
    /// Name of the header, query or cookie parameter
    pub name: String,

    #[serde(rename = "in")]
    pub location: ApiKeyLocation,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// `http` scheme (RFC 7235)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpScheme {
    /// Authorization scheme name, e.g. `basic` or `bearer`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    /// Hint for how bearer tokens are formatted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// `oauth2` scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuth2Scheme {
    pub flows: OAuthFlows,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// `openIdConnect` scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenIdConnectScheme {
    /// OpenID Connect discovery URL
    pub open_id_connect_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Security Scheme Object, discriminated by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SecurityScheme {
    #[serde(rename = "apiKey")]
    ApiKey(ApiKeyScheme),
    #[serde(rename = "http")]
    Http(HttpScheme),
    #[serde(rename = "oauth2")]
    OAuth2(OAuth2Scheme),
    #[serde(rename = "openIdConnect")]
    OpenIdConnect(OpenIdConnectScheme),
}

impl SecurityScheme {
    /// Create an API key security scheme
    pub fn api_key(name: impl Into<String>, location: ApiKeyLocation) -> Self {
        Self::ApiKey(ApiKeyScheme {
            name: name.into(),
            location,
            description: None,
            extensions: Extensions::new(),
        })
    }

    /// Create a bearer token security scheme
    pub fn bearer(format: impl Into<String>) -> Self {
        Self::Http(HttpScheme {
            scheme: Some("bearer".to_string()),
            bearer_format: Some(format.into()),
            description: None,
            extensions: Extensions::new(),
        })
    }

    /// Create a basic auth security scheme
    pub fn basic() -> Self {
        Self::Http(HttpScheme {
            scheme: Some("basic".to_string()),
            bearer_format: None,
            description: None,
            extensions: Extensions::new(),
        })
    }

    /// Create an OAuth2 security scheme
    pub fn oauth2(flows: OAuthFlows) -> Self {
        Self::OAuth2(OAuth2Scheme {
            flows,
            description: None,
            extensions: Extensions::new(),
        })
    }

    /// Create an OpenID Connect security scheme
    pub fn openid_connect(url: impl Into<String>) -> Self {
        Self::OpenIdConnect(OpenIdConnectScheme {
            open_id_connect_url: url.into(),
            description: None,
            extensions: Extensions::new(),
        })
    }

    /// Add a description
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        let slot = match &mut self {
            Self::ApiKey(s) => &mut s.description,
            Self::Http(s) => &mut s.description,
            Self::OAuth2(s) => &mut s.description,
            Self::OpenIdConnect(s) => &mut s.description,
        };
        *slot = Some(desc.into());
        self
    }

    /// Value of the `type` field
    pub fn scheme_type(&self) -> &'static str {
        match self {
            Self::ApiKey(_) => "apiKey",
            Self::Http(_) => "http",
            Self::OAuth2(_) => "oauth2",
            Self::OpenIdConnect(_) => "openIdConnect",
        }
    }

    /// Whether requirements on this scheme may list scopes
    pub fn uses_scopes(&self) -> bool {
        matches!(self, Self::OAuth2(_) | Self::OpenIdConnect(_))
    }
}

impl Extensible for SecurityScheme {
    fn extensions(&self) -> &Extensions {
        match self {
            Self::ApiKey(s) => &s.extensions,
            Self::Http(s) => &s.extensions,
            Self::OAuth2(s) => &s.extensions,
            Self::OpenIdConnect(s) => &s.extensions,
        }
    }

    fn extensions_mut(&mut self) -> &mut Extensions {
        match self {
            Self::ApiKey(s) => &mut s.extensions,
            Self::Http(s) => &mut s.extensions,
            Self::OAuth2(s) => &mut s.extensions,
            Self::OpenIdConnect(s) => &mut s.extensions,
        }
    }
}

/// Configuration of the supported OAuth flows
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthFlows {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implicit: Option<ImplicitFlow>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<PasswordFlow>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_credentials: Option<ClientCredentialsFlow>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization_code: Option<AuthorizationCodeFlow>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl OAuthFlows {
    pub fn implicit(mut self, flow: ImplicitFlow) -> Self {
        self.implicit = Some(flow);
        self
    }

    pub fn password(mut self, flow: PasswordFlow) -> Self {
        self.password = Some(flow);
        self
    }

    pub fn client_credentials(mut self, flow: ClientCredentialsFlow) -> Self {
        self.client_credentials = Some(flow);
        self
    }

    pub fn authorization_code(mut self, flow: AuthorizationCodeFlow) -> Self {
        self.authorization_code = Some(flow);
        self
    }

    /// Union of the scopes declared by every configured flow
    pub fn all_scopes(&self) -> Vec<&str> {
        let mut scopes: Vec<&str> = Vec::new();
        let per_flow = [
            self.implicit.as_ref().map(|f| &f.scopes),
            self.password.as_ref().map(|f| &f.scopes),
            self.client_credentials.as_ref().map(|f| &f.scopes),
            self.authorization_code.as_ref().map(|f| &f.scopes),
        ];
        for name in per_flow.into_iter().flatten().flat_map(|s| s.keys()) {
            if !scopes.contains(&name.as_str()) {
                scopes.push(name);
            }
        }
        scopes
    }
}

/// Implicit flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplicitFlow {
    pub authorization_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,

    /// Scope names to short descriptions; may be empty
    pub scopes: Map<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Resource owner password flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordFlow {
    pub token_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,

    pub scopes: Map<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Client credentials flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCredentialsFlow {
    pub token_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,

    pub scopes: Map<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

/// Authorization code flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationCodeFlow {
    pub authorization_url: String,

    pub token_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_url: Option<String>,

    pub scopes: Map<String>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl ImplicitFlow {
    pub fn new(authorization_url: impl Into<String>) -> Self {
        Self {
            authorization_url: authorization_url.into(),
            refresh_url: None,
            scopes: Map::new(),
            extensions: Extensions::new(),
        }
    }

    pub fn scope(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.scopes.insert(name.into(), description.into());
        self
    }
}

impl PasswordFlow {
    pub fn new(token_url: impl Into<String>) -> Self {
        Self {
            token_url: token_url.into(),
            refresh_url: None,
            scopes: Map::new(),
            extensions: Extensions::new(),
        }
    }

    pub fn scope(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.scopes.insert(name.into(), description.into());
        self
    }
}

impl ClientCredentialsFlow {
    pub fn new(token_url: impl Into<String>) -> Self {
        Self {
            token_url: token_url.into(),
            refresh_url: None,
            scopes: Map::new(),
            extensions: Extensions::new(),
        }
    }

    pub fn scope(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.scopes.insert(name.into(), description.into());
        self
    }
}

impl AuthorizationCodeFlow {
    pub fn new(authorization_url: impl Into<String>, token_url: impl Into<String>) -> Self {
        Self {
            authorization_url: authorization_url.into(),
            token_url: token_url.into(),
            refresh_url: None,
            scopes: Map::new(),
            extensions: Extensions::new(),
        }
    }

    pub fn scope(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.scopes.insert(name.into(), description.into());
        self
    }
}

impl_extensible!(
    ApiKeyScheme,
    HttpScheme,
    OAuth2Scheme,
    OpenIdConnectScheme,
    OAuthFlows,
    ImplicitFlow,
    PasswordFlow,
    ClientCredentialsFlow,
    AuthorizationCodeFlow
);
