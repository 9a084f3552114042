//! Runtime expressions
//!
//! Callbacks and links refer to values of the HTTP exchange with runtime
//! expressions such as `$request.body#/id` or `$response.header.Location`.
//! The grammar is:
//!
//! ```text
//! expression = "$url" / "$method" / "$statusCode"
//!            / "$request." source / "$response." source
//! source     = "header." token / "query." name / "path." name
//!            / "body" [ "#" json-pointer ]
//! ```
//!
//! Callback keys may also embed expressions in a URL between braces:
//! `{$request.body#/callbackUrl}/events`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A parsed runtime expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuntimeExpression {
    /// `$url`
    Url,
    /// `$method`
    Method,
    /// `$statusCode`
    StatusCode,
    /// `$request.<source>`
    Request(Source),
    /// `$response.<source>`
    Response(Source),
}

/// Part of a request or response an expression reads from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    /// `header.<token>`
    Header(String),
    /// `query.<name>`
    Query(String),
    /// `path.<name>`
    Path(String),
    /// `body`, optionally followed by `#<json pointer>`
    Body(Option<String>),
}

/// Error parsing a runtime expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionError {
    /// Expression does not start with `$`
    MissingDollar(String),
    /// Not one of the expression forms
    Unknown(String),
    /// `header.`, `query.` or `path.` without a name
    EmptyName(String),
    /// Header name is not an RFC 7230 token
    InvalidHeaderName(String),
    /// JSON pointer does not start with `/`
    InvalidPointer(String),
    /// `{$` without a closing brace
    Unterminated(String),
}

impl fmt::Display for ExpressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingDollar(s) => write!(f, "runtime expression must start with '$': {}", s),
            Self::Unknown(s) => write!(f, "unknown runtime expression: {}", s),
            Self::EmptyName(s) => write!(f, "runtime expression has an empty name: {}", s),
            Self::InvalidHeaderName(s) => write!(f, "invalid header name in runtime expression: {}", s),
            Self::InvalidPointer(s) => write!(f, "invalid JSON pointer in runtime expression: {}", s),
            Self::Unterminated(s) => write!(f, "unterminated embedded runtime expression: {}", s),
        }
    }
}

impl std::error::Error for ExpressionError {}

fn is_tchar(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}

impl Source {
    fn parse(input: &str, whole: &str) -> Result<Self, ExpressionError> {
        let named = |rest: &str| {
            if rest.is_empty() {
                Err(ExpressionError::EmptyName(whole.to_string()))
            } else {
                Ok(rest.to_string())
            }
        };

        if let Some(rest) = input.strip_prefix("header.") {
            let name = named(rest)?;
            if !name.chars().all(is_tchar) {
                return Err(ExpressionError::InvalidHeaderName(whole.to_string()));
            }
            Ok(Self::Header(name))
        } else if let Some(rest) = input.strip_prefix("query.") {
            named(rest).map(Self::Query)
        } else if let Some(rest) = input.strip_prefix("path.") {
            named(rest).map(Self::Path)
        } else if input == "body" {
            Ok(Self::Body(None))
        } else if let Some(pointer) = input.strip_prefix("body#") {
            if !pointer.is_empty() && !pointer.starts_with('/') {
                return Err(ExpressionError::InvalidPointer(whole.to_string()));
            }
            Ok(Self::Body(Some(pointer.to_string())))
        } else {
            Err(ExpressionError::Unknown(whole.to_string()))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header(name) => write!(f, "header.{}", name),
            Self::Query(name) => write!(f, "query.{}", name),
            Self::Path(name) => write!(f, "path.{}", name),
            Self::Body(None) => f.write_str("body"),
            Self::Body(Some(pointer)) => write!(f, "body#{}", pointer),
        }
    }
}

impl RuntimeExpression {
    /// The request or response source, if any
    pub fn source(&self) -> Option<&Source> {
        match self {
            Self::Request(source) | Self::Response(source) => Some(source),
            _ => None,
        }
    }
}

impl FromStr for RuntimeExpression {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s
            .strip_prefix('$')
            .ok_or_else(|| ExpressionError::MissingDollar(s.to_string()))?;

        match body {
            "url" => Ok(Self::Url),
            "method" => Ok(Self::Method),
            "statusCode" => Ok(Self::StatusCode),
            _ => {
                if let Some(rest) = body.strip_prefix("request.") {
                    Source::parse(rest, s).map(Self::Request)
                } else if let Some(rest) = body.strip_prefix("response.") {
                    Source::parse(rest, s).map(Self::Response)
                } else {
                    Err(ExpressionError::Unknown(s.to_string()))
                }
            }
        }
    }
}

impl fmt::Display for RuntimeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url => f.write_str("$url"),
            Self::Method => f.write_str("$method"),
            Self::StatusCode => f.write_str("$statusCode"),
            Self::Request(source) => write!(f, "$request.{}", source),
            Self::Response(source) => write!(f, "$response.{}", source),
        }
    }
}

impl Serialize for RuntimeExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RuntimeExpression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parse every `{$...}` expression embedded in a string
///
/// Brace groups that do not start with `$` are not expressions and are
/// skipped.
pub fn extract_embedded(text: &str) -> Result<Vec<RuntimeExpression>, ExpressionError> {
    let mut found = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let inner = &after[..close];
                if inner.starts_with('$') {
                    found.push(inner.parse()?);
                }
                rest = &after[close + 1..];
            }
            None if after.starts_with('$') => {
                return Err(ExpressionError::Unterminated(text.to_string()));
            }
            None => break,
        }
    }

    Ok(found)
}
