//! Loading and saving documents
//!
//! A document is read from JSON or YAML text into [`OpenApi`]. Reading
//! fails when the text does not have the shape of an OpenAPI 3.0 document;
//! the error says which field is wrong.

use std::fs;
use std::path::Path;

use tracing::{debug, trace};

use crate::config::{DocumentConfig, DocumentFormat};
use crate::error::{Error, Result};
use crate::expression::{self, RuntimeExpression};
use crate::path::{Callback, Operation};
use crate::reference::RefOr;
use crate::spec::OpenApi;

impl OpenApi {
    /// Convert to JSON value
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }

    /// Convert to pretty-printed JSON string
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Parse a JSON document
    pub fn from_json_str(text: &str) -> Result<Self> {
        let spec: Self = serde_json::from_str(text)?;
        trace!(paths = spec.paths.len(), "parsed JSON document");
        Ok(spec)
    }

    /// Parse a YAML document
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        #[cfg(feature = "yaml")]
        {
            let spec: Self = serde_yaml::from_str(text)?;
            trace!(paths = spec.paths.len(), "parsed YAML document");
            Ok(spec)
        }
        #[cfg(not(feature = "yaml"))]
        {
            let _ = text;
            Err(Error::YamlDisabled)
        }
    }

    /// Parse a document in the configured format, or the sniffed one
    pub fn from_str_with(text: &str, config: &DocumentConfig) -> Result<Self> {
        match config.format_for_text(text) {
            DocumentFormat::Json => Self::from_json_str(text),
            DocumentFormat::Yaml => Self::from_yaml_str(text),
        }
    }

    /// Read a document from a file
    ///
    /// The format comes from the file extension, or from the content when
    /// the extension is not `.json`, `.yaml` or `.yml`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_path_with(path, &DocumentConfig::default())
    }

    /// Read a document from a file with explicit options
    pub fn from_path_with(path: impl AsRef<Path>, config: &DocumentConfig) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let format = config
            .format_for_path(path)
            .unwrap_or_else(|| DocumentFormat::sniff(&text));

        debug!(path = %path.display(), %format, bytes = text.len(), "loading OpenAPI document");

        match format {
            DocumentFormat::Json => Self::from_json_str(&text),
            DocumentFormat::Yaml => Self::from_yaml_str(&text),
        }
    }

    /// Serialize as YAML
    pub fn to_yaml_string(&self) -> Result<String> {
        #[cfg(feature = "yaml")]
        {
            Ok(serde_yaml::to_string(self)?)
        }
        #[cfg(not(feature = "yaml"))]
        {
            Err(Error::YamlDisabled)
        }
    }

    /// Serialize in the configured format (JSON when none is set)
    pub fn to_string_with(&self, config: &DocumentConfig) -> Result<String> {
        match config.format.unwrap_or(DocumentFormat::Json) {
            DocumentFormat::Json if config.pretty => Ok(serde_json::to_string_pretty(self)?),
            DocumentFormat::Json => Ok(serde_json::to_string(self)?),
            DocumentFormat::Yaml => self.to_yaml_string(),
        }
    }

    /// Write the document to a file
    ///
    /// Without a configured format the file extension decides.
    pub fn write_to_path(&self, path: impl AsRef<Path>, config: &DocumentConfig) -> Result<()> {
        let path = path.as_ref();
        let format = config
            .format_for_path(path)
            .ok_or_else(|| Error::UnknownFormat(path.to_path_buf()))?;

        let text = self.to_string_with(&config.clone().format(format))?;
        debug!(path = %path.display(), %format, bytes = text.len(), "writing OpenAPI document");
        fs::write(path, text).map_err(|e| Error::io(path, e))
    }

    /// Parse every runtime expression used by callbacks and links
    ///
    /// Covers callbacks and response links of inline operations and those
    /// declared in components. Referenced objects are not followed.
    pub fn runtime_expressions(&self) -> Result<Vec<RuntimeExpression>> {
        let mut found = Vec::new();

        for (_, _, operation) in self.operations() {
            collect_operation(operation, &mut found)?;
        }

        if let Some(components) = &self.components {
            for callback in components.callbacks.iter().flat_map(|m| m.values()) {
                if let RefOr::Item(callback) = callback {
                    collect_callback(callback, &mut found)?;
                }
            }
            for link in components.links.iter().flat_map(|m| m.values()) {
                if let RefOr::Item(link) = link {
                    collect_link(link, &mut found)?;
                }
            }
        }

        trace!(count = found.len(), "collected runtime expressions");
        Ok(found)
    }
}

fn collect_operation(operation: &Operation, found: &mut Vec<RuntimeExpression>) -> Result<()> {
    for callback in operation.callbacks.iter().flat_map(|m| m.values()) {
        if let RefOr::Item(callback) = callback {
            collect_callback(callback, found)?;
        }
    }

    let responses = &operation.responses;
    for response in responses.default.iter().chain(responses.responses.values()) {
        let RefOr::Item(response) = response else {
            continue;
        };
        for link in response.links.iter().flat_map(|m| m.values()) {
            if let RefOr::Item(link) = link {
                collect_link(link, found)?;
            }
        }
    }
    Ok(())
}

fn collect_callback(callback: &Callback, found: &mut Vec<RuntimeExpression>) -> Result<()> {
    found.extend(callback.runtime_expressions()?);
    for item in callback.expressions.values() {
        for (_, operation) in item.operations() {
            collect_operation(operation, found)?;
        }
    }
    Ok(())
}

fn collect_link(link: &crate::content::Link, found: &mut Vec<RuntimeExpression>) -> Result<()> {
    for value in link.parameters.iter().flat_map(|m| m.values()) {
        collect_value(value, found)?;
    }
    if let Some(body) = &link.request_body {
        collect_value(body, found)?;
    }
    Ok(())
}

fn collect_value(value: &serde_json::Value, found: &mut Vec<RuntimeExpression>) -> Result<()> {
    match value.as_str() {
        Some(s) if s.starts_with('$') => found.push(s.parse()?),
        Some(s) => found.extend(expression::extract_embedded(s)?),
        None => {}
    }
    Ok(())
}
