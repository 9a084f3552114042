//! Document I/O configuration

use std::fmt;
use std::path::Path;

/// Serialization format of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Format from a file extension: `.json`, `.yaml` or `.yml`
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
            Some(Self::Yaml)
        } else {
            None
        }
    }

    /// Guess the format from document text
    ///
    /// A JSON document is an object, so anything starting with `{` after
    /// whitespace is JSON; everything else is treated as YAML.
    pub fn sniff(text: &str) -> Self {
        let text = text.trim_start_matches('\u{feff}').trim_start();
        if text.starts_with('{') {
            Self::Json
        } else {
            Self::Yaml
        }
    }

    /// Usual file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        })
    }
}

/// Options for reading and writing documents
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    /// Fixed format; detected from the path or content when `None`
    pub format: Option<DocumentFormat>,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            format: None,
            pretty: true,
        }
    }
}

impl DocumentConfig {
    /// Create a configuration with format detection and pretty output
    pub fn new() -> Self {
        Self::default()
    }

    /// Always use this format
    pub fn format(mut self, format: DocumentFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set pretty-printing of JSON output
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Format for a document read from or written to `path`
    pub(crate) fn format_for_path(&self, path: &Path) -> Option<DocumentFormat> {
        self.format.or_else(|| DocumentFormat::from_path(path))
    }

    /// Format for document text
    pub(crate) fn format_for_text(&self, text: &str) -> DocumentFormat {
        self.format.unwrap_or_else(|| DocumentFormat::sniff(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(DocumentFormat::from_path("api/openapi.json"), Some(DocumentFormat::Json));
        assert_eq!(DocumentFormat::from_path("openapi.YML"), Some(DocumentFormat::Yaml));
        assert_eq!(DocumentFormat::from_path("openapi.yaml"), Some(DocumentFormat::Yaml));
        assert_eq!(DocumentFormat::from_path("openapi.txt"), None);
        assert_eq!(DocumentFormat::from_path("openapi"), None);
    }

    #[test]
    fn test_sniff() {
        assert_eq!(DocumentFormat::sniff("  \n{\"openapi\": \"3.0.0\"}"), DocumentFormat::Json);
        assert_eq!(DocumentFormat::sniff("openapi: 3.0.0\n"), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::sniff("---\nopenapi: 3.0.0\n"), DocumentFormat::Yaml);
    }

    #[test]
    fn test_config_builder() {
        let config = DocumentConfig::new().format(DocumentFormat::Yaml).pretty(false);
        assert_eq!(config.format, Some(DocumentFormat::Yaml));
        assert!(!config.pretty);
        assert_eq!(
            config.format_for_path(Path::new("spec.json")),
            Some(DocumentFormat::Yaml)
        );

        let detect = DocumentConfig::default();
        assert!(detect.pretty);
        assert_eq!(detect.format_for_text("{}"), DocumentFormat::Json);
    }
}
