//! Configuration for Markdown to DOCX conversion.
//!
//! Options can be built in code with the `with_*` methods or loaded from YAML,
//! where any field left out keeps its default value.
//!
//! # Examples
//!
//! ```rust
//! use mathdocx::config::ConversionOptions;
//!
//! let options = ConversionOptions::new()
//!     .with_code_font("Consolas")
//!     .with_rule_width(30);
//!
//! let from_yaml = ConversionOptions::from_yaml_str("rule_width: 30\n").unwrap();
//! assert_eq!(from_yaml.rule_width, options.rule_width);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default upper bound on input size (10 MiB)
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

/// Errors raised while loading or validating options.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(String),

    #[error("Invalid option {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Options controlling the produced document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Font for inline code and code blocks
    pub code_font: String,
    /// Code font size in half-points
    pub code_font_size: u32,
    /// Number of `─` characters in a horizontal rule
    pub rule_width: usize,
    /// Center display formulas
    pub center_block_math: bool,
    /// Inputs larger than this are rejected
    pub max_input_bytes: u64,
    /// Accepted input file extensions, with leading dot
    pub allowed_extensions: Vec<String>,
    /// Title stored in the document properties
    pub document_title: Option<String>,
    /// Author stored in the document properties
    pub author: Option<String>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            code_font: "Courier New".to_string(),
            code_font_size: 20,
            rule_width: 50,
            center_block_math: true,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            allowed_extensions: vec![".md".into(), ".markdown".into(), ".tex".into()],
            document_title: None,
            author: None,
        }
    }
}

impl ConversionOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse options from a YAML document and validate them.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let options: Self =
            serde_saphyr::from_str(yaml).map_err(|e| ConfigError::Yaml(e.to_string()))?;
        options.validated()
    }

    /// Read options from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Serialize the options to YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_saphyr::to_string(self).map_err(|e| ConfigError::Yaml(e.to_string()))
    }

    #[inline]
    pub fn with_code_font(mut self, font: impl Into<String>) -> Self {
        self.code_font = font.into();
        self
    }

    #[inline]
    pub fn with_code_font_size(mut self, half_points: u32) -> Self {
        self.code_font_size = half_points;
        self
    }

    #[inline]
    pub fn with_rule_width(mut self, width: usize) -> Self {
        self.rule_width = width;
        self
    }

    #[inline]
    pub fn with_center_block_math(mut self, center: bool) -> Self {
        self.center_block_math = center;
        self
    }

    #[inline]
    pub fn with_max_input_bytes(mut self, limit: u64) -> Self {
        self.max_input_bytes = limit;
        self
    }

    /// Replace the extension allow list. Extensions are normalized to a
    /// lowercase form with a leading dot.
    pub fn with_allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_extensions = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .collect();
        self
    }

    #[inline]
    pub fn with_document_title(mut self, title: impl Into<String>) -> Self {
        self.document_title = Some(title.into());
        self
    }

    #[inline]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Whether a path's extension is on the allow list (case-insensitive).
    pub fn is_extension_allowed(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = normalize_extension(ext);
        self.allowed_extensions
            .iter()
            .any(|allowed| normalize_extension(allowed) == ext)
    }

    /// Check value ranges, returning the options unchanged when they are usable.
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.code_font.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "code_font",
                reason: "must not be empty".into(),
            });
        }
        if self.code_font_size == 0 {
            return Err(ConfigError::Invalid {
                field: "code_font_size",
                reason: "must be positive".into(),
            });
        }
        if self.max_input_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "max_input_bytes",
                reason: "must be positive".into(),
            });
        }
        Ok(self)
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_ascii_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{}", ext)
    }
}
