//! Structured error types shared across Lamina crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`LaminaError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (indices, layer keys, paths, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for the Lamina engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum LaminaError {
    /// Project configuration errors (missing file, invalid size, bad trait spec).
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Layer catalog errors (missing directory, empty layer, unknown key).
    #[error("catalog error: {0}")]
    Catalog(ErrorInfo),
    /// Unique placement planning errors.
    #[error("planner error: {0}")]
    Planner(ErrorInfo),
    /// Composition and uniqueness enforcement errors.
    #[error("generation error: {0}")]
    Generation(ErrorInfo),
    /// Image decode, compositing and encode errors.
    #[error("render error: {0}")]
    Render(ErrorInfo),
    /// Serialization and schema errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl LaminaError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            LaminaError::Config(info)
            | LaminaError::Catalog(info)
            | LaminaError::Planner(info)
            | LaminaError::Generation(info)
            | LaminaError::Render(info)
            | LaminaError::Serde(info) => info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_round_trip_through_json() {
        let error = LaminaError::Generation(
            ErrorInfo::new("attempts-exhausted", "retry budget exceeded")
                .with_context("index", "7")
                .with_hint("reduce the collection size"),
        );
        let json = serde_json::to_string(&error).expect("serialize");
        let restored: LaminaError = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(error, restored);
        assert_eq!(restored.info().code, "attempts-exhausted");
    }

    #[test]
    fn display_includes_context_and_hint() {
        let info = ErrorInfo::new("layer-dir-missing", "layer has no asset directory")
            .with_context("layer", "eyes")
            .with_hint("create the directory");
        let rendered = info.to_string();
        assert!(rendered.contains("layer-dir-missing"));
        assert!(rendered.contains("layer=eyes"));
        assert!(rendered.contains("create the directory"));
    }
}
