//! Unified error types for license-gate.
//!
//! Fatal conditions (malformed graphs, invalid policy, cyclic POM parents)
//! surface as [`LicenseGateError`]. Per-artifact license problems are never
//! errors at this level; they are collected as validation results instead.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for license-gate operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LicenseGateError {
    /// Errors raised while walking the dependency graph
    #[error("Dependency graph error: {context}")]
    Graph {
        context: String,
        #[source]
        source: GraphErrorKind,
    },

    /// Errors raised while resolving POM metadata
    #[error("POM resolution failed: {context}")]
    Pom {
        context: String,
        #[source]
        source: PomErrorKind,
    },

    /// Errors raised while loading the SPDX license table
    #[error("SPDX license table error: {context}")]
    Spdx {
        context: String,
        #[source]
        source: SpdxErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Specific graph error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GraphErrorKind {
    #[error("Unknown dependency kind '{kind}': {id}")]
    UnknownComponent { id: String, kind: String },

    #[error("Edge from '{from}' references unknown component '{to}'")]
    DanglingEdge { from: String, to: String },

    #[error("Root component '{0}' is not part of the graph")]
    MissingRoot(String),

    #[error("Component '{0}' is declared twice")]
    DuplicateComponent(String),

    #[error("Invalid graph document: {0}")]
    InvalidDocument(String),
}

/// Specific POM error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PomErrorKind {
    #[error("Cyclic parent chain: {0}")]
    CyclicParent(String),

    #[error("Invalid XML structure: {0}")]
    InvalidXml(String),
}

/// Specific SPDX table error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SpdxErrorKind {
    #[error("Invalid license list JSON: {0}")]
    InvalidJson(String),

    #[error("No SPDX identifier '{0}' in the embedded set")]
    UnknownIdentifier(String),

    #[error("{0} specified twice")]
    DuplicateFallbackUrl(String),
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),

    #[error("Formatting failed: {0}")]
    FormatError(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for license-gate operations
pub type Result<T> = std::result::Result<T, LicenseGateError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl LicenseGateError {
    /// Create a graph error with context
    pub fn graph(context: impl Into<String>, source: GraphErrorKind) -> Self {
        Self::Graph {
            context: context.into(),
            source,
        }
    }

    /// Create a POM error with context
    pub fn pom(context: impl Into<String>, source: PomErrorKind) -> Self {
        Self::Pom {
            context: context.into(),
            source,
        }
    }

    /// Create an SPDX table error with context
    pub fn spdx(context: impl Into<String>, source: SpdxErrorKind) -> Self {
        Self::Spdx {
            context: context.into(),
            source,
        }
    }

    /// Create a report error
    pub fn report(context: impl Into<String>, source: ReportErrorKind) -> Self {
        Self::Report {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for LicenseGateError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for LicenseGateError {
    fn from(err: serde_json::Error) -> Self {
        Self::report(
            "JSON serialization",
            ReportErrorKind::JsonSerializationError(err.to_string()),
        )
    }
}

impl From<std::fmt::Error> for LicenseGateError {
    fn from(err: std::fmt::Error) -> Self {
        Self::report("text report", ReportErrorKind::FormatError(err.to_string()))
    }
}

// ============================================================================
// Context chaining
// ============================================================================

/// Prefix a [`LicenseGateError`]'s context while propagating it.
///
/// Contexts nest outermost-first: `"outer: middle: base"`.
pub trait ErrorContext<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Like [`ErrorContext::context`], building the string only on failure.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<LicenseGateError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().prefixed(&context.into()))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| e.into().prefixed(&f().into()))
    }
}

impl LicenseGateError {
    fn prefixed(mut self, outer: &str) -> Self {
        let context = match &mut self {
            Self::Graph { context, .. }
            | Self::Pom { context, .. }
            | Self::Spdx { context, .. }
            | Self::Report { context, .. } => context,
            Self::Io { message, .. } => message,
            Self::Config(message) => message,
        };
        *context = if context.is_empty() {
            outer.to_string()
        } else {
            format!("{outer}: {context}")
        };
        self
    }
}
