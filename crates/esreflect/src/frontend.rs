//! Parser frontend trait for esreflect
//!
//! The engine never parses source text itself. A frontend wraps whatever
//! external parser produced the tree and hands back a [`Program`].
//!
//! # Architecture
//!
//! ```text
//! Source Code → [Frontend] → Program → [Ast] → evaluate / visit
//! ```
//!
//! Frontends are responsible for:
//! - Invoking the external parser
//! - Converting its output into the closed [`Node`](crate::Node) set
//! - Reporting syntax errors with a location when one is known

use std::fmt;

use crate::ast::Program;

// ═══════════════════════════════════════════════════════════════════════
// ERROR TYPES
// ═══════════════════════════════════════════════════════════════════════

/// Error that occurred during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,

    /// Optional source location
    pub location: Option<SourceLocation>,
}

impl ParseError {
    /// Create a new parse error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Add location information to the error.
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parse error: {}", self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " at {}:{}", loc.line, loc.column)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Source code location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,

    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// FRONTEND TRAIT
// ═══════════════════════════════════════════════════════════════════════

/// Parser frontend interface.
///
/// # Example Implementation
///
/// ```
/// use esreflect::{Frontend, ParseError, Program};
///
/// /// Treats every source as an empty program.
/// struct EmptyFrontend;
///
/// impl Frontend for EmptyFrontend {
///     fn parse(&self, _source: &str) -> Result<Program, ParseError> {
///         Ok(Program { body: Vec::new() })
///     }
///
///     fn name(&self) -> &str {
///         "empty"
///     }
/// }
///
/// let program = EmptyFrontend.parse("anything").unwrap();
/// assert!(program.body.is_empty());
/// ```
pub trait Frontend {
    /// Parse source text into a syntax tree.
    ///
    /// # Errors
    ///
    /// Returns `ParseError` if the source cannot be parsed. The engine
    /// propagates it unchanged.
    fn parse(&self, source: &str) -> Result<Program, ParseError>;

    /// Return the name of this frontend, for diagnostics.
    fn name(&self) -> &str;
}
