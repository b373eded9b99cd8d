//! ESTree JSON frontend
//!
//! Reads the ESTree document that external ECMAScript parsers emit
//! (`acorn`, `esprima`, `espree`, SpiderMonkey's `Reflect.parse`) and
//! converts it into a [`Program`].
//!
//! serde_json's default recursion limit (128) is far below the nesting of
//! ordinary generated code, so it is replaced by this frontend's own
//! [`max_nesting`](EstreeFrontend::with_max_nesting) bound, checked before
//! parsing.

use serde::Deserialize;
use tracing::debug;

use crate::ast::Program;
use crate::frontend::{Frontend, ParseError, SourceLocation};
use crate::stack::with_stack_of;

/// Default bound on JSON array and object nesting.
pub const DEFAULT_MAX_NESTING: usize = 8192;

/// Stack reserved per JSON nesting level while parsing.
const STACK_PER_LEVEL: usize = 8 * 1024;

/// ESTree JSON frontend.
///
/// # Example
///
/// ```
/// use esreflect::frontends::EstreeFrontend;
/// use esreflect::Frontend;
///
/// let frontend = EstreeFrontend::new();
/// let program = frontend
///     .parse(r#"{"type": "Program", "body": [{"type": "EmptyStatement"}]}"#)
///     .unwrap();
/// assert_eq!(program.body.len(), 1);
/// assert_eq!(frontend.name(), "ESTree");
/// ```
#[derive(Debug, Clone)]
pub struct EstreeFrontend {
    max_nesting: usize,
}

impl Default for EstreeFrontend {
    fn default() -> Self {
        Self {
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }
}

impl EstreeFrontend {
    /// Create a new ESTree frontend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject documents whose arrays and objects nest deeper than `limit`.
    pub fn with_max_nesting(mut self, limit: usize) -> Self {
        self.max_nesting = limit;
        self
    }

    /// Convert an already-parsed ESTree JSON document.
    pub fn program_from_json(&self, json: serde_json::Value) -> Result<Program, ParseError> {
        check_root(&json)?;
        Program::from_json(json).map_err(|e| ParseError::new(format!("invalid ESTree: {}", e)))
    }

    fn read_json(&self, source: &str) -> Result<serde_json::Value, ParseError> {
        let nesting = max_nesting(source);
        if nesting > self.max_nesting {
            return Err(ParseError::new(format!(
                "ESTree JSON nests {} levels deep, more than the limit of {}",
                nesting, self.max_nesting
            )));
        }

        with_stack_of(nesting.saturating_add(1) * STACK_PER_LEVEL, || {
            let mut de = serde_json::Deserializer::from_str(source);
            de.disable_recursion_limit();
            let json = serde_json::Value::deserialize(&mut de).map_err(json_error)?;
            de.end().map_err(json_error)?;
            Ok(json)
        })
    }
}

impl Frontend for EstreeFrontend {
    fn parse(&self, source: &str) -> Result<Program, ParseError> {
        let json = self.read_json(source)?;
        let program = self.program_from_json(json)?;
        debug!(statements = program.body.len(), "parsed ESTree program");
        Ok(program)
    }

    fn name(&self) -> &str {
        "ESTree"
    }
}

/// Deepest array/object nesting in `source`, ignoring brackets in strings.
///
/// Malformed input is measured as far as it goes; serde_json reports the
/// actual syntax error afterwards.
fn max_nesting(source: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0;
    let mut in_string = false;
    let mut escaped = false;

    for byte in source.bytes() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

/// The document root must be a `Program` node.
fn check_root(json: &serde_json::Value) -> Result<(), ParseError> {
    match json.get("type").and_then(serde_json::Value::as_str) {
        Some("Program") => Ok(()),
        Some(other) => Err(ParseError::new(format!(
            "expected a `Program` root, got `{}`",
            other
        ))),
        None => Err(ParseError::new("expected a `Program` root node")),
    }
}

fn json_error(err: serde_json::Error) -> ParseError {
    let message = format!("malformed ESTree JSON: {}", err);
    if err.line() == 0 {
        ParseError::new(message)
    } else {
        ParseError::new(message).with_location(SourceLocation::new(err.line(), err.column()))
    }
}
