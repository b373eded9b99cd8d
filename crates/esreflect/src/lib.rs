//! # esreflect
//!
//! Static reflection over ECMAScript syntax trees.
//!
//! esreflect never runs a program. It walks a parsed tree and lets callers
//! react to the constructs they care about, and it folds the small set of
//! expressions that have a value outside the runtime (literals, names looked
//! up in a caller-supplied [`Namespace`], member chains, `+` and `-`).
//!
//! ## Architecture
//!
//! - **Frontend**: turns source text into a [`Program`]. [`EstreeFrontend`]
//!   reads the ESTree JSON emitted by external parsers.
//! - **Evaluator**: [`evaluate`] folds an expression against a namespace.
//! - **Pattern registry**: [`visit::shapes`] presents some raw kinds under
//!   higher-level shapes such as `ObjectLiteral` or `Variable`.
//! - **Visitor**: [`Ast::visit`] walks the program pre-order and dispatches
//!   to a [`Callbacks`] table.
//!
//! ## Example
//!
//! ```
//! use esreflect::ast::build::{binary, ident, member, str_lit};
//! use esreflect::{evaluate, Namespace, Value};
//!
//! let ns = Namespace::new().with("config", Namespace::new().with("name", "app"));
//! let expr = binary("+", member(ident("config"), "name"), str_lit(".js"));
//! assert_eq!(evaluate(&expr, Some(&ns)), Ok(Value::string("app.js")));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod context;
pub mod error;
pub mod eval;
pub mod frontend;
pub mod frontends;
pub mod handle;
pub mod namespace;
mod stack;
pub mod value;
pub mod visit;

// Re-export main types
pub use ast::{Node, NodeKind, Program};
pub use context::{DepthCounter, DepthGuard, EvalContext, DEFAULT_MAX_DEPTH};
pub use error::{Arity, Error, EvalError, NamespaceError, Result};
pub use eval::{eval_with, evaluate, resolve_member, Evaluate};
pub use frontend::{Frontend, ParseError, SourceLocation};
pub use frontends::EstreeFrontend;
pub use handle::Ast;
pub use namespace::Namespace;
pub use value::Value;
pub use visit::{Callbacks, Flow, Shape, ShapeKind, VariableBinding};

/// esreflect version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
