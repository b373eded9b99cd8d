//! Value representation for evaluated expressions

mod display;
mod impls;

use serde::Serialize;

use crate::namespace::Namespace;

/// A value produced by the evaluator or bound in a [`Namespace`].
///
/// Only the types a constant-folding evaluator needs are represented:
/// the scalar literal types plus nested namespaces for member chains.
#[derive(Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// `null` (also the value of regular-expression and bigint literals,
    /// which ESTree JSON cannot carry)
    #[default]
    Null,

    /// `true` or `false`
    Bool(bool),

    /// IEEE-754 double, the language's only number type
    Number(f64),

    /// UTF-16 in the source language, UTF-8 here
    String(String),

    /// A nested namespace, the container a member chain descends into
    Namespace(Namespace),
}
