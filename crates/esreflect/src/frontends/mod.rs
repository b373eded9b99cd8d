//! Parser frontends shipped with esreflect
//!
//! This module contains implementations of the `Frontend` trait for the
//! parser outputs esreflect can read directly.

pub mod estree;

pub use estree::EstreeFrontend;
