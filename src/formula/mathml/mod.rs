// MathML reader
//
// Reads MathML markup (as produced by a LaTeX renderer) into an owned tree of
// `MathNode`s. Only local element names are inspected, so any namespace
// declaration style is accepted.

mod error;
mod lookup;
mod node;
mod parser;

pub use error::{MathmlError, Result};
pub use node::{MathKind, MathNode};
pub use parser::{DEFAULT_MAX_DEPTH, MathmlParser, parse};
