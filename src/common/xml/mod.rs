//! XML helpers shared by the MathML reader and the OOXML writers.

mod escape;

pub use escape::{escape_xml, resolve_entity, unescape_xml};
