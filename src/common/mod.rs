//! Common utilities shared by the formula and document modules.

pub mod xml;
