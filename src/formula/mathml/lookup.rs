use super::node::MathKind;
use phf::phf_map;

/// Fast local-name to kind lookup using PHF
pub static ELEMENT_KINDS: phf::Map<&'static str, MathKind> = phf_map! {
    // Token elements
    "mn" => MathKind::Number,
    "mi" => MathKind::Identifier,
    "mo" => MathKind::Operator,
    "mtext" => MathKind::Text,
    "mspace" => MathKind::Space,

    // Fractions and radicals
    "mfrac" => MathKind::Fraction,
    "msqrt" => MathKind::Sqrt,
    "mroot" => MathKind::Root,

    // Scripts
    "msup" => MathKind::Superscript,
    "msub" => MathKind::Subscript,
    "msubsup" => MathKind::SubSup,
    "munder" => MathKind::Under,
    "mover" => MathKind::Over,
    "munderover" => MathKind::UnderOver,

    // Grouping
    "mfenced" => MathKind::Fenced,
    "mrow" => MathKind::Row,
    "math" => MathKind::Math,

    // Tables
    "mtable" => MathKind::Table,
    "mtr" => MathKind::TableRow,
    "mtd" => MathKind::TableCell,
};
