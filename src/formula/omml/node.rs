// OMML node definitions

/// Style tag carried by every math run (`m:sty`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunStyle {
    /// Upright text (numbers, operators, plain text)
    Plain,
    /// Italic text (identifiers)
    Italic,
}

impl RunStyle {
    /// The `m:sty` attribute value.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStyle::Plain => "p",
            RunStyle::Italic => "i",
        }
    }
}

/// Terminal styled text unit of an OMML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmmlRun {
    pub text: String,
    pub style: RunStyle,
    /// Set when the text starts or ends with a space, so the consumer keeps it
    pub preserve_space: bool,
}

impl OmmlRun {
    /// Create a run, deriving the whitespace-preservation flag from the text.
    pub fn new(text: impl Into<String>, style: RunStyle) -> Self {
        let text = text.into();
        let preserve_space = text.starts_with(' ') || text.ends_with(' ');
        Self {
            text,
            style,
            preserve_space,
        }
    }
}

/// Degree slot of a radical.
#[derive(Debug, Clone, PartialEq)]
pub enum RadicalDegree {
    /// Square root: no index glyph is rendered
    Hidden,
    /// Explicit index (possibly an empty slot)
    Shown(Vec<OmmlNode>),
}

/// A node of an OMML tree.
///
/// Every structural slot is a `Vec<OmmlNode>`; an empty vector is a slot that
/// is still emitted, just without content.
#[derive(Debug, Clone, PartialEq)]
pub enum OmmlNode {
    /// Math root (`m:oMath`)
    Math(Vec<OmmlNode>),

    /// Styled text run (`m:r`)
    Run(OmmlRun),

    /// Fraction (`m:f`)
    Fraction {
        numerator: Vec<OmmlNode>,
        denominator: Vec<OmmlNode>,
    },

    /// Superscript (`m:sSup`)
    Superscript {
        base: Vec<OmmlNode>,
        superscript: Vec<OmmlNode>,
    },

    /// Subscript (`m:sSub`)
    Subscript {
        base: Vec<OmmlNode>,
        subscript: Vec<OmmlNode>,
    },

    /// Subscript and superscript (`m:sSubSup`)
    SubSup {
        base: Vec<OmmlNode>,
        subscript: Vec<OmmlNode>,
        superscript: Vec<OmmlNode>,
    },

    /// Radical (`m:rad`)
    Radical {
        degree: RadicalDegree,
        radicand: Vec<OmmlNode>,
    },

    /// Named function with argument (`m:func`)
    Function {
        name: Vec<OmmlNode>,
        base: Vec<OmmlNode>,
    },

    /// Accent over a base (`m:acc`)
    Accent {
        base: Vec<OmmlNode>,
        character: Option<String>,
    },

    /// Lower limit nested inside an upper limit (`m:limUpp` around `m:limLow`)
    StackedLimit {
        base: Vec<OmmlNode>,
        lower: Vec<OmmlNode>,
        upper: Vec<OmmlNode>,
    },

    /// Delimited group (`m:d`)
    Delimited {
        open: String,
        close: String,
        content: Vec<OmmlNode>,
    },

    /// Matrix (`m:m`), rows of cells
    Matrix { rows: Vec<Vec<Vec<OmmlNode>>> },
}

impl OmmlNode {
    /// Shorthand for a run node.
    pub fn run(text: impl Into<String>, style: RunStyle) -> Self {
        OmmlNode::Run(OmmlRun::new(text, style))
    }

    /// Content of the math root, or an empty slice for any other node.
    pub fn children(&self) -> &[OmmlNode] {
        match self {
            OmmlNode::Math(children) => children,
            _ => &[],
        }
    }

    /// All runs of this subtree in document order.
    pub fn runs(&self) -> Vec<&OmmlRun> {
        let mut out = Vec::new();
        self.collect_runs(&mut out);
        out
    }

    fn collect_runs<'a>(&'a self, out: &mut Vec<&'a OmmlRun>) {
        let slot = |nodes: &'a [OmmlNode], out: &mut Vec<&'a OmmlRun>| {
            for node in nodes {
                node.collect_runs(out);
            }
        };
        match self {
            OmmlNode::Run(run) => out.push(run),
            OmmlNode::Math(children) => slot(children, out),
            OmmlNode::Fraction {
                numerator,
                denominator,
            } => {
                slot(numerator, out);
                slot(denominator, out);
            },
            OmmlNode::Superscript { base, superscript } => {
                slot(base, out);
                slot(superscript, out);
            },
            OmmlNode::Subscript { base, subscript } => {
                slot(base, out);
                slot(subscript, out);
            },
            OmmlNode::SubSup {
                base,
                subscript,
                superscript,
            } => {
                slot(base, out);
                slot(subscript, out);
                slot(superscript, out);
            },
            OmmlNode::Radical { degree, radicand } => {
                if let RadicalDegree::Shown(degree) = degree {
                    slot(degree, out);
                }
                slot(radicand, out);
            },
            OmmlNode::Function { name, base } => {
                slot(name, out);
                slot(base, out);
            },
            OmmlNode::Accent { base, .. } => slot(base, out),
            OmmlNode::StackedLimit { base, lower, upper } => {
                slot(base, out);
                slot(lower, out);
                slot(upper, out);
            },
            OmmlNode::Delimited { content, .. } => slot(content, out),
            OmmlNode::Matrix { rows } => {
                for row in rows {
                    for cell in row {
                        slot(cell, out);
                    }
                }
            },
        }
    }

    /// Concatenated text of every run, in document order.
    pub fn plain_text(&self) -> String {
        self.runs().iter().map(|r| r.text.as_str()).collect()
    }
}
