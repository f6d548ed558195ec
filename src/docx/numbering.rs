//! List numbering definitions (`word/numbering.xml`).
//!
//! Every list in the document gets its own abstract definition and its own
//! numbering instance, so two ordered lists never continue each other's
//! counters. Instance IDs start at [`FIRST_NUM_ID`].
use super::error::Result;
use std::fmt::Write as FmtWrite;

/// Number of indentation levels defined for each list.
pub const LIST_LEVELS: u32 = 9;

/// Numbering instance ID handed out for the first list.
pub const FIRST_NUM_ID: u32 = 101;

const NUM_ID_OFFSET: u32 = FIRST_NUM_ID - 1;
const BULLET: &str = "\u{2022}";

/// One registered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListDefinition {
    /// Abstract numbering ID (1-based)
    pub abstract_id: u32,
    /// Numbering instance ID referenced by paragraphs
    pub num_id: u32,
    pub ordered: bool,
    /// First number of the top level
    pub start: u32,
}

impl ListDefinition {
    /// Left indent of a level, in twips.
    pub fn indent(level: u32) -> u32 {
        720 + 360 * level
    }

    /// Hanging indent of every level, in twips.
    pub const HANGING: u32 = 360;

    fn to_xml(&self, xml: &mut String) -> Result<()> {
        write!(
            xml,
            "<w:abstractNum w:abstractNumId=\"{}\"><w:multiLevelType w:val=\"hybridMultilevel\"/>",
            self.abstract_id
        )?;

        for level in 0..LIST_LEVELS {
            let start = if level == 0 { self.start } else { 1 };
            write!(
                xml,
                "<w:lvl w:ilvl=\"{}\"><w:start w:val=\"{}\"/>",
                level, start
            )?;
            if self.ordered {
                write!(
                    xml,
                    "<w:numFmt w:val=\"decimal\"/><w:lvlText w:val=\"%{}.\"/>",
                    level + 1
                )?;
            } else {
                write!(
                    xml,
                    "<w:numFmt w:val=\"bullet\"/><w:lvlText w:val=\"{}\"/>",
                    BULLET
                )?;
            }
            write!(
                xml,
                "<w:lvlJc w:val=\"left\"/><w:pPr><w:ind w:left=\"{}\" w:hanging=\"{}\"/></w:pPr></w:lvl>",
                Self::indent(level),
                Self::HANGING
            )?;
        }

        xml.push_str("</w:abstractNum>");
        Ok(())
    }
}

/// Allocates numbering instances, one per list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberingRegistry {
    lists: Vec<ListDefinition>,
}

impl NumberingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new list and return the numbering instance ID for its
    /// paragraphs. A `start` of zero is clamped to one.
    pub fn register(&mut self, ordered: bool, start: u32) -> u32 {
        let abstract_id = self.lists.len() as u32 + 1;
        let definition = ListDefinition {
            abstract_id,
            num_id: abstract_id + NUM_ID_OFFSET,
            ordered,
            start: start.max(1),
        };
        self.lists.push(definition);
        definition.num_id
    }

    pub fn lists(&self) -> &[ListDefinition] {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Look up a list by its numbering instance ID.
    pub fn get(&self, num_id: u32) -> Option<&ListDefinition> {
        num_id
            .checked_sub(FIRST_NUM_ID)
            .and_then(|index| self.lists.get(index as usize))
    }

    /// Generate `word/numbering.xml`.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(512 + self.lists.len() * 2048);
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>");
        xml.push_str("<w:numbering xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">");

        // All abstract definitions precede the instances
        for list in &self.lists {
            list.to_xml(&mut xml)?;
        }
        for list in &self.lists {
            write!(
                xml,
                "<w:num w:numId=\"{}\"><w:abstractNumId w:val=\"{}\"/></w:num>",
                list.num_id, list.abstract_id
            )?;
        }

        xml.push_str("</w:numbering>");
        Ok(xml)
    }
}
