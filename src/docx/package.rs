//! OPC packaging: writes a [`Document`] as a `.docx` ZIP archive.
//!
//! The package holds the minimal set of parts Word needs: content types,
//! package and document relationships, the main document, styles, numbering
//! and the core/app property parts.
use super::document::Document;
use super::error::Result;
use super::style::{default_styles, generate_styles_xml};
use crate::common::xml::escape_xml;
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};

/// Part names written to every package, in archive order.
pub const PACKAGE_PARTS: [&str; 8] = [
    "[Content_Types].xml",
    "_rels/.rels",
    "word/document.xml",
    "word/styles.xml",
    "word/numbering.xml",
    "word/_rels/document.xml.rels",
    "docProps/core.xml",
    "docProps/app.xml",
];

const APPLICATION: &str = "mathdocx";

const CONTENT_TYPES_XML: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>",
    "<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">",
    "<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>",
    "<Default Extension=\"xml\" ContentType=\"application/xml\"/>",
    "<Override PartName=\"/word/document.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>",
    "<Override PartName=\"/word/styles.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml\"/>",
    "<Override PartName=\"/word/numbering.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml\"/>",
    "<Override PartName=\"/docProps/core.xml\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>",
    "<Override PartName=\"/docProps/app.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.extended-properties+xml\"/>",
    "</Types>"
);

const PACKAGE_RELS_XML: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>",
    "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\"/>",
    "<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties\" Target=\"docProps/core.xml\"/>",
    "<Relationship Id=\"rId3\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties\" Target=\"docProps/app.xml\"/>",
    "</Relationships>"
);

const DOCUMENT_RELS_XML: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>",
    "<Relationships xmlns=\"http://schemas.openxmlformats.org/package/2006/relationships\">",
    "<Relationship Id=\"rId1\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles\" Target=\"styles.xml\"/>",
    "<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering\" Target=\"numbering.xml\"/>",
    "</Relationships>"
);

fn core_properties_xml(document: &Document) -> Result<String> {
    let properties = document.properties();
    let created = properties.created_w3cdtf();

    let mut xml = String::with_capacity(768);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>");
    xml.push_str("<cp:coreProperties xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" xmlns:dc=\"http://purl.org/dc/elements/1.1/\" xmlns:dcterms=\"http://purl.org/dc/terms/\" xmlns:dcmitype=\"http://purl.org/dc/dcmitype/\" xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">");
    if let Some(ref title) = properties.title {
        write!(xml, "<dc:title>{}</dc:title>", escape_xml(title))?;
    }
    if let Some(ref creator) = properties.creator {
        let creator = escape_xml(creator);
        write!(
            xml,
            "<dc:creator>{}</dc:creator><cp:lastModifiedBy>{}</cp:lastModifiedBy>",
            creator, creator
        )?;
    }
    write!(
        xml,
        "<dcterms:created xsi:type=\"dcterms:W3CDTF\">{}</dcterms:created><dcterms:modified xsi:type=\"dcterms:W3CDTF\">{}</dcterms:modified>",
        created, created
    )?;
    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

fn app_properties_xml(document: &Document) -> Result<String> {
    let mut xml = String::with_capacity(384);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>");
    xml.push_str("<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\" xmlns:vt=\"http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes\">");
    write!(
        xml,
        "<Application>{}</Application><Paragraphs>{}</Paragraphs><AppVersion>{}</AppVersion>",
        APPLICATION,
        document.paragraph_count(),
        env!("CARGO_PKG_VERSION")
    )?;
    xml.push_str("</Properties>");
    Ok(xml)
}

/// Serialize `document` into the bytes of a `.docx` file.
pub fn to_bytes(document: &Document) -> Result<Vec<u8>> {
    let parts: [(&str, String); 8] = [
        (PACKAGE_PARTS[0], CONTENT_TYPES_XML.to_string()),
        (PACKAGE_PARTS[1], PACKAGE_RELS_XML.to_string()),
        (PACKAGE_PARTS[2], document.to_xml()?),
        (PACKAGE_PARTS[3], generate_styles_xml(&default_styles())?),
        (PACKAGE_PARTS[4], document.numbering().to_xml()?),
        (PACKAGE_PARTS[5], DOCUMENT_RELS_XML.to_string()),
        (PACKAGE_PARTS[6], core_properties_xml(document)?),
        (PACKAGE_PARTS[7], app_properties_xml(document)?),
    ];

    let mut zip_writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in &parts {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        zip_writer.start_file(*name, options)?;
        zip_writer.write_all(content.as_bytes())?;
    }

    let cursor = zip_writer.finish()?;
    Ok(cursor.into_inner())
}

/// Write `document` to a `.docx` file at `path`.
pub fn save(document: &Document, path: impl AsRef<Path>) -> Result<()> {
    let bytes = to_bytes(document)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use zip::ZipArchive;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_package_contains_all_parts() {
        let mut doc = Document::new();
        doc.add_paragraph_with_text("Hello");
        let bytes = to_bytes(&doc).unwrap();

        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in PACKAGE_PARTS {
            assert!(names.contains(&part), "missing {}", part);
        }
        assert!(read_part(&bytes, "word/document.xml").contains("Hello"));
    }

    #[test]
    fn test_core_properties_escaped() {
        let mut doc = Document::new();
        doc.properties_mut().title = Some("A & B".to_string());
        doc.properties_mut().creator = Some("Ada".to_string());
        let bytes = to_bytes(&doc).unwrap();

        let core = read_part(&bytes, "docProps/core.xml");
        assert!(core.contains("<dc:title>A &amp; B</dc:title>"));
        assert!(core.contains("<dc:creator>Ada</dc:creator>"));
        assert!(core.contains("xsi:type=\"dcterms:W3CDTF\""));

        let app = read_part(&bytes, "docProps/app.xml");
        assert!(app.contains("<Paragraphs>0</Paragraphs>"));
    }

    #[test]
    fn test_save_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");
        save(&Document::new(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert!(read_part(&bytes, "word/numbering.xml").contains("<w:numbering"));
    }
}
