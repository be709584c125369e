//! Minimal WordprocessingML support: paragraph text in, paragraph text out.

use crate::error::{ConvertError, ConvertResult};
use chrono::{Datelike, Timelike, Utc};
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::File;
use std::io::{Read, Seek, Write};
use std::path::Path;
use zip::result::ZipResult;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const DOCUMENT_PART: &str = "word/document.xml";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

/// Read the text of every paragraph in a DOCX file, in document order
pub fn read_paragraphs(path: &Path) -> ConvertResult<Vec<String>> {
    let file = File::open(path).map_err(|e| ConvertError::read(path, e))?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| ConvertError::read(path, format!("not a DOCX archive: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ConvertError::read(path, format!("missing {}: {}", DOCUMENT_PART, e)))?
        .read_to_string(&mut xml)
        .map_err(|e| ConvertError::read(path, e))?;

    parse_document_xml(&xml).map_err(|e| ConvertError::read(path, format!("malformed XML: {}", e)))
}

/// Collect `w:p` paragraph text from a `document.xml` body
///
/// Runs are concatenated; `w:tab` becomes a tab and `w:br`/`w:cr` a newline.
/// Paragraphs nested inside another one (text boxes) are emitted as their
/// own entries, ahead of the paragraph that anchors them.
pub fn parse_document_xml(xml: &str) -> quick_xml::Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    // Innermost open paragraph last
    let mut open: Vec<String> = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => open.push(String::new()),
                b"t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match (e.local_name().as_ref(), open.last_mut()) {
                (b"p", _) => paragraphs.push(String::new()),
                (b"tab", Some(current)) => current.push('\t'),
                (b"br" | b"cr", Some(current)) => current.push('\n'),
                _ => {}
            },
            Event::Text(t) if in_text => {
                if let Some(current) = open.last_mut() {
                    current.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => {
                    if let Some(done) = open.pop() {
                        paragraphs.push(done);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

/// Write a minimal DOCX package with one paragraph per entry
pub fn write_docx<W, S>(writer: W, paragraphs: &[S]) -> ZipResult<W>
where
    W: Write + Seek,
    S: AsRef<str>,
{
    let mut zip = ZipWriter::new(writer);
    let now = chrono::Local::now();
    let options: FileOptions<'_, ()> = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(
            zip::DateTime::from_date_and_time(
                now.year() as u16,
                now.month() as u8,
                now.day() as u8,
                now.hour() as u8,
                now.minute() as u8,
                now.second() as u8,
            )
            .unwrap_or_default(),
        );

    zip.start_file("[Content_Types].xml", options)?;
    zip.write_all(CONTENT_TYPES.as_bytes())?;

    zip.start_file("_rels/.rels", options)?;
    zip.write_all(PACKAGE_RELS.as_bytes())?;

    zip.start_file("docProps/core.xml", options)?;
    zip.write_all(core_properties().as_bytes())?;

    zip.start_file(DOCUMENT_PART, options)?;
    zip.write_all(document_xml(paragraphs).as_bytes())?;

    zip.finish()
}

fn document_xml<S: AsRef<str>>(paragraphs: &[S]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
    );

    for paragraph in paragraphs {
        let text = strip_invalid_xml_chars(paragraph.as_ref());
        if text.is_empty() {
            xml.push_str("<w:p/>");
        } else {
            xml.push_str(r#"<w:p><w:r><w:t xml:space="preserve">"#);
            xml.push_str(&escape(text.as_str()));
            xml.push_str("</w:t></w:r></w:p>");
        }
    }

    xml.push_str("<w:sectPr/></w:body></w:document>");
    xml
}

fn core_properties() -> String {
    let created = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:creator>docbridge</dc:creator><dcterms:created xsi:type="dcterms:W3CDTF">{created}</dcterms:created></cp:coreProperties>"#
    )
}

/// XML 1.0 forbids most control characters (PDF extraction emits form feeds)
fn strip_invalid_xml_chars(text: &str) -> String {
    text.chars()
        .filter(|&c| matches!(c, '\t' | '\n' | '\r') || c >= ' ')
        .collect()
}
