use std::io::{Cursor, Write};

use chrono::{DateTime, Utc};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::Result;

/// A paragraph of a WordprocessingML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paragraph {
    Empty,
    Plain(String),
    Bold(String),
}

/// In-memory `.docx` builder holding a flat list of paragraphs
#[derive(Debug, Clone)]
pub struct DocxDocument {
    title: String,
    created: DateTime<Utc>,
    paragraphs: Vec<Paragraph>,
}

impl DocxDocument {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            created: Utc::now(),
            paragraphs: Vec::new(),
        }
    }

    pub fn add_empty_paragraph(&mut self) {
        self.paragraphs.push(Paragraph::Empty);
    }

    pub fn add_paragraph(&mut self, text: impl Into<String>) {
        self.paragraphs.push(Paragraph::Plain(text.into()));
    }

    pub fn add_bold_paragraph(&mut self, text: impl Into<String>) {
        self.paragraphs.push(Paragraph::Bold(text.into()));
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// The `word/document.xml` part
    pub fn document_xml(&self) -> String {
        let body: String = self.paragraphs.iter().map(paragraph_xml).collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>{body}
    <w:sectPr>
      <w:pgSz w:w="12240" w:h="15840"/>
      <w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/>
    </w:sectPr>
  </w:body>
</w:document>"#
        )
    }

    /// The `docProps/core.xml` part
    fn core_xml(&self) -> String {
        let created = self.created.format("%Y-%m-%dT%H:%M:%SZ");
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{title}</dc:title>
  <dcterms:created xsi:type="dcterms:W3CDTF">{created}</dcterms:created>
  <dcterms:modified xsi:type="dcterms:W3CDTF">{created}</dcterms:modified>
</cp:coreProperties>"#,
            title = xml_escape_text(&self.title),
        )
    }

    /// Assemble the zipped package
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let opt = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", opt)?;
        zip.write_all(CONTENT_TYPES_XML.as_bytes())?;

        zip.start_file("_rels/.rels", opt)?;
        zip.write_all(PACKAGE_RELS_XML.as_bytes())?;

        zip.start_file("docProps/core.xml", opt)?;
        zip.write_all(self.core_xml().as_bytes())?;

        zip.start_file("word/document.xml", opt)?;
        zip.write_all(self.document_xml().as_bytes())?;

        zip.start_file("word/_rels/document.xml.rels", opt)?;
        zip.write_all(DOCUMENT_RELS_XML.as_bytes())?;

        zip.start_file("word/styles.xml", opt)?;
        zip.write_all(STYLES_XML.as_bytes())?;

        Ok(zip.finish()?.into_inner())
    }
}

fn paragraph_xml(paragraph: &Paragraph) -> String {
    match paragraph {
        Paragraph::Empty => "\n    <w:p/>".to_string(),
        Paragraph::Plain(text) => format!(
            "\n    <w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
            run_text_xml(text)
        ),
        Paragraph::Bold(text) => format!(
            "\n    <w:p><w:r><w:rPr><w:b/></w:rPr><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
            run_text_xml(text)
        ),
    }
}

/// Run content: tabs become `<w:tab/>`, line breaks become `<w:br/>`
fn run_text_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\t' => out.push_str("</w:t><w:tab/><w:t xml:space=\"preserve\">"),
            '\n' | '\r' => out.push_str("</w:t><w:br/><w:t xml:space=\"preserve\">"),
            _ => push_escaped(ch, &mut out),
        }
    }
    out
}

/// Escape markup characters; characters XML 1.0 cannot carry are dropped
fn xml_escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        push_escaped(ch, &mut out);
    }
    out
}

fn push_escaped(ch: char, out: &mut String) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&apos;"),
        '\t' | '\n' | '\r' => out.push(ch),
        c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {}
        _ => out.push(ch),
    }
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
  <Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
</Types>"#;

const PACKAGE_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>"#;

const DOCUMENT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#;

const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:style w:type="paragraph" w:default="1" w:styleId="Normal">
    <w:name w:val="Normal"/>
    <w:qFormat/>
  </w:style>
</w:styles>"#;
