//! Minimal Office Open XML (DOCX) packaging.
//!
//! A DOCX file is a ZIP archive of XML parts. Only the four parts Word needs
//! to open a document are written: content types, package relationships,
//! the main document and core properties.

use quick_xml::escape::escape;
use std::io::{Seek, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
</Types>"#;

const PACKAGE_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
</Relationships>"#;

/// US Letter, 1 inch margins, in twentieths of a point.
const SECTION_PROPERTIES: &str = r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#;

/// Text content of a document, one entry per page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocxDocument {
    /// Title stored in the core properties.
    pub title: Option<String>,

    /// Paragraphs of each page, in order.
    pub pages: Vec<Vec<String>>,
}

impl DocxDocument {
    /// Render `word/document.xml`.
    pub fn document_xml(&self) -> String {
        let mut body = String::new();

        for (index, page) in self.pages.iter().enumerate() {
            if index > 0 {
                body.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);
            }
            if page.is_empty() {
                body.push_str("<w:p/>");
            }
            for paragraph in page {
                body.push_str(r#"<w:p><w:r><w:t xml:space="preserve">"#);
                body.push_str(&escape(&sanitize(paragraph)));
                body.push_str("</w:t></w:r></w:p>");
            }
        }

        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                "\n",
                r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
                "<w:body>{}{}</w:body></w:document>"
            ),
            body, SECTION_PROPERTIES
        )
    }

    /// Render `docProps/core.xml`.
    pub fn core_xml(&self) -> String {
        let title = self
            .title
            .as_deref()
            .map(|t| format!("<dc:title>{}</dc:title>", escape(&sanitize(t))))
            .unwrap_or_default();

        format!(
            concat!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
                "\n",
                r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
                r#"xmlns:dc="http://purl.org/dc/elements/1.1/">"#,
                "{}<dc:creator>pdftools</dc:creator></cp:coreProperties>"
            ),
            title
        )
    }

    /// Write the complete archive to `out` and return the writer.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be written.
    pub fn write<W: Write + Seek>(&self, out: W) -> zip::result::ZipResult<W> {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(out);

        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", PACKAGE_RELS.to_string()),
            ("word/document.xml", self.document_xml()),
            ("docProps/core.xml", self.core_xml()),
        ];
        for (name, content) in parts {
            zip.start_file(name, options)?;
            zip.write_all(content.as_bytes())?;
        }

        zip.finish()
    }
}

/// Drop characters XML 1.0 cannot carry. Tabs become spaces.
fn sanitize(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\t' => Some(' '),
            '\n' | '\r' => Some(c),
            c if c.is_control() => None,
            '\u{FFFE}' | '\u{FFFF}' => None,
            c => Some(c),
        })
        .collect()
}
