//! Integration tests for DOCX conversion.

use pdftools::Config;
use pdftools::convert::{convert_pdf, resolve_output_path};
use std::io::{Cursor, Read};
use std::path::Path;

use crate::common::{scratch, write_numbered_pdf, write_pdf};

fn read_part(docx: &Path, part: &str) -> String {
    let bytes = std::fs::read(docx).expect("read docx");
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("docx is a zip");
    let mut xml = String::new();
    archive
        .by_name(part)
        .expect("part present")
        .read_to_string(&mut xml)
        .expect("utf-8 part");
    xml
}

#[tokio::test]
async fn test_convert_to_default_path() {
    let dir = scratch();
    let input = write_numbered_pdf(dir.path(), "minutes.pdf", "Minutes", 3);

    let output = resolve_output_path(&input, None);
    let stats = convert_pdf(&input, &output, &Config::default())
        .await
        .expect("convert");

    assert_eq!(stats.output_path, dir.path().join("minutes.docx"));
    assert!(stats.file_size > 0);

    let xml = read_part(&output, "word/document.xml");
    for n in 1..=3 {
        assert!(xml.contains(&format!("Minutes page {n}")));
    }
    assert!(read_part(&output, "[Content_Types].xml").contains("wordprocessingml"));
}

#[tokio::test]
async fn test_convert_to_custom_name() {
    let dir = scratch();
    let input = write_pdf(dir.path(), "scan.pdf", &["Fish & Chips"]);

    let output = resolve_output_path(&input, Some("supper.docx"));
    convert_pdf(&input, &output, &Config::default())
        .await
        .expect("convert");

    assert_eq!(output, dir.path().join("supper.docx"));
    assert!(read_part(&output, "word/document.xml").contains("Fish &amp; Chips"));
}

#[tokio::test]
async fn test_convert_page_without_text() {
    let dir = scratch();
    let input = write_pdf(dir.path(), "gap.pdf", &["before", "", "after"]);

    let output = resolve_output_path(&input, None);
    let stats = convert_pdf(&input, &output, &Config::default())
        .await
        .expect("convert");

    assert_eq!(stats.pages_converted, 3);
    assert_eq!(stats.pages_without_text, 1);
}
