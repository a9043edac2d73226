//! Shared helpers for integration tests.
//!
//! PDFs are generated with `lopdf` into temporary directories, so the tests
//! need no checked-in fixtures.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch directory for one test.
pub fn scratch() -> TempDir {
    tempfile::Builder::new()
        .prefix("pdftools-it-")
        .tempdir()
        .expect("Failed to create temp dir")
}

/// Write a PDF to `dir/name` with one page per entry of `texts`.
pub fn write_pdf(dir: &Path, name: &str, texts: &[&str]) -> PathBuf {
    let path = dir.join(name);
    build_document(texts).save(&path).expect("Failed to save PDF");
    path
}

/// Write a PDF with `pages` pages labelled "<label> page N".
pub fn write_numbered_pdf(dir: &Path, name: &str, label: &str, pages: usize) -> PathBuf {
    let texts: Vec<String> = (1..=pages).map(|n| format!("{label} page {n}")).collect();
    let texts: Vec<&str> = texts.iter().map(String::as_str).collect();
    write_pdf(dir, name, &texts)
}

/// Text of every page of the PDF at `path`, in page order.
pub fn page_texts(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("Failed to load PDF");
    doc.get_pages()
        .keys()
        .map(|&n| doc.extract_text(&[n]).unwrap_or_default().trim().to_string())
        .collect()
}

fn build_document(texts: &[&str]) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let kids: Vec<Object> = texts
        .iter()
        .map(|text| {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 18.into()]),
                    Operation::new("Td", vec![50.into(), 750.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let stream = Stream::new(dictionary! {}, content.encode().expect("encode"));
            let content_id = doc.add_object(stream);
            doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            })
            .into()
        })
        .collect();

    // Resources and MediaBox are inherited from the root so that merging and
    // splitting must carry them over.
    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}
