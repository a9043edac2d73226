//! Integration tests for error handling and edge cases.

use pdftools::Config;
use pdftools::convert::convert_pdf;
use pdftools::error::PdfToolsError;
use pdftools::merge::merge_pdfs;
use pdftools::split::split_pdf;
use std::path::PathBuf;

use crate::common::{scratch, write_numbered_pdf};

#[tokio::test]
async fn test_error_nonexistent_input() {
    let dir = scratch();
    let output = dir.path().join("out.pdf");

    let result = merge_pdfs(
        &[PathBuf::from("/nonexistent/file.pdf")],
        &output,
        &Config::default(),
    )
    .await;

    assert!(matches!(result, Err(PdfToolsError::FileNotFound { .. })));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_error_empty_input_list() {
    let dir = scratch();
    let output = dir.path().join("out.pdf");

    let err = merge_pdfs(&[], &output, &Config::default())
        .await
        .unwrap_err();

    assert!(matches!(err, PdfToolsError::NoFilesToMerge));
    assert_eq!(err.to_string(), "No PDF files to merge");
    assert!(!output.exists());
}

#[tokio::test]
async fn test_error_invalid_pdf_aborts_merge() {
    let dir = scratch();
    let good = write_numbered_pdf(dir.path(), "good.pdf", "good", 1);
    let bad = dir.path().join("bad.pdf");
    std::fs::write(&bad, b"This is not a PDF file").unwrap();
    let output = dir.path().join("out.pdf");

    let result = merge_pdfs(&[good, bad], &output, &Config::default()).await;

    assert!(result.is_err());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_continue_on_error_writes_remaining() {
    let dir = scratch();
    let good = write_numbered_pdf(dir.path(), "good.pdf", "good", 2);
    let bad = dir.path().join("bad.pdf");
    std::fs::write(&bad, b"%PDF-1.4 truncated").unwrap();
    let output = dir.path().join("out.pdf");
    let config = Config {
        continue_on_error: true,
        ..Config::default()
    };

    let outcome = merge_pdfs(&[bad.clone(), good], &output, &config)
        .await
        .expect("merge");

    assert_eq!(outcome.statistics.total_pages, 2);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].0, bad);
    assert!(output.exists());
}

#[tokio::test]
async fn test_split_errors_leave_no_directory() {
    let dir = scratch();
    let config = Config {
        output_dir: dir.path().to_path_buf(),
        ..Config::default()
    };

    let missing = dir.path().join("missing.pdf");
    assert!(matches!(
        split_pdf(&missing, &config).await,
        Err(PdfToolsError::FileNotFound { .. })
    ));

    let folder = dir.path().join("folder.pdf");
    std::fs::create_dir(&folder).unwrap();
    assert!(matches!(
        split_pdf(&folder, &config).await,
        Err(PdfToolsError::NotAFile { .. })
    ));

    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("folder.pdf")]);
}

#[tokio::test]
async fn test_convert_missing_input() {
    let dir = scratch();
    let result = convert_pdf(
        &dir.path().join("nope.pdf"),
        &dir.path().join("nope.docx"),
        &Config::default(),
    )
    .await;

    assert!(matches!(result, Err(PdfToolsError::FileNotFound { .. })));
    assert!(!dir.path().join("nope.docx").exists());
}
