#![no_main]

use libfuzzer_sys::fuzz_target;
use pdftools::config::PageRange;
use pdftools::merge::{InputKind, classify_input, normalize_input, resolve_output_path};
use pdftools::utils::has_pdf_extension;
use std::path::Path;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };

    let normalized = normalize_input(line);
    assert_eq!(normalized, normalized.trim());

    // Arbitrary strings rarely name real files; whatever they name must be
    // classified without panicking.
    if let Ok(InputKind::PdfFile(path)) = classify_input(line) {
        assert!(has_pdf_extension(&path));
    }

    let output = resolve_output_path(line, Path::new("fuzz-out"));
    assert!(
        output.to_string_lossy().to_ascii_lowercase().ends_with(".pdf"),
        "{output:?}"
    );

    if let Ok(range) = PageRange::parse(line) {
        for page in range.to_pages(64) {
            assert!(range.contains(page));
        }
    }
});
