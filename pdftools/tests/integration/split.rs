//! Integration tests for splitting.

use pdftools::Config;
use pdftools::split::split_pdf;
use rstest::rstest;

use crate::common::{page_texts, scratch, write_numbered_pdf};

#[rstest]
#[case(1)]
#[case(4)]
#[case(11)]
#[tokio::test]
async fn test_split_produces_one_file_per_page(#[case] pages: usize) {
    let dir = scratch();
    let input = write_numbered_pdf(dir.path(), "book.pdf", "book", pages);
    let out = scratch();
    let config = Config {
        output_dir: out.path().to_path_buf(),
        ..Config::default()
    };

    let result = split_pdf(&input, &config).await.expect("split");

    assert_eq!(result.output_dir, out.path().join("book_split_pages"));
    assert_eq!(result.files.len(), pages);
    for (index, file) in result.files.iter().enumerate() {
        let n = index + 1;
        assert_eq!(
            file.file_name().unwrap().to_string_lossy(),
            format!("book_page_{n}.pdf")
        );
        assert_eq!(page_texts(file), vec![format!("book page {n}")]);
    }

    let on_disk = std::fs::read_dir(&result.output_dir).unwrap().count();
    assert_eq!(on_disk, pages);
}

#[tokio::test]
async fn test_split_stem_with_dots() {
    let dir = scratch();
    let input = write_numbered_pdf(dir.path(), "v1.2.notes.pdf", "n", 2);
    let config = Config {
        output_dir: dir.path().to_path_buf(),
        ..Config::default()
    };

    let first = split_pdf(&input, &config).await.expect("split");
    let second = split_pdf(&input, &config).await.expect("split");

    assert_eq!(first.output_dir, dir.path().join("v1.2.notes_split_pages"));
    assert_eq!(second.output_dir, dir.path().join("v1.2.notes_split_pages(1)"));
    assert!(second.output_dir.join("v1.2.notes_page_2.pdf").exists());
}
