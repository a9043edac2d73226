//! Integration tests for merging, from input collection to the written file.

use pdftools::Config;
use pdftools::config::CompressionLevel;
use pdftools::merge::{InputKind, MergeList, classify_input, merge_pdfs, resolve_output_path};
use rstest::rstest;

use crate::common::{page_texts, scratch, write_numbered_pdf};

#[tokio::test]
async fn test_merge_preserves_page_order() {
    let dir = scratch();
    let a = write_numbered_pdf(dir.path(), "a.pdf", "A", 2);
    let b = write_numbered_pdf(dir.path(), "b.pdf", "B", 3);
    let c = write_numbered_pdf(dir.path(), "c.pdf", "C", 1);

    let output = resolve_output_path("all", dir.path());
    let outcome = merge_pdfs(&[b, a, c], &output, &Config::default())
        .await
        .expect("merge");

    assert_eq!(outcome.statistics.total_pages, 6);
    assert_eq!(output, dir.path().join("all.pdf"));
    assert_eq!(
        page_texts(&output),
        vec![
            "B page 1", "B page 2", "B page 3", "A page 1", "A page 2", "C page 1"
        ]
    );
}

#[tokio::test]
async fn test_merge_directory_contents() {
    let dir = scratch();
    let inputs = dir.path().join("inputs");
    std::fs::create_dir(&inputs).unwrap();
    write_numbered_pdf(&inputs, "02.pdf", "second", 1);
    write_numbered_pdf(&inputs, "01.pdf", "first", 1);
    std::fs::write(inputs.join("ignore.txt"), b"x").unwrap();

    let InputKind::Directory { pdfs, .. } = classify_input(&inputs.to_string_lossy()).unwrap()
    else {
        panic!("expected a directory");
    };

    let mut list = MergeList::new();
    list.extend(pdfs);
    assert_eq!(list.len(), 2);

    let output = resolve_output_path("", dir.path());
    merge_pdfs(list.paths(), &output, &Config::default())
        .await
        .expect("merge");

    assert_eq!(output, dir.path().join("merged_output.pdf"));
    assert_eq!(page_texts(&output), vec!["first page 1", "second page 1"]);
}

#[tokio::test]
async fn test_merge_does_not_overwrite_previous_output() {
    let dir = scratch();
    let a = write_numbered_pdf(dir.path(), "a.pdf", "A", 1);
    let config = Config {
        output_dir: dir.path().to_path_buf(),
        ..Config::default()
    };

    for expected in ["merged_output.pdf", "merged_output(1).pdf", "merged_output(2).pdf"] {
        let output = resolve_output_path("", &config.output_dir);
        assert_eq!(output, dir.path().join(expected));
        merge_pdfs(&[a.clone()], &output, &config).await.expect("merge");
        assert!(output.exists());
    }
}

#[rstest]
#[case(CompressionLevel::None)]
#[case(CompressionLevel::Standard)]
#[case(CompressionLevel::Maximum)]
#[tokio::test]
async fn test_merge_with_compression(#[case] compression: CompressionLevel) {
    let dir = scratch();
    let a = write_numbered_pdf(dir.path(), "a.pdf", "A", 2);
    let b = write_numbered_pdf(dir.path(), "b.pdf", "B", 2);
    let config = Config {
        compression,
        ..Config::default()
    };

    let output = dir.path().join("out.pdf");
    let outcome = merge_pdfs(&[a, b], &output, &config).await.expect("merge");

    assert_eq!(outcome.write.compressed, compression != CompressionLevel::None);
    assert_eq!(page_texts(&output).len(), 4);
}
