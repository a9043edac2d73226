//! Path helpers shared by the merge, split and convert operations.

use std::path::{Path, PathBuf};

/// Return `path` if nothing exists there, otherwise the first free sibling
/// named `stem(1)ext`, `stem(2)ext`, ...
///
/// Candidates are probed sequentially starting from 1, so with `k` numbered
/// collisions already on disk the result carries the suffix `(k+1)`.
///
/// # Examples
///
/// ```no_run
/// use pdftools::utils::unique_path;
/// use std::path::Path;
///
/// // With "report.pdf" already present this yields "report(1).pdf".
/// let path = unique_path(Path::new("report.pdf"));
/// ```
pub fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    next_free(path.parent(), &stem, &ext)
}

/// Like [`unique_path`], but the whole final component is treated as the
/// stem. Directory names such as `v1.2_split_pages` keep their dots intact:
/// the first collision yields `v1.2_split_pages(1)`.
pub fn unique_dir_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    next_free(path.parent(), &name, "")
}

fn next_free(parent: Option<&Path>, stem: &str, ext: &str) -> PathBuf {
    let parent = parent.unwrap_or_else(|| Path::new(""));
    let mut counter: u64 = 1;
    loop {
        let candidate = parent.join(format!("{stem}({counter}){ext}"));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Check whether `path` ends in `.pdf`, ignoring case.
pub fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Append `.{ext}` to `name` unless it already ends with it (ignoring case).
pub fn ensure_extension(name: &str, ext: &str) -> String {
    let suffix = format!(".{ext}");
    let has_suffix = name.len() >= suffix.len()
        && name.is_char_boundary(name.len() - suffix.len())
        && name[name.len() - suffix.len()..].eq_ignore_ascii_case(&suffix);

    if has_suffix {
        name.to_string()
    } else {
        format!("{name}{suffix}")
    }
}

/// File stem of `path` as an owned string, or `"document"` when it has none.
pub fn file_stem_or_default(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "document".to_string())
}

/// Format file size as human-readable string.
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{size} bytes")
    }
}
