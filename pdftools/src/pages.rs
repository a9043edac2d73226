//! Page tree manipulation.
//!
//! Merging and splitting both move pages between page trees. A page can
//! inherit `Resources`, `MediaBox`, `CropBox` and `Rotate` from any ancestor
//! `Pages` node, so before a page is detached from its original parent those
//! attributes are copied onto the page itself.

use crate::error::{PdfToolsError, Result};
use lopdf::{Document, Object, ObjectId};

/// Page attributes a page may inherit from its ancestors.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Catalog entries that refer to pages across the whole document.
const DOCUMENT_WIDE_KEYS: [&[u8]; 4] = [
    b"Outlines",
    b"StructTreeRoot",
    b"PageLabels",
    b"OpenAction",
];

/// Guard against malformed trees whose `Parent` chain loops.
const MAX_TREE_DEPTH: usize = 64;

/// Page extractor for manipulating pages in PDFs.
#[derive(Debug, Clone, Default)]
pub struct PageExtractor;

impl PageExtractor {
    /// Create a new page extractor.
    pub fn new() -> Self {
        Self
    }

    /// Get the number of pages in a document.
    pub fn page_count(&self, doc: &Document) -> usize {
        doc.get_pages().len()
    }

    /// Build a copy of `doc` whose page tree holds only `page_number`
    /// (1-indexed).
    ///
    /// Outlines, structure tree, page labels and open action are dropped
    /// since they point at pages that no longer exist, and objects that are
    /// no longer reachable are pruned.
    ///
    /// # Errors
    ///
    /// Returns an error if the page does not exist or the page tree is
    /// malformed.
    pub fn extract_page(&self, doc: &Document, page_number: u32) -> Result<Document> {
        let pages = doc.get_pages();
        let page_id = *pages.get(&page_number).ok_or_else(|| {
            PdfToolsError::split_failed(format!(
                "page {page_number} does not exist (document has {} pages)",
                pages.len()
            ))
        })?;

        let mut single = doc.clone();
        self.materialize_inherited(&mut single, page_id)?;

        let root_id = pages_root_id(&single)?;

        let catalog = single
            .catalog_mut()
            .map_err(|e| PdfToolsError::split_failed(format!("Failed to get catalog: {e}")))?;
        for key in DOCUMENT_WIDE_KEYS {
            catalog.remove(key);
        }

        let root = single
            .get_dictionary_mut(root_id)
            .map_err(|e| PdfToolsError::split_failed(format!("Failed to get pages object: {e}")))?;
        root.set("Kids", Object::Array(vec![Object::Reference(page_id)]));
        root.set("Count", Object::Integer(1));

        single
            .get_dictionary_mut(page_id)
            .map_err(|e| PdfToolsError::split_failed(format!("Failed to get page: {e}")))?
            .set("Parent", Object::Reference(root_id));

        single.prune_objects();

        Ok(single)
    }

    /// Copy attributes that `page_id` inherits from its ancestors onto the
    /// page dictionary itself. Attributes already present on the page win.
    pub fn materialize_inherited(&self, doc: &mut Document, page_id: ObjectId) -> Result<()> {
        let page = doc
            .get_dictionary(page_id)
            .map_err(|e| PdfToolsError::other(format!("Failed to get page: {e}")))?;

        let mut missing: Vec<&[u8]> = INHERITABLE_KEYS
            .iter()
            .copied()
            .filter(|key| !page.has(key))
            .collect();
        let mut inherited: Vec<(&[u8], Object)> = Vec::new();
        let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
        let mut depth = 0;

        while let Some(parent_id) = parent
            && !missing.is_empty()
            && depth < MAX_TREE_DEPTH
        {
            let Ok(node) = doc.get_dictionary(parent_id) else {
                break;
            };

            missing.retain(|key| match node.get(key) {
                Ok(value) => {
                    inherited.push((*key, value.clone()));
                    false
                }
                Err(_) => true,
            });

            parent = node.get(b"Parent").and_then(Object::as_reference).ok();
            depth += 1;
        }

        if inherited.is_empty() {
            return Ok(());
        }

        let page = doc
            .get_dictionary_mut(page_id)
            .map_err(|e| PdfToolsError::other(format!("Failed to get page: {e}")))?;
        for (key, value) in inherited {
            page.set(key.to_vec(), value);
        }

        Ok(())
    }

    /// Append already-imported pages to the end of the root page tree of
    /// `doc`, re-parenting them onto the root and updating `Count`.
    ///
    /// The pages must already live in `doc.objects` and should have had
    /// their inherited attributes materialized.
    pub fn append_pages(&self, doc: &mut Document, page_ids: &[ObjectId]) -> Result<()> {
        let root_id = pages_root_id(doc)?;

        let root = doc
            .get_dictionary_mut(root_id)
            .map_err(|e| PdfToolsError::merge_failed(format!("Failed to get pages object: {e}")))?;

        let kids = root
            .get_mut(b"Kids")
            .map_err(|_| PdfToolsError::merge_failed("Pages dictionary missing Kids array"))?;

        if let Object::Array(kids_array) = kids {
            kids_array.extend(page_ids.iter().map(|&id| Object::Reference(id)));
        } else {
            return Err(PdfToolsError::merge_failed("Kids is not an array"));
        }

        let current_count = root.get(b"Count").and_then(|c| c.as_i64()).unwrap_or(0);
        root.set(
            "Count",
            Object::Integer(current_count + page_ids.len() as i64),
        );

        for &page_id in page_ids {
            doc.get_dictionary_mut(page_id)
                .map_err(|e| PdfToolsError::merge_failed(format!("Failed to get page: {e}")))?
                .set("Parent", Object::Reference(root_id));
        }

        Ok(())
    }
}

/// Object id of the root `Pages` node referenced by the catalog.
fn pages_root_id(doc: &Document) -> Result<ObjectId> {
    doc.catalog()
        .and_then(|catalog| catalog.get(b"Pages"))
        .and_then(Object::as_reference)
        .map_err(|e| PdfToolsError::other(format!("Failed to get pages reference: {e}")))
}
