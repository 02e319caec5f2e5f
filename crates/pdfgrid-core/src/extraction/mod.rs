pub mod pdftotext;

use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// A raw text item as reported by an extraction backend.
///
/// `transform` is the item's 2D affine matrix `[a, b, c, d, e, f]`; only the
/// translation components `e` (x) and `f` (y) are used. y grows upward, so
/// larger values sit higher on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub transform: [f64; 6],
}

impl TextItem {
    pub fn at(text: impl Into<String>, x: f64, y: f64) -> Self {
        TextItem {
            text: text.into(),
            transform: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }
}

/// Text items extracted from a single page of a PDF.
#[derive(Debug, Clone)]
pub struct PageItems {
    pub page_number: usize,
    pub items: Vec<TextItem>,
}

/// One positioned piece of text, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub page: usize,
}

impl TextFragment {
    /// Build a fragment from a backend item, discarding whitespace-only text.
    pub fn from_item(item: &TextItem, page: usize) -> Option<TextFragment> {
        let text = item.text.trim();
        if text.is_empty() {
            return None;
        }
        Some(TextFragment {
            text: text.to_string(),
            x: item.transform[4],
            y: item.transform[5],
            page,
        })
    }
}

/// Fragments belonging to one page, in extraction order.
#[derive(Debug, Clone)]
pub struct PageFragments {
    pub page_number: usize,
    pub fragments: Vec<TextFragment>,
}

/// Convert backend pages into fragment pages, sorted by ascending page number.
///
/// Pages that end up without usable fragments are kept so row numbering
/// stays aligned with the document; they simply contribute no rows.
pub fn collect_fragments(pages: &[PageItems]) -> Vec<PageFragments> {
    let mut out: Vec<PageFragments> = pages
        .iter()
        .map(|p| {
            let fragments: Vec<TextFragment> = p
                .items
                .iter()
                .filter_map(|item| TextFragment::from_item(item, p.page_number))
                .collect();
            let discarded = p.items.len() - fragments.len();
            if discarded > 0 {
                log::debug!(
                    "page {}: discarded {} blank text item(s)",
                    p.page_number,
                    discarded
                );
            }
            PageFragments {
                page_number: p.page_number,
                fragments,
            }
        })
        .collect();
    out.sort_by_key(|p| p.page_number);
    out
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract positioned text items from PDF bytes, one `PageItems` per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageItems>, GridError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
