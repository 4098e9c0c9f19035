//! Page sequences and reordering
//!
//! A [`PageSequence`] is a read-only view over a source document's pages.
//! Reordering builds a new sequence; the source document and the original
//! sequence are left untouched.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::order::Permutation;
use crate::render::get_page_dimensions;
use lopdf::{Document, ObjectId};

/// One entry of a page sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageHandle {
    /// A page owned by the source document
    Source {
        /// Position in the source document's page tree
        index: usize,
        /// Page object in the source document
        id: ObjectId,
    },
    /// Padding page with no content
    Blank,
}

impl PageHandle {
    pub fn is_blank(&self) -> bool {
        matches!(self, PageHandle::Blank)
    }

    pub fn source_index(&self) -> Option<usize> {
        match self {
            PageHandle::Source { index, .. } => Some(*index),
            PageHandle::Blank => None,
        }
    }
}

/// Ordered page handles plus the size used for blank pages
#[derive(Debug, Clone, PartialEq)]
pub struct PageSequence {
    pages: Vec<PageHandle>,
    blank_size: (f32, f32),
}

impl PageSequence {
    pub fn new(pages: Vec<PageHandle>, blank_size: (f32, f32)) -> Self {
        Self { pages, blank_size }
    }

    /// Read the page tree of `doc` in document order.
    ///
    /// Blank pages take the dimensions of the first page.
    pub fn from_document(doc: &Document) -> Self {
        let pages: Vec<PageHandle> = doc
            .get_pages()
            .values()
            .enumerate()
            .map(|(index, &id)| PageHandle::Source { index, id })
            .collect();

        let blank_size = match pages.first() {
            Some(PageHandle::Source { id, .. }) => {
                get_page_dimensions(doc, *id).unwrap_or(DEFAULT_PAGE_DIMENSIONS)
            }
            _ => DEFAULT_PAGE_DIMENSIONS,
        };

        Self { pages, blank_size }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PageHandle> {
        self.pages.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageHandle> {
        self.pages.iter()
    }

    pub fn pages(&self) -> &[PageHandle] {
        &self.pages
    }

    /// (width, height) in points for blank pages
    pub fn blank_size(&self) -> (f32, f32) {
        self.blank_size
    }

    pub fn blank_count(&self) -> usize {
        self.pages.iter().filter(|page| page.is_blank()).count()
    }
}

impl<'a> IntoIterator for &'a PageSequence {
    type Item = &'a PageHandle;
    type IntoIter = std::slice::Iter<'a, PageHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages.iter()
    }
}

/// Build the sequence `source[order[0]], source[order[1]], ...`.
///
/// Indices past the end of `source` become blank pages.
pub fn apply_order(source: &PageSequence, order: &Permutation) -> PageSequence {
    let pages = order
        .iter()
        .map(|&idx| source.get(idx).copied().unwrap_or(PageHandle::Blank))
        .collect();

    PageSequence {
        pages,
        blank_size: source.blank_size,
    }
}
