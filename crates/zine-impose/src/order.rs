//! Signature page ordering
//!
//! A saddle-folded zine prints four logical pages on every half-sheet, so the
//! page count is first padded to a multiple of four. The order then walks two
//! cursors inward from both ends of the padded range, alternating which end
//! leads on each output side.
//!
//! For a 6-page document (padded to 8):
//!
//! ```text
//! side 1: [8, 1]   side 2: [2, 7]
//! side 3: [6, 3]   side 4: [4, 5]
//! ```
//!
//! which is `[7, 0, 1, 6, 5, 2, 3, 4]` once converted to zero-based indices.

use crate::constants::{MAX_PAGE_COUNT, PAGES_PER_SIGNATURE};
use crate::types::{ImposeError, Result};
use std::ops::Deref;

/// Zero-based source indices in print order.
///
/// Indices at or beyond the source page count refer to blank padding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// Padded page count this permutation covers
    pub fn signature_size(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for Permutation {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(order: Permutation) -> Self {
        order.0
    }
}

/// Smallest multiple of four that holds `page_count` pages.
pub fn signature_size(page_count: usize) -> usize {
    if page_count % PAGES_PER_SIGNATURE == 0 {
        page_count
    } else {
        (page_count / PAGES_PER_SIGNATURE + 1) * PAGES_PER_SIGNATURE
    }
}

/// Compute the print order for a document of `page_count` pages.
pub fn compute_order(page_count: usize) -> Permutation {
    let n = signature_size(page_count);
    let mut order = Vec::with_capacity(n);

    if n == 0 {
        return Permutation(order);
    }

    let mut i = 0;
    let mut j = n - 1;
    let mut side = 1;

    // Pairs are built 1-based and shifted down on push
    while i < j {
        let (first, second) = if side % 2 == 0 {
            (n - j, n - i)
        } else {
            (n - i, n - j)
        };
        order.push(first - 1);
        order.push(second - 1);

        i += 1;
        j -= 1;
        side += 1;
    }

    Permutation(order)
}

/// Check a raw page count before ordering.
///
/// Negative counts are rejected, as are counts above [`MAX_PAGE_COUNT`].
pub fn validate_page_count(raw: i64) -> Result<usize> {
    let count = usize::try_from(raw).map_err(|_| ImposeError::InvalidPageCount(raw))?;
    if count > MAX_PAGE_COUNT {
        return Err(ImposeError::InvalidPageCount(raw));
    }
    Ok(count)
}
