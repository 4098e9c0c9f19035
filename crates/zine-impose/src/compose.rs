//! Sheet composition
//!
//! Pairs of consecutive pages from a reordered sequence are drawn onto
//! output sheets. The whole output is planned up front, then written by a
//! single [`SheetWriter`] in plan order; on error the half-built document is
//! dropped.

use crate::layout::plan_sheets;
use crate::render::SheetWriter;
use crate::reorder::PageSequence;
use crate::types::{Result, SheetSize};
use log::{debug, warn};
use lopdf::Document;

/// Compose `pages` (already in print order) onto output sheets of `size`.
///
/// `source` must be the document the page handles were read from.
pub fn compose(source: &Document, pages: &PageSequence, size: SheetSize) -> Result<Document> {
    if pages.len() % 2 != 0 {
        warn!(
            "Odd page count {} in composition; last page is left off",
            pages.len()
        );
    }

    let plans = plan_sheets(pages, size);
    let mut writer = SheetWriter::new(source, pages.blank_size());

    for plan in &plans {
        debug!(
            "Sheet {}: pages {} and {} (rotation {})",
            plan.index + 1,
            plan.positions[0] + 1,
            plan.positions[1] + 1,
            plan.rotation
        );
        writer.write_sheet(plan, size)?;
    }

    debug!("Composed {} sheets on {}", writer.sheet_count(), size);
    Ok(writer.finish())
}
