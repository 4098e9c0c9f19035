use crate::constants::{PAGES_PER_SHEET, SIDES_PER_SHEET};
use crate::layout::sheet_rotation;
use crate::order::signature_size;
use crate::types::*;
use lopdf::Document;

/// Calculate statistics for imposing `document`
pub fn calculate_statistics(document: &Document) -> Result<ImpositionStatistics> {
    let source_pages = document.get_pages().len();

    if source_pages == 0 {
        return Err(ImposeError::NoPages);
    }

    Ok(statistics_for_page_count(source_pages))
}

/// Statistics for a source of `source_pages` pages
pub fn statistics_for_page_count(source_pages: usize) -> ImpositionStatistics {
    let padded_count = signature_size(source_pages);
    let output_pages = padded_count / PAGES_PER_SHEET;
    let output_sheets = output_pages.div_ceil(SIDES_PER_SHEET);
    let rotated_pages = (0..output_pages)
        .filter(|&idx| sheet_rotation(idx) != 0)
        .count();

    ImpositionStatistics {
        source_pages,
        signature_size: padded_count,
        blank_pages_added: padded_count - source_pages,
        output_pages,
        output_sheets,
        rotated_pages,
    }
}
