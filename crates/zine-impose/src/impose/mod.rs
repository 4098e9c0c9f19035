//! Zine imposition - turning a page sequence into foldable sheets
//!
//! This module orchestrates the imposition process:
//! 1. Read the source page sequence
//! 2. Compute the signature order for its page count
//! 3. Reorder the pages, padding with blanks
//! 4. Compose the pairs onto output sheets

mod io;

pub use io::{load_pdf, save_pdf};

use crate::compose::compose;
use crate::options::ImpositionOptions;
use crate::order::compute_order;
use crate::reorder::{PageSequence, apply_order};
use crate::types::*;
use log::{debug, info};
use lopdf::Document;

/// Main imposition function
///
/// Runs the whole pipeline on a blocking thread and resolves once every sheet
/// has been written.
pub async fn impose(document: &Document, size: SheetSize) -> Result<Document> {
    let document = document.clone();

    tokio::task::spawn_blocking(move || impose_document(&document, size)).await?
}

/// Load, validate and impose the document named by `options`
pub async fn impose_file(options: &ImpositionOptions) -> Result<Document> {
    options.validate()?;

    let document = load_pdf(&options.source).await?;
    impose(&document, options.sheet_size).await
}

/// Impose `document` onto sheets of `size` on the current thread.
pub fn impose_document(document: &Document, size: SheetSize) -> Result<Document> {
    let source = PageSequence::from_document(document);

    if source.is_empty() {
        return Err(ImposeError::NoPages);
    }

    info!("Imposing {} pages onto {} sheets", source.len(), size);

    let order = compute_order(source.len());
    debug!("Page order: {:?}", order.as_slice());

    let reordered = apply_order(&source, &order);
    if reordered.blank_count() > 0 {
        debug!("Padding with {} blank pages", reordered.blank_count());
    }

    let output = compose(document, &reordered, size)?;
    info!("Imposed into {} output pages", output.get_pages().len());
    Ok(output)
}
