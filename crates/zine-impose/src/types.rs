use crate::constants::{A4_DIMENSIONS_PT, LETTER_DIMENSIONS_PT};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to impose")]
    NoPages,
    #[error("Invalid page count: {0}")]
    InvalidPageCount(i64),
    #[error("Failed to embed page {page}: {source}")]
    Embedding {
        /// Position of the failing page in the reordered sequence
        page: usize,
        #[source]
        source: lopdf::Error,
    },
    #[error("Unsupported sheet size: {0:?} (expected A4 or Letter)")]
    UnsupportedLayout(String),
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// Output sheet presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SheetSize {
    #[default]
    A4,
    Letter,
}

impl SheetSize {
    pub const ALL: [SheetSize; 2] = [SheetSize::A4, SheetSize::Letter];

    /// Portrait dimensions (width, height) in points
    pub fn dimensions_pt(self) -> (f32, f32) {
        match self {
            SheetSize::A4 => A4_DIMENSIONS_PT,
            SheetSize::Letter => LETTER_DIMENSIONS_PT,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SheetSize::A4 => "A4",
            SheetSize::Letter => "Letter",
        }
    }
}

impl fmt::Display for SheetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SheetSize {
    type Err = ImposeError;

    fn from_str(s: &str) -> Result<Self> {
        SheetSize::ALL
            .into_iter()
            .find(|size| size.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ImposeError::UnsupportedLayout(s.to_string()))
    }
}

/// Statistics about the imposition
#[derive(Debug, Clone, PartialEq)]
pub struct ImpositionStatistics {
    /// Total number of source pages
    pub source_pages: usize,
    /// Page count after padding to a multiple of four
    pub signature_size: usize,
    /// Number of blank pages added for padding
    pub blank_pages_added: usize,
    /// Pages in the output document (one per pair of source pages)
    pub output_pages: usize,
    /// Physical sheets once the output is printed double-sided
    pub output_sheets: usize,
    /// Output pages carrying the 180° whole-sheet rotation
    pub rotated_pages: usize,
}
