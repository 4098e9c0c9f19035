//! Shared constants for zine imposition
//!
//! This module centralizes the magic numbers used by the order computation
//! and the sheet geometry.

// =============================================================================
// Signatures
// =============================================================================

/// Logical pages carried by one folded half-sheet (front and back, two slots each)
pub const PAGES_PER_SIGNATURE: usize = 4;

/// Source pages drawn onto one output page
pub const PAGES_PER_SHEET: usize = 2;

/// Output pages (sides) printed on one physical duplex sheet
pub const SIDES_PER_SHEET: usize = 2;

/// Largest source page count accepted for ordering
pub const MAX_PAGE_COUNT: usize = 1 << 20;

// =============================================================================
// Sheet Presets (points, portrait)
// =============================================================================

/// ISO A4: 210mm × 297mm
pub const A4_DIMENSIONS_PT: (f32, f32) = (595.28, 841.89);

/// US Letter: 8.5" × 11"
pub const LETTER_DIMENSIONS_PT: (f32, f32) = (612.0, 792.0);

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Rotation
// =============================================================================

/// Rotation applied to each slot when it is drawn (counter-clockwise positive)
pub const SLOT_ROTATION_DEGREES: f32 = -90.0;

/// Whole-sheet rotation applied to every odd output page
pub const FLIPPED_SHEET_ROTATION: i64 = 180;
