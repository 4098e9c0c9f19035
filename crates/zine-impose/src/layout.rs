//! Sheet geometry
//!
//! Every output page is a portrait sheet carrying two source pages turned a
//! quarter turn clockwise, one in each half:
//!
//! ```text
//! (0,h) +---------+
//!       |   top   |  <- pages[2m]
//! (0,h/2)---------+
//!       | bottom  |  <- pages[2m+1]
//! (0,0) +---------+
//! ```
//!
//! Each slot is anchored at its upper-left corner; after the -90° turn the
//! page's height runs along the sheet width and its width runs down half the
//! sheet height. Odd output pages are additionally rotated 180° so that the
//! backs line up when printed duplex.

use crate::constants::{FLIPPED_SHEET_ROTATION, PAGES_PER_SHEET, SLOT_ROTATION_DEGREES};
use crate::reorder::{PageHandle, PageSequence};
use crate::types::SheetSize;

/// The two page positions on an output sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Top,
    Bottom,
}

/// Where and how a page is drawn on an output sheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotPlacement {
    pub slot: Slot,
    /// Anchor point in sheet coordinates
    pub x: f32,
    pub y: f32,
    /// Drawn size before rotation
    pub width: f32,
    pub height: f32,
    /// Counter-clockwise rotation about the anchor
    pub rotation_degrees: f32,
}

impl SlotPlacement {
    pub fn new(slot: Slot, size: SheetSize) -> Self {
        let (width, height) = size.dimensions_pt();
        let y = match slot {
            Slot::Top => height,
            Slot::Bottom => height / 2.0,
        };

        Self {
            slot,
            x: 0.0,
            y,
            width: height / 2.0,
            height: width,
            rotation_degrees: SLOT_ROTATION_DEGREES,
        }
    }

    /// Content matrix `[a b c d e f]` that maps a form with the given
    /// bounding box `[llx lly urx ury]` onto this placement.
    pub fn transform(&self, bbox: [f32; 4]) -> [f32; 6] {
        let [llx, lly, urx, ury] = bbox;
        let sx = self.width / (urx - llx);
        let sy = self.height / (ury - lly);
        let (sin, cos) = snapped_sin_cos(self.rotation_degrees);

        let a = sx * cos;
        let b = sx * sin;
        let c = -sy * sin;
        let d = sy * cos;
        let e = self.x - (a * llx + c * lly);
        let f = self.y - (b * llx + d * lly);

        [a, b, c, d, e, f]
    }
}

/// sin/cos with the float noise removed at quarter turns
fn snapped_sin_cos(degrees: f32) -> (f32, f32) {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let snap = |v: f32| if v.abs() < 1e-6 { 0.0 } else { v };
    (snap(sin), snap(cos))
}

/// Whole-sheet rotation for the output page at `index`
pub fn sheet_rotation(index: usize) -> i64 {
    if index % 2 == 1 {
        FLIPPED_SHEET_ROTATION
    } else {
        0
    }
}

/// One output page, ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    /// Zero-based output page index
    pub index: usize,
    /// Sequence positions of the top and bottom pages
    pub positions: [usize; 2],
    pub pages: [PageHandle; 2],
    pub placements: [SlotPlacement; 2],
    /// 0 or 180
    pub rotation: i64,
}

/// Pair up `pages` into output sheets.
///
/// A trailing unpaired page has no sheet.
pub fn plan_sheets(pages: &PageSequence, size: SheetSize) -> Vec<SheetPlan> {
    let top = SlotPlacement::new(Slot::Top, size);
    let bottom = SlotPlacement::new(Slot::Bottom, size);

    pages
        .pages()
        .chunks_exact(PAGES_PER_SHEET)
        .enumerate()
        .map(|(index, pair)| SheetPlan {
            index,
            positions: [index * PAGES_PER_SHEET, index * PAGES_PER_SHEET + 1],
            pages: [pair[0], pair[1]],
            placements: [top, bottom],
            rotation: sheet_rotation(index),
        })
        .collect()
}
