pub mod compose;
pub mod constants;
pub mod impose;
pub mod layout;
mod options;
pub mod order;
pub mod render;
pub mod reorder;
mod stats;
mod types;

pub use compose::compose;
pub use impose::{impose, impose_document, impose_file, load_pdf, save_pdf};
pub use layout::{SheetPlan, Slot, SlotPlacement, plan_sheets, sheet_rotation};
pub use options::*;
pub use order::{Permutation, compute_order, signature_size, validate_page_count};
pub use reorder::{PageHandle, PageSequence, apply_order};
pub use stats::{calculate_statistics, statistics_for_page_count};
pub use types::*;
