//! PDF rendering modules for imposition
//!
//! This module handles all PDF-specific operations:
//! - Creating form XObjects from source pages
//! - Building output sheets and the output page tree
//! - Deep copying PDF objects

mod page;
mod xobject;

pub use page::SheetWriter;
pub use xobject::{
    EmbeddedPage, copy_object_deep, create_blank_xobject, create_page_xobject, get_media_box,
    get_page_dimensions,
};
