//! Output sheet rendering
//!
//! [`SheetWriter`] is the single writer for an output document: it owns the
//! document under construction and the embedding caches, and appends sheets
//! strictly in the order they are written.

use crate::layout::{SheetPlan, SlotPlacement};
use crate::reorder::PageHandle;
use crate::types::{ImposeError, Result, SheetSize};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::xobject::{EmbeddedPage, create_blank_xobject, create_page_xobject};

pub struct SheetWriter<'a> {
    source: &'a Document,
    output: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
    /// Source object id -> copied object id
    object_cache: HashMap<ObjectId, ObjectId>,
    /// Source page id -> embedded form
    page_forms: HashMap<ObjectId, EmbeddedPage>,
    blank_form: Option<EmbeddedPage>,
    blank_size: (f32, f32),
}

impl<'a> SheetWriter<'a> {
    pub fn new(source: &'a Document, blank_size: (f32, f32)) -> Self {
        let mut output = Document::with_version("1.7");
        let pages_tree_id = output.new_object_id();

        Self {
            source,
            output,
            pages_tree_id,
            page_refs: Vec::new(),
            object_cache: HashMap::new(),
            page_forms: HashMap::new(),
            blank_form: None,
            blank_size,
        }
    }

    /// Number of sheets written so far
    pub fn sheet_count(&self) -> usize {
        self.page_refs.len()
    }

    /// Render one planned sheet and append it to the page tree.
    pub fn write_sheet(&mut self, plan: &SheetPlan, size: SheetSize) -> Result<ObjectId> {
        let (width, height) = size.dimensions_pt();

        let mut content_ops = Vec::new();
        let mut xobjects = Dictionary::new();

        for (slot_idx, (page, placement)) in plan.pages.iter().zip(&plan.placements).enumerate() {
            let position = plan.positions[slot_idx];
            let form = self
                .form_for(page)
                .map_err(|source| ImposeError::Embedding {
                    page: position,
                    source,
                })?;

            let xobject_name = format!("P{}", slot_idx);
            xobjects.set(xobject_name.as_bytes(), Object::Reference(form.id));
            content_ops.push(generate_placement_command(
                &xobject_name,
                placement,
                form.bbox,
            ));
        }

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let content = content_ops.join("");
        let content_id = self
            .output
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_tree_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(width),
                Object::Real(height),
            ]),
        );
        page_dict.set("Resources", Object::Dictionary(resources));
        page_dict.set("Contents", Object::Reference(content_id));
        if plan.rotation != 0 {
            page_dict.set("Rotate", Object::Integer(plan.rotation));
        }

        let page_id = self.output.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));
        Ok(page_id)
    }

    /// Create pages tree and catalog, and hand over the document.
    pub fn finish(mut self) -> Document {
        let count = self.page_refs.len() as i64;
        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.output
            .objects
            .insert(self.pages_tree_id, Object::Dictionary(pages_dict));

        let catalog_id = self.output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
        ]));

        self.output.trailer.set("Root", catalog_id);
        self.output
    }

    fn form_for(&mut self, page: &PageHandle) -> lopdf::Result<EmbeddedPage> {
        match *page {
            PageHandle::Source { id, .. } => {
                if let Some(&form) = self.page_forms.get(&id) {
                    return Ok(form);
                }
                let form =
                    create_page_xobject(&mut self.output, self.source, id, &mut self.object_cache)?;
                self.page_forms.insert(id, form);
                Ok(form)
            }
            PageHandle::Blank => {
                if let Some(form) = self.blank_form {
                    return Ok(form);
                }
                let form = create_blank_xobject(&mut self.output, self.blank_size);
                self.blank_form = Some(form);
                Ok(form)
            }
        }
    }
}

/// Generate the PDF content stream command to draw a form at a placement.
fn generate_placement_command(
    xobject_name: &str,
    placement: &SlotPlacement,
    bbox: [f32; 4],
) -> String {
    let [a, b, c, d, e, f] = placement.transform(bbox);
    format!(
        "q {} {} {} {} {} {} cm /{} Do Q\n",
        a, b, c, d, e, f, xobject_name
    )
}
