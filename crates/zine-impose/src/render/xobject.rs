//! XObject creation for imposition
//!
//! This module handles creating Form XObjects from source PDF pages,
//! which are then placed onto output sheets with transformations.
//! Page content is carried over as-is, never rasterized.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Parent links followed when resolving inherited page attributes
const MAX_PAGE_TREE_DEPTH: usize = 64;

// =============================================================================
// XObject Creation
// =============================================================================

/// A Form XObject in the output document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbeddedPage {
    pub id: ObjectId,
    /// `[llx, lly, urx, ury]` of the form
    pub bbox: [f32; 4],
}

/// Create a Form XObject from a source page.
///
/// Resources are deep-copied into `output`; `cache` maps source object ids
/// to their copies so objects shared between pages are copied once.
pub fn create_page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> lopdf::Result<EmbeddedPage> {
    let page_dict = source.get_dictionary(page_id)?;
    let bbox = get_media_box(source, page_id)?;

    let mut xobject_dict = form_dictionary(bbox);

    if let Some(resources) = inherited_attribute(source, page_id, b"Resources")? {
        xobject_dict.set(
            "Resources",
            copy_object_deep(output, source, resources, cache)?,
        );
    } else {
        xobject_dict.set("Resources", Object::Dictionary(Dictionary::new()));
    }

    let content = get_page_content(source, page_dict)?;
    if let Some(filter) = content.filter {
        xobject_dict.set("Filter", copy_object_deep(output, source, &filter, cache)?);
    }
    if let Some(params) = content.decode_params {
        xobject_dict.set(
            "DecodeParms",
            copy_object_deep(output, source, &params, cache)?,
        );
    }

    let mut stream = Stream::new(xobject_dict, content.data);
    if content.encoded {
        stream.allows_compression = false;
    }
    Ok(EmbeddedPage {
        id: output.add_object(stream),
        bbox,
    })
}

/// Create an empty Form XObject of the given size (padding pages)
pub fn create_blank_xobject(output: &mut Document, size: (f32, f32)) -> EmbeddedPage {
    let bbox = [0.0, 0.0, size.0, size.1];
    let mut xobject_dict = form_dictionary(bbox);
    xobject_dict.set("Resources", Object::Dictionary(Dictionary::new()));
    EmbeddedPage {
        id: output.add_object(Stream::new(xobject_dict, Vec::new())),
        bbox,
    }
}

fn form_dictionary(bbox: [f32; 4]) -> Dictionary {
    let mut dict = Dictionary::new();
    dict.set("Type", Object::Name(b"XObject".to_vec()));
    dict.set("Subtype", Object::Name(b"Form".to_vec()));
    dict.set("FormType", Object::Integer(1));
    dict.set(
        "BBox",
        Object::Array(bbox.iter().map(|&v| Object::Real(v)).collect()),
    );
    dict
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Content bytes for a form, possibly still encoded
struct PageContent {
    data: Vec<u8>,
    encoded: bool,
    filter: Option<Object>,
    decode_params: Option<Object>,
}

impl PageContent {
    fn plain(data: Vec<u8>) -> Self {
        Self {
            data,
            encoded: false,
            filter: None,
            decode_params: None,
        }
    }
}

/// Get the content stream data from a page.
///
/// A single stream keeps its encoding; several streams are decoded and
/// joined.
fn get_page_content(doc: &Document, page_dict: &Dictionary) -> lopdf::Result<PageContent> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Ok(PageContent::plain(Vec::new())), // No content = blank page
    };

    match contents {
        Object::Reference(id) => match doc.get_object(*id)? {
            Object::Stream(stream) => Ok(get_single_content_stream(stream)),
            Object::Array(arr) => get_concatenated_content_streams(doc, arr),
            _ => Ok(PageContent::plain(Vec::new())),
        },
        Object::Array(arr) => get_concatenated_content_streams(doc, arr),
        _ => Ok(PageContent::plain(Vec::new())),
    }
}

/// Copy a single content stream without decoding it
fn get_single_content_stream(stream: &Stream) -> PageContent {
    match stream.dict.get(b"Filter") {
        Ok(filter) => PageContent {
            data: stream.content.clone(),
            encoded: true,
            filter: Some(filter.clone()),
            decode_params: stream.dict.get(b"DecodeParms").ok().cloned(),
        },
        Err(_) => PageContent::plain(stream.content.clone()),
    }
}

/// Concatenate multiple content streams
fn get_concatenated_content_streams(doc: &Document, refs: &[Object]) -> lopdf::Result<PageContent> {
    let mut result = Vec::new();

    for obj in refs {
        if let Object::Reference(id) = obj {
            let stream = doc.get_object(*id)?.as_stream()?;
            result.extend_from_slice(&decoded_content(stream)?);
            result.push(b'\n');
        }
    }

    Ok(PageContent::plain(result))
}

fn decoded_content(stream: &Stream) -> lopdf::Result<Vec<u8>> {
    if stream.dict.has(b"Filter") {
        stream.decompressed_content()
    } else {
        Ok(stream.content.clone())
    }
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// `Parent` links are not followed so a copy never drags in the page tree.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> lopdf::Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            // Reserve the id first so reference cycles terminate
            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let referenced = source.get_object(*id)?;
            let copied = copy_object_deep(output, source, referenced, cache)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(copy_dictionary(
            output, source, dict, cache,
        )?)),
        Object::Array(arr) => {
            let new_arr: lopdf::Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => Ok(Object::Stream(Stream {
            dict: copy_dictionary(output, source, &stream.dict, cache)?,
            content: stream.content.clone(),
            allows_compression: stream.allows_compression,
            start_position: None,
        })),
        // Primitive types: just clone
        _ => Ok(obj.clone()),
    }
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> lopdf::Result<Dictionary> {
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        if key.as_slice() == b"Parent" {
            continue;
        }
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    Ok(new_dict)
}

// =============================================================================
// Page Attributes
// =============================================================================

/// Look up a page attribute, walking up the page tree for inherited values.
fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> lopdf::Result<Option<&'a Object>> {
    let mut node = doc.get_dictionary(page_id)?;

    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Ok(Some(value));
        }
        match node.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent_id) => node = doc.get_dictionary(parent_id)?,
            Err(_) => break,
        }
    }

    Ok(None)
}

/// Get the page MediaBox as `[llx, lly, urx, ury]`.
///
/// Missing or degenerate boxes fall back to US Letter.
pub fn get_media_box(doc: &Document, page_id: ObjectId) -> lopdf::Result<[f32; 4]> {
    let fallback = [0.0, 0.0, DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1];

    let Some(obj) = inherited_attribute(doc, page_id, b"MediaBox")? else {
        return Ok(fallback);
    };
    let obj = match obj {
        Object::Reference(id) => doc.get_object(*id)?,
        other => other,
    };
    let Ok(values) = obj.as_array() else {
        return Ok(fallback);
    };

    let numbers: Vec<f32> = values.iter().filter_map(extract_number).collect();
    match numbers.as_slice() {
        &[llx, lly, urx, ury] if urx > llx && ury > lly => Ok([llx, lly, urx, ury]),
        _ => Ok(fallback),
    }
}

/// Get source page dimensions (width, height) in points
pub fn get_page_dimensions(doc: &Document, page_id: ObjectId) -> lopdf::Result<(f32, f32)> {
    let [llx, lly, urx, ury] = get_media_box(doc, page_id)?;
    Ok((urx - llx, ury - lly))
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
