mod common;

use common::*;
use lopdf::{Dictionary, Document, Object, Stream};
use zine_impose::*;

fn reordered(doc: &Document) -> PageSequence {
    let source = PageSequence::from_document(doc);
    apply_order(&source, &compute_order(source.len()))
}

/// Parse `q a b c d e f cm /Name Do Q` lines into (name, matrix)
fn placements(content: &str) -> Vec<(String, [f32; 6])> {
    content
        .lines()
        .filter(|line| line.ends_with("Do Q"))
        .map(|line| {
            let tokens: Vec<&str> = line.split_whitespace().collect();
            let mut matrix = [0.0; 6];
            for (value, token) in matrix.iter_mut().zip(&tokens[1..7]) {
                *value = token.parse().unwrap();
            }
            (tokens[8].trim_start_matches('/').to_string(), matrix)
        })
        .collect()
}

/// The form XObject drawn as `name` on an output sheet
fn sheet_form<'a>(doc: &'a Document, sheet: lopdf::ObjectId, name: &str) -> &'a Stream {
    let form_id = doc
        .get_dictionary(sheet)
        .unwrap()
        .get(b"Resources")
        .unwrap()
        .as_dict()
        .unwrap()
        .get(b"XObject")
        .unwrap()
        .as_dict()
        .unwrap()
        .get(name.as_bytes())
        .unwrap()
        .as_reference()
        .unwrap();
    doc.get_object(form_id).unwrap().as_stream().unwrap()
}

fn assert_matrix_eq(actual: [f32; 6], expected: [f32; 6]) {
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!((a - e).abs() < 0.01, "{:?} != {:?}", actual, expected);
    }
}

#[test]
fn test_compose_sheet_count() {
    let doc = create_numbered_pdf(24);
    let output = compose(&doc, &reordered(&doc), SheetSize::A4).unwrap();

    // 24 pages, already a multiple of four: 12 sides
    assert_eq!(output.get_pages().len(), 12);
}

#[test]
fn test_compose_padded_sheet_count() {
    let doc = create_numbered_pdf(6);
    let output = compose(&doc, &reordered(&doc), SheetSize::Letter).unwrap();
    assert_eq!(output.get_pages().len(), 4);
}

#[test]
fn test_compose_sheet_size() {
    for size in SheetSize::ALL {
        let doc = create_numbered_pdf(4);
        let output = compose(&doc, &reordered(&doc), size).unwrap();
        let (width, height) = size.dimensions_pt();

        for page_id in page_ids(&output) {
            let media_box = output
                .get_dictionary(page_id)
                .unwrap()
                .get(b"MediaBox")
                .unwrap()
                .as_array()
                .unwrap()
                .clone();
            assert!(matches!(media_box[2], Object::Real(w) if w == width));
            assert!(matches!(media_box[3], Object::Real(h) if h == height));
        }
    }
}

#[test]
fn test_compose_rotation_alternates() {
    let doc = create_numbered_pdf(16);
    let output = compose(&doc, &reordered(&doc), SheetSize::A4).unwrap();

    let rotations: Vec<i64> = page_ids(&output)
        .into_iter()
        .map(|id| page_rotation(&output, id))
        .collect();
    assert_eq!(rotations, vec![0, 180, 0, 180, 0, 180, 0, 180]);
}

#[test]
fn test_compose_slot_placement() {
    for size in SheetSize::ALL {
        let doc = create_numbered_pdf(4);
        let output = compose(&doc, &reordered(&doc), size).unwrap();
        let bbox = [0.0, 0.0, 612.0, 792.0];

        for page_id in page_ids(&output) {
            let drawn = placements(&page_content(&output, page_id));
            assert_eq!(drawn.len(), 2);

            assert_eq!(drawn[0].0, "P0");
            assert_matrix_eq(drawn[0].1, SlotPlacement::new(Slot::Top, size).transform(bbox));

            assert_eq!(drawn[1].0, "P1");
            assert_matrix_eq(
                drawn[1].1,
                SlotPlacement::new(Slot::Bottom, size).transform(bbox),
            );
        }
    }
}

#[test]
fn test_compose_places_pages_in_print_order() {
    let doc = create_numbered_pdf(8);
    let output = compose(&doc, &reordered(&doc), SheetSize::A4).unwrap();
    let sheets = page_ids(&output);

    // Order for 8 pages: [8, 1], [2, 7], [6, 3], [4, 5]
    let expected = [(8, 1), (2, 7), (6, 3), (4, 5)];
    for (sheet, (top, bottom)) in sheets.iter().zip(expected) {
        assert!(xobject_content(&output, *sheet, "P0").contains(&format!("(page {})", top)));
        assert!(xobject_content(&output, *sheet, "P1").contains(&format!("(page {})", bottom)));
    }
}

#[test]
fn test_compose_blank_slots_are_empty() {
    let doc = create_numbered_pdf(6);
    let output = compose(&doc, &reordered(&doc), SheetSize::A4).unwrap();
    let sheets = page_ids(&output);

    // Order for 6 pages: [blank, 1], [2, blank], [6, 3], [4, 5]
    assert_eq!(xobject_content(&output, sheets[0], "P0"), "");
    assert!(xobject_content(&output, sheets[0], "P1").contains("(page 1)"));
    assert!(xobject_content(&output, sheets[1], "P0").contains("(page 2)"));
    assert_eq!(xobject_content(&output, sheets[1], "P1"), "");
}

#[test]
fn test_compose_drops_unpaired_page() {
    let doc = create_numbered_pdf(5);
    let pages = PageSequence::from_document(&doc);
    let output = compose(&doc, &pages, SheetSize::A4).unwrap();

    assert_eq!(output.get_pages().len(), 2);
}

#[test]
fn test_compose_empty_sequence() {
    let doc = create_numbered_pdf(0);
    let pages = PageSequence::from_document(&doc);
    let output = compose(&doc, &pages, SheetSize::A4).unwrap();

    assert_eq!(output.get_pages().len(), 0);
}

#[test]
fn test_compose_embedding_failure_aborts() {
    let mut doc = create_numbered_pdf(4);
    let broken_page = page_ids(&doc)[2];
    doc.get_dictionary_mut(broken_page)
        .unwrap()
        .set("Contents", Object::Reference((9999, 0)));

    let pages = PageSequence::from_document(&doc);
    match compose(&doc, &pages, SheetSize::A4) {
        Err(ImposeError::Embedding { page, .. }) => assert_eq!(page, 2),
        other => panic!("Expected Embedding error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_compose_leaves_source_untouched() {
    let doc = create_numbered_pdf(6);
    let snapshot = doc.clone();

    compose(&doc, &reordered(&doc), SheetSize::A4).unwrap();

    assert_eq!(doc.get_pages(), snapshot.get_pages());
    assert_eq!(doc.objects.len(), snapshot.objects.len());
}

#[test]
fn test_compose_keeps_encoded_content() {
    let mut doc = create_numbered_pdf(4);
    let first_page = page_ids(&doc)[0];

    let mut dict = Dictionary::new();
    dict.set("Filter", Object::Name(b"FlateDecode".to_vec()));
    let encoded = vec![0x78, 0x9c, 0x01, 0x02, 0x03];
    let content_id = doc.add_object(Stream::new(dict, encoded.clone()));
    doc.get_dictionary_mut(first_page)
        .unwrap()
        .set("Contents", Object::Reference(content_id));

    let pages = PageSequence::from_document(&doc);
    let output = compose(&doc, &pages, SheetSize::A4).unwrap();

    let form = sheet_form(&output, page_ids(&output)[0], "P0");

    assert_eq!(
        form.dict.get(b"Filter").unwrap().as_name().unwrap(),
        b"FlateDecode"
    );
    assert_eq!(form.content, encoded);
}

#[test]
fn test_compose_copies_indirect_filter() {
    let mut doc = create_numbered_pdf(4);
    let first_page = page_ids(&doc)[0];

    let filter_id = doc.add_object(Object::Array(vec![Object::Name(b"FlateDecode".to_vec())]));
    let mut dict = Dictionary::new();
    dict.set("Filter", Object::Reference(filter_id));
    let content_id = doc.add_object(Stream::new(dict, vec![0x78, 0x9c, 0x01]));
    doc.get_dictionary_mut(first_page)
        .unwrap()
        .set("Contents", Object::Reference(content_id));

    let pages = PageSequence::from_document(&doc);
    let output = compose(&doc, &pages, SheetSize::A4).unwrap();
    let form = sheet_form(&output, page_ids(&output)[0], "P0");

    // The filter reference must resolve inside the output document
    let copied_id = form.dict.get(b"Filter").unwrap().as_reference().unwrap();
    let filters = output.get_object(copied_id).unwrap().as_array().unwrap();
    assert_eq!(filters.len(), 1);
    assert_eq!(filters[0].as_name().unwrap(), b"FlateDecode");
}

#[test]
fn test_compose_copies_shared_resources_once() {
    let mut doc = create_numbered_pdf(4);

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));
    for page_id in page_ids(&doc) {
        let fonts = Dictionary::from_iter(vec![("F1", Object::Reference(font_id))]);
        let resources = Dictionary::from_iter(vec![("Font", Object::Dictionary(fonts))]);
        doc.get_dictionary_mut(page_id)
            .unwrap()
            .set("Resources", Object::Dictionary(resources));
    }

    let output = compose(&doc, &reordered(&doc), SheetSize::A4).unwrap();

    let fonts = output
        .objects
        .values()
        .filter(|obj| {
            obj.as_dict()
                .map(|dict| dict.get(b"BaseFont").is_ok())
                .unwrap_or(false)
        })
        .count();
    assert_eq!(fonts, 1);
}

#[test]
fn test_compose_inherits_page_tree_attributes() {
    let mut doc = create_numbered_pdf(4);
    let ids = page_ids(&doc);

    // Move MediaBox up to the Pages node
    let pages_id = doc
        .get_dictionary(ids[0])
        .unwrap()
        .get(b"Parent")
        .unwrap()
        .as_reference()
        .unwrap();
    for id in &ids {
        doc.get_dictionary_mut(*id).unwrap().remove(b"MediaBox");
    }
    doc.get_dictionary_mut(pages_id).unwrap().set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(420),
            Object::Integer(595),
        ]),
    );

    let pages = PageSequence::from_document(&doc);
    assert_eq!(pages.blank_size(), (420.0, 595.0));

    let output = compose(&doc, &pages, SheetSize::A4).unwrap();
    let sheet = page_ids(&output)[0];
    let drawn = placements(&page_content(&output, sheet));
    assert_matrix_eq(
        drawn[0].1,
        SlotPlacement::new(Slot::Top, SheetSize::A4).transform([0.0, 0.0, 420.0, 595.0]),
    );
}
