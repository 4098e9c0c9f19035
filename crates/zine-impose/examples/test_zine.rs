//! Generates numbered test zines and their impositions.
//!
//! Usage: cargo run --example test_zine -p zine-impose
//!
//! Creates, in the current directory:
//! - `test_zine_24_source.pdf` / `test_zine_24_imposed.pdf` (A4)
//! - `test_zine_6_source.pdf` / `test_zine_6_imposed.pdf` (Letter, two blank pages)
//!
//! ## How to verify:
//! 1. Print an *_imposed.pdf file double-sided (flip on long edge)
//! 2. Stack the sheets in print order and fold the stack across the middle
//! 3. Pages should read 1, 2, 3, ... in order and right-side up

use lopdf::{Dictionary, Document, Object, Stream};
use zine_impose::*;

/// Creates a PDF with large page numbers and a "TOP" marker on every page.
/// Page size is A5 portrait, which fills one half of an A4 sheet exactly.
fn create_numbered_pdf(num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let mut kids = Vec::new();

    // A5 size in points: 148mm x 210mm = 419.53 x 595.28 points
    let page_width = 420;
    let page_height = 595;

    let mut font_dict = Dictionary::new();
    font_dict.set("Type", Object::Name(b"Font".to_vec()));
    font_dict.set("Subtype", Object::Name(b"Type1".to_vec()));
    font_dict.set("BaseFont", Object::Name(b"Helvetica-Bold".to_vec()));
    let font_id = doc.add_object(font_dict);

    for page_num in 1..=num_pages {
        let content = format!(
            r#"
            q
            1 w
            5 5 {} {} re S
            BT /F1 18 Tf {} {} Td (TOP) Tj ET
            BT /F1 120 Tf {} {} Td ({}) Tj ET
            Q
            "#,
            page_width - 10,
            page_height - 10,
            (page_width / 2) - 20,
            page_height - 30,
            (page_width / 2) - 40,
            (page_height / 2) - 40,
            page_num,
        );
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut font_resources = Dictionary::new();
        font_resources.set("F1", Object::Reference(font_id));

        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(font_resources));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(page_width),
                    Object::Integer(page_height),
                ]),
            ),
            ("Resources", Object::Dictionary(resources)),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);
    doc
}

async fn create_test_output(num_pages: usize, size: SheetSize) -> Result<()> {
    let name = format!("test_zine_{}", num_pages);
    let source_doc = create_numbered_pdf(num_pages);

    let source_name = format!("{}_source.pdf", name);
    save_pdf(source_doc.clone(), &source_name).await?;

    let stats = calculate_statistics(&source_doc)?;
    let imposed = impose(&source_doc, size).await?;

    let imposed_name = format!("{}_imposed.pdf", name);
    save_pdf(imposed, &imposed_name).await?;

    println!("Created {} and {}", source_name, imposed_name);
    println!(
        "  {} pages -> {} sides on {} {} sheets ({} blank)",
        stats.source_pages, stats.output_pages, stats.output_sheets, size, stats.blank_pages_added
    );
    println!("  Print order: {:?}", compute_order(num_pages).as_slice());
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    println!("=== Zine Imposition Test ===\n");

    create_test_output(24, SheetSize::A4).await?;
    create_test_output(6, SheetSize::Letter).await?;

    println!();
    println!("Print each *_imposed.pdf double-sided and fold; pages should read in order.");
    Ok(())
}
