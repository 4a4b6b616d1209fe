mod common;

use claimform_pdf::pdf::layout::{LineKind, layout};
use claimform_pdf::{ClaimForm, Document, PageSetup, PageSize, Section, render, render_with};

#[test]
fn minimal_form_renders_title_header_and_field() {
    let form = ClaimForm::new()
        .section(Section::new("Client Information").field("Client's Name", "Doe, John, M"));

    let doc = render(&form).expect("render");
    assert!(common::looks_like_pdf(doc.as_bytes()));
    assert_eq!(doc.page_count(), 1);
    assert_eq!(
        common::all_lines(doc.as_bytes()),
        vec![
            "Insurance Claim Form",
            "Client Information",
            "Client's Name: Doe, John, M",
        ]
    );
}

#[test]
fn empty_form_renders_only_the_title() {
    let doc = render(&ClaimForm::new()).expect("render");

    assert!(common::looks_like_pdf(doc.as_bytes()));
    assert_eq!(doc.page_count(), 1);
    assert_eq!(common::page_object_count(doc.as_bytes()), 1);
    assert_eq!(common::all_lines(doc.as_bytes()), vec!["Insurance Claim Form"]);
}

#[test]
fn empty_section_emits_header_and_standard_gap() {
    let setup = PageSetup::default();
    let form = ClaimForm::new()
        .section(Section::new("Fraud Detection"))
        .section(Section::new("Signature and Authorization").field("Authorized Signature", "J. Doe"));

    let pages = layout(&form, &setup);
    let lines = &pages[0].lines;
    let kinds: Vec<LineKind> = lines.iter().map(|l| l.kind).collect();
    assert_eq!(
        kinds,
        vec![
            LineKind::Title,
            LineKind::SectionHeader,
            LineKind::SectionHeader,
            LineKind::Field,
        ]
    );

    // header line plus the inter-section gap separates consecutive headers
    let step = lines[1].baseline_y - lines[2].baseline_y;
    assert!((step - (setup.line_height + setup.section_gap)).abs() < 0.01, "step={step}");
}

#[test]
fn sections_and_fields_keep_insertion_order() {
    let form = ClaimForm::new()
        .section(
            Section::new("Zeta")
                .field("b", "2")
                .field("a", "1"),
        )
        .section(Section::new("Alpha").field("z", "26"))
        .section(Section::new("Mid").field("m", "13").field("c", "3").field("x", "24"));

    let doc = render(&form).expect("render");
    assert_eq!(common::all_lines(doc.as_bytes()), common::expected_lines(&form));
}

#[test]
fn duplicate_section_names_are_rendered_twice() {
    let form = ClaimForm::new()
        .section(Section::new("Notes").field("First", "one"))
        .section(Section::new("Notes").field("Second", "two"));

    let doc = render(&form).expect("render");
    assert_eq!(
        common::all_lines(doc.as_bytes()),
        vec![
            "Insurance Claim Form",
            "Notes",
            "First: one",
            "Notes",
            "Second: two",
        ]
    );
}

#[test]
fn rendering_is_byte_for_byte_deterministic() {
    let form = common::generated_form(6, 8);
    let a = render(&form).expect("render");
    let b = render(&form).expect("render");
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn values_are_shown_verbatim() {
    let form = ClaimForm::new().section(
        Section::new("Additional Claim Details")
            .field("Total Charge", "1200.5")
            .field("Hospitalization From", "03/04/2024")
            .field("Note", "(see attached) \\ 100%"),
    );

    let doc = render(&form).expect("render");
    let lines = common::all_lines(doc.as_bytes());
    assert_eq!(lines[2], "Total Charge: 1200.5");
    assert_eq!(lines[3], "Hospitalization From: 03/04/2024");
    assert_eq!(lines[4], "Note: (see attached) \\ 100%");
}

#[test]
fn chars_outside_winansi_are_omitted() {
    let form = ClaimForm::new().section(Section::new("Client Information").field("City", "Kraków 東京"));

    let doc = render(&form).expect("render");
    let lines = common::all_lines(doc.as_bytes());
    // Latin-1 letters survive, CJK has no WinAnsi byte
    assert_eq!(lines[2], "City: Kraków ");
}

#[test]
fn title_is_centred_and_bold() {
    let setup = PageSetup::default();
    let pages = layout(&ClaimForm::new(), &setup);
    let title = &pages[0].lines[0];

    assert_eq!(title.kind, LineKind::Title);
    assert!(title.bold);
    assert_eq!(title.font_size, setup.title_font_size);
    // centred within the title cell, so well to the right of the left margin
    let cell_centre = setup.margin_left + setup.title_width / 2.0;
    assert!(title.x > setup.margin_left + 100.0);
    assert!(title.x < cell_centre);
}

#[test]
fn body_lines_are_left_aligned_regular_text() {
    let setup = PageSetup::default();
    let form = common::generated_form(2, 3);
    for line in layout(&form, &setup).iter().flat_map(|p| p.lines.iter()) {
        if line.kind != LineKind::Title {
            assert!(!line.bold);
            assert_eq!(line.font_size, setup.body_font_size);
            assert!((line.x - (setup.margin_left + setup.cell_padding)).abs() < 0.01);
        }
    }
}

#[test]
fn letter_page_size_sets_mediabox() {
    let setup = PageSetup::new(PageSize::Letter);
    let doc = render_with(&common::generated_form(1, 1), &setup).expect("render");
    let text = String::from_utf8_lossy(doc.as_bytes());
    assert!(text.contains("/MediaBox [0 0 612 792]"), "{text}");
}

#[test]
fn document_carries_delivery_metadata() {
    assert_eq!(Document::FILE_NAME, "insurance_claim_form.pdf");
    assert_eq!(Document::MEDIA_TYPE, "application/pdf");

    let doc = render(&ClaimForm::new()).expect("render");
    let text = String::from_utf8_lossy(doc.as_bytes());
    assert!(text.contains("/Title (Insurance Claim Form)"));
    assert!(!text.contains("/CreationDate"));
}

#[test]
fn parsed_json_keeps_source_order() {
    let json = r#"{
        "Signature and Authorization": {"Date of Claim": "2024-05-01", "Authorized Signature": "Jane Roe"},
        "Client Information": {"Sex": "F", "Client's Name": "Roe, Jane, Q", "Birth Date": null},
        "Damage Detection and Cost Estimation": {"Total Estimated Repair Cost": 473.83, "Flagged": false}
    }"#;

    let form = claimform_pdf::parse_claim_form(json).expect("parse");
    let names: Vec<&str> = form.sections.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Signature and Authorization",
            "Client Information",
            "Damage Detection and Cost Estimation",
        ]
    );
    let client: Vec<String> = form.sections[1].fields.iter().map(|f| f.line_text()).collect();
    assert_eq!(client, vec!["Sex: F", "Client's Name: Roe, Jane, Q", "Birth Date: "]);
    let damage: Vec<String> = form.sections[2].fields.iter().map(|f| f.line_text()).collect();
    assert_eq!(damage, vec!["Total Estimated Repair Cost: 473.83", "Flagged: false"]);
}

#[test]
fn parsing_rejects_nested_values() {
    let json = r#"{"Client Information": {"Address": {"street": "Main"}}}"#;
    let err = claimform_pdf::parse_claim_form(json).unwrap_err();
    assert!(matches!(err, claimform_pdf::Error::InvalidInput(_)), "{err}");
}

#[test]
fn empty_json_object_is_an_empty_form() {
    let form = claimform_pdf::parse_claim_form("{}").expect("parse");
    assert!(form.is_empty());
}
