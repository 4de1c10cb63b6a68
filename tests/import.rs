mod common;

use common::*;
use screenplay_import::{
    ElementKind, ImportError, ImportOptions, ImportPipeline, ZipExtractor, import,
};

#[test]
fn stored_document_extracts_exact_bytes() {
    let xml = SAMPLE_OSF.as_bytes();
    let archive = build_zip(&[TestEntry::stored("document.xml", xml)], b"");
    assert_eq!(ZipExtractor::new(&archive).extract_document().unwrap(), xml);
}

#[test]
fn deflated_document_with_comment() {
    let xml = SAMPLE_OSF.as_bytes();
    let archive = build_zip(
        &[
            TestEntry::stored("thumbnail.png", b"\x89PNG"),
            TestEntry::deflated("document.xml", xml),
        ],
        b"saved by Fade In",
    );
    assert_eq!(ZipExtractor::new(&archive).extract_document().unwrap(), xml);
}

#[test]
fn under_reported_size_is_not_truncated() {
    let xml = SAMPLE_OSF.repeat(200);
    for declared in [0, 1, 100] {
        let archive = build_zip(
            &[TestEntry::deflated("document.xml", xml.as_bytes()).with_declared_size(declared)],
            b"",
        );
        let out = ZipExtractor::new(&archive)
            .with_min_inflate_capacity(64)
            .extract_document()
            .unwrap();
        assert_eq!(out, xml.as_bytes(), "declared {declared}");
    }
}

#[test]
fn fadein_archive_imports_end_to_end() {
    let archive = build_zip(
        &[TestEntry::deflated("document.xml", SAMPLE_OSF.as_bytes())],
        b"",
    );
    let elements = import(&archive).unwrap();
    let kinds: Vec<_> = elements.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ElementKind::Title,
            ElementKind::Title,
            ElementKind::Action,
            ElementKind::Slugline,
            ElementKind::Action,
            ElementKind::Character,
            ElementKind::Parenthetical,
            ElementKind::Dialogue,
            ElementKind::Transition,
            ElementKind::Shot,
            ElementKind::Transition,
        ]
    );

    assert_eq!(elements[0].runs[0].size, Some(24.0));
    assert!(elements[0].runs[0].bold);
    assert_eq!(elements[2].text, "");
    assert_eq!(elements[3].text, "INT. KITCHEN \u{2013} DAY");
    assert_eq!(elements[4].runs.len(), 2);
    assert!(elements[4].runs[1].italic);
    assert_eq!(elements[4].span_text(&elements[4].runs[1]), "Slowly.");
    assert_eq!(elements[5].text, "JANE");
    assert_eq!(elements[7].text, "Another day & another pot.");
    assert_eq!(elements[8].text, "CUT TO:");
    assert_eq!(elements[9].text, "CLOSE ON THE MUG");
}

#[test]
fn nested_document_entry_is_found() {
    let archive = build_zip(
        &[
            TestEntry::stored("styles.xml", b"<styles/>"),
            TestEntry::stored("Script/document.xml", SAMPLE_OSF.as_bytes()),
        ],
        b"",
    );
    let elements = import(&archive).unwrap();
    assert_eq!(elements[3].kind, ElementKind::Slugline);
}

#[test]
fn entry_override_reads_named_entry() {
    let other = br#"<document><para><style basestyle="Action"/><text>alt</text></para></document>"#;
    let archive = build_zip(
        &[
            TestEntry::stored("document.xml", SAMPLE_OSF.as_bytes()),
            TestEntry::stored("alt.xml", other),
        ],
        b"",
    );
    let pipeline = ImportPipeline::new(ImportOptions {
        entry_override: Some("alt.xml".to_string()),
        ..Default::default()
    });
    let elements = pipeline.import(&archive).unwrap();
    assert_eq!(elements.len(), 1);
    assert_eq!(elements[0].text, "alt");
}

#[test]
fn archive_without_xml_is_missing_document() {
    let archive = build_zip(&[TestEntry::stored("notes.txt", b"hi")], b"");
    assert!(matches!(import(&archive), Err(ImportError::MissingDocument)));
}

#[test]
fn unknown_method_is_unsupported() {
    let mut entry = TestEntry::stored("document.xml", b"<document/>");
    entry.method = 14;
    let archive = build_zip(&[entry], b"");
    assert!(matches!(
        import(&archive),
        Err(ImportError::UnsupportedCompression(14))
    ));
}

#[test]
fn encrypted_entry_is_unsupported() {
    let mut entry = TestEntry::stored("document.xml", b"<document/>");
    entry.flags = 1;
    let archive = build_zip(&[entry], b"");
    assert!(matches!(
        import(&archive),
        Err(ImportError::UnsupportedArchiveFeature(_))
    ));
}

#[test]
fn eocd_missing_from_tail_is_malformed() {
    let mut archive = build_zip(&[TestEntry::stored("document.xml", b"<document/>")], b"");
    archive.extend(std::iter::repeat_n(b' ', 70_000));
    assert!(matches!(
        import(&archive),
        Err(ImportError::MalformedArchive(_))
    ));
}

#[test]
fn central_directory_offset_past_end_is_malformed() {
    let mut archive = build_zip(&[TestEntry::stored("document.xml", b"<document/>")], b"");
    let eocd = eocd_offset(&archive, 0);
    archive[eocd + 16..eocd + 20].copy_from_slice(&u32::MAX.wrapping_sub(1).to_le_bytes());
    assert!(matches!(
        import(&archive),
        Err(ImportError::MalformedArchive(_))
    ));
}

#[test]
fn oversized_entry_is_truncated() {
    let mut archive = build_zip(&[TestEntry::stored("document.xml", b"<document/>")], b"");
    // compressed size field of the central directory record
    let eocd = eocd_offset(&archive, 0);
    let cd = u32::from_le_bytes(archive[eocd + 16..eocd + 20].try_into().unwrap()) as usize;
    archive[cd + 20..cd + 24].copy_from_slice(&1_000_000u32.to_le_bytes());
    assert!(matches!(
        import(&archive),
        Err(ImportError::TruncatedEntry { .. })
    ));
}

#[test]
fn malformed_xml_fails_whole_import() {
    let archive = build_zip(
        &[TestEntry::stored("document.xml", b"<document><para><text>x</para>")],
        b"",
    );
    assert!(matches!(import(&archive), Err(ImportError::XmlParse(_))));
}

#[test]
fn plain_text_screenplay() {
    let script = "THE LONG NIGHT\nJane Doe\n\nFADE IN:\n\nINT. KITCHEN - DAY\n\nJane pours coffee.\n\nJANE\n(to herself)\nAnother day.\n\nCUT TO:\n";
    let kinds: Vec<_> = import(script.as_bytes()).unwrap().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ElementKind::Title,
            ElementKind::Author,
            ElementKind::Transition,
            ElementKind::Slugline,
            ElementKind::Action,
            ElementKind::Character,
            ElementKind::Parenthetical,
            ElementKind::Dialogue,
            ElementKind::Transition,
        ]
    );
}
