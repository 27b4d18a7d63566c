use super::*;

fn json_file(contents: &str) -> ImportFile {
    ImportFile {
        name: "visited.json".to_string(),
        mime_type: "application/json".to_string(),
        contents: contents.to_string(),
    }
}

// -----------------------------------------------------------------------
// export
// -----------------------------------------------------------------------

#[test]
fn export_is_pretty_printed_array() {
    let visited: VisitedSet = ["2", "1"].into_iter().collect();
    let out = export_visited(&visited).unwrap();
    assert_eq!(out, "[\n  \"1\",\n  \"2\"\n]");
}

#[test]
fn export_file_name_embeds_date() {
    let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
    assert_eq!(export_file_name(date), "mcdo-visited-jp-20260307.json");
}

#[test]
fn export_then_import_into_empty_set_round_trips() {
    let original: VisitedSet = ["10", "20", "abc"].into_iter().collect();
    let exported = export_visited(&original).unwrap();

    let batch = parse_import(&json_file(&exported)).unwrap();
    let mut fresh = VisitedSet::new();
    let report = apply_import(&batch, &mut fresh);

    assert_eq!(fresh, original);
    assert_eq!(report.added, 3);
}

// -----------------------------------------------------------------------
// import tolerance
// -----------------------------------------------------------------------

#[test]
fn import_skips_bad_entries_and_duplicates() {
    let batch = parse_import(&json_file(r#"["A", 42, {"bad": 1}, "A"]"#)).unwrap();
    assert_eq!(batch.read, 4);
    assert_eq!(batch.skipped, 1);

    let mut visited = VisitedSet::new();
    let report = apply_import(&batch, &mut visited);

    assert_eq!(visited.to_vec(), vec!["42".to_string(), "A".to_string()]);
    assert_eq!(report.added, 2);
    assert_eq!(report.read, 4);
    assert_eq!(report.skipped, 1);
}

#[test]
fn import_does_not_count_existing_ids() {
    let batch = parse_import(&json_file(r#"["1", "2"]"#)).unwrap();
    let mut visited: VisitedSet = ["1"].into_iter().collect();
    let report = apply_import(&batch, &mut visited);
    assert_eq!(report.added, 1);
    assert_eq!(visited.len(), 2);
}

// -----------------------------------------------------------------------
// import rejection
// -----------------------------------------------------------------------

#[test]
fn import_rejects_non_json_mime_before_parsing() {
    let file = ImportFile {
        name: "visited.txt".to_string(),
        mime_type: "text/plain".to_string(),
        contents: r#"["1"]"#.to_string(),
    };
    let err = parse_import(&file).unwrap_err();
    assert!(
        matches!(err, TransferError::UnsupportedMimeType { ref mime_type } if mime_type == "text/plain"),
        "got: {err:?}"
    );
}

#[test]
fn import_accepts_json_mime_with_parameters() {
    let mut file = json_file(r#"["1"]"#);
    file.mime_type = "Application/JSON; charset=utf-8".to_string();
    assert!(parse_import(&file).is_ok());
}

#[test]
fn import_rejects_invalid_json() {
    let err = parse_import(&json_file("[\"1\",")).unwrap_err();
    assert!(
        matches!(err, TransferError::InvalidJson { .. }),
        "got: {err:?}"
    );
}

#[test]
fn import_rejects_non_array() {
    let err = parse_import(&json_file(r#"{"visited": ["1"]}"#)).unwrap_err();
    assert!(
        matches!(err, TransferError::NotAnArray { found: "object", .. }),
        "got: {err:?}"
    );
}
