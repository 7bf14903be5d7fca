use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::{default_export_file_name, ensure_webview_data_dir, AppConfig};
use crate::domain::entities::dataset::{Dataset, FilterKind, ALL_REVIEWERS};
use crate::domain::entities::form::EditForm;
use crate::domain::entities::record::{FieldMap, FieldValue, Record};
use crate::domain::entities::schema::{form_fields, NOT_REVIEWED, REVIEWED};
use crate::domain::entities::taxonomy::Taxonomy;
use crate::domain::errors::StoreError;
use crate::infra::export::csv::{export_headers, write_csv};
use crate::infra::import::csv::read_csv;
use crate::infra::import::xlsx::{cell_to_string, rows_to_tabular};
use crate::usecase::ports::tabular::TabularData;
use crate::usecase::services::category_resolver::{
    triple_state, CategoryResolver, CategoryTriple, Level, TripleState,
};
use crate::usecase::services::review_store::{ActionOutcome, ReviewAction, ReviewStore};
use crate::usecase::services::transfer_service::TransferService;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("rca-review-{prefix}-{nanos}"))
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn table(columns: &[&str], rows: &[&[&str]]) -> TabularData {
    TabularData {
        columns: strings(columns),
        rows: rows.iter().map(|row| strings(row)).collect(),
    }
}

fn sample_data() -> TabularData {
    table(
        &["ticket_id", "reviewer", "quality_reviewer", "last_specialised_queue", "rca1"],
        &[
            &["T1", "Alice", "Quinn", "Stays", ""],
            &["T2", "Bob", "", "", "Product"],
            &["T3", "Alice", "Quinn", "Stays", ""],
            &["T4", "", "Rae", "", ""],
        ],
    )
}

fn loaded_store() -> ReviewStore {
    let mut store = ReviewStore::default();
    store
        .load_dataset(sample_data())
        .expect("sample data should load");
    store
}

fn visible_ids(store: &ReviewStore) -> Vec<String> {
    store
        .visible_records()
        .map(|record| record.ticket_id().to_string())
        .collect()
}

fn sample_taxonomy() -> Taxonomy {
    Taxonomy::from_json(
        r#"{
            "level1": ["Process", "Product"],
            "level2": {
                "Process": ["Process unclear", "Policy"],
                "Product": ["Bug", "Outage"]
            },
            "level3": {
                "Outage": {
                    "": ["App outage", "Tech Outage"],
                    "Stays": ["Expedia Outage", "Viator Outage"]
                },
                "Bug": {
                    "": ["ADD BUG on POM Comments"]
                }
            }
        }"#,
    )
    .expect("sample taxonomy should parse")
}

fn form_for(fields: &[(&str, &str)]) -> EditForm {
    let record: Record = fields.iter().map(|(name, value)| (*name, *value)).collect();
    EditForm::from_record(&record, &form_fields())
}

#[test]
fn load_then_visible_records_yields_upload_in_order() {
    let store = loaded_store();

    assert_eq!(visible_ids(&store), vec!["T1", "T2", "T3", "T4"]);
    assert!(store.is_loaded());
    assert_eq!(store.working().map(Dataset::len), Some(4));
    assert_eq!(store.selected_ticket_id(), None);
}

#[test]
fn visible_records_can_be_restarted() {
    let store = loaded_store();
    let records = store.visible_records();

    assert_eq!(records.clone().count(), 4);
    assert_eq!(records.count(), 4);
}

#[test]
fn example_reviewer_filter_keeps_matching_rows() {
    let mut store = ReviewStore::default();
    store
        .load_dataset(table(
            &["ticket_id", "reviewer"],
            &[&["T1", "Alice"], &["T2", "Bob"]],
        ))
        .expect("dataset should load");

    store.set_filter(FilterKind::Reviewer, "Bob");

    let visible: Vec<&Record> = store.visible_records().collect();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].ticket_id(), "T2");
    assert_eq!(visible[0].text("reviewer"), "Bob");
}

#[test]
fn all_reviewers_sentinel_clears_filter() {
    let mut store = loaded_store();
    store.set_filter(FilterKind::Reviewer, "Alice");
    assert_eq!(visible_ids(&store), vec!["T1", "T3"]);

    store.set_filter(FilterKind::Reviewer, ALL_REVIEWERS);

    assert_eq!(store.filter(FilterKind::Reviewer), None);
    assert_eq!(visible_ids(&store), vec!["T1", "T2", "T3", "T4"]);
}

#[test]
fn filters_combine_with_and() {
    let mut store = loaded_store();
    store.set_filter(FilterKind::Reviewer, "Alice");
    store.set_filter(FilterKind::QualityReviewer, "Quinn");
    assert_eq!(visible_ids(&store), vec!["T1", "T3"]);

    store.set_filter(FilterKind::QualityReviewer, "Rae");
    assert!(visible_ids(&store).is_empty());

    store.set_filter(FilterKind::Reviewer, "Nobody");
    store.set_filter(FilterKind::QualityReviewer, ALL_REVIEWERS);
    assert!(visible_ids(&store).is_empty(), "unknown reviewer matches nothing");
}

#[test]
fn reviewer_options_use_first_seen_order_without_blanks() {
    let store = loaded_store();

    assert_eq!(store.reviewer_options(), vec![ALL_REVIEWERS, "Alice", "Bob"]);
    assert_eq!(
        store.quality_reviewer_options(),
        vec![ALL_REVIEWERS, "Quinn", "Rae"]
    );
    assert_eq!(ReviewStore::default().reviewer_options(), vec![ALL_REVIEWERS]);
}

#[test]
fn saving_never_changes_options_from_original() {
    let mut store = loaded_store();
    store.select_record("T2").expect("T2 should exist");

    let mut edited = FieldMap::new();
    edited.insert("reviewer".to_string(), FieldValue::from("Mallory"));
    store.save_selected(&edited).expect("save should succeed");

    assert_eq!(store.reviewer_options(), vec![ALL_REVIEWERS, "Alice", "Bob"]);
    let original = store.original().expect("original should exist");
    assert_eq!(original.records[1].text("reviewer"), "Bob");
    assert_eq!(original.records[1].get("updated"), None);
    let working = store.working().expect("working should exist");
    assert_eq!(working.records[1].text("reviewer"), "Mallory");
}

#[test]
fn save_merges_fields_and_marks_updated() {
    let mut store = loaded_store();
    store.select_record("T1").expect("T1 should exist");

    let mut edited = FieldMap::new();
    edited.insert("rca1".to_string(), FieldValue::from("Process"));
    let ticket_id = store.save_selected(&edited).expect("save should succeed");

    assert_eq!(ticket_id, "T1");
    let saved = store.selected_record().expect("T1 should stay selected");
    assert_eq!(saved.text("rca1"), "Process");
    assert_eq!(saved.text("reviewer"), "Alice");
    assert_eq!(saved.text("quality_reviewer"), "Quinn");
    assert_eq!(saved.text("last_specialised_queue"), "Stays");
    assert_eq!(saved.get("updated"), Some(&FieldValue::Flag(true)));

    let reopened = store.select_record("T1").expect("T1 should reopen");
    assert_eq!(reopened.text("rca1"), "Process");
    assert_eq!(store.updated_count(), 1);
    assert_eq!(visible_ids(&store), vec!["T1", "T2", "T3", "T4"]);
}

#[test]
fn save_without_selection_fails() {
    let mut store = loaded_store();

    let err = store
        .save_selected(&FieldMap::new())
        .expect_err("save without selection should fail");

    assert_eq!(err, StoreError::NoSelection);
    assert_eq!(store.updated_count(), 0);
}

#[test]
fn selecting_unknown_ticket_keeps_current_selection() {
    let mut store = loaded_store();
    store.select_record("T3").expect("T3 should exist");

    let err = store
        .select_record("T99")
        .expect_err("unknown ticket should fail");

    assert_eq!(err, StoreError::NotFound("T99".to_string()));
    assert_eq!(store.selected_ticket_id(), Some("T3"));
}

#[test]
fn select_prefills_form_with_record_values_and_defaults() {
    let mut store = loaded_store();

    let form = store.select_record("T2").expect("T2 should exist");

    assert_eq!(form.ticket_id(), "T2");
    assert_eq!(form.text("rca1"), "Product");
    assert_eq!(form.text("rca2"), "");
    assert_eq!(form.text("reviewed"), NOT_REVIEWED);
    assert_eq!(form.get("updated"), Some(&FieldValue::Flag(false)));
    assert_eq!(form.get("reviewer"), None, "passthrough columns stay off the form");
}

#[test]
fn reload_resets_selection_and_filters() {
    let mut store = loaded_store();
    store.select_record("T1").expect("T1 should exist");
    store.set_filter(FilterKind::Reviewer, "Alice");

    store
        .load_dataset(table(&["ticket_id"], &[&["N1"]]))
        .expect("second upload should load");

    assert_eq!(store.selected_ticket_id(), None);
    assert_eq!(store.filter(FilterKind::Reviewer), None);
    assert_eq!(visible_ids(&store), vec!["N1"]);
}

#[test]
fn clear_discards_everything() {
    let mut store = loaded_store();
    store.select_record("T1").expect("T1 should exist");
    store.set_filter(FilterKind::QualityReviewer, "Quinn");

    store.clear_dataset();

    assert!(!store.is_loaded());
    assert!(store.original().is_none());
    assert_eq!(store.selected_ticket_id(), None);
    assert_eq!(store.filter(FilterKind::QualityReviewer), None);
    assert_eq!(store.visible_records().count(), 0);
}

#[test]
fn load_rejects_malformed_payloads() {
    let cases = [
        (table(&[], &[]), "header row is required"),
        (table(&["reviewer"], &[&["Alice"]]), "missing required column"),
        (table(&["ticket_id", "ticket_id"], &[]), "duplicate column"),
        (table(&["ticket_id"], &[&["T1", "extra"]]), "has 2 fields"),
        (table(&["ticket_id"], &[&["T1"], &["T1"]]), "duplicate ticket_id"),
        (table(&["ticket_id", "reviewer"], &[&["", "Alice"]]), "empty ticket_id"),
    ];

    for (data, expected) in cases {
        let mut store = loaded_store();
        let err = store
            .load_dataset(data)
            .expect_err("malformed payload should be rejected");
        match &err {
            StoreError::InvalidInput(message) => assert!(
                message.contains(expected),
                "unexpected message: {message}"
            ),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            visible_ids(&store),
            vec!["T1", "T2", "T3", "T4"],
            "failed upload must leave the previous dataset in place"
        );
    }
}

#[test]
fn load_pads_short_rows() {
    let mut store = ReviewStore::default();
    store
        .load_dataset(table(&["ticket_id", "reviewer"], &[&["T1"]]))
        .expect("short row should load");

    let record = store.visible_records().next().expect("one record");
    assert_eq!(record.get("reviewer"), Some(&FieldValue::from("")));
}

#[test]
fn header_only_upload_loads_empty_dataset() {
    let mut store = ReviewStore::default();
    let rows = store
        .load_dataset(table(&["ticket_id", "reviewer"], &[]))
        .expect("header-only upload should load");

    assert_eq!(rows, 0);
    assert!(store.working().expect("working should exist").is_empty());
    assert_eq!(store.reviewer_options(), strings(&[ALL_REVIEWERS]));
}

#[test]
fn dispatch_runs_each_action() {
    let mut store = ReviewStore::default();

    let loaded = store
        .dispatch(ReviewAction::Load(sample_data()))
        .expect("load should succeed");
    assert_eq!(loaded, ActionOutcome::Loaded { rows: 4 });

    let filtered = store
        .dispatch(ReviewAction::SetFilter {
            kind: FilterKind::Reviewer,
            value: "Bob".to_string(),
        })
        .expect("filter should succeed");
    assert_eq!(filtered, ActionOutcome::FilterSet);
    assert_eq!(visible_ids(&store), vec!["T2"]);

    let ActionOutcome::Selected(mut form) = store
        .dispatch(ReviewAction::Select("T2".to_string()))
        .expect("select should succeed")
    else {
        panic!("select should return a form");
    };
    form.toggle("reviewed", REVIEWED, NOT_REVIEWED);

    let saved = store
        .dispatch(ReviewAction::Save(form.into_fields()))
        .expect("save should succeed");
    assert_eq!(
        saved,
        ActionOutcome::Saved {
            ticket_id: "T2".to_string()
        }
    );
    let badge = store.record_badge(store.selected_record().expect("T2 selected"));
    assert!(badge.reviewed);
    assert!(badge.selected);
    assert!(!badge.quality_reviewed);

    let cleared = store
        .dispatch(ReviewAction::Clear)
        .expect("clear should succeed");
    assert_eq!(cleared, ActionOutcome::Cleared);
    assert_eq!(
        store.dispatch(ReviewAction::Select("T2".to_string())),
        Err(StoreError::NotFound("T2".to_string()))
    );
}

#[test]
fn detail_fields_skip_empty_columns() {
    let mut store = ReviewStore::default();
    store
        .load_dataset(table(
            &["ticket_id", "queue_name", "crt", "reviewer"],
            &[&["T1", "Cards", "", "Alice"]],
        ))
        .expect("dataset should load");
    let record = store.visible_records().next().expect("one record").clone();

    let details = store.detail_fields(&record);

    assert_eq!(
        details,
        vec![
            ("Ticket ID", "T1".to_string()),
            ("Queue Name", "Cards".to_string()),
            ("Allocated POM", "Alice".to_string()),
        ]
    );
}

#[test]
fn form_fields_have_unique_names() {
    let fields = form_fields();
    let mut names: Vec<&str> = fields.iter().map(|field| field.name).collect();
    names.sort_unstable();
    names.dedup();

    assert_eq!(names.len(), fields.len());
    assert!(fields.iter().any(|field| field.name == "ter_rca3"));
}

#[test]
fn triple_field_names_follow_prefix() {
    assert_eq!(CategoryTriple::Primary.field_name(Level::One), "rca1");
    assert_eq!(CategoryTriple::Secondary.field_name(Level::Two), "sec_rca2");
    assert_eq!(CategoryTriple::Tertiary.field_name(Level::Three), "ter_rca3");
}

#[test]
fn level_options_follow_taxonomy() {
    let taxonomy = sample_taxonomy();
    let resolver = CategoryResolver::new(&taxonomy);

    assert_eq!(resolver.level1_options(), strings(&["Process", "Product"]));
    assert!(resolver.level2_options(None).is_empty());
    assert!(resolver.level2_options(Some("")).is_empty());
    assert!(resolver.level2_options(Some("People")).is_empty());
    assert_eq!(
        resolver.level2_options(Some("Product")),
        strings(&["Bug", "Outage"])
    );
    assert_eq!(
        resolver.level3_options(Some("Outage"), Some("Stays")),
        strings(&["Expedia Outage", "Viator Outage"])
    );
    assert_eq!(
        resolver.level3_options(Some("Outage"), Some("")),
        strings(&["App outage", "Tech Outage"])
    );
    assert!(resolver.level3_options(Some("Outage"), Some("Transfers")).is_empty());
    assert!(resolver.level3_options(Some("Policy"), Some("")).is_empty());
    assert!(resolver.level3_options(None, Some("Stays")).is_empty());
}

#[test]
fn level3_needs_a_queue_column() {
    let taxonomy = sample_taxonomy();
    let resolver = CategoryResolver::new(&taxonomy);

    assert!(resolver.level3_options(Some("Outage"), None).is_empty());

    let without_queue = form_for(&[("ticket_id", "T1"), ("rca1", "Product"), ("rca2", "Outage")]);
    assert_eq!(without_queue.context_key(), None);
    assert!(resolver
        .options(&without_queue, CategoryTriple::Primary, Level::Three)
        .is_empty());

    let empty_queue = form_for(&[
        ("ticket_id", "T1"),
        ("last_specialised_queue", ""),
        ("rca1", "Product"),
        ("rca2", "Outage"),
    ]);
    assert_eq!(empty_queue.context_key(), Some(""));
    assert_eq!(
        resolver.options(&empty_queue, CategoryTriple::Primary, Level::Three),
        strings(&["App outage", "Tech Outage"])
    );
}

#[test]
fn options_for_form_use_record_context_key() {
    let taxonomy = sample_taxonomy();
    let resolver = CategoryResolver::new(&taxonomy);
    let form = form_for(&[
        ("ticket_id", "T1"),
        ("last_specialised_queue", "Stays"),
        ("sec_rca1", "Product"),
        ("sec_rca2", "Outage"),
    ]);

    assert_eq!(
        resolver.options(&form, CategoryTriple::Secondary, Level::Three),
        strings(&["Expedia Outage", "Viator Outage"])
    );
    assert!(resolver
        .options(&form, CategoryTriple::Primary, Level::Two)
        .is_empty());
}

#[test]
fn changing_level1_always_clears_lower_levels() {
    let taxonomy = sample_taxonomy();
    let resolver = CategoryResolver::new(&taxonomy);
    let mut form = form_for(&[
        ("ticket_id", "T1"),
        ("rca1", "Product"),
        ("rca2", "Outage"),
        ("rca3", "App outage"),
        ("sec_rca1", "Process"),
    ]);

    resolver.on_level_change(&mut form, CategoryTriple::Primary, Level::One, "Product");

    assert_eq!(form.text("rca1"), "Product");
    assert_eq!(form.text("rca2"), "");
    assert_eq!(form.text("rca3"), "");
    assert_eq!(form.text("sec_rca1"), "Process", "other triples are untouched");
    assert_eq!(triple_state(&form, CategoryTriple::Primary), TripleState::Level1);
}

#[test]
fn changing_level2_clears_only_level3() {
    let taxonomy = sample_taxonomy();
    let resolver = CategoryResolver::new(&taxonomy);
    let mut form = form_for(&[
        ("ticket_id", "T1"),
        ("ter_rca1", "Product"),
        ("ter_rca2", "Outage"),
        ("ter_rca3", "App outage"),
    ]);
    assert_eq!(triple_state(&form, CategoryTriple::Tertiary), TripleState::Full);

    resolver.on_level_change(&mut form, CategoryTriple::Tertiary, Level::Two, "Bug");

    assert_eq!(form.text("ter_rca1"), "Product");
    assert_eq!(form.text("ter_rca2"), "Bug");
    assert_eq!(form.text("ter_rca3"), "");
    assert_eq!(triple_state(&form, CategoryTriple::Tertiary), TripleState::Level2);

    resolver.on_level_change(
        &mut form,
        CategoryTriple::Tertiary,
        Level::Three,
        "ADD BUG on POM Comments",
    );
    assert_eq!(triple_state(&form, CategoryTriple::Tertiary), TripleState::Full);
}

#[test]
fn stale_values_are_reported_not_dropped() {
    let taxonomy = sample_taxonomy();
    let resolver = CategoryResolver::new(&taxonomy);
    let form = form_for(&[
        ("ticket_id", "T1"),
        ("rca1", "Process"),
        ("rca2", "Outage"),
        ("rca3", "Legacy reason"),
    ]);

    let level2 = resolver.level_view(&form, CategoryTriple::Primary, Level::Two);
    assert!(level2.stale);
    assert_eq!(level2.current, "Outage");
    assert_eq!(level2.options, strings(&["Process unclear", "Policy"]));

    let level3 = resolver.level_view(&form, CategoryTriple::Primary, Level::Three);
    assert!(level3.stale);
    assert_eq!(level3.current, "Legacy reason");

    let unset = resolver.level_view(&form, CategoryTriple::Secondary, Level::One);
    assert!(!unset.stale);
    assert_eq!(unset.current, "");
}

#[test]
fn builtin_taxonomy_loads() {
    let taxonomy = Taxonomy::builtin().expect("built-in taxonomy should parse");
    let resolver = CategoryResolver::new(&taxonomy);

    assert_eq!(taxonomy.level1.len(), 5);
    assert_eq!(taxonomy.level1[0], "Process");
    assert!(resolver
        .level2_options(Some("Product"))
        .iter()
        .any(|value| value == "Outage"));
    assert_eq!(
        resolver.level3_options(Some("Outage"), Some("Stays")),
        strings(&["Expedia Outage", "Viator Outage"])
    );
}

#[test]
fn taxonomy_rejects_bad_documents() {
    assert!(Taxonomy::from_json("not json").is_err());
    let err = Taxonomy::from_json(r#"{"level1": [], "level2": {}, "level3": {}}"#)
        .expect_err("empty level1 should fail");
    assert!(err.to_string().contains("level1"), "unexpected error: {err:#}");
}

#[test]
fn taxonomy_loads_from_file() {
    let temp_dir = unique_test_dir("taxonomy");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let path = temp_dir.join("taxonomy.json");
    fs::write(&path, r#"{"level1": ["Only"], "level2": {}, "level3": {}}"#)
        .expect("should write taxonomy fixture");

    let taxonomy = Taxonomy::load(Some(path.as_path())).expect("taxonomy file should load");

    assert_eq!(taxonomy.level1, strings(&["Only"]));
    assert!(Taxonomy::load(Some(temp_dir.join("missing.json").as_path())).is_err());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn read_csv_uses_header_and_skips_blank_lines() {
    let input = "ticket_id,reviewer\nT1,Alice\n\nT2,Bob\n,\n";

    let data = read_csv(input.as_bytes()).expect("csv should parse");

    assert_eq!(data.columns, strings(&["ticket_id", "reviewer"]));
    assert_eq!(
        data.rows,
        vec![strings(&["T1", "Alice"]), strings(&["T2", "Bob"])]
    );
}

#[test]
fn read_csv_drops_unnamed_columns() {
    let input = "ticket_id,reviewer,,\nT1,Alice,,\nT2,Bob,,stray\n,,,x\n";

    let data = read_csv(input.as_bytes()).expect("csv should parse");

    assert_eq!(data.columns, strings(&["ticket_id", "reviewer"]));
    assert_eq!(
        data.rows,
        vec![strings(&["T1", "Alice"]), strings(&["T2", "Bob"])]
    );

    let mut store = ReviewStore::default();
    let rows = store
        .load_dataset(data)
        .expect("trailing empty columns should not block the upload");
    assert_eq!(rows, 2);
    assert_eq!(
        store.working().expect("working should exist").columns,
        strings(&["ticket_id", "reviewer"])
    );
}

#[test]
fn duplicate_named_columns_are_still_rejected() {
    let data = read_csv("ticket_id,reviewer,,reviewer\nT1,Alice,,Bob\n".as_bytes())
        .expect("csv should parse");

    let err = ReviewStore::default()
        .load_dataset(data)
        .expect_err("repeated header should fail");
    assert!(matches!(err, StoreError::InvalidInput(_)), "unexpected error: {err:?}");
}

#[test]
fn read_csv_fails_whole_file_on_bad_record() {
    let mut input = b"ticket_id,reviewer\nT1,Alice\nT2,".to_vec();
    input.extend_from_slice(&[0xff, 0xfe]);
    input.push(b'\n');

    let err = read_csv(input.as_slice()).expect_err("invalid utf-8 should fail");

    assert!(
        format!("{err:#}").contains("failed to parse csv record 2"),
        "unexpected error: {err:#}"
    );
    assert!(read_csv("".as_bytes()).is_err(), "missing header should fail");
}

#[test]
fn export_appends_new_fields_and_stringifies_flags() {
    let mut store = ReviewStore::default();
    store
        .load_dataset(table(
            &["ticket_id", "reviewer"],
            &[&["T1", "Alice"], &["T2", "Bob"]],
        ))
        .expect("dataset should load");
    let mut form = store.select_record("T2").expect("T2 should exist");
    form.set("rca1", "Product");
    store
        .save_selected(&form.into_fields())
        .expect("save should succeed");
    let working = store.working().expect("working should exist");

    let headers = export_headers(working);
    assert_eq!(&headers[..3], &strings(&["ticket_id", "reviewer", "rca1"])[..]);
    assert_eq!(headers.last().map(String::as_str), Some("updated"));

    let mut output = Vec::new();
    let rows = write_csv(&mut output, working).expect("export should succeed");
    assert_eq!(rows, 2);

    let exported = read_csv(output.as_slice()).expect("exported csv should parse");
    assert_eq!(exported.columns, headers);
    let updated_idx = headers
        .iter()
        .position(|h| h == "updated")
        .expect("updated column");
    assert_eq!(exported.rows[0][updated_idx], "");
    assert_eq!(exported.rows[1][updated_idx], "true");
    assert_eq!(exported.rows[1][2], "Product");
}

#[test]
fn transfer_service_round_trips_files() {
    let temp_dir = unique_test_dir("transfer");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let source = temp_dir.join("tickets.csv");
    fs::write(&source, "ticket_id,reviewer\nT1,Alice\nT2,Bob\n")
        .expect("should write csv fixture");
    let service = TransferService::default();

    let data = service.import(&source).expect("import should succeed");
    let mut store = ReviewStore::default();
    store.load_dataset(data).expect("dataset should load");
    store.select_record("T1").expect("T1 should exist");
    let mut edited = BTreeMap::new();
    edited.insert("reviewed".to_string(), FieldValue::from(REVIEWED));
    store.save_selected(&edited).expect("save should succeed");

    let target = temp_dir.join("out").join("export.csv");
    let working = store.working().expect("working should exist");
    let rows = service.export(&target, working).expect("export should succeed");
    assert_eq!(rows, 2);

    let exported = fs::read_to_string(&target).expect("should read exported csv");
    let mut lines = exported.lines();
    assert_eq!(lines.next(), Some("ticket_id,reviewer,reviewed,updated"));
    assert_eq!(lines.next(), Some("T1,Alice,Reviewed,true"));
    assert_eq!(lines.next(), Some("T2,Bob,,"));

    let missing = service.import(&temp_dir.join("missing.csv"));
    assert!(missing.is_err(), "missing file should fail");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn workbook_rows_drop_empty_lines() {
    let rows = vec![
        strings(&["", ""]),
        strings(&["ticket_id", "reviewer", ""]),
        strings(&["T1", "Alice"]),
        strings(&["", "", ""]),
        strings(&["T2", "Bob", ""]),
    ];

    let data = rows_to_tabular(rows).expect("rows should convert");

    assert_eq!(data.columns, strings(&["ticket_id", "reviewer"]));
    assert_eq!(
        data.rows,
        vec![strings(&["T1", "Alice"]), strings(&["T2", "Bob"])]
    );
    assert!(rows_to_tabular(Vec::new()).is_err());
}

#[test]
fn workbook_rows_drop_unnamed_columns() {
    let rows = vec![
        strings(&["ticket_id", "", "reviewer"]),
        strings(&["T1", "note", "Alice"]),
        strings(&["T2", "", "Bob"]),
    ];

    let data = rows_to_tabular(rows).expect("rows should convert");

    assert_eq!(data.columns, strings(&["ticket_id", "reviewer"]));
    assert_eq!(
        data.rows,
        vec![strings(&["T1", "Alice"]), strings(&["T2", "Bob"])]
    );
}

#[test]
fn workbook_cells_render_as_text() {
    use calamine::Data;

    assert_eq!(cell_to_string(&Data::Empty), "");
    assert_eq!(cell_to_string(&Data::Int(42)), "42");
    assert_eq!(cell_to_string(&Data::Bool(true)), "true");
    assert_eq!(cell_to_string(&Data::String("T1".to_string())), "T1");
}

#[test]
fn config_defaults_when_file_missing() {
    let temp_dir = unique_test_dir("config-missing");

    let config =
        AppConfig::load_from(&temp_dir.join("config.json")).expect("missing config is fine");

    assert_eq!(config, AppConfig::default());
}

#[test]
fn config_reads_file_and_env_overrides() {
    let temp_dir = unique_test_dir("config");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let path = temp_dir.join("config.json");
    fs::write(&path, r#"{"export_dir": "/tmp/reviews"}"#).expect("should write config");

    let config = AppConfig::load_from(&path)
        .expect("config should parse")
        .with_env_overrides(|key| match key {
            "RCA_REVIEW_TAXONOMY" => Some("/etc/rca/taxonomy.json".to_string()),
            "RCA_REVIEW_LOG_JSON" => Some("TRUE".to_string()),
            _ => None,
        });

    assert_eq!(config.export_dir, Some(PathBuf::from("/tmp/reviews")));
    assert_eq!(
        config.taxonomy_path,
        Some(PathBuf::from("/etc/rca/taxonomy.json"))
    );
    assert!(config.log_json);

    fs::write(&path, "{ broken").expect("should write config");
    assert!(AppConfig::load_from(&path).is_err());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn ensure_webview_data_dir_creates_webview2_subdir() {
    let temp_dir = unique_test_dir("webview-data-dir");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");

    let webview_dir =
        ensure_webview_data_dir(&temp_dir).expect("webview data dir should be created");

    assert_eq!(webview_dir, temp_dir.join("webview2"));
    assert!(webview_dir.is_dir(), "webview2 directory should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn default_export_file_name_has_month_day_suffix() {
    let name = default_export_file_name();

    assert!(name.starts_with("rca_review_"), "unexpected name: {name}");
    assert!(name.ends_with(".csv"), "unexpected name: {name}");
    assert_eq!(name.len(), "rca_review_MMDD.csv".len());
}
