//! Loading tables from files on disk.

use std::io::Write;

use mrec_ingest::{IngestError, LoadOptions, list_columns, load_table};
use mrec_model::{CellValue, Table};
use mrec_output::write_xlsx;
use tempfile::NamedTempFile;

fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_table_reads_text_and_missing() {
    let file = temp_file(
        ".csv",
        "\u{feff}片名,导演,年份\n流浪地球,郭帆,2019\n满江红,NaN,\n\"无名, 特别版\",程耳,007\n",
    );

    let table = load_table(file.path(), &LoadOptions::default()).unwrap();

    assert_eq!(table.columns(), &["片名", "导演", "年份"]);
    assert_eq!(table.len(), 3);
    assert_eq!(table.cell(1, 1), &CellValue::Missing);
    assert_eq!(table.cell(1, 2), &CellValue::Missing);
    assert_eq!(table.cell(2, 0).to_text(), "无名, 特别版");
    assert_eq!(table.cell(2, 2).to_text(), "007");
}

#[test]
fn test_load_table_names_table_after_stem() {
    let file = temp_file(".csv", "title\nHero\n");
    let table = load_table(file.path(), &LoadOptions::default()).unwrap();
    let stem = file.path().file_stem().unwrap().to_string_lossy();
    assert_eq!(table.name, stem);
}

#[test]
fn test_load_tab_separated() {
    let file = temp_file(".tsv", "title\tcast\n流浪地球\t吴京/屈楚萧\n");
    let options = LoadOptions {
        delimiter: b'\t',
        ..LoadOptions::default()
    };

    let table = load_table(file.path(), &options).unwrap();

    assert_eq!(table.columns(), &["title", "cast"]);
    assert_eq!(table.cell(0, 1).to_text(), "吴京/屈楚萧");
}

#[test]
fn test_infer_types_yields_numbers() {
    let file = temp_file(".csv", "title,year\nHero,2002\n");
    let options = LoadOptions {
        infer_types: true,
        ..LoadOptions::default()
    };

    let table = load_table(file.path(), &options).unwrap();

    assert_eq!(table.cell(0, 1), &CellValue::Number(2002.0));
    assert_eq!(table.cell(0, 1).to_text(), "2002");
}

#[test]
fn test_header_only_file_is_empty_table() {
    let file = temp_file(".csv", "title,year\n");
    let table = load_table(file.path(), &LoadOptions::default()).unwrap();
    assert!(table.is_empty());
    assert_eq!(table.columns().len(), 2);
}

#[test]
fn test_list_columns() {
    let file = temp_file(".csv", "片名,\"导演 \",年份\n");
    assert_eq!(
        list_columns(file.path(), &LoadOptions::default()).unwrap(),
        vec!["片名", "导演", "年份"]
    );
}

#[test]
fn test_empty_file_rejected() {
    let file = temp_file(".csv", "");
    let err = load_table(file.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::EmptyCsv { .. }), "{err}");
}

fn written_report(dir: &std::path::Path) -> std::path::PathBuf {
    let mut table = Table::new(
        "report",
        ["片名", "导演", "年份", "SCORE", "STATUS"]
            .iter()
            .map(|c| (*c).to_string())
            .collect(),
    )
    .unwrap();
    table
        .push_row(vec![
            "流浪地球".into(),
            "郭帆".into(),
            CellValue::Number(2019.0),
            CellValue::Number(93.3),
            "WARNING".into(),
        ])
        .unwrap();
    table
        .push_row(vec![
            "满江红".into(),
            CellValue::Missing,
            "2023".into(),
            CellValue::Number(0.0),
            "FAILED".into(),
        ])
        .unwrap();

    let path = dir.join("report.xlsx");
    write_xlsx(&table, &path).unwrap();
    path
}

#[test]
fn test_load_workbook_written_by_export() {
    let dir = tempfile::tempdir().unwrap();
    let path = written_report(dir.path());

    let table = load_table(&path, &LoadOptions::default()).unwrap();

    assert_eq!(table.name, "report");
    assert_eq!(table.columns(), &["片名", "导演", "年份", "SCORE", "STATUS"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.cell(0, 0).to_text(), "流浪地球");
    assert_eq!(table.cell(0, 2), &CellValue::Text("2019".to_string()));
    assert_eq!(table.cell(0, 3).to_text(), "93.3");
    assert_eq!(table.cell(1, 1), &CellValue::Missing);
    assert_eq!(table.cell(1, 2).to_text(), "2023");
    assert_eq!(table.cell(1, 4).to_text(), "FAILED");
}

#[test]
fn test_load_workbook_with_inferred_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let path = written_report(dir.path());
    let options = LoadOptions {
        infer_types: true,
        ..LoadOptions::default()
    };

    let table = load_table(&path, &options).unwrap();

    assert_eq!(table.cell(0, 2), &CellValue::Number(2019.0));
    assert_eq!(table.cell(1, 3), &CellValue::Number(0.0));
}

#[test]
fn test_list_workbook_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = written_report(dir.path());
    assert_eq!(
        list_columns(&path, &LoadOptions::default()).unwrap(),
        vec!["片名", "导演", "年份", "SCORE", "STATUS"]
    );
}

#[test]
fn test_invalid_workbook_rejected() {
    let file = temp_file(".xlsx", "片名,导演\n流浪地球,郭帆\n");
    let err = load_table(file.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::Workbook { .. }), "{err}");
}
