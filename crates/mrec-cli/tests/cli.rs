//! Integration tests for argument parsing and config assembly.

use std::fs;

use clap::Parser;
use mrec_cli::cli::{Cli, Command, MatchArgs};
use mrec_cli::config::{build_config, load_options};
use mrec_model::{AcceptancePolicy, FieldPair, MatchMode, OutputMode};

fn match_args(extra: &[&str]) -> MatchArgs {
    let mut argv = vec!["mrec", "match", "片单.csv", "平台.csv", "-o", "report.csv"];
    argv.extend_from_slice(extra);
    let cli = Cli::try_parse_from(argv).unwrap();
    match cli.command {
        Command::Match(args) => args,
        Command::Columns(_) => panic!("expected match subcommand"),
    }
}

#[test]
fn test_parse_match_flags() {
    let args = match_args(&[
        "--map",
        "片名=title",
        "--map",
        "year",
        "--key",
        "年份=year",
        "--feedback",
        "id,platform",
        "--mode",
        "tokens",
        "--threshold",
        "2",
        "--parallel",
    ]);

    assert_eq!(
        args.map,
        vec![FieldPair::new("片名", "title"), FieldPair::new("year", "year")]
    );
    assert_eq!(args.key, Some(FieldPair::new("年份", "year")));
    assert_eq!(args.feedback, vec!["id", "platform"]);
    assert_eq!(args.delimiter, ',');

    let config = build_config(&args).unwrap();
    assert_eq!(config.mode, MatchMode::SetIntersection);
    assert_eq!(config.effective_threshold(), 2.0);
    assert_eq!(config.key_filter.as_ref().unwrap().base, "年份");
    assert_eq!(config.feedback_fields, vec!["id", "platform"]);
    assert!(config.parallel);
    assert!(config.use_index);
    assert!(config.track_diffs);
}

#[test]
fn test_rejects_malformed_pair() {
    let result = Cli::try_parse_from([
        "mrec", "match", "a.csv", "b.csv", "-o", "r.csv", "--map", "片名=",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_missing_mapping_is_an_error() {
    let args = match_args(&[]);
    let err = build_config(&args).unwrap_err();
    assert!(err.to_string().contains("--map"), "unexpected error: {err}");
}

#[test]
fn test_config_file_with_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("match.json");
    fs::write(
        &path,
        r#"{
            "mapping": [{"base": "片名", "target": "title"}],
            "threshold": 90,
            "feedback_fields": ["platform"],
            "output": {"absent_marker": "未找到"}
        }"#,
    )
    .unwrap();
    let config_path = path.to_str().unwrap();

    let args = match_args(&["--config", config_path]);
    let config = build_config(&args).unwrap();
    assert_eq!(config.effective_threshold(), 90.0);
    assert_eq!(config.output.absent_marker, "未找到");
    assert_eq!(config.mapping.pairs(), &[FieldPair::new("片名", "title")]);

    let args = match_args(&[
        "--config",
        config_path,
        "--threshold",
        "80",
        "--map",
        "导演=director",
        "--output-mode",
        "exploded",
        "--no-diffs",
        "--no-index",
    ]);
    let config = build_config(&args).unwrap();
    assert_eq!(config.effective_threshold(), 80.0);
    assert_eq!(config.mapping.pairs(), &[FieldPair::new("导演", "director")]);
    assert_eq!(config.output.mode, OutputMode::Exploded);
    assert_eq!(config.feedback_fields, vec!["platform"]);
    assert!(!config.track_diffs);
    assert!(!config.use_index);
}

#[test]
fn test_invalid_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{"mapping": []}"#).unwrap();

    let args = match_args(&["--config", path.to_str().unwrap()]);
    assert!(build_config(&args).is_err());
}

#[test]
fn test_top_n_policy() {
    let config = build_config(&match_args(&["--map", "title", "--top-n", "3"])).unwrap();
    assert_eq!(config.policy, AcceptancePolicy::TopN { n: 3 });

    let config = build_config(&match_args(&[
        "--map",
        "title",
        "--policy",
        "all-qualifying",
    ]))
    .unwrap();
    assert_eq!(config.policy, AcceptancePolicy::AllQualifying);

    assert!(build_config(&match_args(&["--map", "title", "--policy", "top-n"])).is_err());
    assert!(
        build_config(&match_args(&[
            "--map",
            "title",
            "--policy",
            "best-only",
            "--top-n",
            "2"
        ]))
        .is_err()
    );
    assert!(build_config(&match_args(&["--map", "title", "--top-n", "0"])).is_err());
}

#[test]
fn test_set_intersection_needs_positive_threshold() {
    let args = match_args(&["--map", "cast", "--mode", "tokens", "--threshold", "0"]);
    assert!(build_config(&args).is_err());
}

#[test]
fn test_load_options_delimiter() {
    let options = load_options('\t', true).unwrap();
    assert_eq!(options.delimiter, b'\t');
    assert!(options.infer_types);
    assert!(load_options('，', false).is_err());
}

#[test]
fn test_parse_columns_subcommand() {
    let cli = Cli::try_parse_from(["mrec", "-v", "columns", "平台.csv", "--delimiter", ";"]).unwrap();
    match cli.command {
        Command::Columns(args) => {
            assert_eq!(args.file.to_str(), Some("平台.csv"));
            assert_eq!(args.delimiter, ';');
        }
        Command::Match(_) => panic!("expected columns subcommand"),
    }
}

#[test]
fn test_mode_and_output_mode_spellings() {
    for (mode, output_mode) in [("set-intersection", "single-row"), ("tokens", "single")] {
        let config = build_config(&match_args(&[
            "--map",
            "cast",
            "--mode",
            mode,
            "--output-mode",
            output_mode,
        ]))
        .unwrap();
        assert_eq!(config.mode, MatchMode::SetIntersection);
        assert_eq!(config.output.mode, OutputMode::SingleRow);
    }
}

#[test]
fn test_help_describes_match_options() {
    let err = match Cli::try_parse_from(["mrec", "match", "--help"]) {
        Ok(_) => panic!("--help should stop parsing"),
        Err(err) => err,
    };
    let help = err.to_string();
    assert!(help.contains("Scoring mode"), "{help}");
    assert!(help.contains("qualifying candidates are kept"), "{help}");
    assert!(help.contains("Report shape"), "{help}");
    assert!(help.contains("set-intersection"), "{help}");
}
