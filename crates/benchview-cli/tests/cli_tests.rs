//! Tests for the `benchview` binary
//!
//! Runs the real binary against fixture roots and checks exit status,
//! messages, and the generated report tree.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const RUN: &str = "data_name,objective_name,solver_name,stop_val,time,objective_value\n\
                   A,obj1,sgd,1,0.1,3.0\n\
                   A,obj1,sgd,2,0.2,2.0\n\
                   A,obj1,adam,1,0.15,2.5\n\
                   B,obj1,sgd,1,0.1,5.0\n";

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn benchview(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("benchview").unwrap();
    cmd.arg("--root").arg(root).env_remove("RUST_LOG");
    cmd
}

#[test]
fn generates_report_for_fixture_root() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("outputs/smooth/run1.csv"), RUN);

    benchview(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 1 results across 1 benchmarks"));

    let html = temp.path().join("html");
    assert!(html.join("index.html").is_file());
    assert!(html.join("smooth.html").is_file());
    assert!(html.join("smooth_run1.html").is_file());
    assert!(html.join("figures/smooth/smooth_run1_0.svg").is_file());
    assert!(html.join("outputs/smooth/run1.csv").is_file());
}

#[test]
fn benchmark_and_pattern_filters_apply() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("outputs/smooth/run1.csv"), RUN);
    write(&temp.path().join("outputs/smooth/other.csv"), RUN);
    write(&temp.path().join("outputs/lasso/run1.csv"), RUN);

    benchview(temp.path())
        .args(["-b", "smooth", "-k", "run*"])
        .assert()
        .success();

    let html = temp.path().join("html");
    assert!(html.join("smooth_run1.html").is_file());
    assert!(!html.join("smooth_other.html").exists());
    assert!(!html.join("lasso.html").exists());
}

#[test]
fn config_file_selects_kinds_and_inline_mode() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("outputs/smooth/run1.csv"), RUN);
    write(
        &temp.path().join("benchview.toml"),
        "title = \"Solver shootout\"\nkinds = [\"objective_curve\"]\ninline_kinds = [\"objective_curve\"]\n",
    );

    benchview(temp.path()).assert().success();

    let html = temp.path().join("html");
    assert!(!html.join("figures/smooth").exists());
    let page = fs::read_to_string(html.join("smooth_run1.html")).unwrap();
    assert!(page.contains("<svg"));
    let index = fs::read_to_string(html.join("index.html")).unwrap();
    assert!(index.contains("Solver shootout"));
}

#[test]
fn malformed_table_fails_with_file_name() {
    let temp = TempDir::new().unwrap();
    write(
        &temp.path().join("outputs/smooth/broken.csv"),
        "data_name,time\nA,1\n",
    );

    benchview(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.csv"));
}

#[test]
fn unknown_kind_in_config_fails() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("outputs/smooth/run1.csv"), RUN);
    write(&temp.path().join("benchview.toml"), "kinds = [\"pie_chart\"]\n");

    benchview(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown chart kind 'pie_chart'"));
    assert!(!temp.path().join("html").exists());
}

#[test]
fn empty_root_produces_empty_index() {
    let temp = TempDir::new().unwrap();

    benchview(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 0 results across 0 benchmarks"));

    let index = fs::read_to_string(temp.path().join("html/index.html")).unwrap();
    assert!(index.contains("No benchmarks found"));
}

#[test]
fn benchmark_named_index_fails_without_replacing_report_index() {
    let temp = TempDir::new().unwrap();
    write(&temp.path().join("outputs/index/r.csv"), RUN);

    benchview(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("page 'index.html'"));
    assert!(!temp.path().join("html").exists());
}
