//! Integration tests for the bcfuzz-eval command line

use predicates::prelude::*;
use std::fs;

fn bcfuzz_eval() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("bcfuzz-eval")
}

const EXPERIMENT: &str = r#"
[[report]]
name = "jit-ablation"
description = "JIT tier disabled"
precision = 1

[[report.sample]]
label = "baseline"
values = [1.0, 2.0, 3.0]

[[report.sample]]
label = "treatment"
values = [4.0, 5.0, 6.0]

[[report.comparison]]
title = "baseline_vs_treatment"
x = "baseline"
y = "treatment"
"#;

#[test]
fn test_list_shows_all_reports() {
    let mut assert = bcfuzz_eval().arg("list").assert().success();
    for name in bcfuzz_eval::datasets::REPORT_NAMES {
        assert = assert.stdout(predicate::str::contains(*name));
    }
}

#[test]
fn test_compare_exact_layout() {
    bcfuzz_eval()
        .args(["compare", "--x", "1,2,3", "--y", "4,5,6"])
        .assert()
        .success()
        .stdout(
            "x :  2.0\n\
             y :  5.0\n\
             =============p-value==============\n\
             x_vs_y:\n\
             MannwhitneyuResult(statistic=0.0, pvalue=0.05)\n\n",
        );
}

#[test]
fn test_compare_greater_alternative() {
    bcfuzz_eval()
        .args(["compare", "--x", "1,2,3", "--y", "4,5,6", "--alternative", "greater"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "MannwhitneyuResult(statistic=0.0, pvalue=1.0)",
        ));
}

#[test]
fn test_compare_all_tied_fails() {
    bcfuzz_eval()
        .args(["compare", "--x", "1,1", "--y", "1,1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("all observations are tied"));
}

#[test]
fn test_compare_rejects_bad_number() {
    bcfuzz_eval()
        .args(["compare", "--x", "1,two", "--y", "3"])
        .assert()
        .failure();
}

#[test]
fn test_report_ablation_bug() {
    bcfuzz_eval()
        .args(["report", "ablation-bug"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "bcfuzz_1 :  3.2\nbcfuzz_gen :  1.8\nbcfuzz_nojitir :  1.4\n",
        ))
        .stdout(predicate::str::contains(
            "=============p-value==============\nbcfuzz_gen:\nMannwhitneyuResult(statistic=3.5, pvalue=0.02431615225",
        ))
        .stdout(predicate::str::contains("bcfuzz_schedule:\nMannwhitneyuResult(statistic=4.5, "));
}

#[test]
fn test_report_without_separator() {
    bcfuzz_eval()
        .args(["report", "bytecode-test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("least_5_fuzzilli :  90.5\n"))
        .stdout(predicate::str::contains("p-value").not());
}

#[test]
fn test_report_unknown_name() {
    bcfuzz_eval()
        .args(["report", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown report 'nope'"));
}

#[test]
fn test_report_all_is_deterministic() {
    let first = bcfuzz_eval().args(["report", "--all"]).output().unwrap();
    let second = bcfuzz_eval().args(["report", "--all"]).output().unwrap();

    assert!(first.status.success());
    assert!(!first.stdout.is_empty());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_report_json_parses() {
    let output = bcfuzz_eval()
        .args(["--format", "json", "report", "bug", "coverage"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["format"], "bcfuzz-eval-json-v1");
    assert_eq!(parsed["reports"].as_array().unwrap().len(), 2);
    assert_eq!(parsed["reports"][0]["name"], "bug");
    assert_eq!(parsed["reports"][1]["name"], "coverage");
}

#[test]
fn test_report_csv_header() {
    bcfuzz_eval()
        .args(["report", "ablation-bug", "--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "report,kind,label,x,y,mean,median,stddev,statistic,pvalue,method,alternative\n",
        ))
        .stdout(predicate::str::contains("ablation-bug,mean,bcfuzz_gen,,,1.8,"));
}

#[test]
fn test_list_json() {
    let output = bcfuzz_eval()
        .args(["--format", "json", "list"])
        .output()
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["catalog"].as_array().unwrap().len(), 7);
    assert!(parsed.get("reports").is_none());
}

#[test]
fn test_run_experiment_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("campaign.toml");
    fs::write(&path, EXPERIMENT).unwrap();

    bcfuzz_eval()
        .arg("run")
        .arg(&path)
        .assert()
        .success()
        .stdout(
            "baseline :  2.0\n\
             treatment :  5.0\n\
             =============p-value==============\n\
             baseline_vs_treatment:\n\
             MannwhitneyuResult(statistic=0.0, pvalue=0.05)\n\n",
        );
}

#[test]
fn test_run_rejects_unknown_sample() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("campaign.toml");
    fs::write(&path, EXPERIMENT.replace("y = \"treatment\"", "y = \"missing\"")).unwrap();

    bcfuzz_eval()
        .arg("run")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown sample 'missing'"));
}

#[test]
fn test_run_missing_file() {
    bcfuzz_eval()
        .args(["run", "/nonexistent/campaign.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("campaign.toml"));
}

#[test]
fn test_export_then_run_matches_builtin() {
    let exported = bcfuzz_eval()
        .args(["export", "ablation-bytecode-num"])
        .output()
        .unwrap();
    assert!(exported.status.success());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("exported.toml");
    fs::write(&path, &exported.stdout).unwrap();

    let from_file = bcfuzz_eval().arg("run").arg(&path).output().unwrap();
    let builtin = bcfuzz_eval()
        .args(["report", "ablation-bytecode-num"])
        .output()
        .unwrap();

    assert!(from_file.status.success());
    assert_eq!(from_file.stdout, builtin.stdout);
}

#[test]
fn test_chart_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bars.svg");

    bcfuzz_eval()
        .arg("chart")
        .arg("--output")
        .arg(&path)
        .assert()
        .success();

    let svg = fs::read_to_string(&path).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains("Bar chart with error bars"));
}

#[test]
fn test_chart_from_data_file() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("chart.toml");
    let out = dir.path().join("engines.svg");
    fs::write(
        &data,
        r#"
[chart]
title = "Bugs per engine"
y_label = "Bugs"

[[chart.bar]]
label = "JSC"
value = 3.4
error = 0.9
"#,
    )
    .unwrap();

    bcfuzz_eval()
        .arg("chart")
        .arg("--data")
        .arg(&data)
        .arg("-o")
        .arg(&out)
        .assert()
        .success();

    assert!(fs::read_to_string(&out).unwrap().contains("Bugs per engine"));
}

#[test]
fn test_chart_data_without_chart_table() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("campaign.toml");
    fs::write(&data, EXPERIMENT).unwrap();

    bcfuzz_eval()
        .arg("chart")
        .arg("--data")
        .arg(&data)
        .arg("--output")
        .arg(dir.path().join("unused.svg"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("has no [chart] table"));
}

#[test]
fn test_debug_logs_to_stderr() {
    bcfuzz_eval()
        .args(["--debug", "compare", "--x", "1,2,3", "--y", "4,5,6"])
        .assert()
        .success()
        .stderr(predicate::str::contains("mann-whitney u"))
        .stdout(predicate::str::contains("pvalue=0.05"));
}

#[test]
fn test_compare_rejects_oversized_precision() {
    bcfuzz_eval()
        .args(["compare", "--x", "1,2,3", "--y", "4,5,6", "--precision", "4000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--precision"));
}

#[test]
fn test_run_rejects_oversized_precision() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("campaign.toml");
    fs::write(&path, EXPERIMENT.replace("precision = 1", "precision = 4000000000")).unwrap();

    bcfuzz_eval()
        .arg("run")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("precision 4000000000 exceeds 17 digits"));
}

#[test]
fn test_report_bytecode_num_block_layout() {
    bcfuzz_eval()
        .args(["report", "bytecode-num"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "fuzzilli:\n582.8\n\nbcfuzz_fuzzilli:\n592.6\n\n",
        ))
        .stdout(predicate::str::contains("\n=============p-value==============\n"));
}

#[test]
fn test_compare_forced_exact_on_long_samples() {
    let x = (0..600).map(|i| i.to_string()).collect::<Vec<_>>().join(",");
    let y = (0..600).map(|i| format!("{}.5", i)).collect::<Vec<_>>().join(",");

    bcfuzz_eval()
        .args(["compare", "--method", "exact", "--x", x.as_str(), "--y", y.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("MannwhitneyuResult(statistic="));
}
