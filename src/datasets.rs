//! Built-in campaign results
//!
//! Each report holds the per-run measurements of one evaluation table
//! (five runs per configuration unless noted) and the comparisons that
//! were tested for it. All comparisons are one-sided `less` tests of the
//! first sample against the second. A few comparisons put the baseline
//! first and a few put the treatment first; that ordering is kept exactly
//! as the tables were computed. Titles are kept too, including the
//! ablation bytecode-num table where `bcfuzz_1` vs `bcfuzz_noedge` was
//! printed under a second `bcfuzz_nojit` heading.

use crate::chart::ChartDataset;
use crate::report::{MeanLayout, Report};

/// Names of the built-in reports, in listing order
pub const REPORT_NAMES: &[&str] = &[
    "bug",
    "coverage",
    "bytecode-num",
    "bytecode-test",
    "ablation-bug",
    "ablation-bytecode-num",
    "ablation-bytecode-test",
];

/// All built-in reports, in listing order
pub fn builtin_reports() -> Vec<Report> {
    vec![
        bug(),
        coverage(),
        bytecode_num(),
        bytecode_test(),
        ablation_bug(),
        ablation_bytecode_num(),
        ablation_bytecode_test(),
    ]
}

/// Look up a built-in report by name
pub fn builtin_report(name: &str) -> Option<Report> {
    match name {
        "bug" => Some(bug()),
        "coverage" => Some(coverage()),
        "bytecode-num" => Some(bytecode_num()),
        "bytecode-test" => Some(bytecode_test()),
        "ablation-bug" => Some(ablation_bug()),
        "ablation-bytecode-num" => Some(ablation_bytecode_num()),
        "ablation-bytecode-test" => Some(ablation_bytecode_test()),
        _ => None,
    }
}

/// Unique bugs per JavaScript engine, baseline fuzzers vs BCFuzz-enhanced
pub fn bug() -> Report {
    Report::new(
        "bug",
        "Unique bugs found per engine (JSC, V8, Hermes, JerryScript)",
        2,
    )
    .sample("fuzzilli_jsc", &[1.0, 1.0, 3.0, 2.0, 2.0])
    .sample("bcfuzz_fuzzilli_jsc", &[2.0, 4.0, 4.0, 4.0, 3.0])
    .sample("die_jsc", &[1.0, 2.0, 3.0, 2.0, 3.0])
    .sample("bcfuzz_die_jsc", &[3.0, 5.0, 4.0, 4.0, 2.0])
    .sample("fuzzilli_v8", &[1.0, 0.0, 0.0, 1.0, 1.0])
    .sample("bcfuzz_fuzzilli_v8", &[1.0, 1.0, 1.0, 1.0, 1.0])
    .sample("die_v8", &[0.0, 0.0, 0.0, 0.0, 1.0])
    .sample("bcfuzz_die_v8", &[1.0, 0.0, 1.0, 0.0, 2.0])
    .sample("fuzzilli_hermes", &[1.0, 0.0, 2.0, 2.0, 0.0])
    .sample("bcfuzz_fuzzilli_hermes", &[2.0, 1.0, 4.0, 3.0, 3.0])
    .sample("die_hermes", &[4.0, 3.0, 3.0, 4.0, 3.0])
    .sample("bcfuzz_die_hermes", &[5.0, 6.0, 4.0, 5.0, 5.0])
    .sample("fuzzilli_jerry", &[5.0, 4.0, 4.0, 5.0, 4.0])
    .sample("bcfuzz_fuzzilli_jerry", &[5.0, 8.0, 6.0, 8.0, 6.0])
    .sample("die_jerry", &[2.0, 2.0, 2.0, 2.0, 2.0])
    .sample("bcfuzz_die_jerry", &[3.0, 3.0, 2.0, 4.0, 4.0])
    .compare("fuzzilli_jsc", "fuzzilli_jsc", "bcfuzz_fuzzilli_jsc")
    .compare("die_jsc", "die_jsc", "bcfuzz_die_jsc")
    .compare("fuzzilli_v8", "fuzzilli_v8", "bcfuzz_fuzzilli_v8")
    .compare("die_v8", "die_v8", "bcfuzz_die_v8")
    .compare("fuzzilli_hermes", "fuzzilli_hermes", "bcfuzz_fuzzilli_hermes")
    .compare("die_hermes", "die_hermes", "bcfuzz_die_hermes")
    .compare("fuzzilli_jerry", "fuzzilli_jerry", "bcfuzz_fuzzilli_jerry")
    .compare("die_jerry", "die_jerry", "bcfuzz_die_jerry")
}

/// Line/function/branch coverage (%) on Hermes and JSC
///
/// BCFuzz+Fuzzilli on Hermes has four runs instead of five.
pub fn coverage() -> Report {
    Report::new(
        "coverage",
        "Line, function and branch coverage (%) on Hermes and JSC",
        2,
    )
    .sample("fuzzilli_hermes_line_cov", &[59.5, 60.1, 58.9, 58.5, 59.2])
    .sample("fuzzilli_hermes_func_cov", &[60.8, 60.9, 59.9, 60.1, 60.7])
    .sample("fuzzilli_hermes_branch_cov", &[37.8, 38.3, 37.2, 37.1, 37.4])
    .sample("bcfuzz_fuzzilli_hermes_line_cov", &[58.3, 58.5, 58.3, 58.4])
    .sample("bcfuzz_fuzzilli_hermes_func_cov", &[59.5, 60.2, 59.9, 60.0])
    .sample("bcfuzz_fuzzilli_hermes_branch_cov", &[36.5, 36.8, 36.5, 36.4])
    .sample("die_hermes_line_cov", &[57.2, 57.1, 57.1, 57.2, 57.2])
    .sample("die_hermes_func_cov", &[56.0, 55.8, 55.8, 55.8, 55.8])
    .sample("die_hermes_branch_cov", &[40.5, 40.3, 40.3, 40.4, 40.5])
    .sample("bcfuzz_die_hermes_line_cov", &[56.9, 57.1, 56.8, 57.0, 57.0])
    .sample("bcfuzz_die_hermes_func_cov", &[55.7, 55.8, 55.7, 55.7, 55.7])
    .sample("bcfuzz_die_hermes_branch_cov", &[40.1, 40.2, 40.0, 40.0, 40.1])
    .sample("fuzzilli_jsc_line_cov", &[52.6, 52.2, 52.4, 52.0, 52.4])
    .sample("fuzzilli_jsc_func_cov", &[51.4, 51.1, 51.1, 51.0, 51.3])
    .sample("fuzzilli_jsc_branch_cov", &[37.0, 36.7, 36.8, 36.3, 36.9])
    .sample("bcfuzz_fuzzilli_jsc_line_cov", &[51.7, 51.9, 51.8, 52.2, 51.8])
    .sample("bcfuzz_fuzzilli_jsc_func_cov", &[50.7, 50.8, 50.8, 51.1, 50.7])
    .sample("bcfuzz_fuzzilli_jsc_branch_cov", &[35.9, 36.1, 36.0, 36.3, 36.0])
    .sample("die_jsc_line_cov", &[53.5, 53.4, 53.5, 53.4, 53.5])
    .sample("die_jsc_func_cov", &[53.6, 52.4, 52.5, 52.4, 52.6])
    .sample("die_jsc_branch_cov", &[36.3, 36.0, 36.2, 36.0, 36.2])
    .sample("bcfuzz_die_jsc_line_cov", &[54.2, 54.1, 54.2, 54.1, 54.1])
    .sample("bcfuzz_die_jsc_func_cov", &[53.0, 52.9, 53.1, 52.9, 53.0])
    .sample("bcfuzz_die_jsc_branch_cov", &[36.7, 36.5, 36.7, 36.6, 36.6])
    .compare(
        "fuzzilli_hermes_line",
        "bcfuzz_fuzzilli_hermes_line_cov",
        "fuzzilli_hermes_line_cov",
    )
    .compare(
        "fuzzilli_hermes_func",
        "bcfuzz_fuzzilli_hermes_func_cov",
        "fuzzilli_hermes_func_cov",
    )
    .compare(
        "fuzzilli_hermes_branch",
        "bcfuzz_fuzzilli_hermes_branch_cov",
        "fuzzilli_hermes_branch_cov",
    )
    .compare(
        "die_hermes_line",
        "bcfuzz_die_hermes_line_cov",
        "die_hermes_line_cov",
    )
    .compare(
        "die_hermes_func",
        "bcfuzz_die_hermes_func_cov",
        "die_hermes_func_cov",
    )
    .compare(
        "die_hermes_branch",
        "bcfuzz_die_hermes_branch_cov",
        "die_hermes_branch_cov",
    )
    .compare(
        "fuzzilli_jsc_line",
        "bcfuzz_fuzzilli_jsc_line_cov",
        "fuzzilli_jsc_line_cov",
    )
    .compare(
        "fuzzilli_jsc_func",
        "bcfuzz_fuzzilli_jsc_func_cov",
        "fuzzilli_jsc_func_cov",
    )
    .compare(
        "fuzzilli_jsc_branch",
        "bcfuzz_fuzzilli_jsc_branch_cov",
        "fuzzilli_jsc_branch_cov",
    )
    .compare("die_jsc_line", "die_jsc_line_cov", "bcfuzz_die_jsc_line_cov")
    .compare("die_jsc_func", "die_jsc_func_cov", "bcfuzz_die_jsc_func_cov")
    .compare(
        "die_jsc_branch",
        "die_jsc_branch_cov",
        "bcfuzz_die_jsc_branch_cov",
    )
}

/// Distinct bytecodes triggered, baseline fuzzers vs BCFuzz-enhanced
pub fn bytecode_num() -> Report {
    Report::new("bytecode-num", "Number of distinct bytecodes triggered", 2)
        .with_mean_layout(MeanLayout::Block)
        .sample("fuzzilli", &[581.0, 584.0, 584.0, 582.0, 583.0])
        .sample("bcfuzz_fuzzilli", &[592.0, 593.0, 593.0, 593.0, 592.0])
        .sample("die", &[570.0, 570.0, 570.0, 570.0, 569.0])
        .sample("bcfuzz_die", &[596.0, 595.0, 596.0, 595.0, 597.0])
        .compare("fuzzilli", "fuzzilli", "bcfuzz_fuzzilli")
        .compare("die", "die", "bcfuzz_die")
}

/// Bytecodes reaching the least-N execution thresholds (N = 5, 15, 25)
pub fn bytecode_test() -> Report {
    Report::new(
        "bytecode-test",
        "Bytecodes tested at least N times (N = 5, 15, 25)",
        1,
    )
    .without_separator()
    .sample("least_5_bcfuzz_fuzzilli", &[845.0, 767.1, 724.1, 951.4, 737.3])
    .sample("least_15_bcfuzz_fuzzilli", &[1414.0, 1423.4, 1424.3, 1636.0, 1282.2])
    .sample("least_25_bcfuzz_fuzzilli", &[1961.4, 2015.7, 1994.8, 2176.7, 1735.0])
    .sample("least_5_fuzzilli", &[96.1, 77.8, 85.9, 90.9, 101.8])
    .sample("least_15_fuzzilli", &[316.4, 333.3, 322.3, 315.3, 344.5])
    .sample("least_25_fuzzilli", &[642.3, 645.1, 623.4, 606.4, 659.1])
    .sample("least_5_bcfuzz_die", &[202.8, 86.6, 234.9, 149.0, 90.3])
    .sample("least_15_bcfuzz_die", &[421.0, 200.2, 436.9, 300.9, 221.1])
    .sample("least_25_bcfuzz_die", &[648.5, 318.7, 632.8, 448.3, 331.1])
    .sample("least_5_die", &[35.2, 18.5, 35.8, 24.1, 25.0])
    .sample("least_15_die", &[135.7, 96.8, 112.9, 145.5, 122.3])
    .sample("least_25_die", &[312.6, 216.7, 253.0, 303.6, 285.0])
    .compare("fuzzilli_5", "least_5_fuzzilli", "least_5_bcfuzz_fuzzilli")
    .compare("fuzzilli_15", "least_15_fuzzilli", "least_15_bcfuzz_fuzzilli")
    .compare("fuzzilli_25", "least_25_fuzzilli", "least_25_bcfuzz_fuzzilli")
    .compare("die_5", "least_5_die", "least_5_bcfuzz_die")
    .compare("die_15", "least_15_die", "least_15_bcfuzz_die")
    .compare("die_25", "least_25_die", "least_25_bcfuzz_die")
}

/// Ablation study: bug counts per disabled BCFuzz component
///
/// `bcfuzz_1` is the baseline for generator/JIT-IR/edge ablations,
/// `bcfuzz_2` the baseline for mutation and scheduling ablations.
pub fn ablation_bug() -> Report {
    Report::new("ablation-bug", "Ablation study: unique bugs found", 2)
        .sample("bcfuzz_1", &[2.0, 5.0, 3.0, 3.0, 3.0])
        .sample("bcfuzz_gen", &[2.0, 3.0, 1.0, 2.0, 1.0])
        .sample("bcfuzz_nojitir", &[1.0, 1.0, 0.0, 3.0, 2.0])
        .sample("bcfuzz_noedge", &[1.0, 3.0, 2.0, 3.0, 3.0])
        .sample("bcfuzz_2", &[4.0, 5.0, 3.0, 4.0, 5.0])
        .sample("bcfuzz_mutate", &[2.0, 3.0, 3.0, 2.0, 2.0])
        .sample("bcfuzz_schedule", &[4.0, 3.0, 2.0, 2.0, 4.0])
        .compare("bcfuzz_gen", "bcfuzz_gen", "bcfuzz_1")
        .compare("bcfuzz_nojitir", "bcfuzz_nojitir", "bcfuzz_1")
        .compare("bcfuzz_noedge", "bcfuzz_noedge", "bcfuzz_1")
        .compare("bcfuzz_mutate", "bcfuzz_mutate", "bcfuzz_2")
        .compare("bcfuzz_schedule", "bcfuzz_schedule", "bcfuzz_2")
}

/// Ablation study: distinct bytecodes triggered
pub fn ablation_bytecode_num() -> Report {
    Report::new(
        "ablation-bytecode-num",
        "Ablation study: number of distinct bytecodes triggered \
         (the bcfuzz_1 vs bcfuzz_noedge test is titled bcfuzz_nojit)",
        1,
    )
    .sample("bcfuzz_1", &[592.0, 589.0, 591.0, 586.0, 591.0])
    .sample("bcfuzz_gen", &[585.0, 590.0, 587.0, 588.0, 590.0])
    .sample("bcfuzz_nojit", &[178.0, 178.0, 177.0, 177.0, 176.0])
    .sample("bcfuzz_noedge", &[593.0, 592.0, 591.0, 585.0, 591.0])
    .sample("bcfuzz_2", &[587.0, 592.0, 584.0, 590.0, 587.0])
    .sample("bcfuzz_mutate", &[592.0, 590.0, 588.0, 589.0, 590.0])
    .sample("bcfuzz_schedule", &[591.0, 593.0, 590.0, 592.0, 588.0])
    .compare("bcfuzz_gen", "bcfuzz_gen", "bcfuzz_1")
    .compare("bcfuzz_nojit", "bcfuzz_nojit", "bcfuzz_1")
    .compare("bcfuzz_nojit", "bcfuzz_1", "bcfuzz_noedge")
    .compare("bcfuzz_mutate", "bcfuzz_2", "bcfuzz_mutate")
    .compare("bcfuzz_schedule", "bcfuzz_2", "bcfuzz_schedule")
}

/// Ablation study: least-N bytecode thresholds
pub fn ablation_bytecode_test() -> Report {
    Report::new(
        "ablation-bytecode-test",
        "Ablation study: bytecodes tested at least N times (N = 5, 15, 25)",
        1,
    )
    .without_separator()
    .sample("least_5_bcfuzz_1", &[383.7, 426.4, 293.3, 421.4, 513.3])
    .sample("least_15_bcfuzz_1", &[670.6, 763.9, 666.7, 794.7, 860.6])
    .sample("least_25_bcfuzz_1", &[991.1, 1093.7, 1015.2, 1171.5, 1199.6])
    .sample("least_5_bcfuzz_nojit", &[3313.2, 2166.9, 2577.9, 2395.9, 3898.2])
    .sample("least_15_bcfuzz_nojit", &[6332.5, 4965.3, 5780.8, 5414.4, 8363.0])
    .sample("least_25_bcfuzz_nojit", &[8816.1, 7345.3, 8357.7, 8319.6, 11746.9])
    .sample("least_5_bcfuzz_noedge", &[349.9, 273.1, 475.5, 583.1, 565.5])
    .sample("least_15_bcfuzz_noedge", &[769.3, 721.0, 789.9, 914.4, 949.2])
    .sample("least_25_bcfuzz_noedge", &[1115.3, 1108.1, 1044.0, 1204.4, 1302.5])
    .sample("least_5_bcfuzz_edgeonly", &[244.7, 80.8, 134.4, 69.1, 100.0])
    .sample("least_15_bcfuzz_edgeonly", &[1391.8, 853.7, 1043.7, 1083.0, 784.3])
    .sample("least_25_bcfuzz_edgeonly", &[3355.3, 2733.0, 3153.5, 3418.5, 2342.7])
    .sample("least_5_bcfuzz_2", &[2261.1, 2989.9, 2442.4, 2074.4, 1613.9])
    .sample("least_15_bcfuzz_2", &[2931.4, 4781.0, 3800.2, 3041.2, 2601.8])
    .sample("least_25_bcfuzz_2", &[4516.8, 7736.0, 5907.6, 5262.3, 3957.4])
    .sample("least_5_bcfuzz_mutate", &[2116.3, 2426.2, 2105.1, 2333.2, 1778.3])
    .sample("least_15_bcfuzz_mutate", &[2804.7, 3764.9, 2764.6, 3025.1, 2866.7])
    .sample("least_25_bcfuzz_mutate", &[4707.5, 6658.5, 4600.8, 5263.2, 4827.0])
    .sample("least_5_bcfuzz_selection", &[1026.2, 1155.3, 1373.7, 886.8, 900.9])
    .sample("least_15_bcfuzz_selection", &[2544.1, 4134.5, 3251.7, 2675.2, 2666.7])
    .sample("least_25_bcfuzz_selection", &[4724.3, 7979.0, 5250.9, 5322.2, 5124.0])
    .compare("5_bcfuzz_edgeonly", "least_5_bcfuzz_edgeonly", "least_5_bcfuzz_1")
    .compare("15_bcfuzz_edgeonly", "least_15_bcfuzz_1", "least_15_bcfuzz_edgeonly")
    .compare("25_bcfuzz_edgeonly", "least_25_bcfuzz_1", "least_25_bcfuzz_edgeonly")
    .compare("5_bcfuzz_nojit", "least_5_bcfuzz_1", "least_5_bcfuzz_nojit")
    .compare("15_bcfuzz_nojit", "least_15_bcfuzz_1", "least_15_bcfuzz_nojit")
    .compare("25_bcfuzz_nojit", "least_25_bcfuzz_1", "least_25_bcfuzz_nojit")
    .compare("5_bcfuzz_noedge", "least_5_bcfuzz_1", "least_5_bcfuzz_noedge")
    .compare("15_bcfuzz_noedge", "least_15_bcfuzz_1", "least_15_bcfuzz_noedge")
    .compare("25_bcfuzz_noedge", "least_25_bcfuzz_1", "least_25_bcfuzz_noedge")
    .compare("5_bcfuzz_mutate", "least_5_bcfuzz_mutate", "least_5_bcfuzz_2")
    .compare("15_bcfuzz_mutate", "least_15_bcfuzz_mutate", "least_15_bcfuzz_2")
    .compare("25_bcfuzz_mutate", "least_25_bcfuzz_mutate", "least_25_bcfuzz_2")
    .compare("5_bcfuzz_schedule", "least_5_bcfuzz_selection", "least_5_bcfuzz_2")
    .compare("15_bcfuzz_schedule", "least_15_bcfuzz_selection", "least_15_bcfuzz_2")
    .compare("25_bcfuzz_schedule", "least_25_bcfuzz_2", "least_25_bcfuzz_selection")
}

/// Example dataset for the error-bar chart
pub fn example_chart() -> ChartDataset {
    ChartDataset::new("Bar chart with error bars", "Value")
        .bar("A", 10.0, 1.5)
        .bar("B", 15.0, 2.0)
        .bar("C", 7.0, 1.0)
        .bar("D", 12.0, 1.8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_match_reports() {
        let reports = builtin_reports();
        assert_eq!(reports.len(), REPORT_NAMES.len());
        for (report, name) in reports.iter().zip(REPORT_NAMES) {
            assert_eq!(report.name, *name);
            assert_eq!(builtin_report(name).as_ref(), Some(report));
        }
        assert!(builtin_report("nope").is_none());
    }

    #[test]
    fn test_builtin_reports_validate() {
        for report in builtin_reports() {
            report
                .validate()
                .unwrap_or_else(|e| panic!("{} invalid: {}", report.name, e));
        }
    }

    #[test]
    fn test_builtin_reports_evaluate() {
        for report in builtin_reports() {
            let outcome = report
                .evaluate()
                .unwrap_or_else(|e| panic!("{} failed: {}", report.name, e));
            assert_eq!(outcome.means.len(), report.samples.len());
            assert_eq!(outcome.tests.len(), report.comparisons.len());
            for test in &outcome.tests {
                assert!((0.0..=1.0).contains(&test.result.pvalue));
            }
        }
    }

    #[test]
    fn test_bug_means() {
        let outcome = bug().evaluate().unwrap();
        let text = outcome.to_report_string();
        assert!(text.starts_with("fuzzilli_jsc :  1.8\nbcfuzz_fuzzilli_jsc :  3.4\n"));
        assert!(text.contains("bcfuzz_fuzzilli_v8 :  1.0\n"));
    }

    #[test]
    fn test_ablation_bytecode_num_means() {
        let outcome = ablation_bytecode_num().evaluate().unwrap();
        let means: Vec<String> = outcome.means.iter().map(|m| m.mean.to_string()).collect();
        assert_eq!(
            means,
            vec!["589.8", "588.0", "177.2", "590.4", "588.0", "589.8", "590.8"]
        );
    }

    #[test]
    fn test_bytecode_num_block_layout() {
        let text = bytecode_num().evaluate().unwrap().to_report_string();
        assert!(text.starts_with(
            "fuzzilli:\n582.8\n\n\
             bcfuzz_fuzzilli:\n592.6\n\n\
             die:\n569.8\n\n\
             bcfuzz_die:\n595.8\n\n\
             =============p-value==============\n\
             fuzzilli:\nMannwhitneyuResult("
        ));
    }

    #[test]
    fn test_ablation_bytecode_num_titles_kept() {
        let report = ablation_bytecode_num();
        let titles: Vec<&str> = report.comparisons.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["bcfuzz_gen", "bcfuzz_nojit", "bcfuzz_nojit", "bcfuzz_mutate", "bcfuzz_schedule"]
        );

        let noedge = &report.comparisons[2];
        assert_eq!((noedge.x.as_str(), noedge.y.as_str()), ("bcfuzz_1", "bcfuzz_noedge"));

        let text = report.evaluate().unwrap().to_report_string();
        assert_eq!(text.matches("bcfuzz_nojit:\n").count(), 2);
    }

    #[test]
    fn test_example_chart_shape() {
        let chart = example_chart();
        assert_eq!(chart.len(), 4);
        chart.validate().unwrap();
    }
}
