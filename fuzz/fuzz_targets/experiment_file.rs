#![no_main]

use bcfuzz_eval::config::ExperimentFile;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing and evaluating arbitrary experiment files must never panic
        if let Ok(file) = ExperimentFile::parse(input) {
            for report in &file.reports {
                let _ = report.evaluate();
            }
            if let Some(chart) = &file.chart {
                let _ = chart.layout();
            }
        }
    }
});
