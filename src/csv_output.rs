//! CSV output format for report outcomes
//!
//! One row per mean and one row per comparison, so a whole campaign can be
//! loaded into a spreadsheet and filtered by `kind`.

use crate::report::{Report, ReportOutcome};

const HEADER: &str = "report,kind,label,x,y,mean,median,stddev,statistic,pvalue,method,alternative";

/// CSV output formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    rows: Vec<String>,
}

impl CsvOutput {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Add the mean rows and test rows of an evaluated report
    pub fn add_report(&mut self, outcome: &ReportOutcome) {
        let report = Self::escape_field(&outcome.name);

        for line in &outcome.means {
            self.rows.push(format!(
                "{},mean,{},,,{},{},{},,,,",
                report,
                Self::escape_field(&line.label),
                line.mean,
                line.summary.median,
                line.summary.stddev
            ));
        }

        for test in &outcome.tests {
            self.rows.push(format!(
                "{},test,{},{},{},,,,{:?},{:?},{},{}",
                report,
                Self::escape_field(&test.title),
                Self::escape_field(&test.x),
                Self::escape_field(&test.y),
                test.result.statistic,
                test.result.pvalue,
                test.result.method,
                test.result.alternative
            ));
        }
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();

        output.push_str(HEADER);
        output.push('\n');

        for row in &self.rows {
            output.push_str(row);
            output.push('\n');
        }

        output
    }
}

/// CSV listing of available reports (for `list`)
pub fn catalog_csv(reports: &[Report]) -> String {
    let mut output = String::from("name,samples,comparisons,description\n");
    for report in reports {
        output.push_str(&format!(
            "{},{},{},{}\n",
            CsvOutput::escape_field(&report.name),
            report.samples.len(),
            report.comparisons.len(),
            CsvOutput::escape_field(&report.description)
        ));
    }
    output
}
