use anyhow::{Context, Result};
use bcfuzz_eval::chart;
use bcfuzz_eval::cli::{Cli, Command, OutputFormat};
use bcfuzz_eval::config::ExperimentFile;
use bcfuzz_eval::csv_output::{self, CsvOutput};
use bcfuzz_eval::datasets;
use bcfuzz_eval::json_output::JsonOutput;
use bcfuzz_eval::ranksum::{Alternative, Method, RankSumConfig};
use bcfuzz_eval::report::{Comparison, Report, ReportOutcome};
use clap::Parser;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Look up built-in reports, failing on the first unknown name
fn resolve_builtin(names: &[String]) -> Result<Vec<Report>> {
    names
        .iter()
        .map(|name| {
            datasets::builtin_report(name).with_context(|| {
                format!(
                    "unknown report '{}' (available: {})",
                    name,
                    datasets::REPORT_NAMES.join(", ")
                )
            })
        })
        .collect()
}

/// Evaluate reports in order and print them in the requested format
fn print_reports(reports: &[Report], format: OutputFormat) -> Result<()> {
    let outcomes = reports
        .iter()
        .map(|report| Ok(report.evaluate()?))
        .collect::<Result<Vec<ReportOutcome>>>()?;

    match format {
        OutputFormat::Text => {
            for outcome in &outcomes {
                print!("{}", outcome.to_report_string());
            }
        }
        OutputFormat::Json => {
            let mut output = JsonOutput::new();
            for outcome in outcomes {
                output.add_report(outcome);
            }
            println!("{}", output.to_json()?);
        }
        OutputFormat::Csv => {
            let mut output = CsvOutput::new();
            for outcome in &outcomes {
                output.add_report(outcome);
            }
            print!("{}", output.to_csv());
        }
    }
    Ok(())
}

fn print_catalog(format: OutputFormat) -> Result<()> {
    let reports = datasets::builtin_reports();
    match format {
        OutputFormat::Text => {
            let width = datasets::REPORT_NAMES
                .iter()
                .map(|name| name.len())
                .max()
                .unwrap_or(0);
            for report in &reports {
                println!("{:<width$}  {}", report.name, report.description, width = width);
            }
        }
        OutputFormat::Json => {
            let mut output = JsonOutput::new();
            for report in &reports {
                output.add_catalog_entry(report);
            }
            println!("{}", output.to_json()?);
        }
        OutputFormat::Csv => print!("{}", csv_output::catalog_csv(&reports)),
    }
    Ok(())
}

/// Build a one-comparison report from command-line samples
fn adhoc_report(
    x: Vec<f64>,
    y: Vec<f64>,
    alternative: Alternative,
    continuity: bool,
    method: Method,
    precision: u32,
) -> Report {
    let mut report = Report::new("compare", "Ad hoc comparison", precision)
        .sample("x", &x)
        .sample("y", &y);
    report.comparisons.push(Comparison {
        title: "x_vs_y".to_string(),
        x: "x".to_string(),
        y: "y".to_string(),
        config: RankSumConfig::new(alternative)
            .with_continuity(continuity)
            .with_method(method),
    });
    report
}

fn render_chart(output: &Path, data: Option<&Path>) -> Result<()> {
    let dataset = match data {
        Some(path) => ExperimentFile::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?
            .chart
            .with_context(|| format!("{} has no [chart] table", path.display()))?,
        None => datasets::example_chart(),
    };

    chart::write_svg(&dataset, output)
        .with_context(|| format!("failed to render chart to {}", output.display()))?;
    println!("{}", output.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    match args.command {
        Command::List => print_catalog(args.format)?,
        Command::Report { names, all } => {
            let reports = if all {
                datasets::builtin_reports()
            } else {
                resolve_builtin(&names)?
            };
            print_reports(&reports, args.format)?;
        }
        Command::Run { file } => {
            let experiment = ExperimentFile::load(&file)
                .with_context(|| format!("failed to load {}", file.display()))?;
            if experiment.reports.is_empty() {
                anyhow::bail!("{} defines no reports", file.display());
            }
            info!(file = %file.display(), reports = experiment.reports.len(), "running experiment file");
            print_reports(&experiment.reports, args.format)?;
        }
        Command::Compare {
            x,
            y,
            alternative,
            continuity,
            method,
            precision,
        } => {
            let report = adhoc_report(x, y, alternative, continuity, method, precision);
            print_reports(&[report], args.format)?;
        }
        Command::Export { names } => {
            let reports = if names.is_empty() {
                datasets::builtin_reports()
            } else {
                resolve_builtin(&names)?
            };
            print!("{}", ExperimentFile::new(reports).to_toml_string()?);
        }
        Command::Chart { output, data } => render_chart(&output, data.as_deref())?,
    }

    Ok(())
}
