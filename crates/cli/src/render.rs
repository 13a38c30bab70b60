//! Human-readable rendering of harness results

use colored::Colorize;
use tabled::{Table, Tabled};

use jtv_bridge_core::application::harness::{ReportLine, ScenarioReport};
use jtv_bridge_core::application::{HarnessFailure, HarnessSummary};

const RULE_WIDTH: usize = 60;

#[derive(Tabled)]
struct SampleRow {
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Elapsed")]
    elapsed: String,
    #[tabled(rename = "Value")]
    value: String,
}

pub fn summary(summary: &HarnessSummary) {
    rule();
    println!("{}", "JtV Bridge - Benchmark & Safety Scenarios".cyan().bold());
    rule();
    println!();

    for report in &summary.reports {
        scenario(report);
    }

    let rows: Vec<SampleRow> = summary
        .reports
        .iter()
        .flat_map(|report| {
            report.samples.iter().map(move |sample| SampleRow {
                scenario: report.title.clone(),
                label: sample.label.clone(),
                elapsed: format!("{:.2}ms", sample.elapsed_ms()),
                value: sample.value.replace('\n', " "),
            })
        })
        .collect();

    if !rows.is_empty() {
        println!("{}", Table::new(rows));
        println!();
    }

    match &summary.failure {
        None => {
            rule();
            println!("{}", "All scenarios completed successfully!".green().bold());
            rule();
        }
        Some(f) => failure(f),
    }
}

fn scenario(report: &ScenarioReport) {
    println!("{}", format!("{}:", report.title).bold());
    for line in &report.lines {
        match line {
            ReportLine::Fact(text) => println!("  {}", text),
            ReportLine::Claim(text) => println!("  {} {}", "✓".green(), text),
            ReportLine::Warning(text) => println!("  {} {}", "!".yellow().bold(), text.yellow()),
        }
    }
    println!();
}

/// Single actionable message for a stopped run
pub fn failure(failure: &HarnessFailure) {
    println!("{} {}", "Error:".red().bold(), failure);
}

pub fn error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

fn rule() {
    println!("{}", "=".repeat(RULE_WIDTH));
}
