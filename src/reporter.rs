//! Console report rendering.
//!
//! Prints the per-threat risk table and a category breakdown, with the
//! risk column colored by severity.

use console::{style, StyledObject};

use crate::models::RiskReport;

pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Print the full report table followed by a risk breakdown.
    pub fn print_summary(report: &RiskReport) {
        println!();
        println!("  THREAT RISK ASSESSMENT");
        println!("  {}", "─".repeat(82));
        println!(
            "  {:<44} {:>11} {:>11} {:>11}",
            "Threat", "Likelihood", "Impact", "Risk"
        );
        println!("  {}", "─".repeat(82));

        for row in &report.rows {
            println!(
                "  {:<44} {:>11} {:>11} {:>11}",
                truncate(&row.threat, 44),
                placeholder(&row.likelihood),
                placeholder(&row.impact),
                colorize(placeholder(&row.risk)),
            );
        }

        println!("  {}", "─".repeat(82));

        let (very_high, high, medium, low, very_low, unassessed) = breakdown(report);
        println!();
        println!("  RISK BREAKDOWN");
        println!(
            "  {} Very High: {}   {} High: {}   {} Medium: {}   {} Low: {}   {} Very Low: {}   Unassessed: {}",
            style("●").red().bold(),
            very_high,
            style("●").red(),
            high,
            style("●").yellow(),
            medium,
            style("●").green(),
            low,
            style("●").green().dim(),
            very_low,
            unassessed
        );
        println!(
            "  Generated {} | {} assets | {} controls applied",
            report.info.generated,
            report.info.asset_count,
            report.info.applied_controls.len()
        );
        println!();
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(width - 1).collect();
    truncated.push('…');
    truncated
}

fn placeholder(label: &str) -> &str {
    if label.is_empty() {
        "-"
    } else {
        label
    }
}

fn colorize(label: &str) -> StyledObject<&str> {
    match label {
        "Very High" => style(label).red().bold(),
        "High" => style(label).red(),
        "Medium" => style(label).yellow(),
        "Low" => style(label).green(),
        "Very Low" => style(label).green().dim(),
        _ => style(label).dim(),
    }
}

fn breakdown(report: &RiskReport) -> (usize, usize, usize, usize, usize, usize) {
    let mut counts = (0, 0, 0, 0, 0, 0);
    for row in &report.rows {
        match row.risk.as_str() {
            "Very High" => counts.0 += 1,
            "High" => counts.1 += 1,
            "Medium" => counts.2 += 1,
            "Low" => counts.3 += 1,
            "Very Low" => counts.4 += 1,
            _ => counts.5 += 1,
        }
    }
    counts
}
