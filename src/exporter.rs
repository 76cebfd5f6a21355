//! Report export.
//!
//! Writes the risk report as pretty JSON and as the semicolon-delimited
//! CSV layout used by downstream tooling (`Threat;Likelihood;Impact;Risk`).

use std::path::Path;

use crate::errors::{RiskError, RiskResult};
use crate::models::RiskReport;

pub struct ReportExporter;

impl ReportExporter {
    /// Write the report as pretty-printed JSON.
    pub fn export_json(report: &RiskReport, path: &Path) -> RiskResult<()> {
        let json = serde_json::to_string_pretty(report)?;
        std::fs::write(path, json).map_err(|e| RiskError::io(e, Some(path.to_path_buf())))?;
        log::info!("Wrote JSON report to {:?}", path);
        Ok(())
    }

    /// Write the report as semicolon-delimited CSV.
    pub fn export_csv(report: &RiskReport, path: &Path) -> RiskResult<()> {
        let mut output = String::from("Threat;Likelihood;Impact;Risk\n");
        for row in &report.rows {
            output.push_str(&format!(
                "{};{};{};{}\n",
                row.threat, row.likelihood, row.impact, row.risk
            ));
        }
        std::fs::write(path, output).map_err(|e| RiskError::io(e, Some(path.to_path_buf())))?;
        log::info!("Wrote CSV report to {:?}", path);
        Ok(())
    }
}
