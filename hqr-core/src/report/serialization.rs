//! Report serialization.
//!
//! Reports are written as pretty-printed JSON so they can be diffed and
//! inspected by hand.

use anyhow::{bail, Result};
use std::path::Path;

use super::factorization::FactorizationReport;

/// Save a report as JSON.
pub fn save_report_json(report: &FactorizationReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a report written by [`save_report_json`].
pub fn load_report_json(path: &Path) -> Result<FactorizationReport> {
    let data = std::fs::read_to_string(path)?;
    let report: FactorizationReport = serde_json::from_str(&data)?;

    if report.format != FactorizationReport::FORMAT {
        bail!(
            "Invalid report file: expected format {:?}, got {:?}",
            FactorizationReport::FORMAT,
            report.format
        );
    }
    if report.version > FactorizationReport::VERSION {
        bail!(
            "Report version {} is newer than supported version {}",
            report.version,
            FactorizationReport::VERSION
        );
    }
    if let Err(e) = report.validate() {
        bail!("Invalid report file: {}", e);
    }

    Ok(report)
}

/// Summary of a report (for display).
pub fn report_summary(report: &FactorizationReport) -> String {
    format!(
        "Householder QR report v{}\n\
         Shape: {} x {}\n\
         Fill: {}\n\
         Lower triangle zeroed: {}\n\
         Max | ||v_i|| - 1 |: {:.3e}\n\
         Max |QR - A|: {:.3e}\n\
         Max |Q'Q - I|: {:.3e}\n\
         Max |R below diagonal|: {:.3e}",
        report.version,
        report.rows,
        report.cols,
        report.fill,
        if report.zero_below_diagonal { "yes" } else { "no" },
        report.check.max_norm_deviation,
        report.check.reconstruction_error,
        report.check.orthogonality_error,
        report.check.max_below_diagonal,
    )
}
