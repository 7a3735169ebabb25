//! Summarize a saved factorization report.
//!
//! hqr show --report-file ...

use std::io::Write;

use anyhow::Result;
use clap::Args;

use hqr_core::report::serialization::{load_report_json, report_summary};
use hqr_core::verify::check_factorization;

#[derive(Args)]
pub struct ShowArgs {
    /// Report written by `hqr factor --json-out`
    #[arg(long)]
    report_file: String,

    /// Recompute the self-check from the stored matrices
    #[arg(long)]
    recheck: bool,
}

pub fn run(args: ShowArgs) -> Result<()> {
    let stdout = std::io::stdout();
    run_with_io(args, &mut stdout.lock())
}

pub fn run_with_io<W: Write>(args: ShowArgs, output: &mut W) -> Result<()> {
    let report = load_report_json(std::path::Path::new(&args.report_file))?;

    writeln!(output, "Report: {}", args.report_file)?;
    writeln!(output, "{}", report_summary(&report))?;

    if args.recheck {
        let f = report.factorization()?;
        let check = check_factorization(&report.input()?, &f.r, &f.reflectors)?;
        writeln!(output, "Recomputed max |QR - A|: {:.3e}", check.reconstruction_error)?;
        writeln!(output, "Recomputed max |Q'Q - I|: {:.3e}", check.orthogonality_error)?;
    }

    Ok(())
}
