//! Factorize a generated test matrix and print the result.
//!
//! hqr factor --rows ... --cols ... [--fill ...] [--json-out ...]

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use tracing::info;

use hqr_core::householder::{reduce, HouseholderConfig, ReflectorSet};
use hqr_core::report::serialization::save_report_json;
use hqr_core::report::FactorizationReport;
use hqr_core::util::fill::{build_matrix, FillPattern};
use hqr_core::verify::check_factorization;
use hqr_core::Factorization;

/// Tolerance used for the pass/fail line of the self-check.
const CHECK_TOL: f64 = 1e-8;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FillKind {
    /// row - col + 1 on and below the diagonal, zero above
    Staircase,
    /// Uniform in [-1, 1) from --seed
    Random,
    /// 1 / (row + col + 1)
    Hilbert,
}

#[derive(Args)]
pub struct FactorArgs {
    /// Number of rows m (prompted for when omitted)
    #[arg(short = 'm', long)]
    rows: Option<i64>,

    /// Number of columns n (prompted for when omitted)
    #[arg(short = 'n', long)]
    cols: Option<i64>,

    /// How to fill the test matrix
    #[arg(long, value_enum, default_value = "staircase")]
    fill: FillKind,

    /// Seed for --fill random
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Set the entries of R below the diagonal to exact zero
    #[arg(long)]
    zero_below_diagonal: bool,

    /// Reflect trailing columns in parallel
    #[arg(long)]
    parallel: bool,

    /// Minimum trailing columns for a parallel step
    #[arg(long, default_value = "64")]
    parallel_min_cols: usize,

    /// Write the factorization and self-check as JSON
    #[arg(long)]
    json_out: Option<String>,
}

impl FactorArgs {
    fn fill_pattern(&self) -> FillPattern {
        match self.fill {
            FillKind::Staircase => FillPattern::Staircase,
            FillKind::Random => FillPattern::Random { seed: self.seed },
            FillKind::Hilbert => FillPattern::Hilbert,
        }
    }

    fn config(&self) -> HouseholderConfig {
        HouseholderConfig {
            zero_below_diagonal: self.zero_below_diagonal,
            parallel: self.parallel,
            parallel_min_cols: self.parallel_min_cols,
        }
    }
}

pub fn run(args: FactorArgs) -> Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_with_io(args, &mut stdin.lock(), &mut stdout.lock())
}

/// Ask for one dimension on `output` and read it from `input`.
fn prompt_dimension<R: BufRead, W: Write>(input: &mut R, output: &mut W, name: &str) -> Result<i64> {
    write!(
        output,
        "Enter the dimension {} (where A is a m by n matrix): ",
        name
    )?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("No value given for dimension {}", name);
    }
    line.trim()
        .parse::<i64>()
        .with_context(|| format!("Dimension {} must be an integer, got {:?}", name, line.trim()))
}

/// Usage-contract check done before the reducer runs.
fn dimension_problem(m: i64, n: i64) -> Option<&'static str> {
    if m < 1 || n < 1 {
        Some("For a successful factorization, both m and n must be positive.")
    } else if m < n {
        Some("For a successful factorization, this implementation requires n <= m.")
    } else if m
        .checked_mul(n)
        .and_then(|entries| entries.checked_mul(std::mem::size_of::<f64>() as i64))
        .is_none()
    {
        Some("The matrix is too large to allocate.")
    } else {
        None
    }
}

fn print_reflectors<W: Write>(output: &mut W, factorization: &Factorization) -> Result<()> {
    for (i, v) in factorization.reflectors.iter().enumerate() {
        write!(output, "v[{}] =", i)?;
        for x in v {
            write!(output, " {:>10.6}", x)?;
        }
        writeln!(output)?;
    }
    writeln!(output)?;
    Ok(())
}

fn print_norms<W: Write>(output: &mut W, norms: &[f64]) -> Result<()> {
    writeln!(
        output,
        "Numerical verification that v[0], ..., v[{}] are normalized:",
        norms.len() - 1
    )?;
    for (i, norm) in norms.iter().enumerate() {
        let sep = if i + 1 == norms.len() { "." } else { "," };
        write!(output, "||v[{}]|| = {:.12}{}", i, norm, sep)?;
        if (i + 1) % 5 == 0 || i + 1 == norms.len() {
            writeln!(output)?;
        } else {
            write!(output, " ")?;
        }
    }
    writeln!(output)?;
    Ok(())
}

pub fn run_with_io<R: BufRead, W: Write>(args: FactorArgs, input: &mut R, output: &mut W) -> Result<()> {
    let m = match args.rows {
        Some(m) => m,
        None => prompt_dimension(input, output, "m")?,
    };
    let n = match args.cols {
        Some(n) => n,
        None => prompt_dimension(input, output, "n")?,
    };

    if let Some(problem) = dimension_problem(m, n) {
        writeln!(output, "{}\nTerminating program.", problem)?;
        return Ok(());
    }
    let (m, n) = (m as usize, n as usize);

    let fill = args.fill_pattern();
    let config = args.config();
    info!("Factorizing {} x {} matrix, fill: {}", m, n, fill);

    let original = build_matrix(m, n, fill);
    writeln!(output, "A = \n{}", original)?;

    let mut r = original.clone();
    let mut reflectors = ReflectorSet::for_shape(m, n)?;
    reduce(&mut r, &mut reflectors, &config)
        .with_context(|| format!("Householder reduction of {} x {} matrix failed", m, n))?;
    let factorization = Factorization { r, reflectors };

    writeln!(output, "R = \n{}", factorization.r)?;
    print_reflectors(output, &factorization)?;

    let check = check_factorization(&original, &factorization.r, &factorization.reflectors)?;
    print_norms(output, &check.reflector_norms)?;
    writeln!(output, "max |QR - A|   = {:.3e}", check.reconstruction_error)?;
    writeln!(output, "max |Q'Q - I|  = {:.3e}", check.orthogonality_error)?;
    writeln!(output, "max |R[i>j]|   = {:.3e}", check.max_below_diagonal)?;
    writeln!(
        output,
        "Self-check {} at tolerance {:.0e}.",
        if check.passes(CHECK_TOL) { "passed" } else { "FAILED" },
        CHECK_TOL
    )?;

    if let Some(ref path) = args.json_out {
        let report = FactorizationReport::new(&original, &factorization, fill, &config, check);
        save_report_json(&report, std::path::Path::new(path))?;
        info!("Report saved to {}", path);
    }

    Ok(())
}
