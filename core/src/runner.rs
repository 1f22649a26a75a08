//! Batch and interactive drivers around a `Simulator`.

use std::fs;
use std::io::{BufRead, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::engine::Simulator;
use crate::error::{SimError, SimResult};
use crate::language::Language;
use crate::metrics::{CorpusMetrics, Summary};
use crate::oracle::SuggestionOracle;
use crate::report::{self, RunInfo};

const RULE: &str = "----------------------------------------";

/// Simulate every non-blank line of `input` and append one summary row to
/// the CSV at `output`.
///
/// A missing input file aborts before anything is written. A sentence that
/// fails, or a line that is not valid UTF-8, is logged and skipped; the rest
/// of the corpus still counts.
pub fn run_batch<L, O, W>(sim: &mut Simulator<L, O>, input: &Path, output: &Path, out: &mut W) -> SimResult<Summary>
where
    L: Language,
    O: SuggestionOracle,
    W: Write,
{
    let start = Instant::now();
    writeln!(out, "Starting batch simulation...")?;
    writeln!(out, "  Input file: {}", input.display())?;
    writeln!(out, "  Output CSV: {}", output.display())?;
    writeln!(out, "  Model ID: {}", sim.config().model_id)?;

    if !input.is_file() {
        return Err(SimError::InputNotFound(input.to_path_buf()));
    }
    let content = fs::read(input)?;
    let mut metrics = CorpusMetrics::new(sim.config().histogram_bins);
    for (lineno, raw) in content.split(|&b| b == b'\n').enumerate() {
        let Ok(line) = std::str::from_utf8(raw) else {
            warn!(line = lineno + 1, "skipping line that is not valid UTF-8");
            continue;
        };
        let target = line.trim();
        if target.is_empty() {
            continue;
        }
        match sim.simulate(target) {
            Ok(report) => metrics.fold(&report),
            Err(e) => warn!(line = lineno + 1, target, error = %e, "skipping sentence"),
        }
    }

    let duration = start.elapsed();
    let summary = metrics.finalize();
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let info = RunInfo::from_config(sim.config(), input);
    report::append_csv(
        output,
        &report::csv_header(&summary),
        &report::csv_row(&timestamp, duration, &info, &summary),
    )?;

    info!(lines = summary.lines, clicks = summary.clicks, "batch run finished");
    writeln!(
        out,
        "Simulation complete. Took {}. Results appended to {}",
        report::format_duration(duration),
        output.display()
    )?;
    Ok(summary)
}

/// Read one target sentence per line until end of input, printing the step
/// breakdown for each and a corpus summary at the end. Undecodable lines are
/// skipped and a read error ends the session like end of input.
pub fn run_interactive<L, O, R, W>(sim: &mut Simulator<L, O>, input: R, out: &mut W) -> SimResult<Summary>
where
    L: Language,
    O: SuggestionOracle,
    R: BufRead,
    W: Write,
{
    let session_start = Instant::now();
    let mut metrics = CorpusMetrics::new(sim.config().histogram_bins);
    let mut processing = Duration::ZERO;

    writeln!(out, "--- Starting Interactive Simulation ---")?;
    writeln!(out, "Enter a {} sentence. Press Ctrl+D to end and see summary.", sim.language().name())?;
    writeln!(out, "{RULE}")?;
    prompt(out)?;

    for (lineno, raw) in input.split(b'\n').enumerate() {
        let raw = match raw {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "input closed");
                break;
            }
        };
        let Ok(line) = String::from_utf8(raw) else {
            warn!(line = lineno + 1, "skipping line that is not valid UTF-8");
            writeln!(out, "  [ERROR] line {} is not valid UTF-8", lineno + 1)?;
            prompt(out)?;
            continue;
        };
        let target = line.trim();
        if target.is_empty() {
            prompt(out)?;
            continue;
        }

        writeln!(out)?;
        writeln!(out, "  [Processing] -> {target}")?;
        if let Some(reading) = sim.language().reading(target) {
            writeln!(out, "  [Reading ({} chars)] -> {reading}", reading.chars().count())?;
        }

        let started = Instant::now();
        let result = sim.simulate(target);
        let elapsed = started.elapsed();
        processing += elapsed;

        match result {
            Ok(report) => {
                for step in &report.steps {
                    writeln!(out, "    [STATS] {step}")?;
                }
                writeln!(out, "  [RESULT] {} clicks for {} characters", report.ledger.clicks, report.target_chars)?;
                metrics.fold(&report);
            }
            Err(e) => {
                warn!(target, error = %e, "sentence failed");
                writeln!(out, "  [ERROR] {e}")?;
            }
        }
        writeln!(out, "  [INFO] This sentence processed in {}", report::format_duration(elapsed))?;
        writeln!(out, "{}", &RULE[..20])?;
        prompt(out)?;
    }

    let summary = metrics.finalize();
    writeln!(out, "\n\n{}", "=".repeat(RULE.len()))?;
    writeln!(out, "--- Interactive Session Summary ---")?;
    if metrics.is_empty() {
        writeln!(out, "No lines were processed.")?;
    } else {
        report::write_summary(out, sim.config(), &summary)?;
        writeln!(out, "{}", &RULE[..20])?;
        writeln!(out, "Total Script Processing Time: {}", report::format_duration(processing))?;
        writeln!(
            out,
            "Avg. Script Processing Time per Sentence: {}",
            report::format_duration(processing / summary.lines as u32)
        )?;
        writeln!(
            out,
            "Total Interactive Session Duration: {}",
            report::format_duration(session_start.elapsed())
        )?;
    }
    writeln!(out, "{}", "=".repeat(RULE.len()))?;
    Ok(summary)
}

fn prompt<W: Write>(out: &mut W) -> SimResult<()> {
    write!(out, "Enter> ")?;
    out.flush()?;
    Ok(())
}
