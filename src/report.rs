use crate::types::{CheckOutcome, Extra, FixtureSet, GenerationSummary, SkipReason, SkippedLine};
use crate::{t, t_args};
use colored::Colorize;
use std::path::Path;

fn skip_reason_label(reason: SkipReason) -> String {
    match reason {
        SkipReason::Blank => t!("skip-blank"),
        SkipReason::Comment => t!("skip-comment"),
        SkipReason::TooFewTokens(n) => t_args!("skip-too-few-tokens", "count" => n),
    }
}

fn render_skipped(out: &mut String, skipped: &[SkippedLine]) {
    for s in skipped {
        let label = skip_reason_label(s.reason);
        let line = format!("  {} {}: {}\n", "[SKIP]".yellow(), s.index + 1, label);
        out.push_str(&line);
    }
}

pub fn render_summary(summary: &GenerationSummary, output: &Path, verbose: bool) -> String {
    let mut out = String::new();
    let header = t_args!("summary-generated",
        "cases" => summary.generated.to_string().green().bold(),
        "lines" => summary.line_count,
        "skipped" => summary.skipped.len(),
        "file" => output.display()
    );
    out.push_str(&header);
    out.push('\n');
    // Blank and comment lines are expected; only short lines are flagged by default.
    let short: Vec<SkippedLine> = summary
        .skipped
        .iter()
        .copied()
        .filter(|s| matches!(s.reason, SkipReason::TooFewTokens(_)))
        .collect();
    if verbose {
        render_skipped(&mut out, &summary.skipped);
    } else {
        render_skipped(&mut out, &short);
    }
    out
}

fn describe_extra(extra: &Extra) -> String {
    match extra {
        Extra::Keyed { field, value } => format!("{field}={value:?}"),
        Extra::BinaryLength => "bin_len>0".to_string(),
    }
}

/// One line per record: raw line number, test name, expectations.
pub fn render_records(fixtures: &FixtureSet) -> String {
    let mut out = String::new();
    out.push_str(&t_args!("records-header", "count" => fixtures.records.len()));
    out.push('\n');
    for r in &fixtures.records {
        let extras: Vec<String> = r.extras.iter().map(describe_extra).collect();
        out.push_str(&format!(
            "{:>5}  {}  type={} mmsi={} {}{}\n",
            r.index + 1,
            crate::emit::test_name(r.index).bold(),
            r.message_type,
            r.mmsi,
            r.payload.dimmed(),
            if extras.is_empty() {
                String::new()
            } else {
                format!("  [{}]", extras.join(", ")).cyan().to_string()
            }
        ));
    }
    out
}

pub fn render_check(outcome: CheckOutcome, output: &Path) -> String {
    match outcome {
        CheckOutcome::UpToDate => format!(
            "{} {}",
            "[OK]".green().bold(),
            t_args!("check-up-to-date", "file" => output.display())
        ),
        CheckOutcome::Stale => format!(
            "{} {}",
            "[STALE]".red().bold(),
            t_args!("check-stale", "file" => output.display())
        ),
        CheckOutcome::Missing => format!(
            "{} {}",
            "[MISSING]".red().bold(),
            t_args!("check-missing", "file" => output.display())
        ),
    }
}

pub fn print_summary(summary: &GenerationSummary, output: &Path, verbose: bool) {
    print!("{}", render_summary(summary, output, verbose));
}
