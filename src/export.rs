//! Non-HTML outputs: JSON, plain-text summary, and CSV export.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;
use sysglance_core::host::{format_uptime, HostSnapshot, LoadAverage};
use sysglance_core::model::size::{format_count, format_size};
use sysglance_core::AnalysisReport;

#[derive(Serialize)]
struct JsonOutput<'a> {
    host: Option<&'a HostSnapshot>,
    analysis: &'a AnalysisReport,
}

pub fn to_json(host: Option<&HostSnapshot>, report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(&JsonOutput {
        host,
        analysis: report,
    })
    .context("cannot serialise report")
}

fn share(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Human-readable summary for the terminal.
pub fn to_text(host: Option<&HostSnapshot>, report: &AnalysisReport) -> String {
    let mut out = String::new();

    if let Some(host) = host {
        let sys = &host.system;
        let _ = writeln!(out, "Host        {} ({})", sys.hostname, sys.os);
        let _ = writeln!(out, "Uptime      {}", format_uptime(sys.uptime_secs));
        let _ = writeln!(out, "CPU         {:.1}%", host.cpu.usage_percent);
        let _ = writeln!(
            out,
            "Memory      {:.1}% of {}",
            host.memory.usage_percent(),
            format_size(host.memory.total_bytes)
        );
        match sys.load {
            LoadAverage::Supported { one, five, fifteen } => {
                let _ = writeln!(out, "Load        {one:.2} {five:.2} {fifteen:.2}");
            }
            LoadAverage::Unsupported {
                fallback_cpu_percent,
            } => {
                let _ = writeln!(out, "Load        n/a (CPU {fallback_cpu_percent:.1}%)");
            }
        }
        for p in &host.top_processes {
            let _ = writeln!(
                out,
                "  {:>7}  {:<24} cpu {:>5.1}%  mem {:>5.1}%",
                p.pid, p.name, p.cpu_percent, p.memory_percent
            );
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "{}: {} files, {}",
        report.root.display(),
        format_count(report.total_files),
        format_size(report.total_size)
    );
    let _ = writeln!(
        out,
        "{:<20} {:>10} {:>7} {:>12} {:>7}",
        "Category", "Files", "%", "Size", "%"
    );
    for c in &report.categories {
        let _ = writeln!(
            out,
            "{:<20} {:>10} {:>6.1}% {:>12} {:>6.1}%",
            c.label.as_str(),
            format_count(c.file_count),
            share(c.file_count, report.total_files),
            format_size(c.total_size),
            share(c.total_size, report.total_size),
        );
    }

    if !report.largest_files.is_empty() {
        out.push_str("\nLargest files\n");
        for (rank, record) in report.largest_files.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}. {:>12}  {}",
                rank + 1,
                format_size(record.size),
                record.path.display()
            );
        }
    }

    if !report.warnings.is_empty() {
        let _ = writeln!(out, "\n{} warnings", report.warnings.len());
        for w in &report.warnings {
            let _ = writeln!(out, "  {w}");
        }
    }
    out
}

/// One CSV row. Category rows leave `rank` and `path` empty; file rows
/// leave `file_count` empty.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    kind: &'static str,
    rank: Option<usize>,
    label: &'a str,
    path: Option<String>,
    file_count: Option<u64>,
    size_bytes: u64,
    share_percent: String,
}

/// Write category totals followed by the largest files.
pub fn write_csv(path: &Path, report: &AnalysisReport) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("cannot create {}", path.display()))?;

    for c in &report.categories {
        writer.serialize(CsvRow {
            kind: "category",
            rank: None,
            label: c.label.as_str(),
            path: None,
            file_count: Some(c.file_count),
            size_bytes: c.total_size,
            share_percent: format!("{:.2}", share(c.total_size, report.total_size)),
        })?;
    }
    for (rank, record) in report.largest_files.iter().enumerate() {
        let label = report
            .category_of(record)
            .map_or("other", |c| c.label.as_str());
        writer.serialize(CsvRow {
            kind: "file",
            rank: Some(rank + 1),
            label,
            path: Some(record.path.to_string_lossy().into_owned()),
            file_count: None,
            size_bytes: record.size,
            share_percent: format!("{:.2}", share(record.size, report.total_size)),
        })?;
    }

    writer
        .flush()
        .with_context(|| format!("cannot write {}", path.display()))?;
    Ok(())
}
