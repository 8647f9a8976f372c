/// File analysis cards: distribution by count, size per category, largest
/// files, and warnings.
use super::{escape_html, percent, set};
use crate::template::Variables;
use crate::theme::Palette;
use std::fmt::Write;
use std::path::Path;
use sysglance_core::model::size::{format_count, format_megabytes, format_size};
use sysglance_core::{AnalysisReport, CategoryStats};

/// Warnings listed individually before the rest are summarised.
pub const MAX_WARNINGS_SHOWN: usize = 50;

pub fn variables(report: &AnalysisReport, palette: &Palette, vars: &mut Variables) {
    set(vars, "total_files", format_count(report.total_files));
    set(
        vars,
        "total_size_mb",
        format!("{:.2}", report.total_size as f64 / (1024.0 * 1024.0)),
    );
    set(vars, "total_size_human", format_size(report.total_size));
    set(
        vars,
        "analysis_directory",
        escape_html(&report.root.to_string_lossy()),
    );
    set(vars, "file_stats", distribution(report));
    set(vars, "file_sizes", sizes(report, palette));
    set(vars, "largest_files_html", largest(report));
    set(vars, "warning_count", report.warnings.len().to_string());
    set(vars, "warnings_html", warnings(report));
    set(vars, "skipped_links", report.skipped_links.to_string());
}

fn extensions_label(stats: &CategoryStats) -> String {
    if stats.extensions.is_empty() {
        return "unmatched".to_string();
    }
    let joined: Vec<&str> = stats.extensions.iter().map(|e| e.as_str()).collect();
    escape_html(&joined.join(" "))
}

fn distribution(report: &AnalysisReport) -> String {
    let mut html = String::new();
    for stats in &report.categories {
        let _ = writeln!(
            html,
            "<div class=\"file-stat-item\"><div class=\"label\">{}</div>\
             <div class=\"extension\">{}</div><div class=\"count\">{}</div>\
             <div class=\"percentage\">{:.1}%</div></div>",
            escape_html(&stats.label),
            extensions_label(stats),
            format_count(stats.file_count),
            percent(stats.file_count, report.total_files),
        );
    }
    html
}

fn sizes(report: &AnalysisReport, palette: &Palette) -> String {
    let mut html = String::new();
    for stats in &report.categories {
        let share = percent(stats.total_size, report.total_size);
        let _ = writeln!(
            html,
            "<div class=\"file-stat-item\"><div class=\"label\">{}</div>\
             <div class=\"count\">{}</div>\
             <div class=\"percentage\">{share:.1}% of total</div>\
             <div class=\"progress-bar\"><div class=\"progress-fill\" \
             style=\"width: {share:.1}%; background: {}\"></div></div></div>",
            escape_html(&stats.label),
            format_megabytes(stats.total_size),
            palette.bar_color(share).to_hex(),
        );
    }
    html
}

fn largest(report: &AnalysisReport) -> String {
    if report.largest_files.is_empty() {
        return "<tr><td colspan=\"4\">No files found</td></tr>".to_string();
    }
    let mut html = String::new();
    for (rank, record) in report.largest_files.iter().enumerate() {
        let shown = display_path(&record.path, &report.root);
        let category = report
            .category_of(record)
            .map_or("other", |c| c.label.as_str());
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td title=\"{}\">{}</td><td>{}</td><td>{}</td></tr>",
            rank + 1,
            escape_html(&shown),
            escape_html(&record.file_name()),
            escape_html(category),
            format_megabytes(record.size),
        );
    }
    html
}

fn warnings(report: &AnalysisReport) -> String {
    if report.warnings.is_empty() {
        return "<li class=\"muted\">No warnings</li>".to_string();
    }
    let mut html = String::new();
    for warning in report.warnings.iter().take(MAX_WARNINGS_SHOWN) {
        let _ = writeln!(html, "<li>{}</li>", escape_html(&warning.to_string()));
    }
    let hidden = report.warnings.len().saturating_sub(MAX_WARNINGS_SHOWN);
    if hidden > 0 {
        let _ = writeln!(html, "<li class=\"muted\">and {hidden} more</li>");
    }
    html
}

/// Path relative to the analysis root when possible.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use compact_str::CompactString;
    use std::path::PathBuf;
    use sysglance_core::model::CategoryId;
    use sysglance_core::{FileRecord, ScanWarning, WarningKind};

    fn stats(label: &str, exts: &[&str], count: u64, size: u64) -> CategoryStats {
        CategoryStats {
            label: CompactString::new(label),
            extensions: exts.iter().map(|e| CompactString::new(e)).collect(),
            file_count: count,
            total_size: size,
        }
    }

    fn report() -> AnalysisReport {
        AnalysisReport {
            root: PathBuf::from("/data"),
            total_files: 4,
            total_size: 400,
            categories: vec![
                stats("Text Documents", &[".txt"], 1, 100),
                stats("Python Scripts", &[".py"], 2, 250),
                stats("other", &[], 1, 50),
            ],
            largest_files: vec![
                FileRecord::new(PathBuf::from("/data/src/big.py"), 200, CategoryId::new(1)),
                FileRecord::new(PathBuf::from("/data/<a>.txt"), 100, CategoryId::new(0)),
            ],
            warnings: vec![ScanWarning::new(
                "/data/secret",
                WarningKind::ReadDir,
                "permission denied",
            )],
            skipped_links: 0,
        }
    }

    fn empty_report() -> AnalysisReport {
        AnalysisReport {
            root: PathBuf::from("/empty"),
            total_files: 0,
            total_size: 0,
            categories: vec![stats("Text Documents", &[".txt"], 0, 0), stats("other", &[], 0, 0)],
            largest_files: Vec::new(),
            warnings: Vec::new(),
            skipped_links: 0,
        }
    }

    #[test]
    fn distribution_shares_by_count() {
        let mut vars = Variables::new();
        variables(&report(), &Palette::dark(), &mut vars);
        let stats = &vars["file_stats"];
        assert!(stats.contains("<div class=\"percentage\">50.0%</div>"));
        assert!(stats.contains("<div class=\"percentage\">25.0%</div>"));
        assert!(stats.contains("unmatched"));
    }

    #[test]
    fn sizes_share_by_bytes() {
        let mut vars = Variables::new();
        variables(&report(), &Palette::dark(), &mut vars);
        assert!(vars["file_sizes"].contains("62.5% of total"));
        assert!(vars["file_sizes"].contains("12.5% of total"));
    }

    #[test]
    fn largest_rows_are_ranked_and_escaped() {
        let mut vars = Variables::new();
        variables(&report(), &Palette::dark(), &mut vars);
        let rows = &vars["largest_files_html"];
        assert!(rows.contains("<td>1</td><td title=\"src/big.py\">big.py</td><td>Python Scripts</td>"));
        assert!(rows.contains("&lt;a&gt;.txt"));
        assert!(!rows.contains("<a>"));
    }

    #[test]
    fn warnings_listed_with_path() {
        let mut vars = Variables::new();
        variables(&report(), &Palette::dark(), &mut vars);
        assert_eq!(vars["warning_count"], "1");
        assert!(vars["warnings_html"].contains("/data/secret: permission denied"));
    }

    #[test]
    fn empty_report_has_zero_percentages() {
        let mut vars = Variables::new();
        variables(&empty_report(), &Palette::dark(), &mut vars);
        assert_eq!(vars["total_files"], "0");
        assert_eq!(vars["total_size_mb"], "0.00");
        assert!(vars["file_stats"].contains("0.0%"));
        assert!(!vars["file_stats"].contains("NaN"));
        assert!(vars["largest_files_html"].contains("No files found"));
        assert!(vars["warnings_html"].contains("No warnings"));
    }

    #[test]
    fn long_warning_lists_are_summarised() {
        let mut r = report();
        r.warnings = (0..MAX_WARNINGS_SHOWN + 7)
            .map(|i| ScanWarning::new(format!("/data/w{i}"), WarningKind::Metadata, "gone"))
            .collect();
        let mut vars = Variables::new();
        variables(&r, &Palette::dark(), &mut vars);
        assert_eq!(vars["warnings_html"].matches("<li>").count(), MAX_WARNINGS_SHOWN);
        assert!(vars["warnings_html"].contains("and 7 more"));
    }
}
