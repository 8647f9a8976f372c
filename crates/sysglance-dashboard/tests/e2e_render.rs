/// End-to-end dashboard rendering: a real analysis of a temporary tree plus
/// a fixed host snapshot, rendered through the built-in template and
/// written to disk.
use chrono::{Local, TimeZone};
use std::fs;
use std::io::Write;
use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;
use sysglance_core::host::{CpuInfo, HostSnapshot, LoadAverage, MemoryInfo, ProcessInfo, SystemInfo};
use sysglance_core::{AnalysisReport, Analyzer};
use sysglance_dashboard::template::unresolved;
use sysglance_dashboard::{Dashboard, ThemeMode, DEFAULT_TEMPLATE};
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_bytes(path: &Path, n: usize) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = fs::File::create(path).unwrap();
    f.write_all(&vec![0u8; n]).unwrap();
}

fn analysed_tree() -> (TempDir, AnalysisReport) {
    let tmp = TempDir::new().unwrap();
    write_bytes(&tmp.path().join("a.txt"), 100);
    write_bytes(&tmp.path().join("scripts/b.py"), 200);
    write_bytes(&tmp.path().join("scripts/c.unknown"), 50);
    let report = Analyzer::default().analyze(tmp.path()).unwrap();
    (tmp, report)
}

fn host() -> HostSnapshot {
    HostSnapshot {
        cpu: CpuInfo {
            physical_cores: Some(8),
            frequency_mhz: Some(3_200),
            usage_percent: 91.0,
            per_core: vec![10.0, 55.0, 99.0],
        },
        memory: MemoryInfo {
            total_bytes: 8 * 1024 * 1024 * 1024,
            used_bytes: 2 * 1024 * 1024 * 1024,
        },
        system: SystemInfo {
            hostname: "testbox".to_string(),
            os: "Linux 6.8.0".to_string(),
            uptime_secs: 3 * 86_400 + 4 * 3_600 + 5 * 60,
            user_count: Some(2),
            primary_ip: IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)),
            load: LoadAverage::Supported {
                one: 0.42,
                five: 0.5,
                fifteen: 0.61,
            },
            sampled_at: Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
        },
        top_processes: vec![ProcessInfo {
            pid: 4_242,
            name: "postgres".to_string(),
            cpu_percent: 40.0,
            memory_percent: 12.5,
        }],
    }
}

// ── Rendering ────────────────────────────────────────────────────────────────

#[test]
fn default_template_resolves_every_placeholder() {
    let (_tmp, report) = analysed_tree();
    let dashboard = Dashboard::new();
    let vars = dashboard.variables(Some(&host()), &report);
    assert!(
        unresolved(DEFAULT_TEMPLATE, &vars).is_empty(),
        "unresolved: {:?}",
        unresolved(DEFAULT_TEMPLATE, &vars)
    );

    let html = dashboard.render(&host(), &report);
    assert!(!html.contains("{{"));
}

#[test]
fn page_carries_host_and_file_figures() {
    let (_tmp, report) = analysed_tree();
    let html = Dashboard::new()
        .with_refresh_secs(30)
        .render(&host(), &report);

    assert!(html.contains("<meta http-equiv=\"refresh\" content=\"30\">"));
    assert!(html.contains("status-red\">91.0%"));
    assert!(html.contains("<dd>3200 MHz</dd>"));
    assert!(html.contains("<dd>8.00 GB</dd>"));
    assert!(html.contains("status-green\">25.0%"));
    assert!(html.contains("<dd>3d 4h 5m</dd>"));
    assert!(html.contains("0.42 / 0.50 / 0.61"));
    assert!(html.contains("<td>postgres</td><td>4242</td>"));
    assert!(html.contains("2024-01-02 03:04:05"));
    assert!(html.contains("<td>1</td><td title=\"scripts/b.py\">b.py</td>"));
    assert!(html.contains("Warnings (0)"));
}

#[test]
fn without_host_the_files_still_render() {
    let (_tmp, report) = analysed_tree();
    let html = Dashboard::new().render_with(None, &report);
    assert!(html.contains("<dd>N/A</dd>"));
    assert!(html.contains("No processes found"));
    assert!(html.contains("b.py"));
    assert!(!html.contains("{{"));
}

#[test]
fn light_theme_changes_palette() {
    let (_tmp, report) = analysed_tree();
    let dark = Dashboard::new().render(&host(), &report);
    let light = Dashboard::new()
        .with_theme(ThemeMode::Light)
        .render(&host(), &report);
    assert!(dark.contains("--background: #1e1e2e;"));
    assert!(light.contains("--background: #f5f5f5;"));
}

#[test]
fn custom_template_file_is_used() {
    let (tmp, report) = analysed_tree();
    let template = tmp.path().join("mini.html");
    fs::write(&template, "{{ hostname }}|{{ total_files }}|{{ unknown_thing }}").unwrap();

    let html = Dashboard::new()
        .with_template_file(&template)
        .unwrap()
        .render(&host(), &report);
    assert_eq!(html, "testbox|3|{{ unknown_thing }}");
}

#[test]
fn rendered_page_is_written_to_disk() {
    let (_tmp, report) = analysed_tree();
    let out_dir = TempDir::new().unwrap();
    let out = out_dir.path().join("index.html");

    let dashboard = Dashboard::new();
    let html = dashboard.render(&host(), &report);
    dashboard.write_to(&out, &html).unwrap();

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written, html);
    assert!(written.starts_with("<!DOCTYPE html>"));
}
