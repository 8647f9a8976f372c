//! SysGlance: host metrics and directory usage in one self-refreshing HTML
//! dashboard.
//!
//! Thin binary entry point. Analysis and sampling live in `sysglance-core`,
//! rendering in `sysglance-dashboard`.

mod cli;
mod config;
mod export;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, OutputFormat};
use config::{AppConfig, Settings};
use crossbeam_channel::Receiver;
use sysglance_core::host::{HostSampler, HostSnapshot};
use sysglance_core::model::size::format_size;
use sysglance_core::scanner::{progress_channel, ScanProgress};
use sysglance_core::{AnalysisReport, Analyzer};
use sysglance_dashboard::Dashboard;
use tracing::{debug, info, warn, Level};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let settings = Settings::resolve(&cli, config)?;

    info!("SysGlance starting");
    run(&settings)
}

/// Logs go to stderr so JSON and text output on stdout stay clean.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(settings: &Settings) -> Result<()> {
    let host = settings.host.then(|| sample_host(settings));
    let report = analyze(settings)?;

    for warning in &report.warnings {
        warn!("{warning}");
    }
    info!(
        "Analysed {} files ({}) with {} warnings",
        report.total_files,
        format_size(report.total_size),
        report.warnings.len()
    );

    if let Some(path) = &settings.csv {
        export::write_csv(path, &report)?;
        info!("CSV export written to {}", path.display());
    }

    match settings.format {
        OutputFormat::Html => write_dashboard(settings, host.as_ref(), &report),
        OutputFormat::Json => {
            println!("{}", export::to_json(host.as_ref(), &report)?);
            Ok(())
        }
        OutputFormat::Text => {
            print!("{}", export::to_text(host.as_ref(), &report));
            Ok(())
        }
    }
}

fn sample_host(settings: &Settings) -> HostSnapshot {
    info!("Sampling host metrics");
    HostSampler::new()
        .with_top_processes(settings.top_processes)
        .sample()
}

fn analyze(settings: &Settings) -> Result<AnalysisReport> {
    let analyzer = Analyzer::new(settings.analyzer.clone());
    let result = if settings.progress {
        let (tx, rx) = progress_channel();
        let logger = std::thread::Builder::new()
            .name("sysglance-progress".into())
            .spawn(move || log_progress(rx))
            .context("cannot start progress logger")?;
        // The analyzer owns the last sender; dropping it ends the logger.
        let result = analyzer.with_progress(tx).analyze(&settings.root);
        let _ = logger.join();
        result
    } else {
        analyzer.analyze(&settings.root)
    };
    result.with_context(|| format!("cannot analyse {}", settings.root.display()))
}

fn log_progress(rx: Receiver<ScanProgress>) {
    for message in rx {
        match message {
            ScanProgress::Update {
                files_found,
                total_size,
                current_path,
            } => info!(
                "{files_found} files, {} so far ({current_path})",
                format_size(total_size)
            ),
            ScanProgress::Warning(warning) => debug!("{warning}"),
            ScanProgress::Complete {
                duration,
                files_found,
                warning_count,
            } => info!("Walk finished in {duration:.2?}: {files_found} files, {warning_count} warnings"),
        }
    }
}

fn write_dashboard(
    settings: &Settings,
    host: Option<&HostSnapshot>,
    report: &AnalysisReport,
) -> Result<()> {
    let mut dashboard = Dashboard::new()
        .with_refresh_secs(settings.refresh_secs)
        .with_title(settings.title.clone())
        .with_theme(settings.theme);
    if let Some(template) = &settings.template {
        dashboard = dashboard.with_template_file(template)?;
    }

    let html = dashboard.render_with(host, report);
    dashboard.write_to(&settings.output, &html)?;
    info!("Open {} in a browser", settings.output.display());
    Ok(())
}
