/// The dashboard page: variables from every section, substituted into the
/// template, written atomically.
use crate::error::DashboardError;
use crate::sections::{self, escape_html};
use crate::template::{self, Variables, DEFAULT_TEMPLATE};
use crate::theme::{Palette, ThemeMode};
use std::fs;
use std::path::{Path, PathBuf};
use sysglance_core::host::HostSnapshot;
use sysglance_core::AnalysisReport;
use tracing::{debug, info};

/// Browser refresh interval.
pub const DEFAULT_REFRESH_SECS: u64 = 60;

pub const DEFAULT_TITLE: &str = "System Monitoring Dashboard";

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub refresh_secs: u64,
    pub title: String,
    pub theme: ThemeMode,
    template: String,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            refresh_secs: DEFAULT_REFRESH_SECS,
            title: DEFAULT_TITLE.to_string(),
            theme: ThemeMode::default(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_refresh_secs(mut self, secs: u64) -> Self {
        self.refresh_secs = secs;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    /// Use `template` instead of the built-in page.
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Load the template from a file.
    pub fn with_template_file(self, path: &Path) -> Result<Self, DashboardError> {
        let template = template::load_template(path)?;
        debug!("Loaded template {}", path.display());
        Ok(self.with_template(template))
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Every template variable for one page.
    ///
    /// Without a host snapshot the host cards show "N/A".
    pub fn variables(&self, host: Option<&HostSnapshot>, report: &AnalysisReport) -> Variables {
        let palette = Palette::for_mode(self.theme);
        let mut vars = Variables::new();

        vars.insert("title".to_string(), escape_html(&self.title));
        vars.insert("refresh_secs".to_string(), self.refresh_secs.to_string());
        vars.insert("theme_css".to_string(), palette.css_variables());

        match host {
            Some(host) => {
                sections::cpu::variables(&host.cpu, &mut vars);
                sections::memory::variables(&host.memory, &mut vars);
                sections::system::variables(&host.system, &mut vars);
                sections::processes::variables(&host.top_processes, &mut vars);
            }
            None => {
                sections::cpu::unavailable(&mut vars);
                sections::memory::unavailable(&mut vars);
                sections::system::unavailable(&mut vars);
                sections::processes::unavailable(&mut vars);
            }
        }
        sections::files::variables(report, &palette, &mut vars);
        vars
    }

    /// Render the full page.
    pub fn render(&self, host: &HostSnapshot, report: &AnalysisReport) -> String {
        self.render_with(Some(host), report)
    }

    /// Render, with or without host metrics.
    pub fn render_with(&self, host: Option<&HostSnapshot>, report: &AnalysisReport) -> String {
        let vars = self.variables(host, report);
        let missing = template::unresolved(&self.template, &vars);
        if !missing.is_empty() {
            debug!("Template placeholders left unresolved: {}", missing.join(", "));
        }
        template::substitute(&self.template, &vars)
    }

    /// Write `html` to `path` via a sibling temp file and a rename, so a
    /// browser refreshing mid-write never sees a half-written page.
    pub fn write_to(&self, path: &Path, html: &str) -> Result<(), DashboardError> {
        let tmp = temp_path(path);
        let write_err = |source| DashboardError::Write {
            path: path.to_path_buf(),
            source,
        };

        fs::write(&tmp, html).map_err(write_err)?;
        if let Err(err) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(write_err(err));
        }
        info!("Dashboard written to {} ({} bytes)", path.display(), html.len());
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "dashboard.html".into());
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn temp_path_is_a_sibling() {
        assert_eq!(
            temp_path(Path::new("/srv/www/index.html")),
            PathBuf::from("/srv/www/index.html.tmp")
        );
    }

    #[test]
    fn write_to_replaces_existing_file() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("index.html");
        fs::write(&out, "old").unwrap();

        Dashboard::new().write_to(&out, "<html>new</html>").unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "<html>new</html>");
        assert!(!tmp.path().join("index.html.tmp").exists());
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("no/such/dir/index.html");
        let err = Dashboard::new().write_to(&out, "x").unwrap_err();
        assert!(matches!(err, DashboardError::Write { .. }));
    }

    #[test]
    fn title_is_escaped() {
        let dashboard = Dashboard::new()
            .with_title("R&D <ops>")
            .with_template("<title>{{ title }}</title>");
        let report = sysglance_core::Analyzer::default()
            .analyze(TempDir::new().unwrap().path())
            .unwrap();
        assert_eq!(
            dashboard.render_with(None, &report),
            "<title>R&amp;D &lt;ops&gt;</title>"
        );
    }
}
