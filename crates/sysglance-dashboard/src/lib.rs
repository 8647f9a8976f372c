/// SysGlance Dashboard: turns a host snapshot and an analysis report into a
/// static, self-refreshing HTML page.
///
/// Nothing here measures anything. Every figure comes from
/// `sysglance-core`; this crate only derives percentages, picks status
/// colours, escapes text, and fills the template.
pub mod dashboard;
pub mod error;
pub mod sections;
pub mod template;
pub mod theme;

pub use dashboard::{Dashboard, DEFAULT_REFRESH_SECS, DEFAULT_TITLE};
pub use error::DashboardError;
pub use template::{load_template, substitute, Variables, DEFAULT_TEMPLATE};
pub use theme::{Palette, Status, ThemeMode};
