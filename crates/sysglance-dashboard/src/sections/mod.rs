/// Section builders: each one turns part of the data into template
/// variables.
///
/// Percentages are derived here and nowhere else. A zero denominator
/// yields `0.0` so an empty tree or an unreported total never renders as
/// `NaN%`. Anything that came from the filesystem or the OS (file names,
/// process names, hostnames) is HTML-escaped before it reaches a variable.
pub mod cpu;
pub mod files;
pub mod memory;
pub mod processes;
pub mod system;

use crate::template::Variables;

/// Placeholder for values the host did not report.
pub const NOT_AVAILABLE: &str = "N/A";

/// `part / whole * 100`, or `0.0` when `whole` is zero.
pub fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Escape the five characters that matter in HTML text and attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

pub(crate) fn set(vars: &mut Variables, name: &str, value: impl Into<String>) {
    vars.insert(name.to_string(), value.into());
}
