/// CPU card: core count, frequency, overall usage, per-core table.
use super::{set, NOT_AVAILABLE};
use crate::template::Variables;
use crate::theme::Status;
use std::fmt::Write;
use sysglance_core::host::CpuInfo;

pub fn variables(cpu: &CpuInfo, vars: &mut Variables) {
    let usage = f64::from(cpu.usage_percent);
    set(
        vars,
        "cpu_cores",
        cpu.physical_cores
            .map_or_else(|| NOT_AVAILABLE.to_string(), |n| n.to_string()),
    );
    set(
        vars,
        "cpu_frequency",
        cpu.frequency_mhz
            .map_or_else(|| NOT_AVAILABLE.to_string(), |mhz| format!("{mhz} MHz")),
    );
    set(vars, "cpu_percent", format!("{usage:.1}"));
    set(vars, "cpu_status", Status::for_percent(usage).name());
    set(vars, "cpu_per_core", per_core_rows(&cpu.per_core));
}

pub fn unavailable(vars: &mut Variables) {
    set(vars, "cpu_cores", NOT_AVAILABLE);
    set(vars, "cpu_frequency", NOT_AVAILABLE);
    set(vars, "cpu_percent", "0.0");
    set(vars, "cpu_status", Status::Green.name());
    set(
        vars,
        "cpu_per_core",
        "<tr><td colspan=\"3\">CPU per-core data unavailable</td></tr>",
    );
}

fn per_core_rows(per_core: &[f32]) -> String {
    if per_core.is_empty() {
        return "<tr><td colspan=\"3\">CPU per-core data unavailable</td></tr>".to_string();
    }
    let mut html = String::new();
    for (i, &usage) in per_core.iter().enumerate() {
        let usage = f64::from(usage);
        let class = Status::for_percent(usage).css_class();
        let _ = writeln!(
            html,
            "<tr><td>Core {}</td><td class=\"{class}\">{usage:.1}%</td>\
             <td><div class=\"progress-bar\"><div class=\"progress-fill {class}\" \
             style=\"width: {:.1}%\"></div></div></td></tr>",
            i + 1,
            usage.clamp(0.0, 100.0),
        );
    }
    html
}
