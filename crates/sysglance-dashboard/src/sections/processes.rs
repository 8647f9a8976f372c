/// Top processes table.
use super::{escape_html, set};
use crate::template::Variables;
use std::fmt::Write;
use sysglance_core::host::ProcessInfo;

pub fn variables(processes: &[ProcessInfo], vars: &mut Variables) {
    if processes.is_empty() {
        return unavailable(vars);
    }
    let mut html = String::new();
    for p in processes {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{:.1}%</td><td>{:.1}%</td></tr>",
            escape_html(&p.name),
            p.pid,
            p.cpu_percent,
            p.memory_percent,
        );
    }
    set(vars, "top_processes", html);
}

pub fn unavailable(vars: &mut Variables) {
    set(
        vars,
        "top_processes",
        "<tr><td colspan=\"4\">No processes found</td></tr>",
    );
}
