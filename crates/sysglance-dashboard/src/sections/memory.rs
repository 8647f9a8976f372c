/// Memory card.
use super::{percent, set, NOT_AVAILABLE};
use crate::template::Variables;
use crate::theme::Status;
use sysglance_core::host::MemoryInfo;
use sysglance_core::model::size::format_gigabytes;

pub fn variables(memory: &MemoryInfo, vars: &mut Variables) {
    let usage = percent(memory.used_bytes, memory.total_bytes);
    set(vars, "ram_total", format_gigabytes(memory.total_bytes));
    set(vars, "ram_used", format_gigabytes(memory.used_bytes));
    set(vars, "memory_percent", format!("{usage:.1}"));
    set(vars, "memory_status", Status::for_percent(usage).name());
}

pub fn unavailable(vars: &mut Variables) {
    set(vars, "ram_total", NOT_AVAILABLE);
    set(vars, "ram_used", NOT_AVAILABLE);
    set(vars, "memory_percent", "0.0");
    set(vars, "memory_status", Status::Green.name());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gigabytes_and_status() {
        let mut vars = Variables::new();
        let gib = 1024 * 1024 * 1024;
        variables(
            &MemoryInfo {
                total_bytes: 16 * gib,
                used_bytes: 14 * gib,
            },
            &mut vars,
        );
        assert_eq!(vars["ram_total"], "16.00 GB");
        assert_eq!(vars["ram_used"], "14.00 GB");
        assert_eq!(vars["memory_percent"], "87.5");
        assert_eq!(vars["memory_status"], "red");
    }

    #[test]
    fn zero_total_is_zero_percent() {
        let mut vars = Variables::new();
        variables(
            &MemoryInfo {
                total_bytes: 0,
                used_bytes: 0,
            },
            &mut vars,
        );
        assert_eq!(vars["memory_percent"], "0.0");
        assert_eq!(vars["memory_status"], "green");
    }
}
