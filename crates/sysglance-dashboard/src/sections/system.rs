/// System card: identity, uptime, users, address, load, timestamps.
use super::{escape_html, set, NOT_AVAILABLE};
use crate::template::Variables;
use chrono::{DateTime, Local};
use sysglance_core::host::{format_uptime, LoadAverage, SystemInfo};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn variables(system: &SystemInfo, vars: &mut Variables) {
    set(vars, "hostname", escape_html(&system.hostname));
    set(vars, "operating_system", escape_html(&system.os));
    set(vars, "uptime", format_uptime(system.uptime_secs));
    set(
        vars,
        "user_count",
        system
            .user_count
            .map_or_else(|| NOT_AVAILABLE.to_string(), |n| n.to_string()),
    );
    set(vars, "primary_ip", system.primary_ip.to_string());
    load_variables(&system.load, vars);
    timestamps(system.sampled_at, vars);
}

pub fn unavailable(vars: &mut Variables) {
    for name in [
        "hostname",
        "operating_system",
        "uptime",
        "user_count",
        "primary_ip",
        "load_average_1",
        "load_average_5",
        "load_average_15",
    ] {
        set(vars, name, NOT_AVAILABLE);
    }
    set(vars, "load_average_label", "Load Average");
    timestamps(Local::now(), vars);
}

fn load_variables(load: &LoadAverage, vars: &mut Variables) {
    match *load {
        LoadAverage::Supported { one, five, fifteen } => {
            set(vars, "load_average_label", "Load Average");
            set(vars, "load_average_1", format!("{one:.2}"));
            set(vars, "load_average_5", format!("{five:.2}"));
            set(vars, "load_average_15", format!("{fifteen:.2}"));
        }
        LoadAverage::Unsupported {
            fallback_cpu_percent,
        } => {
            set(
                vars,
                "load_average_label",
                "CPU Utilisation (load average not supported)",
            );
            set(vars, "load_average_1", format!("{fallback_cpu_percent:.2}%"));
            set(vars, "load_average_5", NOT_AVAILABLE);
            set(vars, "load_average_15", NOT_AVAILABLE);
        }
    }
}

fn timestamps(at: DateTime<Local>, vars: &mut Variables) {
    let stamp = at.format(TIMESTAMP_FORMAT).to_string();
    set(vars, "timestamp", stamp.clone());
    set(vars, "generation_date", stamp);
}
