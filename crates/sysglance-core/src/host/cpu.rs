/// CPU utilisation, overall and per logical core.
use serde::Serialize;
use sysinfo::System;

#[derive(Debug, Clone, Serialize)]
pub struct CpuInfo {
    /// Physical core count, when the platform reports it.
    pub physical_cores: Option<usize>,
    /// Current frequency of the first core in MHz; `None` when unreported.
    pub frequency_mhz: Option<u64>,
    /// Overall utilisation, 0.0–100.0.
    pub usage_percent: f32,
    /// Utilisation of each logical core, in core order.
    pub per_core: Vec<f32>,
}

impl CpuInfo {
    pub fn from_system(sys: &System) -> Self {
        let cpus = sys.cpus();
        let frequency_mhz = cpus.first().map(|c| c.frequency()).filter(|&f| f > 0);
        let physical = num_cpus::get_physical();

        Self {
            physical_cores: (physical > 0).then_some(physical),
            frequency_mhz,
            usage_percent: sanitize_percent(sys.global_cpu_usage()),
            per_core: cpus.iter().map(|c| sanitize_percent(c.cpu_usage())).collect(),
        }
    }
}

/// Clamp into 0–100 and map NaN to 0 so templates never print "NaN%".
pub(crate) fn sanitize_percent(p: f32) -> f32 {
    if p.is_finite() {
        p.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
