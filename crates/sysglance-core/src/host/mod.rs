/// Host metrics: a one-shot snapshot of CPU, memory, system, and process
/// information, sampled through `sysinfo`.
///
/// This is independent of the directory analyzer; the two only meet in the
/// dashboard.
///
/// Platform gaps are surfaced explicitly. Load average, for instance, does
/// not exist on Windows, so [`LoadAverage::Unsupported`] names the metric
/// shown in its place instead of quietly passing one off as the other.
pub mod cpu;
pub mod memory;
pub mod processes;
pub mod system;

pub use cpu::CpuInfo;
pub use memory::MemoryInfo;
pub use processes::{rank_processes, ProcessInfo, DEFAULT_TOP_PROCESSES};
pub use system::{format_uptime, primary_ip, LoadAverage, SystemInfo};

use serde::Serialize;
use sysinfo::System;
use tracing::debug;

/// Everything the dashboard shows about the host.
#[derive(Debug, Clone, Serialize)]
pub struct HostSnapshot {
    pub cpu: CpuInfo,
    pub memory: MemoryInfo,
    pub system: SystemInfo,
    pub top_processes: Vec<ProcessInfo>,
}

/// Owns the `sysinfo::System` handle used for sampling.
pub struct HostSampler {
    sys: System,
    top_processes: usize,
}

impl HostSampler {
    pub fn new() -> Self {
        Self {
            sys: System::new_all(),
            top_processes: DEFAULT_TOP_PROCESSES,
        }
    }

    /// Number of processes kept in the snapshot.
    pub fn with_top_processes(mut self, n: usize) -> Self {
        self.top_processes = n;
        self
    }

    /// Take one snapshot.
    ///
    /// CPU usage is a delta between two refreshes, so this blocks for
    /// `sysinfo::MINIMUM_CPU_UPDATE_INTERVAL` between them.
    pub fn sample(&mut self) -> HostSnapshot {
        self.sys.refresh_all();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        self.sys.refresh_all();

        let cpu = CpuInfo::from_system(&self.sys);
        let memory = MemoryInfo::from_system(&self.sys);
        let system = SystemInfo::collect(cpu.usage_percent);
        let top_processes = processes::top_processes(&self.sys, self.top_processes);
        debug!(
            "Host sample: cpu {:.1}%, memory {:.1}%, {} processes ranked",
            cpu.usage_percent,
            memory.usage_percent(),
            top_processes.len()
        );

        HostSnapshot {
            cpu,
            memory,
            system,
            top_processes,
        }
    }
}

impl Default for HostSampler {
    fn default() -> Self {
        Self::new()
    }
}
