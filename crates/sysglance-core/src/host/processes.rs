/// Process ranking by combined CPU and memory load.
use super::cpu::sanitize_percent;
use serde::Serialize;
use std::cmp::Ordering;
use sysinfo::System;

/// Processes shown on the dashboard.
pub const DEFAULT_TOP_PROCESSES: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    /// Share of one core; may exceed 100 for multi-threaded processes.
    pub cpu_percent: f32,
    /// Resident memory as a share of total physical memory.
    pub memory_percent: f32,
}

impl ProcessInfo {
    /// Ranking key: CPU% + memory%.
    pub fn load(&self) -> f32 {
        self.cpu_percent + self.memory_percent
    }
}

/// Keep the `n` heaviest processes, heaviest first, ties by ascending pid.
pub fn rank_processes(mut processes: Vec<ProcessInfo>, n: usize) -> Vec<ProcessInfo> {
    processes.sort_by(|a, b| {
        b.load()
            .partial_cmp(&a.load())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.pid.cmp(&b.pid))
    });
    processes.truncate(n);
    processes
}

pub(crate) fn top_processes(sys: &System, n: usize) -> Vec<ProcessInfo> {
    let total_memory = sys.total_memory();
    let processes = sys
        .processes()
        .iter()
        .map(|(pid, process)| {
            let memory_percent = if total_memory > 0 {
                (process.memory() as f64 / total_memory as f64 * 100.0) as f32
            } else {
                0.0
            };
            let cpu = process.cpu_usage();
            ProcessInfo {
                pid: pid.as_u32(),
                name: process.name().to_string_lossy().into_owned(),
                cpu_percent: if cpu.is_finite() { cpu.max(0.0) } else { 0.0 },
                memory_percent: sanitize_percent(memory_percent),
            }
        })
        .collect();
    rank_processes(processes, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc(pid: u32, cpu: f32, mem: f32) -> ProcessInfo {
        ProcessInfo {
            pid,
            name: format!("p{pid}"),
            cpu_percent: cpu,
            memory_percent: mem,
        }
    }

    #[test]
    fn ranks_by_combined_load() {
        let ranked = rank_processes(
            vec![proc(1, 5.0, 1.0), proc(2, 1.0, 20.0), proc(3, 30.0, 0.5), proc(4, 0.0, 0.0)],
            3,
        );
        let pids: Vec<u32> = ranked.iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![3, 2, 1]);
    }

    #[test]
    fn equal_load_breaks_ties_by_pid() {
        let ranked = rank_processes(vec![proc(9, 1.0, 1.0), proc(4, 2.0, 0.0)], 2);
        assert_eq!(ranked[0].pid, 4);
    }

    #[test]
    fn fewer_processes_than_requested() {
        assert_eq!(rank_processes(vec![proc(1, 0.0, 0.0)], 3).len(), 1);
        assert!(rank_processes(Vec::new(), 3).is_empty());
    }
}
