/// Physical memory usage.
use serde::Serialize;
use sysinfo::System;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MemoryInfo {
    pub total_bytes: u64,
    pub used_bytes: u64,
}

impl MemoryInfo {
    pub fn from_system(sys: &System) -> Self {
        Self {
            total_bytes: sys.total_memory(),
            used_bytes: sys.used_memory(),
        }
    }

    /// Used share of total, 0.0–100.0; 0.0 when the total is unknown.
    pub fn usage_percent(&self) -> f32 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        (self.used_bytes as f64 / self.total_bytes as f64 * 100.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_percent_handles_zero_total() {
        let mem = MemoryInfo {
            total_bytes: 0,
            used_bytes: 10,
        };
        assert_eq!(mem.usage_percent(), 0.0);
    }

    #[test]
    fn usage_percent_is_a_ratio() {
        let mem = MemoryInfo {
            total_bytes: 8,
            used_bytes: 2,
        };
        assert_eq!(mem.usage_percent(), 25.0);
    }
}
