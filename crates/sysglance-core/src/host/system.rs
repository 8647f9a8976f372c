/// General system information: identity, uptime, users, address, load.
use super::cpu::sanitize_percent;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::net::{IpAddr, Ipv4Addr, UdpSocket};
use sysinfo::{System, Users};

/// Load average, or an explicit note of what stands in for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadAverage {
    Supported { one: f64, five: f64, fifteen: f64 },
    /// The platform has no load average (Windows). Overall CPU utilisation
    /// is shown in the one-minute slot instead, labelled as such.
    Unsupported { fallback_cpu_percent: f32 },
}

impl LoadAverage {
    /// Capability check for the current platform.
    pub fn sample(cpu_percent: f32) -> Self {
        if cfg!(windows) {
            Self::Unsupported {
                fallback_cpu_percent: sanitize_percent(cpu_percent),
            }
        } else {
            let load = System::load_average();
            Self::Supported {
                one: load.one,
                five: load.five,
                fifteen: load.fifteen,
            }
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Self::Supported { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemInfo {
    pub hostname: String,
    /// OS name and kernel release, e.g. "Linux 6.8.0".
    pub os: String,
    pub uptime_secs: u64,
    /// Logged-in users; `None` when the platform will not say.
    pub user_count: Option<usize>,
    pub primary_ip: IpAddr,
    pub load: LoadAverage,
    pub sampled_at: DateTime<Local>,
}

impl SystemInfo {
    /// Collect system information. `cpu_percent` feeds the load-average
    /// fallback on platforms without one.
    pub fn collect(cpu_percent: f32) -> Self {
        let users = Users::new_with_refreshed_list();
        let user_count = match users.list().len() {
            0 if cfg!(windows) => None,
            n => Some(n),
        };

        Self {
            hostname: System::host_name().unwrap_or_else(|| "unknown".to_string()),
            os: format!(
                "{} {}",
                System::name().unwrap_or_else(|| std::env::consts::OS.to_string()),
                System::kernel_version().unwrap_or_default()
            )
            .trim()
            .to_string(),
            uptime_secs: System::uptime(),
            user_count,
            primary_ip: primary_ip(),
            load: LoadAverage::sample(cpu_percent),
            sampled_at: Local::now(),
        }
    }
}

/// Address of the interface that carries the default route.
///
/// "Connecting" a UDP socket only selects a route; no packet is sent.
/// Falls back to loopback when there is no route.
pub fn primary_ip() -> IpAddr {
    let probe = || -> std::io::Result<IpAddr> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        socket.connect((Ipv4Addr::new(8, 8, 8, 8), 80))?;
        Ok(socket.local_addr()?.ip())
    };
    probe().unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}

/// Format seconds as `"{days}d {hours}h {minutes}m"`.
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    format!("{days}d {hours}h {minutes}m")
}
