use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuSnapshot {
    pub usage_percent: f64,
    pub per_core: Vec<f64>,
    pub freq_mhz: f64,
    /// Physical cores.
    pub core_count: usize,
    /// Logical CPUs.
    pub thread_count: usize,
    pub model: String,
}

/// Sizes in GiB, percentages 0..=100.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemorySnapshot {
    pub used_gb: f64,
    pub total_gb: f64,
    pub available_gb: f64,
    pub percent: f64,
    pub swap_used_gb: f64,
    pub swap_total_gb: f64,
    pub swap_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiskUsage {
    pub mount: String,
    pub used_gb: f64,
    pub total_gb: f64,
    pub percent: f64,
}

/// Cumulative byte counters since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiskIoCounters {
    pub read_bytes: u64,
    pub write_bytes: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkSnapshot {
    pub hostname: String,
    /// Interface name to IPv4 address.
    pub interface_ips: BTreeMap<String, String>,
    /// Cumulative counters summed over all interfaces.
    pub bytes_sent: u64,
    pub bytes_recv: u64,
}

/// `None` fields are unavailable on this host.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GpuSnapshot {
    pub name: String,
    pub usage_percent: Option<f64>,
    pub vram_used_mb: Option<f64>,
    pub vram_total_mb: Option<f64>,
    pub temp_c: Option<f64>,
}

impl GpuSnapshot {
    pub fn unavailable() -> Self {
        Self {
            name: "No GPU detected".to_string(),
            ..Self::default()
        }
    }

    pub fn vram_percent(&self) -> Option<f64> {
        match (self.vram_used_mb, self.vram_total_mb) {
            (Some(used), Some(total)) if total > 0.0 => Some(used / total * 100.0),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessSnapshot {
    pub pid: u32,
    /// 0 when the process has no parent.
    pub ppid: u32,
    pub name: String,
    pub user: String,
    pub cpu_percent: f64,
    pub mem_percent: f64,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemInfo {
    pub os: String,
    pub uptime_secs: Option<u64>,
    pub load_avg: Option<[f64; 3]>,
}

/// Everything the dashboard shows for one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemSnapshot {
    pub cpu: CpuSnapshot,
    pub memory: MemorySnapshot,
    pub disks: Vec<DiskUsage>,
    pub disk_io: DiskIoCounters,
    pub network: NetworkSnapshot,
    pub gpu: GpuSnapshot,
    pub processes: Vec<ProcessSnapshot>,
    pub system: SystemInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vram_percent_needs_both_fields() {
        let mut gpu = GpuSnapshot::unavailable();
        assert_eq!(gpu.vram_percent(), None);
        gpu.vram_used_mb = Some(2048.0);
        gpu.vram_total_mb = Some(8192.0);
        assert_eq!(gpu.vram_percent(), Some(25.0));
        gpu.vram_total_mb = Some(0.0);
        assert_eq!(gpu.vram_percent(), None);
    }
}
