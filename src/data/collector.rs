use super::snapshot::{
    CpuSnapshot, DiskIoCounters, DiskUsage, GpuSnapshot, MemorySnapshot, NetworkSnapshot,
    ProcessSnapshot, SystemInfo,
};
use super::Collector;
use nvml_wrapper::{enum_wrappers::device::TemperatureSensor, Nvml};
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use sysinfo::{
    CpuExt, DiskExt, NetworkExt, NetworksExt, PidExt, ProcessExt, System, SystemExt, UserExt,
};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;
const MIB: f64 = 1024.0 * 1024.0;
const SECTOR_BYTES: u64 = 512;
const SUBPROCESS_TIMEOUT: Duration = Duration::from_millis(500);
/// Interface addresses change rarely; re-query `ip` every this many samples.
const IP_REFRESH_EVERY: u32 = 30;

/// Live host metrics from sysinfo, NVML and a few Linux kernel files.
pub struct SysinfoCollector {
    system: System,
    nvml: Option<Nvml>,
    hostname: String,
    interface_ips: BTreeMap<String, String>,
    ip_refresh_in: u32,
}

impl Default for SysinfoCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl SysinfoCollector {
    pub fn new() -> Self {
        let mut system = System::new();
        system.refresh_cpu();
        system.refresh_memory();
        system.refresh_disks_list();
        system.refresh_networks_list();
        system.refresh_users_list();

        Self {
            system,
            nvml: Self::initialize_nvml(),
            hostname: Self::get_hostname(),
            interface_ips: BTreeMap::new(),
            ip_refresh_in: 0,
        }
    }

    fn initialize_nvml() -> Option<Nvml> {
        match Nvml::init() {
            Ok(nvml) => match nvml.device_count() {
                Ok(count) if count > 0 => Some(nvml),
                Ok(_) => {
                    tracing::debug!("NVML loaded but reports no devices");
                    None
                }
                Err(err) => {
                    tracing::debug!(error = %err, "NVML device count failed");
                    None
                }
            },
            Err(err) => {
                tracing::debug!(error = %err, "NVML unavailable");
                None
            }
        }
    }

    fn get_hostname() -> String {
        hostname::get()
            .unwrap_or_else(|_| std::ffi::OsString::from("Unknown"))
            .to_string_lossy()
            .into_owned()
    }

    fn average_frequency(&self) -> f64 {
        let cpus = self.system.cpus();
        let reported: Vec<u64> = cpus
            .iter()
            .map(|cpu| cpu.frequency())
            .filter(|f| *f > 0)
            .collect();
        if !reported.is_empty() {
            return reported.iter().sum::<u64>() as f64 / reported.len() as f64;
        }

        #[cfg(target_os = "linux")]
        {
            if let Some(mhz) = Self::read_cpu_frequency_from_sysfs(0) {
                return mhz as f64;
            }
        }
        0.0
    }

    #[cfg(target_os = "linux")]
    fn read_cpu_frequency_from_sysfs(cpu_idx: usize) -> Option<u64> {
        let candidates = [
            format!("/sys/devices/system/cpu/cpu{}/cpufreq/scaling_cur_freq", cpu_idx),
            format!("/sys/devices/system/cpu/cpu{}/cpufreq/cpuinfo_cur_freq", cpu_idx),
        ];

        for path in candidates {
            let Ok(raw) = std::fs::read_to_string(path) else {
                continue;
            };
            let Ok(value) = raw.trim().parse::<u64>() else {
                continue;
            };
            if value == 0 {
                continue;
            }

            // cpufreq exports in kHz on Linux. If already in MHz, keep it.
            return Some(if value >= 100_000 { value / 1000 } else { value });
        }

        None
    }

    fn refresh_interface_ips(&mut self) {
        if self.ip_refresh_in > 0 {
            self.ip_refresh_in -= 1;
            return;
        }
        self.ip_refresh_in = IP_REFRESH_EVERY;
        self.interface_ips = run_with_timeout("ip", &["-o", "-4", "addr", "show"], SUBPROCESS_TIMEOUT)
            .map(|out| parse_ip_addr(&out))
            .unwrap_or_default();
    }

    fn process_disk_totals(&mut self) -> DiskIoCounters {
        self.system.refresh_processes();
        let mut counters = DiskIoCounters::default();
        for process in self.system.processes().values() {
            let usage = process.disk_usage();
            counters.read_bytes = counters.read_bytes.saturating_add(usage.total_read_bytes);
            counters.write_bytes = counters
                .write_bytes
                .saturating_add(usage.total_written_bytes);
        }
        counters
    }
}

impl Collector for SysinfoCollector {
    fn cpu(&mut self) -> CpuSnapshot {
        self.system.refresh_cpu();
        let cpus = self.system.cpus();
        let thread_count = cpus.len();
        CpuSnapshot {
            usage_percent: self.system.global_cpu_info().cpu_usage() as f64,
            per_core: cpus.iter().map(|cpu| cpu.cpu_usage() as f64).collect(),
            freq_mhz: self.average_frequency(),
            core_count: self.system.physical_core_count().unwrap_or(thread_count),
            thread_count,
            model: cpus
                .first()
                .map(|cpu| cpu.brand().trim().to_string())
                .filter(|brand| !brand.is_empty())
                .unwrap_or_else(|| "Unknown CPU".to_string()),
        }
    }

    fn memory(&mut self) -> MemorySnapshot {
        self.system.refresh_memory();
        let total = self.system.total_memory() as f64;
        let used = self.system.used_memory() as f64;
        let swap_total = self.system.total_swap() as f64;
        let swap_used = self.system.used_swap() as f64;
        MemorySnapshot {
            used_gb: used / GIB,
            total_gb: total / GIB,
            available_gb: self.system.available_memory() as f64 / GIB,
            percent: percent_of(used, total),
            swap_used_gb: swap_used / GIB,
            swap_total_gb: swap_total / GIB,
            swap_percent: percent_of(swap_used, swap_total),
        }
    }

    fn disks(&mut self) -> Vec<DiskUsage> {
        self.system.refresh_disks_list();
        self.system.refresh_disks();

        // Bind mounts and btrfs subvolumes repeat the same device; keep the
        // shortest mount point per (device, size).
        let mut seen: HashSet<(String, u64)> = HashSet::new();
        let mut disks: Vec<(&std::path::Path, &sysinfo::Disk)> = self
            .system
            .disks()
            .iter()
            .filter(|disk| disk.total_space() > 0)
            .map(|disk| (disk.mount_point(), disk))
            .collect();
        disks.sort_by_key(|(mount, _)| mount.as_os_str().len());

        let mut out: Vec<DiskUsage> = disks
            .into_iter()
            .filter(|(_, disk)| {
                seen.insert((
                    disk.name().to_string_lossy().into_owned(),
                    disk.total_space(),
                ))
            })
            .map(|(mount, disk)| {
                let total = disk.total_space() as f64;
                let used = total - disk.available_space() as f64;
                DiskUsage {
                    mount: mount.to_string_lossy().into_owned(),
                    used_gb: used / GIB,
                    total_gb: total / GIB,
                    percent: percent_of(used, total),
                }
            })
            .collect();
        out.sort_by(|a, b| a.mount.cmp(&b.mount));
        out
    }

    fn disk_io(&mut self) -> DiskIoCounters {
        #[cfg(target_os = "linux")]
        {
            if let Ok(content) = std::fs::read_to_string("/proc/diskstats") {
                return parse_diskstats(&content, |name| {
                    std::path::Path::new("/sys/block").join(name).exists()
                });
            }
            tracing::debug!("/proc/diskstats unreadable, summing per-process IO");
        }
        self.process_disk_totals()
    }

    fn network(&mut self) -> NetworkSnapshot {
        self.system.refresh_networks_list();
        self.system.refresh_networks();
        self.refresh_interface_ips();

        let (bytes_recv, bytes_sent) = self
            .system
            .networks()
            .iter()
            .filter(|(name, _)| name.as_str() != "lo")
            .fold((0u64, 0u64), |(rx, tx), (_, data)| {
                (
                    rx.saturating_add(data.total_received()),
                    tx.saturating_add(data.total_transmitted()),
                )
            });

        NetworkSnapshot {
            hostname: self.hostname.clone(),
            interface_ips: self.interface_ips.clone(),
            bytes_sent,
            bytes_recv,
        }
    }

    fn gpu(&mut self) -> GpuSnapshot {
        let Some(nvml) = self.nvml.as_ref() else {
            return GpuSnapshot::unavailable();
        };
        let device = match nvml.device_by_index(0) {
            Ok(device) => device,
            Err(err) => {
                tracing::debug!(error = %err, "NVML device 0 unavailable");
                return GpuSnapshot::unavailable();
            }
        };

        let memory = device.memory_info().ok();
        GpuSnapshot {
            name: device.name().unwrap_or_else(|_| "NVIDIA GPU".to_string()),
            usage_percent: device.utilization_rates().ok().map(|u| u.gpu as f64),
            vram_used_mb: memory.as_ref().map(|m| m.used as f64 / MIB),
            vram_total_mb: memory.as_ref().map(|m| m.total as f64 / MIB),
            temp_c: device
                .temperature(TemperatureSensor::Gpu)
                .ok()
                .map(|t| t as f64),
        }
    }

    fn processes(&mut self, limit: usize) -> Vec<ProcessSnapshot> {
        self.system.refresh_processes();
        let total_memory = self.system.total_memory() as f64;
        // sysinfo process CPU semantics differ across platforms/versions:
        // some report 0..100, others 0..(cores*100). Normalize only when needed.
        let cpu_normalization = self.system.cpus().len().max(1) as f32;

        let mut processes: Vec<ProcessSnapshot> = self
            .system
            .processes()
            .values()
            .map(|process| {
                let raw_cpu = process.cpu_usage();
                let cpu = if raw_cpu > 100.0 {
                    (raw_cpu / cpu_normalization).clamp(0.0, 100.0)
                } else {
                    raw_cpu.clamp(0.0, 100.0)
                };
                let user = process
                    .user_id()
                    .and_then(|uid| self.system.get_user_by_id(uid))
                    .map(|user| user.name().to_string())
                    .unwrap_or_else(|| "?".to_string());

                ProcessSnapshot {
                    pid: process.pid().as_u32(),
                    ppid: process.parent().map(|pid| pid.as_u32()).unwrap_or(0),
                    name: process.name().to_string(),
                    user,
                    cpu_percent: cpu as f64,
                    mem_percent: percent_of(process.memory() as f64, total_memory),
                    status: process.status().to_string(),
                }
            })
            .collect();

        processes.sort_by(|a, b| {
            b.cpu_percent
                .partial_cmp(&a.cpu_percent)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.pid.cmp(&b.pid))
        });
        processes.truncate(limit);
        processes
    }

    fn system(&mut self) -> SystemInfo {
        let os = self
            .system
            .long_os_version()
            .or_else(|| self.system.name())
            .unwrap_or_else(|| "Unknown OS".to_string());

        #[cfg(unix)]
        let load_avg = {
            let load = self.system.load_average();
            Some([load.one, load.five, load.fifteen])
        };
        #[cfg(not(unix))]
        let load_avg = None;

        SystemInfo {
            os,
            uptime_secs: Some(self.system.uptime()),
            load_avg,
        }
    }
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        (part / whole * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}

/// Sum sectors read/written over whole disks in `/proc/diskstats` format.
/// Partitions are skipped via `is_disk` so nothing is counted twice.
pub fn parse_diskstats(content: &str, is_disk: impl Fn(&str) -> bool) -> DiskIoCounters {
    let mut counters = DiskIoCounters::default();
    for line in content.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 10 {
            continue;
        }
        let name = parts[2];
        if name.starts_with("loop") || name.starts_with("ram") || !is_disk(name) {
            continue;
        }
        let (Ok(read), Ok(written)) = (parts[5].parse::<u64>(), parts[9].parse::<u64>()) else {
            continue;
        };
        counters.read_bytes = counters
            .read_bytes
            .saturating_add(read.saturating_mul(SECTOR_BYTES));
        counters.write_bytes = counters
            .write_bytes
            .saturating_add(written.saturating_mul(SECTOR_BYTES));
    }
    counters
}

/// Interface to IPv4 address from `ip -o -4 addr show`, loopback excluded.
pub fn parse_ip_addr(output: &str) -> BTreeMap<String, String> {
    let mut ips = BTreeMap::new();
    for line in output.lines() {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 4 || parts[2] != "inet" {
            continue;
        }
        let iface = parts[1].trim_end_matches(':');
        if iface == "lo" {
            continue;
        }
        let addr = parts[3].split('/').next().unwrap_or(parts[3]);
        ips.entry(iface.to_string())
            .or_insert_with(|| addr.to_string());
    }
    ips
}

/// Run `program`, returning stdout if it exits successfully within `timeout`.
/// The child is killed on timeout.
pub fn run_with_timeout(program: &str, args: &[&str], timeout: Duration) -> Option<String> {
    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            tracing::debug!(program, error = %err, "spawn failed");
            return None;
        }
    };

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) if status.success() => {
                let mut out = String::new();
                child.stdout.take()?.read_to_string(&mut out).ok()?;
                return Some(out);
            }
            Ok(Some(status)) => {
                tracing::debug!(program, %status, "command failed");
                return None;
            }
            Ok(None) if Instant::now() < deadline => {
                std::thread::sleep(Duration::from_millis(10));
            }
            Ok(None) => {
                tracing::warn!(program, ?timeout, "command timed out, killing");
                let _ = child.kill();
                let _ = child.wait();
                return None;
            }
            Err(err) => {
                tracing::debug!(program, error = %err, "wait failed");
                return None;
            }
        }
    }
}
